pub mod engine;

pub use engine::StackEngine;
