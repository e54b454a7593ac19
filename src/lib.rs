//! Click-through image stack rendered as textured planes in a 3D scene.

pub mod compositing;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod layout;
pub mod sequencer;
pub mod stack;
pub mod state;
pub mod texture_loader;

pub use error::{Error, Result};
