use raylib::prelude::*;
use std::path::PathBuf;
use std::time::Instant;

use crate::error::Result;

pub trait Engine {
    /// Loads the stack textures in order; returns how many loaded.
    fn initialize(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread, paths: Vec<PathBuf>) -> Result<usize>;
    fn handle_input(&mut self, rl: &RaylibHandle);
    fn render_frame(&mut self, now: Instant, rl: &mut RaylibHandle, thread: &RaylibThread);
}
