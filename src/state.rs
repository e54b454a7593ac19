use std::time::Instant;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum StackState {
    Idle,                                       // Current image fully shown, waiting for a click
    Transitioning { started: Option<Instant> }, // Cross-fading to the next image; start set on first tick
}
