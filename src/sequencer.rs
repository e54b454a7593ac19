use std::time::{Duration, Instant};
use tracing::debug;

use crate::state::StackState;

/// Outcome of one frame tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    Idle,
    Fading(f32),
    Committed(usize),
}

/// Click-driven cross-fade sequencer over a stack of `len` images.
///
/// `advance()` starts a transition; the render loop calls `tick(now)` once per
/// frame and the index moves forward only when the fade has fully completed.
#[derive(Debug, Clone)]
pub struct Sequencer {
    len: usize,
    fade_duration: Duration,
    state: StackState,
    current_index: usize,
    fade_progress: f32,
}

impl Sequencer {
    pub fn new(len: usize, fade_duration: Duration) -> Self {
        Self {
            len,
            fade_duration,
            state: StackState::Idle,
            current_index: 0,
            fade_progress: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn fade_progress(&self) -> f32 {
        self.fade_progress
    }

    pub fn state(&self) -> StackState {
        self.state
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.state, StackState::Transitioning { .. })
    }

    /// True once the last image is the current one.
    pub fn is_at_end(&self) -> bool {
        self.current_index + 1 >= self.len
    }

    /// Starts a cross-fade to the next image.
    ///
    /// Ignored (returns `false`) while a transition is running or when the
    /// last image is already showing.
    pub fn advance(&mut self) -> bool {
        if self.is_transitioning() {
            debug!(index = self.current_index, "click ignored: transition in flight");
            return false;
        }
        if self.is_at_end() {
            debug!(index = self.current_index, "click ignored: last image reached");
            return false;
        }
        self.state = StackState::Transitioning { started: None };
        debug!(from = self.current_index, to = self.current_index + 1, "transition started");
        true
    }

    pub fn tick(&mut self, now: Instant) -> Tick {
        let started = match self.state {
            StackState::Idle => return Tick::Idle,
            StackState::Transitioning { started: Some(started) } => started,
            StackState::Transitioning { started: None } => {
                self.state = StackState::Transitioning { started: Some(now) };
                now
            }
        };

        let elapsed = now.saturating_duration_since(started);
        let progress = if self.fade_duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.fade_duration.as_secs_f32()).min(1.0)
        };

        if progress < 1.0 {
            self.fade_progress = progress;
            return Tick::Fading(progress);
        }

        self.current_index += 1;
        self.fade_progress = 0.0;
        self.state = StackState::Idle;
        debug!(index = self.current_index, "transition committed");
        Tick::Committed(self.current_index)
    }
}
