//! Frame loop driver
//!
//! The host calls `run_frame` from its display-refresh callback. Every
//! scheduled callback carries the token handed out by `start`; once the loop
//! is stopped (or restarted) older tokens are rejected, so a callback that
//! was already queued can never tick the game.

use crate::consts::MAX_FRAME_DT;

/// Something driven once per display refresh
pub trait Frame {
    fn update(&mut self, dt: f32);
    fn render(&mut self);
}

/// Measures wall-clock dt between frames and clamps it
#[derive(Debug, Clone)]
pub struct GameLoop {
    running: bool,
    /// Host timestamp of the previous frame (ms)
    last_time: f64,
    /// Bumped on every start/stop to invalidate queued callbacks
    token: u64,
    max_dt: f32,
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new(MAX_FRAME_DT)
    }
}

impl GameLoop {
    pub fn new(max_dt: f32) -> Self {
        Self {
            running: false,
            last_time: 0.0,
            token: 0,
            max_dt,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Token the next scheduled callback must present
    pub fn token(&self) -> u64 {
        self.token
    }

    /// Begin running; returns false (and changes nothing) if already running
    pub fn start(&mut self, now_ms: f64) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        self.last_time = now_ms;
        self.token = self.token.wrapping_add(1);
        log::debug!("Loop started");
        true
    }

    /// Stop running; any callback already queued becomes a no-op
    pub fn stop(&mut self) {
        if self.running {
            log::debug!("Loop stopped");
        }
        self.running = false;
        self.token = self.token.wrapping_add(1);
    }

    /// Clamped seconds since the previous frame, or None for a stale callback
    pub fn frame(&mut self, token: u64, now_ms: f64) -> Option<f32> {
        if !self.running || token != self.token {
            return None;
        }
        let elapsed = ((now_ms - self.last_time) / 1000.0) as f32;
        self.last_time = now_ms;
        Some(elapsed.clamp(0.0, self.max_dt))
    }

    /// Update then render `target` if the callback is current
    pub fn run_frame<F: Frame + ?Sized>(&mut self, token: u64, now_ms: f64, target: &mut F) -> bool {
        match self.frame(token, now_ms) {
            Some(dt) => {
                target.update(dt);
                target.render();
                true
            }
            None => false,
        }
    }
}
