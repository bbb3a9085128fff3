//! High-level runtime engine settings
//!
//! Decides how much simulated time a frame hands to the core:
//! - `Fixed`: every frame advances by `h0`
//! - `Realtime`: wall time is accumulated and flushed once it exceeds
//!   `anim_delay`, so updates fire roughly every `anim_delay` seconds

use crate::configuration::config::PacingConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pacing {
    Fixed,
    Realtime,
}

impl From<PacingConfig> for Pacing {
    fn from(cfg: PacingConfig) -> Self {
        match cfg {
            PacingConfig::Fixed => Pacing::Fixed,
            PacingConfig::Realtime => Pacing::Realtime,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Engine {
    pub pacing: Pacing, // fixed or realtime
    pub anim_delay: f64, // seconds between realtime updates
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            pacing: Pacing::Fixed,
            anim_delay: 0.01,
        }
    }
}

impl Engine {
    pub fn pacer(&self) -> FramePacer {
        FramePacer::new(self.anim_delay)
    }
}

/// Accumulates elapsed wall time and releases it in chunks larger than `anim_delay`
#[derive(Debug, Clone, Default)]
pub struct FramePacer {
    anim_delay: f64,
    pending: f64,
}

impl FramePacer {
    pub fn new(anim_delay: f64) -> Self {
        Self {
            anim_delay: anim_delay.max(0.0),
            pending: 0.0,
        }
    }

    /// Feed `elapsed` seconds; returns the `dt` to simulate when an update is due
    ///
    /// Negative or non-finite input is ignored, the pacer never hands out a
    /// negative `dt`.
    pub fn advance(&mut self, elapsed: f64) -> Option<f64> {
        if elapsed.is_finite() && elapsed > 0.0 {
            self.pending += elapsed;
        }
        if self.pending > self.anim_delay {
            let dt = self.pending;
            self.pending = 0.0;
            Some(dt)
        } else {
            None
        }
    }

    pub fn pending(&self) -> f64 {
        self.pending
    }
}
