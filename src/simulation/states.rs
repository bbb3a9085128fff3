//! Per-body kinematic state
//!
//! Every form owns exactly one [`Animation`]: where it is, how fast it moves,
//! and two orientation angles in degrees (`phi`, `theta`). Angles are not
//! wrapped, they accumulate freely.

use super::geometry::{Point, Vector};

#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub pos: Point, // position
    pub vel: Vector, // linear velocity
    pub phi: f64, // orientation, degrees
    pub theta: f64, // orientation, degrees
}

impl Default for Animation {
    fn default() -> Self {
        Self {
            pos: Point::origin(),
            vel: Vector::zeros(),
            phi: 0.0,
            theta: 0.0,
        }
    }
}

impl Animation {
    pub fn at(pos: Point) -> Self {
        Self { pos, ..Default::default() }
    }

    pub fn with_velocity(mut self, vel: Vector) -> Self {
        self.vel = vel;
        self
    }

    /// Orientation angles as `(phi, theta)`
    pub fn angles(&self) -> (f64, f64) {
        (self.phi, self.theta)
    }
}

/// What the rendering layer needs to place one body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Point,
    pub angles: (f64, f64),
}

impl From<&Animation> for Placement {
    fn from(anim: &Animation) -> Self {
        Self {
            position: anim.pos,
            angles: anim.angles(),
        }
    }
}
