//! Vector / point algebra for the simulation
//!
//! `Vector` is a displacement, rate or force; `Point` is an absolute position.
//! Both are plain `nalgebra` types, so `+`, scalar `*`, `norm()` and
//! `Point - Point -> Vector` come for free. The two traits below add the
//! operations the physics code speaks in.

use nalgebra::{Point3, Vector3};

use super::error::SimError;

pub type Vector = Vector3<f64>;
pub type Point = Point3<f64>;

/// Below this length a direction is treated as zero and refused
const MIN_DIRECTION_NORM: f64 = 1.0e-12;

/// Extra operations on [`Vector`]
pub trait VectorExt {
    /// Treat `self` as a rate and return the quantity accumulated over `dt`
    fn integral(&self, dt: f64) -> Vector;

    /// Unit vector in the same direction, refusing zero-length input
    fn unit(&self) -> Result<Vector, SimError>;

    /// `true` when every component is finite
    fn is_finite(&self) -> bool;
}

impl VectorExt for Vector {
    fn integral(&self, dt: f64) -> Vector {
        *self * dt
    }

    fn unit(&self) -> Result<Vector, SimError> {
        self.try_normalize(MIN_DIRECTION_NORM).ok_or(SimError::DegenerateDirection)
    }

    fn is_finite(&self) -> bool {
        self.iter().all(|c| c.is_finite())
    }
}

/// Extra operations on [`Point`]
pub trait PointExt {
    /// Move the point in place by `v`
    fn translate(&mut self, v: &Vector);

    fn is_finite(&self) -> bool;
}

impl PointExt for Point {
    fn translate(&mut self, v: &Vector) {
        *self += *v;
    }

    fn is_finite(&self) -> bool {
        self.coords.iter().all(|c| c.is_finite())
    }
}
