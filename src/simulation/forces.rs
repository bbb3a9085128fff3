//! Force contributors acting on a body in contact with the water
//!
//! Each term implements [`Force`] and returns a force vector (newtons, not
//! accelerations) for one [`BodySample`]. A [`ForceSet`] sums them in the
//! order they were registered.

use super::geometry::Vector;
use super::params::Parameters;
use super::states::Animation;

/// Everything a force term may look at for one body, frozen at the start of a step
#[derive(Debug, Clone, Copy)]
pub struct BodySample<'a> {
    pub anim: &'a Animation,
    pub volume: f64,
    pub mass: f64,
    pub submerged_fraction: f64, // 0 = dry, 1 = fully under
}

/// Trait for force sources
pub trait Force {
    fn force(&self, body: &BodySample) -> Vector;
}

/// Collection of force terms (buoyancy, gravity, drag, ...)
pub struct ForceSet {
    terms: Vec<Box<dyn Force + Send + Sync>>,
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add a force term
    pub fn with(mut self, term: impl Force + Send + Sync + 'static) -> Self {
        self.terms.push(Box::new(term));
        self
    }

    /// Buoyancy, weight and linear drag, in that order
    pub fn water(params: &Parameters) -> Self {
        Self::new()
            .with(Buoyancy {
                water_density: params.water_density,
                gravity: params.gravity,
            })
            .with(Gravity { gravity: params.gravity })
            .with(LinearDrag { c_d: params.drag_coefficient })
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Sum of all contributions for `body`
    pub fn total(&self, body: &BodySample) -> Vector {
        self.terms
            .iter()
            .fold(Vector::zeros(), |acc, term| acc + term.force(body))
    }
}

/// Weight `m * (0, -g, 0)`
pub struct Gravity {
    pub gravity: f64,
}

impl Force for Gravity {
    fn force(&self, body: &BodySample) -> Vector {
        body.mass * Vector::new(0.0, -self.gravity, 0.0)
    }
}

/// Archimedes' push: `rho_w * V_submerged * g`, straight up
pub struct Buoyancy {
    pub water_density: f64,
    pub gravity: f64,
}

impl Force for Buoyancy {
    fn force(&self, body: &BodySample) -> Vector {
        let submerged_volume = body.volume * body.submerged_fraction;
        Vector::new(0.0, self.water_density * submerged_volume * self.gravity, 0.0)
    }
}

/// Linear drag `-c_d * v`
pub struct LinearDrag {
    pub c_d: f64,
}

impl Force for LinearDrag {
    fn force(&self, body: &BodySample) -> Vector {
        -self.c_d * body.anim.vel
    }
}
