//! Physical and numerical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - gravity magnitude (acting along -y),
//! - the water plane: height, density, linear drag coefficient,
//! - fixed step size and end time for headless runs

use super::geometry::Vector;

/// Density of water in kg/m^3, also the default sphere density
pub const WATER_DENSITY: f64 = 1000.0;

/// Standard gravity in m/s^2
pub const STANDARD_GRAVITY: f64 = 9.81;

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub gravity: f64, // magnitude of g
    pub water_level: f64, // height of the water plane
    pub water_density: f64, // rho_w
    pub drag_coefficient: f64, // c_d of the linear drag
    pub h0: f64, // fixed step size
    pub t_end: f64, // end time
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            gravity: STANDARD_GRAVITY,
            water_level: 0.5 * 0.9,
            water_density: WATER_DENSITY,
            drag_coefficient: 0.5,
            h0: 0.01,
            t_end: 7.0,
        }
    }
}

impl Parameters {
    /// Gravitational acceleration vector `(0, -g, 0)`
    pub fn g(&self) -> Vector {
        Vector::new(0.0, -self.gravity, 0.0)
    }
}
