//! Fixed-step integrator for a sphere falling into still water
//!
//! The regime is derived from geometry at the start of every step, nothing is
//! stored between steps:
//! - `Airborne`: lowest point strictly above the water plane, gravity only
//! - `Submerging`: in contact, buoyancy + weight + linear drag from the [`ForceSet`]
//! - `Submerged`: the sphere's whole height is under the plane; after the
//!   step the velocity is pinned to zero (terminal rest)
//!
//! Both paths are semi-implicit Euler: velocity first, then position with the
//! new velocity.
//!
//! Sign convention while in contact: `v' = v - dt * a`, with `a` the net
//! force over mass. The net force already carries gravity's direction, so
//! subtracting it makes the water brake a sinking body (weight is cancelled
//! and the buoyant push slows the descent). With `+` a sphere as dense as
//! water keeps accelerating downward until it is fully under.

use log::trace;

use super::error::SimError;
use super::forces::{BodySample, ForceSet};
use super::geometry::{PointExt, Vector, VectorExt};
use super::params::Parameters;
use super::states::Animation;

/// Which branch of the force model a step went through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    Airborne,
    Submerging,
    Submerged,
}

/// Static description of the buoyant body being integrated
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereBody {
    pub radius: f64,
    pub density: f64,
}

impl SphereBody {
    pub fn volume(&self) -> f64 {
        sphere_volume(self.radius)
    }

    pub fn mass(&self) -> f64 {
        self.density * self.volume()
    }
}

/// `4/3 * pi * r^3`
pub fn sphere_volume(radius: f64) -> f64 {
    4.0 / 3.0 * std::f64::consts::PI * radius.powi(3)
}

/// Share of the sphere's vertical extent below the water plane, clamped to `[0, 1]`
///
/// Linear in depth, so it is only a proxy for the spherical cap volume, but it
/// is monotonic and saturates at exactly 1 once the top goes under.
pub fn submerged_fraction(center_y: f64, radius: f64, water_level: f64) -> f64 {
    ((water_level - (center_y - radius)) / (2.0 * radius)).clamp(0.0, 1.0)
}

/// Regime the sphere is in at `anim`, without stepping
pub fn regime_at(anim: &Animation, radius: f64, water_level: f64) -> Regime {
    if anim.pos.y - radius > water_level {
        Regime::Airborne
    } else if submerged_fraction(anim.pos.y, radius, water_level) == 1.0 {
        Regime::Submerged
    } else {
        Regime::Submerging
    }
}

/// Reject negative (and NaN) step sizes
pub fn check_dt(dt: f64) -> Result<(), SimError> {
    if dt >= 0.0 {
        Ok(())
    } else {
        Err(SimError::NegativeTimeStep(dt))
    }
}

/// Advance `anim` by `dt` with a velocity update of `dv`
///
/// Works on a copy and only commits when the result is finite.
fn commit_semi_implicit(anim: &mut Animation, dv: Vector, dt: f64, rest: bool) -> Result<(), SimError> {
    let mut next = anim.clone();
    next.vel += dv;
    let step = next.vel.integral(dt);
    next.pos.translate(&step);

    if !next.vel.is_finite() {
        return Err(SimError::NumericAnomaly { quantity: "velocity", body: 0 });
    }
    if !next.pos.is_finite() {
        return Err(SimError::NumericAnomaly { quantity: "position", body: 0 });
    }

    if rest {
        next.vel = Vector::zeros();
    }
    *anim = next;
    Ok(())
}

/// Advance one sphere by `dt`
///
/// Returns the regime evaluated at the start of the step. On error `anim` is
/// left unchanged.
pub fn buoyant_step(
    anim: &mut Animation,
    body: &SphereBody,
    forces: &ForceSet,
    params: &Parameters,
    dt: f64,
) -> Result<Regime, SimError> {
    check_dt(dt)?;
    if !(body.radius > 0.0) {
        return Err(SimError::NonPositiveRadius(body.radius));
    }
    if !(body.density > 0.0) {
        return Err(SimError::NonPositiveDensity(body.density));
    }

    let regime = regime_at(anim, body.radius, params.water_level);
    if dt == 0.0 {
        return Ok(regime);
    }

    match regime {
        Regime::Airborne => {
            // Free fall: v' = v + dt g, x' = x + dt v'
            let dv = params.g().integral(dt);
            commit_semi_implicit(anim, dv, dt, false)?;
        }
        Regime::Submerging | Regime::Submerged => {
            let mass = body.mass();
            let sample = BodySample {
                anim: &*anim,
                volume: body.volume(),
                mass,
                submerged_fraction: submerged_fraction(anim.pos.y, body.radius, params.water_level),
            };
            let acceleration = forces.total(&sample) / mass;
            trace!(
                "contact step: fraction {:.4}, acceleration {:?}",
                sample.submerged_fraction,
                acceleration
            );

            // v' = v - dt a, see the module docs for the sign
            let dv = -acceleration.integral(dt);
            commit_semi_implicit(anim, dv, dt, regime == Regime::Submerged)?;
        }
    }

    Ok(regime)
}
