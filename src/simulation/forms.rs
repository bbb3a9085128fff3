//! Renderable, animated shapes
//!
//! A [`Form`] is one of a closed set of shapes. Each owns a [`Color`] and an
//! [`Animation`] and answers two calls:
//! - `update(dt, ctx)` advances the simulation, never draws
//! - `render_hook()` reads the placement, never mutates
//!
//! Only [`Sphere`] carries physics. [`CubeFace`] and [`Surface`] are static
//! scenery that share the same placement contract.

use log::debug;

use super::error::SimError;
use super::forces::ForceSet;
use super::geometry::{Point, Vector, VectorExt};
use super::integrator::{buoyant_step, check_dt, regime_at, sphere_volume, Regime, SphereBody};
use super::params::{Parameters, WATER_DENSITY};
use super::states::{Animation, Placement};

/// RGBA color, every channel in `[0, 1]`; `a` is opacity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl Color {
    pub const RED: Color = Color::opaque(1.0, 0.0, 0.0);
    pub const BLUE: Color = Color::opaque(0.0, 0.0, 1.0);
    pub const BLACK: Color = Color::opaque(0.0, 0.0, 0.0);
    pub const LIGHT_BLUE: Color = Color { r: 0.0, g: 1.0, b: 0.7, a: 0.5 };
    pub const GREEN: Color = Color::opaque(0.0, 1.0, 0.0);
    pub const YELLOW: Color = Color::opaque(1.0, 1.0, 0.0);
    pub const WHITE: Color = Color::opaque(1.0, 1.0, 1.0);
    pub const ORANGE: Color = Color::opaque(1.0, 0.65, 0.0);
    pub const WATER_TRANSPARENT: Color = Color { r: 0.0, g: 1.0, b: 1.0, a: 0.5 };
    pub const DARK_BLUE_TRANSPARENT: Color = Color { r: 0.0, g: 0.7, b: 1.0, a: 0.5 };

    pub const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Checked constructor, rejects channels outside `[0, 1]` (and NaN)
    pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> Result<Self, SimError> {
        for c in [r, g, b, a] {
            if !(0.0..=1.0).contains(&c) {
                return Err(SimError::InvalidColor(c));
            }
        }
        Ok(Self { r, g, b, a })
    }

    pub fn is_transparent(&self) -> bool {
        self.a < 1.0
    }
}

/// Everything from the driver that an update may consult
#[derive(Clone, Copy)]
pub struct StepContext<'a> {
    pub params: &'a Parameters,
    pub forces: &'a ForceSet,
}

// =========================================================================================
// Sphere
// =========================================================================================

/// A buoyant sphere; the center lives in its animation
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    radius: f64,
    density: f64,
    color: Color,
    anim: Animation,
}

impl Sphere {
    /// Sphere at the origin, at rest, with water density
    pub fn new(radius: f64, color: Color) -> Result<Self, SimError> {
        if !(radius > 0.0) || !radius.is_finite() {
            return Err(SimError::NonPositiveRadius(radius));
        }
        Ok(Self {
            radius,
            density: WATER_DENSITY,
            color,
            anim: Animation::default(),
        })
    }

    pub fn with_density(mut self, density: f64) -> Result<Self, SimError> {
        if !(density > 0.0) || !density.is_finite() {
            return Err(SimError::NonPositiveDensity(density));
        }
        self.density = density;
        Ok(self)
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    pub fn volume(&self) -> f64 {
        sphere_volume(self.radius)
    }

    pub fn mass(&self) -> f64 {
        self.density * self.volume()
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn anim(&self) -> &Animation {
        &self.anim
    }

    /// Owner access for placing the sphere or giving it a launch velocity
    pub fn anim_mut(&mut self) -> &mut Animation {
        &mut self.anim
    }

    pub fn body(&self) -> SphereBody {
        SphereBody {
            radius: self.radius,
            density: self.density,
        }
    }

    /// Run one physics step; returns the regime the step was taken in
    pub fn update(&mut self, dt: f64, ctx: &StepContext) -> Result<Regime, SimError> {
        let body = self.body();
        let regime = buoyant_step(&mut self.anim, &body, ctx.forces, ctx.params, dt)?;

        let next = regime_at(&self.anim, self.radius, ctx.params.water_level);
        if next != regime {
            debug!(
                "sphere r={} went {:?} -> {:?} at y={:.4}, v={:?}",
                self.radius, regime, next, self.anim.pos.y, self.anim.vel
            );
        }
        Ok(regime)
    }
}

// =========================================================================================
// Cube face
// =========================================================================================

/// Flat rectangular panel spanned by two directions from its origin
#[derive(Debug, Clone, PartialEq)]
pub struct CubeFace {
    dir1: Vector,
    dir2: Vector,
    length: f64,
    width: f64,
    color: Color,
    anim: Animation,
}

impl CubeFace {
    /// `v1` and `v2` are normalized here; zero-length directions are refused
    pub fn new(v1: Vector, v2: Vector, origin: Point, length: f64, width: f64, color: Color) -> Result<Self, SimError> {
        Ok(Self {
            dir1: v1.unit()?,
            dir2: v2.unit()?,
            length,
            width,
            color,
            anim: Animation::at(origin),
        })
    }

    pub fn directions(&self) -> (Vector, Vector) {
        (self.dir1, self.dir2)
    }

    pub fn size(&self) -> (f64, f64) {
        (self.length, self.width)
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn anim(&self) -> &Animation {
        &self.anim
    }

    /// Quad vertices relative to the face origin, in winding order
    pub fn local_corners(&self) -> [Point; 4] {
        let p1 = Point::origin();
        let p2 = p1 + self.length * self.dir1;
        let p3 = p2 + self.width * self.dir2;
        let p4 = p1 + self.width * self.dir2;
        [p1, p2, p3, p4]
    }

    /// Quad vertices in world space
    pub fn corners(&self) -> [Point; 4] {
        self.local_corners().map(|p| p + self.anim.pos.coords)
    }

    /// Cosmetic: turn by one degree per call
    pub fn update(&mut self, _dt: f64) {
        self.anim.phi += 1.0;
    }
}

// =========================================================================================
// NURBS surface
// =========================================================================================

/// Static NURBS patch described by a `nx * nz` grid of control points
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    control_points: Vec<Point>, // row-major, `nz` rows of `nx` points
    nx: usize,
    nz: usize,
    color: Color,
    anim: Animation,
}

impl Surface {
    pub fn new(control_points: Vec<Point>, nx: usize, nz: usize, color: Color) -> Result<Self, SimError> {
        let expected = nx * nz;
        if expected == 0 || control_points.len() != expected {
            return Err(SimError::ControlPointCount {
                expected,
                got: control_points.len(),
            });
        }
        Ok(Self {
            control_points,
            nx,
            nz,
            color,
            anim: Animation::default(),
        })
    }

    pub fn control_points(&self) -> &[Point] {
        &self.control_points
    }

    pub fn grid(&self) -> (usize, usize) {
        (self.nx, self.nz)
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn anim(&self) -> &Animation {
        &self.anim
    }

    pub fn knots_x(&self) -> Vec<f64> {
        clamped_knots(self.nx)
    }

    pub fn knots_z(&self) -> Vec<f64> {
        clamped_knots(self.nz)
    }
}

/// `n` zeros followed by `n` ones: a single Bezier span of order `n`
fn clamped_knots(n: usize) -> Vec<f64> {
    (0..2 * n).map(|k| (k / n) as f64).collect()
}

// =========================================================================================
// Form
// =========================================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Form {
    Sphere(Sphere),
    CubeFace(CubeFace),
    Surface(Surface),
}

impl Form {
    /// Advance this form by `dt`; negative `dt` is refused for every variant
    pub fn update(&mut self, dt: f64, ctx: &StepContext) -> Result<(), SimError> {
        check_dt(dt)?;
        match self {
            Form::Sphere(s) => s.update(dt, ctx).map(|_| ()),
            Form::CubeFace(f) => {
                f.update(dt);
                Ok(())
            }
            Form::Surface(_) => Ok(()),
        }
    }

    /// Position and orientation for the renderer
    pub fn render_hook(&self) -> Placement {
        Placement::from(self.anim())
    }

    pub fn anim(&self) -> &Animation {
        match self {
            Form::Sphere(s) => s.anim(),
            Form::CubeFace(f) => f.anim(),
            Form::Surface(s) => s.anim(),
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Form::Sphere(s) => s.color(),
            Form::CubeFace(f) => f.color(),
            Form::Surface(s) => s.color(),
        }
    }

    pub fn as_sphere(&self) -> Option<&Sphere> {
        match self {
            Form::Sphere(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sphere_mut(&mut self) -> Option<&mut Sphere> {
        match self {
            Form::Sphere(s) => Some(s),
            _ => None,
        }
    }
}

impl From<Sphere> for Form {
    fn from(s: Sphere) -> Self {
        Form::Sphere(s)
    }
}

impl From<CubeFace> for Form {
    fn from(f: CubeFace) -> Self {
        Form::CubeFace(f)
    }
}

impl From<Surface> for Form {
    fn from(s: Surface) -> Self {
        Form::Surface(s)
    }
}
