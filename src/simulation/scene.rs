//! Build a fully-initialized scene from configuration
//!
//! Takes a `SceneConfig` (YAML-facing) and produces the runtime bundle
//! `Scene` containing:
//! - engine settings (`Engine`)
//! - physical parameters (`Parameters`)
//! - the ordered body list (`Vec<Form>`)
//! - the force set applied to bodies in contact with the water (`ForceSet`)
//!
//! The scene is inserted into Bevy as a `Resource` by the viewer, and driven
//! directly by the headless runner.

use bevy::prelude::Resource;
use log::{info, warn};

use crate::configuration::config::{FormConfig, SceneConfig};
use crate::simulation::engine::Engine;
use crate::simulation::error::SimError;
use crate::simulation::forces::ForceSet;
use crate::simulation::forms::{CubeFace, Form, Sphere, StepContext, Surface};
use crate::simulation::geometry::{Point, Vector};
use crate::simulation::integrator::check_dt;
use crate::simulation::params::Parameters;
use crate::simulation::states::Placement;

/// Runtime bundle: everything a driver loop needs to advance and draw the tank
#[derive(Resource)]
pub struct Scene {
    pub engine: Engine,
    parameters: Parameters,
    pub forms: Vec<Form>,
    forces: ForceSet, // always built from `parameters`
    pub t: f64,       // simulated time
}

impl Scene {
    /// Empty scene with water forces built from `parameters`
    pub fn new(engine: Engine, parameters: Parameters) -> Self {
        let forces = ForceSet::water(&parameters);
        Self {
            engine,
            parameters,
            forms: Vec::new(),
            forces,
            t: 0.0,
        }
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn forces(&self) -> &ForceSet {
        &self.forces
    }

    /// Replace the physical parameters and rebuild the water forces from them
    pub fn set_parameters(&mut self, parameters: Parameters) {
        self.forces = ForceSet::water(&parameters);
        self.parameters = parameters;
    }

    /// Append a form and return its index
    pub fn push(&mut self, form: impl Into<Form>) -> usize {
        self.forms.push(form.into());
        self.forms.len() - 1
    }

    pub fn build_scene(cfg: SceneConfig) -> Result<Self, SimError> {
        // Engine (runtime) from EngineConfig
        let engine = Engine {
            pacing: cfg.engine.pacing.into(),
            anim_delay: cfg.engine.anim_delay,
        };

        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            gravity: p_cfg.gravity,
            water_level: p_cfg.water_level,
            water_density: p_cfg.water_density,
            drag_coefficient: p_cfg.drag_coefficient,
            h0: p_cfg.h0,
            t_end: p_cfg.t_end,
        };
        check_dt(parameters.h0)?;

        let mut scene = Scene::new(engine, parameters);
        for form_cfg in &cfg.forms {
            let form = build_form(form_cfg)?;
            scene.push(form);
        }

        info!(
            "scene built: {} forms ({} spheres), water level {}",
            scene.forms.len(),
            scene.spheres().count(),
            scene.parameters.water_level
        );
        Ok(scene)
    }

    /// Advance every form by `dt`, in list order
    ///
    /// All or nothing: the forms are stepped on a copy that replaces the
    /// list only when every form succeeds, and `t` advances with it.
    pub fn step(&mut self, dt: f64) -> Result<(), SimError> {
        check_dt(dt)?;
        let ctx = StepContext {
            params: &self.parameters,
            forces: &self.forces,
        };
        let mut next = self.forms.clone();
        for (i, form) in next.iter_mut().enumerate() {
            if let Err(e) = form.update(dt, &ctx) {
                let e = e.for_body(i);
                warn!("step at t={:.3} rejected: {}", self.t, e);
                return Err(e);
            }
        }
        self.forms = next;
        self.t += dt;
        Ok(())
    }

    /// Run `steps` fixed steps of `h0`
    pub fn run_fixed(&mut self, steps: usize) -> Result<(), SimError> {
        let dt = self.parameters.h0;
        for _ in 0..steps {
            self.step(dt)?;
        }
        Ok(())
    }

    /// Number of `h0` steps needed to reach `t_end`
    pub fn steps_to_end(&self) -> usize {
        if self.parameters.h0 <= 0.0 {
            return 0;
        }
        (self.parameters.t_end / self.parameters.h0).round() as usize
    }

    /// Render placement of every form, index-aligned with `forms`
    pub fn placements(&self) -> Vec<Placement> {
        self.forms.iter().map(Form::render_hook).collect()
    }

    pub fn spheres(&self) -> impl Iterator<Item = &Sphere> {
        self.forms.iter().filter_map(Form::as_sphere)
    }
}

fn vec3(v: &[f64; 3]) -> Vector {
    Vector::new(v[0], v[1], v[2])
}

fn point3(p: &[f64; 3]) -> Point {
    Point::new(p[0], p[1], p[2])
}

/// Map one `FormConfig` to a runtime `Form`
pub fn build_form(cfg: &FormConfig) -> Result<Form, SimError> {
    let form = match cfg {
        FormConfig::Sphere { radius, color, density, position, velocity } => {
            let mut sphere = Sphere::new(*radius, color.to_color()?)?;
            if let Some(d) = density {
                sphere = sphere.with_density(*d)?;
            }
            let anim = sphere.anim_mut();
            anim.pos = point3(position);
            anim.vel = vec3(velocity);
            Form::Sphere(sphere)
        }
        FormConfig::CubeFace { v1, v2, origin, length, width, color } => Form::CubeFace(CubeFace::new(
            vec3(v1),
            vec3(v2),
            point3(origin),
            *length,
            *width,
            color.to_color()?,
        )?),
        FormConfig::Surface { nx, nz, control_points, color } => {
            let points = control_points.iter().map(point3).collect();
            Form::Surface(Surface::new(points, *nx, *nz, color.to_color()?)?)
        }
    };
    Ok(form)
}
