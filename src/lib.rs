pub mod simulation;
pub mod configuration;
pub mod visualization;

pub use simulation::geometry::{Point, PointExt, Vector, VectorExt};
pub use simulation::error::SimError;
pub use simulation::states::{Animation, Placement};
pub use simulation::params::{Parameters, STANDARD_GRAVITY, WATER_DENSITY};
pub use simulation::engine::{Engine, FramePacer, Pacing};
pub use simulation::forces::{BodySample, Buoyancy, Force, ForceSet, Gravity, LinearDrag};
pub use simulation::integrator::{buoyant_step, regime_at, sphere_volume, submerged_fraction, Regime, SphereBody};
pub use simulation::forms::{Color, CubeFace, Form, Sphere, StepContext, Surface};
pub use simulation::scene::Scene;

pub use configuration::config::{CameraConfig, ColorConfig, EngineConfig, FormConfig, PacingConfig, ParametersConfig, SceneConfig};

pub use visualization::viewer::run_viewer;
