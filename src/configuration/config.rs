//! Configuration types for loading scenes from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scene. A scene consists of:
//!
//! - [`EngineConfig`]     – frame pacing for the driver loop
//! - [`ParametersConfig`] – physical constants of the water tank and step sizes
//! - [`CameraConfig`]     – where the viewer starts looking from
//! - [`FormConfig`]       – one entry per sphere, cube face or surface
//! - [`SceneConfig`]      – top-level wrapper used to load a scene from YAML
//!
//! # YAML format
//! Every section except `forms` may be omitted:
//!
//! ```yaml
//! engine:
//!   pacing: realtime        # or "fixed" (advance by h0 every frame)
//!   anim_delay: 0.01        # seconds of wall time between realtime updates
//!
//! parameters:
//!   gravity: 9.81
//!   water_level: 0.45
//!   water_density: 1000.0
//!   drag_coefficient: 0.5
//!   h0: 0.01                # fixed step size
//!   t_end: 7.0              # headless run length
//!
//! forms:
//!   - kind: cube_face
//!     v1: [1.0, 0.0, 0.0]
//!     v2: [0.0, 0.0, 1.0]
//!     origin: [-0.5, -0.5, -0.5]
//!     length: 1.0
//!     width: 1.0
//!     color: white
//!   - kind: sphere
//!     radius: 0.25
//!     color: [1.0, 1.0, 0.0, 1.0]
//!     position: [-0.5, 6.0, -0.5]
//! ```
//!
//! The scene builder maps this configuration into runtime forms and reports
//! invalid values (non-positive radius, zero directions, bad colors) there.

use serde::Deserialize;

use crate::simulation::error::SimError;
use crate::simulation::forms::Color;
use crate::simulation::params::{STANDARD_GRAVITY, WATER_DENSITY};

/// How the driver picks `dt` each frame
/// pacing: "fixed"` or `pacing: "realtime"
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub enum PacingConfig {
    #[serde(rename = "fixed")] // advance by h0 per frame, deterministic
    #[default]
    Fixed,

    #[serde(rename = "realtime")] // advance by accumulated wall time
    Realtime,
}

#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    #[serde(default)]
    pub pacing: PacingConfig,
    #[serde(default = "default_anim_delay")]
    pub anim_delay: f64, // seconds
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pacing: PacingConfig::default(),
            anim_delay: default_anim_delay(),
        }
    }
}

/// Physical constants and step sizes
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParametersConfig {
    pub gravity: f64,
    pub water_level: f64,
    pub water_density: f64,
    pub drag_coefficient: f64,
    pub h0: f64,
    pub t_end: f64,
}

impl Default for ParametersConfig {
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

/// Initial viewer camera
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f64; 3],
    pub rho: f64, // degrees around the vertical axis
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 5.0],
            rho: -45.0,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum NamedColor {
    Red,
    Blue,
    Black,
    LightBlue,
    Green,
    Yellow,
    White,
    Orange,
    WaterTransparent,
    DarkBlueTransparent,
}

/// Either a palette name or an explicit `[r, g, b, a]`
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ColorConfig {
    Named(NamedColor),
    Rgba([f32; 4]),
}

impl Default for ColorConfig {
    fn default() -> Self {
        ColorConfig::Named(NamedColor::White)
    }
}

impl ColorConfig {
    pub fn to_color(&self) -> Result<Color, SimError> {
        match self {
            ColorConfig::Named(name) => Ok(match name {
                NamedColor::Red => Color::RED,
                NamedColor::Blue => Color::BLUE,
                NamedColor::Black => Color::BLACK,
                NamedColor::LightBlue => Color::LIGHT_BLUE,
                NamedColor::Green => Color::GREEN,
                NamedColor::Yellow => Color::YELLOW,
                NamedColor::White => Color::WHITE,
                NamedColor::Orange => Color::ORANGE,
                NamedColor::WaterTransparent => Color::WATER_TRANSPARENT,
                NamedColor::DarkBlueTransparent => Color::DARK_BLUE_TRANSPARENT,
            }),
            ColorConfig::Rgba([r, g, b, a]) => Color::rgba(*r, *g, *b, *a),
        }
    }
}

/// One entry of the scene's body list
#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormConfig {
    Sphere {
        radius: f64,
        #[serde(default)]
        color: ColorConfig,
        #[serde(default)]
        density: Option<f64>, // defaults to water
        #[serde(default)]
        position: [f64; 3],
        #[serde(default)]
        velocity: [f64; 3],
    },
    CubeFace {
        v1: [f64; 3],
        v2: [f64; 3],
        origin: [f64; 3],
        length: f64,
        width: f64,
        #[serde(default)]
        color: ColorConfig,
    },
    Surface {
        nx: usize,
        nz: usize,
        control_points: Vec<[f64; 3]>, // row-major, nz rows of nx points
        #[serde(default)]
        color: ColorConfig,
    },
}

/// Top-level scene configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct SceneConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    pub forms: Vec<FormConfig>,
}

fn default_anim_delay() -> f64 {
    0.01
}
