//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`WorldConfig`]      – optional containment rectangle
//! - [`ParametersConfig`] – step size, run length and contact tuning
//! - [`ForceConfig`]      – global force generators, applied in listed order
//! - [`BodyConfig`]       – initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! world:
//!   min_bounds: [0.0, 0.0]
//!   max_bounds: [800.0, 600.0]
//!
//! parameters:
//!   t_end: 5.0              # total simulated time
//!   h0: 0.016               # fixed step size
//!   slop: 0.01              # optional, penetration left uncorrected
//!   percent: 0.8            # optional, fraction of penetration corrected
//!   report_every: 60        # optional, steps between reports
//!
//! forces:
//!   - gravity: { g: [0.0, 600.0] }
//!   - linear_drag: { coefficient: 0.002 }
//!
//! bodies:
//!   - name: floor
//!     x: [400.0, 590.0]
//!     m: .inf               # infinite mass -> immovable
//!     shape: { box: { half_width: 400.0, half_height: 10.0 } }
//!     restitution: 0.5
//!   - name: ball
//!     x: [400.0, 100.0]
//!     v: [50.0, 0.0]
//!     m: 1.0
//!     shape: { circle: { radius: 16.0 } }
//! ```
//!
//! The scenario builder validates this and maps it into a runtime `World`.

use serde::Deserialize;

/// Optional world bounds
#[derive(Deserialize, Debug, Clone, Default)]
pub struct WorldConfig {
    #[serde(default)]
    pub min_bounds: Option<[f64; 2]>,
    #[serde(default)]
    pub max_bounds: Option<[f64; 2]>,
}

/// Step size, run length and contact tuning
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub t_end: f64, // time end
    pub h0: f64, // time step size
    #[serde(default)]
    pub slop: Option<f64>, // allowed overlap before correction kicks in
    #[serde(default)]
    pub percent: Option<f64>, // fraction of overlap removed per step
    #[serde(default)]
    pub report_every: u64, // 0 - only report the final state
}

/// A global force generator
/// `- gravity: { g: [0, 9.81] }` or `- linear_drag: { coefficient: 0.1 }`
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "snake_case")]
pub enum ForceConfig {
    Gravity { g: [f64; 2] },
    LinearDrag { coefficient: f64 },
}

/// Collision footprint of a body
#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum ShapeConfig {
    Box { half_width: f64, half_height: f64 },
    Circle { radius: f64 },
}

fn default_restitution() -> f64 {
    1.0
}

fn default_collidable() -> bool {
    true
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    #[serde(default)]
    pub name: Option<String>, // used in reports, defaults to "body<i>"
    pub x: [f64; 2], // initial position
    #[serde(default)]
    pub v: [f64; 2], // initial velocity
    pub m: f64, // mass; <= 0 or .inf makes the body immovable
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub shape: ShapeConfig, // `{ box: {...} }` or `{ circle: {...} }`
    #[serde(default = "default_restitution")]
    pub restitution: f64,
    #[serde(default)]
    pub damping: f64,
    #[serde(default = "default_collidable")]
    pub collidable: bool,
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub world: WorldConfig, // containment rectangle
    pub parameters: ParametersConfig, // step size, run length and contact tuning
    #[serde(default, with = "serde_yaml::with::singleton_map_recursive")]
    pub forces: Vec<ForceConfig>, // global forces, in application order
    #[serde(default)]
    pub bodies: Vec<BodyConfig>, // initial bodies, in world order
}

impl ScenarioConfig {
    /// Parse a scenario from YAML text
    pub fn from_yaml_str(s: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(s)
    }

    /// Parse a scenario from any reader (file, stdin, ...)
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_reader(reader)
    }
}
