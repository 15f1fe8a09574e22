//! Build ready-to-run simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing), validates it, and produces a
//! `Scenario` containing:
//! - run parameters (`Parameters`)
//! - the `World` with its bounds, contact settings, global forces and bodies
//! - one `SceneObject` per body, carrying the configured name

use log::debug;
use thiserror::Error;

use crate::configuration::config::{BodyConfig, ForceConfig, ScenarioConfig, ShapeConfig};
use crate::simulation::collision::ContactSettings;
use crate::simulation::forces::{Gravity, LinearDrag};
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec2, SceneObject, Shape};
use crate::simulation::world::World;

/// Reasons a scenario file is rejected
#[derive(Debug, Error, PartialEq)]
pub enum ScenarioError {
    #[error("step size h0 must be positive and finite, got {0}")]
    InvalidStep(f64),
    #[error("t_end must be non-negative and finite, got {0}")]
    InvalidEndTime(f64),
    #[error("slop must be non-negative and finite, got {0}")]
    InvalidSlop(f64),
    #[error("percent must lie in [0, 1], got {0}")]
    InvalidPercent(f64),
    #[error("world bounds must be finite, got {0:?}")]
    NonFiniteBounds([f64; 2]),
    #[error("min_bounds {min:?} exceed max_bounds {max:?}")]
    InvertedBounds { min: [f64; 2], max: [f64; 2] },
    #[error("body `{name}` has an invalid shape dimension {value}")]
    InvalidShape { name: String, value: f64 },
}

/// A fully-initialized scenario: the world plus what the driver needs to run it
pub struct Scenario {
    pub parameters: Parameters,
    pub world: World,
    pub objects: Vec<SceneObject>,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, ScenarioError> {
        // Parameters (runtime) from ParametersConfig
        let p_cfg = &cfg.parameters;
        if !(p_cfg.h0 > 0.0 && p_cfg.h0.is_finite()) {
            return Err(ScenarioError::InvalidStep(p_cfg.h0));
        }
        if !(p_cfg.t_end >= 0.0 && p_cfg.t_end.is_finite()) {
            return Err(ScenarioError::InvalidEndTime(p_cfg.t_end));
        }
        let parameters = Parameters {
            t_end: p_cfg.t_end,
            h0: p_cfg.h0,
            report_every: p_cfg.report_every,
        };

        // Contact tuning, defaults unless overridden
        let mut contact_settings = ContactSettings::default();
        if let Some(slop) = p_cfg.slop {
            if !(slop >= 0.0 && slop.is_finite()) {
                return Err(ScenarioError::InvalidSlop(slop));
            }
            contact_settings.slop = slop;
        }
        if let Some(percent) = p_cfg.percent {
            if !(0.0..=1.0).contains(&percent) {
                return Err(ScenarioError::InvalidPercent(percent));
            }
            contact_settings.percent = percent;
        }

        let mut world = World::new();
        world.contact_settings = contact_settings;

        // Bounds
        for bound in [cfg.world.min_bounds, cfg.world.max_bounds].into_iter().flatten() {
            if !bound.iter().all(|c| c.is_finite()) {
                return Err(ScenarioError::NonFiniteBounds(bound));
            }
        }
        if let (Some(min), Some(max)) = (cfg.world.min_bounds, cfg.world.max_bounds) {
            if min[0] > max[0] || min[1] > max[1] {
                return Err(ScenarioError::InvertedBounds { min, max });
            }
        }
        world.min_bounds = cfg.world.min_bounds.map(NVec2::from);
        world.max_bounds = cfg.world.max_bounds.map(NVec2::from);

        // Forces, in listed order
        for f in &cfg.forces {
            match *f {
                ForceConfig::Gravity { g } => world.add_global_force(Gravity::new(g.into())),
                ForceConfig::LinearDrag { coefficient } => world.add_global_force(LinearDrag::new(coefficient)),
            }
        }

        // Bodies: map `BodyConfig` -> runtime `Body`, keeping file order
        let mut objects = Vec::with_capacity(cfg.bodies.len());
        for (i, bc) in cfg.bodies.iter().enumerate() {
            let name = bc.name.clone().unwrap_or_else(|| format!("body{i}"));
            let body = build_body(&name, bc)?;
            let handle = world.add_body(body);
            objects.push(SceneObject::new(name, handle));
        }

        debug!(
            "scenario: {} bodies, {} forces, h0 = {}, t_end = {}",
            world.len(),
            world.global_forces().len(),
            parameters.h0,
            parameters.t_end
        );

        Ok(Self {
            parameters,
            world,
            objects,
        })
    }

    /// Name of the object drawn for body index `i` in world order
    pub fn name_of(&self, i: usize) -> Option<&str> {
        let handle = self.world.handles().get(i)?;
        self.objects
            .iter()
            .find(|o| o.body == *handle)
            .map(|o| o.name.as_str())
    }
}

fn build_body(name: &str, bc: &BodyConfig) -> Result<Body, ScenarioError> {
    let shape = match bc.shape {
        ShapeConfig::Box { half_width, half_height } => {
            check_dimension(name, half_width)?;
            check_dimension(name, half_height)?;
            Shape::Box { half_width, half_height }
        }
        ShapeConfig::Circle { radius } => {
            check_dimension(name, radius)?;
            Shape::Circle { radius }
        }
    };

    Ok(Body::new(bc.x.into(), bc.m, shape)
        .with_velocity(bc.v.into())
        .with_restitution(bc.restitution)
        .with_damping(bc.damping)
        .with_collidable(bc.collidable))
}

fn check_dimension(name: &str, value: f64) -> Result<(), ScenarioError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ScenarioError::InvalidShape {
            name: name.to_string(),
            value,
        })
    }
}
