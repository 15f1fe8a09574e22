pub mod simulation;
pub mod configuration;
pub mod headless;
pub mod benchmark;

pub use simulation::states::{Body, Shape, SceneObject, NVec2};
pub use simulation::forces::{ForceGenerator, ForceSet, Gravity, LinearDrag};
pub use simulation::integrator::semi_implicit_euler;
pub use simulation::collision::{Contact, ContactSettings, detect, resolve, resolve_collisions};
pub use simulation::world::{World, BodyHandle};
pub use simulation::scenario::{Scenario, ScenarioError};

pub use configuration::config::{WorldConfig, ParametersConfig, ForceConfig, ShapeConfig, BodyConfig, ScenarioConfig};

pub use headless::runner::{run_headless, RunSummary};

pub use benchmark::benchmark::bench_step;
