pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;
pub mod error;

pub use simulation::states::{Body, System, NVec2, Palette};
pub use simulation::params::{Arena, Parameters};
pub use simulation::collision::{reflect_walls, resolve_pair, resolve_all, CollisionStats};
pub use simulation::integrator::{step, kinetic_energy};
pub use simulation::input::{InputController, DragState, ColorSelector};
pub use simulation::render::{render, RenderSink, DrawList, CircleCommand};
pub use simulation::scenario::Scenario;

pub use configuration::config::{ArenaConfig, ParametersConfig, BodyConfig, ScenarioConfig};

pub use visualization::ballsim_vis2d::run_2d;

pub use benchmark::benchmark::bench_step;

pub use error::{Error, Result};
