pub mod states;
pub mod params;
pub mod collision;
pub mod integrator;
pub mod input;
pub mod render;
pub mod scenario;
