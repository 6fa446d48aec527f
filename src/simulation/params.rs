//! Arena geometry and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - restitution applied on every wall and body contact,
//! - drag velocity gain for pointer dragging,
//! - radius bounds and initial body count for spawning,
//! - random seed and the optional wall clamp

pub const ARENA_WIDTH: f64 = 800.0;
pub const ARENA_HEIGHT: f64 = 400.0;
pub const RESTITUTION: f64 = 0.9;
pub const DRAG_GAIN: f64 = 0.05;
pub const MIN_RADIUS: f64 = 10.0;
pub const MAX_RADIUS: f64 = 30.0;
pub const INITIAL_BODY_COUNT: usize = 5;

/// Rectangular arena with its origin at the top-left corner, y growing downward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Parameters {
    pub restitution: f64, // energy loss factor per contact
    pub drag_gain: f64, // pointer offset -> velocity gain
    pub min_radius: f64, // smallest allowed body radius
    pub max_radius: f64, // largest allowed body radius
    pub initial_count: usize, // bodies spawned when none are configured
    pub seed: Option<u64>, // deterministic seed, None = random
    pub clamp_to_walls: bool, // snap reflected bodies back inside the arena
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            restitution: RESTITUTION,
            drag_gain: DRAG_GAIN,
            min_radius: MIN_RADIUS,
            max_radius: MAX_RADIUS,
            initial_count: INITIAL_BODY_COUNT,
            seed: None,
            clamp_to_walls: false,
        }
    }
}
