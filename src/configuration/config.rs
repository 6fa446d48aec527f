//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`ArenaConfig`]      – arena width and height
//! - [`ParametersConfig`] – restitution, drag gain, radius bounds, spawning
//! - [`BodyConfig`]       – optional explicit initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! Every field has a default, so an empty document is a valid scenario that
//! spawns five random balls in an 800 x 400 arena.
//!
//! # YAML format
//!
//! ```yaml
//! arena:
//!   width: 800.0
//!   height: 400.0
//!
//! parameters:
//!   restitution: 0.9        # velocity scale on every contact
//!   drag_gain: 0.05         # pointer offset -> velocity
//!   min_radius: 10.0
//!   max_radius: 30.0
//!   initial_count: 5        # used only when `bodies` is empty
//!   seed: 42                # omit for a random layout
//!   clamp_to_walls: false
//!
//! bodies:
//!   - x: [ 100.0, 200.0 ]
//!     v: [   3.0,  -1.0 ]
//!     radius: 20.0
//!     color: blue
//! ```

use serde::Deserialize;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::simulation::params::{
    ARENA_HEIGHT, ARENA_WIDTH, DRAG_GAIN, INITIAL_BODY_COUNT, MAX_RADIUS, MIN_RADIUS, RESTITUTION,
};
use crate::simulation::states::Palette;

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

/// Global physical parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParametersConfig {
    pub restitution: f64,
    pub drag_gain: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    pub initial_count: usize,
    pub seed: Option<u64>,
    pub clamp_to_walls: bool,
}

impl Default for ParametersConfig {
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

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: [f64; 2], // initial center in arena units
    #[serde(default)]
    pub v: [f64; 2], // initial displacement per step
    pub radius: f64,
    #[serde(default)]
    pub color: Palette,
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ScenarioConfig {
    pub arena: ArenaConfig,
    pub parameters: ParametersConfig,
    pub bodies: Vec<BodyConfig>, // empty -> spawn `initial_count` random bodies
}

impl ScenarioConfig {
    pub fn from_yaml(s: &str) -> crate::error::Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Load a scenario file; a missing file is `Error::Io`, bad YAML `Error::Config`
    pub fn from_path(path: impl AsRef<Path>) -> crate::error::Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_yaml::from_reader(reader)?)
    }
}
