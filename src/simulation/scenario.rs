//! Build a fully-initialized simulation scenario from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! `Scenario` containing:
//! - arena geometry (`Arena`)
//! - physical parameters (`Parameters`)
//! - system state (`System`, bodies at frame 0)
//! - input state (`InputController`, `ColorSelector`)
//!
//! The scenario is inserted into Bevy as a `Resource` and consumed by the
//! physics, input and visualization systems

use bevy::prelude::Resource;
use log::info;
use rand::{rng, rngs::StdRng, Rng, SeedableRng};

use crate::configuration::config::{BodyConfig, ScenarioConfig};
use crate::error::{Error, Result};
use crate::simulation::collision::CollisionStats;
use crate::simulation::input::{ColorSelector, InputController};
use crate::simulation::integrator;
use crate::simulation::params::{Arena, Parameters};
use crate::simulation::states::{Body, NVec2, Palette, System};

/// Rejection-sampling budget per spawned body
const MAX_PLACEMENT_ATTEMPTS: usize = 10_000;

/// Spawned velocity components are uniform in [-MAX_SPAWN_SPEED, MAX_SPAWN_SPEED]
const MAX_SPAWN_SPEED: f64 = 3.0;

/// Runtime bundle for one simulation run
#[derive(Resource, Debug, Clone)]
pub struct Scenario {
    pub arena: Arena,
    pub parameters: Parameters,
    pub system: System,
    pub input: InputController,
    pub colors: ColorSelector,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        let arena = Arena {
            width: cfg.arena.width,
            height: cfg.arena.height,
        };
        if !(arena.width.is_finite() && arena.width > 0.0 && arena.height.is_finite() && arena.height > 0.0) {
            return Err(Error::InvalidParam("arena width and height must be finite and > 0".into()));
        }

        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            restitution: p_cfg.restitution,
            drag_gain: p_cfg.drag_gain,
            min_radius: p_cfg.min_radius,
            max_radius: p_cfg.max_radius,
            initial_count: p_cfg.initial_count,
            seed: p_cfg.seed,
            clamp_to_walls: p_cfg.clamp_to_walls,
        };
        validate_parameters(&parameters)?;

        let bodies = if cfg.bodies.is_empty() {
            spawn_random(&arena, &parameters)?
        } else {
            cfg.bodies
                .iter()
                .map(|bc: &BodyConfig| {
                    Body::new(NVec2::from(bc.x), NVec2::from(bc.v), bc.radius, bc.color, &parameters)
                })
                .collect::<Result<Vec<_>>>()?
        };

        info!(
            "scenario: {} bodies in {}x{} arena, restitution {}",
            bodies.len(),
            arena.width,
            arena.height,
            parameters.restitution
        );

        Ok(Self {
            arena,
            parameters,
            system: System::new(bodies),
            input: InputController::new(),
            colors: ColorSelector::default(),
        })
    }

    /// One frame: adopt the selected color, then advance the physics
    pub fn step(&mut self) -> CollisionStats {
        self.colors.apply(&mut self.system);
        integrator::step(&mut self.system, &self.arena, &self.parameters)
    }

    pub fn pointer_down(&mut self, p: NVec2) {
        self.input.pointer_down(&mut self.system, p);
    }

    pub fn pointer_move(&mut self, p: NVec2) {
        self.input.pointer_move(&mut self.system, p, &self.parameters);
    }

    pub fn pointer_up(&mut self) {
        self.input.pointer_up(&mut self.system);
    }
}

fn validate_parameters(p: &Parameters) -> Result<()> {
    if !p.restitution.is_finite() || p.restitution < 0.0 {
        return Err(Error::InvalidParam("restitution must be finite and >= 0".into()));
    }
    if !p.drag_gain.is_finite() {
        return Err(Error::InvalidParam("drag_gain must be finite".into()));
    }
    if !(p.min_radius.is_finite() && p.min_radius > 0.0) {
        return Err(Error::InvalidParam("min_radius must be finite and > 0".into()));
    }
    if !(p.max_radius.is_finite() && p.max_radius >= p.min_radius) {
        return Err(Error::InvalidParam("max_radius must be finite and >= min_radius".into()));
    }
    Ok(())
}

/// Place `initial_count` non-overlapping bodies fully inside the arena
fn spawn_random(arena: &Arena, params: &Parameters) -> Result<Vec<Body>> {
    // Even the smallest discs cannot cover more than the arena area
    let min_disc = std::f64::consts::PI * params.min_radius * params.min_radius;
    if params.initial_count as f64 * min_disc > arena.width * arena.height {
        return Err(Error::InvalidParam(format!(
            "initial_count {} cannot fit in a {}x{} arena",
            params.initial_count, arena.width, arena.height
        )));
    }

    let mut rng: StdRng = match params.seed {
        Some(s) => SeedableRng::seed_from_u64(s),
        None => SeedableRng::seed_from_u64(rng().random()),
    };

    let mut bodies: Vec<Body> = Vec::new();
    for id in 0..params.initial_count {
        let radius = rng.random_range(params.min_radius..=params.max_radius);
        if arena.width < 2.0 * radius || arena.height < 2.0 * radius {
            return Err(Error::Placement(format!(
                "body {id} with radius {radius:.1} does not fit in the arena"
            )));
        }

        let mut attempts = 0usize;
        let x = loop {
            if attempts >= MAX_PLACEMENT_ATTEMPTS {
                return Err(Error::Placement(format!(
                    "no free spot for body {id} after {attempts} attempts; try fewer or smaller bodies"
                )));
            }
            attempts += 1;
            let candidate = NVec2::new(
                rng.random_range(radius..=arena.width - radius),
                rng.random_range(radius..=arena.height - radius),
            );
            if !overlaps_existing(&bodies, &candidate, radius) {
                break candidate;
            }
        };

        let v = NVec2::new(
            rng.random_range(-MAX_SPAWN_SPEED..=MAX_SPAWN_SPEED),
            rng.random_range(-MAX_SPAWN_SPEED..=MAX_SPAWN_SPEED),
        );
        let color = Palette::ALL[rng.random_range(0..Palette::ALL.len())];

        bodies.push(Body::new(x, v, radius, color, params)?);
    }
    Ok(bodies)
}

fn overlaps_existing(existing: &[Body], x: &NVec2, radius: f64) -> bool {
    existing
        .iter()
        .any(|b| (b.x - x).norm() < b.radius() + radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> ScenarioConfig {
        let mut cfg = ScenarioConfig::default();
        cfg.parameters.seed = Some(seed);
        cfg
    }

    #[test]
    fn default_spawns_five_disjoint_bodies() -> Result<()> {
        let sc = Scenario::build_scenario(seeded(1234))?;
        let bodies = sc.system.bodies();
        assert_eq!(bodies.len(), 5);
        for (i, a) in bodies.iter().enumerate() {
            assert!(a.radius() >= 10.0 && a.radius() <= 30.0);
            assert!(a.x.x - a.radius() >= 0.0 && a.x.x + a.radius() <= 800.0);
            assert!(a.x.y - a.radius() >= 0.0 && a.x.y + a.radius() <= 400.0);
            for b in &bodies[i + 1..] {
                assert!((a.x - b.x).norm() >= a.radius() + b.radius());
            }
        }
        Ok(())
    }

    #[test]
    fn same_seed_same_layout() -> Result<()> {
        let a = Scenario::build_scenario(seeded(99))?;
        let b = Scenario::build_scenario(seeded(99))?;
        for (ba, bb) in a.system.bodies().iter().zip(b.system.bodies()) {
            assert_eq!(ba.x, bb.x);
            assert_eq!(ba.v, bb.v);
        }
        Ok(())
    }

    #[test]
    fn overcrowded_arena_fails_placement() {
        let mut cfg = seeded(5);
        cfg.arena.width = 100.0;
        cfg.arena.height = 100.0;
        cfg.parameters.initial_count = 25;
        let err = Scenario::build_scenario(cfg).unwrap_err();
        assert!(matches!(err, Error::Placement(_)));
    }

    #[test]
    fn impossible_count_rejected_without_allocating() {
        let mut cfg = seeded(5);
        cfg.parameters.initial_count = usize::MAX;
        let err = Scenario::build_scenario(cfg).unwrap_err();
        assert!(matches!(err, Error::InvalidParam(_)), "got {err}");
        assert!(err.to_string().contains("initial_count"));
    }

    #[test]
    fn bad_configured_radius_rejected() {
        let yaml = "bodies: [{ x: [100.0, 100.0], radius: 50.0 }]";
        let cfg = ScenarioConfig::from_yaml(yaml).unwrap();
        assert!(matches!(Scenario::build_scenario(cfg), Err(Error::InvalidParam(_))));
    }

    #[test]
    fn step_applies_selected_color() -> Result<()> {
        let mut sc = Scenario::build_scenario(seeded(3))?;
        sc.colors.select(Palette::Green);
        sc.step();
        assert!(sc.system.bodies().iter().all(|b| b.color() == Palette::Green));
        assert_eq!(sc.system.frame, 1);
        Ok(())
    }
}
