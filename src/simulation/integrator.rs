//! Fixed-step frame integrator
//!
//! One call to `step` is one frame: Euler-advance every free body by its
//! velocity, resolve wall and pair contacts, then repair any non-finite state.
//! Rendering is not part of the step.

use super::collision::{resolve_all, CollisionStats};
use super::params::{Arena, Parameters};
use super::states::{NVec2, System};

/// Advance `sys` by one frame in-place and bump `sys.frame`
pub fn step(sys: &mut System, arena: &Arena, params: &Parameters) -> CollisionStats {
    if sys.is_empty() { // no bodies, nothing to do
        sys.frame += 1;
        return CollisionStats::default();
    }

    // Positions at the start of the frame, fallback for the NaN guard
    let x_old: Vec<NVec2> = sys.bodies().iter().map(|b| b.x).collect();

    // Drift: x_n+1 = x_n + v_n (held bodies stay put)
    for b in sys.bodies_mut() {
        b.update();
    }

    let stats = resolve_all(sys, arena, params);

    for (b, x) in sys.bodies_mut().iter_mut().zip(x_old) {
        b.sanitize(x);
    }

    sys.frame += 1;
    stats
}

/// Total kinetic energy with radius as mass: sum of 0.5 * r * |v|^2
pub fn kinetic_energy(sys: &System) -> f64 {
    sys.bodies()
        .iter()
        .map(|b| 0.5 * b.radius() * b.v.norm_squared())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::states::{Body, Palette};

    #[test]
    fn empty_system_still_counts_frames() {
        let mut sys = System::default();
        step(&mut sys, &Arena::default(), &Parameters::default());
        assert_eq!(sys.frame, 1);
    }

    #[test]
    fn free_flight_conserves_energy() {
        let p = Parameters::default();
        let b = Body::new(NVec2::new(400.0, 200.0), NVec2::new(1.5, -0.5), 20.0, Palette::Red, &p).unwrap();
        let mut sys = System::new(vec![b]);
        let e0 = kinetic_energy(&sys);
        for _ in 0..50 {
            step(&mut sys, &Arena::default(), &p);
        }
        assert!((kinetic_energy(&sys) - e0).abs() < 1e-12);
        assert_eq!(sys.bodies()[0].x, NVec2::new(475.0, 175.0));
    }
}
