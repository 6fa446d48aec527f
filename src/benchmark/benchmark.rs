use std::time::Instant;

use crate::simulation::integrator::step;
use crate::simulation::params::{Arena, Parameters};
use crate::simulation::states::{Body, NVec2, Palette, System};

/// Helper to build a manual System of size `n` laid out on a grid inside `arena`
fn make_system(n: usize, arena: &Arena, params: &Parameters) -> System {
    let radius = params.min_radius;
    let cols = ((arena.width / (2.5 * radius)).floor() as usize).max(1);
    let mut bodies = Vec::with_capacity(n);

    for i in 0..n {
        let i_f = i as f64;
        // deterministic positions, no rand needed; rows wrap and overlap once the grid is full
        let x = NVec2::new(
            radius + (i % cols) as f64 * 2.5 * radius,
            (radius + (i / cols) as f64 * 2.5 * radius) % (arena.height - radius),
        );
        let v = NVec2::new((i_f * 0.37).sin() * 3.0, (i_f * 0.13).cos() * 3.0);

        match Body::new(x, v, radius, Palette::ALL[i % Palette::ALL.len()], params) {
            Ok(b) => bodies.push(b),
            Err(e) => log::warn!("bench: skipping body {i}: {e}"),
        }
    }

    System::new(bodies)
}

/// Benchmark the frame step for a range of n
/// Paste output directly into excel to graph
pub fn bench_step() {
    let arena = Arena { width: 4000.0, height: 4000.0 };
    let params = Parameters::default();

    println!("N,step_ms");

    for n in [50, 100, 200, 400, 800, 1600, 3200] {
        // Small n: average over more steps to smooth noise
        let steps = if n <= 400 { 200 } else { 20 };

        let mut sys = make_system(n, &arena, &params);

        // Warm up
        step(&mut sys, &arena, &params);

        let t0 = Instant::now();
        for _ in 0..steps {
            step(&mut sys, &arena, &params);
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6}", n, ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bench_system_has_requested_size() {
        let arena = Arena { width: 4000.0, height: 4000.0 };
        let sys = make_system(300, &arena, &Parameters::default());
        assert_eq!(sys.len(), 300);
        assert!(sys.bodies().iter().all(|b| b.is_finite()));
    }
}
