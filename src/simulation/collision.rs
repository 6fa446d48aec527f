//! Contact detection and response for circles against the arena walls and
//! against each other
//!
//! Walls reflect the crossing velocity component and scale it by the
//! restitution. Circle pairs are resolved in the collision-normal frame with a
//! 1D elastic exchange where the radius stands in for mass, then both bodies
//! are pushed apart by half the overlap each.

use log::debug;

use crate::simulation::params::{Arena, Parameters};
use crate::simulation::states::{Body, NVec2, System};

/// Below this center distance the collision normal is undefined
const EPS_DIST: f64 = 1e-12;

/// Contact counts from one resolution pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionStats {
    pub wall_contacts: usize,
    pub pair_contacts: usize,
}

/// Reflect `body` off any wall it touches. Returns true if either axis flipped.
///
/// Position is left alone unless `params.clamp_to_walls` is set, so a slow body
/// can sit on or slightly past the boundary.
pub fn reflect_walls(body: &mut Body, arena: &Arena, params: &Parameters) -> bool {
    let r = body.radius();
    let mut hit = false;

    if body.x.x + r >= arena.width || body.x.x - r <= 0.0 {
        body.v.x = -body.v.x * params.restitution;
        if params.clamp_to_walls {
            body.x.x = body.x.x.min(arena.width - r).max(r);
        }
        hit = true;
    }

    if body.x.y + r >= arena.height || body.x.y - r <= 0.0 {
        body.v.y = -body.v.y * params.restitution;
        if params.clamp_to_walls {
            body.x.y = body.x.y.min(arena.height - r).max(r);
        }
        hit = true;
    }

    hit
}

/// Resolve an overlap between `a` and `b`. Returns false if they do not touch.
///
/// Concentric centers have no defined normal; the normal falls back to +x
/// (angle 0), which pushes `a` left and `b` right.
pub fn resolve_pair(a: &mut Body, b: &mut Body, restitution: f64) -> bool {
    let d = b.x - a.x;
    let distance = d.norm();
    let (ra, rb) = (a.radius(), b.radius());
    let r_sum = ra + rb;

    if !(distance < r_sum) {
        return false;
    }

    let angle = if distance > EPS_DIST { d.y.atan2(d.x) } else { 0.0 };
    let (sin, cos) = angle.sin_cos();

    // World -> normal frame (x along the line of centers) and back
    let to_normal = |v: NVec2| NVec2::new(v.x * cos + v.y * sin, v.y * cos - v.x * sin);
    let to_world = |v: NVec2| NVec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos);

    let ua = to_normal(a.v);
    let ub = to_normal(b.v);

    // 1D elastic exchange along the normal, tangential parts untouched
    let na = (ua.x * (ra - rb) + 2.0 * rb * ub.x) / r_sum;
    let nb = (ub.x * (rb - ra) + 2.0 * ra * ua.x) / r_sum;

    a.v = to_world(NVec2::new(na, ua.y)) * restitution;
    b.v = to_world(NVec2::new(nb, ub.y)) * restitution;

    // Split the overlap evenly along the normal
    let push = 0.5 * (r_sum - distance);
    let n = NVec2::new(cos, sin);
    a.x -= n * push;
    b.x += n * push;

    true
}

/// Disjoint mutable borrows of bodies `i < j`
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    let (head, tail) = bodies.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}

/// One full resolution pass: walls for every body, then every unordered pair
/// `(i, j)` with `i < j` exactly once, in index order.
///
/// Each pair sees the velocities and positions left by the pairs before it.
pub fn resolve_all(sys: &mut System, arena: &Arena, params: &Parameters) -> CollisionStats {
    let mut stats = CollisionStats::default();

    for body in sys.bodies_mut() {
        if reflect_walls(body, arena, params) {
            stats.wall_contacts += 1;
        }
    }

    let n = sys.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let (a, b) = pair_mut(sys.bodies_mut(), i, j);
            if resolve_pair(a, b, params.restitution) {
                stats.pair_contacts += 1;
            }
        }
    }

    if stats.pair_contacts > 0 {
        debug!(
            "frame {}: {} wall contacts, {} pair contacts",
            sys.frame, stats.wall_contacts, stats.pair_contacts
        );
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::states::Palette;

    fn body(x: [f64; 2], v: [f64; 2], r: f64) -> Body {
        Body::new(x.into(), v.into(), r, Palette::Green, &Parameters::default()).unwrap()
    }

    #[test]
    fn left_wall_flips_dx() {
        let arena = Arena::default();
        let mut b = body([20.0, 200.0], [-5.0, 0.0], 20.0);
        assert!(reflect_walls(&mut b, &arena, &Parameters::default()));
        assert!((b.v.x - 4.5).abs() < 1e-12);
        assert_eq!(b.v.y, 0.0);
        // position is not clamped
        assert_eq!(b.x.x, 20.0);
    }

    #[test]
    fn corner_flips_both_axes() {
        let arena = Arena::default();
        let mut b = body([795.0, 395.0], [2.0, 4.0], 10.0);
        assert!(reflect_walls(&mut b, &arena, &Parameters::default()));
        assert!((b.v.x + 1.8).abs() < 1e-12);
        assert!((b.v.y + 3.6).abs() < 1e-12);
    }

    #[test]
    fn interior_body_untouched() {
        let arena = Arena::default();
        let mut b = body([400.0, 200.0], [2.0, 4.0], 10.0);
        assert!(!reflect_walls(&mut b, &arena, &Parameters::default()));
        assert_eq!(b.v, NVec2::new(2.0, 4.0));
    }

    #[test]
    fn clamp_option_snaps_inside() {
        let arena = Arena::default();
        let params = Parameters {
            clamp_to_walls: true,
            ..Parameters::default()
        };
        let mut b = body([805.0, 200.0], [3.0, 0.0], 10.0);
        reflect_walls(&mut b, &arena, &params);
        assert_eq!(b.x.x, 790.0);
        assert!(b.v.x < 0.0);
    }

    #[test]
    fn separated_pair_ignored() {
        let mut a = body([0.0, 0.0], [1.0, 0.0], 10.0);
        let mut b = body([25.0, 0.0], [-1.0, 0.0], 10.0);
        assert!(!resolve_pair(&mut a, &mut b, 0.9));
        assert_eq!(a.v, NVec2::new(1.0, 0.0));
        assert_eq!(b.x, NVec2::new(25.0, 0.0));
    }

    #[test]
    fn heavier_body_keeps_direction() {
        // radius 30 hits radius 10 head-on
        let mut a = body([100.0, 100.0], [2.0, 0.0], 30.0);
        let mut b = body([138.0, 100.0], [0.0, 0.0], 10.0);
        assert!(resolve_pair(&mut a, &mut b, 1.0));
        // a: (2*20 + 0) / 40 = 1, b: (0 + 2*30*2) / 40 = 3
        assert!((a.v.x - 1.0).abs() < 1e-12);
        assert!((b.v.x - 3.0).abs() < 1e-12);
    }

    #[test]
    fn tangential_component_passes_through() {
        // centers on the y axis, motion purely along x
        let mut a = body([100.0, 100.0], [3.0, 0.0], 10.0);
        let mut b = body([100.0, 115.0], [-1.0, 0.0], 10.0);
        assert!(resolve_pair(&mut a, &mut b, 1.0));
        assert!((a.v.x - 3.0).abs() < 1e-9);
        assert!((b.v.x + 1.0).abs() < 1e-9);
        assert!(a.v.y.abs() < 1e-9 && b.v.y.abs() < 1e-9);
    }

    #[test]
    fn concentric_bodies_are_separated_without_nan() {
        let mut a = body([100.0, 100.0], [1.0, 2.0], 10.0);
        let mut b = body([100.0, 100.0], [-1.0, 0.5], 10.0);
        assert!(resolve_pair(&mut a, &mut b, 0.9));
        assert!(a.is_finite() && b.is_finite());
        assert_eq!(a.x, NVec2::new(90.0, 100.0));
        assert_eq!(b.x, NVec2::new(110.0, 100.0));
    }

    #[test]
    fn resolve_all_counts_each_pair_once() {
        let params = Parameters::default();
        let mut sys = System::new(vec![
            body([100.0, 100.0], [1.0, 0.0], 10.0),
            body([115.0, 100.0], [-1.0, 0.0], 10.0),
            body([400.0, 200.0], [0.0, 0.0], 10.0),
        ]);
        let stats = resolve_all(&mut sys, &Arena::default(), &params);
        assert_eq!(stats.pair_contacts, 1);
        assert_eq!(stats.wall_contacts, 0);
    }
}
