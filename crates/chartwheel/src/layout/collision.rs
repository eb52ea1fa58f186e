use crate::geometry::{angular_gap, normalize_degrees, FULL_CIRCLE, HALF_CIRCLE};
use crate::layout::error::LayoutError;
use crate::layout::types::{LocatedPoint, Universe};
use std::cmp::Ordering;

/// Degrees a point moves per nudge
pub const COLLISION_STEP: f64 = 1.0;

/// Nudges allowed per point in the working set before a layout is declared
/// infeasible. One nudge opens a gap by two steps, so 180 covers a point
/// pushed halfway round the wheel.
pub const COLLISION_ATTEMPTS_PER_POINT: usize = 180;

/// Display radii closer than this count as the same ring
const RADIUS_EPSILON: f64 = 1e-6;

fn same_ring(a: &LocatedPoint, b: &LocatedPoint) -> bool {
    (a.radius - b.radius).abs() <= RADIUS_EPSILON
}

fn compare_points(a: &LocatedPoint, b: &LocatedPoint) -> Ordering {
    a.angle.total_cmp(&b.angle)
}

/// True if `candidate` sits closer than `tolerance` degrees to any point on its ring
pub fn is_in_collision(candidate: &LocatedPoint, existing: &[LocatedPoint], tolerance: f64) -> bool {
    find_collision(candidate, existing, tolerance).is_some()
}

/// Index of the first point in `existing` that collides with `candidate`
pub fn find_collision(
    candidate: &LocatedPoint,
    existing: &[LocatedPoint],
    tolerance: f64,
) -> Option<usize> {
    existing
        .iter()
        .position(|p| same_ring(p, candidate) && angular_gap(candidate.angle, p.angle) < tolerance)
}

/// Push two colliding points one step apart, in opposite directions.
///
/// The direction comes from the original angles (`pointer`), so a point keeps
/// drifting away from the side it truly belongs on instead of flipping over
/// after earlier nudges. Equal originals fall back to the current angles, and
/// a full tie moves `p1` down and `p2` up.
pub fn place_points_in_collision(p1: &mut LocatedPoint, p2: &mut LocatedPoint) {
    let p1_goes_down = match unwrapped_order(p1.reference_angle(), p2.reference_angle()) {
        Ordering::Less => true,
        Ordering::Greater => false,
        Ordering::Equal => unwrapped_order(p1.angle, p2.angle) != Ordering::Greater,
    };

    if p1_goes_down {
        p1.angle -= COLLISION_STEP;
        p2.angle += COLLISION_STEP;
    } else {
        p1.angle += COLLISION_STEP;
        p2.angle -= COLLISION_STEP;
    }

    p1.angle = normalize_degrees(p1.angle);
    p2.angle = normalize_degrees(p2.angle);
}

/// Order two angles as seen from their shared side of the 0/360 seam
fn unwrapped_order(a: f64, b: f64) -> Ordering {
    let mut a = normalize_degrees(a);
    let mut b = normalize_degrees(b);
    if (a - b).abs() > HALF_CIRCLE {
        a = normalize_degrees(a + HALF_CIRCLE);
        b = normalize_degrees(b + HALF_CIRCLE);
    }
    a.total_cmp(&b)
}

/// Add `point` to an already collision-free set.
///
/// Returns the set sorted by angle. Fails once more than
/// [`COLLISION_ATTEMPTS_PER_POINT`] nudges per point have not separated the ring.
pub fn assemble(
    points: Vec<LocatedPoint>,
    point: LocatedPoint,
    universe: &Universe,
    tolerance: f64,
) -> Result<Vec<LocatedPoint>, LayoutError> {
    let max_attempts = COLLISION_ATTEMPTS_PER_POINT * (points.len() + 1);
    assemble_bounded(points, point, universe, tolerance, max_attempts)
}

/// [`assemble`] with an explicit nudge budget
pub fn assemble_bounded(
    mut points: Vec<LocatedPoint>,
    point: LocatedPoint,
    universe: &Universe,
    tolerance: f64,
    max_attempts: usize,
) -> Result<Vec<LocatedPoint>, LayoutError> {
    if points.is_empty() {
        points.push(point);
        return Ok(points);
    }

    let peers = points.iter().filter(|p| same_ring(p, &point)).count();
    let required = tolerance * (peers + 1) as f64;
    if peers > 0 && required > FULL_CIRCLE {
        log::warn!(
            "Layout: {} points at {}° collision radius need {}° of circle",
            peers + 1,
            tolerance,
            required
        );
        return Err(LayoutError::CircleTooSmall {
            points: peers + 1,
            tolerance,
            required,
        });
    }

    let mut attempts = 0;
    // Points still waiting for a free slot; the last one is placed first
    let mut pending = vec![point];

    while let Some(mut candidate) = pending.pop() {
        points.sort_by(compare_points);

        let Some(index) = find_collision(&candidate, &points, tolerance) else {
            points.push(candidate);
            continue;
        };

        attempts += 1;
        if attempts > max_attempts {
            log::warn!(
                "Layout: giving up on \"{}\" after {} nudges",
                candidate.name,
                max_attempts
            );
            return Err(LayoutError::UnresolvedCollision {
                name: candidate.name,
                attempts: max_attempts,
            });
        }

        let mut other = points.remove(index);
        place_points_in_collision(&mut other, &mut candidate);
        other.reproject(universe);
        candidate.reproject(universe);

        log::trace!(
            "Layout: nudged {} -> {:.1}°, {} -> {:.1}°",
            other.name,
            other.angle,
            candidate.name,
            candidate.angle
        );

        // Re-seat the displaced point before the newcomer
        pending.push(candidate);
        pending.push(other);
    }

    points.sort_by(compare_points);
    Ok(points)
}
