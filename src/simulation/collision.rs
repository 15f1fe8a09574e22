//! Pairwise collision detection and response
//!
//! - Broad phase: every unordered pair `(i, j)`, `i < j`, of collidable bodies.
//!   There is no spatial acceleration structure; worlds hold tens of bodies.
//! - Narrow phase: exact overlap test keyed on the pair's shapes, producing a
//!   [`Contact`] (unit normal from the first body towards the second, and the
//!   penetration depth along it).
//! - Response: one restitution impulse along the normal when the bodies
//!   approach, followed by a positional correction that pushes them apart in
//!   proportion to their inverse masses.
//!
//! Pairs are resolved one after the other in order, so a later pair sees the
//! positions and velocities left by earlier ones.

use log::trace;

use crate::simulation::states::{Body, NVec2, Shape};

/// Tuning constants for the positional correction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactSettings {
    pub slop: f64, // penetration left uncorrected
    pub percent: f64, // fraction of the remaining penetration removed per step
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            slop: 0.01,
            percent: 0.8,
        }
    }
}

/// Result of a positive narrow-phase test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub normal: NVec2, // unit, points from body 1 to body 2
    pub penetration: f64, // >= 0 for overlapping shapes, 0 when touching
}

/// Narrow-phase test for one pair, dispatched on both shapes.
/// A circle paired with a box is tested as its bounding box.
pub fn detect(a: &Body, b: &Body) -> Option<Contact> {
    match (a.shape, b.shape) {
        (Shape::Circle { radius: r1 }, Shape::Circle { radius: r2 }) => {
            circle_circle(a.x, r1, b.x, r2)
        }
        (sa, sb) => box_box(a.x, sa.half_extents(), b.x, sb.half_extents()),
    }
}

/// Axis-aligned boxes: overlap is checked independently per axis, the
/// separation axis is the one with the smaller overlap (ties go to X)
pub fn box_box(x1: NVec2, half1: NVec2, x2: NVec2, half2: NVec2) -> Option<Contact> {
    let delta = x2 - x1;

    let overlap_x = (half1.x + half2.x) - delta.x.abs();
    if overlap_x < 0.0 {
        return None;
    }
    let overlap_y = (half1.y + half2.y) - delta.y.abs();
    if overlap_y < 0.0 {
        return None;
    }

    let contact = if overlap_x <= overlap_y {
        Contact {
            normal: if delta.x > 0.0 { NVec2::new(1.0, 0.0) } else { NVec2::new(-1.0, 0.0) },
            penetration: overlap_x,
        }
    } else {
        Contact {
            normal: if delta.y > 0.0 { NVec2::new(0.0, 1.0) } else { NVec2::new(0.0, -1.0) },
            penetration: overlap_y,
        }
    };
    Some(contact)
}

/// Circles: squared distance against the squared sum of radii.
/// Coincident centers get the fixed normal `(1, 0)` and a unit distance
pub fn circle_circle(x1: NVec2, r1: f64, x2: NVec2, r2: f64) -> Option<Contact> {
    let mut delta = x2 - x1;
    let mut dist_sq = delta.norm_squared();

    let min_dist = r1 + r2;
    if dist_sq > min_dist * min_dist {
        return None;
    }

    if dist_sq == 0.0 {
        delta = NVec2::new(1.0, 0.0);
        dist_sq = 1.0;
    }

    let dist = dist_sq.sqrt();
    Some(Contact {
        normal: delta / dist,
        penetration: min_dist - dist,
    })
}

/// Apply the impulse and positional correction for one contact.
/// Two immovable bodies, and shapes that only touch, are left untouched
pub fn resolve(a: &mut Body, b: &mut Body, contact: &Contact, settings: &ContactSettings) {
    let inv_m1 = a.inverse_mass();
    let inv_m2 = b.inverse_mass();
    let inv_mass_sum = inv_m1 + inv_m2;
    if inv_mass_sum <= 0.0 || contact.penetration <= 0.0 {
        return;
    }

    let n = contact.normal;

    // relative velocity along the normal, negative when approaching
    let rel_v = b.v - a.v;
    let vn = rel_v.dot(&n);
    if vn < 0.0 {
        let e = a.restitution.min(b.restitution);
        let j = -(1.0 + e) * vn / inv_mass_sum;
        let impulse = n * j;

        a.v -= impulse * inv_m1;
        b.v += impulse * inv_m2;
    }

    // runs for resting contacts too, where there is overlap but no approach
    let correction_mag =
        (contact.penetration - settings.slop).max(0.0) / inv_mass_sum * settings.percent;
    let correction = n * correction_mag;

    a.x -= correction * inv_m1;
    b.x += correction * inv_m2;
}

/// All unique index pairs `(i, j)`, `i < j`, over `indices`, in order
pub fn broad_phase(indices: &[usize]) -> Vec<(usize, usize)> {
    let n = indices.len();
    let mut pairs = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            pairs.push((indices[i], indices[j]));
        }
    }
    pairs
}

/// Test and resolve every pair among `candidates` (indices into `bodies`, in
/// world order). Non-collidable bodies are skipped.
/// Returns the number of contacts that were resolved.
pub fn resolve_collisions(bodies: &mut [Body], candidates: &[usize], settings: &ContactSettings) -> usize {
    let mut contacts = 0;

    for (i, j) in broad_phase(candidates) {
        let (a, b) = pair_mut(bodies, i, j);
        if !a.collidable || !b.collidable {
            continue;
        }
        if let Some(contact) = detect(a, b) {
            trace!("contact {i}-{j}: normal {:?}, depth {}", contact.normal, contact.penetration);
            resolve(a, b, &contact, settings);
            contacts += 1;
        }
    }

    contacts
}

/// Mutable references to two distinct bodies
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    debug_assert!(i != j);
    if i < j {
        let (left, right) = bodies.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = bodies.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square(x: f64, y: f64, half: f64, m: f64) -> Body {
        Body::new(NVec2::new(x, y), m, Shape::Box { half_width: half, half_height: half })
    }

    fn ball(x: f64, y: f64, r: f64, m: f64) -> Body {
        Body::new(NVec2::new(x, y), m, Shape::circle(r))
    }

    #[test]
    fn box_overlap_picks_smaller_axis() {
        let c = detect(&square(0.0, 0.0, 5.0, 1.0), &square(8.0, 1.0, 5.0, 1.0)).unwrap();
        assert_eq!(c.normal, NVec2::new(1.0, 0.0));
        assert_relative_eq!(c.penetration, 2.0);

        let c = detect(&square(0.0, 0.0, 5.0, 1.0), &square(1.0, -9.0, 5.0, 1.0)).unwrap();
        assert_eq!(c.normal, NVec2::new(0.0, -1.0));
        assert_relative_eq!(c.penetration, 1.0);
    }

    #[test]
    fn box_tie_goes_to_x() {
        let c = detect(&square(0.0, 0.0, 5.0, 1.0), &square(-8.0, 8.0, 5.0, 1.0)).unwrap();
        assert_eq!(c.normal, NVec2::new(-1.0, 0.0));
    }

    #[test]
    fn separated_boxes_do_not_collide() {
        assert!(detect(&square(0.0, 0.0, 5.0, 1.0), &square(10.5, 0.0, 5.0, 1.0)).is_none());
        assert!(detect(&square(0.0, 0.0, 5.0, 1.0), &square(0.0, 10.5, 5.0, 1.0)).is_none());
    }

    #[test]
    fn touching_boxes_collide_without_response() {
        let mut a = square(0.0, 0.0, 5.0, 1.0).with_velocity(NVec2::new(1.0, 0.0));
        let mut b = square(10.0, 0.0, 5.0, 1.0).with_velocity(NVec2::new(-1.0, 0.0));
        let c = detect(&a, &b).unwrap();
        assert_eq!(c.penetration, 0.0);
        resolve(&mut a, &mut b, &c, &ContactSettings::default());
        assert_eq!(a.x, NVec2::new(0.0, 0.0));
        assert_eq!(b.x, NVec2::new(10.0, 0.0));
        // approaching, but no overlap yet: no impulse either
        assert_eq!(a.v, NVec2::new(1.0, 0.0));
        assert_eq!(b.v, NVec2::new(-1.0, 0.0));
    }

    #[test]
    fn coincident_circles_use_fallback_normal() {
        let a = ball(3.0, 3.0, 2.0, 1.0);
        let b = ball(3.0, 3.0, 2.0, 1.0);
        let c = detect(&a, &b).unwrap();
        assert_eq!(c.normal, NVec2::new(1.0, 0.0));
        assert_relative_eq!(c.penetration, 3.0);
    }

    #[test]
    fn circle_against_box_uses_bounding_box() {
        let a = ball(0.0, 0.0, 5.0, 1.0);
        let b = square(9.0, 0.0, 5.0, 1.0);
        let c = detect(&a, &b).unwrap();
        assert_eq!(c.normal, NVec2::new(1.0, 0.0));
        assert_relative_eq!(c.penetration, 1.0);

        // corner region: circles would miss, bounding boxes still touch
        let a = ball(0.0, 0.0, 5.0, 1.0);
        let b = square(9.0, 9.0, 5.0, 1.0);
        assert!(detect(&a, &b).is_some());
    }

    #[test]
    fn static_pair_is_untouched() {
        let mut a = square(0.0, 0.0, 5.0, f64::INFINITY).with_velocity(NVec2::new(1.0, 0.0));
        let mut b = square(5.0, 0.0, 5.0, 0.0).with_velocity(NVec2::new(-1.0, 0.0));
        let c = detect(&a, &b).unwrap();
        resolve(&mut a, &mut b, &c, &ContactSettings::default());
        assert_eq!(a.x, NVec2::new(0.0, 0.0));
        assert_eq!(b.x, NVec2::new(5.0, 0.0));
        assert_eq!(a.v, NVec2::new(1.0, 0.0));
        assert_eq!(b.v, NVec2::new(-1.0, 0.0));
    }

    #[test]
    fn static_body_pushes_movable_body_fully() {
        let mut floor = square(0.0, 0.0, 5.0, f64::INFINITY);
        let mut crate_ = square(0.0, 9.0, 5.0, 2.0);
        let c = detect(&floor, &crate_).unwrap();
        assert_eq!(c.normal, NVec2::new(0.0, 1.0));
        resolve(&mut floor, &mut crate_, &c, &ContactSettings::default());

        // mag = (1 - 0.01) / 0.5 * 0.8, applied times inv mass 0.5
        assert_eq!(floor.x, NVec2::new(0.0, 0.0));
        assert_relative_eq!(crate_.x.y, 9.0 + 0.99 * 0.8, epsilon = 1e-12);
    }

    #[test]
    fn separating_bodies_get_no_impulse() {
        let mut a = square(0.0, 0.0, 5.0, 1.0).with_velocity(NVec2::new(-1.0, 0.0));
        let mut b = square(8.0, 0.0, 5.0, 1.0).with_velocity(NVec2::new(1.0, 0.0));
        let c = detect(&a, &b).unwrap();
        resolve(&mut a, &mut b, &c, &ContactSettings::default());
        assert_eq!(a.v, NVec2::new(-1.0, 0.0));
        assert_eq!(b.v, NVec2::new(1.0, 0.0));
        assert!(b.x.x - a.x.x > 8.0);
    }

    #[test]
    fn restitution_uses_smaller_coefficient() {
        let mut a = square(0.0, 0.0, 5.0, 1.0)
            .with_velocity(NVec2::new(2.0, 0.0))
            .with_restitution(1.0);
        let mut b = square(9.0, 0.0, 5.0, 1.0)
            .with_velocity(NVec2::new(-2.0, 0.0))
            .with_restitution(0.0);
        let c = detect(&a, &b).unwrap();
        resolve(&mut a, &mut b, &c, &ContactSettings::default());
        // perfectly inelastic: both end up at rest
        assert_relative_eq!(a.v.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(b.v.x, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn non_collidable_bodies_are_skipped() {
        let mut bodies = vec![
            square(0.0, 0.0, 5.0, 1.0),
            square(8.0, 0.0, 5.0, 1.0).with_collidable(false),
        ];
        let n = resolve_collisions(&mut bodies, &[0, 1], &ContactSettings::default());
        assert_eq!(n, 0);
        assert_eq!(bodies[1].x, NVec2::new(8.0, 0.0));
    }

    #[test]
    fn broad_phase_lists_unique_pairs_in_order() {
        assert_eq!(broad_phase(&[0, 2, 5]), vec![(0, 2), (0, 5), (2, 5)]);
        assert!(broad_phase(&[3]).is_empty());
        assert!(broad_phase(&[]).is_empty());
    }
}
