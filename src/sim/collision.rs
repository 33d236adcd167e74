//! Collision response for the enclosure walls
//!
//! The tricky part of the kernel: a penetrating body carries no explicit
//! velocity, so the bounce has to back the body out along its implied travel
//! direction and then rewrite *both* positions of the Verlet pair so the next
//! tick reads the reflected velocity.

use glam::DVec3;

use super::plane::Plane;

/// Smallest magnitude that still defines a direction
pub(crate) const MIN_TRAVEL: f64 = 1e-10;

/// Overlap between two spheres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Separation {
    /// Penetration depth
    pub depth: f64,
    /// Unit direction the queried sphere moves to resolve the overlap
    pub exit_dir: DVec3,
}

/// Rewritten Verlet pair for a body bounced off a wall
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallBounce {
    pub pos: DVec3,
    pub last_pos: DVec3,
}

/// Reflect a direction across a surface normal: v' = v - 2(v·n)n
#[inline]
pub fn reflect(v: DVec3, normal: DVec3) -> DVec3 {
    v - 2.0 * v.dot(normal) * normal
}

/// Bounce a penetrating sphere off `plane`.
///
/// Returns `None` when the sphere is clear of the wall, or when its travel
/// cannot be reconstructed (at rest, or moving parallel to the face); the
/// caller's clamp backstop covers those bodies.
pub fn bounce_off_plane(
    plane: &Plane,
    pos: DVec3,
    last_pos: DVec3,
    radius: f64,
) -> Option<WallBounce> {
    let dist_to_plane = plane.signed_distance(pos);
    if dist_to_plane >= radius {
        return None;
    }

    let vel = pos - last_pos;
    let vel_dist = vel.length();
    if vel_dist < MIN_TRAVEL {
        return None;
    }
    let vel_dir = vel / vel_dist;

    let denom = vel_dir.dot(plane.normal);
    if denom.abs() < MIN_TRAVEL {
        // travel parallel to the face
        return None;
    }

    // Point where the straight-line travel crosses the plane
    let t = (plane.point - pos).dot(plane.normal) / denom;
    let travel_crossing = pos + t * vel_dir;

    let on_plane = plane.project(pos);
    let intersection_depth = radius - dist_to_plane;

    // Distance to back out along -vel_dir until the sphere just clears the
    // wall. When travel was perpendicular to the face the depth is exact;
    // otherwise correct for the travel angle.
    let back_dist = if travel_crossing.distance(on_plane) < MIN_TRAVEL {
        intersection_depth
    } else {
        let cos_angle = (travel_crossing - on_plane).normalize().dot(vel_dir);
        if cos_angle.abs() < MIN_TRAVEL {
            intersection_depth
        } else {
            intersection_depth / cos_angle
        }
    };

    let cleared = pos - vel_dir * back_dist;
    let reflected = reflect(vel_dir, plane.normal);
    let travelled_past = cleared.distance(pos);

    // Writing last_pos behind the cleared position is what makes the next
    // tick's `pos - last_pos` come out as the reflected velocity.
    Some(WallBounce {
        pos: cleared + reflected * (vel_dist - travelled_past),
        last_pos: cleared - reflected * travelled_past,
    })
}
