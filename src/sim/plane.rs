//! Boundary plane geometry
//!
//! Each face of the enclosure is an oriented plane: any point on the face
//! plus a unit normal pointing into the interior. Signed distance is positive
//! on the interior side.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// An oriented plane, one face of the enclosure
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// Any point lying on the plane
    pub point: DVec3,
    /// Unit normal pointing into the enclosure
    pub normal: DVec3,
}

impl Plane {
    /// The normal is normalized once here; every query assumes unit length
    /// afterwards.
    pub fn new(point: DVec3, normal: DVec3) -> Self {
        Self {
            point,
            normal: normal.normalize(),
        }
    }

    /// Signed distance from `p` to the plane
    #[inline]
    pub fn signed_distance(&self, p: DVec3) -> f64 {
        (p - self.point).dot(self.normal)
    }

    /// Orthogonal projection of `p` onto the plane
    #[inline]
    pub fn project(&self, p: DVec3) -> DVec3 {
        p - self.signed_distance(p) * self.normal
    }
}
