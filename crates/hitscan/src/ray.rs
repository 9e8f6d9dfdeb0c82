//! Ray representation and the hit record returned by queries.

use hitscan_math::{Dir3, Point3, Vec3};
use serde::{Deserialize, Serialize};

/// A ray in 3D space defined by origin, direction and an optional length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Origin point of the ray.
    pub origin: Point3,
    /// Unit direction of the ray.
    pub direction: Dir3,
    /// Maximum travel distance; `None` means unbounded.
    pub max_distance: Option<f64>,
}

impl Ray {
    /// Create a new unbounded ray from origin and direction.
    ///
    /// The direction will be normalized. A zero direction produces a ray
    /// that queries reject with [`RaycastError::DegenerateRay`](crate::RaycastError).
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: Dir3::new_normalize(direction),
            max_distance: None,
        }
    }

    /// Limit the ray to `max_distance`.
    pub fn with_max_distance(mut self, max_distance: f64) -> Self {
        self.max_distance = Some(max_distance);
        self
    }

    /// Evaluate the ray at parameter `t`: `origin + t * direction`.
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + t * self.direction.as_ref()
    }

    /// Whether origin and direction are usable for intersection math.
    pub fn is_finite(&self) -> bool {
        self.origin.iter().all(|c| c.is_finite())
            && self.direction.iter().all(|c| c.is_finite())
    }
}

/// Closest hit found by a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaycastHit<H> {
    /// World-space intersection point.
    pub point: Point3,
    /// Distance from the ray origin along the unit direction.
    pub distance: f64,
    /// Unit surface normal at the hit point.
    pub normal: Dir3,
    /// Handle of the entry that was hit.
    pub object: H,
}
