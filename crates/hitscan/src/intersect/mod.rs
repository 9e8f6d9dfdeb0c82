//! Ray-shape intersection algorithms.
//!
//! Each shape kind has a dedicated intersector that works directly on the
//! shape's own parameters and its owning transform, and reports at most one
//! hit: the first point where the ray meets the surface.

mod capsule;
mod mesh;
mod oriented_box;
mod sphere;

pub use capsule::intersect_capsule;
pub use mesh::{intersect_mesh, intersect_triangle};
pub use oriented_box::intersect_box;
pub use sphere::intersect_sphere;

use hitscan_math::{Dir3, Point3, Transform};

use crate::shape::Shape;
use crate::Ray;

/// Result of a single ray-shape test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeHit {
    /// Distance along the unit ray direction.
    pub distance: f64,
    /// World-space intersection point.
    pub point: Point3,
    /// Unit surface normal at the intersection.
    pub normal: Dir3,
    /// The ray started inside the closed shape; `point` is where it leaves.
    pub from_inside: bool,
}

/// Intersect a ray with any shape placed by `transform`.
///
/// This dispatches to the intersector matching the shape kind.
pub fn intersect_shape(ray: &Ray, shape: &Shape, transform: &Transform) -> Option<ShapeHit> {
    match shape {
        Shape::Sphere(sphere) => intersect_sphere(ray, sphere, transform),
        Shape::OrientedBox(obb) => intersect_box(ray, obb, transform),
        Shape::Capsule(capsule) => intersect_capsule(ray, capsule, transform),
        Shape::TriangleMesh(collider) => intersect_mesh(ray, collider, transform),
    }
}
