//! Ray-triangle mesh intersection (Möller–Trumbore over every triangle).

use hitscan_math::{Dir3, Point3, Tolerance, Transform};

use super::ShapeHit;
use crate::shape::MeshCollider;
use crate::Ray;

/// Intersect a ray with a mesh collider.
///
/// Every triangle is mapped into world space and tested; the closest
/// accepted hit wins, with earlier triangles kept on exact ties. A collider
/// without mesh data never hits (queries reject it before scanning).
pub fn intersect_mesh(
    ray: &Ray,
    collider: &MeshCollider,
    transform: &Transform,
) -> Option<ShapeHit> {
    let mesh = collider.mesh.as_ref()?;
    let mut closest: Option<ShapeHit> = None;

    for [i0, i1, i2] in mesh.triangles() {
        let (Some(a), Some(b), Some(c)) = (
            mesh.vertices.get(i0),
            mesh.vertices.get(i1),
            mesh.vertices.get(i2),
        ) else {
            continue;
        };

        let v0 = transform.apply_point(a);
        let v1 = transform.apply_point(b);
        let v2 = transform.apply_point(c);

        if let Some(hit) = intersect_triangle(ray, &v0, &v1, &v2) {
            if closest.map_or(true, |best| hit.distance < best.distance) {
                closest = Some(hit);
            }
        }
    }

    closest
}

/// Möller–Trumbore ray-triangle intersection.
///
/// The normal is `normalize((v1 - v0) x (v2 - v0))` and follows the
/// triangle's winding; it is not flipped to face the ray.
///
/// The parallel cutoff is relative to the edge lengths, so tiny triangles
/// are tested as reliably as large ones.
pub fn intersect_triangle(ray: &Ray, v0: &Point3, v1: &Point3, v2: &Point3) -> Option<ShapeHit> {
    let eps = Tolerance::DEFAULT.parallel;
    let d = ray.direction.as_ref();

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = d.cross(&edge2);
    let a = edge1.dot(&h);

    // Ray parallel to the triangle plane, or degenerate triangle
    if a.abs() <= eps * edge1.norm() * edge2.norm() {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(&h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(&edge1);
    let v = f * d.dot(&q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(&q);
    if t <= eps {
        return None;
    }

    let normal = Dir3::try_new(edge1.cross(&edge2), f64::EPSILON)?;
    Some(ShapeHit {
        distance: t,
        point: ray.at(t),
        normal,
        from_inside: false,
    })
}
