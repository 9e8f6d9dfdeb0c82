//! Ray-capsule intersection: two cap spheres plus a finite cylinder.

use hitscan_math::{Dir3, Point3, Tolerance, Transform, Vec3};

use super::sphere::sphere_roots;
use super::ShapeHit;
use crate::shape::Capsule;
use crate::Ray;

/// Intersect a ray with a capsule collider.
///
/// Candidates come from the cap spheres (only on their outward hemisphere)
/// and from the side of the cylinder between the cap centers (only where the
/// axial projection lies on the segment). Every candidate lies on the capsule
/// surface, so the smallest positive one is the answer. When the origin is
/// inside the capsule or on its surface that answer is the exit point and
/// `from_inside` is set.
pub fn intersect_capsule(ray: &Ray, capsule: &Capsule, transform: &Transform) -> Option<ShapeHit> {
    let center = transform.place_rigid(&capsule.center);
    let axis = transform.rotation * capsule.axis.local_vector();
    let half = capsule.half_segment();
    let radius = capsule.radius;

    let top = center + axis * half;
    let bottom = center - axis * half;

    let mut best: Option<(f64, Point3, Vec3)> = None;
    let mut consider = |t: f64, point: Point3, outward: Vec3| {
        if t > 0.0 && best.map_or(true, |(best_t, _, _)| t < best_t) {
            best = Some((t, point, outward));
        }
    };

    for (cap, outward) in [(top, axis), (bottom, -axis)] {
        if let Some((t1, t2)) = sphere_roots(ray, &cap, radius) {
            for t in [t1, t2] {
                let point = ray.at(t);
                let offset = point - cap;
                if offset.dot(&outward) >= 0.0 {
                    consider(t, point, offset);
                }
            }
        }
    }

    if half > 0.0 {
        for (t, point, outward) in side_hits(ray, &bottom, &axis, 2.0 * half, radius) {
            consider(t, point, outward);
        }
    }

    let (t, point, outward) = best?;
    let normal = Dir3::try_new(outward, f64::EPSILON)?;
    // An origin on the surface counts as inside, as for spheres and boxes
    let from_inside = (ray.origin - closest_on_segment(&ray.origin, &bottom, &axis, 2.0 * half))
        .norm()
        <= radius;

    Some(ShapeHit {
        distance: t,
        point,
        normal,
        from_inside,
    })
}

/// Roots of the ray against the cylinder of `radius` around the segment
/// `base + s * axis`, `s ∈ [0, length]`, that fall within the segment.
fn side_hits(
    ray: &Ray,
    base: &Point3,
    axis: &Vec3,
    length: f64,
    radius: f64,
) -> Vec<(f64, Point3, Vec3)> {
    let d = ray.direction.as_ref();
    let oc = ray.origin - base;

    // Project onto the plane perpendicular to the axis
    let d_perp = d - d.dot(axis) * axis;
    let oc_perp = oc - oc.dot(axis) * axis;

    let a = d_perp.dot(&d_perp);
    // Ray is parallel to the axis; only the caps can be hit
    if Tolerance::DEFAULT.is_parallel(a) {
        return Vec::new();
    }
    let b = 2.0 * oc_perp.dot(&d_perp);
    let c = oc_perp.dot(&oc_perp) - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if !(discriminant > 0.0) {
        return Vec::new();
    }

    let sqrt_disc = discriminant.sqrt();
    [(-b - sqrt_disc) / (2.0 * a), (-b + sqrt_disc) / (2.0 * a)]
        .into_iter()
        .filter_map(|t| {
            let point = ray.at(t);
            let s = (point - base).dot(axis);
            if (0.0..=length).contains(&s) {
                Some((t, point, point - (base + axis * s)))
            } else {
                None
            }
        })
        .collect()
}

/// Closest point to `p` on the segment `base + s * axis`, `s ∈ [0, length]`.
fn closest_on_segment(p: &Point3, base: &Point3, axis: &Vec3, length: f64) -> Point3 {
    let s = (p - base).dot(axis).clamp(0.0, length);
    base + axis * s
}
