//! Ray-box intersection (slab method in box-local space).

use hitscan_math::{Dir3, Tolerance, Transform, Vec3};
use nalgebra::{Isometry3, Translation3};

use super::ShapeHit;
use crate::shape::OrientedBox;
use crate::Ray;

/// Intersect a ray with an oriented box collider.
///
/// The ray is moved into the box frame (rigid inverse of position and
/// rotation; half-extents already encode the size) and clipped against the
/// three slab pairs. A ray starting inside the box reports its exit point
/// with `from_inside` set.
pub fn intersect_box(ray: &Ray, obb: &OrientedBox, transform: &Transform) -> Option<ShapeHit> {
    let tol = Tolerance::DEFAULT;
    let center = transform.place_rigid(&obb.center);
    let pose = Isometry3::from_parts(Translation3::from(center.coords), transform.rotation);

    let local_origin = pose.inverse_transform_point(&ray.origin);
    let local_dir = pose.inverse_transform_vector(ray.direction.as_ref());
    let half = &obb.half_extents;

    let mut t_near = f64::NEG_INFINITY;
    let mut t_far = f64::INFINITY;

    for i in 0..3 {
        if tol.is_parallel(local_dir[i]) {
            // Parallel to this slab pair: either always inside it or never
            if local_origin[i] < -half[i] || local_origin[i] > half[i] {
                return None;
            }
            continue;
        }

        let mut t0 = (-half[i] - local_origin[i]) / local_dir[i];
        let mut t1 = (half[i] - local_origin[i]) / local_dir[i];
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_near = t_near.max(t0);
        t_far = t_far.min(t1);
    }

    if t_near > t_far || t_far < 0.0 {
        return None;
    }

    let (t, from_inside) = if t_near > 0.0 {
        (t_near, false)
    } else {
        (t_far, true)
    };

    let local_point = local_origin.coords + local_dir * t;
    let local_normal = face_normal(&local_point, half, tol.linear * half.max().max(1.0));
    let normal = Dir3::try_new(transform.rotation * local_normal, f64::EPSILON)?;

    Some(ShapeHit {
        distance: t,
        point: ray.at(t),
        normal,
        from_inside,
    })
}

/// Outward normal of the face(s) a box-local point lies on.
///
/// Every axis whose coordinate is within `eps` of a face contributes, so an
/// edge or corner hit yields the normalized sum of the adjacent face
/// normals. If rounding leaves the point on no face, the axis where it is
/// relatively farthest out is used.
fn face_normal(point: &Vec3, half: &Vec3, eps: f64) -> Vec3 {
    let mut normal = Vec3::zeros();
    for i in 0..3 {
        if (point[i] + half[i]).abs() < eps {
            normal[i] = -1.0;
        } else if (point[i] - half[i]).abs() < eps {
            normal[i] = 1.0;
        }
    }

    if normal == Vec3::zeros() {
        let axis = point.component_div(half).abs().imax();
        normal[axis] = point[axis].signum();
    }

    normal.normalize()
}
