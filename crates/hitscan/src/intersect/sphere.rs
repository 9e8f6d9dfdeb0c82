//! Ray-sphere intersection (quadratic equation).

use hitscan_math::{Dir3, Point3, Transform};

use super::ShapeHit;
use crate::shape::Sphere;
use crate::Ray;

/// Solve `|origin + t*dir - center|^2 = radius^2` for the ray.
///
/// Returns the two roots `(near, far)`, or `None` when the discriminant is
/// not strictly positive (miss or tangent graze).
pub(crate) fn sphere_roots(ray: &Ray, center: &Point3, radius: f64) -> Option<(f64, f64)> {
    let offset = ray.origin - center;
    let d = ray.direction.as_ref();

    let a = d.dot(d);
    let b = 2.0 * offset.dot(d);
    let c = offset.dot(&offset) - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if !(discriminant > 0.0) {
        return None;
    }

    let sqrt_disc = discriminant.sqrt();
    let t1 = (-b - sqrt_disc) / (2.0 * a);
    let t2 = (-b + sqrt_disc) / (2.0 * a);
    Some((t1, t2))
}

/// Intersect a ray with a sphere collider.
///
/// The nearest strictly positive root wins. When only the far root is
/// positive the origin is inside the sphere (or on its surface) and the
/// exit point is returned with `from_inside` set.
pub fn intersect_sphere(ray: &Ray, sphere: &Sphere, transform: &Transform) -> Option<ShapeHit> {
    let center = transform.apply_point(&sphere.center);
    let radius = sphere.radius * transform.max_scale();

    let (t1, t2) = sphere_roots(ray, &center, radius)?;
    let (t, from_inside) = if t1 > 0.0 {
        (t1, false)
    } else if t2 > 0.0 {
        (t2, true)
    } else {
        return None;
    };

    let point = ray.at(t);
    let normal = Dir3::try_new(point - center, f64::EPSILON)?;
    Some(ShapeHit {
        distance: t,
        point,
        normal,
        from_inside,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use hitscan_math::Vec3;

    #[test]
    fn test_ray_sphere_through_center() {
        let sphere = Sphere::new(5.0);
        let ray = Ray::new(Point3::new(-10.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        let hit = intersect_sphere(&ray, &sphere, &Transform::identity()).unwrap();

        // Entry at x = -5
        assert_relative_eq!(hit.distance, 5.0, epsilon = 1e-10);
        assert_relative_eq!(hit.normal.into_inner(), -Vec3::x(), epsilon = 1e-10);
        assert!(!hit.from_inside);
    }

    #[test]
    fn test_distance_is_offset_minus_radius() {
        let sphere = Sphere::new(1.5).with_center(Point3::new(1.0, 2.0, 3.0));
        let origin = Point3::new(4.0, 6.0, 3.0);
        let center = Point3::new(1.0, 2.0, 3.0);
        let ray = Ray::new(origin, center - origin);
        let hit = intersect_sphere(&ray, &sphere, &Transform::identity()).unwrap();

        assert_relative_eq!(hit.distance, 5.0 - 1.5, epsilon = 1e-10);
        let expected = (hit.point - center).normalize();
        assert_relative_eq!(hit.normal.into_inner(), expected, epsilon = 1e-10);
    }

    #[test]
    fn test_unnormalized_direction() {
        let sphere = Sphere::new(1.0);
        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -20.0));
        let hit = intersect_sphere(&ray, &sphere, &Transform::identity()).unwrap();
        assert_relative_eq!(hit.distance, 4.0, epsilon = 1e-10);
    }

    #[test]
    fn test_ray_sphere_tangent_is_miss() {
        let sphere = Sphere::new(5.0);
        let ray = Ray::new(Point3::new(5.0, -10.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        assert!(intersect_sphere(&ray, &sphere, &Transform::identity()).is_none());
    }

    #[test]
    fn test_ray_sphere_miss() {
        let sphere = Sphere::new(5.0);
        let ray = Ray::new(Point3::new(-10.0, 10.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(intersect_sphere(&ray, &sphere, &Transform::identity()).is_none());
    }

    #[test]
    fn test_ray_sphere_behind() {
        let sphere = Sphere::new(1.0);
        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(intersect_sphere(&ray, &sphere, &Transform::identity()).is_none());
    }

    #[test]
    fn test_ray_sphere_from_inside() {
        let sphere = Sphere::new(5.0);
        let ray = Ray::new(Point3::origin(), Vec3::new(1.0, 0.0, 0.0));
        let hit = intersect_sphere(&ray, &sphere, &Transform::identity()).unwrap();

        // Exit point, flagged so the aggregator can drop it
        assert!(hit.from_inside);
        assert_relative_eq!(hit.distance, 5.0, epsilon = 1e-10);
    }

    #[test]
    fn test_origin_on_surface_counts_as_inside() {
        let sphere = Sphere::new(1.0);
        let ray = Ray::new(Point3::new(-1.0, 0.0, 0.0), Vec3::x());
        let hit = intersect_sphere(&ray, &sphere, &Transform::identity()).unwrap();
        assert!(hit.from_inside);
        assert_relative_eq!(hit.distance, 2.0, epsilon = 1e-10);
    }

    #[test]
    fn test_radius_uses_max_axis_scale() {
        let sphere = Sphere::new(1.0);
        let transform = Transform::translation(0.0, 0.0, -2.0).with_scale(Vec3::new(1.0, 3.0, 2.0));
        let ray = Ray::new(Point3::new(0.0, 0.0, 10.0), -Vec3::z());
        let hit = intersect_sphere(&ray, &sphere, &transform).unwrap();

        // Center at z = -2, radius 1 * 3
        assert_relative_eq!(hit.distance, 12.0 - 3.0, epsilon = 1e-10);
    }

    #[test]
    fn test_zero_radius_is_miss() {
        let sphere = Sphere::new(0.0);
        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), -Vec3::z());
        assert!(intersect_sphere(&ray, &sphere, &Transform::identity()).is_none());
    }
}
