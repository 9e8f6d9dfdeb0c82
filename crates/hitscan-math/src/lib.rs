#![warn(missing_docs)]

//! Math types for the hitscan ray query engine.
//!
//! Thin wrappers around nalgebra providing the types the intersection
//! routines share: points, vectors, directions, the position/rotation/scale
//! transform of a collider, and tolerance constants.

use nalgebra::{Isometry3, Matrix3, Matrix4, Translation3, Unit, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// A unit quaternion describing an orientation.
pub type UnitQuat = UnitQuaternion<f64>;

/// Placement of a collider in world space: position, rotation and per-axis scale.
///
/// Points are mapped as `position + rotation * (scale ∘ p)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    /// World-space position of the local origin.
    pub position: Point3,
    /// Orientation of the local axes.
    pub rotation: UnitQuat,
    /// Per-axis scale applied before rotation.
    pub scale: Vec3,
}

impl Transform {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            position: Point3::origin(),
            rotation: UnitQuat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }

    /// Translation by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        Self::from_position(Point3::new(dx, dy, dz))
    }

    /// Transform placing the local origin at `position`.
    pub fn from_position(position: Point3) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    /// Non-uniform scale by `(sx, sy, sz)`.
    pub fn scale(sx: f64, sy: f64, sz: f64) -> Self {
        Self {
            scale: Vec3::new(sx, sy, sz),
            ..Self::identity()
        }
    }

    /// Rotation about the X axis by `angle` radians.
    pub fn rotation_x(angle: f64) -> Self {
        Self::rotation_about_axis(&Vec3::x_axis(), angle)
    }

    /// Rotation about the Y axis by `angle` radians.
    pub fn rotation_y(angle: f64) -> Self {
        Self::rotation_about_axis(&Vec3::y_axis(), angle)
    }

    /// Rotation about the Z axis by `angle` radians.
    pub fn rotation_z(angle: f64) -> Self {
        Self::rotation_about_axis(&Vec3::z_axis(), angle)
    }

    /// Rotation about an arbitrary axis through the origin by `angle` radians.
    pub fn rotation_about_axis(axis: &Dir3, angle: f64) -> Self {
        Self {
            rotation: UnitQuat::from_axis_angle(axis, angle),
            ..Self::identity()
        }
    }

    /// Replace the position.
    pub fn with_position(mut self, position: Point3) -> Self {
        self.position = position;
        self
    }

    /// Replace the rotation.
    pub fn with_rotation(mut self, rotation: UnitQuat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Replace the scale.
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// The equivalent 4x4 affine matrix (`T * R * S`).
    pub fn matrix(&self) -> Matrix4<f64> {
        Matrix4::new_translation(&self.position.coords)
            * self.rotation.to_homogeneous()
            * Matrix4::new_nonuniform_scaling(&self.scale)
    }

    /// Rigid part of the transform (position and rotation, scale dropped).
    pub fn isometry(&self) -> Isometry3<f64> {
        Isometry3::from_parts(Translation3::from(self.position.coords), self.rotation)
    }

    /// Transform a point (scale, then rotate, then translate).
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        self.position + self.apply_vec(&p.coords)
    }

    /// Transform a direction vector (ignores translation, applies rotation/scale).
    pub fn apply_vec(&self, v: &Vec3) -> Vec3 {
        self.rotation * self.scale.component_mul(v)
    }

    /// Transform a normal vector (uses inverse transpose of the rotation/scale part).
    pub fn apply_normal(&self, n: &Vec3) -> Vec3 {
        let m3: Matrix3<f64> =
            self.rotation.to_rotation_matrix().into_inner() * Matrix3::from_diagonal(&self.scale);
        if let Some(inv) = m3.try_inverse() {
            inv.transpose() * n
        } else {
            // Degenerate scale: return input unchanged
            *n
        }
    }

    /// Place a local offset using only position and rotation.
    ///
    /// Used for colliders whose dimensions are given in world units
    /// (boxes, capsules), where scaling the offset would disagree with
    /// the unscaled extents.
    pub fn place_rigid(&self, offset: &Point3) -> Point3 {
        self.position + self.rotation * offset.coords
    }

    /// Largest absolute axis scale.
    pub fn max_scale(&self) -> f64 {
        self.scale.abs().max()
    }

    /// Whether the stored rotation quaternion has unit length.
    ///
    /// Deserialization wraps the stored quaternion as-is, so a rotation read
    /// from a file may not be normalized.
    pub fn has_unit_rotation(&self) -> bool {
        (self.rotation.coords.norm() - 1.0).abs() < Tolerance::DEFAULT.linear
    }

    /// Whether every component is finite.
    pub fn is_finite(&self) -> bool {
        self.position.iter().all(|c| c.is_finite())
            && self.rotation.coords.iter().all(|c| c.is_finite())
            && self.scale.iter().all(|c| c.is_finite())
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance, used to snap hit points onto faces.
    pub linear: f64,
    /// Threshold below which a direction component or determinant counts as parallel.
    pub parallel: f64,
}

impl Tolerance {
    /// Default tolerances (1e-6 linear, 1e-12 parallel).
    pub const DEFAULT: Self = Self {
        linear: 1e-6,
        parallel: 1e-12,
    };

    /// Check if two points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point3, b: &Point3) -> bool {
        (a - b).norm() < self.linear
    }

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }

    /// Check if a direction component or determinant is effectively zero.
    pub fn is_parallel(&self, d: f64) -> bool {
        d.abs() < self.parallel
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_identity_transform() {
        let t = Transform::identity();
        let p = Point3::new(1.0, 2.0, 3.0);
        let result = t.apply_point(&p);
        assert!((result - p).norm() < 1e-12);
    }

    #[test]
    fn test_translation() {
        let t = Transform::translation(10.0, 20.0, 30.0);
        let p = Point3::new(1.0, 2.0, 3.0);
        let result = t.apply_point(&p);
        assert!((result.x - 11.0).abs() < 1e-12);
        assert!((result.y - 22.0).abs() < 1e-12);
        assert!((result.z - 33.0).abs() < 1e-12);
    }

    #[test]
    fn test_rotation_z_90() {
        let t = Transform::rotation_z(PI / 2.0);
        let p = Point3::new(1.0, 0.0, 0.0);
        let result = t.apply_point(&p);
        assert!(result.x.abs() < 1e-12);
        assert!((result.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_scale() {
        let t = Transform::scale(2.0, 3.0, 4.0);
        let p = Point3::new(1.0, 1.0, 1.0);
        let result = t.apply_point(&p);
        assert!((result.x - 2.0).abs() < 1e-12);
        assert!((result.y - 3.0).abs() < 1e-12);
        assert!((result.z - 4.0).abs() < 1e-12);
        assert_relative_eq!(t.max_scale(), 4.0);
    }

    #[test]
    fn test_scale_then_rotate_then_translate() {
        // (1,0,0) -> scale x2 -> (2,0,0) -> rot z 90 -> (0,2,0) -> +(1,1,1)
        let t = Transform::rotation_z(PI / 2.0)
            .with_scale(Vec3::new(2.0, 1.0, 1.0))
            .with_position(Point3::new(1.0, 1.0, 1.0));
        let result = t.apply_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(result, Point3::new(1.0, 3.0, 1.0), epsilon = 1e-12);

        let via_matrix = t.matrix().transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(result, via_matrix, epsilon = 1e-12);
    }

    #[test]
    fn test_place_rigid_ignores_scale() {
        let t = Transform::translation(0.0, 0.0, 5.0).with_scale(Vec3::new(3.0, 3.0, 3.0));
        let placed = t.place_rigid(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(placed, Point3::new(1.0, 0.0, 5.0), epsilon = 1e-12);
    }

    #[test]
    fn test_isometry_round_trip() {
        let t = Transform::rotation_y(0.3).with_position(Point3::new(4.0, -2.0, 1.0));
        let p = Point3::new(5.0, 6.0, 7.0);
        let back = t.isometry().inverse_transform_point(&t.isometry().transform_point(&p));
        assert_relative_eq!(back, p, epsilon = 1e-12);
    }

    #[test]
    fn test_apply_normal_non_uniform_scale() {
        // Plane x + y = 0 stretched along x keeps its normal perpendicular
        let t = Transform::scale(2.0, 1.0, 1.0);
        let n = t.apply_normal(&Vec3::new(1.0, 1.0, 0.0));
        let tangent = t.apply_vec(&Vec3::new(1.0, -1.0, 0.0));
        assert!(n.dot(&tangent).abs() < 1e-12);
    }

    #[test]
    fn test_rotation_about_axis() {
        // Rotate (1,0,0) by 90° about Z axis → (0,1,0)
        let axis = Dir3::new_normalize(Vec3::z());
        let t = Transform::rotation_about_axis(&axis, PI / 2.0);
        let p = Point3::new(1.0, 0.0, 0.0);
        let result = t.apply_point(&p);
        assert!(result.x.abs() < 1e-12);
        assert!((result.y - 1.0).abs() < 1e-12);
        assert!(result.z.abs() < 1e-12);

        // Rotate about (1,1,0) normalized by 180° swaps x and y
        let axis2 = Dir3::new_normalize(Vec3::new(1.0, 1.0, 0.0));
        let t2 = Transform::rotation_about_axis(&axis2, PI);
        let r2 = t2.apply_point(&Point3::new(1.0, 0.0, 0.0));
        assert!(r2.x.abs() < 1e-12);
        assert!((r2.y - 1.0).abs() < 1e-12);
        assert!(r2.z.abs() < 1e-12);
    }

    #[test]
    fn test_transform_is_finite() {
        assert!(Transform::identity().is_finite());
        let bad = Transform::translation(f64::NAN, 0.0, 0.0);
        assert!(!bad.is_finite());
    }

    #[test]
    fn test_has_unit_rotation() {
        assert!(Transform::identity().has_unit_rotation());
        assert!(Transform::rotation_x(1.2).has_unit_rotation());

        let mut t = Transform::identity();
        t.rotation = UnitQuat::new_unchecked(nalgebra::Quaternion::new(1.0, 0.0, 0.0, 1.0));
        assert!(!t.has_unit_rotation());
        t.rotation = UnitQuat::new_unchecked(nalgebra::Quaternion::new(0.0, 0.0, 0.0, 0.0));
        assert!(!t.has_unit_rotation());
    }

    #[test]
    fn test_tolerance_points_equal() {
        let tol = Tolerance::DEFAULT;
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(1.0 + 1e-7, 2.0, 3.0);
        assert!(tol.points_equal(&a, &b));
        let c = Point3::new(1.001, 2.0, 3.0);
        assert!(!tol.points_equal(&a, &c));
        assert!(tol.is_parallel(1e-13));
        assert!(!tol.is_parallel(1e-6));
    }
}
