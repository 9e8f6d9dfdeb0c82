//! Collider shapes, expressed in the local frame of their owning transform.

use std::sync::Arc;

use hitscan_math::{Point3, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{RaycastError, Result};

/// A sphere collider.
///
/// The center is mapped through the full transform; the radius is scaled
/// by the transform's largest axis scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    /// Local center offset.
    pub center: Point3,
    /// Local radius.
    pub radius: f64,
}

impl Sphere {
    /// Sphere of `radius` at the local origin.
    pub fn new(radius: f64) -> Self {
        Self {
            center: Point3::origin(),
            radius,
        }
    }

    /// Move the local center.
    pub fn with_center(mut self, center: Point3) -> Self {
        self.center = center;
        self
    }
}

/// A box collider oriented by its transform's rotation.
///
/// Half-extents are in world units; the transform's scale is not applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrientedBox {
    /// Local center offset.
    pub center: Point3,
    /// Half of the box size along each local axis.
    pub half_extents: Vec3,
}

impl OrientedBox {
    /// Box with the given half-extents, centered at the local origin.
    pub fn new(half_extents: Vec3) -> Self {
        Self {
            center: Point3::origin(),
            half_extents,
        }
    }

    /// Box with the given full size (`size / 2` half-extents).
    pub fn from_size(size: Vec3) -> Self {
        Self::new(size * 0.5)
    }

    /// Move the local center.
    pub fn with_center(mut self, center: Point3) -> Self {
        self.center = center;
        self
    }
}

/// Local axis a capsule is aligned with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapsuleAxis {
    /// Local +Y.
    #[default]
    Up,
    /// Local +Z.
    Forward,
}

impl CapsuleAxis {
    /// Unit vector of this axis in the local frame.
    pub fn local_vector(self) -> Vec3 {
        match self {
            CapsuleAxis::Up => Vec3::y(),
            CapsuleAxis::Forward => Vec3::z(),
        }
    }
}

/// A capsule collider: a segment swept by a sphere.
///
/// `height` is the full tip-to-tip length, so the cap-sphere centers sit
/// `height / 2 - radius` from the center along the axis. Dimensions are in
/// world units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capsule {
    /// Local center offset.
    pub center: Point3,
    /// Tip-to-tip length.
    pub height: f64,
    /// Radius of the swept sphere.
    pub radius: f64,
    /// Orientation discriminator.
    #[serde(default)]
    pub axis: CapsuleAxis,
}

impl Capsule {
    /// Capsule centered at the local origin.
    pub fn new(height: f64, radius: f64, axis: CapsuleAxis) -> Self {
        Self {
            center: Point3::origin(),
            height,
            radius,
            axis,
        }
    }

    /// Move the local center.
    pub fn with_center(mut self, center: Point3) -> Self {
        self.center = center;
        self
    }

    /// Distance from the center to each cap-sphere center.
    pub fn half_segment(&self) -> f64 {
        (self.height * 0.5 - self.radius).max(0.0)
    }
}

/// Immutable triangle mesh in local coordinates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Triangle vertex indices, three per triangle.
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Create a mesh from vertices and flat triangle indices.
    pub fn new(vertices: Vec<Point3>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Number of complete triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate over triangles as vertex-index triples, in index order.
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|t| [t[0] as usize, t[1] as usize, t[2] as usize])
    }

    fn check(&self) -> std::result::Result<(), String> {
        if self.indices.len() % 3 != 0 {
            return Err(format!(
                "index count {} is not a multiple of 3",
                self.indices.len()
            ));
        }
        let count = self.vertices.len();
        if let Some(&bad) = self.indices.iter().find(|&&i| i as usize >= count) {
            return Err(format!("index {bad} out of range for {count} vertices"));
        }
        if self.vertices.iter().any(|v| !v.iter().all(|c| c.is_finite())) {
            return Err("non-finite vertex".to_string());
        }
        Ok(())
    }
}

/// A mesh collider. The mesh data may be shared between colliders.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeshCollider {
    /// Mesh data; `None` is a caller error reported at query time.
    pub mesh: Option<Arc<TriangleMesh>>,
}

impl MeshCollider {
    /// Collider over shared mesh data.
    pub fn new(mesh: Arc<TriangleMesh>) -> Self {
        Self { mesh: Some(mesh) }
    }
}

/// Any collider shape understood by the query engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// Sphere collider.
    Sphere(Sphere),
    /// Oriented box collider.
    OrientedBox(OrientedBox),
    /// Capsule collider.
    Capsule(Capsule),
    /// Triangle mesh collider.
    TriangleMesh(MeshCollider),
}

impl Shape {
    /// Short human-readable name of the shape kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Sphere(_) => "sphere",
            Shape::OrientedBox(_) => "box",
            Shape::Capsule(_) => "capsule",
            Shape::TriangleMesh(_) => "mesh",
        }
    }

    /// Check the shape's dimensions and data; `entry` labels the error.
    pub fn validate(&self, entry: usize) -> Result<()> {
        let invalid = |reason: String| RaycastError::InvalidShape { entry, reason };
        match self {
            Shape::Sphere(s) => {
                if !(s.radius.is_finite() && s.radius >= 0.0) {
                    return Err(invalid(format!("sphere radius {} must be >= 0", s.radius)));
                }
                if !s.center.iter().all(|c| c.is_finite()) {
                    return Err(invalid("sphere center is not finite".to_string()));
                }
            }
            Shape::OrientedBox(b) => {
                if !b.half_extents.iter().all(|&h| h.is_finite() && h > 0.0) {
                    return Err(invalid(format!(
                        "box half-extents {:?} must be > 0",
                        b.half_extents.as_slice()
                    )));
                }
                if !b.center.iter().all(|c| c.is_finite()) {
                    return Err(invalid("box center is not finite".to_string()));
                }
            }
            Shape::Capsule(c) => {
                if !(c.radius.is_finite() && c.radius >= 0.0) {
                    return Err(invalid(format!("capsule radius {} must be >= 0", c.radius)));
                }
                if !(c.height.is_finite() && c.height >= 0.0) {
                    return Err(invalid(format!("capsule height {} must be >= 0", c.height)));
                }
                if !c.center.iter().all(|v| v.is_finite()) {
                    return Err(invalid("capsule center is not finite".to_string()));
                }
            }
            Shape::TriangleMesh(collider) => {
                let mesh = collider
                    .mesh
                    .as_ref()
                    .ok_or(RaycastError::MissingMesh { entry })?;
                mesh.check()
                    .map_err(|reason| RaycastError::MalformedMesh { entry, reason })?;
            }
        }
        Ok(())
    }
}

impl From<Sphere> for Shape {
    fn from(s: Sphere) -> Self {
        Shape::Sphere(s)
    }
}

impl From<OrientedBox> for Shape {
    fn from(b: OrientedBox) -> Self {
        Shape::OrientedBox(b)
    }
}

impl From<Capsule> for Shape {
    fn from(c: Capsule) -> Self {
        Shape::Capsule(c)
    }
}

impl From<TriangleMesh> for Shape {
    fn from(mesh: TriangleMesh) -> Self {
        Shape::TriangleMesh(MeshCollider::new(Arc::new(mesh)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> TriangleMesh {
        TriangleMesh::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![0, 1, 2, 0, 2, 3],
        )
    }

    #[test]
    fn test_capsule_half_segment() {
        let c = Capsule::new(4.0, 0.5, CapsuleAxis::Up);
        assert!((c.half_segment() - 1.5).abs() < 1e-12);

        // Shorter than its diameter: collapses to a sphere
        let short = Capsule::new(0.5, 1.0, CapsuleAxis::Forward);
        assert_eq!(short.half_segment(), 0.0);
    }

    #[test]
    fn test_mesh_triangles() {
        let mesh = quad();
        assert_eq!(mesh.triangle_count(), 2);
        let tris: Vec<_> = mesh.triangles().collect();
        assert_eq!(tris, vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn test_validate_ok() {
        assert!(Shape::from(quad()).validate(0).is_ok());
        assert!(Shape::from(Sphere::new(0.0)).validate(0).is_ok());
        assert!(Shape::from(OrientedBox::new(Vec3::new(1.0, 2.0, 3.0)))
            .validate(0)
            .is_ok());
    }

    #[test]
    fn test_validate_missing_mesh() {
        let shape = Shape::TriangleMesh(MeshCollider::default());
        assert_eq!(shape.validate(3), Err(RaycastError::MissingMesh { entry: 3 }));
    }

    #[test]
    fn test_validate_malformed_mesh() {
        let mut mesh = quad();
        mesh.indices.push(0);
        assert!(matches!(
            Shape::from(mesh).validate(1),
            Err(RaycastError::MalformedMesh { entry: 1, .. })
        ));

        let mut mesh = quad();
        mesh.indices[4] = 9;
        let err = Shape::from(mesh).validate(0).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_validate_bad_dimensions() {
        assert!(matches!(
            Shape::from(Sphere::new(-1.0)).validate(0),
            Err(RaycastError::InvalidShape { .. })
        ));
        assert!(matches!(
            Shape::from(OrientedBox::new(Vec3::new(1.0, 0.0, 1.0))).validate(0),
            Err(RaycastError::InvalidShape { .. })
        ));
        assert!(matches!(
            Shape::from(Capsule::new(f64::NAN, 1.0, CapsuleAxis::Up)).validate(0),
            Err(RaycastError::InvalidShape { .. })
        ));
    }
}
