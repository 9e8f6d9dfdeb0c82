//! Scan entries and the scene-snapshot interface callers implement.

use std::borrow::Cow;

use hitscan_math::Transform;
use serde::{Deserialize, Serialize};

use crate::error::{RaycastError, Result};
use crate::shape::Shape;

/// One collider in a query: a shape, where it is, its layer, and the
/// caller's handle for the object that owns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry<H> {
    /// Opaque caller handle returned in hit records.
    pub object: H,
    /// Collider shape in local coordinates.
    pub shape: Shape,
    /// Placement of the collider in world space.
    #[serde(default)]
    pub transform: Transform,
    /// Collision category tag.
    #[serde(default)]
    pub layer: i32,
}

impl<H> Entry<H> {
    /// Entry at the world origin on layer 0.
    pub fn new(object: H, shape: impl Into<Shape>) -> Self {
        Self {
            object,
            shape: shape.into(),
            transform: Transform::identity(),
            layer: 0,
        }
    }

    /// Replace the transform.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Replace the layer.
    pub fn with_layer(mut self, layer: i32) -> Self {
        self.layer = layer;
        self
    }

    /// Check the entry's shape and transform; `index` is its scan position.
    pub fn validate(&self, index: usize) -> Result<()> {
        if !self.transform.is_finite() {
            return Err(RaycastError::InvalidShape {
                entry: index,
                reason: "transform is not finite".to_string(),
            });
        }
        if !self.transform.has_unit_rotation() {
            return Err(RaycastError::InvalidShape {
                entry: index,
                reason: "rotation is not a unit quaternion".to_string(),
            });
        }
        self.shape.validate(index)
    }
}

/// Source of the ordered entries a query scans.
///
/// This is the boundary to whatever owns the scene: the query engine never
/// enumerates or looks up objects itself. Order matters, since exact
/// distance ties go to the entry listed first.
pub trait EntrySource {
    /// Handle type identifying the object behind each entry.
    type Handle: Clone + Send + Sync;

    /// Snapshot of the entries to scan, in scan order.
    fn enumerate_entries(&self) -> Cow<'_, [Entry<Self::Handle>]>;

    /// Look up the entry for a handle, e.g. the collider of a hit object.
    fn entry_for(&self, handle: &Self::Handle) -> Option<Entry<Self::Handle>>
    where
        Self::Handle: PartialEq,
    {
        self.enumerate_entries()
            .iter()
            .find(|entry| &entry.object == handle)
            .cloned()
    }
}

impl<H: Clone + Send + Sync> EntrySource for [Entry<H>] {
    type Handle = H;

    fn enumerate_entries(&self) -> Cow<'_, [Entry<H>]> {
        Cow::Borrowed(self)
    }
}

impl<H: Clone + Send + Sync> EntrySource for Vec<Entry<H>> {
    type Handle = H;

    fn enumerate_entries(&self) -> Cow<'_, [Entry<H>]> {
        Cow::Borrowed(self.as_slice())
    }
}
