#![warn(missing_docs)]

//! Ray queries against collections of colliders.
//!
//! This crate answers "what does this ray hit first?" for a caller-supplied
//! list of colliders (spheres, oriented boxes, capsules and triangle
//! meshes) without depending on an engine's physics system. Each query is a
//! pure function of its inputs: nothing is cached between calls.
//!
//! # Architecture
//!
//! - [`Ray`] - Ray representation with origin, direction and optional length
//! - [`Shape`] - Collider shapes in the local frame of their transform
//! - [`intersect`] - Ray-shape intersection algorithms for each shape kind
//! - [`aggregate`] - Closest-hit fold over an ordered entry list
//! - [`query`] - The query entry point and its options
//!
//! # Example
//!
//! ```
//! use hitscan::{query, Entry, QueryOptions, Ray, Sphere};
//! use hitscan_math::{Point3, Transform, Vec3};
//!
//! let entries = vec![
//!     Entry::new("ball", Sphere::new(1.0)).with_transform(Transform::translation(0.0, 0.0, -5.0)),
//! ];
//! let ray = Ray::new(Point3::origin(), Vec3::new(0.0, 0.0, -1.0));
//!
//! let result = query(&entries, &ray, &QueryOptions::new()).unwrap();
//! assert!(result.hit);
//! assert_eq!(result.detail.unwrap().object, "ball");
//! ```

pub mod aggregate;
mod entry;
mod error;
pub mod intersect;
pub mod query;
mod ray;
mod shape;

pub use aggregate::{LayerFilter, ScanMode};
pub use entry::{Entry, EntrySource};
pub use error::{RaycastError, Result};
pub use query::{query, raycast, raycast_closest, raycast_layer, Detail, QueryOptions, QueryResult};
pub use ray::{Ray, RaycastHit};
pub use shape::{Capsule, CapsuleAxis, MeshCollider, OrientedBox, Shape, Sphere, TriangleMesh};
