//! The query entry point and its configuration.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::aggregate::{closest_hit, LayerFilter, ScanMode, ScanSettings};
use crate::entry::EntrySource;
use crate::error::{RaycastError, Result};
use crate::{Ray, RaycastHit};

/// How much of the result a caller wants back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Detail {
    /// Only the hit flag.
    HitOnly,
    /// Hit flag plus the closest hit record.
    #[default]
    Full,
}

/// Configuration of a query.
///
/// | option | default | effect |
/// |---|---|---|
/// | `layer` | `Layer(0)` | layer the closest hit must be on for `hit` to be true |
/// | `max_distance` | `None` | exclusive cutoff, combined with the ray's own limit |
/// | `detail` | `Full` | `HitOnly` drops the hit record |
/// | `hit_from_inside` | `false` | report exit points for rays starting inside a solid |
/// | `scan` | `Sequential` | `Parallel` spreads entry tests over rayon |
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryOptions {
    /// Layer filter.
    pub layer: LayerFilter,
    /// Maximum hit distance; `None` is unbounded.
    pub max_distance: Option<f64>,
    /// Requested result detail.
    pub detail: Detail,
    /// Keep hits from rays whose origin is inside a closed shape.
    pub hit_from_inside: bool,
    /// Entry scan strategy.
    pub scan: ScanMode,
}

impl QueryOptions {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require the closest hit to be on `layer`.
    pub fn with_layer(mut self, layer: i32) -> Self {
        self.layer = LayerFilter::Layer(layer);
        self
    }

    /// Accept the closest hit on any layer.
    pub fn any_layer(mut self) -> Self {
        self.layer = LayerFilter::Any;
        self
    }

    /// Ignore hits at or beyond `max_distance`.
    pub fn with_max_distance(mut self, max_distance: f64) -> Self {
        self.max_distance = Some(max_distance);
        self
    }

    /// Set the result detail.
    pub fn with_detail(mut self, detail: Detail) -> Self {
        self.detail = detail;
        self
    }

    /// Report exit points for rays starting inside a shape.
    pub fn with_hit_from_inside(mut self, hit_from_inside: bool) -> Self {
        self.hit_from_inside = hit_from_inside;
        self
    }

    /// Set the scan strategy.
    pub fn with_scan(mut self, scan: ScanMode) -> Self {
        self.scan = scan;
        self
    }
}

/// Result of a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult<H> {
    /// The closest hit is on an accepted layer.
    pub hit: bool,
    /// The closest hit on any layer, when `Detail::Full` was requested.
    pub detail: Option<RaycastHit<H>>,
}

/// Cast `ray` against the entries of `source`.
///
/// Inputs are validated before the scan: a non-finite ray, a non-positive
/// max distance, or an entry with missing or inconsistent data is reported
/// as an error. Missing everything is not an error.
pub fn query<S>(source: &S, ray: &Ray, options: &QueryOptions) -> Result<QueryResult<S::Handle>>
where
    S: EntrySource + ?Sized,
{
    if !ray.is_finite() {
        return Err(RaycastError::DegenerateRay);
    }
    let max_distance = effective_max_distance(ray.max_distance, options.max_distance)?;

    let entries = source.enumerate_entries();
    for (index, entry) in entries.iter().enumerate() {
        entry.validate(index)?;
    }

    let settings = ScanSettings {
        layer: options.layer,
        max_distance,
        hit_from_inside: options.hit_from_inside,
        mode: options.scan,
    };
    let scan = closest_hit(ray, &entries, &settings);

    debug!(
        "raycast from {:?} over {} entries: hit={} closest={:?}",
        ray.origin.coords.as_slice(),
        entries.len(),
        scan.has_hit,
        scan.closest.as_ref().map(|h| h.distance)
    );

    Ok(QueryResult {
        hit: scan.has_hit,
        detail: match options.detail {
            Detail::Full => scan.closest,
            Detail::HitOnly => None,
        },
    })
}

/// Whether `ray` hits something on layer 0, with no distance limit beyond the ray's own.
pub fn raycast<S>(source: &S, ray: &Ray) -> Result<bool>
where
    S: EntrySource + ?Sized,
{
    let options = QueryOptions::new().with_detail(Detail::HitOnly);
    Ok(query(source, ray, &options)?.hit)
}

/// Closest hit with default options (layer 0, unbounded).
pub fn raycast_closest<S>(source: &S, ray: &Ray) -> Result<QueryResult<S::Handle>>
where
    S: EntrySource + ?Sized,
{
    query(source, ray, &QueryOptions::new())
}

/// Closest hit filtered by `layer` and limited to `max_distance`.
pub fn raycast_layer<S>(
    source: &S,
    ray: &Ray,
    layer: i32,
    max_distance: f64,
) -> Result<QueryResult<S::Handle>>
where
    S: EntrySource + ?Sized,
{
    let options = QueryOptions::new()
        .with_layer(layer)
        .with_max_distance(max_distance);
    query(source, ray, &options)
}

fn effective_max_distance(from_ray: Option<f64>, from_options: Option<f64>) -> Result<f64> {
    let mut limit = f64::INFINITY;
    for d in [from_ray, from_options].into_iter().flatten() {
        if !(d > 0.0) {
            return Err(RaycastError::InvalidMaxDistance(d));
        }
        limit = limit.min(d);
    }
    Ok(limit)
}
