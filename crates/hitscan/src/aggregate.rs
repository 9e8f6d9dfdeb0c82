//! Closest-hit aggregation over an ordered entry collection.

use log::trace;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::entry::Entry;
use crate::intersect::{intersect_shape, ShapeHit};
use crate::{Ray, RaycastHit};

/// Which layers count as a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerFilter {
    /// Any layer matches.
    Any,
    /// Only entries on this layer match.
    Layer(i32),
}

impl LayerFilter {
    /// Whether an entry on `layer` passes the filter.
    pub fn matches(self, layer: i32) -> bool {
        match self {
            LayerFilter::Any => true,
            LayerFilter::Layer(wanted) => wanted == layer,
        }
    }
}

impl Default for LayerFilter {
    fn default() -> Self {
        LayerFilter::Layer(0)
    }
}

/// How per-entry intersection tests are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanMode {
    /// One entry after another on the calling thread.
    #[default]
    Sequential,
    /// Entry tests spread over the rayon pool, folded in entry order.
    Parallel,
}

/// Resolved settings for one scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanSettings {
    /// Layer filter deciding `has_hit`.
    pub layer: LayerFilter,
    /// Exclusive distance cutoff (`f64::INFINITY` for unbounded).
    pub max_distance: f64,
    /// Keep hits reported from rays starting inside a solid.
    pub hit_from_inside: bool,
    /// Execution strategy.
    pub mode: ScanMode,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            layer: LayerFilter::default(),
            max_distance: f64::INFINITY,
            hit_from_inside: false,
            mode: ScanMode::Sequential,
        }
    }
}

/// Outcome of a scan.
#[derive(Debug, Clone, PartialEq)]
pub struct Scan<H> {
    /// The closest recorded hit is on a layer accepted by the filter.
    pub has_hit: bool,
    /// The closest hit on any layer.
    pub closest: Option<RaycastHit<H>>,
}

/// Scan `entries` in order and fold their hits into the closest one.
///
/// The closest record always follows the nearest hit regardless of layer,
/// and `has_hit` reflects only whether *that* record's entry passes the
/// layer filter. A nearer entry on another layer therefore hides a farther
/// matching one. Ties keep the earlier entry.
pub fn closest_hit<H: Clone + Send + Sync>(
    ray: &Ray,
    entries: &[Entry<H>],
    settings: &ScanSettings,
) -> Scan<H> {
    match settings.mode {
        ScanMode::Sequential => fold(
            entries,
            entries
                .iter()
                .map(|entry| intersect_shape(ray, &entry.shape, &entry.transform)),
            settings,
        ),
        ScanMode::Parallel => {
            // `collect` on an indexed parallel iterator keeps entry order
            let hits: Vec<Option<ShapeHit>> = entries
                .par_iter()
                .map(|entry| intersect_shape(ray, &entry.shape, &entry.transform))
                .collect();
            fold(entries, hits.into_iter(), settings)
        }
    }
}

fn fold<H: Clone>(
    entries: &[Entry<H>],
    hits: impl Iterator<Item = Option<ShapeHit>>,
    settings: &ScanSettings,
) -> Scan<H> {
    let mut closest_distance = settings.max_distance;
    let mut scan = Scan {
        has_hit: false,
        closest: None,
    };

    for (index, (entry, hit)) in entries.iter().zip(hits).enumerate() {
        let Some(hit) = hit else {
            continue;
        };
        if hit.from_inside && !settings.hit_from_inside {
            trace!("entry {index}: origin inside {}, skipped", entry.shape.kind());
            continue;
        }
        if !(hit.distance > 0.0) {
            continue;
        }

        if hit.distance < closest_distance {
            trace!(
                "entry {index}: {} hit at {:.6} on layer {}",
                entry.shape.kind(),
                hit.distance,
                entry.layer
            );
            closest_distance = hit.distance;
            scan.has_hit = settings.layer.matches(entry.layer);
            scan.closest = Some(RaycastHit {
                point: hit.point,
                distance: hit.distance,
                normal: hit.normal,
                object: entry.object.clone(),
            });
        }
    }

    scan
}
