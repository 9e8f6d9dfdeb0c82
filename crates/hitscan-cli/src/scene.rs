//! JSON scene files.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use hitscan::{Entry, EntrySource};
use serde::{Deserialize, Serialize};

/// A scene on disk: named entries in scan order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneFile {
    pub entries: Vec<Entry<String>>,
}

impl SceneFile {
    pub fn from_json(json: &str) -> Result<Self> {
        let scene: SceneFile = serde_json::from_str(json)?;
        Ok(scene)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading scene {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("parsing scene {}", path.display()))
    }

    /// Entry count per shape kind.
    pub fn kind_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for entry in &self.entries {
            *counts.entry(entry.shape.kind()).or_insert(0) += 1;
        }
        counts
    }

    /// Entry count per layer.
    pub fn layer_counts(&self) -> BTreeMap<i32, usize> {
        let mut counts = BTreeMap::new();
        for entry in &self.entries {
            *counts.entry(entry.layer).or_insert(0) += 1;
        }
        counts
    }
}

impl EntrySource for SceneFile {
    type Handle = String;

    fn enumerate_entries(&self) -> Cow<'_, [Entry<String>]> {
        Cow::Borrowed(&self.entries)
    }
}
