//! Persisted form of a stat set.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::StatSet;
use crate::stat::{StatRegistry, StatTag};

/// One persisted `(stat name, value)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatEntry {
    pub stat: String,
    pub value: f32,
}

/// A stat set as stored in save data: identity values are omitted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavedStatSet {
    pub entries: Vec<StatEntry>,
}

impl StatSet {
    /// Produce the compact persisted form.
    pub fn to_saved(&self) -> SavedStatSet {
        SavedStatSet {
            entries: self
                .iter()
                .map(|(tag, value)| StatEntry {
                    stat: tag.code().to_string(),
                    value,
                })
                .collect(),
        }
    }

    /// Restore a set against the standard registry.
    pub fn from_saved(saved: &SavedStatSet) -> Self {
        Self::from_saved_with(saved, StatRegistry::standard())
    }

    /// Restore a set against a specific registry. Unknown stat names are
    /// skipped.
    pub fn from_saved_with(saved: &SavedStatSet, registry: &'static StatRegistry) -> Self {
        let mut set = StatSet::with_registry(registry);
        for entry in &saved.entries {
            match StatTag::from_str(&entry.stat) {
                Ok(tag) => set.set(tag, entry.value),
                Err(_) => tracing::warn!("Skipping unknown stat '{}' in saved stat set", entry.stat),
            }
        }
        set
    }
}

impl From<StatSet> for SavedStatSet {
    fn from(set: StatSet) -> Self {
        set.to_saved()
    }
}

/// Serde restores through this conversion, so a deserialized set is always
/// backed by the standard registry. Use [`StatSet::from_saved_with`] to
/// restore against another one.
impl From<SavedStatSet> for StatSet {
    fn from(saved: SavedStatSet) -> Self {
        StatSet::from_saved(&saved)
    }
}
