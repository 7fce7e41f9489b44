//! Stat sets: sparse collections of stat values.
//!
//! A stat set can describe a base stat line (a unit with 10 STR) or a
//! modifier (a sword granting +3 STR). Modifiers are layered onto a base with
//! [`StatSet::add_set`] and peeled back off with [`StatSet::remove_set`].

mod persist;

pub use persist::*;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;

use crate::stat::{StatRegistry, StatTag};

/// A sparse mapping from [`StatTag`] to value.
///
/// Absent tags read as their combinator's identity. Equality is
/// observational: two sets are equal when every tag reads the same.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "SavedStatSet", from = "SavedStatSet")]
pub struct StatSet {
    values: BTreeMap<StatTag, f32>,
    registry: &'static StatRegistry,
}

impl StatSet {
    /// Create an empty set backed by the standard registry.
    pub fn new() -> Self {
        Self::with_registry(StatRegistry::standard())
    }

    /// Create an empty set backed by the given registry.
    pub fn with_registry(registry: &'static StatRegistry) -> Self {
        Self {
            values: BTreeMap::new(),
            registry,
        }
    }

    /// Build a set from `(tag, value)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (StatTag, f32)>) -> Self {
        let mut set = Self::new();
        for (tag, value) in pairs {
            set.set(tag, value);
        }
        set
    }

    pub fn registry(&self) -> &'static StatRegistry {
        self.registry
    }

    fn identity(&self, tag: StatTag) -> f32 {
        self.registry.combinator_for(tag).identity()
    }

    // === Accessors ===

    /// Stored value, or the combinator identity when absent.
    pub fn get(&self, tag: StatTag) -> f32 {
        if tag == StatTag::None {
            return 0.0;
        }
        self.values
            .get(&tag)
            .copied()
            .unwrap_or_else(|| self.identity(tag))
    }

    /// Whether a flag (or any stat) is switched on.
    pub fn is(&self, tag: StatTag) -> bool {
        self.get(tag) > 0.0
    }

    /// Overwrite a value. Negative values are allowed. [`StatTag::None`]
    /// is never stored.
    pub fn set(&mut self, tag: StatTag, value: f32) {
        if tag == StatTag::None {
            return;
        }
        self.values.insert(tag, value);
    }

    // === Operations ===

    /// Combine `delta` into a single stat.
    pub fn add(&mut self, tag: StatTag, delta: f32) {
        let combined = self.registry.combinator_for(tag).combine(self.get(tag), delta);
        self.set(tag, combined);
    }

    /// Undo an [`StatSet::add`] of the same `delta`.
    pub fn sub(&mut self, tag: StatTag, delta: f32) {
        self.add(tag, -delta);
    }

    /// Layer every stat present in `other` onto this set.
    pub fn add_set(&mut self, other: &StatSet) -> &mut Self {
        for (&tag, &delta) in &other.values {
            let combined = self.registry.combinator_for(tag).combine(self.get(tag), delta);
            self.set(tag, combined);
        }
        self
    }

    /// Remove a set previously layered on with [`StatSet::add_set`].
    pub fn remove_set(&mut self, other: &StatSet) -> &mut Self {
        for (&tag, &delta) in &other.values {
            let restored = self.registry.combinator_for(tag).decombine(self.get(tag), delta);
            self.set(tag, restored);
        }
        self
    }

    /// Iterate over the stats holding a non-identity value.
    pub fn iter(&self) -> impl Iterator<Item = (StatTag, f32)> + '_ {
        self.values
            .iter()
            .map(|(&tag, &value)| (tag, value))
            .filter(move |(tag, value)| *value != self.identity(*tag))
    }

    /// True when no stat differs from its identity.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    // === Rendering ===

    /// One-line summary of every non-identity stat, e.g.
    /// `"STR: 3, Fire immunity"`.
    pub fn one_liner(&self) -> String {
        StatTag::iter()
            .filter(|tag| *tag != StatTag::None)
            .filter(|tag| self.get(*tag) != self.identity(*tag))
            .map(|tag| {
                if self.registry.is_flag(tag) {
                    tag.label().to_string()
                } else {
                    format!("{}: {}", tag.label(), self.get(tag) as i32)
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for StatSet {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for StatSet {
    fn eq(&self, other: &Self) -> bool {
        StatTag::iter().all(|tag| self.get(tag) == other.get(tag))
    }
}

impl std::fmt::Display for StatSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "HP: {}/{} STR: {} AGI: {} DEF: {} MAN: {}",
            self.get(StatTag::Hp),
            self.get(StatTag::Mhp),
            self.get(StatTag::Str),
            self.get(StatTag::Agi),
            self.get(StatTag::Def),
            self.get(StatTag::Mana),
        )
    }
}
