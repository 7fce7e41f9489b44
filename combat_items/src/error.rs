//! Error types for the combat item core.

use thiserror::Error;

use crate::item::CombatItem;

/// Failures resolving or loading item definitions.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Usually means corrupted or incompatible save data.
    #[error("unknown item definition '{0}'")]
    UnknownDefinition(String),

    #[error("item definition '{0}' has no effect")]
    MissingEffect(String),

    #[error("item definition '{0}' is defined twice")]
    DuplicateDefinition(String),

    #[error("failed to parse item catalog: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Failures loading a [`crate::RulesConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Failure reported by an item effect while it was being used.
#[derive(Debug, Error)]
pub enum EffectError {
    #[error("effect cannot be used outside of battle")]
    NotMapUsable,

    #[error("use was cancelled")]
    Cancelled,

    #[error("{0}")]
    Failed(String),
}

/// Returned by [`crate::Inventory::add`] when every free slot is taken.
/// Hands the rejected item back.
#[derive(Debug, Error)]
#[error("no room for {}", .0.name())]
pub struct NoRoom(pub CombatItem);

impl NoRoom {
    pub fn into_item(self) -> CombatItem {
        self.0
    }
}

/// Returned by [`crate::Inventory::try_set_slot`] for a slot past the
/// capacity. Hands the incoming item back.
#[derive(Debug, Error)]
#[error("slot {slot} is out of range")]
pub struct SlotOutOfRange {
    pub slot: usize,
    pub item: Option<CombatItem>,
}

impl SlotOutOfRange {
    pub fn into_item(self) -> Option<CombatItem> {
        self.item
    }
}
