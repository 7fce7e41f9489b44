//! Item definitions and the catalog that resolves them by key.

mod effect;

pub use effect::*;

use serde::{Deserialize, Serialize};
use stat_rules::StatSet;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::CatalogError;
use crate::item::CombatItem;
use crate::unit::Race;

/// Broad item category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    /// Innate skills. Never discarded for running out of uses.
    Ability,
    Consumable,
    Weapon,
    Armor,
    Accessory,
}

impl ItemCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ItemCategory::Ability => "Ability",
            ItemCategory::Consumable => "Item",
            ItemCategory::Weapon => "Weapon",
            ItemCategory::Armor => "Armor",
            ItemCategory::Accessory => "Accessory",
        }
    }
}

/// Immutable authoring data for an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub key: String,
    pub name: String,
    pub category: ItemCategory,
    /// Maximum uses. Zero means unlimited.
    #[serde(default)]
    pub uses: u32,
    #[serde(default)]
    pub cost: u32,
    /// Bonus granted to robot owners while equipped.
    #[serde(default)]
    pub stat_bonus: StatSet,
    #[serde(default)]
    pub effect: Option<EffectSpec>,
    /// Races allowed to equip the item. Empty means everyone.
    #[serde(default)]
    pub races: Vec<Race>,
}

impl ItemDefinition {
    /// A definition with unlimited uses, no cost, no bonus and no effect.
    pub fn new(key: impl Into<String>, name: impl Into<String>, category: ItemCategory) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            category,
            uses: 0,
            cost: 0,
            stat_bonus: StatSet::new(),
            effect: None,
            races: Vec::new(),
        }
    }

    /// Maximum uses. Zero means unlimited.
    pub fn with_uses(mut self, uses: u32) -> Self {
        self.uses = uses;
        self
    }

    /// Shop price at full uses.
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    /// Behavior used when the item is activated.
    pub fn with_effect(mut self, effect: EffectSpec) -> Self {
        self.effect = Some(effect);
        self
    }

    /// Stats granted to owners that gain item bonuses.
    pub fn with_stat_bonus(mut self, stat_bonus: StatSet) -> Self {
        self.stat_bonus = stat_bonus;
        self
    }

    /// Restrict equipping to these races. Empty allows every race.
    pub fn with_races(mut self, races: impl IntoIterator<Item = Race>) -> Self {
        self.races = races.into_iter().collect();
        self
    }

    pub fn has_unlimited_uses(&self) -> bool {
        self.uses == 0
    }

    /// Whether `race` may equip items of this definition.
    pub fn race_can_equip(&self, race: Race) -> bool {
        self.races.is_empty() || self.races.contains(&race)
    }
}

/// A resolved definition together with its behavior effect.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub definition: Arc<ItemDefinition>,
    pub effect: Option<Arc<dyn ItemEffect>>,
}

impl CatalogEntry {
    /// Create a fresh item at full uses.
    pub fn instantiate(&self) -> CombatItem {
        CombatItem::new(self.definition.clone(), self.effect.clone())
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "item")]
    items: Vec<ItemDefinition>,
}

/// Registry of item definitions, keyed by definition key.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    entries: HashMap<String, CatalogEntry>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `[[item]]` tables from TOML.
    pub fn from_toml_str(source: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(source)?;
        let mut catalog = Self::new();
        for definition in file.items {
            catalog.insert(definition)?;
        }
        Ok(catalog)
    }

    /// Register a definition, building its effect from its [`EffectSpec`].
    pub fn insert(&mut self, definition: ItemDefinition) -> Result<(), CatalogError> {
        let effect = definition
            .effect
            .clone()
            .map(|spec| Arc::new(StandardEffect::new(spec)) as Arc<dyn ItemEffect>);
        self.insert_entry(definition, effect)
    }

    /// Register a definition with a host-supplied effect.
    pub fn insert_with_effect(
        &mut self,
        definition: ItemDefinition,
        effect: Arc<dyn ItemEffect>,
    ) -> Result<(), CatalogError> {
        self.insert_entry(definition, Some(effect))
    }

    fn insert_entry(
        &mut self,
        definition: ItemDefinition,
        effect: Option<Arc<dyn ItemEffect>>,
    ) -> Result<(), CatalogError> {
        if self.entries.contains_key(&definition.key) {
            return Err(CatalogError::DuplicateDefinition(definition.key));
        }
        if effect.is_none() {
            tracing::error!("No effect for item definition: {}", definition.key);
        }
        let entry = CatalogEntry {
            definition: Arc::new(definition),
            effect,
        };
        self.entries.insert(entry.definition.key.clone(), entry);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&CatalogEntry> {
        self.entries.get(key)
    }

    /// Resolve a key, failing when it is unknown.
    pub fn resolve(&self, key: &str) -> Result<&CatalogEntry, CatalogError> {
        self.get(key)
            .ok_or_else(|| CatalogError::UnknownDefinition(key.to_string()))
    }

    /// Create a fresh item from a definition key.
    pub fn create(&self, key: &str) -> Result<CombatItem, CatalogError> {
        Ok(self.resolve(key)?.instantiate())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
