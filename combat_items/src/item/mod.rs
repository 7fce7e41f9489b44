//! Combat items: an item definition plus its per-instance use counts.

use serde::{Deserialize, Serialize};
use stat_rules::StatSet;
use std::cmp::Ordering;
use std::sync::Arc;
use uuid::Uuid;

use crate::catalog::{EffectKind, ItemCatalog, ItemCategory, ItemDefinition, ItemEffect};
use crate::config::GameMode;
use crate::error::CatalogError;
use crate::inventory::InventoryId;
use crate::unit::Race;

/// Identity of a single item instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persisted per-instance item state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedCombatItem {
    pub data_key: String,
    pub uses_when_added: u32,
    pub uses_remaining: u32,
}

/// An item instance sitting in (or moving between) inventories.
///
/// The container link is informational only: inventories own their items and
/// are the only ones that update it.
#[derive(Debug)]
pub struct CombatItem {
    id: ItemId,
    definition: Arc<ItemDefinition>,
    effect: Option<Arc<dyn ItemEffect>>,
    container: Option<InventoryId>,
    uses_when_added: u32,
    uses_remaining: u32,
}

impl CombatItem {
    /// Create a fresh item at full uses.
    pub fn new(definition: Arc<ItemDefinition>, effect: Option<Arc<dyn ItemEffect>>) -> Self {
        if effect.is_none() {
            tracing::error!("No effect for item: {}", definition.key);
        }
        Self {
            id: ItemId::new(),
            uses_remaining: definition.uses,
            uses_when_added: 0,
            definition,
            effect,
            container: None,
        }
    }

    /// Rehydrate an item from save data. Use counts above the definition's
    /// maximum are clamped to it.
    pub fn from_saved(saved: &SavedCombatItem, catalog: &ItemCatalog) -> Result<Self, CatalogError> {
        let entry = catalog.resolve(&saved.data_key)?;
        let effect = entry
            .effect
            .clone()
            .ok_or_else(|| CatalogError::MissingEffect(saved.data_key.clone()))?;
        let definition = entry.definition.clone();
        let clamp = |uses: u32| {
            if definition.has_unlimited_uses() {
                uses
            } else {
                uses.min(definition.uses)
            }
        };
        Ok(Self {
            id: ItemId::new(),
            uses_when_added: clamp(saved.uses_when_added),
            uses_remaining: clamp(saved.uses_remaining),
            definition,
            effect: Some(effect),
            container: None,
        })
    }

    pub fn to_saved(&self) -> SavedCombatItem {
        SavedCombatItem {
            data_key: self.definition.key.clone(),
            uses_when_added: self.uses_when_added,
            uses_remaining: self.uses_remaining,
        }
    }

    // === Accessors ===

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn definition(&self) -> &Arc<ItemDefinition> {
        &self.definition
    }

    pub fn key(&self) -> &str {
        &self.definition.key
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn category(&self) -> ItemCategory {
        self.definition.category
    }

    pub fn effect(&self) -> Option<&Arc<dyn ItemEffect>> {
        self.effect.as_ref()
    }

    pub fn effect_kind(&self) -> Option<EffectKind> {
        self.effect.as_ref().map(|effect| effect.kind())
    }

    pub fn container(&self) -> Option<InventoryId> {
        self.container
    }

    pub fn uses_remaining(&self) -> u32 {
        self.uses_remaining
    }

    /// Uses remaining when the item was first equipped; the casual-mode
    /// recharge target.
    pub fn uses_when_added(&self) -> u32 {
        self.uses_when_added
    }

    pub fn max_uses(&self) -> u32 {
        self.definition.uses
    }

    pub fn has_unlimited_uses(&self) -> bool {
        self.definition.has_unlimited_uses()
    }

    pub fn stat_bonus(&self) -> &StatSet {
        &self.definition.stat_bonus
    }

    pub fn race_can_equip(&self, race: Race) -> bool {
        self.definition.race_can_equip(race)
    }

    /// "a" or "an", for sentences like "You found an elixir".
    pub fn article(&self) -> &'static str {
        match self.name().chars().find(|c| c.is_ascii_alphabetic()) {
            Some(c) if "aeioux".contains(c.to_ascii_lowercase()) => "an",
            _ => "a",
        }
    }

    // === Derived values ===

    /// Shop price, scaled down by spent uses. Never exceeds the cost.
    pub fn gold_value(&self) -> u32 {
        let cost = self.definition.cost;
        let uses = self.definition.uses;
        if uses == 0 {
            return cost;
        }
        let remaining = self.uses_remaining.min(uses);
        let scaled = u64::from(cost) * u64::from(remaining) / u64::from(uses);
        u32::try_from(scaled).unwrap_or(cost)
    }

    /// Half the gold value, rounded down.
    pub fn sell_value(&self) -> u32 {
        self.gold_value() / 2
    }

    /// Usable in battle: the effect allows it and a use is left.
    pub fn is_battle_usable(&self) -> bool {
        let effect_allows = self
            .effect
            .as_ref()
            .map_or(false, |effect| effect.is_battle_usable());
        effect_allows && (self.uses_remaining > 0 || self.has_unlimited_uses())
    }

    pub fn is_map_usable(&self) -> bool {
        self.effect
            .as_ref()
            .map_or(false, |effect| effect.is_map_usable())
    }

    fn is_consumable(&self) -> bool {
        self.effect
            .as_ref()
            .map_or(false, |effect| effect.is_consumable())
    }

    /// Whether this item should leave a container.
    ///
    /// `regenerating_slot` tells whether the candidate container treats the
    /// item's slot as use-regenerating; pass `false` when there is no
    /// container. Pure: enforcement lives on the inventories.
    pub fn should_discard(&self, regenerating_slot: bool) -> bool {
        if self.uses_remaining > 0 || self.has_unlimited_uses() {
            return false;
        }
        if self.category() == ItemCategory::Ability {
            return false;
        }
        !(regenerating_slot && self.uses_when_added > 0)
    }

    /// Whether uses come back at rest points under the per-item rule.
    pub fn can_restore_uses(&self, mode: GameMode) -> bool {
        match mode {
            GameMode::Casual => !self.has_unlimited_uses(),
            GameMode::Standard => {
                self.category() == ItemCategory::Ability && !self.has_unlimited_uses()
            }
        }
    }

    /// Whether a plain inventory (not equipment) recharges this item.
    pub fn can_restore_uses_from_inventory(&self, mode: GameMode) -> bool {
        mode == GameMode::Casual && self.effect.is_some() && !self.is_consumable()
    }

    // === Mutations ===

    pub(crate) fn on_added_to(&mut self, container: Option<InventoryId>, first_equip: bool) {
        self.container = container;
        if first_equip {
            self.uses_when_added = self.uses_remaining;
        }
    }

    /// Spend one use. Does nothing at zero.
    pub fn deduct_use(&mut self) {
        if self.uses_remaining > 0 {
            self.uses_remaining -= 1;
        }
    }

    /// Recharge: to the first-equip snapshot in casual mode, to the maximum
    /// otherwise.
    pub fn restore_uses(&mut self, mode: GameMode) {
        self.uses_remaining = match mode {
            GameMode::Casual => self.uses_when_added,
            GameMode::Standard => self.definition.uses,
        };
    }

    /// Halve the remaining uses and make that the new recharge target.
    pub fn halve_uses(&mut self) {
        self.uses_remaining /= 2;
        self.uses_when_added = self.uses_remaining;
    }

    /// Recharge to the maximum and make that the new snapshot.
    pub fn apply_full_recharge(&mut self) {
        self.uses_remaining = self.definition.uses;
        self.uses_when_added = self.definition.uses;
    }

    /// Use the item outside of battle.
    ///
    /// Failures are logged and reported as "not used". Use counts are left
    /// alone; the container deducts after a successful use.
    pub async fn use_on_map(&self, user: &mut StatSet) -> bool {
        let Some(effect) = self.effect.as_ref() else {
            tracing::error!("Cannot use {}: it has no effect", self.name());
            return false;
        };
        match effect.use_on_map(user).await {
            Ok(used) => used,
            Err(e) => {
                tracing::error!("Error using {}: {}", self.name(), e);
                false
            }
        }
    }

    // === Ordering ===

    /// Sort rank used when organizing: stat candy, other map-usable items,
    /// then everything else.
    pub fn organize_rank(&self) -> u8 {
        match (self.is_map_usable(), self.effect_kind()) {
            (true, Some(EffectKind::StatCandy)) => 0,
            (true, _) => 1,
            (false, _) => 2,
        }
    }

    /// Ordering used by [`crate::Inventory::organize`].
    pub fn compare_for_organize(&self, other: &CombatItem) -> Ordering {
        self.organize_rank().cmp(&other.organize_rank())
    }

    // === Descriptions ===

    /// Multi-line description for the item inspection screen.
    pub fn extended_description(
        &self,
        owner: Option<Race>,
        regenerating: bool,
        reserved: bool,
    ) -> String {
        let mut desc = format!("{}: {}", self.category().label(), self.name());
        if !self.has_unlimited_uses() {
            desc += &format!("\nUses: {} before ", self.uses_remaining);
            desc += if regenerating {
                "requiring recharge at an inn,"
            } else {
                "breaking,"
            };
            let max = if owner == Some(Race::Robot) {
                self.uses_when_added
            } else {
                self.max_uses()
            };
            desc += &format!(" max {} uses", max);
        }

        if !self.stat_bonus().is_empty() {
            desc += &format!("\nRobot stat bonus: {}", self.stat_bonus().one_liner());
        }

        match owner {
            Some(Race::Robot) if !self.has_unlimited_uses() => {
                desc += "\nRobot item: uses halved on transfer, but recharged at inns";
            }
            Some(Race::Mutant) if regenerating && !self.has_unlimited_uses() => {
                desc += "\nMutant ability: recharges at inns, replaceable with new mutation";
            }
            Some(Race::Mutant) if reserved => {
                desc += "\nMutant ability: replaceable with new mutation";
            }
            Some(Race::Monster) if !self.has_unlimited_uses() => {
                desc += "\nMonster ability: recharges at inns, replaced when assuming new form";
            }
            Some(Race::Monster) => {
                desc += "\nMonster ability: replaced when assuming new form";
            }
            _ => {}
        }

        if let Some(effect) = self.effect.as_ref() {
            desc += "\n";
            desc += &effect.describe();
        }
        desc
    }
}

impl std::fmt::Display for CombatItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}/{})", self.name(), self.uses_remaining, self.max_uses())
    }
}
