//! Fixed-capacity slot inventories.
//!
//! Every slot change goes through [`Inventory::set_slot`], which applies the
//! discard policy to both the incoming and the outgoing item and keeps the
//! items' container links up to date. Bulk operations (`add`, `drop_*`,
//! `organize`) are built on top of it.

mod equipment;
mod policy;

pub use equipment::*;
pub use policy::*;

use serde::{Deserialize, Serialize};
use stat_rules::StatSet;
use uuid::Uuid;

use crate::catalog::ItemCatalog;
use crate::config::GameMode;
use crate::error::{CatalogError, NoRoom, SlotOutOfRange};
use crate::item::{CombatItem, ItemId, SavedCombatItem};

/// Identity of an inventory, used as an item's container link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InventoryId(pub Uuid);

impl InventoryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for InventoryId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for InventoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An inventory as stored in save data. Empty slots keep their position.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavedInventory {
    pub slots: Vec<Option<SavedCombatItem>>,
}

/// A fixed number of item slots.
#[derive(Debug)]
pub struct Inventory {
    id: InventoryId,
    slots: Vec<Option<CombatItem>>,
    policy: SlotPolicy,
    mode: GameMode,
}

impl Inventory {
    /// Create an empty inventory with the default slot policy.
    pub fn new(capacity: usize, mode: GameMode) -> Self {
        Self {
            id: InventoryId::new(),
            slots: (0..capacity).map(|_| None).collect(),
            policy: SlotPolicy::default(),
            mode,
        }
    }

    /// Replace the default slot policy.
    pub fn with_policy(mut self, policy: SlotPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Fill an inventory from positional contents. Items beyond the capacity
    /// are ignored.
    pub fn from_items(
        capacity: usize,
        items: impl IntoIterator<Item = Option<CombatItem>>,
        first_equip: bool,
        mode: GameMode,
    ) -> Self {
        let mut inventory = Self::new(capacity, mode);
        for (slot, item) in items.into_iter().take(capacity).enumerate() {
            if item.is_some() {
                inventory.set_slot(slot, item, first_equip);
            }
        }
        inventory
    }

    /// Fill an inventory with fresh items built from definition keys.
    pub fn from_definitions<'a>(
        capacity: usize,
        keys: impl IntoIterator<Item = Option<&'a str>>,
        catalog: &ItemCatalog,
        mode: GameMode,
    ) -> Result<Self, CatalogError> {
        let items = instantiate(keys, catalog)?;
        Ok(Self::from_items(capacity, items, true, mode))
    }

    /// Rehydrate an inventory from save data. Fails if any slot names an
    /// unknown definition.
    pub fn from_saved(
        saved: &SavedInventory,
        catalog: &ItemCatalog,
        mode: GameMode,
    ) -> Result<Self, CatalogError> {
        let items = rehydrate(saved, catalog)?;
        Ok(Self::from_items(saved.slots.len(), items, false, mode))
    }

    pub fn to_saved(&self) -> SavedInventory {
        SavedInventory {
            slots: self
                .slots
                .iter()
                .map(|slot| slot.as_ref().map(CombatItem::to_saved))
                .collect(),
        }
    }

    // === Accessors ===

    pub fn id(&self) -> InventoryId {
        self.id
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Switch game mode. Stored use counts are left as they are.
    pub fn set_mode(&mut self, mode: GameMode) {
        self.mode = mode;
    }

    pub fn policy(&self) -> SlotPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: SlotPolicy) {
        self.policy = policy;
    }

    pub fn get(&self, slot: usize) -> Option<&CombatItem> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Mutable access to an occupant. Changes made here bypass the discard
    /// policy; see [`Inventory::discard_if_needed`].
    pub fn get_mut(&mut self, slot: usize) -> Option<&mut CombatItem> {
        self.slots.get_mut(slot).and_then(Option::as_mut)
    }

    /// All slots, empty ones included.
    pub fn slots(&self) -> &[Option<CombatItem>] {
        &self.slots
    }

    /// Occupied slots with their index.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &CombatItem)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, item)| item.as_ref().map(|item| (slot, item)))
    }

    pub fn occupied_slots(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    fn check_slot(&self, slot: usize) -> bool {
        if slot < self.capacity() {
            true
        } else {
            tracing::warn!(
                "Out of bounds inventory slot {} (capacity {})",
                slot,
                self.capacity()
            );
            false
        }
    }

    // === Policy queries ===

    /// Whether `slot` is skipped by [`Inventory::add`].
    pub fn is_slot_reserved_at(&self, slot: usize) -> bool {
        self.policy.is_reserved(slot)
    }

    /// Whether the occupant of `slot` recharges at rest points.
    pub fn is_use_regenerating_at(&self, slot: usize) -> bool {
        slot < self.capacity() && self.policy.is_regenerating(self.get(slot), self.mode)
    }

    /// Whether `item` would be discarded if it sat in this inventory.
    pub fn would_discard(&self, item: &CombatItem) -> bool {
        item.should_discard(self.policy.is_regenerating(Some(item), self.mode))
    }

    // === Lookups ===

    /// Gold value of the occupant, zero for an empty slot.
    pub fn gold_value_at(&self, slot: usize) -> u32 {
        self.get(slot).map_or(0, CombatItem::gold_value)
    }

    pub fn slot_for_item(&self, id: ItemId) -> Option<usize> {
        self.iter()
            .find(|(_, item)| item.id() == id)
            .map(|(slot, _)| slot)
    }

    /// First slot holding an item built from the given definition.
    pub fn slot_for_item_type(&self, key: &str) -> Option<usize> {
        self.iter()
            .find(|(_, item)| item.key() == key)
            .map(|(slot, _)| slot)
    }

    pub fn contains_item_type(&self, key: &str) -> bool {
        self.slot_for_item_type(key).is_some()
    }

    /// True when no empty, unreserved slot is left.
    pub fn is_full(&self) -> bool {
        self.first_free_slot().is_none()
    }

    fn first_free_slot(&self) -> Option<usize> {
        (0..self.capacity()).find(|&slot| self.slots[slot].is_none() && !self.is_slot_reserved_at(slot))
    }

    pub fn string_for_slot(&self, slot: usize) -> String {
        match self.get(slot) {
            Some(item) => item.to_string(),
            None => "(empty)".to_string(),
        }
    }

    // === Slot transitions ===

    /// Put `item` into `slot` and return the previous occupant.
    ///
    /// A discard-eligible incoming item is treated as nothing, and a
    /// discard-eligible outgoing item is treated as already gone. An
    /// out-of-range slot leaves the inventory untouched and drops `item`;
    /// use [`Inventory::try_set_slot`] to get it back.
    pub fn set_slot(
        &mut self,
        slot: usize,
        item: Option<CombatItem>,
        first_equip: bool,
    ) -> Option<CombatItem> {
        self.try_set_slot(slot, item, first_equip).unwrap_or_default()
    }

    /// Like [`Inventory::set_slot`], but an out-of-range slot hands the
    /// incoming item back.
    pub fn try_set_slot(
        &mut self,
        slot: usize,
        item: Option<CombatItem>,
        first_equip: bool,
    ) -> Result<Option<CombatItem>, SlotOutOfRange> {
        if !self.check_slot(slot) {
            return Err(SlotOutOfRange { slot, item });
        }

        let mut incoming = item.filter(|item| {
            let discard = self.would_discard(item);
            if discard {
                tracing::debug!("Discarding spent {} instead of storing it", item.name());
            }
            !discard
        });
        let mut outgoing = self.slots[slot].take().filter(|item| {
            let discard = item.should_discard(false);
            if discard {
                tracing::debug!("Spent {} leaves slot {}", item.name(), slot);
            }
            !discard
        });

        if let Some(old) = outgoing.as_mut() {
            old.on_added_to(None, first_equip);
        }
        if let Some(new) = incoming.as_mut() {
            new.on_added_to(Some(self.id), first_equip);
        }
        self.slots[slot] = incoming;
        Ok(outgoing)
    }

    /// Place an item in the first empty unreserved slot.
    pub fn add(&mut self, item: CombatItem) -> Result<usize, NoRoom> {
        match self.first_free_slot() {
            Some(slot) => {
                self.set_slot(slot, Some(item), true);
                Ok(slot)
            }
            None => Err(NoRoom(item)),
        }
    }

    /// Empty `slot`, returning its occupant unless it was spent.
    pub fn drop_slot(&mut self, slot: usize) -> Option<CombatItem> {
        self.set_slot(slot, None, true)
    }

    /// Remove the item with the given identity, wherever it sits.
    pub fn drop_item(&mut self, id: ItemId) -> Option<CombatItem> {
        let slot = self.slot_for_item(id)?;
        self.drop_slot(slot)
    }

    /// Drop the first item built from the given definition. Returns whether
    /// a slot was cleared.
    pub fn drop_item_type(&mut self, key: &str) -> bool {
        match self.slot_for_item_type(key) {
            Some(slot) => {
                self.drop_slot(slot);
                true
            }
            None => false,
        }
    }

    /// Exchange two slots directly, without discard checks.
    pub fn swap(&mut self, first: usize, second: usize) {
        if self.check_slot(first) && self.check_slot(second) {
            self.slots.swap(first, second);
        }
    }

    /// Compact every item to the front, map-usable items first.
    pub fn organize(&mut self) {
        let mut compacted: Vec<CombatItem> = self.slots.iter_mut().filter_map(Option::take).collect();
        compacted.sort_by(CombatItem::compare_for_organize);
        for (slot, item) in compacted.into_iter().enumerate() {
            self.slots[slot] = Some(item);
        }
    }

    /// Recharge every occupant that recharges from a plain inventory.
    pub fn restore_ability_uses(&mut self) {
        let mode = self.mode;
        for item in self.slots.iter_mut().flatten() {
            if item.can_restore_uses_from_inventory(mode) {
                item.restore_uses(mode);
            }
        }
    }

    // === Enforcement ===

    /// Remove the occupant of `slot` if it is discard-eligible here.
    /// Returns the discarded item.
    pub fn discard_if_needed(&mut self, slot: usize) -> Option<CombatItem> {
        let eligible = self.get(slot).map_or(false, |item| self.would_discard(item));
        if !eligible {
            return None;
        }
        let mut discarded = self.slots[slot].take()?;
        tracing::debug!("{} used up, removing it from slot {}", discarded.name(), slot);
        discarded.on_added_to(None, false);
        Some(discarded)
    }

    /// Spend one use of the occupant, discarding it if that used it up.
    pub fn deduct_use_at(&mut self, slot: usize) -> Option<CombatItem> {
        if !self.check_slot(slot) {
            return None;
        }
        self.get_mut(slot)?.deduct_use();
        self.discard_if_needed(slot)
    }

    /// Halve the occupant's uses, discarding it if none remain.
    pub fn halve_uses_at(&mut self, slot: usize) -> Option<CombatItem> {
        if !self.check_slot(slot) {
            return None;
        }
        self.get_mut(slot)?.halve_uses();
        self.discard_if_needed(slot)
    }

    /// Use the occupant outside of battle on `user`.
    ///
    /// A use is only deducted once the effect reports success, and only for
    /// consumable effects.
    pub async fn use_on_map_at(&mut self, slot: usize, user: &mut StatSet) -> bool {
        if !self.check_slot(slot) {
            return false;
        }
        let Some(item) = self.get(slot) else {
            return false;
        };
        let consumes = item
            .effect()
            .map_or(false, |effect| effect.is_consumable());
        let used = item.use_on_map(user).await;
        if used && consumes {
            self.deduct_use_at(slot);
        }
        used
    }
}

pub(crate) fn instantiate<'a>(
    keys: impl IntoIterator<Item = Option<&'a str>>,
    catalog: &ItemCatalog,
) -> Result<Vec<Option<CombatItem>>, CatalogError> {
    keys.into_iter()
        .map(|key| key.map(|key| catalog.create(key)).transpose())
        .collect()
}

pub(crate) fn rehydrate(
    saved: &SavedInventory,
    catalog: &ItemCatalog,
) -> Result<Vec<Option<CombatItem>>, CatalogError> {
    saved
        .slots
        .iter()
        .map(|slot| {
            slot.as_ref()
                .map(|item| CombatItem::from_saved(item, catalog))
                .transpose()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{EffectSpec, ItemCategory, ItemDefinition};
    use stat_rules::StatTag;

    fn catalog() -> ItemCatalog {
        let mut catalog = ItemCatalog::new();
        for definition in [
            ItemDefinition::new("potion", "Potion", ItemCategory::Consumable)
                .with_uses(3)
                .with_cost(30)
                .with_effect(EffectSpec::Heal { amount: 10.0 }),
            ItemDefinition::new("sword", "Sword", ItemCategory::Weapon)
                .with_cost(100)
                .with_effect(EffectSpec::Attack { power: 4 }),
            ItemDefinition::new("candy", "Power candy", ItemCategory::Consumable)
                .with_uses(1)
                .with_effect(EffectSpec::StatCandy {
                    stat: StatTag::Str,
                    amount: 1.0,
                }),
            ItemDefinition::new("bolt", "Bolt", ItemCategory::Ability)
                .with_uses(4)
                .with_effect(EffectSpec::Attack { power: 6 }),
            ItemDefinition::new("gun", "Gun", ItemCategory::Weapon)
                .with_uses(6)
                .with_effect(EffectSpec::Attack { power: 8 }),
        ] {
            catalog.insert(definition).unwrap();
        }
        catalog
    }

    #[test]
    fn test_new_inventory_is_empty() {
        let inventory = Inventory::new(4, GameMode::Standard);
        assert_eq!(inventory.capacity(), 4);
        assert_eq!(inventory.occupied_slots(), 0);
        assert_eq!(inventory.string_for_slot(2), "(empty)");
        assert!(!inventory.is_full());
    }

    #[test]
    fn test_set_slot_returns_previous_occupant() {
        let catalog = catalog();
        let mut inventory = Inventory::new(3, GameMode::Standard);

        assert!(inventory.set_slot(1, Some(catalog.create("sword").unwrap()), true).is_none());
        let sword = inventory.get(1).unwrap();
        assert_eq!(sword.container(), Some(inventory.id()));

        let previous = inventory
            .set_slot(1, Some(catalog.create("potion").unwrap()), true)
            .unwrap();
        assert_eq!(previous.name(), "Sword");
        assert!(previous.container().is_none());
        assert_eq!(inventory.string_for_slot(1), "Potion (3/3)");
    }

    #[test]
    fn test_set_slot_out_of_range_is_noop() {
        let catalog = catalog();
        let mut inventory = Inventory::new(2, GameMode::Standard);
        assert!(inventory.set_slot(5, Some(catalog.create("sword").unwrap()), true).is_none());
        assert_eq!(inventory.occupied_slots(), 0);
        assert!(inventory.get(5).is_none());
    }

    #[test]
    fn test_try_set_slot_out_of_range_hands_item_back() {
        let catalog = catalog();
        let mut inventory = Inventory::new(2, GameMode::Standard);
        let sword = catalog.create("sword").unwrap();
        let id = sword.id();

        let err = inventory.try_set_slot(2, Some(sword), true).unwrap_err();
        assert_eq!(err.slot, 2);
        assert_eq!(err.into_item().unwrap().id(), id);
        assert_eq!(inventory.occupied_slots(), 0);

        let placed = inventory.try_set_slot(1, Some(catalog.create("sword").unwrap()), true);
        assert!(placed.unwrap().is_none());
        assert_eq!(inventory.occupied_slots(), 1);
    }

    #[test]
    fn test_spent_item_is_not_stored() {
        let catalog = catalog();
        let mut inventory = Inventory::new(2, GameMode::Standard);
        let mut candy = catalog.create("candy").unwrap();
        candy.deduct_use();

        assert_eq!(inventory.add(candy).unwrap(), 0);
        assert!(inventory.get(0).is_none());
    }

    #[test]
    fn test_add_skips_reserved_slots() {
        let catalog = catalog();
        let mut inventory = Inventory::new(4, GameMode::Standard)
            .with_policy(SlotPolicy::new(Reservation::Below(2), Regeneration::PerItem));

        assert_eq!(inventory.add(catalog.create("sword").unwrap()).unwrap(), 2);
        assert_eq!(inventory.add(catalog.create("potion").unwrap()).unwrap(), 3);
        assert!(inventory.is_full());

        let rejected = inventory.add(catalog.create("gun").unwrap()).unwrap_err();
        assert_eq!(rejected.into_item().name(), "Gun");
        assert!(inventory.get(0).is_none());
        assert!(inventory.get(1).is_none());
        assert_eq!(inventory.occupied_slots(), 2);
    }

    #[test]
    fn test_drop_by_identity_and_type() {
        let catalog = catalog();
        let mut inventory = Inventory::new(3, GameMode::Standard);
        inventory.add(catalog.create("sword").unwrap()).unwrap();
        let potion = catalog.create("potion").unwrap();
        let potion_id = potion.id();
        inventory.add(potion).unwrap();

        assert_eq!(inventory.slot_for_item(potion_id), Some(1));
        let dropped = inventory.drop_item(potion_id).unwrap();
        assert_eq!(dropped.id(), potion_id);
        assert!(inventory.drop_item(potion_id).is_none());

        assert!(inventory.contains_item_type("sword"));
        assert!(inventory.drop_item_type("sword"));
        assert!(!inventory.drop_item_type("sword"));
        assert_eq!(inventory.occupied_slots(), 0);
    }

    #[test]
    fn test_swap() {
        let catalog = catalog();
        let mut inventory = Inventory::new(3, GameMode::Standard);
        inventory.add(catalog.create("sword").unwrap()).unwrap();
        inventory.swap(0, 2);
        assert!(inventory.get(0).is_none());
        assert_eq!(inventory.get(2).unwrap().name(), "Sword");

        inventory.swap(2, 9);
        assert_eq!(inventory.get(2).unwrap().name(), "Sword");
    }

    #[test]
    fn test_organize_orders_map_usable_first() {
        let catalog = catalog();
        let mut inventory = Inventory::new(5, GameMode::Standard);
        inventory.set_slot(0, Some(catalog.create("potion").unwrap()), true);
        inventory.set_slot(2, Some(catalog.create("sword").unwrap()), true);
        inventory.set_slot(4, Some(catalog.create("candy").unwrap()), true);

        inventory.organize();

        let names: Vec<_> = inventory
            .slots()
            .iter()
            .map(|slot| slot.as_ref().map(|item| item.name().to_string()))
            .collect();
        assert_eq!(
            names,
            vec![
                Some("Power candy".to_string()),
                Some("Potion".to_string()),
                Some("Sword".to_string()),
                None,
                None,
            ]
        );
    }

    #[test]
    fn test_organize_keeps_equal_ranks_stable() {
        let catalog = catalog();
        let mut inventory = Inventory::new(4, GameMode::Standard);
        inventory.set_slot(1, Some(catalog.create("gun").unwrap()), true);
        inventory.set_slot(3, Some(catalog.create("sword").unwrap()), true);

        inventory.organize();
        assert_eq!(inventory.get(0).unwrap().name(), "Gun");
        assert_eq!(inventory.get(1).unwrap().name(), "Sword");
    }

    #[test]
    fn test_last_use_in_plain_inventory_discards() {
        let catalog = catalog();
        let mut inventory = Inventory::new(2, GameMode::Standard);
        let slot = inventory.add(catalog.create("candy").unwrap()).unwrap();

        let discarded = inventory.deduct_use_at(slot).unwrap();
        assert_eq!(discarded.name(), "Power candy");
        assert!(discarded.container().is_none());
        assert!(inventory.get(slot).is_none());
    }

    #[test]
    fn test_deduct_use_keeps_item_with_uses_left() {
        let catalog = catalog();
        let mut inventory = Inventory::new(2, GameMode::Standard);
        inventory.add(catalog.create("potion").unwrap()).unwrap();

        assert!(inventory.deduct_use_at(0).is_none());
        assert_eq!(inventory.get(0).unwrap().uses_remaining(), 2);
        assert_eq!(inventory.gold_value_at(0), 20);
        assert_eq!(inventory.gold_value_at(1), 0);
    }

    #[test]
    fn test_casual_regenerating_slot_keeps_spent_consumable() {
        let catalog = catalog();
        let mut inventory = Inventory::new(2, GameMode::Casual);
        let mut potion = catalog.create("potion").unwrap();
        potion.deduct_use();
        potion.deduct_use();
        inventory.add(potion).unwrap();
        assert_eq!(inventory.get(0).unwrap().uses_when_added(), 1);
        assert!(inventory.is_use_regenerating_at(0));

        assert!(inventory.deduct_use_at(0).is_none());
        assert_eq!(inventory.get(0).unwrap().uses_remaining(), 0);

        let mut standard = Inventory::new(2, GameMode::Standard);
        let mut potion = catalog.create("potion").unwrap();
        potion.deduct_use();
        potion.deduct_use();
        standard.add(potion).unwrap();
        assert!(!standard.is_use_regenerating_at(0));
        assert!(standard.deduct_use_at(0).is_some());
    }

    #[test]
    fn test_abilities_survive_running_out() {
        let catalog = catalog();
        let mut inventory = Inventory::new(1, GameMode::Standard);
        inventory.add(catalog.create("bolt").unwrap()).unwrap();
        for _ in 0..4 {
            assert!(inventory.deduct_use_at(0).is_none());
        }
        assert_eq!(inventory.get(0).unwrap().uses_remaining(), 0);
    }

    #[test]
    fn test_halve_uses_at() {
        let catalog = catalog();
        let mut inventory = Inventory::new(1, GameMode::Standard);
        inventory.add(catalog.create("gun").unwrap()).unwrap();

        assert!(inventory.halve_uses_at(0).is_none());
        assert_eq!(inventory.get(0).unwrap().uses_remaining(), 3);
        inventory.halve_uses_at(0);
        assert_eq!(inventory.get(0).unwrap().uses_remaining(), 1);
        assert!(inventory.halve_uses_at(0).is_some());
        assert!(inventory.get(0).is_none());
    }

    #[test]
    fn test_restore_ability_uses() {
        let catalog = catalog();
        let mut inventory = Inventory::new(3, GameMode::Casual);
        inventory.add(catalog.create("bolt").unwrap()).unwrap();
        inventory.add(catalog.create("potion").unwrap()).unwrap();
        inventory.deduct_use_at(0);
        inventory.deduct_use_at(1);

        inventory.restore_ability_uses();
        assert_eq!(inventory.get(0).unwrap().uses_remaining(), 4);
        assert_eq!(inventory.get(1).unwrap().uses_remaining(), 2);
    }

    #[test]
    fn test_saved_round_trip_keeps_positions() {
        let catalog = catalog();
        let mut inventory = Inventory::new(4, GameMode::Standard);
        inventory.set_slot(1, Some(catalog.create("potion").unwrap()), true);
        inventory.set_slot(3, Some(catalog.create("sword").unwrap()), true);
        inventory.deduct_use_at(1);

        let json = serde_json::to_string(&inventory.to_saved()).unwrap();
        let saved: SavedInventory = serde_json::from_str(&json).unwrap();
        let restored = Inventory::from_saved(&saved, &catalog, GameMode::Standard).unwrap();

        assert_eq!(restored.capacity(), 4);
        assert!(restored.get(0).is_none());
        assert_eq!(restored.get(1).unwrap().uses_remaining(), 2);
        assert_eq!(restored.get(1).unwrap().uses_when_added(), 3);
        assert_eq!(restored.get(3).unwrap().name(), "Sword");
        assert_eq!(restored.to_saved(), saved);
    }

    #[test]
    fn test_from_definitions_snapshots_fresh_items() {
        let inventory = Inventory::from_definitions(
            4,
            [None, Some("potion"), Some("gun")],
            &catalog(),
            GameMode::Casual,
        )
        .unwrap();
        assert!(inventory.get(0).is_none());
        assert_eq!(inventory.get(1).unwrap().uses_when_added(), 3);
        assert_eq!(inventory.string_for_slot(2), "Gun (6/6)");
        assert_eq!(inventory.occupied_slots(), 2);
    }

    #[test]
    fn test_from_saved_fails_on_unknown_item() {
        let saved = SavedInventory {
            slots: vec![
                None,
                Some(SavedCombatItem {
                    data_key: "elixir".into(),
                    uses_when_added: 1,
                    uses_remaining: 1,
                }),
            ],
        };
        assert!(matches!(
            Inventory::from_saved(&saved, &catalog(), GameMode::Standard),
            Err(CatalogError::UnknownDefinition(_))
        ));
    }

    #[tokio::test]
    async fn test_use_on_map_deducts_after_success() {
        let catalog = catalog();
        let mut inventory = Inventory::new(2, GameMode::Standard);
        inventory.add(catalog.create("candy").unwrap()).unwrap();
        inventory.add(catalog.create("potion").unwrap()).unwrap();
        let mut user = StatSet::from_pairs([(StatTag::Mhp, 20.0), (StatTag::Hp, 20.0)]);

        assert!(inventory.use_on_map_at(0, &mut user).await);
        assert_eq!(user.get(StatTag::Str), 1.0);
        assert!(inventory.get(0).is_none());

        // Healing at full health is declined and costs nothing.
        assert!(!inventory.use_on_map_at(1, &mut user).await);
        assert_eq!(inventory.get(1).unwrap().uses_remaining(), 3);
    }
}
