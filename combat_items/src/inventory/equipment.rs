//! Equipment: an inventory whose contents feed back into its owner's stats.

use stat_rules::{StatSet, StatTag};

use super::{instantiate, rehydrate, Inventory, SavedInventory, SlotPolicy};
use crate::catalog::ItemCatalog;
use crate::config::RulesConfig;
use crate::error::{CatalogError, NoRoom, SlotOutOfRange};
use crate::item::{CombatItem, ItemId};
use crate::unit::Race;

/// Default number of equipment slots.
pub const EQUIPMENT_CAPACITY: usize = 8;

/// The entity an [`EquipmentInventory`] belongs to.
pub trait EquipmentOwner {
    fn race(&self) -> Race;

    fn stats(&self) -> &StatSet;

    fn stats_mut(&mut self) -> &mut StatSet;

    /// Called before `item` enters an equipment slot.
    fn on_equip(&mut self, item: &mut CombatItem, first_equip: bool);

    /// Called before `item` leaves an equipment slot.
    fn on_unequip(&mut self, item: &mut CombatItem, first_equip: bool);

    /// Reservation and regeneration rules for this owner's equipment.
    fn slot_policy(&self) -> SlotPolicy {
        SlotPolicy::for_owner(self.race(), self.stats().is(StatTag::EquipmentFix))
    }
}

/// Owner stats captured before a slot mutation.
struct Vitals {
    hp: f32,
    max_hp: f32,
}

impl Vitals {
    fn capture(owner: &impl EquipmentOwner) -> Self {
        Self {
            hp: owner.stats().get(StatTag::Hp),
            max_hp: owner.stats().get(StatTag::Mhp),
        }
    }

    /// Keep the owner's health, capped at the new max. An owner at full
    /// health stays at full health.
    fn rebalance(&self, owner: &mut impl EquipmentOwner) {
        let max_hp = owner.stats().get(StatTag::Mhp);
        let preserved = if self.hp >= self.max_hp { max_hp } else { self.hp };
        owner.stats_mut().set(StatTag::Hp, preserved.min(max_hp));
    }
}

/// An owner's equipped items.
///
/// The owner is passed to every operation that can change stats; its race
/// and flags decide the slot policy at that moment. Queries made through
/// [`EquipmentInventory::inventory`] see the policy as of the last call that
/// took the owner, or of [`EquipmentInventory::refresh_policy`].
#[derive(Debug)]
pub struct EquipmentInventory {
    inventory: Inventory,
}

impl EquipmentInventory {
    /// Empty equipment with the owner's slot policy.
    pub fn new(owner: &impl EquipmentOwner, config: &RulesConfig) -> Self {
        Self {
            inventory: Inventory::new(config.equipment_capacity, config.mode)
                .with_policy(owner.slot_policy()),
        }
    }

    /// Equip positional contents, running the owner's equip hooks.
    pub fn from_items(
        owner: &mut impl EquipmentOwner,
        items: impl IntoIterator<Item = Option<CombatItem>>,
        first_equip: bool,
        config: &RulesConfig,
    ) -> Self {
        let mut equipment = Self::new(&*owner, config);
        let capacity = equipment.inventory.capacity();
        for (slot, item) in items.into_iter().take(capacity).enumerate() {
            if item.is_some() {
                equipment.set_slot(owner, slot, item, first_equip);
            }
        }
        equipment
    }

    /// Equip fresh items built from definition keys.
    pub fn from_definitions<'a>(
        owner: &mut impl EquipmentOwner,
        keys: impl IntoIterator<Item = Option<&'a str>>,
        catalog: &ItemCatalog,
        config: &RulesConfig,
    ) -> Result<Self, CatalogError> {
        let items = instantiate(keys, catalog)?;
        Ok(Self::from_items(owner, items, true, config))
    }

    /// Rehydrate equipment from save data.
    pub fn from_saved(
        owner: &mut impl EquipmentOwner,
        saved: &SavedInventory,
        catalog: &ItemCatalog,
        config: &RulesConfig,
    ) -> Result<Self, CatalogError> {
        let items = rehydrate(saved, catalog)?;
        Ok(Self::from_items(owner, items, false, config))
    }

    pub fn to_saved(&self) -> SavedInventory {
        self.inventory.to_saved()
    }

    /// Read access to the underlying slots.
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn get(&self, slot: usize) -> Option<&CombatItem> {
        self.inventory.get(slot)
    }

    pub fn capacity(&self) -> usize {
        self.inventory.capacity()
    }

    /// Recompute the slot policy after the owner's race or flags changed.
    pub fn refresh_policy(&mut self, owner: &impl EquipmentOwner) {
        self.inventory.set_policy(owner.slot_policy());
    }

    // === Policy queries ===

    /// Whether `slot` is kept out of automatic filling for this owner.
    pub fn is_slot_reserved_at(&self, owner: &impl EquipmentOwner, slot: usize) -> bool {
        owner.slot_policy().is_reserved(slot)
    }

    /// Whether the occupant of `slot` recharges when this owner rests.
    pub fn is_use_regenerating_at(&self, owner: &impl EquipmentOwner, slot: usize) -> bool {
        slot < self.capacity()
            && owner
                .slot_policy()
                .is_regenerating(self.inventory.get(slot), self.inventory.mode())
    }

    // === Slot transitions ===

    /// Equip `item` in `slot`, returning what was there.
    ///
    /// Runs the owner's unequip/equip hooks around the base transition and
    /// then caps the owner's health at the new max health. Every occupant
    /// leaving the slot is unequipped, spent ones included. An out-of-range
    /// slot drops `item`; use [`EquipmentInventory::try_set_slot`] to get
    /// it back.
    pub fn set_slot(
        &mut self,
        owner: &mut impl EquipmentOwner,
        slot: usize,
        item: Option<CombatItem>,
        first_equip: bool,
    ) -> Option<CombatItem> {
        self.try_set_slot(owner, slot, item, first_equip)
            .unwrap_or_default()
    }

    /// Like [`EquipmentInventory::set_slot`], but an out-of-range slot hands
    /// the incoming item back.
    pub fn try_set_slot(
        &mut self,
        owner: &mut impl EquipmentOwner,
        slot: usize,
        item: Option<CombatItem>,
        first_equip: bool,
    ) -> Result<Option<CombatItem>, SlotOutOfRange> {
        self.refresh_policy(&*owner);
        if !self.inventory.check_slot(slot) {
            return Err(SlotOutOfRange { slot, item });
        }

        let mut incoming = item.filter(|item| !self.inventory.would_discard(item));
        let vitals = Vitals::capture(&*owner);

        if let Some(old) = self.inventory.slots[slot].as_mut() {
            owner.on_unequip(old, first_equip);
        }
        if let Some(new) = incoming.as_mut() {
            owner.on_equip(new, first_equip);
        }

        let previous = self.inventory.try_set_slot(slot, incoming, first_equip)?;
        vitals.rebalance(owner);
        Ok(previous)
    }

    /// Equip in the first free slot not reserved for this owner.
    pub fn add(&mut self, owner: &mut impl EquipmentOwner, item: CombatItem) -> Result<usize, NoRoom> {
        self.refresh_policy(&*owner);
        match self.inventory.first_free_slot() {
            Some(slot) => {
                self.set_slot(owner, slot, Some(item), true);
                Ok(slot)
            }
            None => Err(NoRoom(item)),
        }
    }

    /// Unequip `slot`, returning its occupant unless it was spent.
    pub fn drop_slot(&mut self, owner: &mut impl EquipmentOwner, slot: usize) -> Option<CombatItem> {
        self.set_slot(owner, slot, None, true)
    }

    /// Unequip the item with the given identity.
    pub fn drop_item(&mut self, owner: &mut impl EquipmentOwner, id: ItemId) -> Option<CombatItem> {
        let slot = self.inventory.slot_for_item(id)?;
        self.drop_slot(owner, slot)
    }

    /// Reorder two slots. Stats do not change.
    pub fn swap(&mut self, first: usize, second: usize) {
        self.inventory.swap(first, second);
    }

    /// Compact and sort. Stats do not change.
    pub fn organize(&mut self) {
        self.inventory.organize();
    }

    // === Enforcement ===

    /// Remove the occupant of `slot` if it is used up, taking its bonuses
    /// off the owner.
    pub fn discard_if_needed(
        &mut self,
        owner: &mut impl EquipmentOwner,
        slot: usize,
    ) -> Option<CombatItem> {
        self.refresh_policy(&*owner);
        let eligible = self
            .inventory
            .get(slot)
            .map_or(false, |item| self.inventory.would_discard(item));
        if !eligible {
            return None;
        }

        let vitals = Vitals::capture(&*owner);
        if let Some(item) = self.inventory.slots[slot].as_mut() {
            owner.on_unequip(item, false);
        }
        let discarded = self.inventory.discard_if_needed(slot);
        vitals.rebalance(owner);
        discarded
    }

    /// Spend a use of the occupant, returning it if that broke it.
    pub fn deduct_use_at(
        &mut self,
        owner: &mut impl EquipmentOwner,
        slot: usize,
    ) -> Option<CombatItem> {
        if !self.inventory.check_slot(slot) {
            return None;
        }
        self.inventory.get_mut(slot)?.deduct_use();
        self.discard_if_needed(owner, slot)
    }

    /// Halve the occupant's uses, e.g. as a penalty for moving it between
    /// owners.
    pub fn halve_uses_at(
        &mut self,
        owner: &mut impl EquipmentOwner,
        slot: usize,
    ) -> Option<CombatItem> {
        if !self.inventory.check_slot(slot) {
            return None;
        }
        self.inventory.get_mut(slot)?.halve_uses();
        self.discard_if_needed(owner, slot)
    }

    /// Recharge exactly the slots this owner regenerates.
    pub fn restore_ability_uses(&mut self, owner: &impl EquipmentOwner) {
        let policy = owner.slot_policy();
        let mode = self.inventory.mode();
        for item in self.inventory.slots.iter_mut().flatten() {
            if policy.is_regenerating(Some(item), mode) {
                item.restore_uses(mode);
            }
        }
    }

    // === Battle queries ===

    /// True if at least one equipped item can be used in battle right now.
    pub fn contains_battle_usable_items(&self) -> bool {
        self.inventory.iter().any(|(_, item)| item.is_battle_usable())
    }

    /// Items enemy AI may pick from.
    pub fn battle_usable_items(&self) -> Vec<&CombatItem> {
        self.inventory
            .iter()
            .map(|(_, item)| item)
            .filter(|item| item.is_battle_usable())
            .filter(|item| item.effect().map_or(false, |effect| effect.is_ai_usable()))
            .collect()
    }
}
