//! Units that own equipment.

use serde::{Deserialize, Serialize};
use stat_rules::{StatSet, StatTag};

use crate::config::RulesConfig;
use crate::error::NoRoom;
use crate::inventory::{EquipmentInventory, EquipmentOwner};
use crate::item::CombatItem;

/// Unit races. Race decides equipment rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Race {
    Human,
    /// First equipment slots hold innate mutations.
    Mutant,
    /// Gains item stat bonuses; every slot recharges at rest.
    Robot,
    /// Equipment is fixed to the current form.
    Monster,
}

/// A party member or enemy with a stat line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub name: String,
    pub race: Race,
    pub stats: StatSet,
}

impl Unit {
    pub fn new(name: impl Into<String>, race: Race, stats: StatSet) -> Self {
        Self {
            name: name.into(),
            race,
            stats,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.stats.get(StatTag::Hp) > 0.0
    }
}

impl EquipmentOwner for Unit {
    fn race(&self) -> Race {
        self.race
    }

    fn stats(&self) -> &StatSet {
        &self.stats
    }

    fn stats_mut(&mut self) -> &mut StatSet {
        &mut self.stats
    }

    fn on_equip(&mut self, item: &mut CombatItem, _first_equip: bool) {
        if self.race == Race::Robot {
            self.stats.add_set(item.stat_bonus());
        }
        tracing::debug!("{} equips {}", self.name, item.name());
    }

    fn on_unequip(&mut self, item: &mut CombatItem, _first_equip: bool) {
        if self.race == Race::Robot {
            self.stats.remove_set(item.stat_bonus());
        }
        tracing::debug!("{} unequips {}", self.name, item.name());
    }
}

/// A unit together with its equipment.
#[derive(Debug)]
pub struct Combatant {
    pub unit: Unit,
    pub equipment: EquipmentInventory,
}

impl Combatant {
    pub fn new(unit: Unit, config: &RulesConfig) -> Self {
        let equipment = EquipmentInventory::new(&unit, config);
        Self { unit, equipment }
    }

    /// Equip starting items, snapshotting their uses.
    pub fn with_starting_items(
        mut unit: Unit,
        items: impl IntoIterator<Item = CombatItem>,
        config: &RulesConfig,
    ) -> Self {
        let equipment = EquipmentInventory::from_items(&mut unit, items.into_iter().map(Some), true, config);
        Self { unit, equipment }
    }

    /// Equip into `slot`, returning the previous occupant.
    pub fn equip(&mut self, slot: usize, item: CombatItem) -> Option<CombatItem> {
        self.equipment.set_slot(&mut self.unit, slot, Some(item), true)
    }

    pub fn unequip(&mut self, slot: usize) -> Option<CombatItem> {
        self.equipment.drop_slot(&mut self.unit, slot)
    }

    pub fn pick_up(&mut self, item: CombatItem) -> Result<usize, NoRoom> {
        self.equipment.add(&mut self.unit, item)
    }

    /// Spend a use of the item in `slot`, returning it if it broke.
    pub fn spend_use(&mut self, slot: usize) -> Option<CombatItem> {
        self.equipment.deduct_use_at(&mut self.unit, slot)
    }

    /// Rest at an inn: recharge regenerating slots and heal fully.
    pub fn rest(&mut self) {
        self.equipment.restore_ability_uses(&self.unit);
        let max_hp = self.unit.stats.get(StatTag::Mhp);
        self.unit.stats.set(StatTag::Hp, max_hp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{EffectSpec, ItemCatalog, ItemCategory, ItemDefinition};

    fn catalog() -> ItemCatalog {
        let mut catalog = ItemCatalog::new();
        catalog
            .insert(
                ItemDefinition::new("plating", "Plating", ItemCategory::Armor)
                    .with_effect(EffectSpec::Passive)
                    .with_stat_bonus(StatSet::from_pairs([(StatTag::Def, 4.0), (StatTag::Mhp, 5.0)])),
            )
            .unwrap();
        catalog
            .insert(
                ItemDefinition::new("saw", "Saw", ItemCategory::Weapon)
                    .with_uses(2)
                    .with_effect(EffectSpec::Attack { power: 5 }),
            )
            .unwrap();
        catalog
    }

    #[test]
    fn test_unit_alive() {
        let mut unit = Unit::new("Ada", Race::Human, StatSet::from_pairs([(StatTag::Hp, 3.0)]));
        assert!(unit.is_alive());
        unit.stats.set(StatTag::Hp, 0.0);
        assert!(!unit.is_alive());
    }

    #[test]
    fn test_only_robots_gain_stat_bonuses() {
        let catalog = catalog();
        let config = RulesConfig::default();

        let mut robot = Combatant::new(Unit::new("Unit-7", Race::Robot, StatSet::new()), &config);
        robot.equip(0, catalog.create("plating").unwrap());
        assert_eq!(robot.unit.stats.get(StatTag::Def), 4.0);

        let mut human = Combatant::new(Unit::new("Ada", Race::Human, StatSet::new()), &config);
        human.equip(0, catalog.create("plating").unwrap());
        assert_eq!(human.unit.stats.get(StatTag::Def), 0.0);
    }

    #[test]
    fn test_starting_items_and_rest() {
        let catalog = catalog();
        let config = RulesConfig::default();
        let unit = Unit::new(
            "Unit-7",
            Race::Robot,
            StatSet::from_pairs([(StatTag::Mhp, 20.0), (StatTag::Hp, 20.0)]),
        );
        let mut combatant = Combatant::with_starting_items(
            unit,
            [catalog.create("plating").unwrap(), catalog.create("saw").unwrap()],
            &config,
        );
        assert_eq!(combatant.unit.stats.get(StatTag::Mhp), 25.0);
        assert_eq!(combatant.unit.stats.get(StatTag::Hp), 25.0);

        assert!(combatant.spend_use(1).is_none());
        assert!(combatant.spend_use(1).is_none());
        combatant.unit.stats.set(StatTag::Hp, 3.0);

        combatant.rest();
        assert_eq!(combatant.equipment.get(1).unwrap().uses_remaining(), 2);
        assert_eq!(combatant.unit.stats.get(StatTag::Hp), 25.0);
    }

    #[test]
    fn test_unequip_returns_item() {
        let catalog = catalog();
        let config = RulesConfig::default();
        let mut combatant = Combatant::new(Unit::new("Ada", Race::Human, StatSet::new()), &config);
        let slot = combatant.pick_up(catalog.create("saw").unwrap()).unwrap();
        let saw = combatant.unequip(slot).unwrap();
        assert_eq!(saw.name(), "Saw");
        assert!(combatant.equipment.get(slot).is_none());
    }
}
