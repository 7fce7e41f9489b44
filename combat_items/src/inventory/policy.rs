//! Slot policies: which slots are reserved and which recharge their occupant.

use serde::{Deserialize, Serialize};

use crate::config::GameMode;
use crate::item::CombatItem;
use crate::unit::Race;

/// Slots excluded from automatic filling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reservation {
    #[default]
    Open,
    /// Every slot is reserved.
    All,
    /// Slots below the given index are reserved.
    Below(usize),
}

impl Reservation {
    pub fn reserves(&self, slot: usize) -> bool {
        match self {
            Reservation::Open => false,
            Reservation::All => true,
            Reservation::Below(limit) => slot < *limit,
        }
    }
}

/// Which occupants get their uses back at rest points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regeneration {
    /// Decided by the occupant itself.
    #[default]
    PerItem,
    Always,
}

/// Reservation and regeneration rules of an inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SlotPolicy {
    pub reservation: Reservation,
    pub regeneration: Regeneration,
}

/// Mutants keep their innate abilities in the first slots.
pub const MUTANT_RESERVED_SLOTS: usize = 4;

impl SlotPolicy {
    pub const fn new(reservation: Reservation, regeneration: Regeneration) -> Self {
        Self {
            reservation,
            regeneration,
        }
    }

    /// Policy of an equipment inventory for an owner of the given race.
    pub fn for_owner(race: Race, equipment_fixed: bool) -> Self {
        let reservation = if equipment_fixed || race == Race::Monster {
            Reservation::All
        } else if race == Race::Mutant {
            Reservation::Below(MUTANT_RESERVED_SLOTS)
        } else {
            Reservation::Open
        };
        let regeneration = if race == Race::Robot {
            Regeneration::Always
        } else {
            Regeneration::PerItem
        };
        Self::new(reservation, regeneration)
    }

    /// Whether `slot` is excluded from automatic filling.
    pub fn is_reserved(&self, slot: usize) -> bool {
        self.reservation.reserves(slot)
    }

    /// Whether a slot holding `occupant` is use-regenerating.
    pub fn is_regenerating(&self, occupant: Option<&CombatItem>, mode: GameMode) -> bool {
        match self.regeneration {
            Regeneration::Always => true,
            Regeneration::PerItem => occupant.map_or(false, |item| item.can_restore_uses(mode)),
        }
    }
}
