//! Stat identifiers.

use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoStaticStr};

/// Every stat or flag a unit, item or modifier can carry.
///
/// The canonical name of a tag (`MHP`, `RESIST_FIRE`, ...) is what gets
/// persisted. Parsing accepts any letter case.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum StatTag {
    Mhp,
    Hp,

    Str,
    Agi,
    Def,
    Mana,
    /// Mana that only counts toward defense.
    ManaDefense,

    ResistDamage,
    ResistWeapon,
    ImmuneRanged,
    ImmuneWeapon,

    ResistBlind,
    ResistCurse,
    ResistConfuse,
    ResistSleep,
    ResistParalyze,
    ResistStone,
    ResistDeath,
    ResistPoison,
    ResistCriticals,

    ResistFire,
    ResistIce,
    ResistThunder,
    ResistEarth,
    ResistTypeless,

    WeakFire,
    WeakIce,
    WeakThunder,
    WeakEarth,
    Undead,

    Ambusher,
    NoAmbush,

    Regenerating,
    Refreshing,

    /// Equipment cannot be changed by the player.
    EquipmentFix,

    None,
}

impl StatTag {
    /// The canonical persisted name, e.g. `"RESIST_FIRE"`.
    pub fn code(&self) -> &'static str {
        self.into()
    }

    /// Human-readable label used in summaries.
    pub fn label(&self) -> &'static str {
        match self {
            StatTag::Mhp => "MHP",
            StatTag::Hp => "HP",
            StatTag::Str => "STR",
            StatTag::Agi => "AGI",
            StatTag::Def => "DEF",
            StatTag::Mana => "MANA",
            StatTag::ManaDefense => "Mana (defense only)",
            StatTag::ResistDamage => "Physical damage resistance",
            StatTag::ResistWeapon => "Weapon damage resistance",
            StatTag::ImmuneRanged => "Projectile immunity",
            StatTag::ImmuneWeapon => "Weapon damage immunity",
            StatTag::ResistBlind => "Blindness immunity",
            StatTag::ResistCurse => "Curse immunity",
            StatTag::ResistConfuse => "Confusion immunity",
            StatTag::ResistSleep => "Sleep immunity",
            StatTag::ResistParalyze => "Paralysis immunity",
            StatTag::ResistStone => "Petrification immunity",
            StatTag::ResistDeath => "Instadeath immunity",
            StatTag::ResistPoison => "Poison immunity",
            StatTag::ResistCriticals => "Critical hit immunity",
            StatTag::ResistFire => "Fire immunity",
            StatTag::ResistIce => "Ice immunity",
            StatTag::ResistThunder => "Thunder immunity",
            StatTag::ResistEarth => "Earth immunity",
            StatTag::ResistTypeless => "Typeless damage resistance",
            StatTag::WeakFire => "Fire vulnerability",
            StatTag::WeakIce => "Ice vulnerability",
            StatTag::WeakThunder => "Thunder vulnerability",
            StatTag::WeakEarth => "Earth vulnerability",
            StatTag::Undead => "Undead",
            StatTag::Ambusher => "Ambush encounter chance",
            StatTag::NoAmbush => "Ambush encounter prevention",
            StatTag::Regenerating => "Regeneration",
            StatTag::Refreshing => "Status autohealing",
            StatTag::EquipmentFix => "Equipment fix",
            StatTag::None => "(none)",
        }
    }
}

impl std::fmt::Display for StatTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
