//! Stat definitions and the registry that maps tags to them.
//!
//! A [`StatDefinition`] describes how values of one stat merge (its
//! [`Combinator`]) and how the stat is displayed. The [`StatRegistry`] is the
//! read-only table holding one definition per [`StatTag`].

mod tag;

pub use tag::*;

use std::collections::HashMap;
use std::sync::OnceLock;

/// Strategy for merging two values of the same stat and undoing the merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Combinator {
    #[default]
    Additive,
}

impl Combinator {
    /// The value that represents "no contribution".
    pub fn identity(&self) -> f32 {
        match self {
            Combinator::Additive => 0.0,
        }
    }

    /// Merge `delta` into `value`.
    pub fn combine(&self, value: f32, delta: f32) -> f32 {
        match self {
            Combinator::Additive => value + delta,
        }
    }

    /// Undo a previous `combine(_, delta)`.
    pub fn decombine(&self, value: f32, delta: f32) -> f32 {
        match self {
            Combinator::Additive => value - delta,
        }
    }
}

/// Display and combination metadata for a single stat.
#[derive(Debug, Clone, PartialEq)]
pub struct StatDefinition {
    pub tag: StatTag,
    pub combinator: Combinator,
    pub short_name: &'static str,
    pub long_name: Option<&'static str>,
    /// Flag stats are on/off markers rather than quantities.
    pub is_flag: bool,
}

impl StatDefinition {
    fn numeric(tag: StatTag, long_name: &'static str) -> Self {
        Self {
            tag,
            combinator: Combinator::Additive,
            short_name: tag.code(),
            long_name: Some(long_name),
            is_flag: false,
        }
    }

    fn flag(tag: StatTag) -> Self {
        Self {
            tag,
            combinator: Combinator::Additive,
            short_name: tag.code(),
            long_name: None,
            is_flag: true,
        }
    }

    /// Long name when present, otherwise the short name.
    pub fn display_name(&self) -> &'static str {
        self.long_name.unwrap_or(self.short_name)
    }
}

const NUMERIC_STATS: [(StatTag, &str); 7] = [
    (StatTag::Mhp, "Max health"),
    (StatTag::Hp, "Health"),
    (StatTag::Str, "Strength"),
    (StatTag::Agi, "Agility"),
    (StatTag::Def, "Defense"),
    (StatTag::Mana, "Mana"),
    (StatTag::ManaDefense, "Mana (def)"),
];

const FLAG_STATS: [StatTag; 28] = [
    StatTag::ResistDamage,
    StatTag::ResistWeapon,
    StatTag::ImmuneWeapon,
    StatTag::ImmuneRanged,
    StatTag::ResistBlind,
    StatTag::ResistCurse,
    StatTag::ResistConfuse,
    StatTag::ResistSleep,
    StatTag::ResistParalyze,
    StatTag::ResistStone,
    StatTag::ResistDeath,
    StatTag::ResistPoison,
    StatTag::ResistFire,
    StatTag::ResistIce,
    StatTag::ResistThunder,
    StatTag::ResistEarth,
    StatTag::ResistTypeless,
    StatTag::ResistCriticals,
    StatTag::WeakFire,
    StatTag::WeakIce,
    StatTag::WeakThunder,
    StatTag::WeakEarth,
    StatTag::Undead,
    StatTag::Ambusher,
    StatTag::NoAmbush,
    StatTag::Regenerating,
    StatTag::Refreshing,
    StatTag::EquipmentFix,
];

/// Read-only table of stat definitions.
///
/// Build one with [`StatRegistry::new`] and hand it to the stat sets that need
/// it, or use the shared [`StatRegistry::standard`] instance.
#[derive(Debug, Clone)]
pub struct StatRegistry {
    definitions: HashMap<StatTag, StatDefinition>,
}

impl StatRegistry {
    /// Build the full table. [`StatTag::None`] is deliberately left out.
    pub fn new() -> Self {
        let mut definitions = HashMap::new();
        for (tag, long_name) in NUMERIC_STATS {
            definitions.insert(tag, StatDefinition::numeric(tag, long_name));
        }
        for tag in FLAG_STATS {
            definitions.insert(tag, StatDefinition::flag(tag));
        }
        Self { definitions }
    }

    /// The process-wide registry, built on first use.
    pub fn standard() -> &'static StatRegistry {
        static STANDARD: OnceLock<StatRegistry> = OnceLock::new();
        STANDARD.get_or_init(StatRegistry::new)
    }

    /// Look up the definition of a tag.
    pub fn definition_of(&self, tag: StatTag) -> Option<&StatDefinition> {
        self.definitions.get(&tag)
    }

    /// Combinator for a tag. Tags without a definition, `NONE` included, use
    /// the additive combinator.
    pub fn combinator_for(&self, tag: StatTag) -> Combinator {
        self.definition_of(tag)
            .map(|definition| definition.combinator)
            .unwrap_or_default()
    }

    /// Whether the tag is displayed as a bare flag.
    pub fn is_flag(&self, tag: StatTag) -> bool {
        self.definition_of(tag)
            .map(|definition| definition.is_flag)
            .unwrap_or(false)
    }

    /// Number of defined stats.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Default for StatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_tag_but_none_is_defined() {
        let registry = StatRegistry::new();
        for tag in StatTag::iter() {
            if tag == StatTag::None {
                assert!(registry.definition_of(tag).is_none());
            } else {
                assert!(registry.definition_of(tag).is_some(), "missing {:?}", tag);
            }
        }
        assert_eq!(registry.len(), StatTag::iter().count() - 1);
    }

    #[test]
    fn test_none_uses_additive_identity() {
        let registry = StatRegistry::new();
        assert_eq!(registry.combinator_for(StatTag::None).identity(), 0.0);
    }

    #[test]
    fn test_numeric_and_flag_definitions() {
        let registry = StatRegistry::standard();

        let mhp = registry.definition_of(StatTag::Mhp).unwrap();
        assert!(!mhp.is_flag);
        assert_eq!(mhp.short_name, "MHP");
        assert_eq!(mhp.display_name(), "Max health");

        let undead = registry.definition_of(StatTag::Undead).unwrap();
        assert!(undead.is_flag);
        assert_eq!(undead.long_name, None);
        assert_eq!(undead.display_name(), "UNDEAD");
    }

    #[test]
    fn test_additive_decombine_inverts_combine() {
        let additive = Combinator::Additive;
        let merged = additive.combine(12.0, -3.0);
        assert_eq!(merged, 9.0);
        assert_eq!(additive.decombine(merged, -3.0), 12.0);
    }
}
