//! Behavior effects attached to item definitions.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use stat_rules::{StatSet, StatTag};

use crate::error::EffectError;

/// Broad kind of an effect. Drives usability and inventory ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    /// Permanently raises a stat when consumed.
    StatCandy,
    Heal,
    Attack,
    Escape,
    /// Does nothing when used; only contributes stats while equipped.
    Passive,
}

impl EffectKind {
    pub fn is_battle_usable(&self) -> bool {
        matches!(self, EffectKind::Heal | EffectKind::Attack | EffectKind::Escape)
    }

    pub fn is_map_usable(&self) -> bool {
        matches!(self, EffectKind::StatCandy | EffectKind::Heal)
    }

    /// Consumables are used up rather than recharged.
    pub fn is_consumable(&self) -> bool {
        matches!(self, EffectKind::StatCandy | EffectKind::Heal | EffectKind::Escape)
    }
}

/// Authoring data for the built-in effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EffectSpec {
    StatCandy { stat: StatTag, amount: f32 },
    Heal { amount: f32 },
    Attack { power: u32 },
    Escape,
    Passive,
}

impl EffectSpec {
    pub fn kind(&self) -> EffectKind {
        match self {
            EffectSpec::StatCandy { .. } => EffectKind::StatCandy,
            EffectSpec::Heal { .. } => EffectKind::Heal,
            EffectSpec::Attack { .. } => EffectKind::Attack,
            EffectSpec::Escape => EffectKind::Escape,
            EffectSpec::Passive => EffectKind::Passive,
        }
    }
}

/// What an item does when used.
///
/// Hosts may supply their own implementations, e.g. effects that wait on a
/// menu before applying themselves.
#[async_trait]
pub trait ItemEffect: std::fmt::Debug + Send + Sync {
    fn kind(&self) -> EffectKind;

    fn is_battle_usable(&self) -> bool {
        self.kind().is_battle_usable()
    }

    fn is_map_usable(&self) -> bool {
        self.kind().is_map_usable()
    }

    fn is_consumable(&self) -> bool {
        self.kind().is_consumable()
    }

    /// Whether enemy AI may pick this effect.
    fn is_ai_usable(&self) -> bool {
        self.is_battle_usable()
    }

    fn describe(&self) -> String;

    /// Apply the effect outside of battle.
    ///
    /// Returns `Ok(false)` when the effect chose not to apply itself (for
    /// example healing at full health).
    async fn use_on_map(&self, user: &mut StatSet) -> Result<bool, EffectError>;
}

/// Effect built from an [`EffectSpec`].
#[derive(Debug, Clone, PartialEq)]
pub struct StandardEffect {
    spec: EffectSpec,
}

impl StandardEffect {
    pub fn new(spec: EffectSpec) -> Self {
        Self { spec }
    }

    pub fn spec(&self) -> &EffectSpec {
        &self.spec
    }
}

#[async_trait]
impl ItemEffect for StandardEffect {
    fn kind(&self) -> EffectKind {
        self.spec.kind()
    }

    fn describe(&self) -> String {
        match &self.spec {
            EffectSpec::StatCandy { stat, amount } => {
                format!("Permanently raises {} by {}", stat.label(), amount)
            }
            EffectSpec::Heal { amount } => format!("Restores {} HP", amount),
            EffectSpec::Attack { power } => format!("Attack with power {}", power),
            EffectSpec::Escape => "Escape from battle".to_string(),
            EffectSpec::Passive => "Passive".to_string(),
        }
    }

    async fn use_on_map(&self, user: &mut StatSet) -> Result<bool, EffectError> {
        match &self.spec {
            EffectSpec::StatCandy { stat, amount } => {
                user.add(*stat, *amount);
                if *stat == StatTag::Mhp {
                    user.add(StatTag::Hp, *amount);
                }
                Ok(true)
            }
            EffectSpec::Heal { amount } => {
                let hp = user.get(StatTag::Hp);
                let max_hp = user.get(StatTag::Mhp);
                if hp >= max_hp {
                    return Ok(false);
                }
                user.set(StatTag::Hp, (hp + amount).min(max_hp));
                Ok(true)
            }
            _ => Err(EffectError::NotMapUsable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_usability() {
        assert!(EffectKind::Heal.is_battle_usable());
        assert!(EffectKind::Heal.is_map_usable());
        assert!(!EffectKind::Attack.is_map_usable());
        assert!(!EffectKind::Attack.is_consumable());
        assert!(!EffectKind::Passive.is_battle_usable());
        assert!(EffectKind::StatCandy.is_map_usable());
        assert!(!EffectKind::StatCandy.is_battle_usable());
    }

    #[test]
    fn test_spec_from_toml() {
        #[derive(Deserialize)]
        struct Holder {
            effect: EffectSpec,
        }

        let holder: Holder =
            toml::from_str("effect = { kind = \"stat_candy\", stat = \"STR\", amount = 1.0 }")
                .unwrap();
        assert_eq!(
            holder.effect,
            EffectSpec::StatCandy {
                stat: StatTag::Str,
                amount: 1.0
            }
        );
    }

    #[tokio::test]
    async fn test_heal_caps_at_max() {
        let effect = StandardEffect::new(EffectSpec::Heal { amount: 10.0 });
        let mut user = StatSet::from_pairs([(StatTag::Mhp, 20.0), (StatTag::Hp, 15.0)]);

        assert!(effect.use_on_map(&mut user).await.unwrap());
        assert_eq!(user.get(StatTag::Hp), 20.0);

        assert!(!effect.use_on_map(&mut user).await.unwrap());
    }

    #[tokio::test]
    async fn test_attack_cannot_be_used_on_map() {
        let effect = StandardEffect::new(EffectSpec::Attack { power: 4 });
        let mut user = StatSet::new();
        assert!(matches!(
            effect.use_on_map(&mut user).await,
            Err(EffectError::NotMapUsable)
        ));
    }
}
