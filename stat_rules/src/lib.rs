//! # Stat Rules
//!
//! Stat identifiers, the stat definition registry and additive stat sets.
//! Units, items and modifiers all describe their numbers with a [`StatSet`];
//! equipment bonuses are layered onto a unit's base stats and removed again
//! without drift.

pub mod stat;
pub mod stat_set;

pub use stat::*;
pub use stat_set::*;
