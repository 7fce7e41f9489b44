//! # Combat Items
//!
//! Item definitions, combat item instances and the slot inventories that hold
//! them. Equipment inventories feed their items' stat bonuses back into the
//! owning unit and keep its health consistent.
//!
//! ## Core Components
//!
//! - **catalog**: Immutable item definitions and their behavior effects
//! - **item**: Per-instance use counts, values and discard policy
//! - **inventory**: Slot inventories, slot policies and equipment
//! - **unit**: Equipment owners

pub mod catalog;
pub mod config;
pub mod error;
pub mod inventory;
pub mod item;
pub mod unit;

pub use catalog::*;
pub use config::*;
pub use error::*;
pub use inventory::*;
pub use item::*;
pub use unit::*;
