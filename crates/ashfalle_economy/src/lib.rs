//! # Ashfalle Economy System
//!
//! Items, equipment and loot for the Ashfalle RPG.
//!
//! ## Design Principles
//!
//! 1. **Setters clamp, never fail** - out-of-range data is pulled back into range
//! 2. **Injected randomness** - every draw goes through a [`RandomSource`]
//! 3. **Two-stage rolls** - a flat nothing gate, then a weighted pool pick
//! 4. **External configuration** - loot defaults come from [`GameSettings`]
//!
//! ## Example
//!
//! ```rust
//! use ashfalle_economy::{seeded_rng, Item, ItemOptions, LootPool, LootTable};
//! use ashfalle_shared::LootOptions;
//!
//! let mut table = LootTable::new(Some(0.5));
//! table.add_loot_pools([
//!     LootPool::fixed("Common", [Item::new(ItemOptions::default().with_name("Copper Coin"))], Some(10.0)),
//!     LootPool::artistry("Crafted", LootOptions::default().with_item_type("weapon"), Some(1.0)),
//! ]);
//!
//! let mut rng = seeded_rng(7);
//! let drops = table.roll_default(&mut rng);
//! assert!(drops.len() <= 3);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]

pub mod artistry;
pub mod equipable;
pub mod error;
pub mod item;
pub mod loot;
pub mod rng;

pub use ashfalle_shared::GameSettings;
pub use artistry::{
    apply_loot_options, create_armor, create_equipment, create_jewelry, create_weapon, generate,
    random_equipment, AppliedLootOptions, ItemType,
};
pub use equipable::{EquipSlot, Equipable, EquipableOptions};
pub use error::{EconomyError, EconomyResult};
pub use item::{Item, ItemCategory, ItemOptions, ValueParts};
pub use loot::{Loot, LootPool, LootStatistics, LootTable, PoolSource, SharedLootTable};
pub use rng::{entropy_rng, seeded_rng, LootRng, RandomSource, ScriptedSource};
