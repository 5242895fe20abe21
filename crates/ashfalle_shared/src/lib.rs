//! # Ashfalle Shared
//!
//! Settings and constants read by every other Ashfalle crate.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ashfalle_shared::{GameSettings, DEFAULT_SETTINGS_PATH};
//!
//! let settings = GameSettings::load_or_create(DEFAULT_SETTINGS_PATH)?;
//! assert!(settings.game.max_player_level >= 1);
//! # Ok::<(), ashfalle_shared::SettingsError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]

pub mod constants;
pub mod error;
pub mod settings;

pub use constants::{
    DEFAULT_MAX_PLAYER_LEVEL, DEFAULT_NOTHING_CHANCE, DEFAULT_POOL_WEIGHT, DEFAULT_ROLL_COUNT,
    DEFAULT_SETTINGS_PATH, MAX_ARTISTRY, MAX_PLAYER_LEVEL_LIMIT, MIN_ARTISTRY,
};
pub use error::{SettingsError, SettingsResult};
pub use settings::{
    ArtistryRange, GameConfig, GameSettings, LevelRange, LootOptions, ResolvedRanges,
};
