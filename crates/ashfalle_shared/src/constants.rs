//! # Balance Constants
//!
//! Default values used when a settings file does not override them.

// =============================================================================
// GAME
// =============================================================================

/// Highest level a player character can reach.
pub const DEFAULT_MAX_PLAYER_LEVEL: u32 = 50;

/// Highest `max_player_level` a settings file may configure.
pub const MAX_PLAYER_LEVEL_LIMIT: u32 = 1_000;

// =============================================================================
// ARTISTRY
// =============================================================================

/// Lowest artistry tier an item can carry.
pub const MIN_ARTISTRY: u8 = 1;

/// Highest artistry tier an item can carry.
pub const MAX_ARTISTRY: u8 = 5;

// =============================================================================
// LOOT
// =============================================================================

/// Lowest level a generated item can roll.
pub const DEFAULT_MIN_ITEM_LEVEL: u32 = 1;

/// Chance (0-1) that a single loot roll yields nothing.
pub const DEFAULT_NOTHING_CHANCE: f64 = 0.7;

/// Weight given to a loot pool when none (or an unusable one) is supplied.
pub const DEFAULT_POOL_WEIGHT: f64 = 1.0;

/// Number of rolls performed by a default multi-roll.
pub const DEFAULT_ROLL_COUNT: usize = 3;

// =============================================================================
// FILES
// =============================================================================

/// Where the settings bootstrap writes the default settings file.
pub const DEFAULT_SETTINGS_PATH: &str = "out/settings/game_settings.toml";
