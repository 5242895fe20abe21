//! # Game Settings
//!
//! The settings object every generator reads. It has two namespaces:
//!
//! - `game` - global rules (maximum player level)
//! - `loot_options` - default artistry/level ranges and item-type filter
//!
//! Settings live in a TOML file. [`GameSettings::load_or_create`] writes the
//! defaults on first start so there is always a file to edit.
//!
//! ```toml
//! [game]
//! max_player_level = 50
//!
//! [loot_options]
//! item_type = "armor"
//!
//! [loot_options.artistry_range]
//! min = 2
//! max = 4
//!
//! [loot_options.level_range]
//! min = 1
//! # no `max` = up to the game's maximum player level
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_MAX_PLAYER_LEVEL, DEFAULT_MIN_ITEM_LEVEL, MAX_ARTISTRY, MAX_PLAYER_LEVEL_LIMIT,
    MIN_ARTISTRY,
};
use crate::error::{SettingsError, SettingsResult};

/// Inclusive artistry range used when generating an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistryRange {
    /// Lowest tier (inclusive).
    pub min: u8,
    /// Highest tier (inclusive).
    pub max: u8,
}

impl ArtistryRange {
    /// Creates a new artistry range.
    #[must_use]
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }
}

impl Default for ArtistryRange {
    fn default() -> Self {
        Self::new(MIN_ARTISTRY, MAX_ARTISTRY)
    }
}

/// Inclusive level range used when generating an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRange {
    /// Lowest level (inclusive).
    pub min: u32,
    /// Highest level (inclusive). `None` means the game's maximum player level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
}

impl LevelRange {
    /// Creates a new level range.
    #[must_use]
    pub const fn new(min: u32, max: Option<u32>) -> Self {
        Self { min, max }
    }
}

impl Default for LevelRange {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_ITEM_LEVEL, None)
    }
}

/// Options that steer procedural loot.
///
/// Every field is optional; unset fields fall back to the defaults in
/// [`GameSettings::loot_options`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootOptions {
    /// Artistry range to draw from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artistry_range: Option<ArtistryRange>,
    /// Level range to draw from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level_range: Option<LevelRange>,
    /// Restricts generation to one item type (`armor`, `jewelry`, `weapon`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
}

impl LootOptions {
    /// Sets the artistry range.
    #[must_use]
    pub fn with_artistry_range(mut self, min: u8, max: u8) -> Self {
        self.artistry_range = Some(ArtistryRange::new(min, max));
        self
    }

    /// Sets the level range.
    #[must_use]
    pub fn with_level_range(mut self, min: u32, max: Option<u32>) -> Self {
        self.level_range = Some(LevelRange::new(min, max));
        self
    }

    /// Sets the item-type filter.
    #[must_use]
    pub fn with_item_type(mut self, item_type: impl Into<String>) -> Self {
        self.item_type = Some(item_type.into());
        self
    }

    /// Overrides `defaults` with every field set on `self`.
    ///
    /// Ranges are replaced as a whole, never merged bound-by-bound.
    #[must_use]
    pub fn merged_over(&self, defaults: &Self) -> Self {
        Self {
            artistry_range: self.artistry_range.or(defaults.artistry_range),
            level_range: self.level_range.or(defaults.level_range),
            item_type: self.item_type.clone().or_else(|| defaults.item_type.clone()),
        }
    }
}

/// Concrete inclusive bounds after merging options over settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedRanges {
    /// Artistry bounds `(min, max)`, with `min <= max`.
    pub artistry: (u8, u8),
    /// Level bounds `(min, max)`, with `min <= max`.
    pub level: (u32, u32),
}

/// Global game rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Highest level a player (and a generated item) can reach.
    pub max_player_level: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_player_level: DEFAULT_MAX_PLAYER_LEVEL,
        }
    }
}

/// The complete settings object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// `game` namespace.
    pub game: GameConfig,
    /// `loot_options` namespace: defaults for procedural loot.
    pub loot_options: LootOptions,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            loot_options: LootOptions {
                artistry_range: Some(ArtistryRange::default()),
                level_range: Some(LevelRange::default()),
                item_type: None,
            },
        }
    }
}

impl GameSettings {
    /// Parses settings from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Parse` for malformed TOML and
    /// `SettingsError::Invalid` when a range rule is broken.
    pub fn from_toml_str(source: &str) -> SettingsResult<Self> {
        let settings: Self = toml::from_str(source)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Renders the settings as TOML.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Serialize` if the settings cannot be rendered.
    pub fn to_toml_string(&self) -> SettingsResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Loads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, parsed or validated.
    pub fn load(path: impl AsRef<Path>) -> SettingsResult<Self> {
        let source = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&source)
    }

    /// Writes the settings to a TOML file, creating parent directories.
    ///
    /// # Errors
    ///
    /// Fails if the directories or the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> SettingsResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Loads the settings file, writing the defaults first if it is missing.
    ///
    /// # Errors
    ///
    /// Fails if the default file cannot be written or an existing file is
    /// invalid.
    pub fn load_or_create(path: impl AsRef<Path>) -> SettingsResult<Self> {
        let path = path.as_ref();
        if path.exists() {
            tracing::debug!("loading settings from {}", path.display());
            return Self::load(path);
        }

        let settings = Self::default();
        settings.save(path)?;
        tracing::info!("'{}' created with default settings", path.display());
        Ok(settings)
    }

    /// Checks every range rule.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Invalid` naming the first broken rule.
    pub fn validate(&self) -> SettingsResult<()> {
        if self.game.max_player_level < 1 || self.game.max_player_level > MAX_PLAYER_LEVEL_LIMIT {
            return Err(SettingsError::Invalid(format!(
                "game.max_player_level must be within 1..={MAX_PLAYER_LEVEL_LIMIT}, got {}",
                self.game.max_player_level
            )));
        }

        if let Some(range) = self.loot_options.artistry_range {
            if range.min < MIN_ARTISTRY || range.max > MAX_ARTISTRY || range.min > range.max {
                return Err(SettingsError::Invalid(format!(
                    "loot_options.artistry_range must satisfy {MIN_ARTISTRY} <= min <= max <= {MAX_ARTISTRY}, got {}..={}",
                    range.min, range.max
                )));
            }
        }

        if let Some(range) = self.loot_options.level_range {
            if range.min < 1 {
                return Err(SettingsError::Invalid(
                    "loot_options.level_range.min must be at least 1".to_string(),
                ));
            }
            if let Some(max) = range.max {
                if range.min > max {
                    return Err(SettingsError::Invalid(format!(
                        "loot_options.level_range min {} exceeds max {max}",
                        range.min
                    )));
                }
            }
        }

        Ok(())
    }

    /// Merges `options` over these settings and returns concrete bounds.
    ///
    /// A missing level maximum resolves to `game.max_player_level`.
    /// Inverted bounds collapse onto the minimum.
    #[must_use]
    pub fn resolve_ranges(&self, options: &LootOptions) -> ResolvedRanges {
        let merged = options.merged_over(&self.loot_options);

        let artistry = merged.artistry_range.unwrap_or_default();
        let level = merged.level_range.unwrap_or_default();
        let level_max = level.max.unwrap_or(self.game.max_player_level);

        ResolvedRanges {
            artistry: (artistry.min, artistry.max.max(artistry.min)),
            level: (level.min, level_max.max(level.min)),
        }
    }
}
