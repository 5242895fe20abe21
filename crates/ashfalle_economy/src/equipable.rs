//! # Equipment
//!
//! An [`Equipable`] is an [`Item`] that can be worn or wielded. It embeds the
//! item record and adds an equip slot, an optional artistry tier and a level.
//!
//! The artistry tier is present if and only if the item is artistry-eligible.
//! While eligibility is switched off the last tier is remembered, so turning
//! it back on restores (and re-clamps) the previous value.

use std::fmt;

use ashfalle_shared::{MAX_ARTISTRY, MIN_ARTISTRY};
use serde::{Deserialize, Serialize};

use crate::item::{Item, ItemCategory, ItemOptions};

/// Artistry tier given to new equipment.
pub const DEFAULT_ARTISTRY: u8 = 3;

/// Where a piece of equipment is worn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipSlot {
    /// Body armor.
    Chest,
    /// Boots.
    Feet,
    /// Rings.
    Finger,
    /// Gloves.
    Hands,
    /// Helmets.
    Head,
    /// Leg armor.
    Legs,
    /// Necklaces.
    Neck,
    /// One hand (weapons, shields).
    #[default]
    #[serde(rename = "One-handed")]
    OneHanded,
    /// Relic slot.
    Relic,
    /// Trinket slot.
    Trinket,
    /// Both hands.
    #[serde(rename = "Two-handed")]
    TwoHanded,
}

impl EquipSlot {
    /// The five slots body armor can occupy.
    pub const ARMOR: [Self; 5] = [Self::Chest, Self::Feet, Self::Hands, Self::Head, Self::Legs];

    /// Display name of the slot.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chest => "Chest",
            Self::Feet => "Feet",
            Self::Finger => "Finger",
            Self::Hands => "Hands",
            Self::Head => "Head",
            Self::Legs => "Legs",
            Self::Neck => "Neck",
            Self::OneHanded => "One-handed",
            Self::Relic => "Relic",
            Self::Trinket => "Trinket",
            Self::TwoHanded => "Two-handed",
        }
    }
}

impl fmt::Display for EquipSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional overrides for [`Equipable::new`].
///
/// `item.category` is ignored: equipment is always [`ItemCategory::Equipable`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EquipableOptions {
    /// Overrides for the embedded item.
    pub item: ItemOptions,
    /// Equip slot.
    pub equip_slot: Option<EquipSlot>,
    /// Whether the item carries an artistry tier.
    pub is_artistry_item: Option<bool>,
    /// Artistry tier.
    pub artistry: Option<i64>,
    /// Item level.
    pub level: Option<i64>,
}

impl EquipableOptions {
    /// Sets the item overrides.
    #[must_use]
    pub fn with_item(mut self, item: ItemOptions) -> Self {
        self.item = item;
        self
    }

    /// Sets the item name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.item.name = Some(name.into());
        self
    }

    /// Sets the item value.
    #[must_use]
    pub fn with_value(mut self, value: f64) -> Self {
        self.item.value = Some(value);
        self
    }

    /// Sets the equip slot.
    #[must_use]
    pub fn with_equip_slot(mut self, slot: EquipSlot) -> Self {
        self.equip_slot = Some(slot);
        self
    }

    /// Sets artistry eligibility.
    #[must_use]
    pub fn with_artistry_item(mut self, is_artistry_item: bool) -> Self {
        self.is_artistry_item = Some(is_artistry_item);
        self
    }

    /// Sets the artistry tier.
    #[must_use]
    pub fn with_artistry(mut self, artistry: i64) -> Self {
        self.artistry = Some(artistry);
        self
    }

    /// Sets the level.
    #[must_use]
    pub fn with_level(mut self, level: i64) -> Self {
        self.level = Some(level);
        self
    }
}

/// A wearable or wieldable item.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Equipable {
    item: Item,
    equip_slot: EquipSlot,
    is_artistry_item: bool,
    artistry: u8,
    level: u32,
}

impl Default for Equipable {
    fn default() -> Self {
        Self::new(EquipableOptions::default())
    }
}

impl Equipable {
    /// Creates equipment, applying `options` over the defaults.
    ///
    /// The category is forced to `Equipable`. Eligibility is applied before
    /// the artistry tier so the tier is checked against the final flag.
    #[must_use]
    pub fn new(options: EquipableOptions) -> Self {
        let mut item = Item::default();
        item.apply(options.item);
        item.set_category(ItemCategory::Equipable);

        let mut equipable = Self {
            item,
            equip_slot: EquipSlot::default(),
            is_artistry_item: true,
            artistry: DEFAULT_ARTISTRY,
            level: 1,
        };

        if let Some(slot) = options.equip_slot {
            equipable.set_equip_slot(slot);
        }
        if let Some(is_artistry_item) = options.is_artistry_item {
            equipable.set_artistry_item(is_artistry_item);
        }
        if let Some(artistry) = options.artistry {
            equipable.set_artistry(artistry);
        }
        if let Some(level) = options.level {
            equipable.set_level(level);
        }

        equipable
    }

    /// The embedded item record.
    #[must_use]
    pub const fn item(&self) -> &Item {
        &self.item
    }

    /// Mutable access to the embedded item record.
    pub fn item_mut(&mut self) -> &mut Item {
        &mut self.item
    }

    /// Consumes the equipment, returning its item record.
    #[must_use]
    pub fn into_item(self) -> Item {
        self.item
    }

    /// Equip slot.
    #[must_use]
    pub const fn equip_slot(&self) -> EquipSlot {
        self.equip_slot
    }

    /// Changes the equip slot.
    pub fn set_equip_slot(&mut self, slot: EquipSlot) {
        self.equip_slot = slot;
    }

    /// Whether the item carries an artistry tier.
    #[must_use]
    pub const fn is_artistry_item(&self) -> bool {
        self.is_artistry_item
    }

    /// Switches artistry eligibility on or off.
    ///
    /// Off hides the tier; on restores the remembered tier, clamped to `1..=5`.
    pub fn set_artistry_item(&mut self, is_artistry_item: bool) {
        self.is_artistry_item = is_artistry_item;
        self.artistry = self.artistry.clamp(MIN_ARTISTRY, MAX_ARTISTRY);
    }

    /// Artistry tier, `None` for items that are not artistry-eligible.
    #[must_use]
    pub const fn artistry(&self) -> Option<u8> {
        if self.is_artistry_item {
            Some(self.artistry)
        } else {
            None
        }
    }

    /// Sets the artistry tier, clamped to `1..=5`.
    ///
    /// Rejected (returns `false`, nothing stored) on items that are not
    /// artistry-eligible. Otherwise returns `false` only if the tier had to be
    /// clamped.
    pub fn set_artistry(&mut self, artistry: i64) -> bool {
        if !self.is_artistry_item {
            return false;
        }
        let clamped = artistry.clamp(i64::from(MIN_ARTISTRY), i64::from(MAX_ARTISTRY));
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            self.artistry = clamped as u8;
        }
        clamped == artistry
    }

    /// Item level.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Sets the level, at least 1.
    ///
    /// Returns `false` if the input had to be clamped.
    pub fn set_level(&mut self, level: i64) -> bool {
        let clamped = level.clamp(1, i64::from(u32::MAX));
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            self.level = clamped as u32;
        }
        clamped == level
    }

    /// Item description followed by artistry and level.
    #[must_use]
    pub fn describe(&self, as_quantity: bool) -> String {
        let artistry = self
            .artistry()
            .map_or_else(|| "n/a".to_string(), |tier| tier.to_string());
        format!(
            "{} Art: {artistry} Lv: {}",
            self.item.describe(as_quantity),
            self.level
        )
    }
}

impl AsRef<Item> for Equipable {
    fn as_ref(&self) -> &Item {
        &self.item
    }
}

impl AsMut<Item> for Equipable {
    fn as_mut(&mut self) -> &mut Item {
        &mut self.item
    }
}

impl fmt::Display for Equipable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe(true))
    }
}
