//! # Artistry Equipment Factory
//!
//! Procedural equipment. An item type (`armor`, `jewelry`, `weapon`) and a
//! subtype from that type's whitelist decide the equip slot; loot options
//! merged over the game settings decide artistry and level.
//!
//! ## Slots
//!
//! | Type    | Subtypes                                   | Slot                    |
//! |---------|--------------------------------------------|-------------------------|
//! | armor   | cloth, leather, mail, plate                | random body slot        |
//! | armor   | shield                                     | One-handed              |
//! | jewelry | necklace / ring                            | Neck / Finger           |
//! | weapon  | axe, caster, mace, sword                   | One-handed              |
//! | weapon  | axe2H, caster2H, mace2H, missile, sword2H  | Two-handed              |
//!
//! Value is a placeholder until materials exist:
//! `artistry * level * random(3..=33)`.

use std::fmt;
use std::str::FromStr;

use ashfalle_shared::{GameSettings, LootOptions, MAX_ARTISTRY, MIN_ARTISTRY};

use crate::equipable::{EquipSlot, Equipable, EquipableOptions};
use crate::error::{EconomyError, EconomyResult};
use crate::rng::{choose, RandomSource};

/// Armor subtypes.
pub const ARMOR_SUBTYPES: [&str; 5] = ["cloth", "leather", "mail", "plate", "shield"];

/// Jewelry subtypes.
pub const JEWELRY_SUBTYPES: [&str; 2] = ["necklace", "ring"];

/// Weapon subtypes wielded in one hand.
pub const ONE_HANDED_SUBTYPES: [&str; 4] = ["axe", "caster", "mace", "sword"];

/// Weapon subtypes wielded in both hands.
pub const TWO_HANDED_SUBTYPES: [&str; 5] = ["axe2H", "caster2H", "mace2H", "missile", "sword2H"];

/// Every weapon subtype.
pub const WEAPON_SUBTYPES: [&str; 9] = [
    "axe", "axe2H", "caster", "caster2H", "mace", "mace2H", "missile", "sword", "sword2H",
];

/// Bounds of the placeholder value multiplier.
const VALUE_MULTIPLIER: (i64, i64) = (3, 33);

/// Kind of procedurally generated equipment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemType {
    /// Body armor and shields.
    Armor,
    /// Necklaces and rings.
    Jewelry,
    /// One- and two-handed weapons.
    Weapon,
}

impl ItemType {
    /// All item types, in selection order.
    pub const ALL: [Self; 3] = [Self::Armor, Self::Jewelry, Self::Weapon];

    /// Lower-case name used in loot options.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Armor => "armor",
            Self::Jewelry => "jewelry",
            Self::Weapon => "weapon",
        }
    }

    /// Subtype whitelist for this type.
    #[must_use]
    pub const fn subtypes(self) -> &'static [&'static str] {
        match self {
            Self::Armor => &ARMOR_SUBTYPES,
            Self::Jewelry => &JEWELRY_SUBTYPES,
            Self::Weapon => &WEAPON_SUBTYPES,
        }
    }

    /// Returns `true` if `subtype` is on this type's whitelist.
    #[must_use]
    pub fn accepts(self, subtype: &str) -> bool {
        self.subtypes().contains(&subtype)
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = EconomyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "armor" => Ok(Self::Armor),
            "jewelry" => Ok(Self::Jewelry),
            "weapon" => Ok(Self::Weapon),
            other => Err(EconomyError::UnsupportedItemType(other.to_string())),
        }
    }
}

/// Artistry and level drawn from resolved loot options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppliedLootOptions {
    /// Artistry tier.
    pub artistry: u8,
    /// Item level.
    pub level: u32,
}

fn invalid_subtype(subtype: &str, item_type: ItemType) -> EconomyError {
    EconomyError::InvalidSubtype {
        subtype: subtype.to_string(),
        item_type: item_type.as_str().to_string(),
    }
}

/// Resolves the slot for an armor subtype.
///
/// Shields go in one hand; every other armor lands on a random body slot.
///
/// # Errors
///
/// Returns `EconomyError::InvalidSubtype` for subtypes outside the armor list.
pub fn armor_slot<R: RandomSource + ?Sized>(subtype: &str, rng: &mut R) -> EconomyResult<EquipSlot> {
    if !ItemType::Armor.accepts(subtype) {
        return Err(invalid_subtype(subtype, ItemType::Armor));
    }
    if subtype == "shield" {
        return Ok(EquipSlot::OneHanded);
    }
    Ok(choose(rng, &EquipSlot::ARMOR)
        .copied()
        .unwrap_or(EquipSlot::Chest))
}

/// Resolves the slot for a jewelry subtype.
///
/// # Errors
///
/// Returns `EconomyError::InvalidSubtype` for anything but `necklace` or `ring`.
pub fn jewelry_slot(subtype: &str) -> EconomyResult<EquipSlot> {
    match subtype {
        "necklace" => Ok(EquipSlot::Neck),
        "ring" => Ok(EquipSlot::Finger),
        other => Err(invalid_subtype(other, ItemType::Jewelry)),
    }
}

/// Resolves the slot for a weapon subtype.
///
/// # Errors
///
/// Returns `EconomyError::InvalidSubtype` for subtypes outside both weapon lists.
pub fn weapon_slot(subtype: &str) -> EconomyResult<EquipSlot> {
    if ONE_HANDED_SUBTYPES.contains(&subtype) {
        Ok(EquipSlot::OneHanded)
    } else if TWO_HANDED_SUBTYPES.contains(&subtype) {
        Ok(EquipSlot::TwoHanded)
    } else {
        Err(invalid_subtype(subtype, ItemType::Weapon))
    }
}

/// Placeholder value: `artistry * level * random(3..=33)`.
pub fn placeholder_value<R: RandomSource + ?Sized>(artistry: u8, level: u32, rng: &mut R) -> f64 {
    let multiplier = rng.random_int_inclusive(VALUE_MULTIPLIER.0, VALUE_MULTIPLIER.1);
    #[allow(clippy::cast_precision_loss)]
    let multiplier = multiplier as f64;
    f64::from(artistry) * f64::from(level) * multiplier
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Display name for a generated item, e.g. `Leather Armor` or `Two-handed Sword`.
#[must_use]
pub fn display_name(item_type: ItemType, subtype: &str) -> String {
    match item_type {
        ItemType::Armor if subtype == "shield" => "Shield".to_string(),
        ItemType::Armor => format!("{} Armor", capitalize(subtype)),
        ItemType::Jewelry => capitalize(subtype),
        ItemType::Weapon => match subtype.strip_suffix("2H") {
            Some(base) => format!("Two-handed {}", capitalize(base)),
            None => capitalize(subtype),
        },
    }
}

fn build<R: RandomSource + ?Sized>(
    item_type: ItemType,
    subtype: &str,
    slot: EquipSlot,
    artistry: u8,
    level: u32,
    rng: &mut R,
) -> Equipable {
    let artistry = artistry.clamp(MIN_ARTISTRY, MAX_ARTISTRY);
    let level = level.max(1);
    let value = placeholder_value(artistry, level, rng);
    let equipable = Equipable::new(
        EquipableOptions::default()
            .with_name(display_name(item_type, subtype))
            .with_value(value)
            .with_equip_slot(slot)
            .with_artistry_item(true)
            .with_artistry(i64::from(artistry))
            .with_level(i64::from(level)),
    );
    tracing::trace!("created {item_type}/{subtype}: {equipable}");
    equipable
}

/// Creates a piece of armor.
///
/// # Errors
///
/// Returns `EconomyError::InvalidSubtype` for subtypes outside the armor list.
pub fn create_armor<R: RandomSource + ?Sized>(
    subtype: &str,
    artistry: u8,
    level: u32,
    rng: &mut R,
) -> EconomyResult<Equipable> {
    let slot = armor_slot(subtype, rng)?;
    Ok(build(ItemType::Armor, subtype, slot, artistry, level, rng))
}

/// Creates a piece of jewelry.
///
/// # Errors
///
/// Returns `EconomyError::InvalidSubtype` for anything but `necklace` or `ring`.
pub fn create_jewelry<R: RandomSource + ?Sized>(
    subtype: &str,
    artistry: u8,
    level: u32,
    rng: &mut R,
) -> EconomyResult<Equipable> {
    let slot = jewelry_slot(subtype)?;
    Ok(build(ItemType::Jewelry, subtype, slot, artistry, level, rng))
}

/// Creates a weapon.
///
/// # Errors
///
/// Returns `EconomyError::InvalidSubtype` for subtypes outside both weapon lists.
pub fn create_weapon<R: RandomSource + ?Sized>(
    subtype: &str,
    artistry: u8,
    level: u32,
    rng: &mut R,
) -> EconomyResult<Equipable> {
    let slot = weapon_slot(subtype)?;
    Ok(build(ItemType::Weapon, subtype, slot, artistry, level, rng))
}

/// Creates equipment of the given type.
///
/// # Errors
///
/// Returns `EconomyError::InvalidSubtype` if `subtype` does not belong to
/// `item_type`.
pub fn create_equipment<R: RandomSource + ?Sized>(
    item_type: ItemType,
    subtype: &str,
    artistry: u8,
    level: u32,
    rng: &mut R,
) -> EconomyResult<Equipable> {
    match item_type {
        ItemType::Armor => create_armor(subtype, artistry, level, rng),
        ItemType::Jewelry => create_jewelry(subtype, artistry, level, rng),
        ItemType::Weapon => create_weapon(subtype, artistry, level, rng),
    }
}

/// Merges `options` over the settings defaults and draws artistry and level.
///
/// Artistry is drawn first, then level, each uniform over its inclusive range.
pub fn apply_loot_options<R: RandomSource + ?Sized>(
    options: &LootOptions,
    settings: &GameSettings,
    rng: &mut R,
) -> AppliedLootOptions {
    let ranges = settings.resolve_ranges(options);
    let (artistry_min, artistry_max) = ranges.artistry;
    let (level_min, level_max) = ranges.level;

    let artistry = rng.random_int_inclusive(i64::from(artistry_min), i64::from(artistry_max));
    let level = rng.random_int_inclusive(i64::from(level_min), i64::from(level_max));

    AppliedLootOptions {
        artistry: u8::try_from(artistry).unwrap_or(artistry_min),
        level: u32::try_from(level).unwrap_or(level_min),
    }
}

/// Generates one item of a known type and subtype from loot options.
///
/// # Errors
///
/// Returns `EconomyError::InvalidSubtype` if `subtype` does not belong to
/// `item_type`.
pub fn generate<R: RandomSource + ?Sized>(
    item_type: ItemType,
    subtype: &str,
    options: &LootOptions,
    settings: &GameSettings,
    rng: &mut R,
) -> EconomyResult<Equipable> {
    let applied = apply_loot_options(options, settings, rng);
    create_equipment(item_type, subtype, applied.artistry, applied.level, rng)
}

/// Generates a random piece of equipment.
///
/// The item type comes from `options.item_type` (falling back to the
/// settings' filter), or is picked uniformly when neither sets one. The
/// subtype is then picked uniformly from that type's whitelist.
///
/// # Errors
///
/// Returns `EconomyError::UnsupportedItemType` if the item type filter is not
/// `armor`, `jewelry` or `weapon`.
pub fn random_equipment<R: RandomSource + ?Sized>(
    options: &LootOptions,
    settings: &GameSettings,
    rng: &mut R,
) -> EconomyResult<Equipable> {
    let filter = options
        .item_type
        .as_deref()
        .or(settings.loot_options.item_type.as_deref());

    let item_type = match filter {
        Some(name) => name.parse::<ItemType>()?,
        None => choose(rng, &ItemType::ALL)
            .copied()
            .unwrap_or(ItemType::Armor),
    };

    let subtypes = item_type.subtypes();
    let subtype = choose(rng, subtypes).copied().unwrap_or(subtypes[0]);

    tracing::debug!("generating {item_type}/{subtype}");
    generate(item_type, subtype, options, settings, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemCategory;
    use crate::rng::{seeded_rng, ScriptedSource};

    #[test]
    fn test_shield_is_one_handed() {
        let mut rng = seeded_rng(1);
        for _ in 0..50 {
            let shield = create_armor("shield", 3, 10, &mut rng).unwrap();
            assert_eq!(shield.equip_slot(), EquipSlot::OneHanded);
            assert_eq!(shield.item().name(), "Shield");
        }
    }

    #[test]
    fn test_body_armor_uses_body_slots() {
        let mut rng = seeded_rng(2);
        for subtype in ["cloth", "leather", "mail", "plate"] {
            for _ in 0..25 {
                let armor = create_armor(subtype, 2, 5, &mut rng).unwrap();
                assert!(EquipSlot::ARMOR.contains(&armor.equip_slot()));
            }
        }
    }

    #[test]
    fn test_armor_slot_follows_draw() {
        let mut first = ScriptedSource::new(vec![0.0]);
        let mut last = ScriptedSource::new(vec![0.99]);
        assert_eq!(armor_slot("mail", &mut first).unwrap(), EquipSlot::Chest);
        assert_eq!(armor_slot("mail", &mut last).unwrap(), EquipSlot::Legs);
    }

    #[test]
    fn test_jewelry_slots() {
        let mut rng = seeded_rng(3);
        let necklace = create_jewelry("necklace", 1, 1, &mut rng).unwrap();
        let ring = create_jewelry("ring", 1, 1, &mut rng).unwrap();
        assert_eq!(necklace.equip_slot(), EquipSlot::Neck);
        assert_eq!(ring.equip_slot(), EquipSlot::Finger);
    }

    #[test]
    fn test_weapon_slots() {
        let mut rng = seeded_rng(4);
        for subtype in ONE_HANDED_SUBTYPES {
            let weapon = create_weapon(subtype, 1, 1, &mut rng).unwrap();
            assert_eq!(weapon.equip_slot(), EquipSlot::OneHanded, "{subtype}");
        }
        for subtype in TWO_HANDED_SUBTYPES {
            let weapon = create_weapon(subtype, 1, 1, &mut rng).unwrap();
            assert_eq!(weapon.equip_slot(), EquipSlot::TwoHanded, "{subtype}");
        }
    }

    #[test]
    fn test_invalid_subtypes() {
        let mut rng = seeded_rng(5);
        assert_eq!(
            create_armor("bogus", 1, 1, &mut rng).unwrap_err(),
            EconomyError::InvalidSubtype {
                subtype: "bogus".to_string(),
                item_type: "armor".to_string(),
            }
        );
        assert!(matches!(
            create_jewelry("axe", 1, 1, &mut rng),
            Err(EconomyError::InvalidSubtype { .. })
        ));
        assert!(matches!(
            create_weapon("ring", 1, 1, &mut rng),
            Err(EconomyError::InvalidSubtype { .. })
        ));
    }

    #[test]
    fn test_created_equipment_is_parameterised() {
        let mut source = ScriptedSource::new(vec![0.0]);
        let sword = create_weapon("sword2H", 4, 12, &mut source).unwrap();

        assert_eq!(sword.item().name(), "Two-handed Sword");
        assert_eq!(sword.item().category(), ItemCategory::Equipable);
        assert_eq!(sword.artistry(), Some(4));
        assert_eq!(sword.level(), 12);
        // multiplier 3 with a zero draw
        assert!((sword.item().value() - 4.0 * 12.0 * 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_value_uses_clamped_artistry() {
        let mut high = ScriptedSource::new(vec![0.0]);
        let sword = create_weapon("sword", 9, 2, &mut high).unwrap();
        assert_eq!(sword.artistry(), Some(5));
        assert!((sword.item().value() - 5.0 * 2.0 * 3.0).abs() < f64::EPSILON);

        let mut low = ScriptedSource::new(vec![0.0]);
        let ring = create_jewelry("ring", 0, 0, &mut low).unwrap();
        assert_eq!(ring.artistry(), Some(1));
        assert_eq!(ring.level(), 1);
        assert!((ring.item().value() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_out_of_range_options_value_matches_tier() {
        let settings = GameSettings::default();
        let options = LootOptions::default()
            .with_artistry_range(0, 9)
            .with_level_range(4, Some(4))
            .with_item_type("jewelry");
        let mut rng = seeded_rng(11);
        for _ in 0..200 {
            let item = random_equipment(&options, &settings, &mut rng).unwrap();
            let tier = f64::from(item.artistry().unwrap());
            let multiplier = item.item().value() / (tier * 4.0);
            assert!((3.0..=33.0).contains(&multiplier), "{multiplier}");
            assert!((multiplier - multiplier.round()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_placeholder_value_range() {
        let mut rng = seeded_rng(6);
        for _ in 0..1000 {
            let value = placeholder_value(2, 10, &mut rng);
            assert!((60.0..=660.0).contains(&value));
        }
    }

    #[test]
    fn test_display_names() {
        assert_eq!(display_name(ItemType::Armor, "leather"), "Leather Armor");
        assert_eq!(display_name(ItemType::Jewelry, "ring"), "Ring");
        assert_eq!(display_name(ItemType::Weapon, "axe2H"), "Two-handed Axe");
        assert_eq!(display_name(ItemType::Weapon, "missile"), "Missile");
    }

    #[test]
    fn test_item_type_parsing() {
        assert_eq!("weapon".parse::<ItemType>().unwrap(), ItemType::Weapon);
        assert_eq!(
            "potion".parse::<ItemType>().unwrap_err(),
            EconomyError::UnsupportedItemType("potion".to_string())
        );
    }

    #[test]
    fn test_apply_loot_options_uses_overrides() {
        let settings = GameSettings::default();
        let options = LootOptions::default()
            .with_artistry_range(2, 2)
            .with_level_range(7, Some(7));
        let mut rng = seeded_rng(7);
        let applied = apply_loot_options(&options, &settings, &mut rng);
        assert_eq!(applied, AppliedLootOptions { artistry: 2, level: 7 });
    }

    #[test]
    fn test_apply_loot_options_defaults_to_max_player_level() {
        let mut settings = GameSettings::default();
        settings.game.max_player_level = 20;
        let mut top = ScriptedSource::new(vec![0.999]);
        let applied = apply_loot_options(&LootOptions::default(), &settings, &mut top);
        assert_eq!(applied, AppliedLootOptions { artistry: 5, level: 20 });
    }

    #[test]
    fn test_random_equipment_respects_item_type() {
        let settings = GameSettings::default();
        let options = LootOptions::default().with_item_type("armor");
        let mut rng = seeded_rng(8);
        for _ in 0..100 {
            let armor = random_equipment(&options, &settings, &mut rng).unwrap();
            let name = armor.item().name();
            assert!(name.ends_with("Armor") || name == "Shield", "{name}");
        }
    }

    #[test]
    fn test_random_equipment_unsupported_type() {
        let settings = GameSettings::default();
        let options = LootOptions::default().with_item_type("potion");
        let mut rng = seeded_rng(9);
        assert_eq!(
            random_equipment(&options, &settings, &mut rng).unwrap_err(),
            EconomyError::UnsupportedItemType("potion".to_string())
        );
    }

    #[test]
    fn test_random_equipment_stays_in_ranges() {
        let settings = GameSettings::default();
        let mut rng = seeded_rng(10);
        for _ in 0..500 {
            let equipable = random_equipment(&LootOptions::default(), &settings, &mut rng).unwrap();
            let artistry = equipable.artistry().unwrap();
            assert!((1..=5).contains(&artistry));
            assert!((1..=50).contains(&equipable.level()));
        }
    }
}
