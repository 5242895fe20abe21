//! # Items
//!
//! The base inventory entity. Every numeric field is sanitized on write:
//! setters clamp out-of-range input and report whether they had to, but
//! never fail.
//!
//! ## Invariants
//!
//! - `burden >= 0`, `value >= 0`
//! - `max_quantity >= 1`
//! - `1 <= quantity <= max_quantity`, re-checked whenever `max_quantity` changes

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name given to items created without one.
pub const DEFAULT_ITEM_NAME: &str = "Unnamed Item";

/// Default per-unit burden.
pub const DEFAULT_BURDEN: f64 = 0.1;

/// Default per-unit value in minor currency units.
pub const DEFAULT_VALUE: f64 = 1.0;

/// Inventory category of an item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    /// Crafting component.
    Component,
    /// Used up on use.
    Consumable,
    /// Can be worn or wielded.
    Equipable,
    /// Anything else.
    #[default]
    General,
    /// Spell or alchemy reagent.
    Reagent,
}

impl ItemCategory {
    /// Display name of the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Component => "Component",
            Self::Consumable => "Consumable",
            Self::Equipable => "Equipable",
            Self::General => "General",
            Self::Reagent => "Reagent",
        }
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A currency amount split into its three denominations.
///
/// 100 minor make one mid, 100 mid make one major.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ValueParts {
    /// `floor(v / 10000)`
    pub major: u64,
    /// `floor((v mod 10000) / 100)`
    pub mid: u64,
    /// `floor(v mod 100)`
    pub minor: u64,
}

impl ValueParts {
    /// Splits a raw value into denominations.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_value(value: f64) -> Self {
        let value = value.max(0.0);
        Self {
            major: (value / 10_000.0).floor() as u64,
            mid: ((value % 10_000.0) / 100.0).floor() as u64,
            minor: (value % 100.0).floor() as u64,
        }
    }

    /// Returns `[major, mid, minor]`.
    #[must_use]
    pub const fn as_array(self) -> [u64; 3] {
        [self.major, self.mid, self.minor]
    }
}

impl fmt::Display for ValueParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.mid, self.minor)
    }
}

/// Optional overrides for [`Item::new`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItemOptions {
    /// Item name.
    pub name: Option<String>,
    /// Inventory category.
    pub category: Option<ItemCategory>,
    /// Per-unit burden.
    pub burden: Option<f64>,
    /// Per-unit value.
    pub value: Option<f64>,
    /// Stack cap.
    pub max_quantity: Option<i64>,
    /// Current stack size.
    pub quantity: Option<i64>,
}

impl ItemOptions {
    /// Sets the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the category.
    #[must_use]
    pub const fn with_category(mut self, category: ItemCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Sets the burden.
    #[must_use]
    pub const fn with_burden(mut self, burden: f64) -> Self {
        self.burden = Some(burden);
        self
    }

    /// Sets the value.
    #[must_use]
    pub const fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    /// Sets the stack cap.
    #[must_use]
    pub const fn with_max_quantity(mut self, max_quantity: i64) -> Self {
        self.max_quantity = Some(max_quantity);
        self
    }

    /// Sets the stack size.
    #[must_use]
    pub const fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }
}

/// A stackable inventory object.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Item {
    name: String,
    category: ItemCategory,
    burden: f64,
    value: f64,
    max_quantity: u32,
    quantity: u32,
}

impl Default for Item {
    fn default() -> Self {
        Self {
            name: DEFAULT_ITEM_NAME.to_string(),
            category: ItemCategory::General,
            burden: DEFAULT_BURDEN,
            value: DEFAULT_VALUE,
            max_quantity: 1,
            quantity: 1,
        }
    }
}

impl Item {
    /// Creates an item, applying `options` over the defaults.
    ///
    /// Overrides apply in the order name, category, burden, value,
    /// `max_quantity`, quantity, so the quantity clamps against the final cap.
    #[must_use]
    pub fn new(options: ItemOptions) -> Self {
        let mut item = Self::default();
        item.apply(options);
        item
    }

    pub(crate) fn apply(&mut self, options: ItemOptions) {
        if let Some(name) = options.name {
            self.set_name(name);
        }
        if let Some(category) = options.category {
            self.set_category(category);
        }
        if let Some(burden) = options.burden {
            self.set_burden(burden);
        }
        if let Some(value) = options.value {
            self.set_value(value);
        }
        if let Some(max_quantity) = options.max_quantity {
            self.set_max_quantity(max_quantity);
        }
        if let Some(quantity) = options.quantity {
            self.set_quantity(quantity);
        }
    }

    /// Item name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the item.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Inventory category.
    #[must_use]
    pub const fn category(&self) -> ItemCategory {
        self.category
    }

    /// Changes the category.
    pub fn set_category(&mut self, category: ItemCategory) {
        self.category = category;
    }

    /// Per-unit burden.
    #[must_use]
    pub const fn burden(&self) -> f64 {
        self.burden
    }

    /// Burden of the whole stack.
    #[must_use]
    pub fn burden_quantity(&self) -> f64 {
        self.burden * f64::from(self.quantity)
    }

    /// Sets the burden, clamping below at zero.
    ///
    /// Returns `false` if the input had to be clamped.
    pub fn set_burden(&mut self, burden: f64) -> bool {
        self.burden = burden.max(0.0);
        burden >= 0.0
    }

    /// Per-unit value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Value of the whole stack.
    #[must_use]
    pub fn value_quantity(&self) -> f64 {
        self.value * f64::from(self.quantity)
    }

    /// Sets the value, clamping below at zero.
    ///
    /// Returns `false` if the input had to be clamped.
    pub fn set_value(&mut self, value: f64) -> bool {
        self.value = value.max(0.0);
        value >= 0.0
    }

    /// Stack cap.
    #[must_use]
    pub const fn max_quantity(&self) -> u32 {
        self.max_quantity
    }

    /// Sets the stack cap (at least 1) and re-clamps the quantity.
    ///
    /// Returns `false` if the cap had to be clamped.
    pub fn set_max_quantity(&mut self, max_quantity: i64) -> bool {
        let clamped = max_quantity.clamp(1, i64::from(u32::MAX));
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            self.max_quantity = clamped as u32;
        }
        self.set_quantity(i64::from(self.quantity));
        clamped == max_quantity
    }

    /// Current stack size.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Sets the stack size, clamped into `1..=max_quantity`.
    ///
    /// Returns `false` if the input had to be clamped.
    pub fn set_quantity(&mut self, quantity: i64) -> bool {
        let clamped = quantity.clamp(1, i64::from(self.max_quantity));
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            self.quantity = clamped as u32;
        }
        clamped == quantity
    }

    /// Per-unit value split into denominations.
    #[must_use]
    pub fn value_parts(&self) -> ValueParts {
        ValueParts::from_value(self.value)
    }

    /// Stack value split into denominations.
    #[must_use]
    pub fn value_quantity_parts(&self) -> ValueParts {
        ValueParts::from_value(self.value_quantity())
    }

    /// One-line description, with either the stack or the unit value.
    #[must_use]
    pub fn describe(&self, as_quantity: bool) -> String {
        let (label, parts) = if as_quantity {
            ("valueQuantity:", self.value_quantity_parts())
        } else {
            ("value:", self.value_parts())
        };
        format!("{} {} {label} {parts}", self.name, self.category)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe(true))
    }
}
