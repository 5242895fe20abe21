//! # Economy Error Types
//!
//! All errors that can occur in the economy system.
//!
//! Item and equipment setters clamp instead of failing, so nothing here
//! describes out-of-range numeric input.

use thiserror::Error;

/// Errors that can occur in the economy system.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EconomyError {
    /// The subtype is not on the whitelist for the item type.
    #[error("invalid subtype {subtype} for {item_type}")]
    InvalidSubtype {
        /// The rejected subtype.
        subtype: String,
        /// The item type it was checked against.
        item_type: String,
    },

    /// The item type is not one of `armor`, `jewelry` or `weapon`.
    #[error("unsupported item type: {0}")]
    UnsupportedItemType(String),

    /// A fixed loot pool was asked for an item but holds none.
    #[error("loot pool '{pool}' has no items")]
    EmptyPool {
        /// Name of the empty pool.
        pool: String,
    },
}

/// Result type for economy operations.
pub type EconomyResult<T> = Result<T, EconomyError>;
