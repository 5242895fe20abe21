//! # Skill Error Types

use thiserror::Error;

/// Errors that can occur in the skill system.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkillError {
    /// The skill cap is outside `1..=max`.
    #[error("invalid skill cap {cap} (1 - {max})")]
    InvalidSkillCap {
        /// The rejected cap.
        cap: u32,
        /// The configured max player level.
        max: u32,
    },

    /// The skill level is outside `1..=max`.
    #[error("invalid skill level {level} (1 - {max})")]
    InvalidSkillLevel {
        /// The rejected level.
        level: u32,
        /// Number of levels in the chart.
        max: u32,
    },
}

/// Result type for skill operations.
pub type SkillResult<T> = Result<T, SkillError>;
