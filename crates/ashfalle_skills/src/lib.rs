//! # Ashfalle Skills
//!
//! Skill progression for the Ashfalle RPG.
//!
//! ## Example
//!
//! ```rust
//! use ashfalle_skills::{ExperienceChart, ExperienceChartOptions};
//!
//! let chart = ExperienceChart::new(ExperienceChartOptions::default().with_skill_cap(10), 50)?;
//! assert_eq!(chart.next_cost(1)?, Some(100));
//! assert_eq!(chart.next_cost(10)?, None);
//! # Ok::<(), ashfalle_skills::SkillError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod experience;

pub use error::{SkillError, SkillResult};
pub use experience::{
    ExperienceChart, ExperienceChartOptions, DEFAULT_INCREMENT_RAMP, DEFAULT_LOWER_ADJUST,
};
