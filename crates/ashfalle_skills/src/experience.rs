//! # Experience Charts
//!
//! An [`ExperienceChart`] lists the experience needed to advance from each
//! skill level to the next. Costs grow cubically from two knobs:
//!
//! - `increment_ramp` (`r`): how fast the per-level increase itself grows
//! - `lower_adjust`: a flat offset added to every cost
//!
//! The first cost is `r + lower_adjust`; each later cost adds the running ramp.
//! With the defaults (`r = 5`, `lower_adjust = 95`) the chart starts
//! `100, 115, 145, 195, ...`.
//!
//! The last level is the cap: there is no cost to advance from it.

use std::fmt;

use ashfalle_shared::{GameSettings, DEFAULT_MAX_PLAYER_LEVEL, MAX_PLAYER_LEVEL_LIMIT};

use crate::error::{SkillError, SkillResult};

/// Default growth of the per-level increase.
pub const DEFAULT_INCREMENT_RAMP: u64 = 5;

/// Default flat offset added to every cost.
pub const DEFAULT_LOWER_ADJUST: u64 = 95;

/// Optional overrides for [`ExperienceChart::new`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExperienceChartOptions {
    /// Number of levels; defaults to the max player level.
    pub skill_cap: Option<u32>,
    /// Growth of the per-level increase.
    pub increment_ramp: Option<u64>,
    /// Flat offset added to every cost.
    pub lower_adjust: Option<u64>,
}

impl ExperienceChartOptions {
    /// Sets the skill cap.
    #[must_use]
    pub const fn with_skill_cap(mut self, skill_cap: u32) -> Self {
        self.skill_cap = Some(skill_cap);
        self
    }

    /// Sets the increment ramp.
    #[must_use]
    pub const fn with_increment_ramp(mut self, increment_ramp: u64) -> Self {
        self.increment_ramp = Some(increment_ramp);
        self
    }

    /// Sets the lower adjust.
    #[must_use]
    pub const fn with_lower_adjust(mut self, lower_adjust: u64) -> Self {
        self.lower_adjust = Some(lower_adjust);
        self
    }
}

/// Per-level experience costs for one skill.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExperienceChart {
    /// `chart[i]` is the cost to go from level `i + 1` to `i + 2`.
    chart: Vec<u64>,
    skill_cap: u32,
    increment_ramp: u64,
    lower_adjust: u64,
    max_player_level: u32,
}

impl Default for ExperienceChart {
    fn default() -> Self {
        let mut chart = Self {
            chart: Vec::new(),
            skill_cap: DEFAULT_MAX_PLAYER_LEVEL,
            increment_ramp: DEFAULT_INCREMENT_RAMP,
            lower_adjust: DEFAULT_LOWER_ADJUST,
            max_player_level: DEFAULT_MAX_PLAYER_LEVEL,
        };
        chart.rebuild();
        chart
    }
}

impl ExperienceChart {
    /// Builds a chart whose cap may not exceed `max_player_level`.
    ///
    /// `max_player_level` is itself limited to `MAX_PLAYER_LEVEL_LIMIT`.
    ///
    /// # Errors
    ///
    /// Returns `SkillError::InvalidSkillCap` if `options.skill_cap` is outside
    /// `1..=max_player_level`.
    pub fn new(options: ExperienceChartOptions, max_player_level: u32) -> SkillResult<Self> {
        let max_player_level = max_player_level.min(MAX_PLAYER_LEVEL_LIMIT);
        let skill_cap = options.skill_cap.unwrap_or(max_player_level);
        validate_cap(skill_cap, max_player_level)?;

        let mut chart = Self {
            chart: Vec::new(),
            skill_cap,
            increment_ramp: options.increment_ramp.unwrap_or(DEFAULT_INCREMENT_RAMP),
            lower_adjust: options.lower_adjust.unwrap_or(DEFAULT_LOWER_ADJUST),
            max_player_level,
        };
        chart.rebuild();
        Ok(chart)
    }

    /// Builds a chart capped by `settings.game.max_player_level`.
    ///
    /// # Errors
    ///
    /// Returns `SkillError::InvalidSkillCap` if `options.skill_cap` is outside
    /// `1..=max_player_level`.
    pub fn from_settings(options: ExperienceChartOptions, settings: &GameSettings) -> SkillResult<Self> {
        Self::new(options, settings.game.max_player_level)
    }

    fn rebuild(&mut self) {
        let ramp = self.increment_ramp;
        let levels = self.skill_cap as usize;

        let mut increment = ramp;
        let mut step = ramp;
        let mut cost = ramp.saturating_add(self.lower_adjust);

        self.chart.clear();
        self.chart.reserve(levels);
        self.chart.push(cost);
        for _ in 1..levels {
            increment = increment.saturating_add(ramp);
            step = step.saturating_add(increment);
            cost = cost.saturating_add(step);
            self.chart.push(cost);
        }

        tracing::debug!(
            "experience chart rebuilt: {levels} levels, ramp {ramp}, adjust {}",
            self.lower_adjust
        );
    }

    /// Raw costs, one per level. The entry for the cap is never charged.
    #[must_use]
    pub fn chart(&self) -> &[u64] {
        &self.chart
    }

    /// Number of levels.
    #[must_use]
    pub const fn skill_cap(&self) -> u32 {
        self.skill_cap
    }

    /// Changes the number of levels and rebuilds.
    ///
    /// # Errors
    ///
    /// Returns `SkillError::InvalidSkillCap` if `skill_cap` is outside
    /// `1..=max_player_level`; the chart is left unchanged.
    pub fn set_skill_cap(&mut self, skill_cap: u32) -> SkillResult<()> {
        validate_cap(skill_cap, self.max_player_level)?;
        self.skill_cap = skill_cap;
        self.rebuild();
        Ok(())
    }

    /// Growth of the per-level increase.
    #[must_use]
    pub const fn increment_ramp(&self) -> u64 {
        self.increment_ramp
    }

    /// Changes the increment ramp and rebuilds.
    pub fn set_increment_ramp(&mut self, increment_ramp: u64) {
        self.increment_ramp = increment_ramp;
        self.rebuild();
    }

    /// Flat offset added to every cost.
    #[must_use]
    pub const fn lower_adjust(&self) -> u64 {
        self.lower_adjust
    }

    /// Changes the lower adjust and rebuilds.
    pub fn set_lower_adjust(&mut self, lower_adjust: u64) {
        self.lower_adjust = lower_adjust;
        self.rebuild();
    }

    /// Experience needed to advance from `skill_level`.
    ///
    /// Returns `Ok(None)` at the cap.
    ///
    /// # Errors
    ///
    /// Returns `SkillError::InvalidSkillLevel` if `skill_level` is outside
    /// `1..=skill_cap`.
    pub fn next_cost(&self, skill_level: u32) -> SkillResult<Option<u64>> {
        if skill_level < 1 || skill_level > self.skill_cap {
            return Err(SkillError::InvalidSkillLevel {
                level: skill_level,
                max: self.skill_cap,
            });
        }
        if skill_level == self.skill_cap {
            return Ok(None);
        }
        Ok(self.chart.get(skill_level as usize - 1).copied())
    }

    /// Total experience needed to reach `skill_level` from level 1.
    ///
    /// Levels past the cap count as the cap.
    #[must_use]
    pub fn total_cost_up_to(&self, skill_level: u32) -> u64 {
        if skill_level <= 1 {
            return 0;
        }
        let last = (skill_level as usize - 1).min(self.chart.len().saturating_sub(1));
        self.chart[..last]
            .iter()
            .fold(0u64, |total, &cost| total.saturating_add(cost))
    }
}

fn validate_cap(skill_cap: u32, max_player_level: u32) -> SkillResult<()> {
    if skill_cap < 1 || skill_cap > max_player_level {
        return Err(SkillError::InvalidSkillCap {
            cap: skill_cap,
            max: max_player_level,
        });
    }
    Ok(())
}

impl fmt::Display for ExperienceChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for level in 1..=self.skill_cap {
            match self.next_cost(level) {
                Ok(Some(cost)) => writeln!(f, "Skill level: {level}: {cost}")?,
                _ => writeln!(f, "Skill level: {level}: max")?,
            }
        }
        Ok(())
    }
}
