//! Interval policy for spaced review.
//!
//! # Responsibility
//! - Map a starting proficiency level to the first interval.
//! - Grow the interval after every completed review.
//! - Turn an interval into the next calendar review date.
//!
//! # Invariants
//! - All functions are total and deterministic; none reads a clock.
//! - `next_interval(i) >= i` for every `i <= max_interval_days`.
//! - Returned intervals stay within `[min_interval_days, max_interval_days]`.

use crate::model::review_item::ProficiencyLevel;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Starting interval in days, indexed by `ProficiencyLevel::index()`.
const INITIAL_INTERVAL_DAYS: [u32; ProficiencyLevel::ALL.len()] = [1, 2, 5, 10, 20];

pub const DEFAULT_GROWTH_FACTOR: f64 = 2.0;
pub const DEFAULT_MIN_INTERVAL_DAYS: u32 = 1;
pub const DEFAULT_MAX_INTERVAL_DAYS: u32 = 365;

/// Policy configuration errors.
#[derive(Debug, Clone, PartialEq)]
pub enum PolicyError {
    /// Factor is NaN, infinite or below 1.0 (would shrink intervals).
    InvalidGrowthFactor(f64),
    ZeroMinInterval,
    MinAboveMax { min: u32, max: u32 },
}

impl Display for PolicyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidGrowthFactor(value) => {
                write!(f, "growth factor must be a finite value >= 1.0, got {value}")
            }
            Self::ZeroMinInterval => write!(f, "minimum interval must be at least 1 day"),
            Self::MinAboveMax { min, max } => write!(
                f,
                "minimum interval ({min}) must not exceed maximum interval ({max})"
            ),
        }
    }
}

impl Error for PolicyError {}

/// Growth-on-success interval policy.
///
/// Every completed review counts as a successful recall; there is no
/// failure path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingPolicy {
    pub growth_factor: f64,
    pub min_interval_days: u32,
    pub max_interval_days: u32,
}

impl Default for SchedulingPolicy {
    fn default() -> Self {
        Self {
            growth_factor: DEFAULT_GROWTH_FACTOR,
            min_interval_days: DEFAULT_MIN_INTERVAL_DAYS,
            max_interval_days: DEFAULT_MAX_INTERVAL_DAYS,
        }
    }
}

impl SchedulingPolicy {
    /// Rejects configurations that would make the policy shrink or unbounded.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if !self.growth_factor.is_finite() || self.growth_factor < 1.0 {
            return Err(PolicyError::InvalidGrowthFactor(self.growth_factor));
        }
        if self.min_interval_days == 0 {
            return Err(PolicyError::ZeroMinInterval);
        }
        if self.min_interval_days > self.max_interval_days {
            return Err(PolicyError::MinAboveMax {
                min: self.min_interval_days,
                max: self.max_interval_days,
            });
        }
        Ok(())
    }

    /// First interval for a newly created item.
    ///
    /// With default bounds this is exactly the level table; custom bounds
    /// clamp the table value.
    pub fn initial_interval(&self, level: ProficiencyLevel) -> u32 {
        self.clamp(INITIAL_INTERVAL_DAYS[level.index()])
    }

    /// Interval after one more successful review.
    pub fn next_interval(&self, current_interval: u32) -> u32 {
        let grown = (f64::from(current_interval) * self.growth_factor).round();
        if grown >= f64::from(self.max_interval_days) {
            return self.max_interval_days;
        }
        self.clamp(grown as u32)
    }

    fn clamp(&self, days: u32) -> u32 {
        days.clamp(self.min_interval_days, self.max_interval_days)
    }
}

/// `initial_interval` under the default policy.
pub fn initial_interval(level: ProficiencyLevel) -> u32 {
    SchedulingPolicy::default().initial_interval(level)
}

/// `next_interval` under the default policy.
pub fn next_interval(current_interval: u32) -> u32 {
    SchedulingPolicy::default().next_interval(current_interval)
}

/// Date on which an item reviewed on `today` becomes due again.
pub fn next_review_date(today: NaiveDate, interval: u32) -> NaiveDate {
    add_days(today, interval)
}

/// Calendar-day addition saturating at `NaiveDate::MAX`.
pub(crate) fn add_days(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}
