//! Review item domain model.
//!
//! # Responsibility
//! - Define the record tracking one memorized passage and its schedule.
//! - Provide metadata edits and persisted-state validation.
//!
//! # Invariants
//! - `id` is stable and never reused for another item.
//! - `range` never changes after creation; edits are delete + recreate.
//! - `name` is non-empty after trimming.
//! - `interval >= 1` and `next_review >= created_at`.
//! - `level` only seeds the starting interval.

use crate::model::passage::{InvalidRangeError, PassageRange};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Stable identifier for every review item.
pub type ReviewItemId = Uuid;

/// Learner's self-declared familiarity with a passage at creation time.
///
/// Variants are ordered by increasing confidence.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ProficiencyLevel {
    #[default]
    New,
    Beginner,
    Intermediate,
    Advanced,
    Mastered,
}

impl ProficiencyLevel {
    /// Every level, in increasing confidence order.
    pub const ALL: [ProficiencyLevel; 5] = [
        Self::New,
        Self::Beginner,
        Self::Intermediate,
        Self::Advanced,
        Self::Mastered,
    ];

    /// Position in `ALL`; used as a table index by the scheduling policy.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Stable string id used in storage and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Mastered => "mastered",
        }
    }
}

impl Display for ProficiencyLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a level string is not one of the five known ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(pub String);

impl Display for ParseLevelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown proficiency level `{}`; expected new|beginner|intermediate|advanced|mastered",
            self.0
        )
    }
}

impl Error for ParseLevelError {}

impl FromStr for ProficiencyLevel {
    type Err = ParseLevelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == normalized)
            .ok_or_else(|| ParseLevelError(value.trim().to_string()))
    }
}

/// Item-level validation errors.
///
/// `Range` is kept separate from the name checks so callers can render
/// range feedback apart from name feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyName,
    Range(InvalidRangeError),
    NilId,
    IntervalBelowOne,
    NextReviewBeforeCreated {
        created_at: NaiveDate,
        next_review: NaiveDate,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::Range(err) => write!(f, "invalid passage range: {err}"),
            Self::NilId => write!(f, "review item id must not be nil"),
            Self::IntervalBelowOne => write!(f, "interval must be at least 1 day"),
            Self::NextReviewBeforeCreated {
                created_at,
                next_review,
            } => write!(
                f,
                "next review ({next_review}) must not be before creation date ({created_at})"
            ),
        }
    }
}

impl Error for ValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Range(err) => Some(err),
            _ => None,
        }
    }
}

impl From<InvalidRangeError> for ValidationError {
    fn from(value: InvalidRangeError) -> Self {
        Self::Range(value)
    }
}

/// Derived, query-time state of an item. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewPhase {
    /// Never reviewed and not yet due.
    Fresh,
    /// Reviewed at least once and due in the future.
    Active,
    /// `next_review` is today or earlier.
    Due,
    /// Reviewed on the queried day.
    CompletedToday,
}

/// One memorized passage plus its scheduling state.
///
/// Range fields are flattened into the record so the exchange shape stays
/// `sectionId`/`startUnit`/`endUnit` at the top level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ReviewItemRecord")]
pub struct ReviewItem {
    pub id: ReviewItemId,
    #[serde(flatten)]
    pub range: PassageRange,
    pub name: String,
    pub description: String,
    pub level: ProficiencyLevel,
    /// Current spacing between reviews, in days.
    pub interval: u32,
    pub review_count: u32,
    pub created_at: NaiveDate,
    pub next_review: NaiveDate,
    pub completed_today: bool,
    /// Calendar day `completed_today` was last set on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reviewed: Option<NaiveDate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewItemRecord {
    id: ReviewItemId,
    #[serde(flatten)]
    range: PassageRange,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    level: ProficiencyLevel,
    interval: u32,
    review_count: u32,
    created_at: NaiveDate,
    next_review: NaiveDate,
    completed_today: bool,
    #[serde(default)]
    last_reviewed: Option<NaiveDate>,
}

impl TryFrom<ReviewItemRecord> for ReviewItem {
    type Error = ValidationError;

    fn try_from(record: ReviewItemRecord) -> Result<Self, Self::Error> {
        let item = Self {
            id: record.id,
            range: record.range,
            name: record.name,
            description: record.description,
            level: record.level,
            interval: record.interval,
            review_count: record.review_count,
            created_at: record.created_at,
            next_review: record.next_review,
            completed_today: record.completed_today,
            last_reviewed: record.last_reviewed,
        };
        item.validate()?;
        Ok(item)
    }
}

impl ReviewItem {
    /// Checks persisted-state invariants.
    ///
    /// Section unit counts are reference data and are not consulted here;
    /// only the range shape is checked.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_nil() {
            return Err(ValidationError::NilId);
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        self.range.check()?;
        if self.interval < 1 {
            return Err(ValidationError::IntervalBelowOne);
        }
        if self.next_review < self.created_at {
            return Err(ValidationError::NextReviewBeforeCreated {
                created_at: self.created_at,
                next_review: self.next_review,
            });
        }
        Ok(())
    }

    /// Returns a copy with new name and description.
    ///
    /// Scheduling state is left untouched.
    pub fn with_metadata(
        &self,
        name: &str,
        description: &str,
    ) -> Result<ReviewItem, ValidationError> {
        Ok(ReviewItem {
            name: normalize_name(name)?,
            description: description.trim().to_string(),
            ..self.clone()
        })
    }

    /// Returns whether the item is due on `today`.
    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.next_review <= today
    }

    /// Derives the item's phase for `today`.
    pub fn phase(&self, today: NaiveDate) -> ReviewPhase {
        if self.completed_today && self.last_reviewed == Some(today) {
            ReviewPhase::CompletedToday
        } else if self.is_due(today) {
            ReviewPhase::Due
        } else if self.review_count == 0 {
            ReviewPhase::Fresh
        } else {
            ReviewPhase::Active
        }
    }
}

/// Trims a display name and collapses inner whitespace runs.
pub fn normalize_name(name: &str) -> Result<String, ValidationError> {
    let normalized = WHITESPACE_RE.replace_all(name.trim(), " ");
    if normalized.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(normalized.into_owned())
}
