//! Passage range value type.
//!
//! # Responsibility
//! - Identify a contiguous span of units inside one section.
//! - Validate spans against externally supplied section unit counts.
//!
//! # Invariants
//! - `1 <= section_id <= MAX_SECTION_ID`.
//! - `1 <= start_unit <= end_unit <= unit count of the section`.
//! - A range never spans more than one section.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Highest section number known to the domain.
pub const MAX_SECTION_ID: u32 = 114;

/// Contiguous span of units within one section.
///
/// Fields are private so every value in circulation has passed validation.
/// Serialized as `sectionId`/`startUnit`/`endUnit` to match the storage
/// exchange shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassageRange {
    section_id: u32,
    start_unit: u32,
    end_unit: u32,
}

/// Reasons a passage range is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidRangeError {
    /// Section number is zero, above `MAX_SECTION_ID`, or unknown to the catalog.
    SectionOutOfBounds { section_id: u32, max_section_id: u32 },
    /// Units are 1-based.
    StartBelowOne,
    StartAfterEnd { start_unit: u32, end_unit: u32 },
    EndBeyondSection {
        section_id: u32,
        end_unit: u32,
        unit_count: u32,
    },
}

impl Display for InvalidRangeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SectionOutOfBounds {
                section_id,
                max_section_id,
            } => write!(
                f,
                "section {section_id} is out of bounds (expected 1..={max_section_id})"
            ),
            Self::StartBelowOne => write!(f, "start unit must be >= 1"),
            Self::StartAfterEnd {
                start_unit,
                end_unit,
            } => write!(
                f,
                "start unit ({start_unit}) must be <= end unit ({end_unit})"
            ),
            Self::EndBeyondSection {
                section_id,
                end_unit,
                unit_count,
            } => write!(
                f,
                "end unit ({end_unit}) exceeds section {section_id} unit count ({unit_count})"
            ),
        }
    }
}

impl Error for InvalidRangeError {}

impl PassageRange {
    /// Builds a range after checking it against the section's unit count.
    ///
    /// Checks run in order: section bounds, start >= 1, start <= end,
    /// end <= `section_unit_count`. The first failing check is reported.
    pub fn validate(
        section_id: u32,
        start_unit: u32,
        end_unit: u32,
        section_unit_count: u32,
    ) -> Result<Self, InvalidRangeError> {
        Self::check_shape(section_id, start_unit, end_unit)?;
        if end_unit > section_unit_count {
            return Err(InvalidRangeError::EndBeyondSection {
                section_id,
                end_unit,
                unit_count: section_unit_count,
            });
        }

        Ok(Self {
            section_id,
            start_unit,
            end_unit,
        })
    }

    /// Rebuilds a range read back from storage.
    ///
    /// Only the shape is checked; the unit count was enforced when the
    /// range was first validated.
    pub fn from_persisted(
        section_id: u32,
        start_unit: u32,
        end_unit: u32,
    ) -> Result<Self, InvalidRangeError> {
        Self::check_shape(section_id, start_unit, end_unit)?;
        Ok(Self {
            section_id,
            start_unit,
            end_unit,
        })
    }

    /// Validates everything that does not depend on reference data.
    ///
    /// Used on read paths where section unit counts are not available.
    pub fn check(&self) -> Result<(), InvalidRangeError> {
        Self::check_shape(self.section_id, self.start_unit, self.end_unit)
    }

    fn check_shape(section_id: u32, start_unit: u32, end_unit: u32) -> Result<(), InvalidRangeError> {
        if section_id == 0 || section_id > MAX_SECTION_ID {
            return Err(InvalidRangeError::SectionOutOfBounds {
                section_id,
                max_section_id: MAX_SECTION_ID,
            });
        }
        if start_unit < 1 {
            return Err(InvalidRangeError::StartBelowOne);
        }
        if start_unit > end_unit {
            return Err(InvalidRangeError::StartAfterEnd {
                start_unit,
                end_unit,
            });
        }
        Ok(())
    }

    pub fn section_id(&self) -> u32 {
        self.section_id
    }

    pub fn start_unit(&self) -> u32 {
        self.start_unit
    }

    pub fn end_unit(&self) -> u32 {
        self.end_unit
    }

    /// Number of units covered, inclusive of both ends.
    pub fn unit_count(&self) -> u32 {
        self.end_unit - self.start_unit + 1
    }

    /// Returns whether `unit` of `section_id` falls inside this range.
    pub fn contains(&self, section_id: u32, unit: u32) -> bool {
        self.section_id == section_id && (self.start_unit..=self.end_unit).contains(&unit)
    }
}

impl Display for PassageRange {
    /// `2:1-5` for spans, `2:7` for a single unit.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.start_unit == self.end_unit {
            write!(f, "{}:{}", self.section_id, self.start_unit)
        } else {
            write!(
                f,
                "{}:{}-{}",
                self.section_id, self.start_unit, self.end_unit
            )
        }
    }
}
