//! Section reference data used to validate passage ranges.
//!
//! # Invariants
//! - Sections are numbered contiguously from 1.
//! - Every known section has at least one unit.

use crate::model::passage::{InvalidRangeError, PassageRange, MAX_SECTION_ID};
use std::error::Error;
use std::fmt::{Display, Formatter};

const STANDARD_UNIT_COUNTS: [u32; MAX_SECTION_ID as usize] = [
    7, 286, 200, 176, 120, 165, 206, 75, 129, 109, 123, 111, 43, 52, 99, 128, 111, 110, 98, 135,
    112, 78, 118, 64, 77, 227, 93, 88, 69, 60, 34, 30, 73, 54, 45, 83, 182, 88, 75, 85, 54, 53, 89,
    59, 37, 35, 38, 29, 18, 45, 60, 49, 62, 55, 78, 96, 29, 22, 24, 13, 14, 11, 11, 18, 12, 12, 30,
    52, 52, 44, 28, 28, 20, 56, 40, 31, 50, 40, 46, 42, 29, 19, 36, 25, 22, 17, 19, 26, 30, 20, 15,
    21, 11, 8, 8, 19, 5, 8, 8, 11, 11, 8, 3, 9, 5, 4, 7, 3, 6, 3, 5, 4, 5, 6,
];

/// Catalog construction errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    Empty,
    TooManySections { count: usize, max_section_id: u32 },
    EmptySection(u32),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "section catalog must not be empty"),
            Self::TooManySections {
                count,
                max_section_id,
            } => write!(
                f,
                "section catalog has {count} sections; at most {max_section_id} are supported"
            ),
            Self::EmptySection(section_id) => {
                write!(f, "section {section_id} must contain at least one unit")
            }
        }
    }
}

impl Error for CatalogError {}

/// Per-section unit counts, index 0 holding section 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionCatalog {
    unit_counts: Vec<u32>,
}

impl SectionCatalog {
    /// Creates a catalog from externally supplied unit counts.
    pub fn new(unit_counts: Vec<u32>) -> Result<Self, CatalogError> {
        if unit_counts.is_empty() {
            return Err(CatalogError::Empty);
        }
        if unit_counts.len() > MAX_SECTION_ID as usize {
            return Err(CatalogError::TooManySections {
                count: unit_counts.len(),
                max_section_id: MAX_SECTION_ID,
            });
        }
        if let Some(index) = unit_counts.iter().position(|count| *count == 0) {
            return Err(CatalogError::EmptySection(index as u32 + 1));
        }
        Ok(Self { unit_counts })
    }

    /// Built-in table for the full 114-section text.
    pub fn standard() -> Self {
        Self {
            unit_counts: STANDARD_UNIT_COUNTS.to_vec(),
        }
    }

    pub fn section_count(&self) -> u32 {
        self.unit_counts.len() as u32
    }

    pub fn unit_count(&self, section_id: u32) -> Option<u32> {
        let index = section_id.checked_sub(1)? as usize;
        self.unit_counts.get(index).copied()
    }

    pub fn total_units(&self) -> u64 {
        self.unit_counts.iter().map(|count| u64::from(*count)).sum()
    }

    /// Validates a range against this catalog's unit count for the section.
    pub fn validate_range(
        &self,
        section_id: u32,
        start_unit: u32,
        end_unit: u32,
    ) -> Result<PassageRange, InvalidRangeError> {
        let unit_count =
            self.unit_count(section_id)
                .ok_or(InvalidRangeError::SectionOutOfBounds {
                    section_id,
                    max_section_id: self.section_count(),
                })?;
        PassageRange::validate(section_id, start_unit, end_unit, unit_count)
    }
}

impl Default for SectionCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
