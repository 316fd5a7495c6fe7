//! Creation and review completion for single items.
//!
//! Both operations build new values; the input item is never mutated.

use crate::model::passage::PassageRange;
use crate::model::review_item::{normalize_name, ProficiencyLevel, ReviewItem, ValidationError};
use crate::schedule::policy::{next_review_date, SchedulingPolicy};
use chrono::NaiveDate;
use uuid::Uuid;

/// Creates a review item seeded from `level`.
///
/// # Contract
/// - `interval = policy.initial_interval(level)`, `review_count = 0`.
/// - `created_at = today`, `next_review = today + interval`.
/// - `completed_today = false`.
///
/// # Errors
/// - `ValidationError::EmptyName` when `name` is blank after trimming.
pub fn create_review_item(
    range: PassageRange,
    level: ProficiencyLevel,
    name: &str,
    description: &str,
    today: NaiveDate,
    policy: &SchedulingPolicy,
) -> Result<ReviewItem, ValidationError> {
    let name = normalize_name(name)?;
    let interval = policy.initial_interval(level);

    Ok(ReviewItem {
        id: Uuid::new_v4(),
        range,
        name,
        description: description.trim().to_string(),
        level,
        interval,
        review_count: 0,
        created_at: today,
        next_review: next_review_date(today, interval),
        completed_today: false,
        last_reviewed: None,
    })
}

/// Records one successful review on `today`.
///
/// Repeat calls on the same day are not rejected; coalescing is left to
/// the caller.
pub fn complete_review(
    item: &ReviewItem,
    today: NaiveDate,
    policy: &SchedulingPolicy,
) -> ReviewItem {
    let interval = policy.next_interval(item.interval);
    ReviewItem {
        interval,
        review_count: item.review_count.saturating_add(1),
        next_review: next_review_date(today, interval),
        completed_today: true,
        last_reviewed: Some(today),
        ..item.clone()
    }
}
