//! Collection-level queries over review items.
//!
//! # Responsibility
//! - Classify items as due, upcoming within a horizon, or neither.
//! - Provide presentation sort orders.
//! - Clear stale "completed today" flags once the calendar day advances.
//!
//! # Invariants
//! - Every function takes `today` explicitly; callers pass one value per pass.
//! - Classification is a partition: each item lands in exactly one bucket.
//! - Outputs preserve input order unless a sort is requested.

use crate::model::review_item::ReviewItem;
use crate::schedule::policy::add_days;
use chrono::NaiveDate;
use std::cmp::Reverse;

/// Bucket an item falls into for a given day and horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStatus {
    /// `next_review <= today`.
    Due,
    /// `today < next_review <= today + horizon`.
    Upcoming,
    /// Beyond the horizon.
    Later,
}

/// Presentation orderings. All are stable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Soonest due first.
    #[default]
    NextReviewAsc,
    /// Newest first.
    CreatedNewest,
    /// Most reviewed first.
    MostReviewed,
}

/// Counts shown on a review dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewSummary {
    pub total: usize,
    pub due: usize,
    pub upcoming: usize,
    pub later: usize,
    pub completed_today: usize,
    pub total_reviews: u64,
}

/// Tallies `items` for `today` and `horizon_days`.
///
/// `due + upcoming + later == total` always holds.
pub fn summarize(items: &[ReviewItem], today: NaiveDate, horizon_days: u32) -> ReviewSummary {
    items
        .iter()
        .fold(ReviewSummary::default(), |mut summary, item| {
            summary.total += 1;
            match classify(item, today, horizon_days) {
                ReviewStatus::Due => summary.due += 1,
                ReviewStatus::Upcoming => summary.upcoming += 1,
                ReviewStatus::Later => summary.later += 1,
            }
            if item.completed_today && item.last_reviewed == Some(today) {
                summary.completed_today += 1;
            }
            summary.total_reviews += u64::from(item.review_count);
            summary
        })
}

/// Classifies one item.
pub fn classify(item: &ReviewItem, today: NaiveDate, horizon_days: u32) -> ReviewStatus {
    if item.next_review <= today {
        ReviewStatus::Due
    } else if item.next_review <= add_days(today, horizon_days) {
        ReviewStatus::Upcoming
    } else {
        ReviewStatus::Later
    }
}

/// Items whose next review falls on or before `today`.
pub fn get_due_items(items: &[ReviewItem], today: NaiveDate) -> Vec<ReviewItem> {
    items
        .iter()
        .filter(|item| item.is_due(today))
        .cloned()
        .collect()
}

/// Items due strictly after `today` and no later than `today + horizon_days`.
///
/// Items already due belong to `get_due_items` and are excluded here.
pub fn get_upcoming_reviews(
    items: &[ReviewItem],
    today: NaiveDate,
    horizon_days: u32,
) -> Vec<ReviewItem> {
    items
        .iter()
        .filter(|item| classify(item, today, horizon_days) == ReviewStatus::Upcoming)
        .cloned()
        .collect()
}

/// Returns `items` reordered by `order`; equal keys keep input order.
pub fn sort_items(items: &[ReviewItem], order: SortOrder) -> Vec<ReviewItem> {
    let mut sorted = items.to_vec();
    match order {
        SortOrder::NextReviewAsc => sorted.sort_by_key(|item| item.next_review),
        SortOrder::CreatedNewest => sorted.sort_by_key(|item| Reverse(item.created_at)),
        SortOrder::MostReviewed => sorted.sort_by_key(|item| Reverse(item.review_count)),
    }
    sorted
}

/// Clears `completed_today` on items marked before `today`.
///
/// A flag with no recorded review day is treated as stale. Items are
/// otherwise returned unchanged and in input order; applying the sweep
/// twice with the same `today` equals applying it once.
pub fn reset_daily_completions(items: &[ReviewItem], today: NaiveDate) -> Vec<ReviewItem> {
    items
        .iter()
        .map(|item| {
            if is_stale_completion(item, today) {
                ReviewItem {
                    completed_today: false,
                    ..item.clone()
                }
            } else {
                item.clone()
            }
        })
        .collect()
}

/// Returns whether the sweep would change `item`.
pub fn is_stale_completion(item: &ReviewItem, today: NaiveDate) -> bool {
    item.completed_today && item.last_reviewed.map_or(true, |day| day < today)
}
