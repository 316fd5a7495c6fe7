//! Review use-case service.
//!
//! # Responsibility
//! - Wrap the pure scheduling engine in load / transform / save cycles.
//! - Run the daily reset sweep on every load.
//!
//! # Invariants
//! - Each public call uses the single `today` it was given for every step.
//! - The store is only written when the collection actually changed.
//! - Log lines carry ids and counts, never names or descriptions.

use crate::model::catalog::SectionCatalog;
use crate::model::passage::InvalidRangeError;
use crate::model::review_item::{ProficiencyLevel, ReviewItem, ReviewItemId, ValidationError};
use crate::repo::review_item_repo::{ReviewItemStore, StoreError};
use crate::schedule::lifecycle::{complete_review, create_review_item};
use crate::schedule::policy::{PolicyError, SchedulingPolicy};
use crate::schedule::review_set::{
    get_due_items, get_upcoming_reviews, is_stale_completion, reset_daily_completions, sort_items,
    summarize, ReviewSummary, SortOrder,
};
use chrono::NaiveDate;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for review use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Caller input rejected before anything was stored.
    Validation(ValidationError),
    /// Target item does not exist.
    NotFound(ReviewItemId),
    /// Persistence-layer failure.
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "review item not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(id) => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<InvalidRangeError> for ServiceError {
    fn from(value: InvalidRangeError) -> Self {
        Self::Validation(ValidationError::Range(value))
    }
}

/// Request model for adding a passage to the review set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReviewItem {
    pub section_id: u32,
    pub start_unit: u32,
    pub end_unit: u32,
    pub level: ProficiencyLevel,
    pub name: String,
    pub description: String,
}

/// Dashboard snapshot for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewOverview {
    /// Due items, soonest first.
    pub due: Vec<ReviewItem>,
    /// Items due within the horizon, soonest first.
    pub upcoming: Vec<ReviewItem>,
    pub summary: ReviewSummary,
}

/// Review service facade over a store implementation.
pub struct ReviewService<S: ReviewItemStore> {
    store: S,
    policy: SchedulingPolicy,
}

impl<S: ReviewItemStore> ReviewService<S> {
    /// Creates a service after checking the policy configuration.
    pub fn new(store: S, policy: SchedulingPolicy) -> Result<Self, PolicyError> {
        policy.validate()?;
        Ok(Self { store, policy })
    }

    /// Creates a service using the default doubling policy.
    pub fn with_default_policy(store: S) -> Self {
        Self {
            store,
            policy: SchedulingPolicy::default(),
        }
    }

    pub fn policy(&self) -> &SchedulingPolicy {
        &self.policy
    }

    /// Loads the collection and clears completion flags left from earlier days.
    ///
    /// The swept collection is saved back only when a flag was cleared.
    pub fn load(&self, today: NaiveDate) -> ServiceResult<Vec<ReviewItem>> {
        let items = self.store.load_all()?;
        let stale = items
            .iter()
            .filter(|item| is_stale_completion(item, today))
            .count();
        if stale == 0 {
            return Ok(items);
        }

        let swept = reset_daily_completions(&items, today);
        self.store.save_all(&swept)?;
        info!(
            "event=daily_reset module=service status=ok today={today} cleared={stale} total={}",
            swept.len()
        );
        Ok(swept)
    }

    /// Lists every item in the requested order.
    pub fn list(&self, today: NaiveDate, order: SortOrder) -> ServiceResult<Vec<ReviewItem>> {
        let items = self.load(today)?;
        Ok(sort_items(&items, order))
    }

    /// Validates and stores a new item.
    ///
    /// # Errors
    /// - `ServiceError::Validation(ValidationError::Range(_))` for ranges
    ///   outside the catalog.
    /// - `ServiceError::Validation(ValidationError::EmptyName)` for blank names.
    pub fn add_item(
        &self,
        request: &NewReviewItem,
        catalog: &SectionCatalog,
        today: NaiveDate,
    ) -> ServiceResult<ReviewItem> {
        let range =
            catalog.validate_range(request.section_id, request.start_unit, request.end_unit)?;
        let item = create_review_item(
            range,
            request.level,
            &request.name,
            &request.description,
            today,
            &self.policy,
        )?;

        let mut items = self.load(today)?;
        items.push(item.clone());
        self.store.save_all(&items)?;

        info!(
            "event=item_create module=service status=ok id={} range={} level={} interval={}",
            item.id, item.range, item.level, item.interval
        );
        Ok(item)
    }

    /// Records a completed review and returns the advanced item.
    pub fn complete_review(&self, id: ReviewItemId, today: NaiveDate) -> ServiceResult<ReviewItem> {
        let updated = self.replace_item(id, today, |item| {
            Ok(complete_review(item, today, &self.policy))
        })?;

        info!(
            "event=review_complete module=service status=ok id={} interval={} review_count={} next_review={}",
            updated.id, updated.interval, updated.review_count, updated.next_review
        );
        Ok(updated)
    }

    /// Replaces name and description; scheduling state is untouched.
    pub fn update_metadata(
        &self,
        id: ReviewItemId,
        name: &str,
        description: &str,
        today: NaiveDate,
    ) -> ServiceResult<ReviewItem> {
        let updated = self.replace_item(id, today, |item| {
            Ok(item.with_metadata(name, description)?)
        })?;

        info!("event=item_update module=service status=ok id={}", updated.id);
        Ok(updated)
    }

    /// Deletes one item from the store.
    pub fn delete(&self, id: ReviewItemId) -> ServiceResult<()> {
        self.store.delete(id)?;
        info!("event=item_delete module=service status=ok id={id}");
        Ok(())
    }

    /// Builds the due / upcoming view for `today`.
    pub fn overview(&self, today: NaiveDate, horizon_days: u32) -> ServiceResult<ReviewOverview> {
        let items = self.load(today)?;
        let due = sort_items(&get_due_items(&items, today), SortOrder::NextReviewAsc);
        let upcoming = sort_items(
            &get_upcoming_reviews(&items, today, horizon_days),
            SortOrder::NextReviewAsc,
        );

        Ok(ReviewOverview {
            due,
            upcoming,
            summary: summarize(&items, today, horizon_days),
        })
    }

    fn replace_item(
        &self,
        id: ReviewItemId,
        today: NaiveDate,
        transform: impl FnOnce(&ReviewItem) -> ServiceResult<ReviewItem>,
    ) -> ServiceResult<ReviewItem> {
        let mut items = self.load(today)?;
        let index = items
            .iter()
            .position(|item| item.id == id)
            .ok_or(ServiceError::NotFound(id))?;

        let updated = transform(&items[index])?;
        items[index] = updated.clone();
        self.store.save_all(&items)?;
        Ok(updated)
    }
}
