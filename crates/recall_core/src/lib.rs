//! Spaced-review scheduling core for memorized passages.
//! This crate is the single source of truth for scheduling invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod schedule;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::catalog::{CatalogError, SectionCatalog};
pub use model::passage::{InvalidRangeError, PassageRange, MAX_SECTION_ID};
pub use model::review_item::{
    ParseLevelError, ProficiencyLevel, ReviewItem, ReviewItemId, ReviewPhase, ValidationError,
};
pub use repo::review_item_repo::{
    MemoryReviewItemStore, ReviewItemStore, SqliteReviewItemStore, StoreError, StoreResult,
};
pub use schedule::lifecycle::{complete_review, create_review_item};
pub use schedule::policy::{
    initial_interval, next_interval, next_review_date, PolicyError, SchedulingPolicy,
};
pub use schedule::review_set::{
    classify, get_due_items, get_upcoming_reviews, reset_daily_completions, sort_items, summarize,
    ReviewStatus, ReviewSummary, SortOrder,
};
pub use service::review_service::{
    NewReviewItem, ReviewOverview, ReviewService, ServiceError, ServiceResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
