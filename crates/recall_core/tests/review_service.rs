use chrono::NaiveDate;
use recall_core::db::open_db_in_memory;
use recall_core::{
    InvalidRangeError, MemoryReviewItemStore, NewReviewItem, PolicyError, ProficiencyLevel,
    ReviewItemStore, ReviewService, SchedulingPolicy, SectionCatalog, ServiceError, SortOrder,
    SqliteReviewItemStore, ValidationError,
};
use uuid::Uuid;

fn day(offset: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 1).unwrap() + chrono::Days::new(u64::from(offset))
}

fn request(name: &str, section_id: u32, end_unit: u32, level: ProficiencyLevel) -> NewReviewItem {
    NewReviewItem {
        section_id,
        start_unit: 1,
        end_unit,
        level,
        name: name.to_string(),
        description: String::new(),
    }
}

#[test]
fn add_item_validates_range_against_catalog() {
    let service = ReviewService::with_default_policy(MemoryReviewItemStore::new());
    let catalog = SectionCatalog::standard();

    let err = service
        .add_item(&request("too long", 1, 8, ProficiencyLevel::New), &catalog, day(0))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::Range(
            InvalidRangeError::EndBeyondSection { unit_count: 7, .. }
        ))
    ));

    let err = service
        .add_item(&request("  ", 1, 7, ProficiencyLevel::New), &catalog, day(0))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::EmptyName)
    ));

    assert!(service.load(day(0)).unwrap().is_empty());
}

#[test]
fn review_cycle_through_sqlite_store() {
    let conn = open_db_in_memory().unwrap();
    let service = ReviewService::with_default_policy(SqliteReviewItemStore::new(&conn));
    let catalog = SectionCatalog::standard();

    let item = service
        .add_item(
            &request("Opening", 1, 7, ProficiencyLevel::Intermediate),
            &catalog,
            day(0),
        )
        .unwrap();
    assert_eq!(item.next_review, day(5));

    let overview = service.overview(day(4), 7).unwrap();
    assert!(overview.due.is_empty());
    assert_eq!(overview.upcoming.len(), 1);

    let overview = service.overview(day(5), 7).unwrap();
    assert_eq!(overview.due.len(), 1);
    assert_eq!(overview.summary.due, 1);

    let reviewed = service.complete_review(item.id, day(5)).unwrap();
    assert_eq!(reviewed.interval, 10);
    assert_eq!(reviewed.next_review, day(15));
    assert_eq!(reviewed.review_count, 1);
    assert!(reviewed.completed_today);

    let same_day = service.overview(day(5), 7).unwrap();
    assert!(same_day.due.is_empty());
    assert_eq!(same_day.summary.completed_today, 1);

    let stored = SqliteReviewItemStore::new(&conn).load_all().unwrap();
    assert_eq!(stored, vec![reviewed]);
}

#[test]
fn load_sweeps_and_persists_stale_completion_flags() {
    let store = MemoryReviewItemStore::new();
    let service = ReviewService::with_default_policy(&store);
    let catalog = SectionCatalog::standard();

    let item = service
        .add_item(&request("Dawn", 113, 5, ProficiencyLevel::New), &catalog, day(0))
        .unwrap();
    service.complete_review(item.id, day(1)).unwrap();
    assert!(store.load_all().unwrap()[0].completed_today);

    let same_day = service.load(day(1)).unwrap();
    assert!(same_day[0].completed_today);

    let next_day = service.load(day(2)).unwrap();
    assert!(!next_day[0].completed_today);
    assert!(!store.load_all().unwrap()[0].completed_today);
}

#[test]
fn update_metadata_and_delete() {
    let store = MemoryReviewItemStore::new();
    let service = ReviewService::with_default_policy(&store);
    let catalog = SectionCatalog::standard();

    let item = service
        .add_item(&request("Draft", 2, 5, ProficiencyLevel::Beginner), &catalog, day(0))
        .unwrap();
    let updated = service
        .update_metadata(item.id, "Cow, first page", "with tafsir notes", day(0))
        .unwrap();
    assert_eq!(updated.name, "Cow, first page");
    assert_eq!(updated.next_review, item.next_review);
    assert_eq!(store.load_all().unwrap(), vec![updated.clone()]);

    assert!(matches!(
        service.update_metadata(item.id, "", "", day(0)),
        Err(ServiceError::Validation(ValidationError::EmptyName))
    ));

    service.delete(item.id).unwrap();
    assert!(store.load_all().unwrap().is_empty());
    assert!(matches!(
        service.delete(item.id),
        Err(ServiceError::NotFound(id)) if id == item.id
    ));
}

#[test]
fn unknown_item_operations_return_not_found() {
    let service = ReviewService::with_default_policy(MemoryReviewItemStore::new());
    let missing = Uuid::new_v4();

    assert!(matches!(
        service.complete_review(missing, day(0)),
        Err(ServiceError::NotFound(id)) if id == missing
    ));
}

#[test]
fn list_applies_requested_order() {
    let service = ReviewService::with_default_policy(MemoryReviewItemStore::new());
    let catalog = SectionCatalog::standard();

    service
        .add_item(&request("mastered", 1, 7, ProficiencyLevel::Mastered), &catalog, day(0))
        .unwrap();
    service
        .add_item(&request("new", 1, 7, ProficiencyLevel::New), &catalog, day(1))
        .unwrap();

    let by_next: Vec<String> = service
        .list(day(1), SortOrder::NextReviewAsc)
        .unwrap()
        .into_iter()
        .map(|item| item.name)
        .collect();
    assert_eq!(by_next, vec!["new", "mastered"]);

    let by_created: Vec<String> = service
        .list(day(1), SortOrder::CreatedNewest)
        .unwrap()
        .into_iter()
        .map(|item| item.name)
        .collect();
    assert_eq!(by_created, vec!["new", "mastered"]);
}

#[test]
fn service_rejects_invalid_policy() {
    let policy = SchedulingPolicy {
        growth_factor: 0.9,
        ..SchedulingPolicy::default()
    };
    assert!(matches!(
        ReviewService::new(MemoryReviewItemStore::new(), policy),
        Err(PolicyError::InvalidGrowthFactor(_))
    ));
}
