use chrono::NaiveDate;
use recall_core::{
    classify, complete_review, create_review_item, get_due_items, get_upcoming_reviews,
    reset_daily_completions, sort_items, summarize, PassageRange, ProficiencyLevel, ReviewItem,
    ReviewStatus, SchedulingPolicy, SortOrder,
};

fn day(offset: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap() + chrono::Days::new(u64::from(offset))
}

fn item_due_on(name: &str, created: NaiveDate, next_review: NaiveDate) -> ReviewItem {
    let range = PassageRange::validate(55, 1, 16, 78).unwrap();
    let mut item = create_review_item(
        range,
        ProficiencyLevel::New,
        name,
        "",
        created,
        &SchedulingPolicy::default(),
    )
    .unwrap();
    item.next_review = next_review;
    item
}

fn names(items: &[ReviewItem]) -> Vec<&str> {
    items.iter().map(|item| item.name.as_str()).collect()
}

#[test]
fn new_level_item_becomes_due_the_next_day() {
    let range = PassageRange::validate(1, 1, 7, 7).unwrap();
    let item = create_review_item(
        range,
        ProficiencyLevel::New,
        "Opening",
        "",
        day(0),
        &SchedulingPolicy::default(),
    )
    .unwrap();
    assert_eq!(item.next_review, day(1));

    let items = vec![item];
    assert!(get_due_items(&items, day(0)).is_empty());
    assert_eq!(names(&get_due_items(&items, day(1))), vec!["Opening"]);
}

#[test]
fn upcoming_excludes_due_today_and_beyond_horizon() {
    let items = vec![
        item_due_on("today", day(0), day(0)),
        item_due_on("tomorrow", day(0), day(1)),
        item_due_on("edge", day(0), day(7)),
        item_due_on("beyond", day(0), day(8)),
    ];

    let upcoming = get_upcoming_reviews(&items, day(0), 7);
    assert_eq!(names(&upcoming), vec!["tomorrow", "edge"]);

    let due = get_due_items(&items, day(0));
    assert_eq!(names(&due), vec!["today"]);
}

#[test]
fn overdue_items_stay_due() {
    let items = vec![item_due_on("late", day(0), day(2))];
    assert_eq!(names(&get_due_items(&items, day(30))), vec!["late"]);
    assert!(get_upcoming_reviews(&items, day(30), 7).is_empty());
}

#[test]
fn classification_partitions_every_item() {
    let items: Vec<ReviewItem> = (0..12)
        .map(|offset| item_due_on(&format!("item-{offset}"), day(0), day(offset)))
        .collect();

    for today_offset in 0..12 {
        let today = day(today_offset);
        for horizon in [0, 1, 3, 7, 30] {
            let due = get_due_items(&items, today);
            let upcoming = get_upcoming_reviews(&items, today, horizon);
            for item in &items {
                let in_due = due.iter().any(|other| other.id == item.id);
                let in_upcoming = upcoming.iter().any(|other| other.id == item.id);
                assert!(!(in_due && in_upcoming), "{} in both buckets", item.name);

                let expected = match classify(item, today, horizon) {
                    ReviewStatus::Due => (true, false),
                    ReviewStatus::Upcoming => (false, true),
                    ReviewStatus::Later => (false, false),
                };
                assert_eq!((in_due, in_upcoming), expected);
            }

            let summary = summarize(&items, today, horizon);
            assert_eq!(summary.due + summary.upcoming + summary.later, items.len());
        }
    }
}

#[test]
fn daily_reset_clears_only_earlier_completions() {
    let policy = SchedulingPolicy::default();
    let untouched = item_due_on("untouched", day(0), day(1));
    let reviewed = complete_review(&item_due_on("reviewed", day(0), day(1)), day(1), &policy);
    let items = vec![untouched.clone(), reviewed.clone()];

    let same_day = reset_daily_completions(&items, day(1));
    assert_eq!(same_day, items);

    let next_day = reset_daily_completions(&items, day(2));
    assert_eq!(next_day[0], untouched);
    assert!(!next_day[1].completed_today);
    assert_eq!(next_day[1].interval, reviewed.interval);
    assert_eq!(next_day[1].next_review, reviewed.next_review);
    assert_eq!(next_day[1].last_reviewed, Some(day(1)));
    assert_eq!(names(&next_day), vec!["untouched", "reviewed"]);
}

#[test]
fn daily_reset_is_idempotent() {
    let policy = SchedulingPolicy::default();
    let items = vec![
        complete_review(&item_due_on("a", day(0), day(1)), day(1), &policy),
        complete_review(&item_due_on("b", day(0), day(1)), day(3), &policy),
        item_due_on("c", day(0), day(2)),
    ];

    for today in [day(1), day(3), day(4)] {
        let once = reset_daily_completions(&items, today);
        let twice = reset_daily_completions(&once, today);
        assert_eq!(once, twice);
    }
}

#[test]
fn sort_by_next_review_is_stable() {
    let items = vec![
        item_due_on("late", day(0), day(9)),
        item_due_on("first-tie", day(0), day(2)),
        item_due_on("soon", day(0), day(1)),
        item_due_on("second-tie", day(0), day(2)),
    ];

    let sorted = sort_items(&items, SortOrder::NextReviewAsc);
    assert_eq!(
        names(&sorted),
        vec!["soon", "first-tie", "second-tie", "late"]
    );
}

#[test]
fn sort_by_created_puts_newest_first() {
    let items = vec![
        item_due_on("old", day(0), day(10)),
        item_due_on("new", day(5), day(10)),
        item_due_on("mid", day(2), day(10)),
        item_due_on("mid-tie", day(2), day(10)),
    ];

    let sorted = sort_items(&items, SortOrder::CreatedNewest);
    assert_eq!(names(&sorted), vec!["new", "mid", "mid-tie", "old"]);
}

#[test]
fn sort_by_review_count_puts_most_reviewed_first() {
    let mut once = item_due_on("once", day(0), day(3));
    once.review_count = 1;
    let mut often = item_due_on("often", day(0), day(3));
    often.review_count = 6;
    let never = item_due_on("never", day(0), day(3));

    let sorted = sort_items(&[once, never, often], SortOrder::MostReviewed);
    assert_eq!(names(&sorted), vec!["often", "once", "never"]);
}

#[test]
fn summary_counts_reviews_and_completions() {
    let policy = SchedulingPolicy::default();
    let items = vec![
        complete_review(&item_due_on("done", day(0), day(1)), day(1), &policy),
        item_due_on("due", day(0), day(1)),
        item_due_on("soon", day(0), day(3)),
        item_due_on("far", day(0), day(40)),
    ];

    let summary = summarize(&items, day(1), 7);
    assert_eq!(summary.total, 4);
    assert_eq!(summary.due, 1);
    assert_eq!(summary.upcoming, 2);
    assert_eq!(summary.later, 1);
    assert_eq!(summary.completed_today, 1);
    assert_eq!(summary.total_reviews, 1);
}
