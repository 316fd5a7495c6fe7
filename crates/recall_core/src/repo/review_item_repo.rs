//! Review item storage contract and implementations.
//!
//! # Responsibility
//! - Define the collection-level load/save/delete contract used by callers.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `save_all` replaces the whole collection; last writer wins.
//! - `load_all` returns items in the order they were saved.
//! - Write paths run `ReviewItem::validate()` before touching storage.
//! - Ids are unique within a saved collection.
//! - Read paths reject invalid persisted rows instead of masking them.

use crate::db::DbError;
use crate::model::passage::PassageRange;
use crate::model::review_item::{ProficiencyLevel, ReviewItem, ReviewItemId, ValidationError};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use std::cell::RefCell;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const REVIEW_ITEM_SELECT_SQL: &str = "SELECT
    id,
    section_id,
    start_unit,
    end_unit,
    name,
    description,
    level,
    interval_days,
    review_count,
    created_at,
    next_review,
    completed_today,
    last_reviewed
FROM review_items
ORDER BY position ASC";

const DATE_FORMAT: &str = "%Y-%m-%d";

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage error for review item persistence.
#[derive(Debug)]
pub enum StoreError {
    Validation {
        id: ReviewItemId,
        error: ValidationError,
    },
    Db(DbError),
    NotFound(ReviewItemId),
    /// The collection passed to `save_all` repeats an id.
    DuplicateId(ReviewItemId),
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation { id, error } => write!(f, "review item {id} is invalid: {error}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "review item not found: {id}"),
            Self::DuplicateId(id) => write!(f, "duplicate review item id: {id}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted review item data: {message}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation { error, .. } => Some(error),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::DuplicateId(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Collection-level storage contract.
///
/// The scheduling engine never calls this; services load a snapshot, run
/// the pure engine over it, and save the result back.
pub trait ReviewItemStore {
    fn load_all(&self) -> StoreResult<Vec<ReviewItem>>;
    fn save_all(&self, items: &[ReviewItem]) -> StoreResult<()>;
    fn delete(&self, id: ReviewItemId) -> StoreResult<()>;
}

impl<S: ReviewItemStore + ?Sized> ReviewItemStore for &S {
    fn load_all(&self) -> StoreResult<Vec<ReviewItem>> {
        (**self).load_all()
    }

    fn save_all(&self, items: &[ReviewItem]) -> StoreResult<()> {
        (**self).save_all(items)
    }

    fn delete(&self, id: ReviewItemId) -> StoreResult<()> {
        (**self).delete(id)
    }
}

fn validate_all(items: &[ReviewItem]) -> StoreResult<()> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        item.validate().map_err(|error| StoreError::Validation { id: item.id, error })?;
        if !seen.insert(item.id) {
            return Err(StoreError::DuplicateId(item.id));
        }
    }
    Ok(())
}

/// SQLite-backed review item store.
pub struct SqliteReviewItemStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReviewItemStore<'conn> {
    /// Wraps a connection returned by `db::open_db*` (migrations applied).
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ReviewItemStore for SqliteReviewItemStore<'_> {
    fn load_all(&self) -> StoreResult<Vec<ReviewItem>> {
        let mut stmt = self.conn.prepare(REVIEW_ITEM_SELECT_SQL)?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();

        while let Some(row) = rows.next()? {
            items.push(parse_review_item_row(row)?);
        }

        Ok(items)
    }

    fn save_all(&self, items: &[ReviewItem]) -> StoreResult<()> {
        validate_all(items)?;

        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM review_items;", [])?;
        {
            let mut insert = tx.prepare(
                "INSERT INTO review_items (
                    id,
                    position,
                    section_id,
                    start_unit,
                    end_unit,
                    name,
                    description,
                    level,
                    interval_days,
                    review_count,
                    created_at,
                    next_review,
                    completed_today,
                    last_reviewed
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14);",
            )?;

            for (position, item) in items.iter().enumerate() {
                insert.execute(params![
                    item.id.to_string(),
                    position as i64,
                    item.range.section_id(),
                    item.range.start_unit(),
                    item.range.end_unit(),
                    item.name.as_str(),
                    item.description.as_str(),
                    item.level.as_str(),
                    item.interval,
                    item.review_count,
                    item.created_at.to_string(),
                    item.next_review.to_string(),
                    item.completed_today,
                    item.last_reviewed.map(|day| day.to_string()),
                ])?;
            }
        }
        tx.commit()?;

        Ok(())
    }

    fn delete(&self, id: ReviewItemId) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM review_items WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_review_item_row(row: &Row<'_>) -> StoreResult<ReviewItem> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        StoreError::InvalidData(format!("invalid uuid `{id_text}` in review_items.id"))
    })?;

    let range = PassageRange::from_persisted(
        read_u32(row, "section_id")?,
        read_u32(row, "start_unit")?,
        read_u32(row, "end_unit")?,
    )
    .map_err(|err| StoreError::InvalidData(format!("review item {id}: {err}")))?;

    let level_text: String = row.get("level")?;
    let level = level_text.parse::<ProficiencyLevel>().map_err(|err| {
        StoreError::InvalidData(format!("{err} in review_items.level"))
    })?;

    let completed_today = match row.get::<_, i64>("completed_today")? {
        0 => false,
        1 => true,
        other => {
            return Err(StoreError::InvalidData(format!(
                "invalid completed_today value `{other}` in review_items.completed_today"
            )));
        }
    };

    let last_reviewed = match row.get::<_, Option<String>>("last_reviewed")? {
        Some(text) => Some(parse_date(&text, "last_reviewed")?),
        None => None,
    };

    let item = ReviewItem {
        id,
        range,
        name: row.get("name")?,
        description: row.get("description")?,
        level,
        interval: read_u32(row, "interval_days")?,
        review_count: read_u32(row, "review_count")?,
        created_at: parse_date(&row.get::<_, String>("created_at")?, "created_at")?,
        next_review: parse_date(&row.get::<_, String>("next_review")?, "next_review")?,
        completed_today,
        last_reviewed,
    };
    item.validate()
        .map_err(|error| StoreError::Validation { id, error })?;
    Ok(item)
}

fn read_u32(row: &Row<'_>, column: &str) -> StoreResult<u32> {
    let value: i64 = row.get(column)?;
    u32::try_from(value).map_err(|_| {
        StoreError::InvalidData(format!("value `{value}` out of range in review_items.{column}"))
    })
}

fn parse_date(text: &str, column: &str) -> StoreResult<NaiveDate> {
    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| {
        StoreError::InvalidData(format!("invalid date `{text}` in review_items.{column}"))
    })
}

/// In-process store holding the collection in memory.
#[derive(Debug, Default)]
pub struct MemoryReviewItemStore {
    items: RefCell<Vec<ReviewItem>>,
}

impl MemoryReviewItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store without validation; for fixtures and imports.
    pub fn with_items(items: Vec<ReviewItem>) -> Self {
        Self {
            items: RefCell::new(items),
        }
    }
}

impl ReviewItemStore for MemoryReviewItemStore {
    fn load_all(&self) -> StoreResult<Vec<ReviewItem>> {
        Ok(self.items.borrow().clone())
    }

    fn save_all(&self, items: &[ReviewItem]) -> StoreResult<()> {
        validate_all(items)?;
        *self.items.borrow_mut() = items.to_vec();
        Ok(())
    }

    fn delete(&self, id: ReviewItemId) -> StoreResult<()> {
        let mut items = self.items.borrow_mut();
        let before = items.len();
        items.retain(|item| item.id != id);
        if items.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}
