//! Subcommand execution.
//!
//! Every command receives the single `today` captured in `main`.

use crate::cli::{CollectionCommand, Command};
use crate::config::AppConfig;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use recall_core::db::open_db;
use recall_core::{
    core_version, NewReviewItem, ReviewItem, ReviewService, SectionCatalog, SortOrder,
    SqliteReviewItemStore,
};
use std::io::Write;

pub fn run(
    command: Command,
    config: &AppConfig,
    today: NaiveDate,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::Version => {
            writeln!(out, "recall_core {}", core_version())?;
            Ok(())
        }
        Command::Collection(command) => run_collection(command, config, today, out),
    }
}

fn run_collection(
    command: CollectionCommand,
    config: &AppConfig,
    today: NaiveDate,
    out: &mut impl Write,
) -> Result<()> {
    let conn = open_db(&config.storage.db_path).with_context(|| {
        format!(
            "opening review database at {}",
            config.storage.db_path.display()
        )
    })?;
    let service = ReviewService::new(
        SqliteReviewItemStore::new(&conn),
        config.schedule.policy(),
    )?;
    let horizon = config.schedule.upcoming_horizon_days;

    match command {
        CollectionCommand::Add {
            section,
            start,
            end,
            name,
            description,
            level,
        } => {
            let request = NewReviewItem {
                section_id: section,
                start_unit: start,
                end_unit: end,
                level: level.into(),
                name,
                description,
            };
            let item = service.add_item(&request, &SectionCatalog::standard(), today)?;
            writeln!(out, "added {}", item.id)?;
            write_items(out, std::slice::from_ref(&item))?;
        }
        CollectionCommand::Due => {
            let overview = service.overview(today, horizon)?;
            writeln!(
                out,
                "{} due, {} upcoming in {horizon}d, {} reviewed today",
                overview.summary.due, overview.summary.upcoming, overview.summary.completed_today
            )?;
            write_items(out, &overview.due)?;
        }
        CollectionCommand::Upcoming { days } => {
            let overview = service.overview(today, days.unwrap_or(horizon))?;
            write_items(out, &overview.upcoming)?;
        }
        CollectionCommand::List { sort } => {
            let items = service.list(today, SortOrder::from(sort))?;
            write_items(out, &items)?;
        }
        CollectionCommand::Review { id } => {
            let item = service.complete_review(id, today)?;
            writeln!(
                out,
                "reviewed {} ({}x); next review {} in {}d",
                item.range, item.review_count, item.next_review, item.interval
            )?;
        }
        CollectionCommand::Edit {
            id,
            name,
            description,
        } => {
            let item = service.update_metadata(id, &name, &description, today)?;
            write_items(out, std::slice::from_ref(&item))?;
        }
        CollectionCommand::Delete { id } => {
            service.delete(id)?;
            writeln!(out, "deleted {id}")?;
        }
        CollectionCommand::Export => {
            let items = service.load(today)?;
            serde_json::to_writer_pretty(&mut *out, &items)?;
            writeln!(out)?;
        }
    }

    Ok(())
}

fn write_items(out: &mut impl Write, items: &[ReviewItem]) -> Result<()> {
    for item in items {
        let marker = if item.completed_today { "*" } else { " " };
        writeln!(
            out,
            "{marker} {}  {:<10} next {}  every {:>3}d  x{:<3} {}",
            item.id,
            item.range.to_string(),
            item.next_review,
            item.interval,
            item.review_count,
            item.name
        )?;
    }
    Ok(())
}
