//! Command-line argument parsing.

use clap::{Parser, Subcommand, ValueEnum};
use recall_core::{ProficiencyLevel, ReviewItemId, SortOrder};
use std::path::PathBuf;

/// Command-line arguments for `recall`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "recall",
    version,
    about = "Schedule spaced reviews of memorized passages.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the TOML config file.
    ///
    /// Falls back to `RECALL_CONFIG`, then `recall.toml` if present.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    #[command(flatten)]
    Collection(CollectionCommand),
    /// Print the core version.
    Version,
}

/// Subcommands that read or write the review database.
#[derive(Debug, Clone, Subcommand)]
pub enum CollectionCommand {
    /// Add a passage to the review set.
    Add {
        #[arg(long)]
        section: u32,
        #[arg(long)]
        start: u32,
        #[arg(long)]
        end: u32,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, value_enum, default_value_t = LevelArg::New)]
        level: LevelArg,
    },
    /// Show passages due today or earlier.
    Due,
    /// Show passages due after today within the horizon.
    Upcoming {
        /// Horizon in days; defaults to the configured value.
        #[arg(long)]
        days: Option<u32>,
    },
    /// Show every passage.
    List {
        #[arg(long, value_enum, default_value_t = SortArg::Next)]
        sort: SortArg,
    },
    /// Mark a passage as reviewed today.
    Review { id: ReviewItemId },
    /// Change a passage's name and description.
    Edit {
        id: ReviewItemId,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Remove a passage.
    Delete { id: ReviewItemId },
    /// Print the whole collection as JSON.
    Export,
}

/// Proficiency level as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LevelArg {
    New,
    Beginner,
    Intermediate,
    Advanced,
    Mastered,
}

impl From<LevelArg> for ProficiencyLevel {
    fn from(value: LevelArg) -> Self {
        match value {
            LevelArg::New => Self::New,
            LevelArg::Beginner => Self::Beginner,
            LevelArg::Intermediate => Self::Intermediate,
            LevelArg::Advanced => Self::Advanced,
            LevelArg::Mastered => Self::Mastered,
        }
    }
}

/// Sort order as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    /// Soonest due first.
    Next,
    /// Newest first.
    Created,
    /// Most reviewed first.
    Reviews,
}

impl From<SortArg> for SortOrder {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Next => Self::NextReviewAsc,
            SortArg::Created => Self::CreatedNewest,
            SortArg::Reviews => Self::MostReviewed,
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
