//! Command-line definitions.

use clap::{Parser, Subcommand};
use dailyquote_core::{QuoteId, SeedPolicy};
use std::path::PathBuf;

/// Daily quotes, favorites and a date-keyed diary backed by SQLite.
#[derive(Parser, Debug)]
#[command(name = "dailyquote")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// SQLite database file; overrides config and DAILYQUOTE_DB_PATH
    #[arg(long, global = true, value_name = "FILE")]
    pub db: Option<PathBuf>,

    /// Seed policy on open: if_empty or always
    #[arg(long, global = true, value_name = "POLICY")]
    pub seed_policy: Option<SeedPolicy>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print one random quote
    DailyQuote(CategoryFilter),

    /// Print the simulated daily notification line
    Notify(CategoryFilter),

    /// Print one random quote from a category
    Random {
        category: String,
    },

    /// List every quote by ascending id
    Library,

    /// Manage favorite quotes
    #[command(subcommand)]
    Favorite(FavoriteCommand),

    /// Manage diary entries
    #[command(subcommand)]
    Diary(DiaryCommand),
}

/// Optional category filter shared by quote commands.
#[derive(Parser, Debug)]
pub struct CategoryFilter {
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum FavoriteCommand {
    /// Bookmark a quote under a category
    Add { quote_id: QuoteId, category: String },
    /// List quotes bookmarked under a category
    List { category: String },
}

#[derive(Subcommand, Debug)]
pub enum DiaryCommand {
    /// Add an entry for a date (YYYY-MM-DD)
    Add { date: String, content: String },
    /// Print entries for a date
    Get { date: String },
    /// Replace content of every entry for a date
    Update {
        date: String,
        #[arg(long)]
        content: Option<String>,
    },
    /// Delete every entry for a date
    Delete { date: String },
}
