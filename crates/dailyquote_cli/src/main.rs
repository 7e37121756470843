//! `dailyquote` command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration, open the store once, run one handler.
//! - Print the handler's response as JSON on stdout.
//!
//! Exit codes: 0 success, 1 store/config failure, 2 invalid input,
//! 3 no matching quote.

mod cli;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Command, DiaryCommand, FavoriteCommand};
use dailyquote_core::{
    init_logging, CoreConfig, DiaryService, FavoriteService, QuoteService, ServiceError,
    SqliteStore, Store,
};
use log::{error, info};
use serde::Serialize;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", render_error(&err));
            exit_code(&err)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = CoreConfig::load(cli.config.as_deref())?;
    if let Some(db_path) = cli.db {
        config.db_path = db_path;
    }
    if let Some(seed_policy) = cli.seed_policy {
        config.seed_policy = seed_policy;
    }

    if let Some(log_dir) = config.log_dir.as_deref() {
        init_logging(&config.log_level, log_dir).map_err(anyhow::Error::msg)?;
    }

    let store = SqliteStore::from_config(&config).with_context(|| {
        format!("failed to open store at `{}`", config.db_path.display())
    })?;
    info!("event=cli_start module=cli status=ok");

    let result = dispatch(&store, cli.command);
    if let Err(err) = &result {
        error!("event=cli_command module=cli status=error error={err}");
    }
    result
}

fn dispatch<S: Store>(store: &S, command: Command) -> anyhow::Result<()> {
    let quotes = QuoteService::new(store);
    let favorites = FavoriteService::new(store);
    let diary = DiaryService::new(store);

    match command {
        Command::DailyQuote(filter) => print_json(&quotes.daily_quote(filter.category.as_deref())?),
        Command::Notify(filter) => {
            print_json(&quotes.quote_notification(filter.category.as_deref())?)
        }
        Command::Random { category } => print_json(&quotes.random_quote_by_category(&category)?),
        Command::Library => print_json(&quotes.quote_library()?),
        Command::Favorite(FavoriteCommand::Add { quote_id, category }) => {
            print_json(&favorites.add_favorite(quote_id, &category)?)
        }
        Command::Favorite(FavoriteCommand::List { category }) => {
            print_json(&favorites.favorites_by_category(&category)?)
        }
        Command::Diary(DiaryCommand::Add { date, content }) => {
            print_json(&diary.add_diary_entry(&date, &content)?)
        }
        Command::Diary(DiaryCommand::Get { date }) => print_json(&diary.diary_entries(&date)?),
        Command::Diary(DiaryCommand::Update { date, content }) => {
            print_json(&diary.update_diary_entry(&date, content.as_deref())?)
        }
        Command::Diary(DiaryCommand::Delete { date }) => {
            print_json(&diary.delete_diary_entry(&date)?)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Joins the error chain, skipping causes already spelled out by their parent.
fn render_error(err: &anyhow::Error) -> String {
    let mut rendered = err.to_string();
    for cause in err.chain().skip(1) {
        let cause = cause.to_string();
        if !rendered.ends_with(&cause) {
            rendered.push_str(": ");
            rendered.push_str(&cause);
        }
    }
    rendered
}

fn exit_code(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<ServiceError>() {
        Some(ServiceError::Validation(_)) => ExitCode::from(2),
        Some(ServiceError::NotFound(_)) => ExitCode::from(3),
        _ => ExitCode::FAILURE,
    }
}
