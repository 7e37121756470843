//! Sample quote set and seeding policy.
//!
//! # Invariants
//! - The seed set holds 7 quotes for each of 5 categories.
//! - Seeding runs in one IMMEDIATE transaction: either every seed row lands
//!   or none, and concurrent `IfEmpty` openers seed exactly once.

use crate::db::{DbError, DbResult, StoreStep};
use log::info;
use rusqlite::{params, Connection, TransactionBehavior};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// How sample quotes are loaded when the store is initialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedPolicy {
    /// Insert the seed set only when `quotes` is empty.
    #[default]
    IfEmpty,
    /// Append the seed set on every initialization. Quote ids are not stable
    /// across restarts and rows accumulate duplicates.
    Always,
}

impl SeedPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::IfEmpty => "if_empty",
            Self::Always => "always",
        }
    }
}

impl Display for SeedPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeedPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "if_empty" | "if-empty" => Ok(Self::IfEmpty),
            "always" => Ok(Self::Always),
            other => Err(format!(
                "unsupported seed policy `{other}`; expected if_empty|always"
            )),
        }
    }
}

/// Sample quotes as `(text, author, category)`.
pub const SEED_QUOTES: [(&str, &str, &str); 35] = [
    ("The only way to do great work is to love what you do.", "Steve Jobs", "Success"),
    (
        "Success is not final, failure is not fatal: It is the courage to continue that counts.",
        "Winston Churchill",
        "Success",
    ),
    ("The best revenge is massive success.", "Frank Sinatra", "Success"),
    (
        "Success usually comes to those who are too busy to be looking for it.",
        "Henry David Thoreau",
        "Success",
    ),
    (
        "The secret of success is to do the common thing uncommonly well.",
        "John D. Rockefeller Jr.",
        "Success",
    ),
    ("Opportunities don't happen. You create them.", "Chris Grosser", "Success"),
    (
        "Success is walking from failure to failure with no loss of enthusiasm.",
        "Winston Churchill",
        "Success",
    ),
    ("Life is what happens when you're busy making other plans.", "John Lennon", "Life"),
    ("Your time is limited, don't waste it living someone else's life.", "Steve Jobs", "Life"),
    ("Life is either a daring adventure or nothing at all.", "Helen Keller", "Life"),
    (
        "In three words I can sum up everything I've learned about life: it goes on.",
        "Robert Frost",
        "Life",
    ),
    ("Life is short, and it's up to you to make it sweet.", "Sarah Louise Delany", "Life"),
    (
        "The purpose of life is not to be happy. It is to be useful, to be honorable, to be compassionate, to have it make some difference that you have lived and lived well.",
        "Ralph Waldo Emerson",
        "Life",
    ),
    (
        "Life isn't about waiting for the storm to pass; it's about learning how to dance in the rain.",
        "Vivian Greene",
        "Life",
    ),
    ("The purpose of our lives is to be happy.", "Dalai Lama", "Happiness"),
    (
        "Happiness is not something ready made. It comes from your own actions.",
        "Dalai Lama",
        "Happiness",
    ),
    ("Happiness depends upon ourselves.", "Aristotle", "Happiness"),
    (
        "The happiest people don\u{2019}t have the best of everything, they make the best of everything.",
        "Unknown",
        "Happiness",
    ),
    (
        "Happiness is when what you think, what you say, and what you do are in harmony.",
        "Mahatma Gandhi",
        "Happiness",
    ),
    (
        "For every minute you are angry you lose sixty seconds of happiness.",
        "Ralph Waldo Emerson",
        "Happiness",
    ),
    ("Happiness is a warm puppy.", "Charles M. Schulz", "Happiness"),
    (
        "The only limit to our realization of tomorrow is our doubts of today.",
        "Franklin D. Roosevelt",
        "Inspiration",
    ),
    ("Act as if what you do makes a difference. It does.", "William James", "Inspiration"),
    ("The best way to predict the future is to invent it.", "Alan Kay", "Inspiration"),
    ("You miss 100% of the shots you don't take.", "Wayne Gretzky", "Inspiration"),
    ("Believe you can and you're halfway there.", "Theodore Roosevelt", "Inspiration"),
    (
        "The future belongs to those who believe in the beauty of their dreams.",
        "Eleanor Roosevelt",
        "Inspiration",
    ),
    (
        "You have within you right now, everything you need to deal with whatever the world can throw at you.",
        "Brian Tracy",
        "Inspiration",
    ),
    (
        "In the end, we will remember not the words of our enemies, but the silence of our friends.",
        "Martin Luther King Jr.",
        "Wisdom",
    ),
    (
        "To be yourself in a world that is constantly trying to make you something else is the greatest accomplishment.",
        "Ralph Waldo Emerson",
        "Wisdom",
    ),
    ("It does not matter how slowly you go as long as you do not stop.", "Confucius", "Wisdom"),
    ("We can't help everyone, but everyone can help someone.", "Ronald Reagan", "Wisdom"),
    (
        "The greatest glory in living lies not in never falling, but in rising every time we fall.",
        "Nelson Mandela",
        "Wisdom",
    ),
    ("The only true wisdom is in knowing you know nothing.", "Socrates", "Wisdom"),
    ("The unexamined life is not worth living.", "Socrates", "Wisdom"),
];

/// Distinct categories present in [`SEED_QUOTES`], in seed order.
pub const SEED_CATEGORIES: [&str; 5] =
    ["Success", "Life", "Happiness", "Inspiration", "Wisdom"];

/// Loads [`SEED_QUOTES`] according to `policy`.
///
/// Returns the number of inserted rows (`0` when `IfEmpty` finds existing
/// quotes).
pub fn seed_quotes(conn: &mut Connection, policy: SeedPolicy) -> DbResult<usize> {
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(DbError::at(StoreStep::Seed))?;

    if policy == SeedPolicy::IfEmpty {
        let existing: i64 = tx
            .query_row("SELECT COUNT(*) FROM quotes;", [], |row| row.get(0))
            .map_err(DbError::at(StoreStep::Seed))?;
        if existing > 0 {
            info!(
                "event=seed_quotes module=db status=skipped policy={policy} existing={existing}"
            );
            return Ok(0);
        }
    }

    let inserted = insert_seed_rows(&tx).map_err(DbError::at(StoreStep::Seed))?;
    tx.commit().map_err(DbError::at(StoreStep::Seed))?;

    info!("event=seed_quotes module=db status=ok policy={policy} inserted={inserted}");
    Ok(inserted)
}

fn insert_seed_rows(conn: &Connection) -> rusqlite::Result<usize> {
    let mut stmt =
        conn.prepare("INSERT INTO quotes (text, author, category) VALUES (?1, ?2, ?3);")?;
    let mut inserted = 0;
    for (text, author, category) in SEED_QUOTES {
        inserted += stmt.execute(params![text, author, category])?;
    }
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::{SeedPolicy, SEED_CATEGORIES, SEED_QUOTES};

    #[test]
    fn seed_set_has_seven_quotes_per_category() {
        for category in SEED_CATEGORIES {
            let count = SEED_QUOTES
                .iter()
                .filter(|(_, _, seeded)| *seeded == category)
                .count();
            assert_eq!(count, 7, "category {category}");
        }
    }

    #[test]
    fn seed_policy_parses_known_values() {
        assert_eq!("IF_EMPTY".parse::<SeedPolicy>().unwrap(), SeedPolicy::IfEmpty);
        assert_eq!(" always ".parse::<SeedPolicy>().unwrap(), SeedPolicy::Always);
        assert!("sometimes".parse::<SeedPolicy>().is_err());
    }
}
