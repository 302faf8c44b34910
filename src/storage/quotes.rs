//! Quote model and field normalization

use chrono::NaiveDate;
use rusqlite::Row;

/// Label shown in place of a missing author
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Quotes inserted when the quotes table is first created
pub const SAMPLE_QUOTES: [(&str, Option<&str>); 5] = [
    (
        "The only place where success comes before work is in the dictionary.",
        Some("Vidal Sassoon"),
    ),
    (
        "Believe you can and you're halfway there.",
        Some("Theodore Roosevelt"),
    ),
    ("Small daily improvements lead to stunning results.", None),
    (
        "You are stronger than you think and will be happier than you imagine.",
        None,
    ),
    (
        "The journey of a thousand miles begins with a single step.",
        Some("Lao Tzu"),
    ),
];

/// A stored quote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    /// Store-assigned identifier
    pub id: i64,
    /// Quote body, never empty
    pub text: String,
    /// Optional attribution
    pub author: Option<String>,
    /// Day the quote was stored, if the row carries a readable date
    pub created_at: Option<NaiveDate>,
}

impl Quote {
    /// Build a quote from a `SELECT id, text, author, date(created_at)` row
    ///
    /// Blank authors read as absent, since older databases store them as `''`.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let author: Option<String> = row.get(2)?;
        Ok(Self {
            id: row.get(0)?,
            text: row.get(1)?,
            author: author.filter(|a| !a.trim().is_empty()),
            created_at: row.get(3)?,
        })
    }

    /// Author name, or the "Unknown" label when absent
    pub fn author_or_unknown(&self) -> &str {
        self.author.as_deref().unwrap_or(UNKNOWN_AUTHOR)
    }
}

/// Trimmed text/author pair ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteFields {
    pub text: String,
    pub author: Option<String>,
}

impl QuoteFields {
    /// Trim both fields. Returns `None` when the text is empty afterwards.
    ///
    /// An author that trims to nothing is treated as absent.
    pub fn normalize(text: &str, author: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let author = author.trim();
        Some(Self {
            text: text.to_string(),
            author: (!author.is_empty()).then(|| author.to_string()),
        })
    }
}

/// Shorten `s` to at most `max_chars` characters, ending in "..." when cut
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut out: String = s.chars().take(keep).collect();
    out.push_str("...");
    out
}
