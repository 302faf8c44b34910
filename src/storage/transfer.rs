//! CSV import and export of quotes
//!
//! Every field is wrapped in double quotes with embedded quotes doubled.
//! Files start with a `text,author,created_at` header line.

use std::path::Path;
use tracing::{info, warn};

use super::database::QuoteStore;
use super::error::{StoreError, TransferError};
use super::quotes::Quote;

/// Header line written to exported files
pub const CSV_HEADER: &str = "text,author,created_at";

/// Outcome of an import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Rows stored as new quotes
    pub imported: usize,
    /// Rows skipped because their text was empty
    pub skipped: usize,
}

/// Write every stored quote to `path`. Returns the number exported.
pub fn export_csv(store: &QuoteStore, path: &Path) -> Result<usize, TransferError> {
    let quotes = store.list_all()?;
    let content = format_csv(&quotes);

    std::fs::write(path, content).map_err(|source| TransferError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Exported {} quotes to {:?}", quotes.len(), path);
    Ok(quotes.len())
}

/// Insert every record in the file at `path` as a new quote
pub fn import_csv(store: &QuoteStore, path: &Path) -> Result<ImportSummary, TransferError> {
    let content = std::fs::read_to_string(path).map_err(|source| TransferError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut summary = ImportSummary::default();
    for record in parse_csv(skip_header(&content)) {
        let text = record.first().map(String::as_str).unwrap_or_default();
        let author = record.get(1).map(String::as_str).unwrap_or_default();

        match store.insert(text, author) {
            Ok(_) => summary.imported += 1,
            Err(StoreError::Validation) => {
                warn!("Skipping import row with empty text");
                summary.skipped += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    info!(
        "Imported {} quotes from {:?} ({} skipped)",
        summary.imported, path, summary.skipped
    );
    Ok(summary)
}

/// Render quotes in export format
pub fn format_csv(quotes: &[Quote]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + 1 + quotes.len() * 64);
    out.push_str(CSV_HEADER);
    out.push('\n');

    for quote in quotes {
        let created_at = quote
            .created_at
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        let fields = [
            quote.text.as_str(),
            quote.author.as_deref().unwrap_or_default(),
            created_at.as_str(),
        ];
        let row: Vec<String> = fields.iter().map(|f| escape_field(f)).collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }

    out
}

fn escape_field(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Everything after the first line
fn skip_header(content: &str) -> &str {
    match content.find('\n') {
        Some(pos) => &content[pos + 1..],
        None => "",
    }
}

/// Split CSV content into records of fields.
///
/// Line breaks inside quoted fields are kept. Blank lines produce no record,
/// and a trailing empty field is dropped. An unterminated quote runs to the
/// end of the input.
pub fn parse_csv(content: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            '\r' | '\n' if !in_quotes => finish_record(&mut records, &mut fields, &mut current),
            _ => current.push(ch),
        }
    }
    finish_record(&mut records, &mut fields, &mut current);

    records
}

fn finish_record(records: &mut Vec<Vec<String>>, fields: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        fields.push(std::mem::take(current));
    }
    if !fields.is_empty() {
        records.push(std::mem::take(fields));
    }
}
