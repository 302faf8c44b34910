//! SQLite-backed quote store

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::error::StoreError;
use super::quotes::{Quote, QuoteFields, SAMPLE_QUOTES};
use super::selection::{daily_index, date_key, random_index};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS quotes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        text TEXT NOT NULL,
        author TEXT,
        created_at TEXT DEFAULT (DATE('now'))
    );
";

// date() reduces timestamps to the day and yields NULL for anything unparseable
const SELECT_COLUMNS: &str = "SELECT id, text, author, date(created_at) FROM quotes";

/// Persistent quote table
///
/// Only the database path is held. Every operation opens its own
/// connection, which is closed when it goes out of scope.
#[derive(Debug, Clone)]
pub struct QuoteStore {
    path: PathBuf,
    seed_samples: bool,
}

impl QuoteStore {
    /// Create a store backed by the database file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            seed_samples: true,
        }
    }

    /// Whether `initialize` seeds sample quotes into a new table
    pub fn with_seed_samples(mut self, seed: bool) -> Self {
        self.seed_samples = seed;
        self
    }

    /// Path of the database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        let unavailable = |source| StoreError::Unavailable {
            path: self.path.clone(),
            source,
        };

        let conn = Connection::open(&self.path).map_err(unavailable)?;
        // Opening is lazy; reading the header catches files that are not databases
        conn.pragma_query_value(None, "schema_version", |row| row.get::<_, i64>(0))
            .map_err(unavailable)?;
        Ok(conn)
    }

    /// Create the quotes table if needed, seeding it when newly created.
    ///
    /// Returns `true` when sample quotes were inserted.
    pub fn initialize(&self) -> Result<bool, StoreError> {
        let mut conn = self.connect()?;

        let existed: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'quotes')",
            [],
            |row| row.get(0),
        )?;
        conn.execute_batch(SCHEMA)?;

        if existed || !self.seed_samples {
            debug!("Quote table ready at {:?}", self.path);
            return Ok(false);
        }

        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare("INSERT INTO quotes (text, author) VALUES (?1, ?2)")?;
            for (text, author) in SAMPLE_QUOTES {
                stmt.execute(params![text, author])?;
            }
        }
        tx.commit()?;

        info!("Seeded {} sample quotes into {:?}", SAMPLE_QUOTES.len(), self.path);
        Ok(true)
    }

    /// All quotes in ascending id order
    pub fn list_all(&self) -> Result<Vec<Quote>, StoreError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY id"))?;
        let quotes = stmt
            .query_map([], Quote::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(quotes)
    }

    /// Quotes whose text or author contains `term` (case-sensitive),
    /// in ascending id order. An empty term matches everything.
    pub fn search(&self, term: &str) -> Result<Vec<Quote>, StoreError> {
        if term.is_empty() {
            return self.list_all();
        }

        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "{SELECT_COLUMNS} WHERE instr(text, ?1) > 0 OR instr(author, ?1) > 0 ORDER BY id"
        ))?;
        let quotes = stmt
            .query_map([term], Quote::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Search {:?} matched {} quotes", term, quotes.len());
        Ok(quotes)
    }

    /// Look up a single quote
    pub fn get(&self, id: i64) -> Result<Option<Quote>, StoreError> {
        let conn = self.connect()?;
        let quote = conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE id = ?1"),
                [id],
                Quote::from_row,
            )
            .optional()?;
        Ok(quote)
    }

    /// Number of stored quotes
    pub fn count(&self) -> Result<usize, StoreError> {
        let conn = self.connect()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM quotes", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Store a new quote and return its id
    pub fn insert(&self, text: &str, author: &str) -> Result<i64, StoreError> {
        let fields = QuoteFields::normalize(text, author).ok_or(StoreError::Validation)?;

        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO quotes (text, author) VALUES (?1, ?2)",
            params![fields.text, fields.author],
        )?;
        let id = conn.last_insert_rowid();

        info!("Added quote {}", id);
        Ok(id)
    }

    /// Replace the text and author of an existing quote
    pub fn update(&self, id: i64, text: &str, author: &str) -> Result<(), StoreError> {
        let fields = QuoteFields::normalize(text, author).ok_or(StoreError::Validation)?;

        let conn = self.connect()?;
        let changed = conn.execute(
            "UPDATE quotes SET text = ?1, author = ?2 WHERE id = ?3",
            params![fields.text, fields.author, id],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }

        info!("Updated quote {}", id);
        Ok(())
    }

    /// Remove a quote. Returns `false` if there was nothing to remove.
    pub fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let conn = self.connect()?;
        let removed = conn.execute("DELETE FROM quotes WHERE id = ?1", [id])? > 0;

        if removed {
            info!("Deleted quote {}", id);
        } else {
            debug!("Delete of missing quote {} ignored", id);
        }
        Ok(removed)
    }

    /// Quote of the day for `date`; stable while the quote set is unchanged
    pub fn pick_daily(&self, date: NaiveDate) -> Result<Option<Quote>, StoreError> {
        let mut quotes = self.list_all()?;
        let picked = daily_index(date, quotes.len()).map(|idx| quotes.swap_remove(idx));

        debug!(
            "Daily quote for {}: {:?}",
            date_key(date),
            picked.as_ref().map(|q| q.id)
        );
        Ok(picked)
    }

    /// Uniformly random quote, or `None` when the store is empty
    pub fn pick_random(&self) -> Result<Option<Quote>, StoreError> {
        let mut quotes = self.list_all()?;
        Ok(random_index(quotes.len()).map(|idx| quotes.swap_remove(idx)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, QuoteStore) {
        let dir = TempDir::new().unwrap();
        let store = QuoteStore::new(dir.path().join("quotes.db"));
        (dir, store)
    }

    fn empty_store() -> (TempDir, QuoteStore) {
        let (dir, store) = temp_store();
        let store = store.with_seed_samples(false);
        store.initialize().unwrap();
        (dir, store)
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_initialize_seeds_samples() {
        let (_dir, store) = temp_store();

        assert!(store.initialize().unwrap());

        let quotes = store.list_all().unwrap();
        assert_eq!(quotes.len(), SAMPLE_QUOTES.len());
        let ids: Vec<i64> = quotes.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        for (quote, (text, author)) in quotes.iter().zip(SAMPLE_QUOTES) {
            assert_eq!(quote.text, text);
            assert_eq!(quote.author.as_deref(), author);
        }
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let (_dir, store) = temp_store();

        assert!(store.initialize().unwrap());
        assert!(!store.initialize().unwrap());
        assert_eq!(store.count().unwrap(), SAMPLE_QUOTES.len());
    }

    #[test]
    fn test_initialize_does_not_reseed_existing_table() {
        let (_dir, store) = temp_store();
        store.initialize().unwrap();
        for quote in store.list_all().unwrap() {
            store.delete(quote.id).unwrap();
        }

        assert!(!store.initialize().unwrap());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_initialize_without_samples() {
        let (_dir, store) = empty_store();
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_unavailable_store() {
        let dir = TempDir::new().unwrap();
        let store = QuoteStore::new(dir.path().join("missing").join("quotes.db"));

        let result = store.initialize();
        assert!(matches!(result, Err(StoreError::Unavailable { .. })));
    }

    #[test]
    fn test_non_database_file_is_unavailable() {
        let (dir, store) = temp_store();
        std::fs::write(dir.path().join("quotes.db"), "just some notes, not sqlite\n".repeat(20))
            .unwrap();

        assert!(matches!(store.initialize(), Err(StoreError::Unavailable { .. })));
        assert!(matches!(store.list_all(), Err(StoreError::Unavailable { .. })));
    }

    #[test]
    fn test_seed_then_insert_and_search_scenario() {
        let (_dir, store) = temp_store();
        store.initialize().unwrap();

        let id = store.insert("Keep going.", "Anon").unwrap();
        assert_eq!(id, 6);

        let found = store.search("Keep").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 6);
        assert_eq!(found[0].text, "Keep going.");
        assert_eq!(found[0].author.as_deref(), Some("Anon"));
    }

    #[test]
    fn test_insert_trims_fields() {
        let (_dir, store) = empty_store();

        let id = store.insert("  Stay hungry.  ", "  Steve Jobs ").unwrap();
        let quote = store.get(id).unwrap().unwrap();

        assert_eq!(quote.text, "Stay hungry.");
        assert_eq!(quote.author.as_deref(), Some("Steve Jobs"));
    }

    #[test]
    fn test_insert_blank_author_is_null() {
        let (_dir, store) = empty_store();

        let id = store.insert("Stay foolish.", "   ").unwrap();
        let quote = store.get(id).unwrap().unwrap();

        assert!(quote.author.is_none());
        assert_eq!(quote.author_or_unknown(), "Unknown");
    }

    #[test]
    fn test_insert_empty_text_fails() {
        let (_dir, store) = temp_store();
        store.initialize().unwrap();

        assert!(matches!(store.insert("", "X"), Err(StoreError::Validation)));
        assert!(matches!(store.insert("   ", "X"), Err(StoreError::Validation)));
        assert_eq!(store.count().unwrap(), SAMPLE_QUOTES.len());
    }

    #[test]
    fn test_insert_assigns_fresh_ids() {
        let (_dir, store) = empty_store();

        let first = store.insert("One", "").unwrap();
        store.delete(first).unwrap();
        let second = store.insert("Two", "").unwrap();

        assert!(second > first);
    }

    #[test]
    fn test_insert_sets_created_at() {
        let (_dir, store) = empty_store();

        let id = store.insert("Dated", "").unwrap();
        let quote = store.get(id).unwrap().unwrap();

        let today = chrono::Utc::now().date_naive();
        let diff = (today - quote.created_at.unwrap()).num_days().abs();
        assert!(diff <= 1);
    }

    #[test]
    fn test_update_changes_only_text_and_author() {
        let (_dir, store) = empty_store();
        let id = store.insert("Old text", "Old author").unwrap();
        let before = store.get(id).unwrap().unwrap();

        store.update(id, " New text ", " New author ").unwrap();
        let after = store.get(id).unwrap().unwrap();

        assert_eq!(after.id, before.id);
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(after.text, "New text");
        assert_eq!(after.author.as_deref(), Some("New author"));
    }

    #[test]
    fn test_update_missing_id_fails() {
        let (_dir, store) = empty_store();

        let result = store.update(42, "Text", "Author");
        assert!(matches!(result, Err(StoreError::NotFound(42))));
    }

    #[test]
    fn test_update_empty_text_fails() {
        let (_dir, store) = empty_store();
        let id = store.insert("Original", "").unwrap();

        assert!(matches!(store.update(id, "  ", "A"), Err(StoreError::Validation)));
        assert_eq!(store.get(id).unwrap().unwrap().text, "Original");
    }

    #[test]
    fn test_delete() {
        let (_dir, store) = temp_store();
        store.initialize().unwrap();

        assert!(store.delete(3).unwrap());
        let ids: Vec<i64> = store.list_all().unwrap().iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 2, 4, 5]);
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let (_dir, store) = temp_store();
        store.initialize().unwrap();

        assert!(!store.delete(999).unwrap());
        assert_eq!(store.count().unwrap(), SAMPLE_QUOTES.len());
    }

    #[test]
    fn test_get_missing() {
        let (_dir, store) = empty_store();
        assert!(store.get(1).unwrap().is_none());
    }

    #[test]
    fn test_search_is_subset_of_list_in_order() {
        let (_dir, store) = temp_store();
        store.initialize().unwrap();
        store.insert("Dream big.", "Anon").unwrap();
        store.insert("Work hard.", "The Dreamer").unwrap();
        store.insert("Rest well.", "").unwrap();

        let term = "Dream";
        let expected: Vec<Quote> = store
            .list_all()
            .unwrap()
            .into_iter()
            .filter(|q| {
                q.text.contains(term)
                    || q.author.as_deref().map(|a| a.contains(term)).unwrap_or(false)
            })
            .collect();
        let found = store.search(term).unwrap();

        assert_eq!(found.len(), 2);
        assert_eq!(found, expected);
    }

    #[test]
    fn test_search_is_case_sensitive() {
        let (_dir, store) = empty_store();
        store.insert("Keep going.", "Anon").unwrap();

        assert_eq!(store.search("Keep").unwrap().len(), 1);
        assert!(store.search("keep").unwrap().is_empty());
    }

    #[test]
    fn test_search_treats_wildcards_literally() {
        let (_dir, store) = empty_store();
        store.insert("100% effort", "").unwrap();
        store.insert("Plain text", "").unwrap();

        let found = store.search("%").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, "100% effort");
        assert!(store.search("_").unwrap().is_empty());
    }

    #[test]
    fn test_search_empty_term_returns_all() {
        let (_dir, store) = temp_store();
        store.initialize().unwrap();

        assert_eq!(store.search("").unwrap(), store.list_all().unwrap());
    }

    #[test]
    fn test_pick_daily_is_deterministic() {
        let (_dir, store) = temp_store();
        store.initialize().unwrap();
        let date = day(2025, 2, 14);

        let first = store.pick_daily(date).unwrap().unwrap();
        let second = store.pick_daily(date).unwrap().unwrap();

        assert_eq!(first, second);
        let expected_idx = daily_index(date, SAMPLE_QUOTES.len()).unwrap();
        assert_eq!(first, store.list_all().unwrap()[expected_idx]);
    }

    #[test]
    fn test_pick_daily_empty_store() {
        let (_dir, store) = empty_store();
        assert!(store.pick_daily(day(2025, 1, 1)).unwrap().is_none());
    }

    #[test]
    fn test_pick_random() {
        let (_dir, store) = temp_store();
        store.initialize().unwrap();
        let all = store.list_all().unwrap();

        for _ in 0..20 {
            let picked = store.pick_random().unwrap().unwrap();
            assert!(all.contains(&picked));
        }
    }

    #[test]
    fn test_pick_random_empty_store() {
        let (_dir, store) = empty_store();
        assert!(store.pick_random().unwrap().is_none());
    }

    fn raw_insert(store: &QuoteStore, sql: &str) {
        let conn = Connection::open(store.path()).unwrap();
        conn.execute(sql, []).unwrap();
    }

    #[test]
    fn test_legacy_empty_author_reads_as_absent() {
        let (_dir, store) = empty_store();
        raw_insert(&store, "INSERT INTO quotes (text, author) VALUES ('Legacy', '')");
        raw_insert(&store, "INSERT INTO quotes (text, author) VALUES ('Spaces', '   ')");

        let quotes = store.list_all().unwrap();
        assert_eq!(quotes.len(), 2);
        for quote in &quotes {
            assert!(quote.author.is_none());
            assert_eq!(quote.author_or_unknown(), "Unknown");
        }
        assert!(store.get(1).unwrap().unwrap().author.is_none());
    }

    #[test]
    fn test_irregular_created_at_does_not_break_queries() {
        let (_dir, store) = empty_store();
        raw_insert(
            &store,
            "INSERT INTO quotes (text, author, created_at) VALUES ('Stamped', 'A', '2024-01-01 10:00:00')",
        );
        raw_insert(
            &store,
            "INSERT INTO quotes (text, author, created_at) VALUES ('Undated', 'B', NULL)",
        );
        raw_insert(
            &store,
            "INSERT INTO quotes (text, author, created_at) VALUES ('Garbled', 'C', 'yesterday-ish')",
        );

        let quotes = store.list_all().unwrap();
        assert_eq!(quotes.len(), 3);
        assert_eq!(quotes[0].created_at, Some(day(2024, 1, 1)));
        assert_eq!(quotes[1].created_at, None);
        assert_eq!(quotes[2].created_at, None);

        assert_eq!(store.search("dated").unwrap().len(), 1);
        assert!(store.pick_daily(day(2025, 1, 1)).unwrap().is_some());
        assert!(store.pick_random().unwrap().is_some());
    }

    #[test]
    fn test_data_persists_across_store_instances() {
        let (dir, store) = empty_store();
        let id = store.insert("Persisted", "Me").unwrap();

        let reopened = QuoteStore::new(dir.path().join("quotes.db"));
        reopened.initialize().unwrap();

        let quote = reopened.get(id).unwrap().unwrap();
        assert_eq!(quote.text, "Persisted");
        assert_eq!(reopened.count().unwrap(), 1);
    }
}
