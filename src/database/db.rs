//! SQLite item store.
//!
//! Keeps scheduler items, a review history and a simulated "current date"
//! that can be advanced a day at a time to watch schedules play out.
//! Timestamps are stored as unix seconds.

use crate::error::{Error, Result};
use crate::models::{ReviewLogEntry, ReviewResult, SpacedRepetitionItem};
use chrono::{DateTime, Duration, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::Path;

const ITEM_COLUMNS: &str = "id, word, translation, difficulty, repetitions, interval_days, ease_factor,
     next_review, last_review, consecutive_correct, consecutive_incorrect, total_reviews,
     average_response_time";

/// Opens (or creates) the database file and makes sure the schema exists.
pub fn init_database(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    create_schema(&conn)?;
    tracing::info!("Opened item store at {}", path.display());
    Ok(conn)
}

/// Throwaway store, mostly for tests.
pub fn init_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    create_schema(&conn)?;
    Ok(conn)
}

fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS items (
            id TEXT PRIMARY KEY,
            word TEXT NOT NULL,
            translation TEXT NOT NULL,
            difficulty REAL NOT NULL DEFAULT 2.5,
            repetitions INTEGER NOT NULL DEFAULT 0,
            interval_days INTEGER NOT NULL DEFAULT 0,
            ease_factor REAL NOT NULL DEFAULT 2.5,
            next_review INTEGER NOT NULL,
            last_review INTEGER NOT NULL,
            consecutive_correct INTEGER NOT NULL DEFAULT 0,
            consecutive_incorrect INTEGER NOT NULL DEFAULT 0,
            total_reviews INTEGER NOT NULL DEFAULT 0,
            average_response_time REAL NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS review_log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            item_id TEXT NOT NULL,
            quality REAL NOT NULL,
            response_time REAL NOT NULL,
            reviewed_at INTEGER NOT NULL,
            interval_days INTEGER NOT NULL,
            ease_factor REAL NOT NULL,
            FOREIGN KEY (item_id) REFERENCES items(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_items_next_review ON items(next_review);

        CREATE TABLE IF NOT EXISTS app_state (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );",
    )?;

    // Simulated clock starts at the real time of first initialisation
    conn.execute(
        "INSERT OR IGNORE INTO app_state (key, value) VALUES ('current_date', ?1)",
        params![Utc::now().timestamp().to_string()],
    )?;

    Ok(())
}

fn to_datetime(secs: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0).ok_or(Error::InvalidTimestamp(secs))
}

/// Retrieves the simulated current date
pub fn current_date(conn: &Connection) -> Result<DateTime<Utc>> {
    let value: String = conn.query_row(
        "SELECT value FROM app_state WHERE key = 'current_date'",
        [],
        |row| row.get(0),
    )?;

    let secs = value
        .parse::<i64>()
        .map_err(|_| Error::CorruptState(format!("current_date = {:?}", value)))?;
    to_datetime(secs)
}

/// Moves the simulated date forward by 24 hours and returns the new date.
pub fn advance_day(conn: &Connection) -> Result<DateTime<Utc>> {
    let next_day = current_date(conn)? + Duration::days(1);

    conn.execute(
        "UPDATE app_state SET value = ?1 WHERE key = 'current_date'",
        params![next_day.timestamp().to_string()],
    )?;

    tracing::info!("Advanced simulated date to {}", next_day.format("%Y-%m-%d"));
    Ok(next_day)
}

/// Row as stored, before timestamps are validated
struct StoredItem {
    item: SpacedRepetitionItem,
    next_review: i64,
    last_review: i64,
}

fn stored_item(row: &Row) -> rusqlite::Result<StoredItem> {
    Ok(StoredItem {
        item: SpacedRepetitionItem {
            id: row.get(0)?,
            word: row.get(1)?,
            translation: row.get(2)?,
            difficulty: row.get(3)?,
            repetitions: row.get(4)?,
            interval: row.get(5)?,
            ease_factor: row.get(6)?,
            next_review: DateTime::UNIX_EPOCH,
            last_review: DateTime::UNIX_EPOCH,
            consecutive_correct: row.get(9)?,
            consecutive_incorrect: row.get(10)?,
            total_reviews: row.get(11)?,
            average_response_time: row.get(12)?,
        },
        next_review: row.get(7)?,
        last_review: row.get(8)?,
    })
}

impl TryFrom<StoredItem> for SpacedRepetitionItem {
    type Error = Error;

    fn try_from(stored: StoredItem) -> Result<Self> {
        Ok(SpacedRepetitionItem {
            next_review: to_datetime(stored.next_review)?,
            last_review: to_datetime(stored.last_review)?,
            ..stored.item
        })
    }
}

fn query_items(sql: &str, params: impl rusqlite::Params, conn: &Connection) -> Result<Vec<SpacedRepetitionItem>> {
    let mut stmt = conn.prepare(sql)?;
    let stored = stmt
        .query_map(params, stored_item)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    stored.into_iter().map(SpacedRepetitionItem::try_from).collect()
}

/// Inserts a new item. Fails with [`Error::DuplicateItem`] if the id is taken.
pub fn add_item(item: &SpacedRepetitionItem, conn: &Connection) -> Result<()> {
    let exists: Option<i64> = conn
        .query_row("SELECT 1 FROM items WHERE id = ?1", params![item.id], |row| row.get(0))
        .optional()?;
    if exists.is_some() {
        return Err(Error::DuplicateItem(item.id.clone()));
    }

    save_item(item, conn)?;
    tracing::info!("Item '{}' added", item.id);
    Ok(())
}

/// Inserts or overwrites an item's full state.
pub fn save_item(item: &SpacedRepetitionItem, conn: &Connection) -> Result<()> {
    conn.execute(
        "INSERT INTO items (id, word, translation, difficulty, repetitions, interval_days, ease_factor,
             next_review, last_review, consecutive_correct, consecutive_incorrect, total_reviews,
             average_response_time)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
         ON CONFLICT(id) DO UPDATE SET
             word = excluded.word,
             translation = excluded.translation,
             difficulty = excluded.difficulty,
             repetitions = excluded.repetitions,
             interval_days = excluded.interval_days,
             ease_factor = excluded.ease_factor,
             next_review = excluded.next_review,
             last_review = excluded.last_review,
             consecutive_correct = excluded.consecutive_correct,
             consecutive_incorrect = excluded.consecutive_incorrect,
             total_reviews = excluded.total_reviews,
             average_response_time = excluded.average_response_time",
        params![
            item.id,
            item.word,
            item.translation,
            item.difficulty,
            item.repetitions,
            item.interval,
            item.ease_factor,
            item.next_review.timestamp(),
            item.last_review.timestamp(),
            item.consecutive_correct,
            item.consecutive_incorrect,
            item.total_reviews,
            item.average_response_time,
        ],
    )?;

    Ok(())
}

pub fn get_item(id: &str, conn: &Connection) -> Result<SpacedRepetitionItem> {
    let sql = format!("SELECT {} FROM items WHERE id = ?1", ITEM_COLUMNS);
    let stored = conn.query_row(&sql, params![id], stored_item).optional()?;

    match stored {
        Some(stored) => stored.try_into(),
        None => Err(Error::ItemNotFound(id.to_string())),
    }
}

/// All items, soonest review first
pub fn load_items(conn: &Connection) -> Result<Vec<SpacedRepetitionItem>> {
    let sql = format!("SELECT {} FROM items ORDER BY next_review ASC, id ASC", ITEM_COLUMNS);
    query_items(&sql, [], conn)
}

/// Items with next_review <= now, oldest first.
pub fn items_due_for_review(now: DateTime<Utc>, conn: &Connection) -> Result<Vec<SpacedRepetitionItem>> {
    let sql = format!(
        "SELECT {} FROM items WHERE next_review <= ?1 ORDER BY next_review ASC, id ASC",
        ITEM_COLUMNS
    );
    query_items(&sql, params![now.timestamp()], conn)
}

/// Removes an item along with its review history.
pub fn delete_item(id: &str, conn: &Connection) -> Result<()> {
    let deleted = conn.execute("DELETE FROM items WHERE id = ?1", params![id])?;
    if deleted == 0 {
        return Err(Error::ItemNotFound(id.to_string()));
    }
    Ok(())
}

/// Stores the outcome of a review: the new item state and a history row,
/// written together or not at all.
pub fn record_review(result: &ReviewResult, conn: &Connection) -> Result<()> {
    let tx = conn.unchecked_transaction()?;

    let item = &result.item;
    let exists: Option<i64> = tx
        .query_row("SELECT 1 FROM items WHERE id = ?1", params![item.id], |row| row.get(0))
        .optional()?;
    if exists.is_none() {
        return Err(Error::ItemNotFound(item.id.clone()));
    }

    save_item(item, &tx)?;
    tx.execute(
        "INSERT INTO review_log (item_id, quality, response_time, reviewed_at, interval_days, ease_factor)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            item.id,
            result.quality,
            result.response_time,
            item.last_review.timestamp(),
            result.new_interval,
            result.new_ease_factor,
        ],
    )?;

    tx.commit()?;
    Ok(())
}

/// Review history for one item, oldest first
pub fn review_history(item_id: &str, conn: &Connection) -> Result<Vec<ReviewLogEntry>> {
    let mut stmt = conn.prepare(
        "SELECT id, item_id, quality, response_time, reviewed_at, interval_days, ease_factor
         FROM review_log WHERE item_id = ?1 ORDER BY id ASC",
    )?;

    let rows = stmt
        .query_map(params![item_id], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, f64>(2)?,
                row.get::<_, f64>(3)?,
                row.get::<_, i64>(4)?,
                row.get::<_, u32>(5)?,
                row.get::<_, f64>(6)?,
            ))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    rows.into_iter()
        .map(|(id, item_id, quality, response_time, reviewed_at, interval, ease_factor)| -> Result<ReviewLogEntry> {
            Ok(ReviewLogEntry {
                id,
                item_id,
                quality,
                response_time,
                reviewed_at: to_datetime(reviewed_at)?,
                interval,
                ease_factor,
            })
        })
        .collect()
}
