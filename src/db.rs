use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::error::{HistoryError, Result};
use crate::models::HistoryRecord;
use crate::schema::history;

/// Pool of SQLite connections to the history database
pub type DbPool = Pool<SqliteConnectionManager>;
/// Connection checked out of [`DbPool`]
pub type DbConnection = r2d2::PooledConnection<SqliteConnectionManager>;

const MIGRATIONS: [(&str, &str); 3] = [
    (
        "create_history",
        include_str!("../migrations/2025-10-01-000000_create_history/up.sql"),
    ),
    (
        "unique_tel",
        include_str!("../migrations/2025-10-01-000001_unique_tel/up.sql"),
    ),
    (
        "canonical_timestamps",
        include_str!("../migrations/2025-10-01-000002_canonical_timestamps/up.sql"),
    ),
];

/// Database manager for handling connections and operations
///
/// Holds the only pool for the process. Dropping it closes every connection.
/// The methods here run raw SQL and assume their inputs were validated by the
/// caller; see [`crate::repository::HistoryRepository`] for the checked API.
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
}

impl Database {
    /// Open the database at `path` with default pool settings
    pub fn new(path: &str) -> Result<Self> {
        Self::open(&DatabaseConfig {
            path: path.to_string(),
            ..DatabaseConfig::default()
        })
    }

    /// Create a new database connection pool and apply migrations
    pub fn open(config: &DatabaseConfig) -> Result<Self> {
        let path = strip_sqlite_scheme(&config.path);

        // Create parent directory if it doesn't exist
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let busy_timeout = config.busy_timeout();
        let manager = SqliteConnectionManager::file(path).with_init(move |conn| {
            conn.busy_timeout(busy_timeout)?;
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |_| Ok(()))?;
            conn.pragma_update(None, "synchronous", "NORMAL")
        });
        let pool = Pool::builder()
            .max_size(config.max_connections)
            .connection_timeout(config.connection_timeout())
            .build(manager)?;

        let conn = pool.get()?;
        Self::run_migrations(&conn)?;

        info!(path = %path, "History database opened");
        Ok(Self { pool })
    }

    /// Run database migrations
    fn run_migrations(conn: &Connection) -> Result<()> {
        for (name, sql) in MIGRATIONS {
            conn.execute_batch(sql).map_err(|e| match HistoryError::from(e) {
                retryable @ HistoryError::StorageUnavailable(_) => retryable,
                other => HistoryError::Migration(format!("{name}: {other}")),
            })?;
            debug!(migration = name, "Migration applied");
        }
        Ok(())
    }

    /// Get a connection from the pool
    pub fn get_connection(&self) -> Result<DbConnection> {
        Ok(self.pool.get()?)
    }

    /// Insert a record for `tel` or overwrite its timestamp
    ///
    /// A single `INSERT .. ON CONFLICT` statement, so concurrent writers for
    /// the same number serialize on SQLite's write lock and the last one wins.
    pub fn upsert(&self, tel: &str, last_message: DateTime<Utc>) -> Result<()> {
        let conn = self.get_connection()?;
        conn.execute(
            &format!(
                "INSERT INTO {table} ({tel}, {last}) VALUES (?1, ?2) \
                 ON CONFLICT({tel}) DO UPDATE SET {last} = excluded.{last}",
                table = history::TABLE,
                tel = history::TEL,
                last = history::LAST_MESSAGE,
            ),
            params![tel, last_message],
        )?;
        Ok(())
    }

    /// Get the record for `tel`
    pub fn find(&self, tel: &str) -> Result<Option<HistoryRecord>> {
        let conn = self.get_connection()?;

        let record = conn
            .query_row(
                &format!(
                    "SELECT {}, {}, {} FROM {} WHERE {} = ?",
                    history::ID,
                    history::TEL,
                    history::LAST_MESSAGE,
                    history::TABLE,
                    history::TEL
                ),
                params![tel],
                map_history_record,
            )
            .optional()?;

        Ok(record)
    }

    /// Delete the record for `tel`, returning whether one existed
    pub fn remove(&self, tel: &str) -> Result<bool> {
        let conn = self.get_connection()?;
        let deleted = conn.execute(
            &format!("DELETE FROM {} WHERE {} = ?", history::TABLE, history::TEL),
            params![tel],
        )?;
        Ok(deleted > 0)
    }

    /// All records, most recent contact first
    pub fn list(&self, limit: Option<usize>) -> Result<Vec<HistoryRecord>> {
        let conn = self.get_connection()?;

        // SQLite treats a negative LIMIT as no limit
        let limit = limit.map_or(-1, |n| i64::try_from(n).unwrap_or(i64::MAX));

        let mut stmt = conn.prepare(&format!(
            "SELECT {id}, {tel}, {last} FROM {table} ORDER BY {last} DESC, {id} DESC LIMIT ?",
            id = history::ID,
            tel = history::TEL,
            last = history::LAST_MESSAGE,
            table = history::TABLE,
        ))?;
        let record_iter = stmt.query_map(params![limit], map_history_record)?;

        let mut results = Vec::new();
        for record in record_iter {
            results.push(record?);
        }

        Ok(results)
    }

    /// Number of rows in the history table
    pub fn count(&self) -> Result<u64> {
        let conn = self.get_connection()?;
        let total: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", history::TABLE),
            params![],
            |row| row.get(0),
        )?;
        Ok(u64::try_from(total).unwrap_or_default())
    }

    /// Number of rows stored for `tel`; at most one once migrations ran
    pub fn count_for(&self, tel: &str) -> Result<u64> {
        let conn = self.get_connection()?;
        let total: i64 = conn.query_row(
            &format!(
                "SELECT COUNT(*) FROM {} WHERE {} = ?",
                history::TABLE,
                history::TEL
            ),
            params![tel],
            |row| row.get(0),
        )?;
        Ok(u64::try_from(total).unwrap_or_default())
    }
}

/// Map a database row to a `HistoryRecord`
fn map_history_record(row: &Row) -> rusqlite::Result<HistoryRecord> {
    Ok(HistoryRecord {
        id: row.get(history::ID)?,
        tel: row.get(history::TEL)?,
        last_message: row.get(history::LAST_MESSAGE)?,
    })
}

/// Accept both plain paths and `sqlite:` / `sqlite://` URLs
fn strip_sqlite_scheme(url: &str) -> &str {
    url.strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url)
}

/// Open the history database described by `config`
pub fn establish_connection(config: &DatabaseConfig) -> Result<Database> {
    Database::open(config)
}
