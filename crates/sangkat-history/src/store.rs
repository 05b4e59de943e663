//! `SQLite`-backed search history.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use rusqlite::{Connection, OptionalExtension, params};
use sangkat_types::{EstimationResult, Money, PropertyType};
use thiserror::Error;

use crate::{RecordId, SearchHistory, SearchHistoryRecord};

/// File name of the history database inside the data directory.
pub const DATABASE_FILE: &str = "search_history.db";

const CREATE_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS searches (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        property_type TEXT,
        district TEXT,
        commune TEXT,
        price REAL,
        size REAL,
        bedrooms INTEGER,
        bathrooms INTEGER
    )";

const SELECT_COLUMNS: &str =
    "SELECT id, property_type, district, commune, price, size, bedrooms, bathrooms FROM searches";

/// Errors that can occur while reading or writing history.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to create the database directory.
    #[error("Failed to create directory '{path}': {source}")]
    CreateDir {
        /// The path that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to open the database.
    #[error("Failed to open history database '{path}': {source}")]
    Open {
        /// The database path.
        path: PathBuf,
        /// The underlying `SQLite` error.
        source: rusqlite::Error,
    },

    /// A statement failed.
    #[error("History query failed: {0}")]
    Query(#[from] rusqlite::Error),

    /// The store could not be opened, so history is disabled.
    #[error("Search history at '{path}' is unavailable: {reason}")]
    Unavailable {
        /// The database path.
        path: PathBuf,
        /// Why the store could not be opened.
        reason: String,
    },

    /// A stored row does not describe a valid estimate.
    #[error("Corrupt history row {id}: {reason}")]
    CorruptRow {
        /// The offending row id.
        id: RecordId,
        /// What is wrong with it.
        reason: String,
    },
}

/// Result type for history operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Search history stored in a single `searches` table.
///
/// Every operation opens its own connection and closes it before returning.
#[derive(Debug, Clone)]
pub struct SqliteHistory {
    path: PathBuf,
}

impl SqliteHistory {
    /// Opens the history database at `path`, creating it and its parent
    /// directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the schema
    /// cannot be initialised.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty())
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let history = Self { path };
        history.connect()?.execute_batch(CREATE_TABLE)?;
        log::debug!("Opened search history at {}", history.path.display());

        Ok(history)
    }

    /// Returns the default database path.
    ///
    /// Uses the `directories` crate to find the platform data directory:
    /// - Linux: `~/.local/share/sangkat/search_history.db`
    /// - macOS: `~/Library/Application Support/sangkat/search_history.db`
    /// - Windows: `C:\Users\<User>\AppData\Roaming\sangkat\search_history.db`
    ///
    /// Falls back to `~/.sangkat/search_history.db`.
    #[must_use]
    pub fn default_path() -> PathBuf {
        ProjectDirs::from("", "", "sangkat")
            .map_or_else(dirs_fallback, |proj_dirs| proj_dirs.data_dir().to_path_buf())
            .join(DATABASE_FILE)
    }

    /// Opens the history database at the default path.
    ///
    /// # Errors
    ///
    /// See [`SqliteHistory::open`].
    pub fn with_default_path() -> Result<Self> {
        Self::open(Self::default_path())
    }

    /// Returns the database path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection> {
        Connection::open(&self.path).map_err(|e| StoreError::Open {
            path: self.path.clone(),
            source: e,
        })
    }
}

impl SearchHistory for SqliteHistory {
    fn record(&self, result: &EstimationResult) -> Result<RecordId> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO searches (property_type, district, commune, price, size, bedrooms, bathrooms)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                result.property_type.label(),
                result.district,
                result.commune,
                result.price.amount(),
                result.size_sqm,
                result.bedrooms,
                result.bathrooms,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn recent(&self, limit: usize) -> Result<Vec<SearchHistoryRecord>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY id DESC LIMIT ?1"))?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let rows = stmt
            .query_map(params![limit], RawRow::read)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows
            .into_iter()
            .filter_map(|row| match row.into_record() {
                Ok(record) => Some(record),
                Err(e) => {
                    log::warn!("Skipping history row: {e}");
                    None
                }
            })
            .collect())
    }

    fn by_id(&self, id: RecordId) -> Result<Option<SearchHistoryRecord>> {
        let conn = self.connect()?;
        let row = conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE id = ?1"),
                params![id],
                RawRow::read,
            )
            .optional()?;

        row.map(RawRow::into_record).transpose()
    }
}

/// A `searches` row before domain validation.
struct RawRow {
    id: RecordId,
    property_type: String,
    district: String,
    commune: String,
    price: f64,
    size: f64,
    bedrooms: i64,
    bathrooms: i64,
}

impl RawRow {
    fn read(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            property_type: row.get(1)?,
            district: row.get(2)?,
            commune: row.get(3)?,
            price: row.get(4)?,
            size: row.get(5)?,
            bedrooms: row.get(6)?,
            bathrooms: row.get(7)?,
        })
    }

    fn into_record(self) -> Result<SearchHistoryRecord> {
        let id = self.id;
        let corrupt = |reason: String| StoreError::CorruptRow { id, reason };

        let property_type = self
            .property_type
            .parse::<PropertyType>()
            .map_err(|e| corrupt(e.to_string()))?;
        let price =
            Money::new(self.price).ok_or_else(|| corrupt(format!("invalid price {}", self.price)))?;
        let bedrooms = u32::try_from(self.bedrooms)
            .map_err(|_| corrupt(format!("invalid bedrooms {}", self.bedrooms)))?;
        let bathrooms = u32::try_from(self.bathrooms)
            .map_err(|_| corrupt(format!("invalid bathrooms {}", self.bathrooms)))?;

        Ok(SearchHistoryRecord {
            id,
            result: EstimationResult {
                property_type,
                district: self.district,
                commune: self.commune,
                price,
                size_sqm: self.size,
                bedrooms,
                bathrooms,
            },
        })
    }
}

/// Fallback for determining home directory.
fn dirs_fallback() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".sangkat")
}
