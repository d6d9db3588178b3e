//! Franchise repository contract and SQLite document store.
//!
//! # Responsibility
//! - Persist one JSON document per franchise, keyed by franchise id.
//! - Offer the save / find-by-id / find-all / delete contract used by services.
//! - Keep SQL and blocking I/O inside the persistence boundary.
//!
//! # Invariants
//! - Write paths call `Franchise::validate()` before any SQL mutation.
//! - Read paths reject documents that fail to decode, carry a different id
//!   than their row, or fail validation.
//! - `save` writes the whole document in one statement; there is no version
//!   check, so concurrent writers follow last-write-wins.

use crate::db::migrations::{current_version, latest_version};
use crate::db::DbError;
use crate::model::franchise::{Franchise, FranchiseId};
use crate::model::validation::ValidationError;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for franchise persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Franchise failed `validate()` on the write path.
    Validation(ValidationError),
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Document could not be encoded.
    Serialization(serde_json::Error),
    /// Persisted document cannot be turned into a valid franchise.
    InvalidData(String),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Blocking storage task panicked, was cancelled, or found a poisoned lock.
    Task(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "failed to encode franchise document: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted franchise data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "franchise repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::Task(message) => write!(f, "storage task failed: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::InvalidData(_) => None,
            Self::UninitializedConnection { .. } => None,
            Self::Task(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Document-store contract for franchise aggregates.
#[async_trait]
pub trait FranchiseRepository: Send + Sync {
    /// Inserts or replaces the whole franchise document.
    ///
    /// Assigns a new id when `franchise.id` is empty and returns the stored
    /// franchise.
    async fn save(&self, franchise: Franchise) -> RepoResult<Franchise>;
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Franchise>>;
    /// All franchises in insertion order.
    async fn find_all(&self) -> RepoResult<Vec<Franchise>>;
    /// Returns whether a document was removed.
    async fn delete_by_id(&self, id: &str) -> RepoResult<bool>;
}

#[async_trait]
impl<R: FranchiseRepository + ?Sized> FranchiseRepository for Arc<R> {
    async fn save(&self, franchise: Franchise) -> RepoResult<Franchise> {
        (**self).save(franchise).await
    }

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Franchise>> {
        (**self).find_by_id(id).await
    }

    async fn find_all(&self) -> RepoResult<Vec<Franchise>> {
        (**self).find_all().await
    }

    async fn delete_by_id(&self, id: &str) -> RepoResult<bool> {
        (**self).delete_by_id(id).await
    }
}

/// SQLite-backed franchise document store.
///
/// Cloning shares the same connection.
#[derive(Clone)]
pub struct SqliteFranchiseRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteFranchiseRepository {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    pub fn try_new(conn: Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_version(&conn)?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Runs `op` against the connection on tokio's blocking pool.
    async fn with_conn<T, F>(&self, op: F) -> RepoResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> RepoResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| RepoError::Task("connection lock poisoned".to_string()))?;
            op(&guard)
        })
        .await
        .map_err(|err| RepoError::Task(err.to_string()))?
    }
}

#[async_trait]
impl FranchiseRepository for SqliteFranchiseRepository {
    async fn save(&self, mut franchise: Franchise) -> RepoResult<Franchise> {
        franchise.validate()?;
        if !franchise.is_persisted() {
            franchise.id = Uuid::new_v4().to_string();
        }
        let document = serde_json::to_string(&franchise)?;

        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO franchises (id, name, document)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(id) DO UPDATE SET
                    name = excluded.name,
                    document = excluded.document,
                    updated_at = (strftime('%s', 'now') * 1000);",
                params![franchise.id.as_str(), franchise.name.as_str(), document],
            )?;
            Ok(franchise)
        })
        .await
    }

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Franchise>> {
        let id = id.to_string();
        self.with_conn(move |conn| {
            let document: Option<String> = conn
                .query_row(
                    "SELECT document FROM franchises WHERE id = ?1;",
                    [id.as_str()],
                    |row| row.get(0),
                )
                .optional()?;
            document
                .map(|document| parse_document(&id, &document))
                .transpose()
        })
        .await
    }

    async fn find_all(&self) -> RepoResult<Vec<Franchise>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT id, document FROM franchises ORDER BY rowid ASC;")?;
            let mut rows = stmt.query([])?;
            let mut franchises = Vec::new();
            while let Some(row) = rows.next()? {
                let id: FranchiseId = row.get(0)?;
                let document: String = row.get(1)?;
                franchises.push(parse_document(&id, &document)?);
            }
            Ok(franchises)
        })
        .await
    }

    async fn delete_by_id(&self, id: &str) -> RepoResult<bool> {
        let id = id.to_string();
        self.with_conn(move |conn| {
            let changed = conn.execute("DELETE FROM franchises WHERE id = ?1;", [id.as_str()])?;
            Ok(changed > 0)
        })
        .await
    }
}

fn parse_document(row_id: &str, document: &str) -> RepoResult<Franchise> {
    let franchise: Franchise = serde_json::from_str(document).map_err(|err| {
        RepoError::InvalidData(format!("undecodable document for franchise `{row_id}`: {err}"))
    })?;
    if franchise.id != row_id {
        return Err(RepoError::InvalidData(format!(
            "document id `{}` does not match row id `{row_id}`",
            franchise.id
        )));
    }
    franchise.validate().map_err(|err| {
        RepoError::InvalidData(format!("franchise `{row_id}` failed validation: {err}"))
    })?;
    Ok(franchise)
}
