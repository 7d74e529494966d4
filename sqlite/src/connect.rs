//! Per-org database files and migration wiring.
//!
//! Each org owns one SQLite database file, `store_<org>.db`, under a
//! common data directory. [`OrgStore`] is the path policy plus connection
//! opener; [`OrgConnection`] wraps a live connection and implements the
//! migration crate's [`StatementExecutor`] so the runner can execute
//! migration files against it.

use std::fs;
use std::path::{Path, PathBuf};

use org_store_core::validate_org_name;
use org_store_migrate::{BoxedError, OrgDatabases, StatementExecutor};
use rusqlite::Connection;

use crate::error::{Result, SqliteError};

/// Locates and opens per-org database files.
///
/// # Examples
///
/// ```no_run
/// use org_store_sqlite::OrgStore;
///
/// let store = OrgStore::new("data");
/// let conn = store.open("acme").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct OrgStore {
    data_dir: PathBuf,
}

impl OrgStore {
    /// Creates a store rooted at `data_dir`.
    ///
    /// The directory is created lazily on the first [`open`](Self::open).
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// The database file path for `org`.
    pub fn database_path(&self, org: &str) -> PathBuf {
        self.data_dir.join(format!("store_{org}.db"))
    }

    /// Opens a dedicated connection to `org`'s database.
    ///
    /// Validates the org name first (it becomes a file name), creates the
    /// data directory if needed, and enables foreign key enforcement on
    /// the connection.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteError::InvalidOrg`] for a bad org name,
    /// [`SqliteError::DataDir`] if the directory cannot be created, or
    /// [`SqliteError::Database`] if the file cannot be opened.
    pub fn open(&self, org: &str) -> Result<OrgConnection> {
        validate_org_name(org)?;

        fs::create_dir_all(&self.data_dir).map_err(|err| SqliteError::DataDir {
            path: self.data_dir.clone(),
            source: err,
        })?;

        let conn = Connection::open(self.database_path(org))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(OrgConnection { conn })
    }
}

impl OrgDatabases for OrgStore {
    type Conn = OrgConnection;

    fn connect(&self, org: &str) -> std::result::Result<OrgConnection, BoxedError> {
        self.open(org).map_err(Into::into)
    }
}

/// A live connection to one org's database.
///
/// Dropping it releases the connection; orgs are never pooled or shared.
pub struct OrgConnection {
    conn: Connection,
}

impl OrgConnection {
    /// Wraps an already-open connection (used by in-memory tests).
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Borrows the underlying connection for queries.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Consumes the wrapper and returns the underlying connection.
    pub fn into_connection(self) -> Connection {
        self.conn
    }
}

impl StatementExecutor for OrgConnection {
    fn execute(&mut self, statement: &str) -> std::result::Result<(), BoxedError> {
        self.conn
            .execute(statement, [])
            .map(|_| ())
            .map_err(Into::into)
    }
}

/// Whether a database file for `org` already exists under `data_dir`.
pub fn org_database_exists(data_dir: &Path, org: &str) -> bool {
    OrgStore::new(data_dir).database_path(org).exists()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_path_follows_naming_convention() {
        let store = OrgStore::new("data");
        assert_eq!(
            store.database_path("acme"),
            PathBuf::from("data/store_acme.db")
        );
    }

    #[test]
    fn open_rejects_invalid_org_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = OrgStore::new(dir.path());
        assert!(matches!(
            store.open("Acme Corp"),
            Err(SqliteError::InvalidOrg(_))
        ));
        // Nothing was created for the bad name.
        assert!(!org_database_exists(dir.path(), "Acme Corp"));
    }

    #[test]
    fn open_creates_data_dir_and_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");
        let store = OrgStore::new(&data_dir);

        let _conn = store.open("acme").unwrap();
        assert!(org_database_exists(&data_dir, "acme"));
    }

    #[test]
    fn executor_runs_statements_against_the_connection() {
        let mut conn = OrgConnection::from_connection(Connection::open_in_memory().unwrap());

        conn.execute("CREATE TABLE t (x INTEGER)").unwrap();
        conn.execute("INSERT INTO t VALUES (42)").unwrap();
        assert!(conn.execute("INSERT INTO missing VALUES (1)").is_err());

        let count: i64 = conn
            .connection()
            .query_row("SELECT COUNT(*) FROM t", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
