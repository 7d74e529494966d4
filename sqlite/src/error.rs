//! Error types for the SQLite storage backend.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur in the SQLite backend.
#[derive(Debug, Error)]
pub enum SqliteError {
    /// SQLite operation failure.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Org name fails the database naming convention.
    #[error(transparent)]
    InvalidOrg(#[from] org_store_core::ValidationError),

    /// Data directory could not be created.
    #[error("failed to create data directory '{}': {source}", .path.display())]
    DataDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Order references a customer id that does not exist.
    #[error("customer id {0} does not exist")]
    CustomerMissing(i64),

    /// Order references a product id that does not exist.
    #[error("product id {0} does not exist")]
    ProductMissing(i64),
}

/// Convenience alias for results with [`SqliteError`].
pub type Result<T> = std::result::Result<T, SqliteError>;
