//! Error types for migration operations.
//!
//! Provides a unified error type covering the three failure classes of the
//! migration subsystem: configuration (bad filenames, bad id sequences),
//! persistence (state file I/O and parsing), and execution (a statement
//! failing against an org's database).

use std::path::PathBuf;

use thiserror::Error;

/// Boxed error type carried across the executor and connector seams.
///
/// Database backends report failures through this type so the migration
/// crate stays free of any concrete driver dependency.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur during migration operations.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// File or directory I/O failure, with the offending path.
    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// State file could not be written.
    #[error("failed to write '{}': {source}", .path.display())]
    WriteState {
        /// Target state file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Persisted state exists but is not valid JSON for [`MigrationState`].
    ///
    /// A missing state file is not an error; only malformed content is.
    ///
    /// [`MigrationState`]: crate::MigrationState
    #[error("malformed migration state in '{}': {source}", .path.display())]
    StateParse {
        /// State file path.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// State could not be serialized for writing.
    #[error("failed to serialize migration state: {0}")]
    StateSerialize(#[source] serde_json::Error),

    /// Migration filename does not end in `_<digits>.sql`.
    #[error("migration filename '{}' does not match '<name>_<id>.sql'", .0.display())]
    InvalidFilename(PathBuf),

    /// Two files in the same directory resolve to the same migration id.
    #[error("duplicate migration id {id}: '{}' and '{}'", .first.display(), .second.display())]
    DuplicateId {
        /// The contested id.
        id: i64,
        /// First file claiming the id.
        first: PathBuf,
        /// Second file claiming the id.
        second: PathBuf,
    },

    /// Sorted migration ids are not exactly `0, 1, 2, ...`.
    ///
    /// The runner addresses the sorted set by position, so gapped or
    /// offset ids would silently skip or re-run units. Rejected up front.
    #[error("migration ids must be contiguous from 0: expected id {expected}, found {found}")]
    NonContiguousIds {
        /// Id required at this position.
        expected: i64,
        /// Id actually found.
        found: i64,
    },

    /// A statement inside a migration unit failed against the database.
    #[error("failed to execute migration '{}': {source}", .file.display())]
    Statement {
        /// The migration file containing the failing statement.
        file: PathBuf,
        /// Error reported by the database backend.
        #[source]
        source: BoxedError,
    },

    /// A database connection for an org could not be opened.
    #[error("failed to connect to database for org '{org}': {source}")]
    Connect {
        /// The org whose database was being opened.
        org: String,
        /// Error reported by the database backend.
        #[source]
        source: BoxedError,
    },
}

/// Convenience alias for results with [`MigrationError`].
pub type Result<T> = std::result::Result<T, MigrationError>;
