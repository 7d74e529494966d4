//! The migration runner.
//!
//! [`MigrationRunner`] executes pending migration units against one org's
//! database connection, advancing the org's watermark by at most one unit
//! per call. The database itself sits behind [`StatementExecutor`], so the
//! runner is testable without any driver.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{BoxedError, MigrationError, Result};
use crate::source::MigrationSet;

/// Executes single SQL statements against one org's database.
///
/// Implemented for `rusqlite::Connection` by the sqlite backend crate, and
/// by scripted fakes in tests.
pub trait StatementExecutor {
    /// Executes one statement, reporting success or the backend's error.
    fn execute(&mut self, statement: &str) -> std::result::Result<(), BoxedError>;
}

/// Runs pending migration units from a directory against org databases.
///
/// # Single-step contract
///
/// [`run_pending`](Self::run_pending) advances by **at most one unit per
/// call**: it executes the first pending unit, returns that unit's id, and
/// stops — even when further units are pending. Callers apply a full
/// backlog by invoking it repeatedly until the returned id stops changing,
/// which is exactly what [`run_all`](crate::run_all) does.
///
/// # Examples
///
/// ```no_run
/// use org_store_migrate::{MigrationRunner, StatementExecutor};
///
/// fn migrate(conn: &mut dyn StatementExecutor) -> org_store_migrate::Result<i64> {
///     let runner = MigrationRunner::new("migrations");
///     let mut watermark = -1;
///     loop {
///         let advanced = runner.run_pending(conn, watermark)?;
///         if advanced == watermark {
///             return Ok(watermark);
///         }
///         watermark = advanced;
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct MigrationRunner {
    dir: PathBuf,
}

impl MigrationRunner {
    /// Creates a runner reading units from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory this runner discovers units in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Executes at most one pending unit and returns the new watermark.
    ///
    /// Discovers and orders the full unit set, selects the sub-sequence
    /// past `last_ran_id`, and executes the first selected unit's
    /// statements in file order, one per line. Whitespace-only lines are
    /// skipped. With nothing pending, returns `last_ran_id` unchanged.
    ///
    /// # Errors
    ///
    /// Discovery errors abort before anything executes. A failing
    /// statement yields [`MigrationError::Statement`] naming the unit's
    /// file; the watermark does not advance past it. There is no
    /// transaction boundary around a unit: statements that ran before the
    /// failure stay applied, so units should be written to tolerate
    /// partial re-execution.
    pub fn run_pending(
        &self,
        executor: &mut dyn StatementExecutor,
        last_ran_id: i64,
    ) -> Result<i64> {
        let set = MigrationSet::discover(&self.dir)?;
        let Some(unit) = set.pending(last_ran_id).first() else {
            return Ok(last_ran_id);
        };

        let contents = fs::read_to_string(&unit.path).map_err(|err| MigrationError::Io {
            path: unit.path.clone(),
            source: err,
        })?;

        for line in contents.lines() {
            let statement = line.trim();
            if statement.is_empty() {
                continue;
            }
            executor
                .execute(statement)
                .map_err(|source| MigrationError::Statement {
                    file: unit.path.clone(),
                    source,
                })?;
        }

        info!(file = %unit.path.display(), id = unit.id, "executed migration");
        Ok(unit.id)
    }
}
