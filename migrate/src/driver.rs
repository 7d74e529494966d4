//! Org iteration: running the full backlog for every known org.

use tracing::debug;

use crate::error::{BoxedError, MigrationError, Result};
use crate::runner::{MigrationRunner, StatementExecutor};
use crate::state::MigrationState;

/// Provides a dedicated database connection per org.
///
/// Implemented by the sqlite backend crate (one database file per org).
/// The returned executor is dropped — and the connection released — before
/// the next org is processed.
pub trait OrgDatabases {
    /// Connection type handed to the runner.
    type Conn: StatementExecutor;

    /// Opens a connection to `org`'s database.
    fn connect(&self, org: &str) -> std::result::Result<Self::Conn, BoxedError>;
}

/// Runs the full migration backlog for every org in `state`, in order.
///
/// For each org this opens a dedicated connection and invokes
/// [`MigrationRunner::run_pending`] repeatedly until the watermark stops
/// changing — the retry loop the runner's single-step contract requires.
/// Each advance is written into `state` immediately, so progress made
/// before a failure is retained: if an org's migration fails, the call
/// stops and returns the error, and `state` holds the last good watermark
/// for every org processed so far (including the failing one). Callers
/// should persist `state` even on error to bound the blast radius of a
/// mid-batch failure to the failing unit.
pub fn run_all<D: OrgDatabases>(
    runner: &MigrationRunner,
    databases: &D,
    state: &mut MigrationState,
) -> Result<()> {
    for org in &mut state.orgs {
        let mut conn = databases
            .connect(&org.name)
            .map_err(|source| MigrationError::Connect {
                org: org.name.clone(),
                source,
            })?;

        loop {
            let advanced = runner.run_pending(&mut conn, org.last_ran_migration_id)?;
            if advanced == org.last_ran_migration_id {
                break;
            }
            org.last_ran_migration_id = advanced;
        }

        debug!(org = %org.name, watermark = org.last_ran_migration_id, "org up to date");
    }

    Ok(())
}
