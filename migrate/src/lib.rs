//! Per-org schema migration runner and state tracking.
//!
//! This crate is the migration core of the org-store tool. Each
//! organization owns an independently-provisioned database; migrations are
//! plain SQL files named `<name>_<id>.sql` in a single directory, and the
//! highest id fully applied per org (the *watermark*) is tracked in a JSON
//! state file.
//!
//! The pieces, leaves first:
//!
//! - [`MigrationSet`] — discovers and orders units, rejecting duplicate or
//!   gapped ids.
//! - [`MigrationState`] — the durable org → watermark mapping;
//!   missing-file loads yield an empty state.
//! - [`MigrationRunner`] — executes pending units against a connection,
//!   advancing by at most one unit per call (see the type docs for why
//!   callers must loop).
//! - [`run_all`] — iterates every org in a state, opening a dedicated
//!   connection per org and looping the runner until its watermark
//!   stabilizes.
//!
//! Database access sits behind the [`StatementExecutor`] and
//! [`OrgDatabases`] traits, so this crate carries no driver dependency;
//! the sqlite backend crate supplies the real implementations.
//!
//! # Example
//!
//! ```no_run
//! use org_store_migrate::{DEFAULT_STATE_PATH, MigrationRunner, MigrationState, run_all};
//! # struct Dbs;
//! # impl org_store_migrate::OrgDatabases for Dbs {
//! #     type Conn = Conn;
//! #     fn connect(&self, _: &str) -> Result<Conn, org_store_migrate::BoxedError> { Ok(Conn) }
//! # }
//! # struct Conn;
//! # impl org_store_migrate::StatementExecutor for Conn {
//! #     fn execute(&mut self, _: &str) -> Result<(), org_store_migrate::BoxedError> { Ok(()) }
//! # }
//! # let databases = Dbs;
//!
//! let runner = MigrationRunner::new("migrations");
//! let mut state = MigrationState::load(DEFAULT_STATE_PATH)?;
//!
//! let result = run_all(&runner, &databases, &mut state);
//!
//! // Save even on failure: watermarks advanced before the error are kept.
//! state.save(DEFAULT_STATE_PATH)?;
//! result?;
//! # Ok::<(), org_store_migrate::MigrationError>(())
//! ```

mod driver;
mod error;
mod runner;
mod source;
mod state;

pub use driver::{OrgDatabases, run_all};
pub use error::{BoxedError, MigrationError, Result};
pub use runner::{MigrationRunner, StatementExecutor};
pub use source::{MigrationFile, MigrationSet, discover, extract_migration_id};
pub use state::{DEFAULT_STATE_PATH, MigrationState, NO_MIGRATIONS_RAN, OrgMigrationState};
