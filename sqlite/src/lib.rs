//! SQLite storage backend for the org-store inventory tool.
//!
//! Each organization owns a self-contained database file,
//! `store_<org>.db`, under a common data directory. This crate provides:
//!
//! - **`connect`** — [`OrgStore`] (path policy + connection opening) and
//!   [`OrgConnection`], which implements the migration crate's executor
//!   trait so the runner can apply migration files.
//! - **`store`** — [`InventoryQuery`], the parameterized CRUD layer over
//!   the `Customers`/`Products`/`Orders` tables.
//!
//! # Quick start
//!
//! ```no_run
//! use org_store_migrate::{MigrationRunner, MigrationState, run_all};
//! use org_store_sqlite::{InventoryQuery, OrgStore};
//!
//! let store = OrgStore::new("data");
//!
//! // Apply pending migrations for every org in the state.
//! let runner = MigrationRunner::new("migrations");
//! let mut state = MigrationState::load("migration_state.json").unwrap();
//! run_all(&runner, &store, &mut state).unwrap();
//!
//! // Then query one org's inventory.
//! let conn = store.open("acme").unwrap();
//! let query = InventoryQuery::new(conn.connection());
//! let customers = query.list_customers("", "").unwrap();
//! ```

mod connect;
mod error;
mod store;

pub use connect::{OrgConnection, OrgStore, org_database_exists};
pub use error::{Result, SqliteError};
pub use store::InventoryQuery;
