//! Durable per-org migration watermarks.
//!
//! [`MigrationState`] is the single persisted object of the migration
//! subsystem: a JSON file mapping each org to the highest migration id
//! fully applied for it. It is loaded once per invocation, mutated in
//! memory while migrations run, and written back wholesale at the end.
//!
//! # Examples
//!
//! ```no_run
//! use org_store_migrate::{DEFAULT_STATE_PATH, MigrationState, OrgMigrationState};
//!
//! let mut state = MigrationState::load(DEFAULT_STATE_PATH).unwrap();
//! if state.orgs.is_empty() {
//!     state.orgs.push(OrgMigrationState::new("default"));
//! }
//! state.save(DEFAULT_STATE_PATH).unwrap();
//! ```

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MigrationError, Result};

/// Default location of the persisted migration state, relative to the
/// working directory.
pub const DEFAULT_STATE_PATH: &str = "migration_state.json";

/// Watermark value for an org that has never had a migration applied.
pub const NO_MIGRATIONS_RAN: i64 = -1;

/// Root persisted object: one watermark entry per known org.
///
/// Org order carries no meaning but is preserved across save/load
/// round-trips. The file is the single source of truth across
/// invocations; no concurrent writers are supported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationState {
    /// Known orgs and their watermarks.
    #[serde(default)]
    pub orgs: Vec<OrgMigrationState>,
}

/// One org's migration watermark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgMigrationState {
    /// Org name, matching the database naming convention.
    pub name: String,
    /// Highest migration id fully applied for this org.
    ///
    /// `-1` ([`NO_MIGRATIONS_RAN`]) means no migrations have ever run.
    /// Only ever increases, and only to the id of a unit whose every
    /// statement executed without error.
    pub last_ran_migration_id: i64,
}

impl OrgMigrationState {
    /// Creates an entry for an org with no migrations applied yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            last_ran_migration_id: NO_MIGRATIONS_RAN,
        }
    }
}

impl MigrationState {
    /// Loads persisted state from `path`.
    ///
    /// A missing file is the normal first-run case and yields an empty
    /// state. Any other read failure, or malformed JSON, is an error
    /// carrying the path for diagnosis.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => {
                return Err(MigrationError::Io {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        serde_json::from_str(&data).map_err(|err| MigrationError::StateParse {
            path: path.to_path_buf(),
            source: err,
        })
    }

    /// Serializes the full state and overwrites `path` in one write.
    ///
    /// Last write wins: any prior content is fully replaced, never merged.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let data = serde_json::to_string_pretty(self).map_err(MigrationError::StateSerialize)?;

        fs::write(path, data).map_err(|err| MigrationError::WriteState {
            path: path.to_path_buf(),
            source: err,
        })
    }

    /// Returns the watermark recorded for `org`, if the org is known.
    pub fn watermark(&self, org: &str) -> Option<i64> {
        self.orgs
            .iter()
            .find(|o| o.name == org)
            .map(|o| o.last_ran_migration_id)
    }
}
