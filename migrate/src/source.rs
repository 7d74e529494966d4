//! Migration file discovery and ordering.
//!
//! Migration units are plain files named `<name>_<id>.sql` in a single
//! directory. Discovery extracts each file's integer id; [`MigrationSet`]
//! imposes the ascending-id execution order and rejects directories whose
//! ids are duplicated or not contiguous from zero.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{MigrationError, Result};

static MIGRATION_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_(\d+)\.sql$").expect("static regex must compile"));

/// One migration unit: a file of statements tagged with its extracted id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationFile {
    /// Path of the unit on disk.
    pub path: PathBuf,
    /// Integer id parsed from the filename.
    pub id: i64,
}

/// Extracts the migration id embedded in a filename.
///
/// The filename must end in `_<digits>.sql`; anything else is a fatal
/// configuration error, never a skippable one.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use org_store_migrate::extract_migration_id;
///
/// assert_eq!(extract_migration_id(Path::new("migrations/init_0.sql")).unwrap(), 0);
/// assert!(extract_migration_id(Path::new("migrations/init.sql")).is_err());
/// ```
pub fn extract_migration_id(path: &Path) -> Result<i64> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| MigrationError::InvalidFilename(path.to_path_buf()))?;

    let captures = MIGRATION_ID_RE
        .captures(name)
        .ok_or_else(|| MigrationError::InvalidFilename(path.to_path_buf()))?;

    captures[1]
        .parse::<i64>()
        .map_err(|_| MigrationError::InvalidFilename(path.to_path_buf()))
}

/// Lists the migration units in `dir`, unordered.
///
/// Subdirectories are ignored; every regular file must parse as a
/// migration unit or the whole discovery fails.
pub fn discover(dir: &Path) -> Result<Vec<MigrationFile>> {
    let entries = fs::read_dir(dir).map_err(|err| MigrationError::Io {
        path: dir.to_path_buf(),
        source: err,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| MigrationError::Io {
            path: dir.to_path_buf(),
            source: err,
        })?;
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        let id = extract_migration_id(&path)?;
        files.push(MigrationFile { path, id });
    }

    Ok(files)
}

/// The full, ordered collection of migration units for one run.
///
/// Ordering is ascending by id and is the sole execution order. Because
/// the runner addresses this set positionally (the watermark doubles as a
/// sorted index), construction verifies that ids are exactly `0..n`:
/// duplicates and gaps are both rejected.
#[derive(Debug, Clone, Default)]
pub struct MigrationSet {
    files: Vec<MigrationFile>,
}

impl MigrationSet {
    /// Discovers and orders the units in `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`MigrationError::InvalidFilename`] for a non-conforming
    /// filename, [`MigrationError::DuplicateId`] if two files claim the
    /// same id, and [`MigrationError::NonContiguousIds`] if the sorted
    /// ids are not `0, 1, 2, ...`.
    pub fn discover(dir: &Path) -> Result<Self> {
        let mut files = discover(dir)?;
        files.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.path.cmp(&b.path)));

        for (index, file) in files.iter().enumerate() {
            let expected = index as i64;
            if file.id == expected {
                continue;
            }
            if index > 0 && files[index - 1].id == file.id {
                return Err(MigrationError::DuplicateId {
                    id: file.id,
                    first: files[index - 1].path.clone(),
                    second: file.path.clone(),
                });
            }
            return Err(MigrationError::NonContiguousIds {
                expected,
                found: file.id,
            });
        }

        Ok(Self { files })
    }

    /// All units in ascending id order.
    pub fn files(&self) -> &[MigrationFile] {
        &self.files
    }

    /// The sub-sequence not yet covered by `last_ran_id`, in execution order.
    ///
    /// Slices the sorted set starting at position `last_ran_id + 1`; with
    /// the contiguity check in [`discover`](Self::discover), position and
    /// id are interchangeable.
    pub fn pending(&self, last_ran_id: i64) -> &[MigrationFile] {
        let start = usize::try_from(last_ran_id + 1)
            .unwrap_or(0)
            .min(self.files.len());
        &self.files[start..]
    }

    /// Number of units in the set.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the set contains no units.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
