//! Version-control access.
//!
//! Supports a generic read-only interface onto the repository holding the zone files: which files
//! are tracked, which changed between two revisions, what a file contained at a given revision,
//! and how many commits touched it.
//!
//! Two implementations are provided, [`git::GitRepository`] and [`memory::InMemoryRepository`].
//! The former shells out to the `git` executable. The latter serves fixed answers and is useful
//! for exercising the validation pipeline without a repository.

use crate::context::{Revision, RevisionPair};
use crate::error::Error;
use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

pub mod git;
pub mod memory;

#[allow(clippy::module_name_repetitions)]
pub use git::GitRepository;
#[allow(clippy::module_name_repetitions)]
pub use memory::InMemoryRepository;

lazy_static! {
    static ref ZONE_FILE_NAME: Regex = Regex::new(r"^db\.|\.db$|\.zone$|\.rev$|\.rpz$").unwrap();
}

/// A read-only view of a version-controlled repository.
///
/// Paths are always relative to the repository root.
pub trait VersionControl {
    /// Top-level directory of the working tree.
    fn root(&self) -> &Path;

    /// All files tracked by the repository.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VersionControl`] if the listing can't be produced.
    fn tracked_files(&self) -> Result<Vec<String>, Error>;

    /// Files added or modified between the revisions of `pair`. Deleted files are excluded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VersionControl`] if either revision can't be resolved.
    fn changed_files(&self, pair: RevisionPair) -> Result<Vec<String>, Error>;

    /// Full text of `path` at `revision`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ContentUnavailable`] if the path doesn't exist at that revision.
    fn show(&self, path: &str, revision: Revision) -> Result<String, Error>;

    /// Raw number of commits reachable from `HEAD` touching `path`, or all commits when `path` is
    /// `None`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VersionControl`] if there is no history to count.
    fn commit_count(&self, path: Option<&str>) -> Result<u64, Error>;

    /// Tracked files that look like zone files.
    ///
    /// # Errors
    ///
    /// See [`VersionControl::tracked_files`].
    fn tracked_zone_files(&self) -> Result<Vec<String>, Error> {
        let files = zone_files(self.tracked_files()?);
        tracing::info!("{} file(s) detected", files.len());
        Ok(files)
    }

    /// Changed files that look like zone files.
    ///
    /// # Errors
    ///
    /// See [`VersionControl::changed_files`].
    fn changed_zone_files(&self, pair: RevisionPair) -> Result<Vec<String>, Error> {
        let files = zone_files(self.changed_files(pair)?);
        tracing::info!("{} changed file(s) detected", files.len());
        Ok(files)
    }
}

/// Whether the base name of `path` follows the zone file naming convention: a `db.` prefix, or
/// one of the `.db`, `.zone`, `.rev` and `.rpz` suffixes.
#[must_use]
pub fn is_zone_file(path: &str) -> bool {
    let name = Path::new(path)
        .file_name()
        .map_or_else(|| path.into(), |n| n.to_string_lossy());
    ZONE_FILE_NAME.is_match(&name)
}

/// Keep only the zone files of `paths`, preserving order.
#[must_use]
pub fn zone_files(paths: impl IntoIterator<Item = String>) -> Vec<String> {
    paths
        .into_iter()
        .filter(|p| !p.is_empty() && is_zone_file(p))
        .collect()
}
