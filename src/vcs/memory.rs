use crate::context::{Revision, RevisionPair};
use crate::error::Error;
use crate::vcs::VersionControl;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A fixed, in-memory repository. Answers are configured up front with the `with_*` builders.
#[derive(Default, Debug, Clone)]
pub struct InMemoryRepository {
    root: PathBuf,
    tracked: Vec<String>,
    changed: Vec<String>,
    snapshots: HashMap<(String, Revision), String>,
    commit_counts: HashMap<String, u64>,
    repository_commit_count: Option<u64>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_tracked(mut self, path: &str) -> Self {
        self.tracked.push(path.to_string());
        self
    }

    /// Mark `path` as changed between the revisions of every pair.
    #[must_use]
    pub fn with_changed(mut self, path: &str) -> Self {
        self.changed.push(path.to_string());
        self
    }

    #[must_use]
    pub fn with_content(mut self, path: &str, revision: Revision, content: &str) -> Self {
        self.snapshots
            .insert((path.to_string(), revision), content.to_string());
        self
    }

    #[must_use]
    pub fn with_commit_count(mut self, path: &str, count: u64) -> Self {
        self.commit_counts.insert(path.to_string(), count);
        self
    }

    #[must_use]
    pub fn with_repository_commit_count(mut self, count: u64) -> Self {
        self.repository_commit_count = Some(count);
        self
    }
}

impl VersionControl for InMemoryRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn tracked_files(&self) -> Result<Vec<String>, Error> {
        Ok(self.tracked.clone())
    }

    fn changed_files(&self, _pair: RevisionPair) -> Result<Vec<String>, Error> {
        Ok(self.changed.clone())
    }

    fn show(&self, path: &str, revision: Revision) -> Result<String, Error> {
        self.snapshots
            .get(&(path.to_string(), revision))
            .cloned()
            .ok_or_else(|| Error::ContentUnavailable {
                path: path.to_string(),
                revision,
                message: format!("path '{path}' does not exist in '{revision}'"),
            })
    }

    fn commit_count(&self, path: Option<&str>) -> Result<u64, Error> {
        let count = match path {
            Some(path) => self.commit_counts.get(path).copied(),
            None => self.repository_commit_count,
        };
        count.ok_or_else(|| Error::VersionControl {
            code: Some(128),
            message: "ambiguous argument 'HEAD': unknown revision".to_string(),
        })
    }
}
