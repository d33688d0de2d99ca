//! Invocation context.
//!
//! zonegate runs either as a git `pre-commit` hook, where the staged changes are compared against
//! the last commit, or as a CI pipeline step after a merge, where the last commit is compared
//! against its parent. The [`InvocationContext`] is decided once at startup and handed to every
//! component that needs to know which pair of revisions to look at.

use crate::vcs::VersionControl;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// How zonegate was launched.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum InvocationContext {
    /// Installed under `.git/hooks`, validating a commit before it is created.
    LocalHook,
    /// Run standalone, validating a commit that is already in history.
    PipelineRun,
}

/// A symbolic point in version control that file content can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Revision {
    /// The working tree as it is about to be committed. Content is read from the index.
    WorkTree,
    /// The last commit.
    Head,
    /// The parent of the last commit.
    HeadParent,
}

/// The `(current, baseline)` revisions compared during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevisionPair {
    pub current: Revision,
    pub baseline: Revision,
}

impl Revision {
    /// The git object name addressing `path` at this revision, e.g. `HEAD~1:db.example.com`.
    #[must_use]
    pub fn object_name(self, path: &str) -> String {
        match self {
            Revision::WorkTree => format!(":{path}"),
            Revision::Head => format!("HEAD:{path}"),
            Revision::HeadParent => format!("HEAD~1:{path}"),
        }
    }

    /// The argument naming this revision for `git diff`, or `None` for the working tree.
    #[must_use]
    pub fn diff_arg(self) -> Option<&'static str> {
        match self {
            Revision::WorkTree => None,
            Revision::Head => Some("HEAD"),
            Revision::HeadParent => Some("HEAD~1"),
        }
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Revision::WorkTree => f.write_str("index"),
            Revision::Head => f.write_str("HEAD"),
            Revision::HeadParent => f.write_str("HEAD~1"),
        }
    }
}

impl InvocationContext {
    /// Decide the context from the path the program was launched as. Anything living under a
    /// `.git/hooks` directory is a hook, everything else a pipeline run.
    #[must_use]
    pub fn detect(program: impl AsRef<Path>) -> Self {
        let program = program.as_ref();
        let absolute: PathBuf = if program.is_absolute() {
            program.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(program))
                .unwrap_or_else(|_| program.to_path_buf())
        };
        let context = if absolute.to_string_lossy().contains(".git/hooks") {
            InvocationContext::LocalHook
        } else {
            InvocationContext::PipelineRun
        };
        tracing::debug!("call method: {context}");
        context
    }

    /// The revisions compared by this context.
    #[must_use]
    pub fn revision_pair(self) -> RevisionPair {
        match self {
            InvocationContext::LocalHook => RevisionPair {
                current: Revision::WorkTree,
                baseline: Revision::Head,
            },
            InvocationContext::PipelineRun => RevisionPair {
                current: Revision::Head,
                baseline: Revision::HeadParent,
            },
        }
    }

    /// Adjust a raw commit count from history to the number of revisions that precede the
    /// change under validation. In a pipeline run the commit being validated is already counted.
    #[must_use]
    pub fn adjust_revision_count(self, raw: u64) -> u64 {
        match self {
            InvocationContext::LocalHook => raw,
            InvocationContext::PipelineRun => raw.saturating_sub(1),
        }
    }

    /// Number of prior revisions touching `path`, or the whole repository when `path` is `None`.
    /// A count that can't be determined (e.g. no commits yet) is treated as 0.
    pub fn revision_count(self, vcs: &dyn VersionControl, path: Option<&str>) -> u64 {
        let count = match vcs.commit_count(path) {
            Ok(raw) => self.adjust_revision_count(raw),
            Err(err) => {
                tracing::debug!("no revision count available: {err}");
                0
            }
        };
        tracing::debug!("revision: {count}");
        count
    }
}

impl fmt::Display for InvocationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvocationContext::LocalHook => f.write_str("git hook"),
            InvocationContext::PipelineRun => f.write_str("ci/cd pipeline"),
        }
    }
}
