//! A [`VersionControl`][super::VersionControl] implementation backed by the `git` executable.
//!
//! Every operation runs `git -C <root> ...` and fails with [`Error::VersionControl`] when git
//! exits non-zero.
use crate::context::{Revision, RevisionPair};
use crate::error::Error;
use crate::vcs::VersionControl;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

/// A git working tree located by [`GitRepository::discover`].
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct GitRepository {
    program: PathBuf,
    root: PathBuf,
}

impl GitRepository {
    /// Locate the repository containing `dir` using the given git executable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotARepository`] if `dir` isn't inside a git working tree, or git can't
    /// be run.
    pub fn discover(program: impl Into<PathBuf>, dir: &Path) -> Result<Self, Error> {
        let program = program.into();
        let output = run(&program, [OsStr::new("-C"), dir.as_os_str()], |cmd| {
            cmd.args(["rev-parse", "--show-toplevel"]);
        })
        .map_err(|err| {
            tracing::debug!("repository discovery failed: {err}");
            Error::NotARepository
        })?;
        let root = output.lines().next().unwrap_or_default();
        if root.is_empty() {
            return Err(Error::NotARepository);
        }
        tracing::info!("Repo path is: {root}");
        Ok(Self {
            program,
            root: PathBuf::from(root),
        })
    }

    fn git<I, S>(&self, args: I) -> Result<String, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        run(
            &self.program,
            [OsStr::new("-C"), self.root.as_os_str()],
            |cmd| {
                cmd.args(args);
            },
        )
    }
}

fn run(
    program: &Path,
    prefix: [&OsStr; 2],
    build: impl FnOnce(&mut Command),
) -> Result<String, Error> {
    let mut cmd = Command::new(program);
    cmd.args(prefix);
    build(&mut cmd);
    tracing::debug!("executing command: {cmd:?}");

    let output = cmd.output()?;
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    if output.status.success() {
        return Ok(stdout);
    }

    tracing::debug!("command {cmd:?} finished with errors");
    let stderr = String::from_utf8_lossy(&output.stderr);
    let message = match stderr.trim() {
        "" => stdout.trim().to_string(),
        stderr => stderr.to_string(),
    };
    Err(Error::VersionControl {
        code: output.status.code(),
        message,
    })
}

fn lines(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

impl VersionControl for GitRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn tracked_files(&self) -> Result<Vec<String>, Error> {
        Ok(lines(&self.git(["ls-files"])?))
    }

    fn changed_files(&self, pair: RevisionPair) -> Result<Vec<String>, Error> {
        let mut args = vec!["diff", "--name-only", "--diff-filter=d"];
        args.extend(pair.baseline.diff_arg());
        args.extend(pair.current.diff_arg());
        Ok(lines(&self.git(args)?))
    }

    fn show(&self, path: &str, revision: Revision) -> Result<String, Error> {
        match self.git(["show".to_string(), revision.object_name(path)]) {
            Ok(content) => Ok(content.lines().collect::<Vec<_>>().join("\n")),
            Err(Error::VersionControl { message, .. }) => Err(Error::ContentUnavailable {
                path: path.to_string(),
                revision,
                message,
            }),
            Err(err) => Err(err),
        }
    }

    fn commit_count(&self, path: Option<&str>) -> Result<u64, Error> {
        let mut args = vec!["rev-list", "--count", "HEAD"];
        if let Some(path) = path {
            args.extend(["--", path]);
        }
        let output = self.git(args)?;
        output
            .trim()
            .parse()
            .map_err(|_| Error::VersionControl {
                code: None,
                message: format!("unexpected commit count {:?}", output.trim()),
            })
    }
}
