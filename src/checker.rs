//! External zone checking.
//!
//! Zone file grammar and semantics are validated by an authoritative external tool, by default
//! BIND's `named-checkzone`, invoked as:
//!
//! ```bash
//! named-checkzone -k fail example.com /path/to/repo/db.example.com
//! ```
//!
//! The tool reads the file from disk, so it always sees the checked-out copy rather than the
//! revision read from version control.

use crate::error::Error;
use std::path::{Path, PathBuf};
use std::process::Command;

/// The outcome of an external check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Valid,
    Invalid {
        code: Option<i32>,
        diagnostics: String,
    },
}

/// Something that validates a zone file on disk.
#[allow(clippy::module_name_repetitions)]
pub trait ZoneChecker {
    /// Check the zone `zone_name` stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CheckerUnavailable`] if the check couldn't be performed at all.
    fn check(&self, zone_name: &str, path: &Path) -> Result<CheckOutcome, Error>;
}

/// [`ZoneChecker`] running `named-checkzone` (or a compatible executable) with strict key
/// checking.
#[derive(Debug, Clone)]
pub struct NamedCheckzone {
    program: PathBuf,
}

impl NamedCheckzone {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for NamedCheckzone {
    fn default() -> Self {
        Self::new("named-checkzone")
    }
}

impl ZoneChecker for NamedCheckzone {
    fn check(&self, zone_name: &str, path: &Path) -> Result<CheckOutcome, Error> {
        let mut cmd = Command::new(&self.program);
        cmd.args(["-k", "fail", zone_name]).arg(path);
        tracing::debug!("executing command: {cmd:?}");

        let output = cmd.output().map_err(|source| Error::CheckerUnavailable {
            program: self.program.display().to_string(),
            source,
        })?;
        if output.status.success() {
            return Ok(CheckOutcome::Valid);
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let diagnostics = match stderr.trim() {
            "" => String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr => stderr.to_string(),
        };
        Ok(CheckOutcome::Invalid {
            code: output.status.code(),
            diagnostics,
        })
    }
}
