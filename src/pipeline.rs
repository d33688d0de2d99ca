//! Validation pipeline.
//!
//! Each selected zone file goes through the same stages, stopping at the first one that fails:
//!
//! 1. the external [checker][crate::checker] validates the checked-out file under the zone name
//!    parsed from its current content,
//! 2. the serial is checked against the [serial policy][crate::zone::serial], comparing with the
//!    baseline revision when the file has history,
//! 3. the `$ORIGIN` directives are checked for [trailing dots][crate::zone::origin].
//!
//! A failing stage fails only its file; the remaining files are still checked. An unparsable
//! zone name or serial, or any [fatal][crate::error::Error::is_fatal] error, aborts the run.

use crate::checker::{CheckOutcome, ZoneChecker};
use crate::context::{InvocationContext, Revision};
use crate::error::Error;
use crate::vcs::VersionControl;
use crate::zone::{self, origin, serial};
use std::fmt;
use time::Date;

/// The stage a zone file failed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// A revision of the file couldn't be read.
    Content,
    /// The external checker rejected the zone.
    ZoneCheck,
    Serial,
    Origin,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Content => f.write_str("content"),
            Stage::ZoneCheck => f.write_str("zone check"),
            Stage::Serial => f.write_str("serial"),
            Stage::Origin => f.write_str("$ORIGIN"),
        }
    }
}

/// The result of a run that wasn't aborted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub checked: Vec<String>,
    pub failures: Vec<(String, Stage)>,
}

impl Report {
    /// Number of errors counted over the run. Each failed file counts once.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.failures.len()
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

enum Rejection {
    Failed(Stage),
    Fatal(Error),
}

impl From<Error> for Rejection {
    fn from(err: Error) -> Self {
        Rejection::Fatal(err)
    }
}

/// Drives validation of the zone files of one repository in one [`InvocationContext`].
pub struct Pipeline<'a> {
    context: InvocationContext,
    vcs: &'a dyn VersionControl,
    checker: &'a dyn ZoneChecker,
    today: Date,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        context: InvocationContext,
        vcs: &'a dyn VersionControl,
        checker: &'a dyn ZoneChecker,
    ) -> Self {
        Self {
            context,
            vcs,
            checker,
            today: serial::today(),
        }
    }

    /// Validate serial stamps against `today` instead of the current date.
    #[must_use]
    pub fn with_today(mut self, today: Date) -> Self {
        self.today = today;
        self
    }

    /// The zone files to validate. A repository without history has every tracked zone file
    /// checked, otherwise only the zone files changed between the context's revisions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VersionControl`] if the files can't be listed.
    pub fn zone_files(&self) -> Result<Vec<String>, Error> {
        if self.context.revision_count(self.vcs, None) == 0 {
            self.vcs.tracked_zone_files()
        } else {
            self.vcs.changed_zone_files(self.context.revision_pair())
        }
    }

    /// Select and validate the zone files.
    ///
    /// # Errors
    ///
    /// Returns the first fatal [`Error`] encountered. Per-file failures are collected in the
    /// [`Report`] instead.
    pub fn run(&self) -> Result<Report, Error> {
        let files = self.zone_files()?;
        self.check_files(&files)
    }

    /// Validate the given zone files.
    ///
    /// # Errors
    ///
    /// See [`Pipeline::run`].
    pub fn check_files(&self, files: &[String]) -> Result<Report, Error> {
        let mut report = Report::default();
        for path in files {
            report.checked.push(path.clone());
            match self.check_file(path) {
                Ok(()) => {}
                Err(Rejection::Failed(stage)) => report.failures.push((path.clone(), stage)),
                Err(Rejection::Fatal(err)) => return Err(err),
            }
        }
        if !report.is_success() {
            tracing::error!("{} error(s) found", report.error_count());
        }
        Ok(report)
    }

    fn check_file(&self, path: &str) -> Result<(), Rejection> {
        tracing::info!("Checking zonefile {path} ...");
        let revisions = self.context.revision_count(self.vcs, Some(path));
        let pair = self.context.revision_pair();

        let current = self.fetch(path, pair.current)?;
        let zone_name = zone::parse_zone_name(&current)?;
        self.check_zone(&zone_name, path)?;

        let current_serial = zone::parse_serial(&current)?;
        let baseline_serial = if revisions == 0 {
            None
        } else {
            Some(zone::parse_serial(&self.fetch(path, pair.baseline)?)?)
        };
        if !serial::check_serial(current_serial, baseline_serial, self.today).is_empty() {
            return Err(Rejection::Failed(Stage::Serial));
        }

        let directives = zone::parse_origin_directives(&current);
        if !origin::check_origin(&directives).is_empty() {
            return Err(Rejection::Failed(Stage::Origin));
        }
        Ok(())
    }

    fn fetch(&self, path: &str, revision: Revision) -> Result<String, Rejection> {
        match self.vcs.show(path, revision) {
            Ok(content) => Ok(content),
            Err(err) if !err.is_fatal() => {
                tracing::error!("{err}");
                Err(Rejection::Failed(Stage::Content))
            }
            Err(err) => Err(Rejection::Fatal(err)),
        }
    }

    fn check_zone(&self, zone_name: &str, path: &str) -> Result<(), Rejection> {
        let on_disk = self.vcs.root().join(path);
        match self.checker.check(zone_name, &on_disk)? {
            CheckOutcome::Valid => {
                tracing::info!("Zone OK");
                Ok(())
            }
            CheckOutcome::Invalid { diagnostics, .. } => {
                tracing::error!("Errors in validating zone {zone_name}:\n{diagnostics}");
                Err(Rejection::Failed(Stage::ZoneCheck))
            }
        }
    }
}
