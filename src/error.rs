//! Error types.

use crate::context::Revision;

/// Error enumerates the possible zonegate error states.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Returned when the working directory isn't inside a git repository.
    #[error("not inside a git repository")]
    NotARepository,

    /// Returned when a version-control command exits non-zero. The message is the command's
    /// stderr if it wrote any, otherwise its stdout.
    #[error("version control command failed ({code:?}): {message}")]
    VersionControl { code: Option<i32>, message: String },

    /// Returned when a file's content can't be read at the requested [`Revision`], e.g. because
    /// the file was deleted or the revision doesn't exist yet.
    ///
    /// This is the only accessor error that fails a single file rather than the whole run.
    #[error("content of {path} unavailable at {revision}: {message}")]
    ContentUnavailable {
        path: String,
        revision: Revision,
        message: String,
    },

    /// Returned when neither an `IN SOA` record nor an `$ORIGIN` directive names the zone.
    #[error("failed to parse zone name")]
    UnparsableZone,

    /// Returned when no SOA record with a parenthesized numeric block is found.
    #[error("failed to parse serial")]
    UnparsableSerial,

    /// Returned when the external zone checker can't be launched at all.
    #[error("unable to run zone checker {program}: {source}")]
    CheckerUnavailable {
        program: String,
        source: std::io::Error,
    },

    /// Returned when a generic IO error occurs.
    #[error("an IO error occurred")]
    IO(#[from] std::io::Error),

    /// Returned when [loading a `Config`][crate::config::Config::try_from_file] fails due to
    /// invalid JSON content.
    #[error("invalid JSON")]
    InvalidJSON(#[from] serde_json::Error),
}

impl Error {
    /// Whether the error aborts the whole run, as opposed to failing only the file being
    /// checked.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::ContentUnavailable { .. })
    }
}
