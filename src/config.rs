use crate::context::InvocationContext;
use crate::error::Error;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Run configuration, optionally loaded from a JSON file:
///
/// ```json
/// {
///   "git": "/usr/bin/git",
///   "checkzone": "/usr/sbin/named-checkzone",
///   "context": "pipeline-run"
/// }
/// ```
///
/// Every field may be omitted.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// The git executable.
    pub git: PathBuf,
    /// The external zone checker executable.
    pub checkzone: PathBuf,
    /// Force an [`InvocationContext`] instead of detecting it from the launch path.
    pub context: Option<InvocationContext>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            git: PathBuf::from("git"),
            checkzone: PathBuf::from("named-checkzone"),
            context: None,
        }
    }
}

impl Config {
    /// Load a [`Config`] from the JSON file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IO`] if the file can't be opened or read, or [`Error::InvalidJSON`] if
    /// its content isn't a valid configuration.
    pub fn try_from_file(p: impl AsRef<Path>) -> Result<Self, Error> {
        let f = File::open(p)?;
        let reader = BufReader::new(f);
        let conf: Config = serde_json::from_reader(reader)?;
        Ok(conf)
    }

    /// The context to run in: the configured override, or the one detected from `program`.
    #[must_use]
    pub fn context(&self, program: impl AsRef<Path>) -> InvocationContext {
        self.context
            .unwrap_or_else(|| InvocationContext::detect(program))
    }
}
