//! zonegate
//!
//! A pre-commit and CI gate for DNS zone files kept in git.
//!
//! For every new or changed zone file zonegate:
//!
//! * runs the authoritative external checker ([`named-checkzone`]) on it,
//! * checks the SOA serial is date-stamped and, when the file has history, incremented over the
//!   previously committed serial,
//! * checks every `$ORIGIN` directive is fully qualified.
//!
//! Which revisions are compared depends on the [`InvocationContext`]: installed as a git hook,
//! the staged content is compared against `HEAD`; run from a CI pipeline, `HEAD` is compared
//! against its parent.
//!
//! [`named-checkzone`]: https://bind9.readthedocs.io/en/latest/manpages.html#named-checkzone-zone-file-validation-tool
//!
#![warn(clippy::pedantic)]

pub mod checker;
pub mod config;
pub mod context;
pub mod error;
pub mod pipeline;
pub mod vcs;
pub mod zone;

pub use checker::{NamedCheckzone, ZoneChecker};
pub use config::Config;
pub use context::{InvocationContext, Revision, RevisionPair};
pub use pipeline::{Pipeline, Report};
pub use vcs::{GitRepository, InMemoryRepository, VersionControl};
pub use zone::ZoneRecord;
