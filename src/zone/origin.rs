//! `$ORIGIN` hygiene: every directive must name a fully qualified domain.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref QUALIFIED_ORIGIN: Regex = Regex::new(r"^[ \t]*\$ORIGIN.*\.$").unwrap();
}

/// A directive that doesn't end in the root label.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("No trailing \".\" at {0}")]
pub struct OriginViolation(pub String);

/// Check each directive line, logging one line of outcome per directive.
#[must_use]
pub fn check_origin<S: AsRef<str>>(directives: &[S]) -> Vec<OriginViolation> {
    directives
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter_map(|line| {
            if QUALIFIED_ORIGIN.is_match(line) {
                tracing::info!("{line} OK");
                None
            } else {
                let violation = OriginViolation(line.to_string());
                tracing::error!("{violation}");
                Some(violation)
            }
        })
        .collect()
}
