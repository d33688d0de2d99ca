//! Zone file parsing.
//!
//! zonegate doesn't implement the zone file grammar, that is the job of the external
//! [checker][crate::checker]. It only pulls out the handful of values its own policy checks need,
//! using the textual shape of the SOA record and the `$ORIGIN` directive:
//!
//! ```text
//! $ORIGIN example.com.
//! example.com.  IN  SOA  ns1.example.com. hostmaster.example.com. (
//!                   2024031501 ; serial
//!                   86400 7200 3600000 172800 )
//! ```
//!
//! Here the zone name is `example.com`, the serial `2024031501` and the directives
//! `["$ORIGIN example.com."]`.
//!
//! The zone name and serial are required. Failing to find either is an [`Error`] that aborts the
//! whole run.

use crate::error::Error;
use lazy_static::lazy_static;
use regex::Regex;

pub mod origin;
pub mod serial;

lazy_static! {
    static ref SOA_NAME: Regex =
        Regex::new(r"(?m)^\s*([a-zA-Z0-9-]+[a-zA-Z0-9.-]+)\s+IN\s+SOA").unwrap();
    static ref ORIGIN_NAME: Regex =
        Regex::new(r"(?m)^\s*\$ORIGIN\s+([a-zA-Z0-9-]+[a-zA-Z0-9.-]+)").unwrap();
    static ref SOA_SERIAL: Regex =
        Regex::new(r"IN\s+SOA\s+[A-Za-z0-9.-]+\s+[A-Za-z0-9.-]+\s+\(\s+(\d+)").unwrap();
    static ref ORIGIN_LINE: Regex = Regex::new(r"(?m)^[ \t]*\$ORIGIN.*$").unwrap();
}

/// The values extracted from one snapshot of a zone file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneRecord {
    pub zone_name: String,
    pub serial: u64,
    pub origin_directives: Vec<String>,
}

impl ZoneRecord {
    /// Extract every value at once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnparsableZone`] or [`Error::UnparsableSerial`] if the zone name or
    /// serial can't be found.
    pub fn parse(text: &str) -> Result<Self, Error> {
        Ok(Self {
            zone_name: parse_zone_name(text)?,
            serial: parse_serial(text)?,
            origin_directives: parse_origin_directives(text),
        })
    }
}

/// The zone's name, taken from the owner of the SOA record or failing that the first `$ORIGIN`
/// directive. Surrounding dots are stripped.
///
/// # Errors
///
/// Returns [`Error::UnparsableZone`] if there is neither.
pub fn parse_zone_name(text: &str) -> Result<String, Error> {
    if let Some(name) = SOA_NAME.captures(text).and_then(|c| c.get(1)) {
        let name = name.as_str().trim_matches('.');
        tracing::debug!("parsed zone name from SOA record: {name}");
        return Ok(name.to_string());
    }
    if let Some(name) = ORIGIN_NAME.captures(text).and_then(|c| c.get(1)) {
        let name = name.as_str().trim_matches('.');
        tracing::debug!("parsed zone name from $ORIGIN directive: {name}");
        return Ok(name.to_string());
    }
    tracing::error!("Failed to parse zonename");
    Err(Error::UnparsableZone)
}

/// The first number of the SOA record's parenthesized block.
///
/// # Errors
///
/// Returns [`Error::UnparsableSerial`] if no SOA record with a numeric block is found, or the
/// number doesn't fit a `u64`.
pub fn parse_serial(text: &str) -> Result<u64, Error> {
    let serial = SOA_SERIAL
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<u64>().ok());
    match serial {
        Some(serial) => {
            tracing::debug!("parsed serial: {serial}");
            Ok(serial)
        }
        None => {
            tracing::error!("Failed to parse serial");
            Err(Error::UnparsableSerial)
        }
    }
}

/// Every `$ORIGIN` directive line, in order of appearance.
#[must_use]
pub fn parse_origin_directives(text: &str) -> Vec<String> {
    let directives: Vec<String> = ORIGIN_LINE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect();
    tracing::debug!("$ORIGIN directive(s): {directives:?}");
    directives
}
