//! SOA serial policy.
//!
//! Serials follow the date-stamped `YYYYMMDDnn` convention. A zone seen for the first time only
//! has to carry something that looks like a date (legacy serials are tolerated). A zone with
//! history must be stamped with today's date and strictly increase on its previous serial.

use lazy_static::lazy_static;
use regex::Regex;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

lazy_static! {
    static ref LEGACY_SERIAL: Regex =
        Regex::new(r"19[7-9][0-9]|[2-9][0-9]{3}0[1-9]|1[12][012][0-9]|3[01]\d\d").unwrap();
}

/// A serial that breaks the policy.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SerialViolation {
    #[error("Bad serial number format: {0}")]
    BadFormat(u64),
    #[error("Serial number was not incremented: {current} is not greater than {baseline}")]
    NotIncremented { current: u64, baseline: u64 },
}

/// Today's date in the local timezone, or UTC if the local offset can't be determined.
#[must_use]
pub fn today() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}

fn date_stamp(date: Date) -> String {
    // NB: unwrap is safe: a date always has the components this description asks for.
    date.format(format_description!("[year][month][day]")).unwrap()
}

/// Whether `serial` is acceptable in its format alone. Without a `baseline` any date-like digit
/// run passes; with one it must read `<today as YYYYMMDD><2 digits>`.
#[must_use]
pub fn format_ok(serial: u64, has_baseline: bool, today: Date) -> bool {
    let serial = serial.to_string();
    if has_baseline {
        serial
            .strip_prefix(&date_stamp(today))
            .is_some_and(|counter| counter.len() == 2)
    } else {
        LEGACY_SERIAL.is_match(&serial)
    }
}

/// Check `current` against the serial policy, logging the outcome of each rule.
///
/// Returns every violation found. Callers count a non-empty result as a single error.
#[must_use]
pub fn check_serial(current: u64, baseline: Option<u64>, today: Date) -> Vec<SerialViolation> {
    let mut violations = vec![];

    tracing::debug!("checking serial format: {current}");
    if format_ok(current, baseline.is_some(), today) {
        tracing::info!("Serial format OK");
    } else {
        let violation = SerialViolation::BadFormat(current);
        tracing::error!("{violation}");
        violations.push(violation);
    }

    if let Some(baseline) = baseline {
        tracing::debug!("checking serial {current} against serial {baseline}");
        if current > baseline {
            tracing::info!("Serial number incrementation OK");
        } else {
            let violation = SerialViolation::NotIncremented { current, baseline };
            tracing::error!("{violation}");
            violations.push(violation);
        }
    }

    violations
}
