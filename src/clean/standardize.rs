//! Text, categorical and date normalization.
//!
//! Never adds or removes rows and never fails: a date that does not parse
//! becomes absent.

use chrono::{NaiveDate, NaiveDateTime};

use crate::clean::StageOutput;
use crate::domain::{DateValue, LoanRecord, LoanTable};

/// Canonical spellings for the known statuses, keyed by their lower-case form.
const STATUS_MAPPING: [(&str, &str); 5] = [
    ("fully paid", "Fully Paid"),
    ("current", "Current"),
    ("charged off", "Charged Off"),
    ("late (31-120 days)", "Late (31-120 days)"),
    ("late (16-30 days)", "Late (16-30 days)"),
];

const DATE_FORMATS: [&str; 8] = [
    "%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d", "%m-%d-%Y", "%Y%m%d", "%d %b %Y", "%b %d, %Y", "%B %d, %Y",
];

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%m/%d/%Y %H:%M"];

/// Normalize `loan_status`, `purpose` and the three date columns.
///
/// `affected` counts records where at least one field changed.
pub fn standardize_formats(table: LoanTable) -> StageOutput {
    let mut changed = 0;
    let records: LoanTable = table
        .into_iter()
        .map(|record| {
            let (out, record_changed) = standardize_record(record);
            if record_changed {
                changed += 1;
            }
            out
        })
        .collect();

    log::info!("Standardized formats on {changed} records");
    StageOutput::new(records, changed)
}

/// Returns the standardized record and whether any field changed.
fn standardize_record(mut record: LoanRecord) -> (LoanRecord, bool) {
    let status = record
        .loan_status
        .as_deref()
        .map(|s| normalize_status(s).trim().to_string());
    let purpose = record.purpose.as_deref().map(|s| s.trim().to_string());
    let mut changed = status != record.loan_status || purpose != record.purpose;
    record.loan_status = status;
    record.purpose = purpose;

    for date in [
        &mut record.application_date,
        &mut record.approval_date,
        &mut record.disbursement_date,
    ] {
        // Raw text always changes: it either parses or becomes absent.
        if let Some(DateValue::Raw(raw)) = date {
            let parsed = standardize_date(raw);
            *date = parsed;
            changed = true;
        }
    }
    (record, changed)
}

/// Map a raw status to its canonical spelling, or title-case it when unknown.
///
/// Trimming happens afterwards, so surrounding whitespace defeats the mapping
/// and falls through to title case.
pub fn normalize_status(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    STATUS_MAPPING
        .iter()
        .find(|(key, _)| *key == lowered)
        .map(|(_, canonical)| (*canonical).to_string())
        .unwrap_or_else(|| title_case(raw))
}

/// Upper-case the first letter of each whitespace-separated word and
/// lower-case the rest. Whitespace is preserved as-is.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for ch in s.chars() {
        if ch.is_whitespace() {
            out.push(ch);
            at_word_start = true;
        } else if at_word_start {
            out.extend(ch.to_uppercase());
            at_word_start = false;
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}

fn standardize_date(raw: &str) -> Option<DateValue> {
    let parsed = parse_date(raw);
    if parsed.is_none() {
        log::debug!("Unparseable date '{raw}' set to absent");
    }
    parsed.map(DateValue::Date)
}

/// Parse a date from a small set of common export formats.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}
