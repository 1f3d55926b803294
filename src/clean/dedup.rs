//! Duplicate removal by business key.
//!
//! The key is `(customer_id, loan_amount, application_date)`. The first record
//! seen for a key wins; absent components compare equal to each other.
//!
//! Dedup runs before the standardizer, so the date component is keyed on the
//! date the standardizer will produce: two spellings of one day share a key,
//! and an unparseable date keys the same as an absent one.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::clean::StageOutput;
use crate::clean::standardize::parse_date;
use crate::domain::{DateValue, LoanRecord, LoanTable};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DedupKey {
    customer_id: Option<String>,
    loan_amount_bits: Option<u64>,
    application_date: Option<NaiveDate>,
}

impl DedupKey {
    fn of(record: &LoanRecord) -> Self {
        Self {
            customer_id: record.customer_id.clone(),
            // +0.0 so that -0.0 and 0.0 share a key.
            loan_amount_bits: record.loan_amount.map(|v| (v + 0.0).to_bits()),
            application_date: record.application_date.as_ref().and_then(key_date),
        }
    }
}

fn key_date(value: &DateValue) -> Option<NaiveDate> {
    match value {
        DateValue::Date(d) => Some(*d),
        DateValue::Raw(raw) => parse_date(raw),
    }
}

/// Keep the first record for each dedup key, preserving load order.
pub fn deduplicate(table: LoanTable) -> StageOutput {
    let before = table.len();
    let mut seen = HashSet::with_capacity(before);

    let kept: LoanTable = table
        .into_iter()
        .filter(|record| seen.insert(DedupKey::of(record)))
        .collect();

    let removed = before - kept.len();
    log::info!("Removed {removed} duplicate records");
    StageOutput::new(kept, removed)
}
