//! Domain range filter.
//!
//! A record survives only when all of these hold:
//! - `loan_amount > 0`
//! - `0 <= interest_rate <= 50`
//! - `300 <= credit_score <= 850`
//! - `annual_income > 0`
//!
//! An absent value fails its predicate.

use crate::clean::StageOutput;
use crate::domain::{LoanRecord, LoanTable};

pub const INTEREST_RATE_RANGE: (f64, f64) = (0.0, 50.0);
pub const CREDIT_SCORE_RANGE: (i32, i32) = (300, 850);

/// Drop every record failing any range predicate. `affected` is the net
/// number of records removed.
pub fn validate_ranges(table: LoanTable) -> StageOutput {
    let before = table.len();
    let kept: LoanTable = table.into_iter().filter(in_valid_range).collect();

    let removed = before - kept.len();
    log::info!("Removed {removed} records with invalid data ranges");
    StageOutput::new(kept, removed)
}

pub fn in_valid_range(record: &LoanRecord) -> bool {
    let (rate_min, rate_max) = INTEREST_RATE_RANGE;
    let (score_min, score_max) = CREDIT_SCORE_RANGE;

    let amount_ok = record.loan_amount.is_some_and(|v| v > 0.0);
    let rate_ok = record
        .interest_rate
        .is_some_and(|v| (rate_min..=rate_max).contains(&v));
    let score_ok = record
        .credit_score
        .is_some_and(|v| (score_min..=score_max).contains(&v));
    let income_ok = record.annual_income.is_some_and(|v| v > 0.0);

    if !(amount_ok && rate_ok && score_ok && income_ok) {
        log::debug!(
            "Out of range: loan_id={:?} amount_ok={amount_ok} rate_ok={rate_ok} score_ok={score_ok} income_ok={income_ok}",
            record.loan_id
        );
        return false;
    }
    true
}
