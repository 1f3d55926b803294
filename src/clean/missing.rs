//! Missing-value policy.
//!
//! 1. Drop records missing a critical field (`loan_id`, `customer_id`,
//!    `loan_amount`, `loan_status`).
//! 2. Fill absent `credit_score` with the median of the surviving scores.
//! 3. Fill absent `employment_length` with 0.
//!
//! No other field is touched.

use crate::domain::{LoanRecord, LoanTable};
use crate::math::median;

/// Result of the missing-value stage.
#[derive(Debug, Clone, PartialEq)]
pub struct MissingValueOutput {
    pub table: LoanTable,
    /// Records dropped for a missing critical field.
    pub dropped: usize,
    /// Fill value used for `credit_score`, if any record needed one and a
    /// median could be computed.
    pub credit_score_fill: Option<i32>,
    pub credit_scores_filled: usize,
    pub employment_lengths_filled: usize,
}

pub fn handle_missing_values(table: LoanTable) -> MissingValueOutput {
    let before = table.len();
    let mut records: Vec<LoanRecord> = table
        .into_iter()
        .filter(|r| !r.missing_critical_field())
        .collect();
    let dropped = before - records.len();
    log::info!("Removed {dropped} records with missing critical fields");

    let (credit_score_fill, credit_scores_filled) = fill_credit_scores(&mut records);

    let mut employment_lengths_filled = 0;
    for record in records.iter_mut().filter(|r| r.employment_length.is_none()) {
        record.employment_length = Some(0);
        employment_lengths_filled += 1;
    }
    if employment_lengths_filled > 0 {
        log::info!("Filled {employment_lengths_filled} missing employment lengths with 0");
    }

    MissingValueOutput {
        table: LoanTable::new(records),
        dropped,
        credit_score_fill,
        credit_scores_filled,
        employment_lengths_filled,
    }
}

fn fill_credit_scores(records: &mut [LoanRecord]) -> (Option<i32>, usize) {
    let missing = records.iter().filter(|r| r.credit_score.is_none()).count();
    if missing == 0 {
        return (None, 0);
    }

    let scores: Vec<f64> = records
        .iter()
        .filter_map(|r| r.credit_score)
        .map(f64::from)
        .collect();

    let Some(median_score) = median(&scores) else {
        log::warn!("All credit scores are missing; {missing} records left without a credit score");
        return (None, 0);
    };

    // Scores are integers, so the fill value is the median rounded half-to-even.
    let fill = median_score.round_ties_even() as i32;
    for record in records.iter_mut().filter(|r| r.credit_score.is_none()) {
        record.credit_score = Some(fill);
    }
    log::info!("Filled {missing} missing credit scores with median: {median_score}");
    (Some(fill), missing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clean::test_record;

    #[test]
    fn drops_records_missing_any_critical_field() {
        let ok = test_record("L1", "C1", 1000.0);
        let mut no_id = test_record("L2", "C2", 1000.0);
        no_id.loan_id = None;
        let mut no_customer = test_record("L3", "C3", 1000.0);
        no_customer.customer_id = None;
        let mut no_amount = test_record("L4", "C4", 1000.0);
        no_amount.loan_amount = None;
        let mut no_status = test_record("L5", "C5", 1000.0);
        no_status.loan_status = None;

        let out = handle_missing_values(LoanTable::new(vec![
            no_id,
            ok.clone(),
            no_customer,
            no_amount,
            no_status,
        ]));
        assert_eq!(out.dropped, 4);
        assert_eq!(out.table.records(), &[ok]);
        assert!(out.table.iter().all(|r| !r.missing_critical_field()));
    }

    #[test]
    fn fills_credit_score_with_median_of_survivors() {
        let mut a = test_record("L1", "C1", 1000.0);
        a.credit_score = Some(600);
        let mut b = test_record("L2", "C2", 1000.0);
        b.credit_score = Some(700);
        let mut c = test_record("L3", "C3", 1000.0);
        c.credit_score = Some(720);
        let mut gap = test_record("L4", "C4", 1000.0);
        gap.credit_score = None;
        // Dropped before the median is taken, so its score must not count.
        let mut dropped = test_record("L5", "C5", 1000.0);
        dropped.loan_status = None;
        dropped.credit_score = Some(300);

        let out = handle_missing_values(LoanTable::new(vec![a, b, c, gap, dropped]));
        assert_eq!(out.credit_score_fill, Some(700));
        assert_eq!(out.credit_scores_filled, 1);
        assert_eq!(out.table.records()[3].credit_score, Some(700));
    }

    #[test]
    fn even_count_median_rounds_half_to_even() {
        let mut a = test_record("L1", "C1", 1000.0);
        a.credit_score = Some(701);
        let mut b = test_record("L2", "C2", 1000.0);
        b.credit_score = Some(702);
        let mut gap = test_record("L3", "C3", 1000.0);
        gap.credit_score = None;

        let out = handle_missing_values(LoanTable::new(vec![a, b, gap]));
        assert_eq!(out.credit_score_fill, Some(702));
    }

    #[test]
    fn all_scores_missing_skips_fill() {
        let mut a = test_record("L1", "C1", 1000.0);
        a.credit_score = None;

        let out = handle_missing_values(LoanTable::new(vec![a]));
        assert_eq!(out.credit_score_fill, None);
        assert_eq!(out.credit_scores_filled, 0);
        assert_eq!(out.table.records()[0].credit_score, None);
    }

    #[test]
    fn fills_employment_length_with_zero_and_leaves_other_fields() {
        let mut a = test_record("L1", "C1", 1000.0);
        a.employment_length = None;
        a.monthly_payment = None;
        a.purpose = None;

        let out = handle_missing_values(LoanTable::new(vec![a]));
        let r = &out.table.records()[0];
        assert_eq!(out.employment_lengths_filled, 1);
        assert_eq!(r.employment_length, Some(0));
        assert_eq!(r.monthly_payment, None);
        assert_eq!(r.purpose, None);
    }
}
