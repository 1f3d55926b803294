//! Derived analytic fields.
//!
//! Runs after range validation, so `loan_amount`, `annual_income` and
//! `credit_score` are present and in range. `total_interest` stays absent when
//! `monthly_payment` or `loan_term` is absent, since those are never filled.

use crate::clean::StageOutput;
use crate::domain::{
    bucket, CreditBand, LoanCategory, LoanRecord, LoanTable, CREDIT_BAND_BOUNDS, LOAN_CATEGORY_BOUNDS,
};
use crate::math::round_dp;

/// Number of columns this stage adds.
pub const DERIVED_FIELD_COUNT: usize = 4;

pub fn add_calculated_fields(table: LoanTable) -> StageOutput {
    let records: LoanTable = table.into_iter().map(enrich_record).collect();
    let enriched = records.len();
    log::info!("Added {DERIVED_FIELD_COUNT} calculated fields to {enriched} records");
    StageOutput::new(records, enriched)
}

pub fn enrich_record(mut record: LoanRecord) -> LoanRecord {
    record.loan_to_income = loan_to_income(record.loan_amount, record.annual_income);
    record.total_interest = total_interest(record.monthly_payment, record.loan_term, record.loan_amount);
    record.loan_category = record.loan_amount.and_then(loan_category);
    record.credit_band = record.credit_score.and_then(credit_band);
    record
}

/// `loan_amount / annual_income`, 4 decimal places.
pub fn loan_to_income(loan_amount: Option<f64>, annual_income: Option<f64>) -> Option<f64> {
    let income = annual_income.filter(|v| *v != 0.0)?;
    Some(round_dp(loan_amount? / income, 4))
}

/// `monthly_payment * loan_term - loan_amount`, 2 decimal places. Negative
/// values are kept.
pub fn total_interest(monthly_payment: Option<f64>, loan_term: Option<u32>, loan_amount: Option<f64>) -> Option<f64> {
    let paid = monthly_payment? * f64::from(loan_term?);
    Some(round_dp(paid - loan_amount?, 2))
}

pub fn loan_category(loan_amount: f64) -> Option<LoanCategory> {
    bucket(loan_amount, 0.0, &LOAN_CATEGORY_BOUNDS)
}

pub fn credit_band(credit_score: i32) -> Option<CreditBand> {
    bucket(f64::from(credit_score), 0.0, &CREDIT_BAND_BOUNDS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clean::test_record;

    #[test]
    fn derived_arithmetic() {
        let mut r = test_record("L1", "C1", 12_000.0);
        r.annual_income = Some(60_000.0);
        r.monthly_payment = Some(500.0);
        r.loan_term = Some(36);

        let r = enrich_record(r);
        assert_eq!(r.loan_to_income, Some(0.2));
        assert_eq!(r.total_interest, Some(6000.0));
        assert_eq!(r.loan_category, Some(LoanCategory::Medium));
    }

    #[test]
    fn total_interest_may_be_negative() {
        assert_eq!(total_interest(Some(100.0), Some(12), Some(1500.0)), Some(-300.0));
        assert_eq!(total_interest(None, Some(12), Some(1500.0)), None);
        assert_eq!(total_interest(Some(100.0), None, Some(1500.0)), None);
    }

    #[test]
    fn loan_to_income_rounds_to_four_places() {
        assert_eq!(loan_to_income(Some(10_000.0), Some(30_000.0)), Some(0.3333));
    }

    #[test]
    fn bucketing_boundaries() {
        assert_eq!(loan_category(10_000.0), Some(LoanCategory::Small));
        assert_eq!(loan_category(10_000.01), Some(LoanCategory::Medium));
        assert_eq!(loan_category(25_000.01), Some(LoanCategory::Large));
        assert_eq!(credit_band(650), Some(CreditBand::Poor));
        assert_eq!(credit_band(651), Some(CreditBand::Fair));
        assert_eq!(credit_band(300), Some(CreditBand::VeryPoor));
        assert_eq!(credit_band(751), Some(CreditBand::Excellent));
    }

    #[test]
    fn every_record_gets_all_derived_fields() {
        let table = LoanTable::new(vec![
            test_record("L1", "C1", 500.0),
            test_record("L2", "C2", 30_000.0),
        ]);
        let out = add_calculated_fields(table);
        assert_eq!(out.affected, 2);
        for r in &out.table {
            assert!(r.loan_to_income.is_some());
            assert!(r.total_interest.is_some());
            assert!(r.loan_category.is_some());
            assert!(r.credit_band.is_some());
        }
    }
}
