//! The cleaning stages, in execution order:
//!
//! dedup -> missing values -> format standardization -> range validation -> enrichment
//!
//! Each stage takes the table by value and returns the next table plus how
//! many records it touched. `clean_table` chains them.

pub mod dedup;
pub mod enrich;
pub mod missing;
pub mod standardize;
pub mod validate;

pub use dedup::*;
pub use enrich::*;
pub use missing::*;
pub use standardize::*;
pub use validate::*;

use crate::domain::LoanTable;
use crate::report::CleaningSummary;

/// A stage result: the next table and the number of records affected.
#[derive(Debug, Clone, PartialEq)]
pub struct StageOutput {
    pub table: LoanTable,
    pub affected: usize,
}

impl StageOutput {
    pub fn new(table: LoanTable, affected: usize) -> Self {
        Self { table, affected }
    }
}

/// Cleaned table plus per-stage counts.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanOutput {
    pub table: LoanTable,
    pub summary: CleaningSummary,
}

/// Run all five stages over a raw table.
pub fn clean_table(table: LoanTable) -> CleanOutput {
    let input_records = table.len();

    let deduped = deduplicate(table);
    let missing = handle_missing_values(deduped.table);
    let standardized = standardize_formats(missing.table);
    let validated = validate_ranges(standardized.table);
    let enriched = add_calculated_fields(validated.table);

    let summary = CleaningSummary {
        input_records,
        duplicates_removed: deduped.affected,
        critical_missing_removed: missing.dropped,
        credit_score_fill: missing.credit_score_fill,
        credit_scores_filled: missing.credit_scores_filled,
        employment_lengths_filled: missing.employment_lengths_filled,
        records_standardized: standardized.affected,
        out_of_range_removed: validated.affected,
        records_enriched: enriched.affected,
        derived_fields: DERIVED_FIELD_COUNT,
        output_records: enriched.table.len(),
    };

    CleanOutput {
        table: enriched.table,
        summary,
    }
}

/// A fully populated, in-range record with a raw application date.
#[cfg(test)]
pub(crate) fn test_record(loan_id: &str, customer_id: &str, loan_amount: f64) -> crate::domain::LoanRecord {
    use crate::domain::{DateValue, LoanRecord};

    LoanRecord {
        loan_id: Some(loan_id.to_string()),
        customer_id: Some(customer_id.to_string()),
        loan_amount: Some(loan_amount),
        interest_rate: Some(10.5),
        loan_term: Some(36),
        monthly_payment: Some(300.0),
        annual_income: Some(60_000.0),
        credit_score: Some(700),
        employment_length: Some(5),
        loan_status: Some("Current".to_string()),
        purpose: Some("car".to_string()),
        application_date: Some(DateValue::Raw("2024-01-15".to_string())),
        approval_date: Some(DateValue::Raw("2024-01-20".to_string())),
        disbursement_date: Some(DateValue::Raw("2024-01-25".to_string())),
        ..LoanRecord::default()
    }
}
