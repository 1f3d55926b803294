//! Write the cleaned table to CSV.
//!
//! Columns are the source columns followed by the derived ones. The file is
//! written next to its destination and renamed into place, so a failed run
//! never leaves a half-written output behind.

use std::io::Write;
use std::path::Path;

use crate::domain::{LoanRecord, LoanTable, DERIVED_COLUMNS, SOURCE_COLUMNS};
use crate::error::AppError;
use crate::io::staged::StagedFile;

/// Write the table as CSV at `path`.
pub fn write_loan_table(path: &Path, table: &LoanTable) -> Result<(), AppError> {
    stage_loan_table(path, table)?.commit()?;
    log::info!("Cleaned data saved to {} ({} records)", path.display(), table.len());
    Ok(())
}

/// Write the table to a temporary file beside `path`; nothing is visible at
/// `path` until the returned file is committed.
pub fn stage_loan_table(path: &Path, table: &LoanTable) -> Result<StagedFile, AppError> {
    StagedFile::create(path, |file| write_loan_csv(file, table))
}

/// Serialize the table as CSV into any writer.
pub fn write_loan_csv<W: Write>(writer: W, table: &LoanTable) -> Result<(), String> {
    let mut csv = csv::Writer::from_writer(writer);

    csv.write_record(SOURCE_COLUMNS.iter().chain(DERIVED_COLUMNS.iter()))
        .map_err(|e| format!("cannot write CSV header: {e}"))?;

    for record in table {
        let mut row = source_cells(record);
        row.extend(derived_cells(record));
        csv.write_record(&row)
            .map_err(|e| format!("cannot write CSV row: {e}"))?;
    }

    csv.flush().map_err(|e| format!("cannot flush CSV: {e}"))
}

/// Cells for the source columns in `SOURCE_COLUMNS` order; absent is empty.
pub fn source_cells(record: &LoanRecord) -> Vec<String> {
    vec![
        opt(record.loan_id.as_ref()),
        opt(record.customer_id.as_ref()),
        opt(record.loan_amount),
        opt(record.interest_rate),
        opt(record.loan_term),
        opt(record.monthly_payment),
        opt(record.annual_income),
        opt(record.credit_score),
        opt(record.employment_length),
        opt(record.loan_status.as_ref()),
        opt(record.purpose.as_ref()),
        opt(record.application_date.as_ref()),
        opt(record.approval_date.as_ref()),
        opt(record.disbursement_date.as_ref()),
    ]
}

fn derived_cells(record: &LoanRecord) -> [String; 4] {
    [
        record.loan_to_income.map(|v| format!("{v:.4}")).unwrap_or_default(),
        record.total_interest.map(|v| format!("{v:.2}")).unwrap_or_default(),
        opt(record.loan_category.map(|c| c.label())),
        opt(record.credit_band.map(|b| b.label())),
    ]
}

fn opt<T: std::fmt::Display>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}
