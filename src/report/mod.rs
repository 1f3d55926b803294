//! Read-only reports over a loan table.
//!
//! - `DataQualityReport`: raw-table profile taken before cleaning
//! - `CleaningSummary`: what each stage did
//! - `SummaryReport`: aggregate statistics over the cleaned table
//!
//! Computation lives here; text rendering lives in `format`.

use std::collections::{HashMap, HashSet};
use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{LoanTable, SOURCE_COLUMNS};
use crate::io::export::source_cells;
use crate::math::{mean, median};

pub mod format;

pub use format::*;

/// One value of a categorical column and how often it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
}

/// Aggregate statistics over the cleaned table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    pub total_records: usize,
    pub unique_customers: usize,
    pub first_application_date: Option<NaiveDate>,
    pub last_application_date: Option<NaiveDate>,
    pub mean_loan_amount: Option<f64>,
    pub median_loan_amount: Option<f64>,
    pub mean_interest_rate: Option<f64>,
    /// Rounded to the nearest integer.
    pub mean_credit_score: Option<i64>,
    pub status_distribution: Vec<CategoryCount>,
    pub purpose_distribution: Vec<CategoryCount>,
}

/// Missing-value and duplicate profile of the raw table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataQualityReport {
    pub total_records: usize,
    pub total_columns: usize,
    /// `(column, missing count)` in file column order.
    pub missing_values: Vec<(String, usize)>,
    /// Records identical to an earlier record in every source column.
    pub duplicate_records: usize,
    /// Cells the loader could not read as their column's type. Filled in by
    /// the caller that loaded the table.
    pub unparseable_cells: usize,
}

/// Per-stage counts for one cleaning run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleaningSummary {
    pub input_records: usize,
    pub duplicates_removed: usize,
    pub critical_missing_removed: usize,
    pub credit_score_fill: Option<i32>,
    pub credit_scores_filled: usize,
    pub employment_lengths_filled: usize,
    pub records_standardized: usize,
    pub out_of_range_removed: usize,
    pub records_enriched: usize,
    pub derived_fields: usize,
    pub output_records: usize,
}

pub fn summarize(table: &LoanTable) -> SummaryReport {
    let unique_customers = table
        .iter()
        .filter_map(|r| r.customer_id.as_deref())
        .collect::<HashSet<_>>()
        .len();

    let dates: Vec<NaiveDate> = table
        .iter()
        .filter_map(|r| r.application_date.as_ref().and_then(|d| d.as_date()))
        .collect();

    let amounts: Vec<f64> = table.iter().filter_map(|r| r.loan_amount).collect();
    let rates: Vec<f64> = table.iter().filter_map(|r| r.interest_rate).collect();
    let scores: Vec<f64> = table.iter().filter_map(|r| r.credit_score).map(f64::from).collect();

    SummaryReport {
        total_records: table.len(),
        unique_customers,
        first_application_date: dates.iter().min().copied(),
        last_application_date: dates.iter().max().copied(),
        mean_loan_amount: mean(&amounts),
        median_loan_amount: median(&amounts),
        mean_interest_rate: mean(&rates),
        mean_credit_score: mean(&scores).map(|m| m.round_ties_even() as i64),
        status_distribution: value_counts(table.iter().filter_map(|r| r.loan_status.as_deref())),
        purpose_distribution: value_counts(table.iter().filter_map(|r| r.purpose.as_deref())),
    }
}

/// Profile the raw table before any stage has run.
pub fn profile_quality(table: &LoanTable) -> DataQualityReport {
    let mut missing = [0usize; SOURCE_COLUMNS.len()];
    let mut seen = HashSet::with_capacity(table.len());
    let mut duplicate_records = 0;

    for record in table {
        let cells = source_cells(record);
        for (count, cell) in missing.iter_mut().zip(&cells) {
            if cell.is_empty() {
                *count += 1;
            }
        }
        if !seen.insert(cells) {
            duplicate_records += 1;
        }
    }

    DataQualityReport {
        total_records: table.len(),
        total_columns: SOURCE_COLUMNS.len(),
        missing_values: SOURCE_COLUMNS
            .iter()
            .zip(missing)
            .map(|(name, count)| ((*name).to_string(), count))
            .collect(),
        duplicate_records,
        unparseable_cells: 0,
    }
}

/// Compute the summary of `table` and render it to `out`.
pub fn write_summary<W: Write>(table: &LoanTable, out: &mut W) -> std::io::Result<()> {
    let report = summarize(table);
    write!(out, "{}", format_summary_report(&report))
}

/// Most frequent first; ties by value so output is deterministic.
fn value_counts<'a>(values: impl Iterator<Item = &'a str>) -> Vec<CategoryCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for v in values {
        *counts.entry(v).or_default() += 1;
    }
    let mut out: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(value, count)| CategoryCount {
            value: value.to_string(),
            count,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    out
}
