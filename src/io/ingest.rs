//! CSV ingest into a typed `LoanTable`.
//!
//! Design goals:
//! - **Strict schema**: every source column must be present in the header
//! - **Cell-level leniency**: a bad numeric cell becomes absent and is reported,
//!   the run continues
//! - **No cleaning here**: dates stay raw text, categoricals stay as written

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{DateValue, LoanRecord, LoanTable, SOURCE_COLUMNS};
use crate::error::AppError;

/// A cell that could not be read as its column's type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellIssue {
    pub line: usize,
    pub column: &'static str,
    pub value: String,
}

/// Loaded table plus what was coerced on the way in.
#[derive(Debug, Clone)]
pub struct IngestedTable {
    pub table: LoanTable,
    pub cell_issues: Vec<CellIssue>,
}

/// Load the raw loan table from a CSV file.
pub fn load_loan_table(path: &Path) -> Result<IngestedTable, AppError> {
    let file = File::open(path).map_err(|e| AppError::load(path, format!("cannot open CSV: {e}")))?;
    let ingested = read_loan_table(file).map_err(|reason| AppError::load(path, reason))?;

    log::info!(
        "Loaded {} records with {} columns from {}",
        ingested.table.len(),
        SOURCE_COLUMNS.len(),
        path.display()
    );
    if !ingested.cell_issues.is_empty() {
        log::warn!(
            "{} cells could not be parsed and were treated as missing",
            ingested.cell_issues.len()
        );
    }
    Ok(ingested)
}

/// Parse CSV from any reader. Errors are schema or structure failures.
pub fn read_loan_table<R: std::io::Read>(reader: R) -> Result<IngestedTable, String> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| format!("cannot read CSV headers: {e}"))?
        .clone();
    let header_map = build_header_map(&headers);
    ensure_required_columns_exist(&header_map)?;

    let mut records = Vec::new();
    let mut cell_issues = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        // Data starts on line 2, after the header.
        let line = idx + 2;
        let record = result.map_err(|e| format!("malformed row at line {line}: {e}"))?;
        let mut row = RowReader {
            record: &record,
            header_map: &header_map,
            line,
            issues: &mut cell_issues,
        };
        records.push(row.parse());
    }

    for issue in &cell_issues {
        log::warn!(
            "line {}: invalid `{}` value '{}' treated as missing",
            issue.line,
            issue.column,
            issue.value
        );
    }

    Ok(IngestedTable {
        table: LoanTable::new(records),
        cell_issues,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn ensure_required_columns_exist(header_map: &HashMap<String, usize>) -> Result<(), String> {
    let missing: Vec<&str> = SOURCE_COLUMNS
        .iter()
        .copied()
        .filter(|name| !header_map.contains_key(*name))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(format!("missing required columns: {}", missing.join(", ")))
    }
}

struct RowReader<'a> {
    record: &'a StringRecord,
    header_map: &'a HashMap<String, usize>,
    line: usize,
    issues: &'a mut Vec<CellIssue>,
}

impl<'a> RowReader<'a> {
    fn parse(&mut self) -> LoanRecord {
        LoanRecord {
            loan_id: self.text("loan_id"),
            customer_id: self.text("customer_id"),
            loan_amount: self.decimal("loan_amount"),
            interest_rate: self.decimal("interest_rate"),
            loan_term: self.count("loan_term"),
            monthly_payment: self.decimal("monthly_payment"),
            annual_income: self.decimal("annual_income"),
            credit_score: self.integer("credit_score"),
            employment_length: self.count("employment_length"),
            loan_status: self.text("loan_status"),
            purpose: self.text("purpose"),
            application_date: self.date("application_date"),
            approval_date: self.date("approval_date"),
            disbursement_date: self.date("disbursement_date"),
            ..LoanRecord::default()
        }
    }

    /// Trimmed, non-empty cell.
    fn cell(&self, column: &str) -> Option<&'a str> {
        self.raw_cell(column).map(str::trim).filter(|s| !s.is_empty())
    }

    fn raw_cell(&self, column: &str) -> Option<&'a str> {
        let record: &'a StringRecord = self.record;
        let idx = self.header_map.get(column)?;
        record.get(*idx)
    }

    /// Text keeps its surrounding whitespace; normalizing it is the
    /// standardizer's job. Whitespace-only counts as absent.
    fn text(&self, column: &str) -> Option<String> {
        self.cell(column)?;
        self.raw_cell(column).map(str::to_string)
    }

    fn date(&self, column: &str) -> Option<DateValue> {
        self.cell(column).map(|s| DateValue::Raw(s.to_string()))
    }

    fn decimal(&mut self, column: &'static str) -> Option<f64> {
        let raw = self.cell(column)?;
        match parse_decimal(raw) {
            Some(v) => Some(v),
            None => {
                self.flag(column, raw.to_string());
                None
            }
        }
    }

    fn integer(&mut self, column: &'static str) -> Option<i32> {
        let raw = self.cell(column)?;
        match parse_integer(raw) {
            Some(v) => Some(v),
            None => {
                self.flag(column, raw.to_string());
                None
            }
        }
    }

    fn count(&mut self, column: &'static str) -> Option<u32> {
        let raw = self.cell(column)?;
        match parse_integer(raw).and_then(|v| u32::try_from(v).ok()) {
            Some(v) => Some(v),
            None => {
                self.flag(column, raw.to_string());
                None
            }
        }
    }

    fn flag(&mut self, column: &'static str, value: String) {
        self.issues.push(CellIssue {
            line: self.line,
            column,
            value,
        });
    }
}

fn parse_decimal(s: &str) -> Option<f64> {
    let v = s.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

/// Integers may be written as integral decimals (`720.0`).
fn parse_integer(s: &str) -> Option<i32> {
    if let Ok(v) = s.parse::<i32>() {
        return Some(v);
    }
    let v = parse_decimal(s)?;
    if v.fract() != 0.0 || v < f64::from(i32::MIN) || v > f64::from(i32::MAX) {
        return None;
    }
    Some(v as i32)
}
