//! Shared domain types.
//!
//! A `LoanRecord` is one row of the loan table with every field typed and
//! absence modeled as `None`. The four derived fields stay `None` until the
//! enrichment stage fills them.

use std::path::PathBuf;

use chrono::NaiveDate;

/// A date column value.
///
/// Dates arrive as raw text from the loader and are only parsed by the
/// format standardizer. Keeping the raw text around until then means the
/// dedup key compares exactly what was in the file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DateValue {
    Raw(String),
    Date(NaiveDate),
}

impl DateValue {
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            DateValue::Date(d) => Some(*d),
            DateValue::Raw(_) => None,
        }
    }
}

impl std::fmt::Display for DateValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateValue::Raw(s) => f.write_str(s),
            DateValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

/// Loan size bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoanCategory {
    Small,
    Medium,
    Large,
}

impl LoanCategory {
    pub fn label(self) -> &'static str {
        match self {
            LoanCategory::Small => "Small",
            LoanCategory::Medium => "Medium",
            LoanCategory::Large => "Large",
        }
    }
}

/// Credit score band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CreditBand {
    VeryPoor,
    Poor,
    Fair,
    Good,
    Excellent,
}

impl CreditBand {
    pub fn label(self) -> &'static str {
        match self {
            CreditBand::VeryPoor => "Very Poor",
            CreditBand::Poor => "Poor",
            CreditBand::Fair => "Fair",
            CreditBand::Good => "Good",
            CreditBand::Excellent => "Excellent",
        }
    }
}

/// `loan_amount` buckets as `(upper bound, label)`, left-open/right-closed,
/// starting above 0.
pub const LOAN_CATEGORY_BOUNDS: [(f64, LoanCategory); 3] = [
    (10_000.0, LoanCategory::Small),
    (25_000.0, LoanCategory::Medium),
    (f64::INFINITY, LoanCategory::Large),
];

/// `credit_score` bands as `(upper bound, label)`, left-open/right-closed,
/// starting above 0. Scores above 850 have no band.
pub const CREDIT_BAND_BOUNDS: [(f64, CreditBand); 5] = [
    (600.0, CreditBand::VeryPoor),
    (650.0, CreditBand::Poor),
    (700.0, CreditBand::Fair),
    (750.0, CreditBand::Good),
    (850.0, CreditBand::Excellent),
];

/// Look up the bucket for `value` in an ordered `(upper, label)` table whose
/// first interval starts (exclusively) at `lower`.
pub fn bucket<T: Copy>(value: f64, lower: f64, bounds: &[(f64, T)]) -> Option<T> {
    if !value.is_finite() || value <= lower {
        return None;
    }
    bounds
        .iter()
        .find(|(upper, _)| value <= *upper)
        .map(|(_, label)| *label)
}

/// Source columns in file order.
pub const SOURCE_COLUMNS: [&str; 14] = [
    "loan_id",
    "customer_id",
    "loan_amount",
    "interest_rate",
    "loan_term",
    "monthly_payment",
    "annual_income",
    "credit_score",
    "employment_length",
    "loan_status",
    "purpose",
    "application_date",
    "approval_date",
    "disbursement_date",
];

/// Columns appended by the enrichment stage.
pub const DERIVED_COLUMNS: [&str; 4] = ["loan_to_income", "total_interest", "loan_category", "credit_band"];

/// One loan application row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoanRecord {
    pub loan_id: Option<String>,
    pub customer_id: Option<String>,
    pub loan_amount: Option<f64>,
    pub interest_rate: Option<f64>,
    pub loan_term: Option<u32>,
    pub monthly_payment: Option<f64>,
    pub annual_income: Option<f64>,
    pub credit_score: Option<i32>,
    pub employment_length: Option<u32>,
    pub loan_status: Option<String>,
    pub purpose: Option<String>,
    pub application_date: Option<DateValue>,
    pub approval_date: Option<DateValue>,
    pub disbursement_date: Option<DateValue>,

    pub loan_to_income: Option<f64>,
    pub total_interest: Option<f64>,
    pub loan_category: Option<LoanCategory>,
    pub credit_band: Option<CreditBand>,
}

impl LoanRecord {
    /// True when any of `loan_id`, `customer_id`, `loan_amount`, `loan_status` is absent.
    pub fn missing_critical_field(&self) -> bool {
        self.loan_id.is_none()
            || self.customer_id.is_none()
            || self.loan_amount.is_none()
            || self.loan_status.is_none()
    }
}

/// The loan table in load order.
///
/// Stages take the table by value and hand back a new one, so there is never
/// more than one owner.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoanTable {
    records: Vec<LoanRecord>,
}

impl LoanTable {
    pub fn new(records: Vec<LoanRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[LoanRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LoanRecord> {
        self.records.iter()
    }
}

impl FromIterator<LoanRecord> for LoanTable {
    fn from_iter<I: IntoIterator<Item = LoanRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for LoanTable {
    type Item = LoanRecord;
    type IntoIter = std::vec::IntoIter<LoanRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a LoanTable {
    type Item = &'a LoanRecord;
    type IntoIter = std::slice::Iter<'a, LoanRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Resolved settings for one batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// Optional JSON export of the summary report.
    pub report_json: Option<PathBuf>,
}
