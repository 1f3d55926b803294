//! Command-line parsing for the loan cleaning batch.
//!
//! Every flag is optional: a bare `loan-clean` runs against the configured
//! default locations.

use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI.
#[derive(Debug, Parser, Clone, Default)]
#[command(name = "loan-clean", version, about = "Loan application data cleaning pipeline")]
pub struct Cli {
    /// Raw loan CSV (overrides LOAN_CLEAN_INPUT).
    #[arg(long, value_name = "CSV")]
    pub input: Option<PathBuf>,

    /// Destination for the cleaned CSV (overrides LOAN_CLEAN_OUTPUT).
    #[arg(long, value_name = "CSV")]
    pub output: Option<PathBuf>,

    /// Also write the summary report as JSON (overrides LOAN_CLEAN_REPORT_JSON).
    #[arg(long = "report-json", value_name = "JSON")]
    pub report_json: Option<PathBuf>,
}
