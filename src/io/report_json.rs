//! JSON export of the summary report.
//!
//! The schema is `report::SummaryReport` as serialized by serde.

use std::path::Path;

use crate::error::AppError;
use crate::io::staged::StagedFile;
use crate::report::SummaryReport;

pub fn write_report_json(path: &Path, report: &SummaryReport) -> Result<(), AppError> {
    stage_report_json(path, report)?.commit()?;
    log::info!("Summary report saved to {}", path.display());
    Ok(())
}

/// Serialize the report to a temporary file beside `path`.
pub fn stage_report_json(path: &Path, report: &SummaryReport) -> Result<StagedFile, AppError> {
    StagedFile::create(path, |file| {
        serde_json::to_writer_pretty(file, report).map_err(|e| format!("cannot write report JSON: {e}"))
    })
}
