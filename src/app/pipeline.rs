//! The batch run workflow, independent of how results are presented:
//!
//! load -> quality profile -> clean (5 stages) -> summary -> write
//!
//! Outputs are staged next to their destinations and only moved into place
//! once every output has been written, so a failed run leaves no output.

use std::fs;

use crate::clean::clean_table;
use crate::domain::{CleanConfig, LoanTable};
use crate::error::AppError;
use crate::io::export::stage_loan_table;
use crate::io::ingest::load_loan_table;
use crate::io::report_json::stage_report_json;
use crate::report::{profile_quality, summarize, CleaningSummary, DataQualityReport, SummaryReport};

/// The raw table as loaded, with its quality profile.
#[derive(Debug, Clone)]
pub struct LoadedInput {
    pub table: LoanTable,
    pub quality: DataQualityReport,
}

/// What cleaning produced.
#[derive(Debug, Clone)]
pub struct CleanedOutput {
    pub cleaning: CleaningSummary,
    pub summary: SummaryReport,
    pub table: LoanTable,
}

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub quality: DataQualityReport,
    pub cleaning: CleaningSummary,
    pub summary: SummaryReport,
    pub table: LoanTable,
}

/// Load, clean, and persist. Reports are returned for the caller to render.
pub fn run_clean(config: &CleanConfig) -> Result<RunOutput, AppError> {
    let loaded = load_input(config)?;
    let quality = loaded.quality;
    let cleaned = clean_and_write(config, loaded.table)?;

    Ok(RunOutput {
        quality,
        cleaning: cleaned.cleaning,
        summary: cleaned.summary,
        table: cleaned.table,
    })
}

/// Load the input table and profile it before anything is cleaned.
pub fn load_input(config: &CleanConfig) -> Result<LoadedInput, AppError> {
    let ingested = load_loan_table(&config.input_path)?;
    let mut quality = profile_quality(&ingested.table);
    quality.unparseable_cells = ingested.cell_issues.len();

    Ok(LoadedInput {
        table: ingested.table,
        quality,
    })
}

/// Clean `raw`, then write the cleaned CSV and the optional JSON summary.
pub fn clean_and_write(config: &CleanConfig, raw: LoanTable) -> Result<CleanedOutput, AppError> {
    let output = clean(raw);
    write_outputs(config, &output)?;
    Ok(output)
}

/// The in-memory part of a run, for callers that already hold a table.
pub fn clean(raw: LoanTable) -> CleanedOutput {
    let cleaned = clean_table(raw);
    let summary = summarize(&cleaned.table);

    CleanedOutput {
        cleaning: cleaned.summary,
        summary,
        table: cleaned.table,
    }
}

fn write_outputs(config: &CleanConfig, output: &CleanedOutput) -> Result<(), AppError> {
    let csv = stage_loan_table(&config.output_path, &output.table)?;
    let json = config
        .report_json
        .as_deref()
        .map(|path| stage_report_json(path, &output.summary))
        .transpose()?;

    csv.commit()?;
    log::info!(
        "Cleaned data saved to {} ({} records)",
        config.output_path.display(),
        output.table.len()
    );

    if let Some(json) = json {
        let path = json.dest().to_path_buf();
        if let Err(err) = json.commit() {
            let _ = fs::remove_file(&config.output_path);
            return Err(err);
        }
        log::info!("Summary report saved to {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clean::test_record;

    #[test]
    fn clean_summarizes_cleaned_table() {
        let a = test_record("L1", "C1", 1000.0);
        let raw = LoanTable::new(vec![a.clone(), a]);

        let out = clean(raw);
        assert_eq!(out.cleaning.input_records, 2);
        assert_eq!(out.cleaning.duplicates_removed, 1);
        assert_eq!(out.summary.total_records, 1);
        assert_eq!(out.table.len(), 1);
    }

    #[test]
    fn load_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = CleanConfig {
            input_path: dir.path().join("missing.csv"),
            output_path: dir.path().join("out.csv"),
            report_json: None,
        };
        let err = run_clean(&config).unwrap_err();
        assert!(matches!(err, AppError::Load { .. }));
        assert!(!config.output_path.exists());
    }

    #[test]
    fn load_input_profiles_raw_table_and_counts_bad_cells() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.csv");
        fs::write(
            &input,
            "loan_id,customer_id,loan_amount,interest_rate,loan_term,monthly_payment,annual_income,credit_score,employment_length,loan_status,purpose,application_date,approval_date,disbursement_date\n\
             L1,C1,1000,abc,36,30,50000,700,2,Current,car,2024-01-15,,\n\
             L1,C1,1000,abc,36,30,50000,700,2,Current,car,2024-01-15,,\n",
        )
        .unwrap();
        let config = CleanConfig {
            input_path: input,
            output_path: dir.path().join("out.csv"),
            report_json: None,
        };

        let loaded = load_input(&config).unwrap();
        assert_eq!(loaded.quality.total_records, 2);
        assert_eq!(loaded.quality.duplicate_records, 1);
        assert_eq!(loaded.quality.unparseable_cells, 2);
        assert!(!config.output_path.exists());
    }

    #[test]
    fn failed_json_export_leaves_no_csv() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the JSON's parent directory should be.
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();
        let config = CleanConfig {
            input_path: dir.path().join("unused.csv"),
            output_path: dir.path().join("out.csv"),
            report_json: Some(blocker.join("summary.json")),
        };

        let raw = LoanTable::new(vec![test_record("L1", "C1", 1000.0)]);
        let err = clean_and_write(&config, raw).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(!config.output_path.exists());
        assert!(!crate::io::staged::temp_path(&config.output_path).exists());
    }

    #[test]
    fn both_outputs_are_written_on_success() {
        let dir = tempfile::tempdir().unwrap();
        let config = CleanConfig {
            input_path: dir.path().join("unused.csv"),
            output_path: dir.path().join("out.csv"),
            report_json: Some(dir.path().join("reports").join("summary.json")),
        };

        let raw = LoanTable::new(vec![test_record("L1", "C1", 1000.0)]);
        let out = clean_and_write(&config, raw).unwrap();
        assert_eq!(out.table.len(), 1);
        assert!(config.output_path.exists());
        assert!(config.report_json.as_ref().unwrap().exists());
    }
}
