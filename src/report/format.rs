//! Text rendering for the reports.
//!
//! We keep formatting code in one place so the stages stay free of
//! presentation concerns and output changes are localized.

use crate::report::{CategoryCount, CleaningSummary, DataQualityReport, SummaryReport};

const BANNER_WIDTH: usize = 60;

pub fn format_banner(title: &str) -> String {
    let rule = "=".repeat(BANNER_WIDTH);
    format!("{rule}\n{title}\n{rule}\n")
}

pub fn format_quality_report(report: &DataQualityReport) -> String {
    let mut out = String::new();

    out.push_str("=== Data Quality Report ===\n");
    out.push_str(&format!("Total Records: {}\n", report.total_records));
    out.push_str(&format!("Total Columns: {}\n", report.total_columns));

    out.push_str("\nMissing Values:\n");
    let width = label_width(report.missing_values.iter().map(|(name, _)| name.as_str()));
    for (name, count) in &report.missing_values {
        out.push_str(&format!("{name:<width$} {count:>8}\n"));
    }

    out.push_str(&format!("\nDuplicate Records: {}\n", report.duplicate_records));
    if report.unparseable_cells > 0 {
        out.push_str(&format!("Unparseable Cells: {}\n", report.unparseable_cells));
    }
    out
}

pub fn format_cleaning_summary(summary: &CleaningSummary) -> String {
    let mut out = String::new();

    out.push_str("=== Cleaning Steps ===\n");
    out.push_str(&format!("Input records: {}\n", summary.input_records));
    out.push_str(&format!("Removed {} duplicate records\n", summary.duplicates_removed));
    out.push_str(&format!(
        "Removed {} records with missing critical fields\n",
        summary.critical_missing_removed
    ));
    if let Some(fill) = summary.credit_score_fill {
        out.push_str(&format!(
            "Filled {} missing credit scores with median: {fill}\n",
            summary.credit_scores_filled
        ));
    }
    if summary.employment_lengths_filled > 0 {
        out.push_str(&format!(
            "Filled {} missing employment lengths with 0\n",
            summary.employment_lengths_filled
        ));
    }
    out.push_str(&format!("Standardized formats on {} records\n", summary.records_standardized));
    out.push_str(&format!(
        "Removed {} records with invalid data ranges\n",
        summary.out_of_range_removed
    ));
    out.push_str(&format!(
        "Added {} calculated fields to {} records\n",
        summary.derived_fields, summary.records_enriched
    ));
    out.push_str(&format!("Output records: {}\n", summary.output_records));
    out
}

pub fn format_summary_report(report: &SummaryReport) -> String {
    let mut out = String::new();

    out.push_str("=== Summary Statistics ===\n");
    out.push_str(&format!("Total Records: {}\n", report.total_records));
    out.push_str(&format!("Unique Customers: {}\n", report.unique_customers));
    out.push_str(&format!(
        "Date Range: {} to {}\n",
        fmt_opt(report.first_application_date),
        fmt_opt(report.last_application_date),
    ));
    out.push_str(&format!(
        "Average Loan Amount: {}\n",
        fmt_money(report.mean_loan_amount)
    ));
    out.push_str(&format!(
        "Median Loan Amount: {}\n",
        fmt_money(report.median_loan_amount)
    ));
    out.push_str(&format!(
        "Average Interest Rate: {}\n",
        report
            .mean_interest_rate
            .map(|v| format!("{v:.2}%"))
            .unwrap_or_else(|| "n/a".to_string())
    ));
    out.push_str(&format!(
        "Average Credit Score: {}\n",
        fmt_opt(report.mean_credit_score)
    ));

    out.push_str("\nLoan Status Distribution:\n");
    out.push_str(&format_distribution(&report.status_distribution));

    out.push_str("\nLoan Purpose Distribution:\n");
    out.push_str(&format_distribution(&report.purpose_distribution));

    out
}

fn format_distribution(rows: &[CategoryCount]) -> String {
    if rows.is_empty() {
        return "(none)\n".to_string();
    }
    let width = label_width(rows.iter().map(|r| r.value.as_str()));
    let mut out = String::new();
    for row in rows {
        out.push_str(&format!("{:<width$} {:>8}\n", row.value, row.count));
    }
    out
}

fn label_width<'a>(labels: impl Iterator<Item = &'a str>) -> usize {
    labels.map(|l| l.chars().count()).max().unwrap_or(0)
}

fn fmt_money(v: Option<f64>) -> String {
    v.map(|v| format!("${v:.2}")).unwrap_or_else(|| "n/a".to_string())
}

fn fmt_opt<T: std::fmt::Display>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_else(|| "n/a".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn summary_renders_statistics_and_distributions() {
        let report = SummaryReport {
            total_records: 3,
            unique_customers: 2,
            first_application_date: NaiveDate::from_ymd_opt(2024, 1, 10),
            last_application_date: NaiveDate::from_ymd_opt(2024, 3, 5),
            mean_loan_amount: Some(30_000.0),
            median_loan_amount: Some(20_000.0),
            mean_interest_rate: Some(11.166_666),
            mean_credit_score: Some(707),
            status_distribution: vec![CategoryCount {
                value: "Current".to_string(),
                count: 3,
            }],
            purpose_distribution: vec![],
        };

        let text = format_summary_report(&report);
        assert!(text.contains("Date Range: 2024-01-10 to 2024-03-05\n"));
        assert!(text.contains("Average Loan Amount: $30000.00\n"));
        assert!(text.contains("Average Interest Rate: 11.17%\n"));
        assert!(text.contains("Average Credit Score: 707\n"));
        assert!(text.contains("Current        3\n"));
        assert!(text.ends_with("Loan Purpose Distribution:\n(none)\n"));
    }

    #[test]
    fn missing_statistics_render_as_na() {
        let report = SummaryReport {
            total_records: 0,
            unique_customers: 0,
            first_application_date: None,
            last_application_date: None,
            mean_loan_amount: None,
            median_loan_amount: None,
            mean_interest_rate: None,
            mean_credit_score: None,
            status_distribution: vec![],
            purpose_distribution: vec![],
        };
        let text = format_summary_report(&report);
        assert!(text.contains("Date Range: n/a to n/a\n"));
        assert!(text.contains("Median Loan Amount: n/a\n"));
    }

    #[test]
    fn cleaning_summary_mentions_fill_only_when_used() {
        let summary = CleaningSummary {
            input_records: 5,
            duplicates_removed: 1,
            output_records: 3,
            derived_fields: 4,
            records_enriched: 3,
            ..CleaningSummary::default()
        };
        let text = format_cleaning_summary(&summary);
        assert!(text.contains("Removed 1 duplicate records\n"));
        assert!(text.contains("Added 4 calculated fields to 3 records\n"));
        assert!(!text.contains("median"));
    }

    #[test]
    fn quality_report_lists_unparseable_cells_when_present() {
        let mut report = DataQualityReport {
            total_records: 2,
            total_columns: 14,
            missing_values: vec![("loan_id".to_string(), 0), ("credit_score".to_string(), 1)],
            duplicate_records: 0,
            unparseable_cells: 0,
        };
        let text = format_quality_report(&report);
        assert!(text.contains("credit_score        1\n"));
        assert!(!text.contains("Unparseable"));

        report.unparseable_cells = 3;
        assert!(format_quality_report(&report).ends_with("Unparseable Cells: 3\n"));
    }
}
