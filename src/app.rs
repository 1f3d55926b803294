//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and initialises logging
//! - resolves input/output locations
//! - profiles the raw input and prints its quality report
//! - runs the cleaning pipeline and prints the cleaning and summary reports

use std::path::PathBuf;

use clap::Parser;

use crate::cli::Cli;
use crate::domain::CleanConfig;
use crate::error::AppError;

pub mod pipeline;

pub const DEFAULT_INPUT: &str = "data/loan_data.csv";
pub const DEFAULT_OUTPUT: &str = "data/loan_data_cleaned.csv";

pub const ENV_INPUT: &str = "LOAN_CLEAN_INPUT";
pub const ENV_OUTPUT: &str = "LOAN_CLEAN_OUTPUT";
pub const ENV_REPORT_JSON: &str = "LOAN_CLEAN_REPORT_JSON";

/// Entry point for the `loan-clean` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = config_from_args(&cli, |key| std::env::var(key).ok());

    println!("{}", crate::report::format_banner("LOAN DATA CLEANING"));
    log::info!(
        "Cleaning {} -> {}",
        config.input_path.display(),
        config.output_path.display()
    );

    let loaded = pipeline::load_input(&config)?;
    println!("{}", crate::report::format_quality_report(&loaded.quality));

    let run = pipeline::clean_and_write(&config, loaded.table)?;
    println!("{}", crate::report::format_cleaning_summary(&run.cleaning));

    let mut stdout = std::io::stdout().lock();
    crate::report::write_summary(&run.table, &mut stdout)
        .map_err(|e| AppError::write(std::path::Path::new("<stdout>"), e.to_string()))?;
    drop(stdout);

    println!("\nCleaned data saved to {}", config.output_path.display());
    println!("{}", crate::report::format_banner("DATA CLEANING COMPLETED SUCCESSFULLY"));
    Ok(())
}

/// Resolve run settings: CLI flag, then environment, then the fixed default.
pub fn config_from_args(cli: &Cli, env: impl Fn(&str) -> Option<String>) -> CleanConfig {
    let from_env = |key: &str| env(key).filter(|v| !v.trim().is_empty()).map(PathBuf::from);

    CleanConfig {
        input_path: cli
            .input
            .clone()
            .or_else(|| from_env(ENV_INPUT))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT)),
        output_path: cli
            .output
            .clone()
            .or_else(|| from_env(ENV_OUTPUT))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
        report_json: cli.report_json.clone().or_else(|| from_env(ENV_REPORT_JSON)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_flags_or_env() {
        let config = config_from_args(&Cli::default(), |_| None);
        assert_eq!(config.input_path, PathBuf::from(DEFAULT_INPUT));
        assert_eq!(config.output_path, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(config.report_json, None);
    }

    #[test]
    fn flags_override_env_and_env_overrides_defaults() {
        let cli = Cli {
            input: Some(PathBuf::from("flag.csv")),
            ..Cli::default()
        };
        let env = |key: &str| match key {
            ENV_INPUT => Some("env.csv".to_string()),
            ENV_OUTPUT => Some("env_out.csv".to_string()),
            ENV_REPORT_JSON => Some("  ".to_string()),
            _ => None,
        };

        let config = config_from_args(&cli, env);
        assert_eq!(config.input_path, PathBuf::from("flag.csv"));
        assert_eq!(config.output_path, PathBuf::from("env_out.csv"));
        assert_eq!(config.report_json, None);
    }
}
