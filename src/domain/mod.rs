//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the typed loan row (`LoanRecord`) and table (`LoanTable`)
//! - date values that are either raw text or parsed (`DateValue`)
//! - derived categoricals and their bucket tables (`LoanCategory`, `CreditBand`)
//! - run configuration (`CleanConfig`)

pub mod types;

pub use types::*;
