//! Input/output boundaries.
//!
//! - CSV ingest into a raw `LoanTable` (`ingest`)
//! - cleaned-table CSV export (`export`)
//! - summary report JSON export (`report_json`)
//! - temp-file staging shared by both exports (`staged`)

pub mod export;
pub mod ingest;
pub mod report_json;
pub mod staged;

pub use export::*;
pub use ingest::*;
pub use report_json::*;
pub use staged::StagedFile;
