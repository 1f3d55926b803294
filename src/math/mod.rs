//! Numeric helpers shared by the cleaning stages and the reporter.

pub mod stats;

pub use stats::*;
