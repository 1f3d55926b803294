//! `loan-clean` library crate.
//!
//! The binary (`loan-clean`) is a thin wrapper around this library so that:
//!
//! - each cleaning stage is testable without spawning processes
//! - the stages can be reused on tables that did not come from a CSV file

pub mod app;
pub mod clean;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod report;
