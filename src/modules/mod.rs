//! Feature modules driven by commands
//!
//! Modules:
//! - export: write loaded data to CSV, JSON or HTML files

pub mod export;
