#![forbid(unsafe_code)]

//! Core model for simulating repeated transdermal patch applications.
//!
//! This crate provides:
//! - Simulation parameter and sample types
//! - The reference decay curve (bundled or loaded from disk)
//! - The superposition series generator
//! - Series statistics and export (CSV, JSON, table)
//! - Configuration and logging setup for front ends

pub mod types;
pub mod error;
pub mod curve;
pub mod generator;
pub mod summary;
pub mod export;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use curve::ReferenceCurve;
pub use generator::generate;
pub use summary::{summarize, summarize_from, SeriesSummary};
pub use export::{export_to_path, write_series, SeriesFormat};
pub use config::Config;
