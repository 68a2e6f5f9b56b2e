//! # tabprep - Tabular Data Cleaning Pipeline
//!
//! tabprep cleans in-memory tables ([`polars`] `DataFrame`s): it handles
//! missing values, removes duplicates and outliers, scales numeric columns,
//! encodes categoricals, coerces types, and keeps a human-readable log of
//! every step.
//!
//! ## Quick Start
//!
//! ```no_run
//! use polars::prelude::*;
//! use tabprep::pipeline::{NullStrategy, OutlierMethod, Pipeline, ScalingMethod};
//!
//! # fn main() -> tabprep::error::Result<()> {
//! let df = df!(
//!     "edad" => [Some(25.0), Some(30.0), None, Some(35.0)],
//!     "salario" => [50_000.0, 60_000.0, 55_000.0, 1_000_000.0],
//! )?;
//!
//! let mut pipeline = Pipeline::new(&df);
//! pipeline
//!     .handle_nulls(NullStrategy::Median, None, None)?
//!     .remove_outliers(&["salario"], OutlierMethod::Iqr)?
//!     .normalize(&["edad", "salario"], ScalingMethod::MinMax)?;
//!
//! for entry in pipeline.log() {
//!     println!("{entry}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! When only the final table matters, [`quick::preprocess_dataset`] runs the
//! default sequence (drop nulls, drop duplicates, optional scaling).
//!
//! ## Core Modules
//!
//! - [`pipeline`]: the [`pipeline::Pipeline`] and its operations
//! - [`plan`]: JSON cleaning plans applied to a pipeline
//! - [`quick`]: the one-call convenience function
//! - [`io`]: loading CSV / JSON input
//! - [`config`]: settings (warning suppression, logging)
//! - [`logging`]: `tracing` subscriber setup
//! - [`error`]: error types and handling utilities

#![warn(clippy::all, rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod io;
pub mod logging;
pub mod pipeline;
pub mod plan;
pub mod quick;

pub use pipeline::Pipeline;
