//! The cleaning pipeline: one table, a log of what was done to it.
//!
//! A [`Pipeline`] copies the input [`DataFrame`] and applies transformations to
//! its own copy **in place**. Every transformation takes `&mut self` and returns
//! `Result<&mut Self>`, so steps chain with `?`:
//!
//! ```no_run
//! use polars::prelude::*;
//! use tabprep::pipeline::{EncodingMethod, KeepStrategy, NullStrategy, Pipeline};
//!
//! # fn main() -> tabprep::error::Result<()> {
//! let df = df!(
//!     "edad" => [Some(25.0), None, Some(35.0)],
//!     "ciudad" => ["Quito", "Cuenca", "Quito"],
//! )?;
//!
//! let mut pipeline = Pipeline::new(&df);
//! pipeline
//!     .handle_nulls(NullStrategy::Mean, None, None)?
//!     .drop_duplicates(None, KeepStrategy::First)?
//!     .encode_categoricals(&["ciudad"], EncodingMethod::Label)?;
//!
//! println!("{:#?}", pipeline.summary());
//! # Ok(())
//! # }
//! ```
//!
//! # Atomicity
//!
//! Each call works on a cheap clone of the current table (polars columns are
//! reference counted) and commits the new table together with exactly one log
//! entry. A call that fails leaves both the table and the log untouched.
//!
//! # Operations
//!
//! - **Inspection**: [`Pipeline::info`], [`Pipeline::detect_nulls`], [`Pipeline::detect_outliers`]
//! - **Missing values**: [`Pipeline::handle_nulls`]
//! - **Duplicates**: [`Pipeline::drop_duplicates`]
//! - **Scaling**: [`Pipeline::normalize`]
//! - **Encoding**: [`Pipeline::encode_categoricals`]
//! - **Outliers**: [`Pipeline::remove_outliers`]
//! - **Types**: [`Pipeline::convert_types`]
//! - **Export**: [`Pipeline::summary`], [`Pipeline::save`]

pub mod convert;
pub mod dedup;
pub mod encoding;
pub mod export;
pub mod inspect;
pub mod nulls;
pub mod outliers;
pub mod scaling;
pub mod types;

pub use outliers::OutlierBounds;
pub use types::{
    ColumnInfo, DatasetInfo, EncodingMethod, ExportFormat, FillValue, KeepStrategy,
    NullReport, NullStrategy, OutlierMethod, OutlierReport, ScalingMethod, TargetType,
    TransformSummary,
};

use crate::config::PipelineConfig;
use crate::error::{PrepError, Result};
use polars::prelude::*;

/// A table being cleaned, with the history of what was done to it.
///
/// Owns its copy of the input, so the caller's `DataFrame` is never modified.
/// The log holds one human-readable entry per successful call, oldest first.
pub struct Pipeline {
    df: DataFrame,
    original_shape: (usize, usize),
    log: Vec<String>,
    config: PipelineConfig,
}

impl Pipeline {
    /// Creates a pipeline over a copy of `df`.
    pub fn new(df: &DataFrame) -> Self {
        Self::with_config(df, PipelineConfig::default())
    }

    /// Creates a pipeline over a copy of `df` with explicit settings, e.g.
    /// `suppress_warnings` to downgrade skipped-column warnings to debug events.
    pub fn with_config(df: &DataFrame, config: PipelineConfig) -> Self {
        tracing::debug!(
            rows = df.height(),
            columns = df.width(),
            "Creating preprocessing pipeline"
        );
        Self {
            df: df.clone(),
            original_shape: df.shape(),
            log: Vec::new(),
            config,
        }
    }

    /// The current table. Reflects every transformation applied so far.
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    pub fn into_dataframe(self) -> DataFrame {
        self.df
    }

    pub fn original_shape(&self) -> (usize, usize) {
        self.original_shape
    }

    pub fn shape(&self) -> (usize, usize) {
        self.df.shape()
    }

    /// Transformation history, oldest first.
    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn summary(&self) -> TransformSummary {
        let (orig_rows, orig_cols) = self.original_shape;
        let (rows, cols) = self.df.shape();
        TransformSummary {
            original_shape: self.original_shape,
            final_shape: (rows, cols),
            rows_removed: orig_rows as i64 - rows as i64,
            columns_added: cols as i64 - orig_cols as i64,
            transformations: self.log.clone(),
        }
    }

    /// Replaces the table and records one log entry.
    fn commit(&mut self, df: DataFrame, entry: String) -> &mut Self {
        tracing::info!(rows = df.height(), columns = df.width(), "{entry}");
        self.df = df;
        self.log.push(entry);
        self
    }

    fn record(&mut self, entry: String) -> &mut Self {
        tracing::info!("{entry}");
        self.log.push(entry);
        self
    }

    fn warn(&self, message: &str) {
        if self.config.suppress_warnings {
            tracing::debug!("{message}");
        } else {
            tracing::warn!("{message}");
        }
    }

    /// Expands `None` or an empty list to every column and checks that named
    /// columns exist.
    fn resolve_columns(&self, columns: Option<&[&str]>) -> Result<Vec<String>> {
        match columns {
            Some(names) if !names.is_empty() => {
                for name in names {
                    require_column(&self.df, name)?;
                }
                Ok(names.iter().map(|name| (*name).to_owned()).collect())
            }
            _ => Ok(column_names(&self.df)),
        }
    }
}

pub(crate) fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect()
}

pub(crate) fn require_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name)
        .map_err(|_| PrepError::ColumnNotFound(name.to_owned()))
}

pub(crate) fn require_numeric<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    let column = require_column(df, name)?;
    if column.dtype().is_primitive_numeric() {
        Ok(column)
    } else {
        Err(PrepError::NonNumericColumn {
            column: name.to_owned(),
            dtype: column.dtype().to_string(),
        })
    }
}

/// Numeric column values as Float64, nulls preserved.
pub(crate) fn numeric_values(df: &DataFrame, name: &str) -> Result<Float64Chunked> {
    let column = require_numeric(df, name)?;
    let series = column
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    Ok(series.f64()?.clone())
}

#[cfg(test)]
mod tests;
