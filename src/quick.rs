//! One-call preprocessing for callers that need neither the log nor chaining.

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::pipeline::{KeepStrategy, NullStrategy, Pipeline, ScalingMethod};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuickOptions {
    pub drop_nulls: bool,
    pub drop_duplicates: bool,
    /// Standard-scale `normalize_columns`; ignored when that list is empty
    pub normalize: bool,
    pub normalize_columns: Vec<String>,
}

impl Default for QuickOptions {
    fn default() -> Self {
        Self {
            drop_nulls: true,
            drop_duplicates: true,
            normalize: false,
            normalize_columns: Vec::new(),
        }
    }
}

/// Drops null rows, drops duplicates, optionally standard-scales, and
/// returns the resulting table.
pub fn preprocess_dataset(df: &DataFrame, options: &QuickOptions) -> Result<DataFrame> {
    preprocess_with_config(df, options, PipelineConfig::default())
}

pub fn preprocess_with_config(
    df: &DataFrame,
    options: &QuickOptions,
    config: PipelineConfig,
) -> Result<DataFrame> {
    let mut pipeline = Pipeline::with_config(df, config);

    if options.drop_nulls {
        pipeline.handle_nulls(NullStrategy::Drop, None, None)?;
    }

    if options.drop_duplicates {
        pipeline.drop_duplicates(None, KeepStrategy::First)?;
    }

    if options.normalize && !options.normalize_columns.is_empty() {
        let columns: Vec<&str> = options
            .normalize_columns
            .iter()
            .map(String::as_str)
            .collect();
        pipeline.normalize(&columns, ScalingMethod::Standard)?;
    }

    Ok(pipeline.into_dataframe())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn test_default_options_drop_nulls_and_duplicates() -> anyhow::Result<()> {
        let df = df!(
            "a" => [Some(1), Some(1), None, Some(2)],
            "b" => ["x", "x", "y", "z"],
        )?;
        let out = preprocess_dataset(&df, &QuickOptions::default())?;
        assert_eq!(out.height(), 2);
        Ok(())
    }

    #[test]
    fn test_normalize_requires_columns() -> anyhow::Result<()> {
        let df = df!("a" => [1.0, 2.0, 3.0])?;
        let options = QuickOptions {
            normalize: true,
            ..QuickOptions::default()
        };
        let out = preprocess_dataset(&df, &options)?;
        assert!(out.equals(&df));

        let options = QuickOptions {
            normalize: true,
            normalize_columns: vec!["a".to_owned()],
            ..QuickOptions::default()
        };
        let out = preprocess_dataset(&df, &options)?;
        let scaled = out.column("a")?.as_materialized_series().f64()?.clone();
        assert!(scaled.mean().expect("non-empty").abs() < 1e-12);
        Ok(())
    }
}
