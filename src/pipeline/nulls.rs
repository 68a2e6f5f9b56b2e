use super::types::{FillValue, NullStrategy};
use super::{Pipeline, require_column};
use crate::error::{PrepError, Result};
use polars::prelude::*;

impl Pipeline {
    /// Removes or fills nulls in `columns` (every column when `None` or empty).
    ///
    /// Mean and median only apply to numeric columns: a non-numeric column
    /// named explicitly is an error, one reached through `None` is skipped.
    /// Mode fills with the most frequent non-null value, the smallest one on
    /// ties. Forward and backward fill leave leading/trailing nulls in place.
    ///
    /// # Errors
    ///
    /// - `MissingFillValue` for [`NullStrategy::Constant`] without `fill_value`
    /// - `ColumnNotFound` / `NonNumericColumn` for invalid targets
    pub fn handle_nulls(
        &mut self,
        strategy: NullStrategy,
        columns: Option<&[&str]>,
        fill_value: Option<FillValue>,
    ) -> Result<&mut Self> {
        let explicit = columns.is_some_and(|names| !names.is_empty());
        let targets = self.resolve_columns(columns)?;

        match strategy {
            NullStrategy::Drop => {
                let df = self.dataframe();
                let before = df.height();
                let mut mask = BooleanChunked::full("mask".into(), true, before);
                for name in &targets {
                    mask = &mask & &df.column(name)?.is_not_null();
                }
                let df = df.filter(&mask)?;
                let removed = before - df.height();
                Ok(self.commit(df, format!("Removed {removed} rows with null values")))
            }
            NullStrategy::Mean | NullStrategy::Median => {
                let mut exprs = Vec::new();
                let mut filled = Vec::new();
                for name in &targets {
                    let column = require_column(self.dataframe(), name)?;
                    if !column.dtype().is_primitive_numeric() {
                        if explicit {
                            return Err(PrepError::NonNumericColumn {
                                column: name.clone(),
                                dtype: column.dtype().to_string(),
                            });
                        }
                        self.warn(&format!(
                            "Skipping non-numeric column '{name}' for {} imputation",
                            strategy.as_str()
                        ));
                        continue;
                    }
                    let stat = if strategy == NullStrategy::Mean {
                        col(name.as_str()).mean()
                    } else {
                        col(name.as_str()).median()
                    };
                    exprs.push(col(name.as_str()).fill_null(stat).alias(name.as_str()));
                    filled.push(name.clone());
                }
                let df = fill_with(self.dataframe(), exprs)?;
                let entry = format!("Filled nulls with {} in {filled:?}", strategy.as_str());
                Ok(self.commit(df, entry))
            }
            NullStrategy::Mode => {
                let exprs = targets
                    .iter()
                    .map(|name| {
                        let mode = col(name.as_str())
                            .drop_nulls()
                            .mode()
                            .sort(SortOptions::default())
                            .first();
                        col(name.as_str()).fill_null(mode).alias(name.as_str())
                    })
                    .collect();
                let df = fill_with(self.dataframe(), exprs)?;
                Ok(self.commit(df, format!("Filled nulls with mode in {targets:?}")))
            }
            NullStrategy::Constant => {
                let value = fill_value.ok_or(PrepError::MissingFillValue)?;
                let exprs = targets
                    .iter()
                    .map(|name| {
                        col(name.as_str())
                            .fill_null(value.to_expr())
                            .alias(name.as_str())
                    })
                    .collect();
                let df = fill_with(self.dataframe(), exprs)?;
                let entry = format!("Filled nulls with constant '{value}' in {targets:?}");
                Ok(self.commit(df, entry))
            }
            NullStrategy::ForwardFill | NullStrategy::BackwardFill => {
                let forward = strategy == NullStrategy::ForwardFill;
                let mut df = self.dataframe().clone();
                for name in &targets {
                    let series = df
                        .column(name)?
                        .as_materialized_series()
                        .fill_null(directional_fill(forward))?;
                    df.with_column(series)?;
                }
                let entry = format!("Filled nulls with {} in {targets:?}", strategy.as_str());
                Ok(self.commit(df, entry))
            }
        }
    }
}

fn directional_fill(forward: bool) -> FillNullStrategy {
    if forward {
        FillNullStrategy::Forward(None)
    } else {
        FillNullStrategy::Backward(None)
    }
}

fn fill_with(df: &DataFrame, exprs: Vec<Expr>) -> Result<DataFrame> {
    if exprs.is_empty() {
        return Ok(df.clone());
    }
    Ok(df.clone().lazy().with_columns(exprs).collect()?)
}
