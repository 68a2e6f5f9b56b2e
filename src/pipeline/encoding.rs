use super::types::EncodingMethod;
use super::{Pipeline, require_column};
use crate::error::{PrepError, Result};
use polars::prelude::*;

/// Category used for nulls when label encoding.
pub const NULL_LABEL: &str = "null";

fn stringified(name: &str) -> Expr {
    col(name).cast(DataType::String)
}

/// Dense rank of the stringified values, starting at 0.
fn label_expr(name: &str) -> Expr {
    let rank = stringified(name)
        .fill_null(lit(NULL_LABEL))
        .rank(
            RankOptions {
                method: RankMethod::Dense,
                descending: false,
            },
            None,
        )
        .cast(DataType::Int64);
    (rank - lit(1i64)).alias(name)
}

/// Sorted distinct non-null values of a column, as strings.
fn categories(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let values = require_column(df, name)?
        .as_materialized_series()
        .cast(&DataType::String)?
        .drop_nulls()
        .unique()?
        .sort(SortOptions::default())?;
    Ok(values
        .str()?
        .into_no_null_iter()
        .map(str::to_owned)
        .collect())
}

impl Pipeline {
    /// Encodes categorical columns.
    ///
    /// - [`EncodingMethod::Label`] replaces each column with `Int64` codes
    ///   assigned in sorted order of the stringified values; nulls are the
    ///   category `"null"`.
    /// - [`EncodingMethod::OneHot`] replaces each column with one Boolean
    ///   column per distinct value, named `{column}_{value}` and appended
    ///   after the remaining columns. A null row has no `true` indicator.
    pub fn encode_categoricals(
        &mut self,
        columns: &[&str],
        method: EncodingMethod,
    ) -> Result<&mut Self> {
        let df = self.dataframe();
        for name in columns {
            require_column(df, name)?;
        }

        let df = match method {
            EncodingMethod::Label => {
                let exprs: Vec<Expr> = columns.iter().map(|name| label_expr(name)).collect();
                df.clone().lazy().with_columns(exprs).collect()?
            }
            EncodingMethod::OneHot => {
                let mut exprs = Vec::new();
                for name in columns {
                    for value in categories(df, name)? {
                        let dummy = format!("{name}_{value}");
                        if df.get_column_index(&dummy).is_some() {
                            return Err(PrepError::InvalidArgument(format!(
                                "One-hot column '{dummy}' already exists"
                            )));
                        }
                        exprs.push(
                            stringified(name)
                                .eq(lit(value.as_str()))
                                .fill_null(lit(false))
                                .alias(dummy.as_str()),
                        );
                    }
                }
                let mut encoded = df.clone().lazy().with_columns(exprs).collect()?;
                for name in columns {
                    encoded = encoded.drop(name)?;
                }
                encoded
            }
        };

        let entry = format!("Applied {} encoding to {columns:?}", method.as_str());
        Ok(self.commit(df, entry))
    }
}
