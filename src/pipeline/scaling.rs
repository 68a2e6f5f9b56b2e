use super::types::ScalingMethod;
use super::{Pipeline, require_numeric};
use crate::error::Result;
use polars::prelude::*;

/// Divisor that falls back to 1 when `spread` is zero, so a constant
/// column scales to all zeros instead of NaN.
fn safe_divisor(spread: Expr) -> Expr {
    when(spread.clone().eq(lit(0.0)))
        .then(lit(1.0))
        .otherwise(spread)
}

pub(crate) fn scale_expr(name: &str, method: ScalingMethod) -> Expr {
    let x = col(name).cast(DataType::Float64);
    match method {
        ScalingMethod::Standard => {
            let mean = x.clone().mean();
            let std = x.clone().std(0);
            (x - mean) / safe_divisor(std)
        }
        ScalingMethod::MinMax => {
            let min = x.clone().min();
            let max = x.clone().max();
            (x - min.clone()) / safe_divisor(max - min)
        }
    }
    .alias(name)
}

impl Pipeline {
    /// Rescales numeric columns in place.
    ///
    /// Statistics are fitted on each column's current values: standard
    /// scaling uses the population standard deviation, min-max maps onto
    /// [0, 1]. Constant columns become all zeros; nulls stay null.
    ///
    /// # Errors
    ///
    /// `ColumnNotFound` or `NonNumericColumn`; nothing is scaled on error.
    pub fn normalize(&mut self, columns: &[&str], method: ScalingMethod) -> Result<&mut Self> {
        let df = self.dataframe();
        let mut exprs = Vec::with_capacity(columns.len());
        for name in columns {
            let column = require_numeric(df, name)?;
            if column.as_materialized_series().drop_nulls().n_unique()? <= 1 {
                self.warn(&format!("Column '{name}' is constant; scaled to zeros"));
            }
            exprs.push(scale_expr(name, method));
        }

        let df = df.clone().lazy().with_columns(exprs).collect()?;
        let entry = format!("Applied {} scaling to {columns:?}", method.as_str());
        Ok(self.commit(df, entry))
    }
}
