use super::types::OutlierMethod;
use super::{Pipeline, numeric_values};
use crate::error::Result;
use polars::prelude::*;

const IQR_FACTOR: f64 = 1.5;
const ZSCORE_THRESHOLD: f64 = 3.0;

/// Closed interval of non-outlier values for one column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutlierBounds {
    pub lower: f64,
    pub upper: f64,
}

impl OutlierBounds {
    /// Bounds for `values`, ignoring nulls.
    ///
    /// Returns `None` when no bounds exist: an all-null column, or a z-score
    /// column whose standard deviation is zero or undefined.
    pub fn compute(values: &Float64Chunked, method: OutlierMethod) -> Result<Option<Self>> {
        let bounds = match method {
            OutlierMethod::Iqr => {
                let q1 = values.quantile(0.25, QuantileMethod::Linear)?;
                let q3 = values.quantile(0.75, QuantileMethod::Linear)?;
                match (q1, q3) {
                    (Some(q1), Some(q3)) => {
                        let iqr = q3 - q1;
                        Some(Self {
                            lower: q1 - IQR_FACTOR * iqr,
                            upper: q3 + IQR_FACTOR * iqr,
                        })
                    }
                    _ => None,
                }
            }
            // |x - mean| / std > 3  <=>  x outside mean +/- 3 std
            OutlierMethod::Zscore => match (values.mean(), values.std(1)) {
                (Some(mean), Some(std)) if std.is_finite() && std > 0.0 => Some(Self {
                    lower: mean - ZSCORE_THRESHOLD * std,
                    upper: mean + ZSCORE_THRESHOLD * std,
                }),
                _ => None,
            },
        };
        Ok(bounds)
    }

    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower || value > self.upper
    }

    pub fn contains(&self, value: f64) -> bool {
        !self.is_outlier(value)
    }
}

impl Pipeline {
    /// Drops rows outside each column's outlier bounds.
    ///
    /// Columns are processed in order and each column's bounds are computed
    /// on the rows that survived the previous columns, so the order of
    /// `columns` matters. A null in a target column never lies within the
    /// bounds and its row is removed.
    ///
    /// # Errors
    ///
    /// `ColumnNotFound` or `NonNumericColumn`; the table is unchanged on error.
    pub fn remove_outliers(
        &mut self,
        columns: &[&str],
        method: OutlierMethod,
    ) -> Result<&mut Self> {
        let before = self.dataframe().height();
        let mut df = self.dataframe().clone();

        for name in columns {
            let values = numeric_values(&df, name)?;
            let keep = match OutlierBounds::compute(&values, method)? {
                Some(bounds) => col(*name)
                    .gt_eq(lit(bounds.lower))
                    .and(col(*name).lt_eq(lit(bounds.upper))),
                None => {
                    if values.null_count() < values.len() {
                        self.warn(&format!(
                            "Column '{name}' has no spread; only null rows are removed"
                        ));
                    }
                    col(*name).is_not_null()
                }
            };
            df = df.lazy().filter(keep).collect()?;
        }

        let removed = before - df.height();
        let entry = format!(
            "Removed {removed} outliers using the {} method in {columns:?}",
            method.as_str()
        );
        Ok(self.commit(df, entry))
    }
}
