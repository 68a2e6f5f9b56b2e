use super::outliers::OutlierBounds;
use super::types::{ColumnInfo, DatasetInfo, NullReport, OutlierMethod, OutlierReport, percentage};
use super::{Pipeline, numeric_values};
use crate::error::Result;
use polars::prelude::UniqueKeepStrategy;

impl Pipeline {
    /// Shape, per-column dtype and null count, duplicate rows and memory footprint.
    pub fn info(&self) -> Result<DatasetInfo> {
        let df = self.dataframe();
        let columns = df
            .get_columns()
            .iter()
            .map(|c| ColumnInfo {
                name: c.name().to_string(),
                dtype: c.dtype().to_string(),
                null_count: c.null_count(),
            })
            .collect();

        let duplicate_rows = if df.width() == 0 {
            0
        } else {
            df.height() - df.unique_stable(None, UniqueKeepStrategy::First, None)?.height()
        };

        Ok(DatasetInfo {
            shape: df.shape(),
            columns,
            duplicate_rows,
            memory_mb: df.estimated_size() as f64 / (1024.0 * 1024.0),
        })
    }

    /// Columns with at least one null, worst first.
    pub fn detect_nulls(&self) -> Vec<NullReport> {
        let df = self.dataframe();
        let rows = df.height();
        let mut reports: Vec<NullReport> = df
            .get_columns()
            .iter()
            .filter(|c| c.null_count() > 0)
            .map(|c| NullReport {
                column: c.name().to_string(),
                null_count: c.null_count(),
                null_percentage: percentage(c.null_count(), rows),
            })
            .collect();

        reports.sort_by(|a, b| b.null_percentage.total_cmp(&a.null_percentage));
        reports
    }

    /// Counts values outside the outlier bounds of each column.
    ///
    /// # Errors
    ///
    /// `ColumnNotFound` or `NonNumericColumn` for an invalid column.
    pub fn detect_outliers(
        &self,
        columns: &[&str],
        method: OutlierMethod,
    ) -> Result<Vec<OutlierReport>> {
        let df = self.dataframe();
        let mut reports = Vec::with_capacity(columns.len());

        for name in columns {
            let values = numeric_values(df, name)?;
            let outlier_count = match OutlierBounds::compute(&values, method)? {
                Some(bounds) => values
                    .into_iter()
                    .flatten()
                    .filter(|v| bounds.is_outlier(*v))
                    .count(),
                None => 0,
            };

            reports.push(OutlierReport {
                column: (*name).to_owned(),
                outlier_count,
                percentage: percentage(outlier_count, df.height()),
            });
        }

        Ok(reports)
    }
}
