//! Writing the current table to disk.
//!
//! - CSV: header row, no index column (polars `CsvWriter`)
//! - JSON: array of row objects with 2-space indentation
//! - Excel: one worksheet, header row, typed cells (`rust_xlsxwriter`)

use super::Pipeline;
use super::types::ExportFormat;
use crate::error::{PrepError, Result, ResultExt as _};
use polars::prelude::*;
use rust_xlsxwriter::Workbook;
use std::path::Path;

/// Row limit of an xlsx worksheet, header included.
const EXCEL_MAX_ROWS: usize = 1_048_576;

pub fn write_csv(df: &DataFrame, path: &Path) -> Result<()> {
    let mut df = df.clone();
    let file = std::fs::File::create(path).context("Failed to create CSV file")?;
    CsvWriter::new(file)
        .include_header(true)
        .finish(&mut df)
        .context("Failed to write CSV file")
}

pub fn write_json(df: &DataFrame, path: &Path) -> Result<()> {
    let mut df = df.clone();
    let mut buf = Vec::new();
    JsonWriter::new(&mut buf)
        .with_json_format(JsonFormat::Json)
        .finish(&mut df)
        .context("Failed to serialize rows to JSON")?;

    let records: serde_json::Value = serde_json::from_slice(&buf)?;
    let file = std::fs::File::create(path).context("Failed to create JSON file")?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), &records)?;
    Ok(())
}

pub fn write_excel(df: &DataFrame, path: &Path) -> Result<()> {
    if df.height() >= EXCEL_MAX_ROWS {
        return Err(PrepError::InvalidArgument(format!(
            "{} rows exceed the worksheet limit of {}",
            df.height(),
            EXCEL_MAX_ROWS - 1
        )));
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col_idx, column) in df.get_columns().iter().enumerate() {
        let col_idx = u16::try_from(col_idx).map_err(|_| {
            PrepError::InvalidArgument("Too many columns for a worksheet".to_owned())
        })?;
        worksheet.write_string(0, col_idx, column.name().as_str())?;

        let series = column.as_materialized_series();
        for row_idx in 0..series.len() {
            // Header occupies row 0; the height check above keeps this in range.
            let row = (row_idx + 1) as u32;
            match series.get(row_idx)? {
                AnyValue::Null => {}
                AnyValue::Boolean(b) => {
                    worksheet.write_boolean(row, col_idx, b)?;
                }
                AnyValue::String(s) => {
                    worksheet.write_string(row, col_idx, s)?;
                }
                AnyValue::StringOwned(s) => {
                    worksheet.write_string(row, col_idx, s.as_str())?;
                }
                value if value.dtype().is_primitive_numeric() => {
                    let number = value.extract::<f64>().ok_or_else(|| {
                        PrepError::DataProcessing(format!("Cannot write {value} as a number"))
                    })?;
                    worksheet.write_number(row, col_idx, number)?;
                }
                value => {
                    worksheet.write_string(row, col_idx, value.to_string())?;
                }
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

impl Pipeline {
    /// Writes the current table to `path` and records the destination.
    pub fn save(&mut self, path: impl AsRef<Path>, format: ExportFormat) -> Result<&mut Self> {
        let path = path.as_ref();
        let df = self.dataframe();
        match format {
            ExportFormat::Csv => write_csv(df, path)?,
            ExportFormat::Excel => write_excel(df, path)?,
            ExportFormat::Json => write_json(df, path)?,
        }
        Ok(self.record(format!("Dataset saved to {}", path.display())))
    }
}
