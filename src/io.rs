//! Loading input tables for the CLI.

use crate::error::{PrepError, Result, ResultExt as _};
use polars::prelude::*;
use std::path::Path;

/// Reads a CSV (header row expected) or a JSON array of records.
pub fn load_df(path: &Path) -> Result<DataFrame> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();

    let df = match ext.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .with_has_header(true)
            .finish()
            .context("Failed to scan CSV")?
            .collect()
            .context("Failed to read CSV")?,
        "json" => JsonReader::new(std::fs::File::open(path)?)
            .finish()
            .context("Failed to read JSON")?,
        _ => {
            return Err(PrepError::InvalidArgument(format!(
                "Unsupported file extension: {ext}"
            )));
        }
    };

    tracing::info!(
        rows = df.height(),
        columns = df.width(),
        "Loaded {}",
        path.display()
    );
    Ok(df)
}
