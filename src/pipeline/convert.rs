use super::types::TargetType;
use super::{Pipeline, require_column};
use crate::error::{PrepError, Result};
use polars::prelude::*;

/// Text accepted when converting strings to booleans.
fn parse_bool(text: &str) -> Option<bool> {
    match text.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

fn strings_to_bool(series: &Series) -> std::result::Result<Series, String> {
    let ca = series.str().map_err(|e| e.to_string())?;
    let mut values = Vec::with_capacity(ca.len());
    for text in ca {
        match text {
            None => values.push(None),
            Some(text) => match parse_bool(text) {
                Some(b) => values.push(Some(b)),
                None => return Err(format!("'{text}' is not a boolean")),
            },
        }
    }
    Ok(Series::new(series.name().clone(), values))
}

/// First non-null value with a fractional part (NaN and infinities included).
fn first_non_integral(series: &Series) -> std::result::Result<Option<f64>, String> {
    let values = series
        .cast(&DataType::Float64)
        .map_err(|e| e.to_string())?;
    let ca = values.f64().map_err(|e| e.to_string())?;
    Ok(ca.into_iter().flatten().find(|v| v.fract() != 0.0))
}

/// Casts `series`, failing if any non-null value is not representable.
/// Floats only convert to integers when every value is whole.
fn convert_series(series: &Series, target: TargetType) -> std::result::Result<Series, String> {
    if target == TargetType::Boolean && series.dtype() == &DataType::String {
        return strings_to_bool(series);
    }
    if target.is_integer()
        && series.dtype().is_float()
        && let Some(value) = first_non_integral(series)?
    {
        return Err(format!("{value} is not a whole number"));
    }
    series
        .strict_cast(&target.dtype())
        .map_err(|e| e.to_string())
}

impl Pipeline {
    /// Converts each `(column, type)` pair in order.
    ///
    /// # Errors
    ///
    /// `ColumnNotFound`, or `TypeConversionFailure` naming the first column
    /// that could not be converted. No column is converted on error.
    pub fn convert_types<I, S>(&mut self, mapping: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (S, TargetType)>,
        S: Into<String>,
    {
        let mapping: Vec<(String, TargetType)> = mapping
            .into_iter()
            .map(|(name, target)| (name.into(), target))
            .collect();

        let mut df = self.dataframe().clone();
        for (name, target) in &mapping {
            let series = require_column(&df, name)?.as_materialized_series();
            let converted = convert_series(series, *target).map_err(|reason| {
                PrepError::TypeConversionFailure {
                    column: name.clone(),
                    target: target.to_string(),
                    reason,
                }
            })?;
            df.with_column(converted)?;
        }

        let described = mapping
            .iter()
            .map(|(name, target)| format!("{name}: {target}"))
            .collect::<Vec<_>>()
            .join(", ");
        Ok(self.commit(df, format!("Converted column types: {{{described}}}")))
    }
}
