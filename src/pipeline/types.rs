use crate::error::PrepError;
use polars::prelude::{DataType, Expr, lit};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// How `handle_nulls` treats missing values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullStrategy {
    /// Remove every row holding a null in a target column
    #[default]
    #[serde(alias = "eliminar")]
    Drop,
    #[serde(alias = "media")]
    Mean,
    #[serde(alias = "mediana")]
    Median,
    #[serde(alias = "moda")]
    Mode,
    /// Fill with a caller supplied value
    #[serde(alias = "constante")]
    Constant,
    #[serde(rename = "ffill", alias = "forward_fill")]
    ForwardFill,
    #[serde(rename = "bfill", alias = "backward_fill")]
    BackwardFill,
}

impl NullStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Drop => "drop",
            Self::Mean => "mean",
            Self::Median => "median",
            Self::Mode => "mode",
            Self::Constant => "constant",
            Self::ForwardFill => "forward fill",
            Self::BackwardFill => "backward fill",
        }
    }
}

impl FromStr for NullStrategy {
    type Err = PrepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "eliminar" | "drop" => Ok(Self::Drop),
            "media" | "mean" => Ok(Self::Mean),
            "mediana" | "median" => Ok(Self::Median),
            "moda" | "mode" => Ok(Self::Mode),
            "constante" | "constant" => Ok(Self::Constant),
            "ffill" | "forward_fill" => Ok(Self::ForwardFill),
            "bfill" | "backward_fill" => Ok(Self::BackwardFill),
            other => Err(PrepError::UnknownStrategy {
                kind: "null strategy",
                value: other.to_owned(),
            }),
        }
    }
}

/// Which copy of a duplicated row survives `drop_duplicates`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeepStrategy {
    #[default]
    First,
    Last,
    /// Drop every copy
    None,
}

impl FromStr for KeepStrategy {
    type Err = PrepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "first" => Ok(Self::First),
            "last" => Ok(Self::Last),
            "none" | "false" => Ok(Self::None),
            other => Err(PrepError::UnknownStrategy {
                kind: "keep strategy",
                value: other.to_owned(),
            }),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalingMethod {
    /// Zero mean, unit variance
    #[default]
    #[serde(alias = "zscore")]
    Standard,
    /// Rescale into [0, 1]
    #[serde(alias = "minmax")]
    MinMax,
}

impl ScalingMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::MinMax => "min-max",
        }
    }
}

impl FromStr for ScalingMethod {
    type Err = PrepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" | "zscore" => Ok(Self::Standard),
            "minmax" | "min_max" => Ok(Self::MinMax),
            other => Err(PrepError::UnknownStrategy {
                kind: "scaling method",
                value: other.to_owned(),
            }),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncodingMethod {
    #[default]
    Label,
    #[serde(alias = "onehot", alias = "one-hot")]
    OneHot,
}

impl EncodingMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Label => "label",
            Self::OneHot => "one-hot",
        }
    }
}

impl FromStr for EncodingMethod {
    type Err = PrepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "label" => Ok(Self::Label),
            "onehot" | "one_hot" | "one-hot" => Ok(Self::OneHot),
            other => Err(PrepError::UnknownStrategy {
                kind: "encoding method",
                value: other.to_owned(),
            }),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutlierMethod {
    /// Tukey fences at 1.5 IQR
    #[default]
    Iqr,
    /// Three standard deviations from the mean
    #[serde(alias = "z_score", alias = "z-score")]
    Zscore,
}

impl OutlierMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Iqr => "iqr",
            Self::Zscore => "zscore",
        }
    }
}

impl FromStr for OutlierMethod {
    type Err = PrepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "iqr" => Ok(Self::Iqr),
            "zscore" | "z_score" | "z-score" => Ok(Self::Zscore),
            other => Err(PrepError::UnknownStrategy {
                kind: "outlier method",
                value: other.to_owned(),
            }),
        }
    }
}

/// Target of a `convert_types` cast.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    #[serde(alias = "int", alias = "i64")]
    Int64,
    #[serde(alias = "i32")]
    Int32,
    #[serde(alias = "float", alias = "f64")]
    Float64,
    #[serde(alias = "f32")]
    Float32,
    #[serde(alias = "str")]
    String,
    #[serde(alias = "bool")]
    Boolean,
    Date,
}

impl TargetType {
    pub fn dtype(&self) -> DataType {
        match self {
            Self::Int64 => DataType::Int64,
            Self::Int32 => DataType::Int32,
            Self::Float64 => DataType::Float64,
            Self::Float32 => DataType::Float32,
            Self::String => DataType::String,
            Self::Boolean => DataType::Boolean,
            Self::Date => DataType::Date,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Int64 | Self::Int32)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Int64 => "int64",
            Self::Int32 => "int32",
            Self::Float64 => "float64",
            Self::Float32 => "float32",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Date => "date",
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetType {
    type Err = PrepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "int64" | "int" | "i64" => Ok(Self::Int64),
            "int32" | "i32" => Ok(Self::Int32),
            "float64" | "float" | "f64" => Ok(Self::Float64),
            "float32" | "f32" => Ok(Self::Float32),
            "string" | "str" => Ok(Self::String),
            "boolean" | "bool" => Ok(Self::Boolean),
            "date" => Ok(Self::Date),
            other => Err(PrepError::UnknownStrategy {
                kind: "target type",
                value: other.to_owned(),
            }),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    #[default]
    Csv,
    #[serde(alias = "xlsx")]
    Excel,
    Json,
}

impl ExportFormat {
    /// Picks the format from a file extension (`csv`, `xlsx`, `json`).
    pub fn from_path(path: &Path) -> Result<Self, PrepError> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase();
        ext.parse()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Excel => "excel",
            Self::Json => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = PrepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "excel" | "xlsx" => Ok(Self::Excel),
            "json" => Ok(Self::Json),
            other => Err(PrepError::UnknownFormat(other.to_owned())),
        }
    }
}

/// Value used by the constant null strategy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FillValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl FillValue {
    pub fn to_expr(&self) -> Expr {
        match self {
            Self::Bool(b) => lit(*b),
            Self::Int(i) => lit(*i),
            Self::Float(x) => lit(*x),
            Self::Text(s) => lit(s.as_str()),
        }
    }
}

impl fmt::Display for FillValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for FillValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for FillValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for FillValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for FillValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for FillValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub dtype: String,
    pub null_count: usize,
}

/// Structural overview returned by `Pipeline::info`.
#[derive(Clone, Debug, Serialize)]
pub struct DatasetInfo {
    pub shape: (usize, usize),
    pub columns: Vec<ColumnInfo>,
    pub duplicate_rows: usize,
    pub memory_mb: f64,
}

impl DatasetInfo {
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NullReport {
    pub column: String,
    pub null_count: usize,
    pub null_percentage: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OutlierReport {
    pub column: String,
    pub outlier_count: usize,
    pub percentage: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TransformSummary {
    pub original_shape: (usize, usize),
    pub final_shape: (usize, usize),
    pub rows_removed: i64,
    pub columns_added: i64,
    pub transformations: Vec<String>,
}

/// Rounds a percentage to two decimals.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        round2(part as f64 / total as f64 * 100.0)
    }
}
