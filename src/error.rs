//! Error handling for the tabprep pipeline.
//!
//! Every fallible operation in the library returns [`Result<T>`], whose error
//! type is the [`PrepError`] enum. Variants are split by what the caller did
//! wrong (unknown strategy, missing column, bad cast) versus what failed
//! underneath (I/O, polars, serialization):
//!
//! ```
//! use tabprep::error::PrepError;
//!
//! fn explain(err: &PrepError) -> &'static str {
//!     match err {
//!         PrepError::ColumnNotFound(_) => "check the column name",
//!         PrepError::NonNumericColumn { .. } => "convert the column first",
//!         PrepError::Io(_) => "check the path",
//!         _ => "see the message",
//!     }
//! }
//! ```
//!
//! ## Conversions
//!
//! `From` is implemented for the error types of the crates we sit on, so `?`
//! works directly on polars, `std::io`, `serde_json` and `rust_xlsxwriter`
//! results.
//!
//! ## Context
//!
//! [`ResultExt`] adds `.context()` / `.with_context()` to any result whose
//! error converts into [`PrepError`]:
//!
//! ```no_run
//! use tabprep::error::ResultExt as _;
//!
//! fn read_plan() -> tabprep::error::Result<String> {
//!     std::fs::read_to_string("plan.json").context("Failed to read plan")
//! }
//! ```

use std::fmt;

/// Main error type for pipeline operations.
#[derive(Debug)]
pub enum PrepError {
    /// Unrecognized strategy or method name (null handling, scaling, encoding, outliers)
    UnknownStrategy { kind: &'static str, value: String },

    /// Unrecognized export format name
    UnknownFormat(String),

    /// Constant fill requested without a fill value
    MissingFillValue,

    /// Numeric-only operation applied to a non-numeric column
    NonNumericColumn { column: String, dtype: String },

    /// A value could not be cast to the requested type
    TypeConversionFailure {
        column: String,
        target: String,
        reason: String,
    },

    /// Referenced column is absent from the table
    ColumnNotFound(String),

    /// Argument combination that cannot be honoured
    InvalidArgument(String),

    /// A cleaning plan step failed; `source` keeps the original error kind
    Step {
        index: usize,
        op: &'static str,
        source: Box<PrepError>,
    },

    /// I/O errors (file operations)
    Io(std::io::Error),

    /// Data processing errors (polars, export writers)
    DataProcessing(String),

    /// Configuration and serialization errors
    Config(String),

    /// Generic error with context
    Other(String),
}

impl fmt::Display for PrepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownStrategy { kind, value } => write!(f, "Unknown {kind}: '{value}'"),
            Self::UnknownFormat(format) => write!(f, "Unknown export format: '{format}'"),
            Self::MissingFillValue => {
                write!(f, "The constant strategy requires a fill value")
            }
            Self::NonNumericColumn { column, dtype } => {
                write!(f, "Column '{column}' is not numeric (dtype {dtype})")
            }
            Self::TypeConversionFailure {
                column,
                target,
                reason,
            } => write!(f, "Cannot convert column '{column}' to {target}: {reason}"),
            Self::ColumnNotFound(column) => write!(f, "Column not found: '{column}'"),
            Self::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            Self::Step { index, op, source } => {
                write!(f, "Step {index} ({op}) failed: {source}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::DataProcessing(msg) => write!(f, "Data processing error: {msg}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PrepError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Step { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl PrepError {
    /// The underlying error, looking through plan step wrappers.
    pub fn root(&self) -> &Self {
        match self {
            Self::Step { source, .. } => source.root(),
            other => other,
        }
    }
}

impl From<std::io::Error> for PrepError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<anyhow::Error> for PrepError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

impl From<serde_json::Error> for PrepError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

impl From<polars::error::PolarsError> for PrepError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::DataProcessing(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for PrepError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Self::DataProcessing(format!("Spreadsheet error: {err}"))
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PrepError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<PrepError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err: PrepError = e.into();
            PrepError::Other(format!("{}: {}", msg.into(), err))
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err: PrepError = e.into();
            PrepError::Other(format!("{}: {}", f(), err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PrepError::ColumnNotFound("edad".to_owned());
        assert_eq!(err.to_string(), "Column not found: 'edad'");

        let err = PrepError::UnknownStrategy {
            kind: "null strategy",
            value: "interpolate".to_owned(),
        };
        assert_eq!(err.to_string(), "Unknown null strategy: 'interpolate'");
    }

    #[test]
    fn test_non_numeric_display() {
        let err = PrepError::NonNumericColumn {
            column: "ciudad".to_owned(),
            dtype: "str".to_owned(),
        };
        assert_eq!(err.to_string(), "Column 'ciudad' is not numeric (dtype str)");
    }

    #[test]
    fn test_result_context() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file.txt",
        ));

        let result: Result<()> = result.context("Failed to read file");
        assert!(
            result
                .expect_err("context keeps the error")
                .to_string()
                .contains("Failed to read file")
        );
    }
}
