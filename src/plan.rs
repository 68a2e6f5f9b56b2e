//! Cleaning plans: pipeline steps stored as JSON.
//!
//! A plan is an ordered list of [`Step`]s, each tagged by its `op`:
//!
//! ```json
//! {
//!   "version": "0.1",
//!   "name": "survey cleanup",
//!   "steps": [
//!     { "op": "handle_nulls", "strategy": "media" },
//!     { "op": "drop_duplicates" },
//!     { "op": "encode_categoricals", "columns": ["ciudad"], "method": "one_hot" },
//!     { "op": "save", "path": "clean.csv" }
//!   ]
//! }
//! ```
//!
//! Strategy and method names accept the same aliases as their `FromStr`
//! implementations; an unknown name fails when the plan is parsed.

use crate::error::{PrepError, Result, ResultExt as _};
use crate::pipeline::{
    EncodingMethod, ExportFormat, FillValue, KeepStrategy, NullStrategy, OutlierMethod, Pipeline,
    ScalingMethod, TargetType,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Current plan format version
pub const PLAN_VERSION: &str = "0.1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningPlan {
    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default)]
    pub name: String,

    pub steps: Vec<Step>,
}

fn default_version() -> String {
    PLAN_VERSION.to_owned()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    HandleNulls {
        #[serde(default)]
        strategy: NullStrategy,
        /// All columns when absent
        #[serde(default)]
        columns: Option<Vec<String>>,
        #[serde(default)]
        fill_value: Option<FillValue>,
    },

    DropDuplicates {
        #[serde(default)]
        subset: Option<Vec<String>>,
        #[serde(default)]
        keep: KeepStrategy,
    },

    Normalize {
        columns: Vec<String>,
        #[serde(default)]
        method: ScalingMethod,
    },

    EncodeCategoricals {
        columns: Vec<String>,
        #[serde(default)]
        method: EncodingMethod,
    },

    RemoveOutliers {
        columns: Vec<String>,
        #[serde(default)]
        method: OutlierMethod,
    },

    ConvertTypes { mapping: BTreeMap<String, TargetType> },

    /// Format defaults to the one implied by the file extension
    Save {
        path: PathBuf,
        #[serde(default)]
        format: Option<ExportFormat>,
    },
}

fn as_strs(names: &[String]) -> Vec<&str> {
    names.iter().map(String::as_str).collect()
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Self::HandleNulls { .. } => "handle_nulls",
            Self::DropDuplicates { .. } => "drop_duplicates",
            Self::Normalize { .. } => "normalize",
            Self::EncodeCategoricals { .. } => "encode_categoricals",
            Self::RemoveOutliers { .. } => "remove_outliers",
            Self::ConvertTypes { .. } => "convert_types",
            Self::Save { .. } => "save",
        }
    }

    pub fn apply(&self, pipeline: &mut Pipeline) -> Result<()> {
        match self {
            Self::HandleNulls {
                strategy,
                columns,
                fill_value,
            } => {
                let columns = columns.as_deref().map(as_strs);
                pipeline.handle_nulls(*strategy, columns.as_deref(), fill_value.clone())?;
            }
            Self::DropDuplicates { subset, keep } => {
                let subset = subset.as_deref().map(as_strs);
                pipeline.drop_duplicates(subset.as_deref(), *keep)?;
            }
            Self::Normalize { columns, method } => {
                pipeline.normalize(&as_strs(columns), *method)?;
            }
            Self::EncodeCategoricals { columns, method } => {
                pipeline.encode_categoricals(&as_strs(columns), *method)?;
            }
            Self::RemoveOutliers { columns, method } => {
                pipeline.remove_outliers(&as_strs(columns), *method)?;
            }
            Self::ConvertTypes { mapping } => {
                pipeline.convert_types(mapping.iter().map(|(name, target)| (name.as_str(), *target)))?;
            }
            Self::Save { path, format } => {
                let format = match format {
                    Some(format) => *format,
                    None => ExportFormat::from_path(path)?,
                };
                pipeline.save(path, format)?;
            }
        }
        Ok(())
    }
}

impl CleaningPlan {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: PLAN_VERSION.to_owned(),
            name: name.into(),
            steps: Vec::new(),
        }
    }

    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Load a plan from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read cleaning plan file")?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| PrepError::Config(format!("Failed to parse cleaning plan: {e}")))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Applies every step in order, stopping at the first failure.
    ///
    /// Steps before the failing one stay applied (each step is atomic on its
    /// own). The error is [`PrepError::Step`], naming the failing step (1-based)
    /// and wrapping the error it returned.
    pub fn apply(&self, pipeline: &mut Pipeline) -> Result<()> {
        if self.version != PLAN_VERSION {
            tracing::warn!(
                "Plan '{}' has version {}, expected {PLAN_VERSION}",
                self.name,
                self.version
            );
        }

        for (idx, step) in self.steps.iter().enumerate() {
            step.apply(pipeline).map_err(|source| PrepError::Step {
                index: idx + 1,
                op: step.name(),
                source: Box::new(source),
            })?;
        }
        Ok(())
    }
}
