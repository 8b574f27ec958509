use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::OutputFormat;

/// Where and how generated files are written: `[output]`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub directory: PathBuf,
    /// File stem; a `_YYYYmmdd_HHMMSS` suffix is appended per run.
    pub filename: String,
    pub formats: Vec<OutputFormat>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("./output"),
            filename: "potential_failures_test_data".to_string(),
            formats: vec![OutputFormat::Csv],
        }
    }
}
