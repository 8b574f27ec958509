use serde::{Deserialize, Serialize};

/// Status progression snapshots: `[status_progression]`.
///
/// When enabled, one extra copy of the dataset is written per step with the
/// status overwritten to that step.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProgressionConfig {
    pub enabled: bool,
    pub steps: Vec<String>,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            steps: vec!["WAPPR".to_string(), "APPR".to_string(), "COMP".to_string()],
        }
    }
}
