use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct StationsConfig {
    /// Drop stations without a section from the sampling pool.
    pub exclude_null_sections: bool,
}

impl Default for StationsConfig {
    fn default() -> Self {
        Self {
            exclude_null_sections: true,
        }
    }
}
