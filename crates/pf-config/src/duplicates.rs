use serde::{Deserialize, Serialize};

/// Near-duplicate probe settings: `[duplicates]`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DuplicatesConfig {
    /// Share of each KPI's unconstrained quota emitted as duplicate probes.
    pub fraction: f64,
    /// Probes are anchored within +/- this many hours of their reference.
    pub window_hours: u32,
}

impl Default for DuplicatesConfig {
    fn default() -> Self {
        Self {
            fraction: 0.10,
            window_hours: 4,
        }
    }
}
