use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Which KPI codes to generate for and how often.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct KpiConfig {
    /// Generate for every code in the catalog. When `false`, `selected`
    /// narrows the set; an empty selection still means "all".
    pub use_all: bool,
    pub selected: Vec<String>,
    /// Relative frequency per KPI code. Codes without an entry weigh 1.0.
    pub weights: BTreeMap<String, f64>,
}

impl KpiConfig {
    /// Whether the catalog should be narrowed to `selected`.
    pub fn is_filtered(&self) -> bool {
        !self.use_all && !self.selected.is_empty()
    }
}

pub(crate) fn default_kpi() -> KpiConfig {
    KpiConfig {
        use_all: true,
        ..Default::default()
    }
}
