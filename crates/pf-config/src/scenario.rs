use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::generator::GeneratorConfig;

/// Keys a scenario overlay may set. Anything else is rejected before merge.
pub const OVERLAY_FIELDS: &[&str] = &[
    "description",
    "total_records",
    "start_date",
    "end_date",
    "use_all_kpi_codes",
    "selected_kpi_codes",
    "kpi_weights",
    "duration_distribution",
    "ensure_fy_spanning",
    "duplicate_fraction",
    "duplicate_window_hours",
    "status_progression",
    "status_progression_steps",
];

/// A named preset: a sparse set of overrides merged field-by-field into a
/// base [`GeneratorConfig`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioOverlay {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_records: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_all_kpi_codes: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_kpi_codes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ensure_fy_spanning: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplicate_fraction: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplicate_window_hours: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_progression: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_progression_steps: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kpi_weights: Option<BTreeMap<String, f64>>,
    /// Bucket name -> probability. Buckets not listed keep their probability.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_distribution: Option<BTreeMap<String, f64>>,
}

impl ScenarioOverlay {
    /// Check `table` against [`OVERLAY_FIELDS`] and convert it.
    pub fn from_table(name: &str, table: toml::Table) -> anyhow::Result<Self> {
        if let Some(key) = table
            .keys()
            .find(|k| !OVERLAY_FIELDS.contains(&k.as_str()))
        {
            anyhow::bail!(
                "scenario '{name}': unknown field '{key}' (allowed: {})",
                OVERLAY_FIELDS.join(", ")
            );
        }
        toml::Value::Table(table)
            .try_into()
            .map_err(|e| anyhow::anyhow!("scenario '{name}': {e}"))
    }

    pub fn parse(name: &str, toml_str: &str) -> anyhow::Result<Self> {
        let table: toml::Table =
            toml::from_str(toml_str).map_err(|e| anyhow::anyhow!("scenario '{name}': {e}"))?;
        Self::from_table(name, table)
    }

    /// Merge this overlay into `config`. Fields left unset keep the base value.
    pub fn apply_to(&self, config: &mut GeneratorConfig) -> anyhow::Result<()> {
        if let Some(n) = self.total_records {
            config.dataset.total_records = n;
        }
        if let Some(d) = self.start_date {
            config.dataset.start_date = d;
        }
        if let Some(d) = self.end_date {
            config.dataset.end_date = d;
        }
        if let Some(all) = self.use_all_kpi_codes {
            config.kpi.use_all = all;
        }
        if let Some(codes) = &self.selected_kpi_codes {
            config.kpi.selected = codes.clone();
        }
        if let Some(weights) = &self.kpi_weights {
            config.kpi.weights = weights.clone();
        }
        if let Some(dist) = &self.duration_distribution {
            for (bucket, probability) in dist {
                let target = config.duration.bucket_mut(bucket).ok_or_else(|| {
                    anyhow::anyhow!(
                        "duration_distribution references unknown bucket '{bucket}'"
                    )
                })?;
                target.probability = *probability;
            }
        }
        if let Some(on) = self.ensure_fy_spanning {
            config.fiscal_year.ensure_spanning = on;
        }
        if let Some(f) = self.duplicate_fraction {
            config.duplicates.fraction = f;
        }
        if let Some(h) = self.duplicate_window_hours {
            config.duplicates.window_hours = h;
        }
        if let Some(on) = self.status_progression {
            config.status_progression.enabled = on;
        }
        if let Some(steps) = &self.status_progression_steps {
            config.status_progression.steps = steps.clone();
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Built-in presets
// ---------------------------------------------------------------------------

const BUILTIN: &[(&str, &str)] = &[
    (
        "default",
        r#"
description = "15k records, all KPI codes, standard distribution"
total_records = 15000
use_all_kpi_codes = true
"#,
    ),
    (
        "graffiti",
        r#"
description = "Cleaning KPIs weighted towards graffiti, mostly short tasks"
total_records = 10000
use_all_kpi_codes = false
selected_kpi_codes = ["GRAFFITI", "TRACKSIDE_CLEAN", "STATION_CLEAN"]
kpi_weights = { GRAFFITI = 3.0, TRACKSIDE_CLEAN = 2.0, STATION_CLEAN = 1.5 }
duration_distribution = { short = 0.60, medium = 0.30, long = 0.08, very_long = 0.02 }
"#,
    ),
    (
        "maintenance",
        r#"
description = "Maintenance and repair KPIs with longer durations"
total_records = 8000
use_all_kpi_codes = false
selected_kpi_codes = ["ESCALATOR_REPAIR", "LIFT_MAINTENANCE", "PLATFORM_REPAIR"]
duration_distribution = { short = 0.20, medium = 0.40, long = 0.30, very_long = 0.10 }
"#,
    ),
    (
        "threshold",
        r#"
description = "Annual threshold rollover across 24h, 48h and 100h KPIs"
total_records = 5000
use_all_kpi_codes = false
selected_kpi_codes = ["GRAFFITI", "TRACKSIDE_CLEAN", "ESCALATOR_REPAIR"]
ensure_fy_spanning = true
"#,
    ),
    (
        "duplicates",
        r#"
description = "30% duplicate probes in a tight window for duplicate detection"
total_records = 5000
duplicate_fraction = 0.30
duplicate_window_hours = 2
"#,
    ),
    (
        "period",
        r#"
description = "Long-running tasks that cross period boundaries"
total_records = 8000
duration_distribution = { short = 0.10, medium = 0.20, long = 0.40, very_long = 0.30 }
"#,
    ),
    (
        "fy",
        r#"
description = "Financial-year boundary crossing and threshold rollover"
total_records = 6000
start_date = "2025-02-01"
end_date = "2027-05-31"
ensure_fy_spanning = true
duration_distribution = { short = 0.25, medium = 0.30, long = 0.30, very_long = 0.15 }
"#,
    ),
    (
        "dev",
        r#"
description = "1k records for quick testing"
total_records = 1000
use_all_kpi_codes = true
duplicate_fraction = 0.05
"#,
    ),
    (
        "large",
        r#"
description = "50k records for volume testing"
total_records = 50000
use_all_kpi_codes = true
"#,
    ),
    (
        "status",
        r#"
description = "Backload testing with status progression snapshots"
total_records = 3000
status_progression = true
status_progression_steps = ["WAPPR", "APPR", "COMP"]
"#,
    ),
    (
        "realistic",
        r#"
description = "20k records mimicking production KPI frequencies"
total_records = 20000
use_all_kpi_codes = true
duplicate_fraction = 0.08
duration_distribution = { short = 0.50, medium = 0.30, long = 0.15, very_long = 0.05 }

[kpi_weights]
GRAFFITI = 2.5
STATION_CLEAN = 2.0
TRACKSIDE_CLEAN = 1.8
LIGHTING_FIX = 1.5
ESCALATOR_REPAIR = 1.2
LIFT_MAINTENANCE = 1.0
PLATFORM_REPAIR = 0.8
SIGNAGE_UPDATE = 0.5
"#,
    ),
    (
        "edge",
        r#"
description = "25k records with heavy duplicate and long-duration edge cases"
total_records = 25000
use_all_kpi_codes = true
duplicate_fraction = 0.25
duplicate_window_hours = 1
ensure_fy_spanning = true
duration_distribution = { short = 0.20, medium = 0.20, long = 0.30, very_long = 0.30 }
"#,
    ),
];

/// Names of the built-in presets, in listing order.
pub fn builtin_names() -> impl Iterator<Item = &'static str> {
    BUILTIN.iter().map(|(name, _)| *name)
}

/// Parse the built-in preset `name`, or `None` if there is no such preset.
pub fn builtin(name: &str) -> Option<anyhow::Result<ScenarioOverlay>> {
    BUILTIN
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(n, body)| ScenarioOverlay::parse(n, body))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
