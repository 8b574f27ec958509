use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dataset::DatasetConfig;
use crate::duplicates::DuplicatesConfig;
use crate::duration::DurationConfig;
use crate::fiscal::FiscalYearConfig;
use crate::kpi::{KpiConfig, default_kpi};
use crate::logging::LoggingConfig;
use crate::output::OutputConfig;
use crate::progression::ProgressionConfig;
use crate::scenario::{self, ScenarioOverlay};
use crate::stations::StationsConfig;
use crate::validate;

// ---------------------------------------------------------------------------
// Raw TOML structure (intermediate representation)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GeneratorConfigRaw {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    dataset: DatasetConfig,
    #[serde(default = "default_kpi")]
    kpi: KpiConfig,
    #[serde(default)]
    duration: DurationConfig,
    #[serde(default)]
    fiscal_year: FiscalYearConfig,
    #[serde(default)]
    duplicates: DuplicatesConfig,
    #[serde(default)]
    stations: StationsConfig,
    #[serde(default)]
    output: OutputConfig,
    #[serde(default)]
    status_progression: ProgressionConfig,
    #[serde(default)]
    logging: LoggingConfig,
    /// User presets; checked against the overlay whitelist during resolution.
    #[serde(default)]
    scenarios: BTreeMap<String, toml::Table>,
}

// ---------------------------------------------------------------------------
// GeneratorConfig (resolved, validated)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct GeneratorConfig {
    /// Fixed RNG seed. `None` draws one from the OS at generation time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub dataset: DatasetConfig,
    pub kpi: KpiConfig,
    pub duration: DurationConfig,
    pub fiscal_year: FiscalYearConfig,
    pub duplicates: DuplicatesConfig,
    pub stations: StationsConfig,
    pub output: OutputConfig,
    pub status_progression: ProgressionConfig,
    pub logging: LoggingConfig,
    /// User-declared presets. They shadow built-ins of the same name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub scenarios: BTreeMap<String, ScenarioOverlay>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            dataset: DatasetConfig::default(),
            kpi: default_kpi(),
            duration: DurationConfig::default(),
            fiscal_year: FiscalYearConfig::default(),
            duplicates: DuplicatesConfig::default(),
            stations: StationsConfig::default(),
            output: OutputConfig::default(),
            status_progression: ProgressionConfig::default(),
            logging: LoggingConfig::default(),
            scenarios: BTreeMap::new(),
        }
    }
}

impl GeneratorConfig {
    /// Read and parse a generator TOML file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.as_ref().display()))?;
        content.parse()
    }

    /// Re-run validation after in-place edits such as CLI overrides.
    pub fn validate(&self) -> anyhow::Result<()> {
        validate::validate(self)
    }

    /// Look up a preset by name, user presets first.
    pub fn scenario(&self, name: &str) -> anyhow::Result<ScenarioOverlay> {
        if let Some(overlay) = self.scenarios.get(name) {
            return Ok(overlay.clone());
        }
        match scenario::builtin(name) {
            Some(overlay) => overlay,
            None => anyhow::bail!(
                "unknown scenario '{name}' (available: {})",
                self.scenario_names().join(", ")
            ),
        }
    }

    /// Built-in preset names followed by user presets that do not shadow one.
    pub fn scenario_names(&self) -> Vec<String> {
        let mut names: Vec<String> = scenario::builtin_names().map(str::to_string).collect();
        for name in self.scenarios.keys() {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        names
    }

    /// Merge the named preset into this configuration and re-validate.
    pub fn apply_scenario(&mut self, name: &str) -> anyhow::Result<()> {
        let overlay = self.scenario(name)?;
        overlay
            .apply_to(self)
            .map_err(|e| anyhow::anyhow!("scenario '{name}': {e}"))?;
        self.validate()
    }

    /// Serialise the resolved configuration back to TOML.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).map_err(|e| anyhow::anyhow!("failed to render config: {e}"))
    }
}

impl FromStr for GeneratorConfig {
    type Err = anyhow::Error;

    /// Parse a TOML string into a resolved, validated [`GeneratorConfig`].
    fn from_str(toml_str: &str) -> anyhow::Result<Self> {
        let raw: GeneratorConfigRaw = toml::from_str(toml_str)?;

        let mut scenarios = BTreeMap::new();
        for (name, table) in raw.scenarios {
            let overlay = ScenarioOverlay::from_table(&name, table)?;
            scenarios.insert(name, overlay);
        }

        let config = GeneratorConfig {
            seed: raw.seed,
            dataset: raw.dataset,
            kpi: raw.kpi,
            duration: raw.duration,
            fiscal_year: raw.fiscal_year,
            duplicates: raw.duplicates,
            stations: raw.stations,
            output: raw.output,
            status_progression: raw.status_progression,
            logging: raw.logging,
            scenarios,
        };

        validate::validate(&config)?;

        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
