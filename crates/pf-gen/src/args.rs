use std::path::PathBuf;

use clap::Args;
use pf_config::{GeneratorConfig, OutputFormat};

/// Options that resolve a [`GeneratorConfig`]: a file, a preset, then
/// individual overrides, applied in that order.
#[derive(Args, Debug, Default, Clone)]
pub struct ConfigArgs {
    /// Generator TOML file (built-in defaults when omitted)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Scenario preset to merge into the configuration
    #[arg(short = 's', long)]
    pub scenario: Option<String>,

    /// Total number of records to generate
    #[arg(short = 'r', long)]
    pub records: Option<usize>,

    /// Output directory
    #[arg(short = 'o', long)]
    pub out: Option<PathBuf>,

    /// Output format, repeatable: csv, jsonl, arrow ("arrow-ipc"/"ipc" aliases), parquet
    #[arg(short = 'f', long = "format")]
    pub formats: Vec<OutputFormat>,

    /// Restrict generation to these KPI codes
    #[arg(long, num_args = 1..)]
    pub kpi_codes: Vec<String>,

    /// RNG seed; the same seed and configuration give the same dataset
    #[arg(long)]
    pub seed: Option<u64>,

    /// Do not force a fiscal-year spanning record per KPI code
    #[arg(long)]
    pub no_fy_spanning: bool,

    /// Fraction (0-1) of each KPI's remaining quota emitted as duplicate probes
    #[arg(long)]
    pub duplicate_pct: Option<f64>,

    /// Also write one snapshot per status progression step
    #[arg(long)]
    pub status_progression: bool,

    /// Global log level (e.g. "debug")
    #[arg(long)]
    pub log_level: Option<String>,
}

impl ConfigArgs {
    /// Load (or default) the configuration, merge the scenario, apply
    /// overrides and validate the result.
    pub fn resolve(&self) -> anyhow::Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::load(path)?,
            None => GeneratorConfig::default(),
        };
        if let Some(name) = &self.scenario {
            config.apply_scenario(name)?;
        }
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut GeneratorConfig) {
        if let Some(records) = self.records {
            config.dataset.total_records = records;
        }
        if let Some(out) = &self.out {
            config.output.directory = out.clone();
        }
        if !self.formats.is_empty() {
            config.output.formats = self.formats.clone();
        }
        if !self.kpi_codes.is_empty() {
            config.kpi.use_all = false;
            config.kpi.selected = self.kpi_codes.clone();
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if self.no_fy_spanning {
            config.fiscal_year.ensure_spanning = false;
        }
        if let Some(fraction) = self.duplicate_pct {
            config.duplicates.fraction = fraction;
        }
        if self.status_progression {
            config.status_progression.enabled = true;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
    }
}
