use chrono::NaiveDateTime;
use pf_config::GeneratorConfig;
use pf_core::{Generator, Summary};

use crate::output::{WrittenFiles, write_run};

/// Outcome of one `pfgen gen` invocation.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub seed: u64,
    pub summary: Summary,
    pub files: WrittenFiles,
}

/// Generate the dataset described by `config`, summarise it and write every
/// configured artifact stamped with `generated_at`.
pub fn execute(config: &GeneratorConfig, generated_at: NaiveDateTime) -> anyhow::Result<RunReport> {
    let generator = Generator::new(config).map_err(|e| anyhow::anyhow!("{e}"))?;
    if config.seed.is_none() {
        pf_info!(sys, seed = generator.seed(), "no seed configured, drew one");
    }

    let dataset = generator.run();
    let summary = generator.summarize(&dataset.records);
    pf_info!(
        sys,
        records = summary.total_records,
        period_crossings = summary.period_crossings,
        fy_spanning = summary.fy_spanning,
        duplicate_probes = summary.duplicate_probes,
        "dataset summarised"
    );
    if summary.probe_fallbacks > 0 {
        pf_debug!(sys, fallbacks = summary.probe_fallbacks, "probes fell back to random records");
    }

    let files = write_run(config, &dataset, &summary, generated_at)?;

    Ok(RunReport {
        seed: dataset.seed,
        summary,
        files,
    })
}
