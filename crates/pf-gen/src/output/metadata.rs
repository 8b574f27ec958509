use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::NaiveDateTime;
use pf_config::GeneratorConfig;
use pf_core::Summary;
use pf_core::generate::Allocation;
use pf_core::record::timestamp;
use serde::Serialize;

/// Sidecar describing one generation run: `<base>_metadata.json`.
#[derive(Debug, Serialize)]
pub struct RunMetadata<'a> {
    #[serde(with = "timestamp")]
    pub generated_at: NaiveDateTime,
    pub seed: u64,
    pub record_count: usize,
    pub files: Vec<String>,
    pub allocations: &'a [Allocation],
    pub config: &'a GeneratorConfig,
    pub summary: &'a Summary,
}

/// Write the metadata as pretty-printed JSON.
pub fn write_metadata(meta: &RunMetadata<'_>, output_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, meta)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
