pub mod arrow_ipc;
pub mod batch;
pub mod csv;
pub mod jsonl;
pub mod metadata;
pub mod parquet;


use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDateTime;
use pf_config::{GeneratorConfig, OutputFormat};
use pf_core::snapshot::snapshots;
use pf_core::{Dataset, Record, Summary};

use self::arrow_ipc::write_arrow_ipc;
use self::csv::write_csv;
use self::jsonl::write_jsonl;
use self::metadata::{RunMetadata, write_metadata};
use self::parquet::write_parquet;

/// Suffix shared by every file of one run.
pub fn run_stamp(generated_at: NaiveDateTime) -> String {
    generated_at.format("%Y%m%d_%H%M%S").to_string()
}

/// Paths produced by [`write_run`].
#[derive(Debug, Clone, Default)]
pub struct WrittenFiles {
    pub datasets: Vec<PathBuf>,
    pub metadata: PathBuf,
    pub snapshots: Vec<PathBuf>,
}

/// Write `records` in one format.
pub fn write_records(records: &[Record], format: OutputFormat, path: &Path) -> anyhow::Result<()> {
    match format {
        OutputFormat::Csv => write_csv(records, path),
        OutputFormat::Jsonl => write_jsonl(records, path),
        OutputFormat::Arrow => write_arrow_ipc(records, path),
        OutputFormat::Parquet => write_parquet(records, path),
    }
    .with_context(|| format!("writing {}", path.display()))
}

/// Write every artifact of a run into `config.output.directory`:
///
/// - `<filename>_<stamp>.<ext>` per configured format
/// - `<filename>_<stamp>_metadata.json`
/// - `snapshot_<n>_<STATUS>_<stamp>.<ext>` per progression step and format,
///   when status progression is enabled
pub fn write_run(
    config: &GeneratorConfig,
    dataset: &Dataset,
    summary: &Summary,
    generated_at: NaiveDateTime,
) -> anyhow::Result<WrittenFiles> {
    let dir = &config.output.directory;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;

    let stamp = run_stamp(generated_at);
    let base = format!("{}_{}", config.output.filename, stamp);
    let mut written = WrittenFiles::default();

    for &format in &config.output.formats {
        let path = dir.join(format!("{base}.{}", format.extension()));
        write_records(&dataset.records, format, &path)?;
        pf_info!(
            res,
            path = %path.display(),
            records = dataset.records.len(),
            "dataset written"
        );
        written.datasets.push(path);
    }

    if config.status_progression.enabled {
        for snap in snapshots(&dataset.records, &config.status_progression.steps) {
            for &format in &config.output.formats {
                let path = dir.join(format!(
                    "snapshot_{}_{}_{}.{}",
                    snap.step_index + 1,
                    snap.status,
                    stamp,
                    format.extension()
                ));
                write_records(&snap.records, format, &path)?;
                pf_debug!(res, path = %path.display(), status = %snap.status, "snapshot written");
                written.snapshots.push(path);
            }
        }
        pf_info!(
            res,
            steps = config.status_progression.steps.len(),
            files = written.snapshots.len(),
            "status snapshots written"
        );
    }

    let files = written
        .datasets
        .iter()
        .chain(&written.snapshots)
        .filter_map(|p| p.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .collect();
    let meta = RunMetadata {
        generated_at,
        seed: dataset.seed,
        record_count: dataset.records.len(),
        files,
        allocations: &dataset.allocations,
        config,
        summary,
    };
    let meta_path = dir.join(format!("{base}_metadata.json"));
    write_metadata(&meta, &meta_path)
        .with_context(|| format!("writing {}", meta_path.display()))?;
    pf_info!(res, path = %meta_path.display(), "metadata written");
    written.metadata = meta_path;

    Ok(written)
}
