use std::fs::File;
use std::path::Path;

use arrow::csv::WriterBuilder;
use pf_core::Record;

use super::batch::record_batch;

/// Write records as CSV with a header row. Empty cells (a cleared
/// `Finished`) are written as empty fields.
pub fn write_csv(records: &[Record], output_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let batch = record_batch(records)?;
    let file = File::create(output_path)?;
    let mut writer = WriterBuilder::new().with_header(true).build(file);
    writer.write(&batch)?;

    Ok(())
}
