use std::fs::File;
use std::path::Path;

use arrow::ipc::writer::FileWriter;
use pf_core::Record;

use super::batch::record_batch;

/// Write records as an Arrow IPC file, all columns Utf8.
pub fn write_arrow_ipc(records: &[Record], output_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let batch = record_batch(records)?;
    let file = File::create(output_path)?;
    let mut writer = FileWriter::try_new(file, &batch.schema())?;
    writer.write(&batch)?;
    writer.finish()?;

    Ok(())
}
