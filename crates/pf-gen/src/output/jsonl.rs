use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use pf_core::Record;

/// Write records as JSONL (one JSON object per line, keys in column order).
pub fn write_jsonl(records: &[Record], output_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);

    for record in records {
        let line = serde_json::to_string(record)?;
        writeln!(writer, "{}", line)?;
    }

    writer.flush()?;
    Ok(())
}
