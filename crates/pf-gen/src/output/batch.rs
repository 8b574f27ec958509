use std::sync::Arc;

use arrow::array::{ArrayRef, RecordBatch, StringArray};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use pf_core::{COLUMNS, Record};

/// Output schema: one nullable Utf8 column per entry in [`COLUMNS`].
pub fn schema() -> SchemaRef {
    let fields: Vec<Field> = COLUMNS
        .iter()
        .map(|name| Field::new(*name, DataType::Utf8, true))
        .collect();
    Arc::new(Schema::new(fields))
}

/// Build a single batch holding every record, cells rendered as text.
pub fn record_batch(records: &[Record]) -> anyhow::Result<RecordBatch> {
    let rows: Vec<Vec<Option<String>>> = records.iter().map(Record::values).collect();

    let columns: Vec<ArrayRef> = (0..COLUMNS.len())
        .map(|col| {
            let values: Vec<Option<String>> = rows.iter().map(|row| row[col].clone()).collect();
            Arc::new(StringArray::from(values)) as ArrayRef
        })
        .collect();

    Ok(RecordBatch::try_new(schema(), columns)?)
}
