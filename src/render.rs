use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use html_escape::encode_text;

use crate::data::{CellValue, Dataset};

// ---------------------------------------------------------------------------
// Dataset → Arrow
// ---------------------------------------------------------------------------

/// Narrowest Arrow type that holds every non-null cell of a column.
fn column_type<'a>(cells: impl Iterator<Item = &'a CellValue>) -> DataType {
    let mut kind = DataType::Null;
    for cell in cells {
        let next = match (cell, &kind) {
            (CellValue::Null, _) => continue,
            (CellValue::Integer(_), DataType::Null | DataType::Int64) => DataType::Int64,
            (
                CellValue::Integer(_) | CellValue::Float(_),
                DataType::Null | DataType::Int64 | DataType::Float64,
            ) => DataType::Float64,
            _ => return DataType::Utf8,
        };
        kind = next;
    }
    match kind {
        DataType::Null => DataType::Utf8,
        other => other,
    }
}

/// Convert a dataset into a single record batch with typed columns.
///
/// All-integer columns become `Int64`, numeric columns `Float64`, anything
/// else `Utf8`. `CellValue::Null` becomes an Arrow null.
pub fn to_record_batch(dataset: &Dataset) -> Result<RecordBatch, ArrowError> {
    let mut fields = Vec::with_capacity(dataset.columns().len());
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(dataset.columns().len());

    for (col, name) in dataset.columns().iter().enumerate() {
        let cells = || dataset.rows().iter().map(move |row| &row[col]);
        let data_type = column_type(cells());
        let array: ArrayRef = match data_type {
            DataType::Int64 => Arc::new(Int64Array::from_iter(cells().map(|c| match c {
                CellValue::Integer(i) => Some(*i),
                _ => None,
            }))),
            DataType::Float64 => Arc::new(Float64Array::from_iter(cells().map(CellValue::as_f64))),
            _ => Arc::new(StringArray::from_iter(cells().map(|c| {
                if c.is_null() {
                    None
                } else {
                    Some(c.to_string())
                }
            }))),
        };
        fields.push(Field::new(name, data_type, true));
        arrays.push(array);
    }

    RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)
}

/// Plain-text table for terminals.
pub fn to_text_table(dataset: &Dataset) -> Result<String, ArrowError> {
    if dataset.columns().is_empty() {
        return Ok("(no columns)".to_string());
    }
    let batch = to_record_batch(dataset)?;
    Ok(pretty_format_batches(&[batch])?.to_string())
}

// ---------------------------------------------------------------------------
// Dataset → HTML
// ---------------------------------------------------------------------------

/// `<table class="data">` with one header row; all text is escaped.
pub fn to_html_table(dataset: &Dataset) -> String {
    let mut html = String::from("<table border=\"1\" class=\"dataframe data\">\n  <thead>\n    <tr>");
    for name in dataset.columns() {
        html.push_str(&format!("<th>{}</th>", encode_text(name)));
    }
    html.push_str("</tr>\n  </thead>\n  <tbody>\n");
    for row in dataset.rows() {
        html.push_str("    <tr>");
        for cell in row {
            html.push_str(&format!("<td>{}</td>", encode_text(&cell.to_string())));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("  </tbody>\n</table>");
    html
}
