//! Delimited text loading.

use std::path::Path;

use crate::error::{InferenceError, InferenceResult};
use crate::types::{Column, DataSet, DataType, Value};

/// Reader settings for delimited text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    /// Field delimiter byte.
    pub delimiter: u8,
    /// Trim surrounding whitespace from every cell.
    pub trim: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
        }
    }
}

impl CsvOptions {
    /// Build a reader configured with these options.
    pub fn reader_builder(&self) -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .has_headers(true)
            .delimiter(self.delimiter)
            // Short rows are padded with nulls below; long rows are rejected explicitly.
            .flexible(true);
        builder
    }
}

/// Load a delimited text file into a raw [`DataSet`].
///
/// Rules:
///
/// - The file must have a header row with unique, non-empty column names.
/// - Every column is loaded as [`DataType::Utf8`].
/// - Empty cells, and cells missing from short rows, become [`Value::Null`]. The literal
///   text `null` is kept as text.
/// - A row with more cells than the header is rejected.
pub fn load_csv_from_path(path: impl AsRef<Path>, options: &CsvOptions) -> InferenceResult<DataSet> {
    let mut rdr = options.reader_builder().from_path(path)?;
    load_csv_from_reader(&mut rdr, options)
}

/// Load delimited text from an existing reader.
pub fn load_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    options: &CsvOptions,
) -> InferenceResult<DataSet> {
    let headers = rdr.headers()?.clone();
    let names: Vec<String> = headers
        .iter()
        .map(|h| if options.trim { h.trim() } else { h }.to_owned())
        .collect();

    if let Some(idx) = names.iter().position(String::is_empty) {
        return Err(InferenceError::SchemaMismatch {
            message: format!("empty column name at position {}", idx + 1),
        });
    }

    let mut cells: Vec<Vec<Value>> = vec![Vec::new(); names.len()];
    for (row_idx0, result) in rdr.records().enumerate() {
        // 1-based for users, +1 again for the header row.
        let user_row = row_idx0 + 2;
        let record = result?;
        if record.len() > names.len() {
            return Err(InferenceError::SchemaMismatch {
                message: format!(
                    "row {user_row} has {} fields but the header has {}",
                    record.len(),
                    names.len()
                ),
            });
        }

        for (col_idx, column) in cells.iter_mut().enumerate() {
            let raw = record.get(col_idx).unwrap_or("");
            column.push(raw_cell(raw, options.trim));
        }
    }

    let columns = names
        .into_iter()
        .zip(cells)
        .map(|(name, values)| Column::new(name, DataType::Utf8, values))
        .collect();
    DataSet::new(columns)
}

fn raw_cell(raw: &str, trim: bool) -> Value {
    let text = if trim { raw.trim() } else { raw };
    if text.trim().is_empty() {
        Value::Null
    } else {
        Value::Utf8(text.to_owned())
    }
}
