//! Core data model types.
//!
//! A [`DataSet`] is an ordered list of named [`Column`]s. Each column carries a
//! [`DataType`] tag decided once (raw text at load time, the inferred representation after
//! conversion) so classifiers can pattern-match on it instead of probing cell values.

use std::collections::HashSet;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::Serialize;

use crate::error::{InferenceError, InferenceResult};

/// Representation tag for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    /// Raw UTF-8 text. Every column starts here after loading.
    Utf8,
    /// Integer column whose values fit in `i8`.
    Int8,
    /// Integer column whose values fit in `i16`.
    Int16,
    /// Integer column whose values fit in `i32`.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// Calendar date without time.
    Date,
    /// Date and time without timezone.
    Datetime,
    /// Elapsed time.
    Duration,
    /// Enumerated text; cell values are kept as [`Value::Utf8`].
    Categorical,
}

impl DataType {
    /// Returns `true` for integer and floating point tags.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64 | Self::Float64
        )
    }

    /// Returns `true` for date, datetime and duration tags.
    pub fn is_temporal(self) -> bool {
        matches!(self, Self::Date | Self::Datetime | Self::Duration)
    }

    /// Lowercase name used in summaries.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Utf8 => "utf8",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float64 => "float64",
            Self::Bool => "bool",
            Self::Date => "date",
            Self::Datetime => "datetime",
            Self::Duration => "duration",
            Self::Categorical => "categorical",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// The ordered list of fields describing a [`DataSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// A single cell value in a [`DataSet`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing value. Distinct from the text `"null"`.
    Null,
    /// Integer (stored as `i64` whatever the column width).
    Int64(i64),
    /// 64-bit float. Always finite.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
    /// Calendar date.
    Date(NaiveDate),
    /// Date and time.
    Datetime(NaiveDateTime),
    /// Elapsed time.
    Duration(TimeDelta),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow the text of a [`Value::Utf8`] cell.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Utf8(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Int64(v) => write!(f, "{v}"),
            Self::Float64(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Utf8(s) => f.write_str(s),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::Datetime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S%.f")),
            Self::Duration(d) => write!(f, "{d}"),
        }
    }
}

/// A named column of cells sharing one [`DataType`].
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name, unique within a [`DataSet`].
    pub name: String,
    /// Representation tag.
    pub data_type: DataType,
    /// Cells in row order.
    pub values: Vec<Value>,
}

impl Column {
    /// Create a column from already-typed values.
    pub fn new(name: impl Into<String>, data_type: DataType, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            data_type,
            values,
        }
    }

    /// Create a raw text column. `None` cells become [`Value::Null`].
    pub fn from_text<'a, I>(name: impl Into<String>, cells: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let values = cells
            .into_iter()
            .map(|cell| match cell {
                Some(s) => Value::Utf8(s.to_owned()),
                None => Value::Null,
            })
            .collect();
        Self::new(name, DataType::Utf8, values)
    }

    /// Number of rows, including nulls.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of [`Value::Null`] cells.
    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }

    /// Iterate non-null cells in row order.
    pub fn non_null(&self) -> impl Iterator<Item = &Value> {
        self.values.iter().filter(|v| !v.is_null())
    }

    /// Distinct non-null cells, compared by their display form.
    pub fn distinct_non_null(&self) -> HashSet<String> {
        self.non_null().map(Value::to_string).collect()
    }

    /// The [`Field`] describing this column.
    pub fn field(&self) -> Field {
        Field::new(self.name.clone(), self.data_type)
    }
}

/// In-memory tabular dataset, stored column-major.
///
/// Invariants: column names are unique and every column has the same row count.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    columns: Vec<Column>,
}

impl DataSet {
    /// Create a dataset from columns.
    ///
    /// Returns [`InferenceError::SchemaMismatch`] on duplicate names or unequal lengths.
    pub fn new(columns: Vec<Column>) -> InferenceResult<Self> {
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(InferenceError::SchemaMismatch {
                    message: format!("duplicate column name '{}'", column.name),
                });
            }
        }
        if let Some(first) = columns.first() {
            let expected = first.len();
            if let Some(bad) = columns.iter().find(|c| c.len() != expected) {
                return Err(InferenceError::SchemaMismatch {
                    message: format!(
                        "column '{}' has {} rows, expected {expected}",
                        bad.name,
                        bad.len()
                    ),
                });
            }
        }
        Ok(Self { columns })
    }

    /// Rebuild a dataset from columns derived one-to-one from an existing dataset's columns
    /// (same names, same lengths).
    pub(crate) fn from_checked_columns(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Columns in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Consume the dataset, returning its columns.
    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Iterate column names in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Schema derived from the current column tags.
    pub fn schema(&self) -> Schema {
        Schema::new(self.columns.iter().map(Column::field).collect())
    }

    /// Column name and representation tag pairs, in column order.
    pub fn dtypes(&self) -> Vec<(&str, DataType)> {
        self.columns
            .iter()
            .map(|c| (c.name.as_str(), c.data_type))
            .collect()
    }

    /// Borrow the cells of row `idx` across all columns.
    pub fn row(&self, idx: usize) -> Option<Vec<&Value>> {
        if idx >= self.row_count() {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.values[idx]).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{Column, DataSet, DataType, Value};

    #[test]
    fn dataset_rejects_duplicate_column_names() {
        let err = DataSet::new(vec![
            Column::from_text("a", [Some("1")]),
            Column::from_text("a", [Some("2")]),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("duplicate column name 'a'"));
    }

    #[test]
    fn dataset_rejects_unequal_column_lengths() {
        let err = DataSet::new(vec![
            Column::from_text("a", [Some("1"), Some("2")]),
            Column::from_text("b", [Some("x")]),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("column 'b' has 1 rows, expected 2"));
    }

    #[test]
    fn from_text_keeps_null_distinct_from_null_text() {
        let col = Column::from_text("c", [None, Some("null")]);
        assert_eq!(col.data_type, DataType::Utf8);
        assert_eq!(col.values, vec![Value::Null, Value::Utf8("null".to_string())]);
        assert_eq!(col.null_count(), 1);
    }

    #[test]
    fn row_borrows_cells_across_columns() {
        let ds = DataSet::new(vec![
            Column::from_text("a", [Some("1"), Some("2")]),
            Column::from_text("b", [Some("x"), None]),
        ])
        .unwrap();
        assert_eq!(ds.row_count(), 2);
        let row = ds.row(1).unwrap();
        assert_eq!(row, vec![&Value::Utf8("2".to_string()), &Value::Null]);
        assert!(ds.row(2).is_none());
    }
}
