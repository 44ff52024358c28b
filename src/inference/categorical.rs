//! Categorical classifier.
//!
//! Three independent signals, any one of which is enough:
//!
//! - the column is already tagged [`DataType::Categorical`]
//! - low cardinality: `distinct non-null < rows / divisor` (divisor defaults to 1.1)
//! - the cells' value kind is inherently a closed set ([`ValueKind::is_category_like`])

use crate::types::{Column, DataType, Value};

/// Kind of the non-null cells in a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// No non-null cells.
    Empty,
    /// Text only.
    Text,
    /// Integers only.
    Integer,
    /// Floats, possibly mixed with integers.
    Float,
    /// Booleans only.
    Boolean,
    /// Dates, datetimes or durations.
    Temporal,
    /// More than one of the above.
    Mixed,
}

impl ValueKind {
    /// Kinds whose values form a closed set of levels.
    pub fn is_category_like(self) -> bool {
        matches!(self, Self::Boolean)
    }

    fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Empty,
            Value::Utf8(_) => Self::Text,
            Value::Int64(_) => Self::Integer,
            Value::Float64(_) => Self::Float,
            Value::Bool(_) => Self::Boolean,
            Value::Date(_) | Value::Datetime(_) | Value::Duration(_) => Self::Temporal,
        }
    }

    fn merge(self, other: Self) -> Self {
        match (self, other) {
            (Self::Empty, k) | (k, Self::Empty) => k,
            (a, b) if a == b => a,
            (Self::Integer, Self::Float) | (Self::Float, Self::Integer) => Self::Float,
            _ => Self::Mixed,
        }
    }
}

/// Probe the kind of the non-null cells.
pub fn infer_value_kind(values: &[Value]) -> ValueKind {
    values
        .iter()
        .map(ValueKind::of)
        .fold(ValueKind::Empty, ValueKind::merge)
}

pub(crate) fn classify(column: &Column, divisor: f64) -> bool {
    if column.data_type == DataType::Categorical {
        return true;
    }
    let distinct = column.distinct_non_null().len();
    if distinct > 0 && (distinct as f64) < column.len() as f64 / divisor {
        return true;
    }
    infer_value_kind(&column.values).is_category_like()
}
