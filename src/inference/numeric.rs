//! Numeric classifier and the number parser shared with conversion.

use std::fmt;

use crate::types::{Column, DataType, Value};

use super::threshold::logarithmic_threshold;
use super::verdict::ParseRule;
use super::Inconclusive;

/// Storage width chosen for a numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NumericWidth {
    /// Every value fits in `i8`.
    Int8,
    /// Every value fits in `i16`.
    Int16,
    /// Every value fits in `i32`.
    Int32,
    /// Every value fits in `i64`.
    Int64,
    /// At least one value is not an integer.
    Float64,
}

impl NumericWidth {
    /// Narrowest integer width holding both `min` and `max`.
    pub fn for_int_range(min: i64, max: i64) -> Self {
        let fits = |lo: i64, hi: i64| min >= lo && max <= hi;
        if fits(i8::MIN.into(), i8::MAX.into()) {
            Self::Int8
        } else if fits(i16::MIN.into(), i16::MAX.into()) {
            Self::Int16
        } else if fits(i32::MIN.into(), i32::MAX.into()) {
            Self::Int32
        } else {
            Self::Int64
        }
    }

    /// Width matching an already-numeric column tag.
    pub fn from_data_type(data_type: DataType) -> Option<Self> {
        match data_type {
            DataType::Int8 => Some(Self::Int8),
            DataType::Int16 => Some(Self::Int16),
            DataType::Int32 => Some(Self::Int32),
            DataType::Int64 => Some(Self::Int64),
            DataType::Float64 => Some(Self::Float64),
            _ => None,
        }
    }

    /// Column tag for this width.
    pub fn data_type(self) -> DataType {
        match self {
            Self::Int8 => DataType::Int8,
            Self::Int16 => DataType::Int16,
            Self::Int32 => DataType::Int32,
            Self::Int64 => DataType::Int64,
            Self::Float64 => DataType::Float64,
        }
    }

    /// Store a parsed number at this width. Integer widths take integral floats as integers;
    /// a fractional float has no integer representation and is stored as null.
    pub(crate) fn store(self, number: Number) -> Value {
        match (self, number) {
            (Self::Float64, Number::Int(i)) => Value::Float64(i as f64),
            (Self::Float64, Number::Float(f)) => Value::Float64(f),
            (_, Number::Int(i)) => Value::Int64(i),
            (_, Number::Float(f)) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                Value::Int64(f as i64)
            }
            (_, Number::Float(_)) => Value::Null,
        }
    }
}

impl fmt::Display for NumericWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.data_type().as_str())
    }
}

/// A successfully parsed number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Integral text that fits in `i64`.
    Int(i64),
    /// Any other finite number.
    Float(f64),
}

/// Parse number text. Integers first, then finite floats (`1.5`, `-2e3`, `.5`).
/// `NaN` and infinities are not numbers here.
pub fn parse_number_str(s: &str) -> Option<Number> {
    let s = s.trim();
    if let Ok(i) = s.parse::<i64>() {
        return Some(Number::Int(i));
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() => Some(Number::Float(f)),
        _ => None,
    }
}

/// Parse a cell as a number. Already-numeric cells parse to themselves.
pub fn parse_number(value: &Value) -> Option<Number> {
    match value {
        Value::Int64(i) => Some(Number::Int(*i)),
        Value::Float64(f) if f.is_finite() => Some(Number::Float(*f)),
        Value::Utf8(s) => parse_number_str(s),
        _ => None,
    }
}

#[derive(Debug, Default)]
struct NumericScan {
    parsed: usize,
    unparseable: usize,
    any_float: bool,
    min: i64,
    max: i64,
}

impl NumericScan {
    fn push(&mut self, number: Number) {
        match number {
            Number::Int(i) => {
                if self.parsed == 0 || i < self.min {
                    self.min = i;
                }
                if self.parsed == 0 || i > self.max {
                    self.max = i;
                }
            }
            Number::Float(_) => self.any_float = true,
        }
        self.parsed += 1;
    }

    fn width(&self) -> NumericWidth {
        if self.any_float {
            NumericWidth::Float64
        } else {
            NumericWidth::for_int_range(self.min, self.max)
        }
    }
}

/// Classify a column as numeric.
///
/// Nulls are not counted as failures. The column is numeric when at least one value parses
/// and `unparseable / rows` is within [`logarithmic_threshold`]. Columns of one row (or
/// none) have no threshold, so every non-null value must parse.
pub(crate) fn classify(column: &Column, multiplier: f64) -> Result<Option<ParseRule>, Inconclusive> {
    match column.data_type {
        t if t.is_numeric() => return Ok(NumericWidth::from_data_type(t).map(ParseRule::Numeric)),
        DataType::Utf8 | DataType::Categorical => {}
        found => {
            return Err(Inconclusive::TypeMismatch {
                classifier: "numeric",
                found,
            });
        }
    }

    let mut scan = NumericScan::default();
    for value in column.non_null() {
        match parse_number(value) {
            Some(number) => scan.push(number),
            None => scan.unparseable += 1,
        }
    }
    if scan.parsed == 0 {
        return Ok(None);
    }

    let rows = column.len();
    let accepted = match logarithmic_threshold(rows, multiplier) {
        Some(threshold) => scan.unparseable as f64 / rows as f64 <= threshold,
        None => scan.unparseable == 0,
    };
    Ok(accepted.then(|| ParseRule::Numeric(scan.width())))
}
