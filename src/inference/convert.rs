//! Column conversion.
//!
//! Conversion re-parses cells with the parser the classifier used. Numeric and duration
//! columns use that parser alone. Date and datetime columns try the classified rule first,
//! then fall back to the other accepted date shapes, so a column mixing timestamps with
//! date-only text keeps every cell. Cells that do not parse become [`Value::Null`]. Cells already
//! in the target representation are kept as they are, which makes conversion idempotent.

use serde::Serialize;

use crate::types::{Column, DataSet, DataType, Value};

use super::boolean::parse_boolean_token;
use super::datetime::{parse_date_lenient, parse_datetime_lenient, parse_duration};
use super::numeric::parse_number;
use super::verdict::{ParseRule, Representation};
use super::TypeInferences;

/// What converting one column did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionStats {
    /// Column name.
    pub column: String,
    /// Tag before conversion.
    pub from: DataType,
    /// Tag after conversion.
    pub to: DataType,
    /// Non-null cells that failed to parse and became null.
    pub nulled: usize,
}

/// Convert one cell with `rule`.
pub fn convert_value(rule: ParseRule, value: &Value) -> Value {
    match (rule, value) {
        (_, Value::Null) => Value::Null,
        (ParseRule::Native(_), v) => v.clone(),
        (ParseRule::Numeric(width), v) => parse_number(v).map_or(Value::Null, |n| width.store(n)),
        (ParseRule::GenericDatetime, Value::Datetime(dt)) => Value::Datetime(*dt),
        (ParseRule::GenericDatetime, Value::Utf8(s)) => {
            parse_datetime_lenient(s).map_or(Value::Null, Value::Datetime)
        }
        (ParseRule::Date(_), Value::Date(d)) => Value::Date(*d),
        (ParseRule::Date(format), Value::Utf8(s)) => {
            parse_date_lenient(format, s).map_or(Value::Null, Value::Date)
        }
        (ParseRule::Duration, Value::Duration(d)) => Value::Duration(*d),
        (ParseRule::Duration, Value::Utf8(s)) => parse_duration(s).map_or(Value::Null, Value::Duration),
        _ => Value::Null,
    }
}

fn convert_boolean(value: &Value) -> Value {
    match value {
        Value::Bool(b) => Value::Bool(*b),
        Value::Utf8(s) => parse_boolean_token(s).map_or(Value::Null, Value::Bool),
        _ => Value::Null,
    }
}

/// Convert a column to `representation`.
pub fn convert_column(column: &Column, representation: Representation) -> (Column, ConversionStats) {
    let (data_type, values) = match representation {
        Representation::Parsed(rule) => (
            rule.data_type(),
            column.values.iter().map(|v| convert_value(rule, v)).collect(),
        ),
        Representation::Boolean => (
            DataType::Bool,
            column.values.iter().map(convert_boolean).collect(),
        ),
        Representation::Categorical => (DataType::Categorical, column.values.clone()),
        Representation::Original => (column.data_type, column.values.clone()),
    };

    let converted = Column::new(column.name.clone(), data_type, values);
    let stats = ConversionStats {
        column: column.name.clone(),
        from: column.data_type,
        to: converted.data_type,
        nulled: converted.null_count().saturating_sub(column.null_count()),
    };
    if stats.from != stats.to {
        tracing::info!(column = %stats.column, from = %stats.from, to = %stats.to, "converted column");
    }
    if stats.nulled > 0 {
        tracing::warn!(column = %stats.column, nulled = stats.nulled, "unparseable cells became null");
    }
    (converted, stats)
}

/// Result of [`convert_dataset`].
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    /// The converted dataset.
    pub dataset: DataSet,
    /// One entry per column, in column order.
    pub stats: Vec<ConversionStats>,
}

/// Convert every column of `dataset` to the representation its verdict selects.
///
/// Columns without a verdict in `inferences` are copied unchanged. The input is not modified.
pub fn convert_dataset(dataset: &DataSet, inferences: &TypeInferences, prefer_boolean: bool) -> Conversion {
    let (columns, stats): (Vec<Column>, Vec<ConversionStats>) = dataset
        .columns()
        .iter()
        .map(|column| {
            let representation = inferences
                .get(&column.name)
                .map_or(Representation::Original, |v| v.representation(prefer_boolean));
            convert_column(column, representation)
        })
        .unzip();

    Conversion {
        dataset: DataSet::from_checked_columns(columns),
        stats,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{convert_column, convert_value};
    use crate::inference::datetime::DateFormat;
    use crate::inference::numeric::NumericWidth;
    use crate::inference::verdict::{ParseRule, Representation};
    use crate::types::{Column, DataType, Value};

    #[test]
    fn numeric_conversion_nulls_unparseable_cells() {
        let col = Column::from_text("n", [Some("1"), Some("x"), None, Some("3")]);
        let (out, stats) =
            convert_column(&col, Representation::Parsed(ParseRule::Numeric(NumericWidth::Int8)));
        assert_eq!(out.data_type, DataType::Int8);
        assert_eq!(
            out.values,
            vec![Value::Int64(1), Value::Null, Value::Null, Value::Int64(3)]
        );
        assert_eq!(stats.nulled, 1);
    }

    #[test]
    fn integers_in_a_float_column_are_widened() {
        let rule = ParseRule::Numeric(NumericWidth::Float64);
        assert_eq!(convert_value(rule, &Value::Utf8("2".into())), Value::Float64(2.0));
        assert_eq!(convert_value(rule, &Value::Utf8("2.5".into())), Value::Float64(2.5));
    }

    #[test]
    fn date_conversion_uses_the_classified_format() {
        let v = Value::Utf8("03/04/2024".into());
        assert_eq!(
            convert_value(ParseRule::Date(DateFormat::DayFirst), &v),
            Value::Date(NaiveDate::from_ymd_opt(2024, 4, 3).unwrap())
        );
        assert_eq!(
            convert_value(ParseRule::Date(DateFormat::MonthFirst), &v),
            Value::Date(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap())
        );
    }

    #[test]
    fn datetime_conversion_keeps_date_only_cells() {
        let col = Column::from_text("d", [Some("2024-01-05 10:30:00"), Some("2024-01-06")]);
        let (out, stats) = convert_column(&col, Representation::Parsed(ParseRule::GenericDatetime));
        let at = |d: u32, h: u32, m: u32| {
            NaiveDate::from_ymd_opt(2024, 1, d)
                .and_then(|date| date.and_hms_opt(h, m, 0))
                .map(Value::Datetime)
                .unwrap()
        };
        assert_eq!(out.values, vec![at(5, 10, 30), at(6, 0, 0)]);
        assert_eq!(stats.nulled, 0);
    }

    #[test]
    fn date_conversion_falls_back_to_other_formats() {
        let col = Column::from_text("d", [Some("03/04/2024"), Some("12/25/2024"), Some("2024-05-01")]);
        let (out, stats) = convert_column(&col, Representation::Parsed(ParseRule::Date(DateFormat::DayFirst)));
        let date = |m: u32, d: u32| Value::Date(NaiveDate::from_ymd_opt(2024, m, d).unwrap());
        assert_eq!(out.values, vec![date(4, 3), date(12, 25), date(5, 1)]);
        assert_eq!(stats.nulled, 0);
    }

    #[test]
    fn categorical_conversion_keeps_cells() {
        let col = Column::from_text("c", [Some("a"), Some("b"), None]);
        let (out, stats) = convert_column(&col, Representation::Categorical);
        assert_eq!(out.data_type, DataType::Categorical);
        assert_eq!(out.values, col.values);
        assert_eq!(stats.nulled, 0);
    }

    #[test]
    fn boolean_conversion_parses_tokens() {
        let col = Column::from_text("b", [Some("Yes"), Some("no"), Some("maybe")]);
        let (out, stats) = convert_column(&col, Representation::Boolean);
        assert_eq!(out.data_type, DataType::Bool);
        assert_eq!(
            out.values,
            vec![Value::Bool(true), Value::Bool(false), Value::Null]
        );
        assert_eq!(stats.nulled, 1);
    }

    #[test]
    fn converting_twice_is_a_no_op() {
        let col = Column::from_text("d", [Some("10s"), Some("oops"), Some("1h")]);
        let rep = Representation::Parsed(ParseRule::Duration);
        let (once, _) = convert_column(&col, rep);
        let (twice, stats) = convert_column(&once, rep);
        assert_eq!(once, twice);
        assert_eq!(stats.nulled, 0);
    }
}
