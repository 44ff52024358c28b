//! Per-column classification outcomes.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::types::DataType;

use super::datetime::DateFormat;
use super::numeric::NumericWidth;

/// The parsing strategy that interpreted a column's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseRule {
    /// Integer or floating point text, stored at the narrowest width holding every value.
    Numeric(NumericWidth),
    /// Timestamps with a time component (RFC 3339, RFC 2822, ISO-like date + time).
    GenericDatetime,
    /// Calendar dates in one explicit format.
    Date(DateFormat),
    /// Elapsed time quantities.
    Duration,
    /// The column was already tagged with this temporal type when loaded.
    Native(DataType),
}

impl ParseRule {
    /// Representation tag a column takes after conversion with this rule.
    pub fn data_type(self) -> DataType {
        match self {
            Self::Numeric(width) => width.data_type(),
            Self::GenericDatetime => DataType::Datetime,
            Self::Date(_) => DataType::Date,
            Self::Duration => DataType::Duration,
            Self::Native(t) => t,
        }
    }
}

impl fmt::Display for ParseRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(width) => write!(f, "numeric({width})"),
            Self::GenericDatetime => f.write_str("datetime"),
            Self::Date(format) => write!(f, "date({})", format.label()),
            Self::Duration => f.write_str("duration"),
            Self::Native(t) => write!(f, "native({t})"),
        }
    }
}

impl Serialize for ParseRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Classification outcomes for one column. Each field is decided independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Verdict {
    /// Set when the numeric classifier accepted the column.
    pub numeric: Option<ParseRule>,
    /// Set when the datetime classifier found a date, datetime or duration rule.
    pub datetime: Option<ParseRule>,
    /// Low cardinality, already categorical, or a category-like value kind.
    pub categorical: bool,
    /// Exactly two distinct values drawn from true/false/yes/no.
    pub boolean: bool,
}

/// The single representation a column is converted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    /// Re-parse every cell with this rule.
    Parsed(ParseRule),
    /// Re-parse every cell as a true/false/yes/no token.
    Boolean,
    /// Re-tag as categorical; cells are unchanged.
    Categorical,
    /// Keep the column as loaded.
    Original,
}

impl Verdict {
    /// Pick the representation: numeric, then datetime/duration, then categorical, else the
    /// original. With `prefer_boolean`, a boolean verdict wins over all of them.
    pub fn representation(&self, prefer_boolean: bool) -> Representation {
        if prefer_boolean && self.boolean {
            return Representation::Boolean;
        }
        if let Some(rule) = self.numeric {
            return Representation::Parsed(rule);
        }
        if let Some(rule) = self.datetime {
            return Representation::Parsed(rule);
        }
        if self.categorical {
            return Representation::Categorical;
        }
        Representation::Original
    }

    /// Attribute name → rendered value, ordered alphabetically by attribute name.
    /// `None` marks an attribute with no value.
    pub fn attributes(&self) -> BTreeMap<&'static str, Option<String>> {
        BTreeMap::from([
            ("boolean", Some(self.boolean.to_string())),
            ("categorical", Some(self.categorical.to_string())),
            ("datetime", self.datetime.map(|r| r.to_string())),
            ("numeric", self.numeric.map(|r| r.to_string())),
        ])
    }
}
