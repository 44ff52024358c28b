//! Column type inference and conversion.
//!
//! Every column is inspected by four independent, read-only classifiers:
//!
//! - [`numeric`]: integer/float text, tolerating a row-count dependent share of noise
//!   ([`threshold::logarithmic_threshold`])
//! - [`datetime`]: timestamps, explicit date formats (`YYYY-MM-DD`, `DD/MM/YYYY`,
//!   `MM/DD/YYYY`, in that order) and durations
//! - [`categorical`]: low cardinality or an already-categorical column
//! - [`boolean`]: exactly two distinct values from true/false/yes/no
//!
//! Their outcomes form one [`Verdict`] per column. [`Verdict::representation`] picks the
//! column's final representation (numeric, then datetime/duration, then categorical, else
//! unchanged) and [`convert::convert_dataset`] produces a new, converted [`DataSet`].
//!
//! ## Example
//!
//! ```rust
//! use rust_type_inference::inference::{InferenceOptions, InferredDataSet};
//! use rust_type_inference::types::{Column, DataSet, DataType, Value};
//!
//! let raw = DataSet::new(vec![
//!     Column::from_text("id", [Some("1"), Some("2"), Some("3")]),
//!     Column::from_text("joined", [Some("2024-01-05"), Some("2024-02-10"), None]),
//! ])?;
//!
//! let out = InferredDataSet::new(raw, &InferenceOptions::default())?;
//! let dtypes = out.dataset().dtypes();
//! assert_eq!(dtypes, vec![("id", DataType::Int8), ("joined", DataType::Date)]);
//! assert_eq!(out.dataset().columns()[0].values[2], Value::Int64(3));
//! # Ok::<(), rust_type_inference::InferenceError>(())
//! ```

pub mod boolean;
pub mod categorical;
pub mod convert;
pub mod datetime;
pub mod numeric;
pub mod options;
pub mod threshold;
pub mod verdict;

use std::path::Path;

use rayon::prelude::*;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::InferenceResult;
use crate::ingestion::{load_from_path, LoadContext, LoadOptions};
use crate::types::{Column, DataSet, DataType};

pub use convert::{convert_column, convert_dataset, Conversion, ConversionStats};
pub use datetime::DateFormat;
pub use numeric::NumericWidth;
pub use options::InferenceOptions;
pub use verdict::{ParseRule, Representation, Verdict};

/// Why a classifier could not reach a verdict. Always settles to a negative verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Inconclusive {
    /// The classifier does not apply to columns with this tag.
    TypeMismatch {
        classifier: &'static str,
        found: DataType,
    },
}

fn settle<T: Default>(column: &str, outcome: Result<T, Inconclusive>) -> T {
    outcome.unwrap_or_else(|reason| {
        let Inconclusive::TypeMismatch { classifier, found } = reason;
        tracing::debug!(column, classifier, %found, "classifier does not apply; treating as negative");
        T::default()
    })
}

/// Run every classifier over `column`.
pub fn infer_column(column: &Column, options: &InferenceOptions) -> Verdict {
    let verdict = Verdict {
        numeric: settle(
            &column.name,
            numeric::classify(column, options.threshold_multiplier),
        ),
        datetime: settle(&column.name, datetime::classify(column)),
        categorical: categorical::classify(column, options.categorical_divisor),
        boolean: boolean::classify(column),
    };
    tracing::debug!(
        column = %column.name,
        numeric = ?verdict.numeric,
        datetime = ?verdict.datetime,
        categorical = verdict.categorical,
        boolean = verdict.boolean,
        "classified column"
    );
    verdict
}

/// Verdicts keyed by column name, in the dataset's column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeInferences {
    entries: Vec<(String, Verdict)>,
}

impl TypeInferences {
    /// Verdict for `column`, if it was inferred.
    pub fn get(&self, column: &str) -> Option<&Verdict> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, verdict)| verdict)
    }

    /// Iterate `(column name, verdict)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Verdict)> {
        self.entries.iter().map(|(name, v)| (name.as_str(), v))
    }

    /// Number of columns with a verdict.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no verdicts.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render as a JSON object `{ column: verdict, ... }` in column order.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Serialize for TypeInferences {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, verdict) in &self.entries {
            map.serialize_entry(name, verdict)?;
        }
        map.end()
    }
}

/// Infer a [`Verdict`] for every column of `dataset`.
///
/// Classifiers only read the dataset, so with [`InferenceOptions::parallel`] columns are
/// classified on the rayon pool; results are identical either way.
pub fn infer_types(dataset: &DataSet, options: &InferenceOptions) -> TypeInferences {
    let verdicts: Vec<Verdict> = if options.parallel {
        dataset
            .columns()
            .par_iter()
            .map(|c| infer_column(c, options))
            .collect()
    } else {
        dataset
            .columns()
            .iter()
            .map(|c| infer_column(c, options))
            .collect()
    };

    TypeInferences {
        entries: dataset
            .column_names()
            .map(str::to_owned)
            .zip(verdicts)
            .collect(),
    }
}

/// A dataset after inference and conversion, with the raw snapshot it was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct InferredDataSet {
    raw: DataSet,
    dataset: DataSet,
    inferences: TypeInferences,
    conversion: Vec<ConversionStats>,
}

impl InferredDataSet {
    /// Infer verdicts for `raw` and convert it.
    ///
    /// Fails only if `options` are invalid.
    pub fn new(raw: DataSet, options: &InferenceOptions) -> InferenceResult<Self> {
        options.validate()?;
        let inferences = infer_types(&raw, options);
        let Conversion { dataset, stats } = convert_dataset(&raw, &inferences, options.prefer_boolean);
        Ok(Self {
            raw,
            dataset,
            inferences,
            conversion: stats,
        })
    }

    /// Load a delimited text file, then infer and convert it.
    ///
    /// Load outcomes are reported to `load.observer`; columns where conversion nulled cells
    /// are reported through [`crate::ingestion::LoadObserver::on_cells_nulled`].
    ///
    /// ```no_run
    /// use rust_type_inference::inference::{InferenceOptions, InferredDataSet};
    /// use rust_type_inference::ingestion::LoadOptions;
    ///
    /// # fn main() -> Result<(), rust_type_inference::InferenceError> {
    /// let out = InferredDataSet::from_path(
    ///     "sample_data.csv",
    ///     &LoadOptions::default(),
    ///     &InferenceOptions::default(),
    /// )?;
    /// for (name, dtype) in out.dataset().dtypes() {
    ///     println!("{name}: {dtype}");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_path(
        path: impl AsRef<Path>,
        load: &LoadOptions,
        options: &InferenceOptions,
    ) -> InferenceResult<Self> {
        let path = path.as_ref();
        options.validate()?;
        let raw = load_from_path(path, load)?;
        let out = Self::new(raw, options)?;

        if let Some(obs) = load.observer.as_ref() {
            let ctx = LoadContext {
                path: path.to_path_buf(),
                format: load.resolve_format(path)?,
            };
            for stats in out.conversion.iter().filter(|s| s.nulled > 0) {
                obs.on_cells_nulled(&ctx, &stats.column, stats.nulled);
            }
        }
        Ok(out)
    }

    /// The converted dataset.
    pub fn dataset(&self) -> &DataSet {
        &self.dataset
    }

    /// The dataset as loaded, before conversion.
    pub fn raw(&self) -> &DataSet {
        &self.raw
    }

    /// Verdicts per column.
    pub fn inferences(&self) -> &TypeInferences {
        &self.inferences
    }

    /// Conversion stats per column, in column order.
    pub fn conversion_stats(&self) -> &[ConversionStats] {
        &self.conversion
    }

    /// Split into the converted dataset and the verdicts.
    pub fn into_parts(self) -> (DataSet, TypeInferences) {
        (self.dataset, self.inferences)
    }
}

#[cfg(test)]
mod tests {
    use super::{infer_column, infer_types, InferenceOptions, ParseRule, TypeInferences};
    use crate::inference::datetime::DateFormat;
    use crate::inference::numeric::NumericWidth;
    use crate::types::{Column, DataSet, DataType, Value};

    fn sample() -> DataSet {
        DataSet::new(vec![
            Column::from_text("id", [Some("1"), Some("2"), Some("3"), Some("4")]),
            Column::from_text(
                "when",
                [Some("2024-01-05"), Some("2024-02-10"), None, Some("2024-03-15")],
            ),
            Column::from_text("ok", [Some("yes"), Some("no"), Some("yes"), Some("no")]),
        ])
        .unwrap()
    }

    #[test]
    fn verdicts_follow_column_order() {
        let inf = infer_types(&sample(), &InferenceOptions::default());
        let names: Vec<&str> = inf.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["id", "when", "ok"]);
        assert_eq!(inf.len(), 3);
    }

    #[test]
    fn parallel_and_sequential_agree() {
        let ds = sample();
        let par = infer_types(&ds, &InferenceOptions::default());
        let seq = infer_types(
            &ds,
            &InferenceOptions {
                parallel: false,
                ..Default::default()
            },
        );
        assert_eq!(par, seq);
    }

    #[test]
    fn mismatched_classifiers_settle_to_negative() {
        let col = Column::new("flag", DataType::Bool, vec![Value::Bool(true), Value::Bool(false)]);
        let v = infer_column(&col, &InferenceOptions::default());
        assert_eq!(v.numeric, None);
        assert_eq!(v.datetime, None);
        assert!(v.boolean);
    }

    #[test]
    fn json_keeps_column_order() {
        let inf = infer_types(&sample(), &InferenceOptions::default());
        let json = inf.to_json().unwrap();
        let id = json.find("\"id\"").unwrap();
        let when = json.find("\"when\"").unwrap();
        let ok = json.find("\"ok\"").unwrap();
        assert!(id < when && when < ok);
        assert!(json.contains("\"numeric\": \"numeric(int8)\""));
        assert!(json.contains("\"datetime\": \"date(YYYY-MM-DD)\""));
    }

    #[test]
    fn lookup_by_name() {
        let inf = infer_types(&sample(), &InferenceOptions::default());
        assert_eq!(
            inf.get("id").and_then(|v| v.numeric),
            Some(ParseRule::Numeric(NumericWidth::Int8))
        );
        assert_eq!(
            inf.get("when").and_then(|v| v.datetime),
            Some(ParseRule::Date(DateFormat::Iso))
        );
        assert!(inf.get("missing").is_none());
        assert!(TypeInferences::default().is_empty());
    }
}
