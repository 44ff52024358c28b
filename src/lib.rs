//! `rust-type-inference` loads delimited text into an in-memory [`types::DataSet`] without a
//! declared schema, infers the semantic type of every column from its cells, and converts
//! each column to match.
//!
//! The primary entrypoint is [`inference::InferredDataSet::from_path`], which loads a file
//! (auto-detecting the delimiter from the extension, see [`ingestion::LoadOptions`]), infers
//! one [`inference::Verdict`] per column and converts the dataset.
//!
//! ## What gets inferred
//!
//! Four independent classifiers run on each column:
//!
//! - **numeric**: integer or float text, stored at the narrowest width
//!   ([`types::DataType::Int8`] … [`types::DataType::Int64`], else
//!   [`types::DataType::Float64`]). A share of unparseable cells is tolerated; the tolerance
//!   is [`inference::threshold::logarithmic_threshold`] of the row count.
//! - **datetime**: timestamps, then `YYYY-MM-DD`, `DD/MM/YYYY`, `MM/DD/YYYY` (in that
//!   order), then durations such as `1h30m` or `02:03:04`.
//! - **categorical**: fewer distinct values than `rows / 1.1`.
//! - **boolean**: exactly two distinct values from true/false/yes/no (any case).
//!
//! The first of numeric → datetime → categorical that applies decides the conversion. The
//! boolean verdict is informational unless [`inference::InferenceOptions::prefer_boolean`] is
//! set. Cells that do not parse become [`types::Value::Null`]; inference never fails.
//!
//! ## Quick example
//!
//! ```no_run
//! use rust_type_inference::inference::{InferenceOptions, InferredDataSet};
//! use rust_type_inference::ingestion::LoadOptions;
//! use rust_type_inference::report::render_verdicts;
//!
//! # fn main() -> Result<(), rust_type_inference::InferenceError> {
//! let out = InferredDataSet::from_path(
//!     "sample_data.csv",
//!     &LoadOptions::default(),
//!     &InferenceOptions::default(),
//! )?;
//! println!("{}", render_verdicts(out.inferences()));
//! println!("{:?}", out.dataset().dtypes());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: delimited text loading and load observers
//! - [`inference`]: classifiers, precedence and conversion
//! - [`report`]: fixed-width verdict and preview tables
//! - [`types`]: in-memory dataset types
//! - [`error`]: error type for loading and option validation

pub mod error;
pub mod inference;
pub mod ingestion;
pub mod report;
pub mod types;

pub use error::{InferenceError, InferenceResult};
