//! Loading entrypoints and implementations.
//!
//! Most callers should use [`load_from_path`] (from [`unified`]) which:
//!
//! - auto-detects the delimiter by file extension (or you can override via [`LoadOptions`])
//! - loads every column as raw text into an in-memory [`crate::types::DataSet`]
//! - optionally reports success/failure/alerts to a [`LoadObserver`]

pub mod csv;
pub mod observability;
pub mod unified;

pub use csv::CsvOptions;
pub use observability::{
    CompositeObserver, FileObserver, LoadContext, LoadObserver, LoadSeverity, LoadStats, TracingObserver,
};
pub use unified::{load_from_path, DelimitedFormat, LoadOptions};
