//! Unified loading entrypoint.
//!
//! Most callers should use [`load_from_path`], which reads a delimited text file into a raw
//! [`crate::types::DataSet`] (every column tagged [`crate::types::DataType::Utf8`]).
//!
//! - If [`LoadOptions::format`] is `None`, the format (and so the delimiter) is inferred from
//!   the file extension.
//! - If an [`super::observability::LoadObserver`] is provided, success/failure/alerts are
//!   reported to it.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::{InferenceError, InferenceResult};
use crate::types::DataSet;

use super::csv::{self, CsvOptions};
use super::observability::{LoadContext, LoadObserver, LoadSeverity, LoadStats};

/// Supported delimited text flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimitedFormat {
    /// Comma-separated values.
    Csv,
    /// Tab-separated values.
    Tsv,
    /// Pipe-separated values.
    Psv,
}

impl DelimitedFormat {
    /// Parse a format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" | "txt" => Some(Self::Csv),
            "tsv" | "tab" => Some(Self::Tsv),
            "psv" => Some(Self::Psv),
            _ => None,
        }
    }

    /// Default field delimiter for this format.
    pub fn delimiter(self) -> u8 {
        match self {
            Self::Csv => b',',
            Self::Tsv => b'\t',
            Self::Psv => b'|',
        }
    }
}

/// Options controlling [`load_from_path`].
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct LoadOptions {
    /// If `None`, auto-detect format from file extension.
    pub format: Option<DelimitedFormat>,
    /// Overrides the format's default delimiter.
    pub delimiter: Option<u8>,
    /// Trim surrounding whitespace from headers and cells.
    pub trim: bool,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn LoadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("format", &self.format)
            .field("delimiter", &self.delimiter.map(char::from))
            .field("trim", &self.trim)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            format: None,
            delimiter: None,
            trim: true,
            observer: None,
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}

impl LoadOptions {
    /// Resolve the format for `path`: the explicit one, else the extension's, else CSV when
    /// an explicit delimiter makes the extension irrelevant.
    pub fn resolve_format(&self, path: &Path) -> InferenceResult<DelimitedFormat> {
        match (self.format, self.delimiter) {
            (Some(f), _) => Ok(f),
            (None, Some(_)) => Ok(infer_format_from_path(path).unwrap_or(DelimitedFormat::Csv)),
            (None, None) => infer_format_from_path(path),
        }
    }

    fn csv_options(&self, format: DelimitedFormat) -> CsvOptions {
        CsvOptions {
            delimiter: self.delimiter.unwrap_or_else(|| format.delimiter()),
            trim: self.trim,
        }
    }
}

/// Load a delimited text file into a raw [`DataSet`].
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row/column counts
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```no_run
/// use rust_type_inference::ingestion::{load_from_path, LoadOptions};
///
/// # fn main() -> Result<(), rust_type_inference::InferenceError> {
/// // Uses `.tsv` to select a tab delimiter.
/// let ds = load_from_path("measurements.tsv", &LoadOptions::default())?;
/// println!("rows={} columns={}", ds.row_count(), ds.column_count());
/// # Ok(())
/// # }
/// ```
pub fn load_from_path(path: impl AsRef<Path>, options: &LoadOptions) -> InferenceResult<DataSet> {
    let path = path.as_ref();
    let format = options.resolve_format(path)?;
    let ctx = LoadContext {
        path: path.to_path_buf(),
        format,
    };

    let result = csv::load_csv_from_path(path, &options.csv_options(format));

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(ds) => obs.on_success(
                &ctx,
                LoadStats {
                    rows: ds.row_count(),
                    columns: ds.column_count(),
                },
            ),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

fn severity_for_error(e: &InferenceError) -> LoadSeverity {
    match e {
        InferenceError::Io(_) => LoadSeverity::Critical,
        InferenceError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => LoadSeverity::Critical,
            _ => LoadSeverity::Error,
        },
        InferenceError::Json(_)
        | InferenceError::SchemaMismatch { .. }
        | InferenceError::InvalidOptions { .. } => LoadSeverity::Error,
    }
}

fn infer_format_from_path(path: &Path) -> InferenceResult<DelimitedFormat> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| InferenceError::SchemaMismatch {
            message: format!(
                "cannot infer format: path has no extension ({})",
                path.display()
            ),
        })?;

    DelimitedFormat::from_extension(ext).ok_or_else(|| InferenceError::SchemaMismatch {
        message: format!(
            "cannot infer format from extension '{ext}' for path ({})",
            path.display()
        ),
    })
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{DelimitedFormat, LoadOptions};

    #[test]
    fn format_from_extension_is_case_insensitive() {
        assert_eq!(DelimitedFormat::from_extension("CSV"), Some(DelimitedFormat::Csv));
        assert_eq!(DelimitedFormat::from_extension("tab"), Some(DelimitedFormat::Tsv));
        assert_eq!(DelimitedFormat::from_extension("psv"), Some(DelimitedFormat::Psv));
        assert_eq!(DelimitedFormat::from_extension("parquet"), None);
    }

    #[test]
    fn explicit_delimiter_allows_unknown_extension() {
        let opts = LoadOptions {
            delimiter: Some(b';'),
            ..Default::default()
        };
        assert_eq!(
            opts.resolve_format(Path::new("export.dat")).unwrap(),
            DelimitedFormat::Csv
        );
        assert_eq!(opts.csv_options(DelimitedFormat::Csv).delimiter, b';');
    }

    #[test]
    fn unknown_extension_without_delimiter_is_rejected() {
        let err = LoadOptions::default()
            .resolve_format(Path::new("export.dat"))
            .unwrap_err();
        assert!(err.to_string().contains("cannot infer format from extension 'dat'"));
    }
}
