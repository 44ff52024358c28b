//! Plain-text reports for human inspection.

use comfy_table::presets::NOTHING;
use comfy_table::{Cell, CellAlignment, Table};

use crate::inference::{TypeInferences, Verdict};
use crate::types::DataSet;

/// Token rendered for an attribute without a value.
pub const MISSING: &str = "N/A";

fn plain_table() -> Table {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    table
}

/// Render verdicts as a fixed-width table: one row per column, one column per verdict
/// attribute in alphabetical order. Attributes without a value render as [`MISSING`].
///
/// ```
/// use rust_type_inference::inference::{infer_types, InferenceOptions};
/// use rust_type_inference::report::render_verdicts;
/// use rust_type_inference::types::{Column, DataSet};
///
/// let ds = DataSet::new(vec![Column::from_text("x", [Some("a"), Some("b")])]).unwrap();
/// let table = render_verdicts(&infer_types(&ds, &InferenceOptions::default()));
/// assert!(table.contains("N/A"));
/// ```
pub fn render_verdicts(inferences: &TypeInferences) -> String {
    let mut table = plain_table();
    let mut header = vec![Cell::new("column")];
    header.extend(Verdict::default().attributes().into_keys().map(Cell::new));
    table.set_header(header);

    for (name, verdict) in inferences.iter() {
        let mut row = vec![Cell::new(name)];
        row.extend(
            verdict
                .attributes()
                .into_values()
                .map(|value| Cell::new(value.as_deref().unwrap_or(MISSING))),
        );
        table.add_row(row);
    }
    table.to_string()
}

/// Render the first `limit` rows of `dataset`, with each header showing `name (dtype)`.
/// Null cells render as [`MISSING`].
pub fn render_preview(dataset: &DataSet, limit: usize) -> String {
    let mut table = plain_table();
    table.set_header(
        dataset
            .dtypes()
            .into_iter()
            .map(|(name, dtype)| Cell::new(format!("{name} ({dtype})"))),
    );

    for idx in 0..dataset.row_count().min(limit) {
        let Some(row) = dataset.row(idx) else { break };
        table.add_row(row.into_iter().map(|value| {
            let cell = if value.is_null() {
                Cell::new(MISSING)
            } else {
                Cell::new(value)
            };
            if value.as_str().is_some() {
                cell
            } else {
                cell.set_alignment(CellAlignment::Right)
            }
        }));
    }
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::{render_preview, render_verdicts};
    use crate::inference::{infer_types, InferenceOptions, InferredDataSet};
    use crate::types::{Column, DataSet};

    fn sample() -> DataSet {
        DataSet::new(vec![
            Column::from_text("amount", [Some("1.5"), Some("2"), None]),
            Column::from_text("label", [Some("x"), Some("y"), Some("z")]),
        ])
        .unwrap()
    }

    #[test]
    fn verdict_table_orders_attributes_alphabetically() {
        let out = render_verdicts(&infer_types(&sample(), &InferenceOptions::default()));
        let header = out.lines().next().unwrap();
        let positions: Vec<usize> = ["column", "boolean", "categorical", "datetime", "numeric"]
            .iter()
            .map(|h| header.find(h).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn verdict_table_marks_missing_attributes() {
        let out = render_verdicts(&infer_types(&sample(), &InferenceOptions::default()));
        let amount = out.lines().find(|l| l.contains("amount")).unwrap();
        assert!(amount.contains("numeric(float64)"));
        assert!(amount.contains("N/A"));
        let label = out.lines().find(|l| l.contains("label")).unwrap();
        assert_eq!(label.matches("N/A").count(), 2);
    }

    #[test]
    fn preview_shows_dtypes_and_nulls() {
        let out = InferredDataSet::new(sample(), &InferenceOptions::default()).unwrap();
        let text = render_preview(out.dataset(), 10);
        assert!(text.contains("amount (float64)"));
        assert!(text.contains("label (utf8)"));
        assert!(text.contains("N/A"));
        assert!(text.contains("1.5"));
    }

    #[test]
    fn preview_respects_limit() {
        let text = render_preview(&sample(), 1);
        assert!(text.contains('x'));
        assert!(!text.contains('y'));
    }
}
