//! Prediction column attachment and CSV re-export.

use std::fs::File;
use std::path::{Path, PathBuf};

use polars::prelude::{CsvWriter, DataFrame, NamedFrom, SerWriter, Series};
use tracing::info;

use crate::format::round_price;

/// Column appended to the batch output, one value per input row.
pub const PREDICTED_PRICE_COLUMN: &str = "Predicted_Price";

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("prediction count {predictions} does not match row count {rows}")]
    LengthMismatch { predictions: usize, rows: usize },
    #[error("failed to attach predictions: {message}")]
    Attach { message: String },
    #[error("failed to write csv {path}: {message}")]
    Csv { path: PathBuf, message: String },
}

/// Appends `Predicted_Price` (rounded to two decimals) to the original,
/// unreduced table, preserving every input column and row order.
pub fn attach_predictions(
    original: &DataFrame,
    predictions: &[f64],
) -> Result<DataFrame, OutputError> {
    if predictions.len() != original.height() {
        return Err(OutputError::LengthMismatch {
            predictions: predictions.len(),
            rows: original.height(),
        });
    }
    let rounded: Vec<f64> = predictions.iter().copied().map(round_price).collect();
    let mut out = original.clone();
    out.with_column(Series::new(PREDICTED_PRICE_COLUMN.into(), rounded))
        .map_err(|e| OutputError::Attach {
            message: e.to_string(),
        })?;
    Ok(out)
}

/// Writes the table as UTF-8 CSV with a header row and no index column.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<(), OutputError> {
    let file = File::create(path).map_err(|e| OutputError::Csv {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    CsvWriter::new(file)
        .include_header(true)
        .finish(df)
        .map_err(|e| OutputError::Csv {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    info!(path = %path.display(), rows = df.height(), "wrote prediction csv");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{AnyValue, Column};

    fn original() -> DataFrame {
        DataFrame::new(vec![
            Column::new("Make".into(), ["Toyota", "Honda"]),
            Column::new("Listing_Id".into(), ["a-1", "a-2"]),
        ])
        .expect("frame")
    }

    #[test]
    fn attaches_rounded_predictions_in_row_order() {
        let out = attach_predictions(&original(), &[45231.5, 19999.999]).expect("attach");
        assert_eq!(out.height(), 2);
        // Non-feature columns survive into the output.
        assert!(out.column("Listing_Id").is_ok());
        let prices = out.column(PREDICTED_PRICE_COLUMN).expect("column");
        assert_eq!(prices.get(0).unwrap_or(AnyValue::Null), AnyValue::Float64(45231.5));
        assert_eq!(prices.get(1).unwrap_or(AnyValue::Null), AnyValue::Float64(20000.0));
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let error = attach_predictions(&original(), &[1.0]).expect_err("must reject");
        assert!(matches!(
            error,
            OutputError::LengthMismatch {
                predictions: 1,
                rows: 2
            }
        ));
    }

    #[test]
    fn csv_round_trip_keeps_header_and_rows() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.csv");
        let mut df = attach_predictions(&original(), &[45231.5, 20000.0]).expect("attach");
        write_csv(&mut df, &path).expect("write");
        let written = std::fs::read_to_string(&path).expect("read back");
        let mut lines = written.lines();
        assert_eq!(
            lines.next(),
            Some("Make,Listing_Id,Predicted_Price"),
            "header row, no index column"
        );
        assert_eq!(lines.clone().count(), 2);
        assert!(lines.next().unwrap_or_default().starts_with("Toyota,a-1,"));
    }
}
