//! CSV loading for the reference dataset and batch input files.
//!
//! Both files share the same shape: UTF-8, comma-separated, one header row
//! with exact (case-sensitive) column names.

use std::path::{Path, PathBuf};

use polars::prelude::{CsvReadOptions, DataFrame, SerReader};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read csv {path}: {message}")]
    CsvParse { path: PathBuf, message: String },
}

/// Reads a CSV file with a single header row into a DataFrame.
///
/// Schema inference samples the first 100 rows; a column with mixed content
/// falls back to strings, which downstream cell conversion handles.
pub fn read_csv(path: &Path) -> Result<DataFrame, IngestError> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "read csv"
    );
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[test]
    fn reads_header_and_rows() {
        let file = temp_csv("Make,Year\nToyota,2015\nHonda,2018\n");
        let df = read_csv(file.path()).expect("read");
        assert_eq!(df.height(), 2);
        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, ["Make", "Year"]);
    }

    #[test]
    fn zero_row_file_is_valid() {
        let file = temp_csv("Make,Year\n");
        let df = read_csv(file.path()).expect("read");
        assert_eq!(df.height(), 0);
    }

    #[test]
    fn missing_file_reports_path() {
        let error = read_csv(Path::new("/nonexistent/input.csv")).expect_err("must fail");
        assert!(error.to_string().contains("/nonexistent/input.csv"));
    }
}
