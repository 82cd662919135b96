//! Categorical domain derivation from the reference dataset.

use std::collections::BTreeSet;

use polars::prelude::{AnyValue, DataFrame};

use carprice_ingest::{any_to_string, any_to_string_non_empty};
use carprice_model::SchemaError;

/// Returns the sorted distinct non-missing values of `field`.
///
/// Fails when the column is absent from the reference table or yields no
/// non-missing values; either way the field cannot be offered as a choice.
pub fn derive_domain(df: &DataFrame, field: &str) -> Result<Vec<String>, SchemaError> {
    let column = df.column(field).map_err(|_| SchemaError::MissingColumn {
        column: field.to_string(),
    })?;
    let mut values = BTreeSet::new();
    for idx in 0..column.len() {
        let cell = column.get(idx).unwrap_or(AnyValue::Null);
        if let Some(text) = any_to_string_non_empty(cell) {
            values.insert(text);
        }
    }
    if values.is_empty() {
        return Err(SchemaError::EmptyDomain {
            column: field.to_string(),
        });
    }
    Ok(values.into_iter().collect())
}

/// Returns the sorted distinct non-missing values of `target_field` over
/// rows where `filter_field` equals `filter_value`.
///
/// An empty result is `Ok(vec![])`, signaling the caller to present no valid
/// choice; only structurally missing columns are errors.
pub fn filtered_domain(
    df: &DataFrame,
    filter_field: &str,
    filter_value: &str,
    target_field: &str,
) -> Result<Vec<String>, SchemaError> {
    let filter_column = df
        .column(filter_field)
        .map_err(|_| SchemaError::MissingColumn {
            column: filter_field.to_string(),
        })?;
    let target_column = df
        .column(target_field)
        .map_err(|_| SchemaError::MissingColumn {
            column: target_field.to_string(),
        })?;
    let mut values = BTreeSet::new();
    for idx in 0..df.height() {
        let candidate = any_to_string(filter_column.get(idx).unwrap_or(AnyValue::Null));
        if candidate.trim() != filter_value {
            continue;
        }
        if let Some(text) = any_to_string_non_empty(target_column.get(idx).unwrap_or(AnyValue::Null))
        {
            values.insert(text);
        }
    }
    Ok(values.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::Column;

    fn reference() -> DataFrame {
        DataFrame::new(vec![
            Column::new(
                "Make".into(),
                ["Toyota", "Toyota", "Honda", "Toyota", ""],
            ),
            Column::new(
                "Type".into(),
                ["Corolla", "Camry", "Civic", "Corolla", "Accent"],
            ),
        ])
        .expect("frame")
    }

    #[test]
    fn derive_domain_sorts_and_drops_missing() {
        let domain = derive_domain(&reference(), "Make").expect("domain");
        assert_eq!(domain, ["Honda", "Toyota"]);
    }

    #[test]
    fn derive_domain_missing_column_fails() {
        let error = derive_domain(&reference(), "Origin").expect_err("must fail");
        assert_eq!(
            error,
            SchemaError::MissingColumn {
                column: "Origin".to_string()
            }
        );
    }

    #[test]
    fn derive_domain_all_missing_is_empty_domain() {
        let df = DataFrame::new(vec![Column::new("Region".into(), ["", " ", ""])]).expect("frame");
        let error = derive_domain(&df, "Region").expect_err("must fail");
        assert_eq!(
            error,
            SchemaError::EmptyDomain {
                column: "Region".to_string()
            }
        );
    }

    #[test]
    fn filtered_domain_narrows_by_make() {
        let types = filtered_domain(&reference(), "Make", "Toyota", "Type").expect("types");
        assert_eq!(types, ["Camry", "Corolla"]);
        assert!(!types.contains(&"Civic".to_string()));
    }

    #[test]
    fn filtered_domain_no_match_is_ok_empty() {
        let types = filtered_domain(&reference(), "Make", "BMW", "Type").expect("types");
        assert!(types.is_empty());
    }
}
