//! Batch validator: schema conformance and column alignment for uploaded
//! tables.

use std::collections::BTreeSet;

use polars::prelude::DataFrame;
use tracing::debug;

use carprice_model::{FeatureField, SchemaMismatchError};

/// Checks that every required feature column is present, then selects
/// exactly the schema columns in schema order.
///
/// Extra columns are dropped from the returned frame; the caller keeps the
/// original frame for re-attaching predictions. Row-level values are not
/// domain- or bounds-checked here; a bad value surfaces from the model as a
/// single batch-wide inference failure.
pub fn align_batch(df: &DataFrame) -> Result<DataFrame, SchemaMismatchError> {
    let present: BTreeSet<&str> = df
        .get_column_names()
        .iter()
        .map(|name| name.as_str())
        .collect();
    let missing: Vec<String> = FeatureField::schema_names()
        .filter(|name| !present.contains(name))
        .map(String::from)
        .collect();
    if !missing.is_empty() {
        return Err(SchemaMismatchError::MissingColumns { missing });
    }

    let mut columns = Vec::with_capacity(carprice_model::FEATURE_SCHEMA.len());
    for name in FeatureField::schema_names() {
        let column = df
            .column(name)
            .map_err(|e| SchemaMismatchError::Alignment {
                message: e.to_string(),
            })?
            .clone();
        columns.push(column);
    }
    let aligned = DataFrame::new(columns).map_err(|e| SchemaMismatchError::Alignment {
        message: e.to_string(),
    })?;
    debug!(
        rows = aligned.height(),
        dropped = df.width() - aligned.width(),
        "aligned batch input"
    );
    Ok(aligned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::Column;

    fn full_input() -> DataFrame {
        DataFrame::new(vec![
            // Deliberately shuffled relative to the schema order.
            Column::new("Mileage".into(), [85000i64, 40000]),
            Column::new("Make".into(), ["Toyota", "Honda"]),
            Column::new("Type".into(), ["Corolla", "Civic"]),
            Column::new("Origin".into(), ["Japan", "Japan"]),
            Column::new("Region".into(), ["Riyadh", "Jeddah"]),
            Column::new("Gear_Type".into(), ["Automatic", "Manual"]),
            Column::new("Options".into(), ["Full Option", "Standard"]),
            Column::new("Year".into(), [2015i64, 2018]),
            Column::new("Engine_Size".into(), [1.6f64, 2.0]),
            Column::new("Listing_Id".into(), ["a-1", "a-2"]),
        ])
        .expect("frame")
    }

    #[test]
    fn aligned_frame_has_exact_schema_columns_in_order() {
        let aligned = align_batch(&full_input()).expect("aligned");
        let names: Vec<&str> = aligned
            .get_column_names()
            .iter()
            .map(|n| n.as_str())
            .collect();
        let expected: Vec<&str> = FeatureField::schema_names().collect();
        assert_eq!(names, expected);
        assert_eq!(aligned.height(), 2);
        // Extraneous column dropped from the aligned frame only.
        assert!(aligned.column("Listing_Id").is_err());
    }

    #[test]
    fn missing_columns_are_enumerated_in_schema_order() {
        let df = DataFrame::new(vec![
            Column::new("Make".into(), ["Toyota"]),
            Column::new("Year".into(), [2015i64]),
        ])
        .expect("frame");
        let error = align_batch(&df).expect_err("must reject");
        assert_eq!(
            error.missing_columns(),
            [
                "Gear_Type",
                "Origin",
                "Options",
                "Type",
                "Region",
                "Engine_Size",
                "Mileage"
            ]
        );
    }

    #[test]
    fn zero_row_batch_aligns() {
        let df = full_input().head(Some(0));
        let aligned = align_batch(&df).expect("aligned");
        assert_eq!(aligned.height(), 0);
        assert_eq!(aligned.width(), carprice_model::FEATURE_SCHEMA.len());
    }
}
