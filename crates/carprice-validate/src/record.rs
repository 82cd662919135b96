//! Single-record builder: one validated feature row from discrete user input.

use polars::prelude::{Column, DataFrame, PolarsResult};

use carprice_model::{
    BoundsConfig, FeatureField, FeatureRecord, FeatureValue, ValidationError,
};
use carprice_schema::SchemaRegistry;

/// Raw values captured from the user, one per schema field.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordInput {
    pub make: String,
    pub car_type: String,
    pub origin: String,
    pub region: String,
    pub gear_type: String,
    pub options: String,
    pub year: i64,
    pub engine_size: f64,
    pub mileage: i64,
}

/// Validates raw input against the registry's domains and numeric bounds
/// and assembles a [`FeatureRecord`] in schema order.
///
/// Performs no I/O; every check runs before the inference adapter is ever
/// invoked.
pub struct RecordBuilder<'a> {
    registry: &'a SchemaRegistry,
    bounds: BoundsConfig,
}

impl<'a> RecordBuilder<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self {
            registry,
            bounds: BoundsConfig::default(),
        }
    }

    #[must_use]
    pub fn with_bounds(mut self, bounds: BoundsConfig) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn build(&self, input: &RecordInput) -> Result<FeatureRecord, ValidationError> {
        self.check_category(FeatureField::Make, &input.make)?;
        self.check_dependent_type(&input.make, &input.car_type)?;
        self.check_category(FeatureField::Origin, &input.origin)?;
        self.check_category(FeatureField::Region, &input.region)?;
        self.check_category(FeatureField::GearType, &input.gear_type)?;
        self.check_category(FeatureField::Options, &input.options)?;
        self.check_year(input.year)?;
        self.check_engine_size(input.engine_size)?;
        self.check_mileage(input.mileage)?;

        FeatureRecord::from_parts(vec![
            (
                FeatureField::GearType,
                FeatureValue::Text(input.gear_type.trim().to_string()),
            ),
            (
                FeatureField::Origin,
                FeatureValue::Text(input.origin.trim().to_string()),
            ),
            (
                FeatureField::Options,
                FeatureValue::Text(input.options.trim().to_string()),
            ),
            (
                FeatureField::Type,
                FeatureValue::Text(input.car_type.trim().to_string()),
            ),
            (
                FeatureField::Make,
                FeatureValue::Text(input.make.trim().to_string()),
            ),
            (
                FeatureField::Region,
                FeatureValue::Text(input.region.trim().to_string()),
            ),
            (FeatureField::Year, FeatureValue::Int(input.year)),
            (FeatureField::EngineSize, FeatureValue::Float(input.engine_size)),
            (FeatureField::Mileage, FeatureValue::Int(input.mileage)),
        ])
    }

    fn check_category(&self, field: FeatureField, value: &str) -> Result<(), ValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::MissingField {
                field: field.name().to_string(),
            });
        }
        let domain = self.registry.domain(field)?;
        if domain.iter().any(|choice| choice == trimmed) {
            Ok(())
        } else {
            Err(ValidationError::UnknownCategory {
                field: field.name().to_string(),
                value: trimmed.to_string(),
            })
        }
    }

    // Type choices depend on the chosen Make, not the global Type domain.
    fn check_dependent_type(&self, make: &str, car_type: &str) -> Result<(), ValidationError> {
        let trimmed = car_type.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::MissingField {
                field: FeatureField::Type.name().to_string(),
            });
        }
        let types = self.registry.types_for_make(make.trim())?;
        if types.iter().any(|choice| choice == trimmed) {
            Ok(())
        } else {
            Err(ValidationError::UnknownCategory {
                field: FeatureField::Type.name().to_string(),
                value: trimmed.to_string(),
            })
        }
    }

    fn check_year(&self, year: i64) -> Result<(), ValidationError> {
        if year < self.bounds.year_min || year > self.bounds.year_max {
            return Err(ValidationError::OutOfRange {
                field: FeatureField::Year.name().to_string(),
                value: year.to_string(),
                min: self.bounds.year_min.to_string(),
                max: self.bounds.year_max.to_string(),
            });
        }
        Ok(())
    }

    fn check_engine_size(&self, engine_size: f64) -> Result<(), ValidationError> {
        // NaN fails the range test and is rejected here.
        if !(engine_size >= self.bounds.engine_size_min
            && engine_size <= self.bounds.engine_size_max)
        {
            return Err(ValidationError::OutOfRange {
                field: FeatureField::EngineSize.name().to_string(),
                value: engine_size.to_string(),
                min: self.bounds.engine_size_min.to_string(),
                max: self.bounds.engine_size_max.to_string(),
            });
        }
        Ok(())
    }

    fn check_mileage(&self, mileage: i64) -> Result<(), ValidationError> {
        if mileage < self.bounds.mileage_min {
            return Err(ValidationError::BelowMinimum {
                field: FeatureField::Mileage.name().to_string(),
                value: mileage.to_string(),
                min: self.bounds.mileage_min.to_string(),
            });
        }
        Ok(())
    }
}

/// Materializes a validated record as a one-row frame in exact schema order,
/// ready for the inference adapter.
pub fn feature_frame(record: &FeatureRecord) -> PolarsResult<DataFrame> {
    let mut columns = Vec::with_capacity(carprice_model::FEATURE_SCHEMA.len());
    for (field, value) in record.iter() {
        let column = match value {
            FeatureValue::Text(text) => Column::new(field.name().into(), [text.as_str()]),
            FeatureValue::Int(v) => Column::new(field.name().into(), [*v]),
            FeatureValue::Float(v) => Column::new(field.name().into(), [*v]),
        };
        columns.push(column);
    }
    DataFrame::new(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use carprice_model::FEATURE_SCHEMA;
    use polars::prelude::Column;

    fn registry() -> SchemaRegistry {
        let reference = DataFrame::new(vec![
            Column::new("Make".into(), ["Toyota", "Toyota", "Honda"]),
            Column::new("Type".into(), ["Corolla", "Camry", "Civic"]),
            Column::new("Origin".into(), ["Japan", "Japan", "Japan"]),
            Column::new("Region".into(), ["Riyadh", "Jeddah", "Riyadh"]),
            Column::new("Gear_Type".into(), ["Automatic", "Manual", "Automatic"]),
            Column::new("Options".into(), ["Full Option", "Standard", "Semi Full"]),
        ])
        .expect("frame");
        SchemaRegistry::from_reference(reference)
    }

    fn valid_input() -> RecordInput {
        RecordInput {
            make: "Toyota".to_string(),
            car_type: "Corolla".to_string(),
            origin: "Japan".to_string(),
            region: "Riyadh".to_string(),
            gear_type: "Automatic".to_string(),
            options: "Full Option".to_string(),
            year: 2015,
            engine_size: 1.6,
            mileage: 85000,
        }
    }

    #[test]
    fn valid_input_builds_record_in_schema_order() {
        let registry = registry();
        let record = RecordBuilder::new(&registry)
            .build(&valid_input())
            .expect("record");
        let fields: Vec<FeatureField> = record.iter().map(|(field, _)| field).collect();
        assert_eq!(fields, FEATURE_SCHEMA);
        assert_eq!(
            record.get(FeatureField::Make).and_then(FeatureValue::as_str),
            Some("Toyota")
        );
    }

    #[test]
    fn boundary_values_are_accepted() {
        let registry = registry();
        let builder = RecordBuilder::new(&registry);
        for (year, engine_size, mileage) in [(1960, 0.5, 0), (2025, 10.0, 0)] {
            let input = RecordInput {
                year,
                engine_size,
                mileage,
                ..valid_input()
            };
            builder.build(&input).expect("boundary value must pass");
        }
    }

    #[test]
    fn one_unit_outside_bounds_is_rejected_naming_the_field() {
        let registry = registry();
        let builder = RecordBuilder::new(&registry);

        let input = RecordInput {
            year: 1959,
            ..valid_input()
        };
        match builder.build(&input).expect_err("below min") {
            ValidationError::OutOfRange { field, .. } => assert_eq!(field, "Year"),
            other => panic!("unexpected error: {other}"),
        }

        let input = RecordInput {
            year: 2026,
            ..valid_input()
        };
        assert!(builder.build(&input).is_err());

        let input = RecordInput {
            engine_size: 0.4,
            ..valid_input()
        };
        match builder.build(&input).expect_err("engine below min") {
            ValidationError::OutOfRange { field, .. } => assert_eq!(field, "Engine_Size"),
            other => panic!("unexpected error: {other}"),
        }

        let input = RecordInput {
            engine_size: 10.1,
            ..valid_input()
        };
        assert!(builder.build(&input).is_err());

        let input = RecordInput {
            mileage: -1,
            ..valid_input()
        };
        match builder.build(&input).expect_err("negative mileage") {
            ValidationError::BelowMinimum { field, .. } => assert_eq!(field, "Mileage"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn type_is_checked_against_the_chosen_make() {
        let registry = registry();
        let builder = RecordBuilder::new(&registry);
        // Civic exists in the global Type domain but not under Toyota.
        let input = RecordInput {
            car_type: "Civic".to_string(),
            ..valid_input()
        };
        match builder.build(&input).expect_err("wrong make") {
            ValidationError::UnknownCategory { field, value } => {
                assert_eq!(field, "Type");
                assert_eq!(value, "Civic");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_category_is_rejected() {
        let registry = registry();
        let builder = RecordBuilder::new(&registry);
        let input = RecordInput {
            region: "Mars".to_string(),
            ..valid_input()
        };
        match builder.build(&input).expect_err("unknown region") {
            ValidationError::UnknownCategory { field, .. } => assert_eq!(field, "Region"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn blank_category_is_a_missing_field() {
        let registry = registry();
        let builder = RecordBuilder::new(&registry);
        let input = RecordInput {
            options: "  ".to_string(),
            ..valid_input()
        };
        match builder.build(&input).expect_err("blank options") {
            ValidationError::MissingField { field } => assert_eq!(field, "Options"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn feature_frame_has_schema_columns_in_order() {
        let registry = registry();
        let record = RecordBuilder::new(&registry)
            .build(&valid_input())
            .expect("record");
        let df = feature_frame(&record).expect("frame");
        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        let expected: Vec<&str> = FeatureField::schema_names().collect();
        assert_eq!(names, expected);
        assert_eq!(df.height(), 1);
    }

    #[test]
    fn custom_bounds_are_honored() {
        let registry = registry();
        let bounds = BoundsConfig {
            year_max: 2030,
            ..BoundsConfig::default()
        };
        let builder = RecordBuilder::new(&registry).with_bounds(bounds);
        let input = RecordInput {
            year: 2028,
            ..valid_input()
        };
        builder.build(&input).expect("custom bound must pass");
    }
}
