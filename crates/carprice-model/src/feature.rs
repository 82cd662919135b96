//! The fixed feature schema the trained model was fitted on.
//!
//! Column names and their order are a contract with the model artifact's
//! column transformer. Every component that hands a frame to the model must
//! reindex by [`FEATURE_SCHEMA`] first; a mismatch in name or order is a
//! contract violation, not a recoverable condition.

use crate::error::ValidationError;

/// One field of the model's input schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub enum FeatureField {
    GearType,
    Origin,
    Options,
    Type,
    Make,
    Region,
    Year,
    EngineSize,
    Mileage,
}

/// The exact column set and order expected by the model.
pub const FEATURE_SCHEMA: [FeatureField; 9] = [
    FeatureField::GearType,
    FeatureField::Origin,
    FeatureField::Options,
    FeatureField::Type,
    FeatureField::Make,
    FeatureField::Region,
    FeatureField::Year,
    FeatureField::EngineSize,
    FeatureField::Mileage,
];

/// Categorical fields, in schema order.
pub const CATEGORICAL_FIELDS: [FeatureField; 6] = [
    FeatureField::GearType,
    FeatureField::Origin,
    FeatureField::Options,
    FeatureField::Type,
    FeatureField::Make,
    FeatureField::Region,
];

impl FeatureField {
    /// The exact column name the model expects (case-sensitive).
    pub fn name(self) -> &'static str {
        match self {
            Self::GearType => "Gear_Type",
            Self::Origin => "Origin",
            Self::Options => "Options",
            Self::Type => "Type",
            Self::Make => "Make",
            Self::Region => "Region",
            Self::Year => "Year",
            Self::EngineSize => "Engine_Size",
            Self::Mileage => "Mileage",
        }
    }

    /// Human-readable label for listings and prompts.
    pub fn label(self) -> &'static str {
        match self {
            Self::GearType => "Gear type",
            Self::Origin => "Origin",
            Self::Options => "Options",
            Self::Type => "Model/Type",
            Self::Make => "Manufacturer",
            Self::Region => "Region",
            Self::Year => "Year of production",
            Self::EngineSize => "Engine size (L)",
            Self::Mileage => "Mileage (km)",
        }
    }

    pub fn is_categorical(self) -> bool {
        !matches!(self, Self::Year | Self::EngineSize | Self::Mileage)
    }

    /// The schema column names, in contracted order.
    pub fn schema_names() -> impl Iterator<Item = &'static str> {
        FEATURE_SCHEMA.iter().map(|field| field.name())
    }
}

impl std::fmt::Display for FeatureField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A concrete value for one feature field.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Text(String),
    Int(i64),
    Float(f64),
}

impl FeatureValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            Self::Text(_) => None,
        }
    }
}

impl std::fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(value) => f.write_str(value),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
        }
    }
}

/// One validated feature row, holding exactly one value per schema field,
/// in schema order.
///
/// Constructed only through [`FeatureRecord::from_parts`], which enforces
/// completeness and ordering, so holders can rely on the invariant.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FeatureRecord {
    values: Vec<(FeatureField, FeatureValue)>,
}

impl FeatureRecord {
    /// Builds a record from `(field, value)` pairs.
    ///
    /// The pairs must cover [`FEATURE_SCHEMA`] exactly, in schema order.
    pub fn from_parts(
        values: Vec<(FeatureField, FeatureValue)>,
    ) -> Result<Self, ValidationError> {
        for (position, expected) in FEATURE_SCHEMA.iter().enumerate() {
            match values.get(position) {
                Some((field, _)) if field == expected => {}
                _ => {
                    return Err(ValidationError::MissingField {
                        field: expected.name().to_string(),
                    });
                }
            }
        }
        if values.len() != FEATURE_SCHEMA.len() {
            return Err(ValidationError::MissingField {
                field: FEATURE_SCHEMA[FEATURE_SCHEMA.len() - 1].name().to_string(),
            });
        }
        Ok(Self { values })
    }

    pub fn get(&self, field: FeatureField) -> Option<&FeatureValue> {
        self.values
            .iter()
            .find(|(candidate, _)| *candidate == field)
            .map(|(_, value)| value)
    }

    /// Iterates the record in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (FeatureField, &FeatureValue)> {
        self.values.iter().map(|(field, value)| (*field, value))
    }
}
