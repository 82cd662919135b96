//! Process-wide registry of the feature schema and its categorical domains.

use std::collections::BTreeMap;

use polars::prelude::DataFrame;
use tracing::{debug, warn};

use carprice_model::{CATEGORICAL_FIELDS, FeatureField, SchemaError};

use crate::domain::{derive_domain, filtered_domain};

/// Derived categorical domains plus the retained reference frame.
///
/// Built once from the reference dataset and read-only afterwards; safe to
/// share across concurrent requests. A field whose domain cannot be derived
/// is degraded (its error is recorded) without failing the whole registry.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    reference: DataFrame,
    domains: BTreeMap<FeatureField, Result<Vec<String>, SchemaError>>,
}

impl SchemaRegistry {
    /// Derives one categorical domain per categorical schema field.
    pub fn from_reference(reference: DataFrame) -> Self {
        let mut domains = BTreeMap::new();
        for field in CATEGORICAL_FIELDS {
            let derived = derive_domain(&reference, field.name());
            match &derived {
                Ok(values) => {
                    debug!(field = field.name(), choices = values.len(), "derived domain");
                }
                Err(error) => {
                    warn!(field = field.name(), %error, "field cannot be offered");
                }
            }
            domains.insert(field, derived);
        }
        Self { reference, domains }
    }

    /// The derived domain for a categorical field, or the recorded error.
    pub fn domain(&self, field: FeatureField) -> Result<&[String], SchemaError> {
        match self.domains.get(&field) {
            Some(Ok(values)) => Ok(values.as_slice()),
            Some(Err(error)) => Err(error.clone()),
            None => Err(SchemaError::MissingColumn {
                column: field.name().to_string(),
            }),
        }
    }

    /// The Type choices valid for a chosen Make (dependent domain).
    ///
    /// Empty when the make has no observed types; the caller presents no
    /// valid choice in that case.
    pub fn types_for_make(&self, make: &str) -> Result<Vec<String>, SchemaError> {
        filtered_domain(
            &self.reference,
            FeatureField::Make.name(),
            make,
            FeatureField::Type.name(),
        )
    }

    /// The reference frame the registry was derived from.
    pub fn reference(&self) -> &DataFrame {
        &self.reference
    }
}
