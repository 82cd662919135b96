//! The opaque prediction capability.

use polars::prelude::DataFrame;

use carprice_model::InferenceError;

/// `predict(features) -> prices`: one prediction per input row, in row order.
///
/// Input must already be schema-aligned (exact column names and order); the
/// builder and batch validator guarantee that, and implementations may
/// reject anything else with [`InferenceError::ModelRejected`].
pub trait PriceModel: Send + Sync {
    fn predict(&self, features: &DataFrame) -> Result<Vec<f64>, InferenceError>;
}

/// Stand-in model returning one fixed price for every row.
///
/// Used by tests and dry runs in place of a real artifact.
#[derive(Debug, Clone, Copy)]
pub struct FixedPriceModel {
    price: f64,
}

impl FixedPriceModel {
    pub fn new(price: f64) -> Self {
        Self { price }
    }
}

impl PriceModel for FixedPriceModel {
    fn predict(&self, features: &DataFrame) -> Result<Vec<f64>, InferenceError> {
        Ok(vec![self.price; features.height()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::Column;

    #[test]
    fn fixed_model_yields_one_price_per_row() {
        let df = DataFrame::new(vec![Column::new("Make".into(), ["Toyota", "Honda"])])
            .expect("frame");
        let prices = FixedPriceModel::new(50000.0).predict(&df).expect("prices");
        assert_eq!(prices, [50000.0, 50000.0]);
    }
}
