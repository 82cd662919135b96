//! Numeric bounds for the non-categorical feature fields.

/// Inclusive bounds applied by the single-record builder.
///
/// Deserializable so deployments can override the defaults from a config
/// file; the defaults match the ranges the model was trained over.
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoundsConfig {
    pub year_min: i64,
    pub year_max: i64,
    pub engine_size_min: f64,
    pub engine_size_max: f64,
    pub mileage_min: i64,
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Self {
            year_min: 1960,
            year_max: 2025,
            engine_size_min: 0.5,
            engine_size_max: 10.0,
            mileage_min: 0,
        }
    }
}
