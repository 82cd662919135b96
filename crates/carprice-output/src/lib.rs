#![deny(unsafe_code)]

pub mod export;
pub mod format;

pub use export::{OutputError, PREDICTED_PRICE_COLUMN, attach_predictions, write_csv};
pub use format::{display_price, format_price, round_price};
