#![deny(unsafe_code)]

pub mod csv_read;
pub mod polars_utils;

pub use csv_read::{IngestError, read_csv};
pub use polars_utils::{any_to_f64, any_to_string, any_to_string_non_empty, parse_f64};
