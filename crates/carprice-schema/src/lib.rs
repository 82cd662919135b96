#![deny(unsafe_code)]

pub mod domain;
pub mod registry;

pub use domain::{derive_domain, filtered_domain};
pub use registry::SchemaRegistry;
