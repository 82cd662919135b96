#![deny(unsafe_code)]

pub mod artifact;
pub mod model;
pub mod shared;

pub use artifact::ModelArtifact;
pub use model::{FixedPriceModel, PriceModel};
pub use shared::SharedModel;
