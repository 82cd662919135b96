#![deny(unsafe_code)]

pub mod batch;
pub mod record;

pub use batch::align_batch;
pub use record::{RecordBuilder, RecordInput, feature_frame};
