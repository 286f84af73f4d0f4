//! Domain types and models

pub mod label;
pub mod observation;
pub mod params;

pub use label::{ClassProbabilities, Label};
pub use observation::Observation;
pub use params::ModelParams;
