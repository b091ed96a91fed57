//! Layered Harris matrix generation.
pub mod generator;
pub mod types;

pub use generator::MatrixGenerator;
pub use types::{HarrisMatrix, LateralLink, OrderLink};
