pub mod calculations;
pub mod models;

pub use calculations::{TaxEstimator, estimate};
pub use models::*;
