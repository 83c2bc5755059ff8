//! Tax calculations.
//!
//! The estimator turns a [`TaxInput`](crate::TaxInput) into a
//! [`TaxResult`](crate::TaxResult) using a set of
//! [`TaxTables`](crate::TaxTables).

pub mod common;
pub mod estimator;

pub use estimator::{TaxEstimator, estimate};
