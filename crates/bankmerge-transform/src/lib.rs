//! Schema reconciliation: the core of the bank-transaction merge pipeline.
//!
//! See [`reconcile`] for the algorithm.

mod error;
mod reconcile;

pub use error::{Result, TransformError};
pub use reconcile::reconcile;
