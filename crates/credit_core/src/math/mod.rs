//! Numerical helpers shared by the scoring and scenario layers.
//!
//! - `logistic`: numerically bounded sigmoid, logit and unit-interval normalisation

pub mod logistic;

pub use logistic::{logistic, logit, normalise_unit, MAX_LOGIT};
