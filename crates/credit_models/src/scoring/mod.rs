//! Logistic PD scoring with an ESG adjustment.
//!
//! - `scorer`: [`Scorer`] producing raw and ESG-adjusted PDs
//! - `esg`: [`EsgPenalty`], the bounded ESG/carbon term

mod esg;
mod scorer;

pub use esg::EsgPenalty;
pub use scorer::{PdEstimate, Scorer};
