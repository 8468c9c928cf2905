//! Move cost pricing.
//!
//! Pure pricing rules: a per-mile base rate, a flat rate per move-size
//! category, flat add-on service charges, and a symmetric ±10% cost band
//! around the total. No I/O and no external collaborators.

mod engine;
mod rates;

pub use engine::{CostRange, PricingEngine};
pub use rates::{AdditionalService, MoveSize};
