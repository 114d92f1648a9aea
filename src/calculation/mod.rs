//! Calculation logic for the Pricing Engine.
//!
//! This module contains the two cooperating calculators: the [`RateModel`],
//! which derives required billing rates from budget and capacity inputs, and
//! the [`PricingEngine`], which prices tasks at the uplift-adjusted day rate
//! and applies the discount allocation model. The pure helpers for rate
//! rounding and factor allocation live alongside them.

mod allocation;
mod engine;
mod rate_model;
mod rounding;

pub use allocation::{ALLOCATION_TARGET, applied_percent, validate_allocations};
pub use engine::PricingEngine;
pub use rate_model::{RateModel, RateModelUpdate};
pub use rounding::{RoundingMode, round_up_to_increment};
