//! Engine defaults loading and management.
//!
//! This module provides the [`EngineDefaults`] type: the capacity defaults,
//! adjustment caps, and currency table a new pricing session starts from.
//! Defaults can be loaded from a YAML file or taken from the compiled-in
//! set matching the original deployment.
//!
//! # Example
//!
//! ```no_run
//! use pricing_engine::config::EngineDefaults;
//!
//! let defaults = EngineDefaults::load("./config/defaults.yaml").unwrap();
//! println!("Base currency: {}", defaults.currencies.base);
//! ```

mod defaults;

pub use defaults::{AdjustmentDefaults, CapacityDefaults, CurrencyDefaults, EngineDefaults};
