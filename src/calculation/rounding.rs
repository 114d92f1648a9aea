//! Rate rounding functionality.
//!
//! Rounding is always a ceiling to the nearest increment, never floor or
//! nearest: a quoted rate must not undershoot the raw required rate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How derived rates are rounded.
///
/// Serialized in snapshots as the string `"none"` or a bare integer
/// increment, matching the exchange payload format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RoundingRepr", into = "RoundingRepr")]
pub enum RoundingMode {
    /// Rates are left unrounded.
    #[default]
    None,
    /// Rates are rounded up to the nearest multiple of the increment.
    NearestUp(u32),
}

/// Wire representation: `"none"` or a bare integer.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RoundingRepr {
    Increment(u32),
    Keyword(String),
}

impl From<RoundingRepr> for RoundingMode {
    fn from(repr: RoundingRepr) -> Self {
        match repr {
            RoundingRepr::Increment(0) => RoundingMode::None,
            RoundingRepr::Increment(step) => RoundingMode::NearestUp(step),
            // Unknown keywords degrade to no rounding rather than erroring.
            RoundingRepr::Keyword(_) => RoundingMode::None,
        }
    }
}

impl From<RoundingMode> for RoundingRepr {
    fn from(mode: RoundingMode) -> Self {
        match mode {
            RoundingMode::None => RoundingRepr::Keyword("none".to_string()),
            RoundingMode::NearestUp(step) => RoundingRepr::Increment(step),
        }
    }
}

/// Rounds a raw rate up to the mode's increment.
///
/// With [`RoundingMode::None`] (or a zero increment) the raw value is
/// returned unchanged. The result is always greater than or equal to the
/// raw value, and rounding an already-rounded value is a no-op.
///
/// # Examples
///
/// ```
/// use pricing_engine::calculation::{RoundingMode, round_up_to_increment};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let raw = Decimal::from_str("71.43").unwrap();
/// let rounded = round_up_to_increment(raw, RoundingMode::NearestUp(5));
/// assert_eq!(rounded, Decimal::from_str("75").unwrap());
/// ```
pub fn round_up_to_increment(raw: Decimal, mode: RoundingMode) -> Decimal {
    match mode {
        RoundingMode::None | RoundingMode::NearestUp(0) => raw,
        RoundingMode::NearestUp(step) => {
            let step = Decimal::from(step);
            (raw / step).ceil() * step
        }
    }
}
