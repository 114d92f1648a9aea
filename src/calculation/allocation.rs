//! Factor allocation arithmetic.
//!
//! Each selected factor contributes `allocation / 100` of the category's
//! maximum percentage. The applied percentage is a weighted sum, not a
//! normalization: it is meaningful even when the allocations do not sum
//! to 100. Whether they do is reported separately by
//! [`validate_allocations`].

use rust_decimal::Decimal;

use crate::models::{AllocationFactor, AllocationValidation};

/// The allocation total a fully-configured category reaches.
pub const ALLOCATION_TARGET: u32 = 100;

/// Computes the applied percentage for a factor category.
///
/// Sums the contributions of selected factors only; unselected factors are
/// ignored. Returns zero when nothing is selected.
///
/// # Examples
///
/// ```
/// use pricing_engine::calculation::applied_percent;
/// use pricing_engine::models::AllocationFactor;
/// use rust_decimal::Decimal;
///
/// let factors = vec![AllocationFactor {
///     id: "f1".to_string(),
///     name: "Specialist expertise".to_string(),
///     allocation: Decimal::from(50),
///     selected: true,
/// }];
/// let applied = applied_percent(&factors, Decimal::from(20));
/// assert_eq!(applied, Decimal::from(10));
/// ```
pub fn applied_percent(factors: &[AllocationFactor], max_percent: Decimal) -> Decimal {
    factors
        .iter()
        .filter(|f| f.selected)
        .map(|f| f.allocation / Decimal::ONE_HUNDRED * max_percent)
        .sum()
}

/// Checks whether a category's allocations sum to the target.
///
/// Every factor counts here, selected or not: the total describes the
/// category's configuration, not what is currently applied. The check
/// tolerates a difference below 0.01.
pub fn validate_allocations(factors: &[AllocationFactor]) -> AllocationValidation {
    let target = Decimal::from(ALLOCATION_TARGET);
    let total: Decimal = factors.iter().map(|f| f.allocation).sum();
    let tolerance = Decimal::new(1, 2);

    AllocationValidation {
        valid: (total - target).abs() < tolerance,
        total,
        remaining: target - total,
    }
}
