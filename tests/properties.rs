//! Property tests for the pricing calculation invariants.

use proptest::prelude::*;
use rust_decimal::Decimal;

use pricing_engine::calculation::{
    PricingEngine, RateModel, RateModelUpdate, RoundingMode, round_up_to_increment,
    validate_allocations,
};
use pricing_engine::models::{AllocationFactor, FactorCategory, FactorInput, TaskInput};

/// A decimal with up to two fractional digits, e.g. day estimates or
/// allocation percentages.
fn arb_decimal(range: std::ops::Range<i64>) -> impl Strategy<Value = Decimal> {
    (range, 0u32..=2).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

fn arb_factor() -> impl Strategy<Value = AllocationFactor> {
    (1i64..=10_000, 0u32..=2, any::<bool>(), 0u32..=u32::MAX).prop_map(
        |(mantissa, scale, selected, seed)| AllocationFactor {
            id: format!("factor_{}", seed),
            name: "Generated".to_string(),
            allocation: Decimal::new(mantissa, scale),
            selected,
        },
    )
}

fn reference_model() -> RateModel {
    let mut model = RateModel::new();
    model.update(RateModelUpdate {
        salary_budget: Some(Decimal::from(100_000)),
        growth_budget: Some(Decimal::from(20_000)),
        ..Default::default()
    });
    model
}

proptest! {
    /// Rounding never produces a value below the raw rate, and rounding an
    /// already-rounded value at the same increment changes nothing.
    #[test]
    fn rounding_dominates_and_is_idempotent(
        mantissa in -1_000_000_000i64..1_000_000_000,
        scale in 0u32..=4,
        increment in 1u32..=1_000,
    ) {
        let raw = Decimal::new(mantissa, scale);
        let mode = RoundingMode::NearestUp(increment);

        let rounded = round_up_to_increment(raw, mode);
        prop_assert!(rounded >= raw);
        prop_assert_eq!(round_up_to_increment(rounded, mode), rounded);
        prop_assert_eq!(rounded % Decimal::from(increment), Decimal::ZERO);
    }

    /// The base project cost is always exactly the sum of the cached task
    /// costs, whatever the uplift configuration.
    #[test]
    fn base_cost_equals_task_cost_sum(
        days in prop::collection::vec(arb_decimal(1..5_000), 0..8),
        allocation in arb_decimal(1..200),
    ) {
        let mut engine = PricingEngine::new(reference_model());
        engine.add_factor(FactorCategory::Uplift, FactorInput {
            id: None,
            name: "Generated".to_string(),
            allocation,
            selected: None,
        });
        for (i, days) in days.into_iter().enumerate() {
            engine.add_task(TaskInput {
                id: None,
                name: format!("Task {}", i),
                days,
            });
        }

        let sum: Decimal = engine.tasks().iter().map(|t| t.cost).sum();
        prop_assert_eq!(engine.base_project_cost(), sum);
    }

    /// The discount is applied to the uplift-inclusive base exactly once.
    #[test]
    fn discount_applies_exactly_once(
        days in arb_decimal(1..5_000),
        discount_allocation in arb_decimal(1..100),
        max_discount in arb_decimal(0..100),
    ) {
        let mut engine = PricingEngine::new(reference_model());
        engine.set_max_discount(max_discount);
        engine.add_factor(FactorCategory::Discount, FactorInput {
            id: None,
            name: "Generated".to_string(),
            allocation: discount_allocation,
            selected: None,
        });
        engine.add_task(TaskInput {
            id: None,
            name: "Task".to_string(),
            days,
        });

        let expected = engine.base_project_cost()
            * (Decimal::ONE - engine.applied_discount_percent() / Decimal::ONE_HUNDRED);
        prop_assert_eq!(engine.final_project_cost(), expected);
    }

    /// Allocation validation depends only on the allocations, never on the
    /// selection flags.
    #[test]
    fn validation_ignores_selection_flags(
        factors in prop::collection::vec(arb_factor(), 0..6),
    ) {
        let flipped: Vec<AllocationFactor> = factors
            .iter()
            .cloned()
            .map(|mut f| {
                f.selected = !f.selected;
                f
            })
            .collect();

        let original = validate_allocations(&factors);
        let toggled = validate_allocations(&flipped);

        prop_assert_eq!(original.valid, toggled.valid);
        prop_assert_eq!(original.total, toggled.total);
        prop_assert_eq!(original.remaining, toggled.remaining);

        let distance = (original.total - Decimal::ONE_HUNDRED).abs();
        prop_assert_eq!(original.valid, distance < Decimal::new(1, 2));
    }

    /// Export then import reproduces the payload-visible state.
    #[test]
    fn snapshot_round_trip_preserves_state(
        days in prop::collection::vec(arb_decimal(1..2_000), 1..5),
        uplift_allocation in arb_decimal(1..150),
        max_uplift in arb_decimal(0..100),
    ) {
        let mut engine = PricingEngine::new(reference_model());
        engine.set_client_name("Acme Ltd");
        engine.set_max_uplift(max_uplift);
        engine.add_factor(FactorCategory::Uplift, FactorInput {
            id: None,
            name: "Generated".to_string(),
            allocation: uplift_allocation,
            selected: None,
        });
        for (i, days) in days.into_iter().enumerate() {
            engine.add_task(TaskInput {
                id: None,
                name: format!("Task {}", i),
                days,
            });
        }

        let json = engine.export_json().unwrap();
        let mut restored = PricingEngine::new(RateModel::new());
        restored.import_json(&json).unwrap();

        prop_assert_eq!(restored.client_name(), engine.client_name());
        prop_assert_eq!(restored.tasks(), engine.tasks());
        prop_assert_eq!(
            restored.factors(FactorCategory::Uplift),
            engine.factors(FactorCategory::Uplift)
        );
        prop_assert_eq!(restored.max_uplift(), engine.max_uplift());
        prop_assert_eq!(restored.base_project_cost(), engine.base_project_cost());
        prop_assert_eq!(restored.final_project_cost(), engine.final_project_cost());
    }
}
