//! Performance benchmarks for the Pricing Engine.
//!
//! This benchmark suite verifies that the recompute cascade stays cheap:
//! - Single recompute over a small project: < 10μs mean
//! - Recompute over 250 tasks: < 100μs mean
//! - Snapshot export/import round trip: < 1ms mean
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use pricing_engine::api::{AppState, create_router};
use pricing_engine::calculation::{PricingEngine, RateModel, RateModelUpdate};
use pricing_engine::models::{FactorCategory, FactorInput, TaskInput};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Builds an engine with the reference model and a given project size.
fn create_engine(task_count: usize, factor_count: usize) -> PricingEngine {
    let mut model = RateModel::new();
    model.update(RateModelUpdate {
        salary_budget: Some(Decimal::from(100_000)),
        growth_budget: Some(Decimal::from(20_000)),
        ..Default::default()
    });

    let mut engine = PricingEngine::new(model);
    for i in 0..factor_count {
        engine.add_factor(
            FactorCategory::Uplift,
            FactorInput {
                id: None,
                name: format!("Uplift factor {}", i),
                allocation: Decimal::from(100 / factor_count.max(1) as u32),
                selected: None,
            },
        );
        engine.add_factor(
            FactorCategory::Discount,
            FactorInput {
                id: None,
                name: format!("Discount factor {}", i),
                allocation: Decimal::from(100 / factor_count.max(1) as u32),
                selected: None,
            },
        );
    }
    for i in 0..task_count {
        engine.add_task(TaskInput {
            id: None,
            name: format!("Task {:03}", i),
            days: Decimal::from((i % 20) + 1),
        });
    }
    engine
}

/// Benchmark: one full recompute over a typical small project.
///
/// Target: < 10μs mean
fn bench_recompute_small(c: &mut Criterion) {
    let mut engine = create_engine(5, 4);
    let caps = [Decimal::from(20), Decimal::from(25)];
    let mut flip = 0usize;

    c.bench_function("recompute_small", |b| {
        b.iter(|| {
            // set_max_uplift runs the full cascade.
            engine.set_max_uplift(caps[flip % 2]);
            flip += 1;
            black_box(engine.final_project_cost())
        })
    });
}

/// Benchmark: recompute scaling across task counts.
fn bench_recompute_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("recompute_scaling");

    for task_count in [1usize, 10, 50, 250] {
        let mut engine = create_engine(task_count, 4);
        let caps = [Decimal::from(20), Decimal::from(25)];
        let mut flip = 0usize;

        group.throughput(Throughput::Elements(task_count as u64));
        group.bench_with_input(
            BenchmarkId::new("tasks", task_count),
            &task_count,
            |b, _| {
                b.iter(|| {
                    engine.set_max_uplift(caps[flip % 2]);
                    flip += 1;
                    black_box(engine.base_project_cost())
                })
            },
        );
    }

    group.finish();
}

/// Benchmark: snapshot export/import round trip.
///
/// Target: < 1ms mean
fn bench_snapshot_round_trip(c: &mut Criterion) {
    let engine = create_engine(50, 4);
    let json = engine.export_json().expect("export failed");

    c.bench_function("snapshot_round_trip", |b| {
        b.iter(|| {
            let exported = engine.export_json().expect("export failed");
            let mut restored = create_engine(0, 0);
            restored.import_json(&exported).expect("import failed");
            black_box(restored.final_project_cost())
        })
    });

    c.bench_function("snapshot_import_only", |b| {
        b.iter(|| {
            let mut restored = create_engine(0, 0);
            restored.import_json(&json).expect("import failed");
            black_box(restored.final_project_cost())
        })
    });
}

/// Benchmark: a full session flow through the HTTP API.
fn bench_api_session_flow(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = AppState::default();
    let router = create_router(state);

    c.bench_function("api_session_flow", |b| {
        b.to_async(&rt).iter(|| {
            let router = router.clone();
            async move {
                let response = router
                    .clone()
                    .oneshot(
                        Request::builder()
                            .method("POST")
                            .uri("/sessions")
                            .header("Content-Type", "application/json")
                            .body(Body::from(
                                r#"{"model": {"salary_budget": "100000", "growth_budget": "20000"}}"#,
                            ))
                            .unwrap(),
                    )
                    .await
                    .unwrap();
                let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                    .await
                    .unwrap();
                let created: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
                let id = created["session_id"].as_str().unwrap();

                let response = router
                    .oneshot(
                        Request::builder()
                            .method("POST")
                            .uri(format!("/sessions/{}/tasks", id))
                            .header("Content-Type", "application/json")
                            .body(Body::from(r#"{"name": "Build", "days": "10"}"#))
                            .unwrap(),
                    )
                    .await
                    .unwrap();
                black_box(response)
            }
        })
    });
}

criterion_group!(
    benches,
    bench_recompute_small,
    bench_recompute_scaling,
    bench_snapshot_round_trip,
    bench_api_session_flow,
);
criterion_main!(benches);
