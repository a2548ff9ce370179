// ─────────────────────────────────────────────────────────────────────
// Selenium Exposure Kernel — Pipeline Benchmarks
// ─────────────────────────────────────────────────────────────────────
//! Criterion benchmarks for the per-frame hot path.
//!
//! `compute` runs once per display refresh, so it has to stay far below
//! a frame budget (8 ms at 120 Hz).

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use exposure_core::stops::{ISO_TABLE, SHUTTER_TABLE};
use exposure_core::{ev_at_ref, ExposureController, LockSet};
use exposure_types::{ExposureConfig, MeteredReading, Parameter, SceneKind, SceneReading};

// ── Helpers ───────────────────────────────────────────────────────────

fn make_controller(bias: bool) -> ExposureController {
    let mut c = ExposureController::new(ExposureConfig::default()).unwrap();
    c.set_bias_enabled(bias);
    c.update_scene(Some(SceneReading::new(SceneKind::Portrait, 0.8)));
    c
}

fn make_reading() -> MeteredReading {
    MeteredReading::new(1.8, 1.0 / 120.0, 250.0)
}

// ── Leaf functions ────────────────────────────────────────────────────

fn bench_ev_at_ref(c: &mut Criterion) {
    c.bench_function("ev_at_ref", |b| {
        b.iter(|| ev_at_ref(black_box(1.8), black_box(1.0 / 120.0), black_box(250.0)))
    });
}

fn bench_quantize_shutter(c: &mut Criterion) {
    c.bench_function("quantize_shutter", |b| {
        b.iter(|| SHUTTER_TABLE.quantize(black_box(0.00766)))
    });
}

fn bench_quantize_iso(c: &mut Criterion) {
    c.bench_function("quantize_iso", |b| b.iter(|| ISO_TABLE.quantize(black_box(382.8))));
}

// ── Full pipeline ─────────────────────────────────────────────────────

fn bench_compute_no_bias(c: &mut Criterion) {
    let mut controller = make_controller(false);
    let reading = make_reading();
    c.bench_function("compute_no_bias", |b| {
        b.iter(|| controller.compute(black_box(&reading)))
    });
}

fn bench_compute_with_bias(c: &mut Criterion) {
    let mut controller = make_controller(true);
    let reading = make_reading();
    c.bench_function("compute_with_bias", |b| {
        b.iter(|| controller.compute(black_box(&reading)))
    });
}

fn bench_compute_each_lock(c: &mut Criterion) {
    let reading = make_reading();
    for (name, free) in [
        ("compute_free_shutter", Parameter::Shutter),
        ("compute_free_aperture", Parameter::Aperture),
        ("compute_free_iso", Parameter::Iso),
    ] {
        let mut controller = make_controller(true);
        controller.select_lock(LockSet::with_free(free));
        c.bench_function(name, |b| b.iter(|| controller.compute(black_box(&reading))));
    }
}

fn bench_capture(c: &mut Criterion) {
    let controller = make_controller(true);
    let reading = make_reading();
    c.bench_function("capture", |b| b.iter(|| controller.capture(black_box(&reading))));
}

criterion_group!(
    benches,
    bench_ev_at_ref,
    bench_quantize_shutter,
    bench_quantize_iso,
    bench_compute_no_bias,
    bench_compute_with_bias,
    bench_compute_each_lock,
    bench_capture,
);
criterion_main!(benches);
