use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

use win_reveal::{
    background_tiles, run_headless, CanvasSize, RevealConfig, RevealStage, ScheduledReveal,
    SpeedMode, TokenCurve,
};

fn bench_pose_curve(c: &mut Criterion) {
    let curve = TokenCurve::default();
    let canvas = CanvasSize::fit_width(720.0);
    c.bench_function("token_pose_1000_samples", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for step in 0..1_000 {
                let pose = curve.pose(step as f64 / 1_000.0, 3_000.0, canvas);
                acc += pose.x + pose.rotation;
            }
            acc
        })
    });
}

fn bench_background_tiles(c: &mut Criterion) {
    c.bench_function("background_tiles_wide_canvas", |b| {
        b.iter(|| background_tiles(1_234.5, 499.0, 3_840.0))
    });
}

fn bench_stage_frames(c: &mut Criterion) {
    c.bench_function("stage_fast_reveal_to_commit", |b| {
        b.iter_batched(
            RevealStage::headless,
            |mut stage| {
                stage.speed().set(SpeedMode::Fast);
                stage.reveal(2.0, 100.0, 0.0).ok();
                let mut now = 0.0;
                while stage.is_busy() {
                    now += 16.0;
                    stage.frame(now);
                }
                stage.history().len()
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_headless_trace(c: &mut Criterion) {
    let config = RevealConfig {
        speed_mode: SpeedMode::Fast,
        ..RevealConfig::default()
    };
    let script: Vec<ScheduledReveal> = (0..5)
        .map(|index| ScheduledReveal {
            at_ms: index as f64 * 400.0,
            multiplier: 0.5 + index as f64 * 0.5,
            bet_amount: 100.0,
        })
        .collect();
    c.bench_function("headless_trace_five_reveals", |b| {
        b.iter(|| run_headless(config.clone(), &script, 16.0).map(|trace| trace.frames.len()))
    });
}

criterion_group!(
    benches,
    bench_pose_curve,
    bench_background_tiles,
    bench_stage_frames,
    bench_headless_trace
);
criterion_main!(benches);
