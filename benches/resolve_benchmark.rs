//! Resolution throughput benchmarks.
//!
//! A two-hour transcript has on the order of 2,000 cues and is resolved on
//! every playback tick, so `resolve` must stay logarithmic.
//!
//! Run with: cargo bench

#![allow(missing_docs)] // criterion macros generate undocumented items

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cuesync::engine::{EngineConfig, SyncEngine};
use cuesync::formatter::{join_all, JoinStyle};
use cuesync::model::{Cue, SourceUrl};
use cuesync::resolver::{resolve, BoundaryPolicy};
use cuesync::scroll::LineLayoutSnapshot;

/// Back-to-back cues of 2.5 s with a 0.5 s gap after each.
fn generate_cues(count: usize) -> Vec<Cue> {
    (0..count)
        .map(|i| {
            let start = i as u64 * 3_000;
            let text = if i % 12 == 11 {
                format!("sentence {} ends.\\n", i)
            } else {
                format!("words of cue {}", i)
            };
            Cue::new(i as u32, start, start + 2_500, text)
        })
        .collect()
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");

    for count in [100usize, 2_000, 50_000] {
        let cues = generate_cues(count);
        let span = count as u64 * 3_000;

        for policy in [BoundaryPolicy::Strict, BoundaryPolicy::NearestFallback] {
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", policy), count),
                &cues,
                |b, cues| {
                    let mut time = 0u64;
                    b.iter(|| {
                        time = (time + 1_237) % span;
                        black_box(resolve(cues, black_box(time), policy).index())
                    })
                },
            );
        }
    }

    group.finish();
}

fn bench_engine_tick(c: &mut Criterion) {
    let url = SourceUrl::new("bench://cues").expect("valid url");
    let cues = generate_cues(2_000);
    let span = 2_000u64 * 3_000;

    let mut engine = SyncEngine::new(EngineConfig::default());
    engine.tick(0, &url);
    engine.on_cues_loaded(&url, cues);
    engine.on_layout_measured(LineLayoutSnapshot::uniform(6_000, 18.0));

    c.bench_function("engine_tick_2000_cues", |b| {
        let mut time = 0u64;
        b.iter(|| {
            time = (time + 250) % span;
            black_box(engine.tick(black_box(time), &url))
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let cues = generate_cues(2_000);

    c.bench_function("join_all_2000_cues", |b| {
        b.iter(|| {
            black_box(join_all(
                cues.iter().map(|cue| cue.text.as_str()),
                JoinStyle::TrimAfterBreak,
            ))
        })
    });
}

criterion_group!(benches, bench_resolve, bench_engine_tick, bench_render);
criterion_main!(benches);
