//! Translation benchmarks.
//!
//! Measures parse, pre-check and translation over the fixtures in
//! `test_scripts/` and over generated sources of growing size.
//!
//! Run with the `profile-with-puffin` feature to see where the time goes:
//!
//! ```bash
//! cargo bench --features profile-with-puffin -- --profile-time 5
//! ```

use bumpalo::Bump;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use pyjs::{Parser, Translator};
use std::hint::black_box;

#[cfg(feature = "profile-with-puffin")]
use std::collections::HashMap;

#[cfg(feature = "profile-with-puffin")]
static FRAME_VIEW: std::sync::OnceLock<puffin::GlobalFrameView> = std::sync::OnceLock::new();

#[cfg(feature = "profile-with-puffin")]
fn setup_profiler() {
    puffin::set_scopes_on(true);
    FRAME_VIEW.get_or_init(puffin::GlobalFrameView::default);
}

#[cfg(not(feature = "profile-with-puffin"))]
fn setup_profiler() {}

#[cfg(feature = "profile-with-puffin")]
fn end_profiling_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}

#[cfg(not(feature = "profile-with-puffin"))]
fn end_profiling_frame() {}

/// Print the average time spent in each top-level profiling scope.
#[cfg(feature = "profile-with-puffin")]
fn print_profiling_stats() {
    use puffin::Reader;

    let Some(frame_view) = FRAME_VIEW.get() else {
        return;
    };
    let view = frame_view.lock();
    let scope_collection = view.scope_collection();

    let mut timings: HashMap<String, i64> = HashMap::new();
    let mut frames = 0i64;
    for frame in view.recent_frames() {
        frames += 1;
        let Ok(unpacked) = frame.unpacked() else {
            continue;
        };
        for (_thread, stream_info) in unpacked.thread_streams.iter() {
            let reader = Reader::from_start(&stream_info.stream);
            let Ok(scopes) = reader.read_top_scopes() else {
                continue;
            };
            for scope in scopes {
                if let Some(details) = scope_collection.fetch_by_id(&scope.id) {
                    *timings.entry(details.name().to_string()).or_default() +=
                        scope.record.duration_ns;
                }
            }
        }
    }

    println!("\n=== Profiling Summary ({frames} frames) ===");
    let mut entries: Vec<_> = timings.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    for (name, ns) in entries {
        let avg = if frames > 0 { ns / frames } else { ns };
        println!(
            "  {name:30} {:>10.2?} avg",
            std::time::Duration::from_nanos(avg as u64)
        );
    }
}

#[cfg(not(feature = "profile-with-puffin"))]
fn print_profiling_stats() {}

/// A module with `count` functions, each calling the previous one.
fn generated_source(count: usize) -> String {
    let mut source = String::from("def f0(n):\n    return n\n\n");
    for i in 1..count {
        source.push_str(&format!(
            "\
def f{i}(n):
    total = 0
    for k in range(n):
        if k % 2 == 0:
            total += f{}(k)
    return total

",
            i - 1
        ));
    }
    source.push_str(&format!("print(f{}(10))\n", count - 1));
    source
}

fn translate(source: &str) -> String {
    let arena = Bump::new();
    let module = Parser::parse(source, &arena).unwrap();
    Translator::new().translate(&module).unwrap()
}

fn fixture_benchmarks(c: &mut Criterion) {
    setup_profiler();
    let mut group = c.benchmark_group("translate/fixtures");

    for (name, source) in [
        ("fizzbuzz", include_str!("../test_scripts/fizzbuzz.py")),
        ("shapes", include_str!("../test_scripts/shapes.py")),
        ("errors", include_str!("../test_scripts/errors.py")),
    ] {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| {
                let js = translate(black_box(source));
                end_profiling_frame();
                black_box(js.len())
            });
        });
    }

    group.finish();
}

fn size_benchmarks(c: &mut Criterion) {
    setup_profiler();
    let mut group = c.benchmark_group("translate/sizes");

    for count in [10, 100, 1000] {
        let source = generated_source(count);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::new("translate", count), &source, |b, source| {
            b.iter(|| {
                let js = translate(black_box(source));
                end_profiling_frame();
                black_box(js.len())
            });
        });
        group.bench_with_input(BenchmarkId::new("precheck", count), &source, |b, source| {
            b.iter(|| black_box(pyjs::check(black_box(source)).len()));
        });
    }

    group.finish();
    print_profiling_stats();
}

criterion_group!(benches, fixture_benchmarks, size_benchmarks);
criterion_main!(benches);
