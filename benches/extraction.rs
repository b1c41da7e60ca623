use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mzxic::prelude::*;

/// Synthetic DIA run with `windows` isolation windows, `cycles` cycles and
/// `peaks` peaks per MS2 scan.
fn create_index(cycles: usize, windows: usize, peaks: usize) -> ScanIndex {
    let mut scans = Vec::with_capacity(cycles * windows);
    for cycle in 0..cycles {
        for w in 0..windows {
            let mz: Vec<f64> = (0..peaks)
                .map(|p| 150.0 + p as f64 * (1800.0 / peaks as f64) + w as f64 * 0.01)
                .collect();
            let intensity: Vec<f32> = (0..peaks)
                .map(|p| 1000.0 + ((cycle + p) % 97) as f32 * 10.0)
                .collect();
            scans.push(
                ScanBuilder::new((cycle * windows + w) as i64)
                    .ms_level(2)
                    .retention_time(cycle as f64 * 0.05)
                    .isolation(400.0 + 25.0 * w as f64, 25.0)
                    .peaks(mz, intensity)
                    .build(),
            );
        }
    }
    ScanIndexBuilder::build(&scans).unwrap()
}

fn create_queries(index: &ScanIndex, count: usize) -> Vec<FragmentQuery> {
    let windows = index.window_count() as u32;
    let (rt_lo, rt_hi) = index.global_rt_range().unwrap_or((0.0, 0.0));
    let span = (rt_hi - rt_lo).max(1.0);
    (0..count)
        .map(|i| {
            let rt_center = rt_lo + span * ((i * 37) % 100) as f32 / 100.0;
            FragmentQuery::new(
                150.0 + ((i * 13) % 1800) as f32,
                10.0,
                rt_center - 1.0,
                rt_center + 1.0,
                i as u32 % windows,
                i as u64,
            )
        })
        .collect()
}

/// Single-threaded batch throughput per backend
fn bench_extract_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_batch");
    let index = create_index(400, 32, 300);
    let queries = create_queries(&index, 5_000);
    let capacity = queries.len() * index.max_scans_per_window();

    let mut results = vec![FragmentResult::default(); queries.len()];
    let mut rt = vec![0.0f32; capacity];
    let mut intensity = vec![0.0f32; capacity];

    group.throughput(Throughput::Elements(queries.len() as u64));

    for prefer_cpu in [true, false] {
        let label = ExtractorFactory::describe_backend(prefer_cpu);
        group.bench_function(BenchmarkId::from_parameter(label), |b| {
            let mut extractor = ExtractorFactory::create(&index, prefer_cpu);
            b.iter(|| {
                let total = extractor.extract_batch(
                    black_box(&queries),
                    &mut results,
                    &mut rt,
                    &mut intensity,
                );
                black_box(total);
            });
        });
    }

    group.finish();
}

/// Orchestrated extraction at different partition counts
fn bench_orchestrator(c: &mut Criterion) {
    let mut group = c.benchmark_group("orchestrator");
    let index = create_index(400, 32, 300);
    let queries = create_queries(&index, 20_000);
    let orchestrator = ExtractionOrchestrator::new(&index, false);

    group.throughput(Throughput::Elements(queries.len() as u64));

    for parallelism in [1, 2, 4, 8] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}workers", parallelism)),
            &parallelism,
            |b, &parallelism| {
                b.iter(|| {
                    let output = orchestrator.extract_all(black_box(&queries), parallelism);
                    black_box(output.total_data_points);
                });
            },
        );
    }

    group.finish();
}

/// Scoring cost for typical fragment-vector lengths
fn bench_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("scoring");

    for len in [6, 12, 24] {
        let a: Vec<f32> = (0..len).map(|i| (i * 7 % 11) as f32).collect();
        let b: Vec<f32> = (0..len).map(|i| (i * 5 % 13) as f32).collect();

        group.bench_with_input(BenchmarkId::new("dot_product", len), &len, |bench, _| {
            bench.iter(|| black_box(normalized_dot_product(black_box(&a), black_box(&b))));
        });
        group.bench_with_input(BenchmarkId::new("spectral_angle", len), &len, |bench, _| {
            bench.iter(|| black_box(spectral_angle(black_box(&a), black_box(&b))));
        });
    }

    group.finish();
}

/// CPU vs SIMD as the in-tolerance run grows from a couple of peaks to hundreds
#[cfg(feature = "simd")]
fn bench_peak_run_width(c: &mut Criterion) {
    let mut group = c.benchmark_group("peak_run_width");

    // 0.005 m/z spacing around 500: 10 ppm spans ~2 peaks, 1000 ppm ~200
    let scans: Vec<Scan> = (0..200)
        .map(|cycle| {
            let mz: Vec<f64> = (0..4000).map(|p| 490.0 + p as f64 * 0.005).collect();
            let intensity: Vec<f32> = (0..4000).map(|p| (p % 31) as f32 + 1.0).collect();
            ScanBuilder::new(cycle)
                .ms_level(2)
                .retention_time(cycle as f64 * 0.05)
                .isolation(500.0, 25.0)
                .peaks(mz, intensity)
                .build()
        })
        .collect();
    let index = ScanIndexBuilder::build(&scans).unwrap();

    for ppm in [10.0f32, 100.0, 1000.0] {
        let queries: Vec<FragmentQuery> = (0..500)
            .map(|i| FragmentQuery::new(495.0 + i as f32 * 0.02, ppm, 0.0, 10.0, 0, i as u64))
            .collect();
        let capacity = queries.len() * index.max_scans_per_window();
        let mut results = vec![FragmentResult::default(); queries.len()];
        let mut rt = vec![0.0f32; capacity];
        let mut intensity = vec![0.0f32; capacity];

        group.bench_with_input(BenchmarkId::new("cpu", ppm), &queries, |b, queries| {
            let mut extractor = CpuFragmentExtractor::new(&index);
            b.iter(|| {
                black_box(extractor.extract_batch(queries, &mut results, &mut rt, &mut intensity))
            });
        });
        group.bench_with_input(BenchmarkId::new("simd", ppm), &queries, |b, queries| {
            let mut extractor = SimdFragmentExtractor::new(&index);
            b.iter(|| {
                black_box(extractor.extract_batch(queries, &mut results, &mut rt, &mut intensity))
            });
        });
    }

    group.finish();
}

#[cfg(not(feature = "simd"))]
fn bench_peak_run_width(_c: &mut Criterion) {}

criterion_group!(
    benches,
    bench_extract_batch,
    bench_orchestrator,
    bench_scoring,
    bench_peak_run_width
);
criterion_main!(benches);
