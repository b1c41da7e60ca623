//! End-to-end tests for mzxic
//!
//! These tests run a synthetic DIA acquisition through index build, parallel
//! extraction and scoring.

use std::io::Write;

use mzxic::prelude::*;
use tempfile::NamedTempFile;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A synthetic DIA run: one MS1 survey followed by `windows` MS2 scans per
/// cycle, each window 25 m/z wide starting at 400.
///
/// Every MS2 scan carries a Gaussian elution profile for three fragments
/// (300.15, 450.22, 612.31) in window 2, apexed at RT 5.0, plus a noise peak.
fn synthetic_run(cycles: usize, windows: usize) -> Vec<Scan> {
    let mut scans = Vec::new();
    let mut scan_number = 1;
    for cycle in 0..cycles {
        let cycle_rt = cycle as f64 * 0.1;

        scans.push(Scan::new_ms1(
            scan_number,
            cycle_rt,
            PeakArrays::new(vec![500.0, 600.0], vec![1e6, 2e6]),
        ));
        scan_number += 1;

        for w in 0..windows {
            let rt = cycle_rt + w as f64 * 0.001;
            let center = 412.5 + 25.0 * w as f64;
            let mut builder = ScanBuilder::new(scan_number)
                .ms_level(2)
                .retention_time(rt)
                .isolation(center, 25.0);

            if w == 2 {
                let elution = (-((rt - 5.0) * (rt - 5.0)) / 0.5).exp() as f32;
                builder = builder
                    .add_peak(300.15, 1000.0 * elution)
                    .add_peak(450.22, 600.0 * elution)
                    .add_peak(612.31, 300.0 * elution);
            }
            scans.push(builder.add_peak(777.7, 5.0).build());
            scan_number += 1;
        }
    }
    scans
}

/// Test the complete build -> extract -> score cycle
#[test]
fn test_full_pipeline() {
    init_logging();

    let scans = synthetic_run(100, 8);
    let index = ScanIndexBuilder::build(&scans).unwrap();

    assert_eq!(index.scan_count(), 800);
    assert_eq!(index.window_count(), 8);
    assert_eq!(index.stats().scans_skipped, 100);

    let window = index.find_window_for_precursor_mz(470.0).unwrap();
    assert_eq!(window, 2);

    let fragments = [300.15f32, 450.22, 612.31];
    let queries: Vec<FragmentQuery> = fragments
        .iter()
        .enumerate()
        .map(|(i, &mz)| FragmentQuery::new(mz, 20.0, 3.0, 7.0, window, i as u64))
        .collect();

    let output = ExtractionOrchestrator::new(&index, false).extract_all(&queries, 3);

    assert_eq!(output.len(), 3);
    for (result, rt, intensity) in output.xics() {
        // 41 cycles between RT 3.0 and 7.0 inclusive, allowing for f32 rounding at the edges
        assert!((39..=41).contains(&result.data_point_count), "{:?}", result);
        assert!(rt.iter().all(|&t| (3.0..=7.0).contains(&t)));

        // Apex near RT 5.0
        let apex = intensity
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| rt[i])
            .unwrap();
        assert!((apex - 5.0).abs() < 0.15, "apex at {}", apex);
    }

    // Relative totals follow the 1000:600:300 library ratio
    let library = [1000.0, 600.0, 300.0];
    let observed: Vec<f32> = output.results.iter().map(|r| r.total_intensity).collect();
    assert!(normalized_dot_product(&library, &observed) > 0.999);
    assert!(spectral_angle(&library, &observed) > 0.97);

    // Noise fragment queried in the wrong window finds nothing
    let wrong = [FragmentQuery::new(300.15, 20.0, 0.0, 100.0, 5, 99)];
    let output = ExtractionOrchestrator::new(&index, true).extract_all(&wrong, 1);
    assert_eq!(output.total_data_points, 0);
}

/// Every backend returns the same points as the CPU reference
#[test]
fn test_backends_agree() {
    init_logging();

    let scans = synthetic_run(60, 8);
    let index = ScanIndexBuilder::build(&scans).unwrap();

    let queries: Vec<FragmentQuery> = (0..8u32)
        .flat_map(|w| {
            [300.15f32, 450.22, 612.31, 777.7]
                .into_iter()
                .map(move |mz| FragmentQuery::new(mz, 15.0, 0.0, 6.0, w, (w as u64) << 8 | mz as u64))
        })
        .collect();

    let cpu = ExtractionOrchestrator::new(&index, true).extract_all(&queries, 1);
    let auto = ExtractionOrchestrator::new(&index, false).extract_all(&queries, 5);

    assert_eq!(cpu.total_data_points, auto.total_data_points);
    assert_eq!(cpu.rt_buffer, auto.rt_buffer);
    for (a, b) in cpu.intensity_buffer.iter().zip(&auto.intensity_buffer) {
        assert!((a - b).abs() <= 1e-4 * a.abs().max(1.0));
    }
}

/// Orchestrator configured from a TOML file on disk
#[test]
fn test_config_file_drives_orchestrator() {
    init_logging();

    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[engine]\nprefer_cpu = true\nmax_parallelism = 2\ndefault_tolerance_ppm = 15.0"
    )
    .unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.engine.max_parallelism, 2);

    let scans = synthetic_run(20, 4);
    let index = ScanIndexBuilder::build(&scans).unwrap();
    let tolerance = config.engine.default_tolerance_ppm;
    let queries = vec![
        FragmentQuery::new(777.7, tolerance, 0.0, 10.0, 0, 0),
        FragmentQuery::new(777.7, tolerance, 0.0, 10.0, 3, 1),
    ];

    let orchestrator = ExtractionOrchestrator::from_config(&index, &config.engine);
    let output = orchestrator.extract(&queries);

    assert_eq!(output.total_data_points, 40);
    assert_eq!(output.xic(1).1, &[5.0; 20]);
}

/// Direct use of the factory outside the orchestrator
#[test]
fn test_factory_round() {
    let scans = synthetic_run(10, 2);
    let index = ScanIndexBuilder::build(&scans).unwrap();

    let mut extractor = ExtractorFactory::create(&index, false);
    let queries = [FragmentQuery::new(777.7, 10.0, 0.0, 10.0, 1, 5)];
    let mut results = [FragmentResult::default()];
    let mut rt = vec![0.0f32; index.max_scans_per_window()];
    let mut intensity = vec![0.0f32; index.max_scans_per_window()];

    let total = extractor.extract_batch(&queries, &mut results, &mut rt, &mut intensity);
    extractor.release();

    assert_eq!(total, 10);
    assert_eq!(results[0].query_id, 5);
    assert_eq!(results[0].total_intensity, 50.0);
}

/// Teardown leaves a consistent empty index
#[test]
fn test_release_after_extraction() {
    let scans = synthetic_run(5, 2);
    let mut index = ScanIndexBuilder::build(&scans).unwrap();
    {
        let output = ExtractionOrchestrator::new(&index, true)
            .extract_all(&[FragmentQuery::new(777.7, 10.0, 0.0, 10.0, 0, 0)], 2);
        assert_eq!(output.total_data_points, 5);
    }

    index.release();
    index.release();
    assert!(index.is_released());

    let output = ExtractionOrchestrator::new(&index, true)
        .extract_all(&[FragmentQuery::new(777.7, 10.0, 0.0, 10.0, 0, 0)], 2);
    assert_eq!(output.total_data_points, 0);
}
