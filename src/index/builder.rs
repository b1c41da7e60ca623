use std::collections::HashMap;

use log::{debug, info};

use super::error::IndexError;
use super::scan_index::ScanIndex;
use super::stats::IndexStats;
use super::window::IsolationWindow;
use crate::scan::Scan;

/// One-shot transform from parsed scan records into a [`ScanIndex`].
///
/// The build runs in a single explicit filtering pass followed by a packing
/// pass:
///
/// 1. Drop absent records, non-MS2 scans and MS2 scans without an isolation center
/// 2. Assign window ids in order of first appearance of each distinct center
/// 3. Order retained scans by (window id, retention time)
/// 4. Copy peaks into the contiguous `f32` arrays, re-sorting by m/z where needed
/// 5. Record each window's contiguous scan range
///
/// Isolation centers are grouped by exact value. Scans whose centers differ by
/// any amount end up in different windows.
///
/// ```rust
/// use mzxic::index::ScanIndexBuilder;
/// use mzxic::scan::ScanBuilder;
///
/// let scans = vec![
///     ScanBuilder::new(1).ms_level(2).retention_time(1.0).isolation(500.0, 25.0)
///         .add_peak(200.0, 100.0).build(),
///     ScanBuilder::new(2).ms_level(1).retention_time(1.1).add_peak(400.0, 50.0).build(),
/// ];
///
/// let index = ScanIndexBuilder::build(&scans)?;
/// assert_eq!(index.scan_count(), 1);
/// assert_eq!(index.window_count(), 1);
/// # Ok::<(), mzxic::index::IndexError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanIndexBuilder;

/// Per-window bookkeeping while discovering windows.
struct WindowSeed {
    center: f64,
    width: Option<f64>,
}

impl ScanIndexBuilder {
    /// Build an index from a sequence of scan references.
    ///
    /// Accepts anything that yields `&Scan` or `Option<&Scan>`; absent entries
    /// are skipped. For a `&[Option<Scan>]`, pass `scans.iter().map(Option::as_ref)`.
    pub fn build<'s, I>(scans: I) -> Result<ScanIndex, IndexError>
    where
        I: IntoIterator,
        I::Item: Into<Option<&'s Scan>>,
    {
        let mut stats = IndexStats::default();

        // Step 1: explicit filtering pass into a dense list
        let mut retained: Vec<&Scan> = Vec::new();
        for item in scans {
            stats.scans_considered += 1;
            let Some(scan) = item.into() else {
                continue;
            };
            if !scan.is_dia_eligible() {
                continue;
            }
            if scan.peaks.mz.len() != scan.peaks.intensity.len() {
                return Err(IndexError::PeakArrayLengthMismatch {
                    scan_number: scan.scan_number,
                    mz_len: scan.peaks.mz.len(),
                    intensity_len: scan.peaks.intensity.len(),
                });
            }
            if !scan.retention_time.is_finite() {
                return Err(IndexError::NonFiniteRetentionTime {
                    scan_number: scan.scan_number,
                });
            }
            // Stored as f32 and binary-searched; NaN or overflow would break the ordering
            if let Some(&mz) = scan.peaks.mz.iter().find(|&&mz| !(mz as f32).is_finite()) {
                return Err(IndexError::NonFiniteMz {
                    scan_number: scan.scan_number,
                    mz,
                });
            }
            retained.push(scan);
        }
        stats.scans_skipped = stats.scans_considered - retained.len();

        if retained.is_empty() {
            info!("{}", stats);
            return Ok(ScanIndex::empty_with_stats(stats));
        }

        // Step 2: window ids by first appearance of each exact center
        let (seeds, scan_window_ids) = discover_windows(&retained);
        debug!(
            "Discovered {} isolation windows from {} MS2 scans",
            seeds.len(),
            retained.len()
        );

        // Step 3: order by (window id, RT); stable so equal RTs keep input order
        let mut order: Vec<usize> = (0..retained.len()).collect();
        order.sort_by(|&a, &b| {
            scan_window_ids[a].cmp(&scan_window_ids[b]).then_with(|| {
                retained[a]
                    .retention_time
                    .total_cmp(&retained[b].retention_time)
            })
        });

        // Step 4: exact-size allocation, then pack
        let total_peaks: usize = retained.iter().map(|s| s.peak_count()).sum();
        if total_peaks > u32::MAX as usize {
            return Err(IndexError::TooManyPeaks(total_peaks));
        }

        let scan_count = retained.len();
        let mut all_mz = Vec::with_capacity(total_peaks);
        let mut all_intensity = Vec::with_capacity(total_peaks);
        let mut scan_offsets = Vec::with_capacity(scan_count);
        let mut scan_lengths = Vec::with_capacity(scan_count);
        let mut scan_rts = Vec::with_capacity(scan_count);
        let mut window_ids = Vec::with_capacity(scan_count);
        let mut scan_numbers = Vec::with_capacity(scan_count);
        let mut permutation: Vec<usize> = Vec::new();

        for &source in &order {
            let scan = retained[source];
            let peaks = &scan.peaks;

            scan_offsets.push(all_mz.len() as u32);
            scan_lengths.push(peaks.len() as u32);
            scan_rts.push(scan.retention_time as f32);
            window_ids.push(scan_window_ids[source]);
            scan_numbers.push(scan.scan_number);

            if peaks.is_sorted_by_mz() {
                all_mz.extend(peaks.mz.iter().map(|&mz| mz as f32));
                all_intensity.extend_from_slice(&peaks.intensity);
            } else {
                stats.scans_resorted += 1;
                permutation.clear();
                permutation.extend(0..peaks.len());
                permutation.sort_by(|&a, &b| peaks.mz[a].total_cmp(&peaks.mz[b]));
                all_mz.extend(permutation.iter().map(|&p| peaks.mz[p] as f32));
                all_intensity.extend(permutation.iter().map(|&p| peaks.intensity[p]));
            }
        }

        // Step 5: window -> contiguous scan range
        let windows = build_window_table(&seeds, &window_ids);

        stats.scans_indexed = scan_count;
        stats.peaks_indexed = all_mz.len();
        stats.windows = windows.len();
        info!("{}", stats);
        if stats.scans_resorted > 0 {
            debug!("Re-sorted peaks of {} scans by m/z", stats.scans_resorted);
        }

        Ok(ScanIndex::from_parts(
            all_mz,
            all_intensity,
            scan_offsets,
            scan_lengths,
            scan_rts,
            window_ids,
            scan_numbers,
            windows,
            stats,
        ))
    }
}

/// Assign dense window ids by first appearance of each distinct isolation center.
///
/// Centers are compared bit-for-bit. The first scan of a window that carries a
/// width defines the window bounds.
fn discover_windows(scans: &[&Scan]) -> (Vec<WindowSeed>, Vec<u32>) {
    let mut by_center: HashMap<u64, u32> = HashMap::new();
    let mut seeds: Vec<WindowSeed> = Vec::new();
    let mut scan_window_ids = Vec::with_capacity(scans.len());

    for scan in scans {
        // Eligibility was checked during filtering
        let center = scan.isolation_center.unwrap_or_default();
        let id = *by_center.entry(center.to_bits()).or_insert_with(|| {
            seeds.push(WindowSeed {
                center,
                width: None,
            });
            (seeds.len() - 1) as u32
        });

        let seed = &mut seeds[id as usize];
        if seed.width.is_none() {
            seed.width = scan.isolation_width;
        }
        scan_window_ids.push(id);
    }

    (seeds, scan_window_ids)
}

/// Walk the (window, RT)-ordered window id column and record each window's range.
fn build_window_table(seeds: &[WindowSeed], window_ids: &[u32]) -> Vec<IsolationWindow> {
    let mut windows: Vec<IsolationWindow> = seeds
        .iter()
        .enumerate()
        .map(|(id, seed)| {
            let half_width = seed.width.map_or(0.0, |w| w / 2.0);
            IsolationWindow {
                id: id as u32,
                center: seed.center,
                lower_bound: (seed.center - half_width) as f32,
                upper_bound: (seed.center + half_width) as f32,
                scan_start: 0,
                scan_count: 0,
            }
        })
        .collect();

    let mut start = 0;
    while start < window_ids.len() {
        let id = window_ids[start];
        let end = start
            + window_ids[start..]
                .iter()
                .take_while(|&&w| w == id)
                .count();
        let window = &mut windows[id as usize];
        window.scan_start = start;
        window.scan_count = end - start;
        start = end;
    }

    windows
}
