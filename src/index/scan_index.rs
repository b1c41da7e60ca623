use std::ops::Range;

use super::stats::IndexStats;
use super::window::IsolationWindow;

/// Structure-of-Arrays container for DIA MS2 scan data.
///
/// All peaks of all retained scans are packed end-to-end into two contiguous
/// `f32` arrays (m/z and intensity). Each scan is then described by an offset
/// and a length into those arrays plus its retention time and window id.
///
/// Scans are ordered by window id, then by retention time ascending, so the
/// scans of one window form a contiguous, RT-sorted range of positions.
///
/// The index is immutable once built and is shared by reference across all
/// extraction workers without synchronization.
#[derive(Debug, Clone)]
pub struct ScanIndex {
    // Peak data, packed per scan in (window, RT) order
    all_mz: Vec<f32>,
    all_intensity: Vec<f32>,

    // Per-scan metadata, indexed by scan position
    scan_offsets: Vec<u32>,
    scan_lengths: Vec<u32>,
    scan_rts: Vec<f32>,
    scan_window_ids: Vec<u32>,
    scan_numbers: Vec<i64>,

    // Indexed by window id
    windows: Vec<IsolationWindow>,

    stats: IndexStats,
    released: bool,
}

impl ScanIndex {
    /// Assemble an index from pre-built columns. Called by the builder only.
    #[allow(clippy::too_many_arguments)]
    pub(super) fn from_parts(
        all_mz: Vec<f32>,
        all_intensity: Vec<f32>,
        scan_offsets: Vec<u32>,
        scan_lengths: Vec<u32>,
        scan_rts: Vec<f32>,
        scan_window_ids: Vec<u32>,
        scan_numbers: Vec<i64>,
        windows: Vec<IsolationWindow>,
        stats: IndexStats,
    ) -> Self {
        debug_assert_eq!(all_mz.len(), all_intensity.len());
        debug_assert_eq!(scan_offsets.len(), scan_lengths.len());
        debug_assert_eq!(scan_offsets.len(), scan_rts.len());
        debug_assert_eq!(scan_offsets.len(), scan_window_ids.len());
        debug_assert_eq!(scan_offsets.len(), scan_numbers.len());

        Self {
            all_mz,
            all_intensity,
            scan_offsets,
            scan_lengths,
            scan_rts,
            scan_window_ids,
            scan_numbers,
            windows,
            stats,
            released: false,
        }
    }

    /// An index with no scans and no windows.
    pub fn empty() -> Self {
        Self::empty_with_stats(IndexStats::default())
    }

    pub(super) fn empty_with_stats(stats: IndexStats) -> Self {
        Self::from_parts(
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            stats,
        )
    }

    // ==================== Counts ====================

    /// Total number of MS2 scans in this index.
    #[inline]
    pub fn scan_count(&self) -> usize {
        self.scan_offsets.len()
    }

    /// Total number of peaks across all scans.
    #[inline]
    pub fn total_peak_count(&self) -> usize {
        self.all_mz.len()
    }

    /// Number of distinct isolation windows.
    #[inline]
    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    /// Returns true if the index holds no scans.
    pub fn is_empty(&self) -> bool {
        self.scan_offsets.is_empty()
    }

    /// Window ids present in this index, ascending.
    pub fn window_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.windows.iter().map(|w| w.id)
    }

    /// All window definitions, indexed by window id.
    pub fn windows(&self) -> &[IsolationWindow] {
        &self.windows
    }

    /// Largest number of scans in any single window.
    pub fn max_scans_per_window(&self) -> usize {
        self.windows.iter().map(|w| w.scan_count).max().unwrap_or(0)
    }

    /// Build statistics.
    pub fn stats(&self) -> &IndexStats {
        &self.stats
    }

    // ==================== Scan-level accessors ====================

    #[inline]
    fn peak_range(&self, scan: usize) -> Range<usize> {
        let start = self.scan_offsets[scan] as usize;
        start..start + self.scan_lengths[scan] as usize
    }

    /// m/z values of the scan at `scan` position, ascending. Zero-copy view.
    ///
    /// # Panics
    /// Panics if `scan >= self.scan_count()`.
    #[inline]
    pub fn scan_mz(&self, scan: usize) -> &[f32] {
        &self.all_mz[self.peak_range(scan)]
    }

    /// Intensities of the scan at `scan` position, aligned with [`Self::scan_mz`].
    ///
    /// # Panics
    /// Panics if `scan >= self.scan_count()`.
    #[inline]
    pub fn scan_intensity(&self, scan: usize) -> &[f32] {
        &self.all_intensity[self.peak_range(scan)]
    }

    /// Retention time (minutes) of the scan at `scan` position.
    #[inline]
    pub fn scan_rt(&self, scan: usize) -> f32 {
        self.scan_rts[scan]
    }

    /// Number of peaks in the scan at `scan` position.
    #[inline]
    pub fn scan_peak_count(&self, scan: usize) -> usize {
        self.scan_lengths[scan] as usize
    }

    /// Window id of the scan at `scan` position.
    #[inline]
    pub fn scan_window_id(&self, scan: usize) -> u32 {
        self.scan_window_ids[scan]
    }

    /// Native scan number of the scan at `scan` position, for traceability.
    #[inline]
    pub fn scan_number(&self, scan: usize) -> i64 {
        self.scan_numbers[scan]
    }

    // ==================== Window-level accessors ====================

    /// Window definition for `window_id`, if present.
    #[inline]
    pub fn window(&self, window_id: u32) -> Option<&IsolationWindow> {
        self.windows.get(window_id as usize)
    }

    /// Whether `window_id` exists in this index.
    #[inline]
    pub fn contains_window(&self, window_id: u32) -> bool {
        (window_id as usize) < self.windows.len()
    }

    /// Range of scan positions belonging to `window_id`, RT-ascending.
    #[inline]
    pub fn scan_range_for_window(&self, window_id: u32) -> Option<Range<usize>> {
        self.window(window_id).map(IsolationWindow::scan_range)
    }

    /// Isolation m/z bounds `(lower, upper)` of `window_id`.
    pub fn window_bounds(&self, window_id: u32) -> Option<(f32, f32)> {
        self.window(window_id).map(|w| (w.lower_bound, w.upper_bound))
    }

    /// First window whose isolation bounds contain `precursor_mz`.
    ///
    /// Linear over windows; DIA methods have tens of windows, not thousands.
    pub fn find_window_for_precursor_mz(&self, precursor_mz: f64) -> Option<u32> {
        let mz = precursor_mz as f32;
        self.windows.iter().find(|w| w.contains_mz(mz)).map(|w| w.id)
    }

    /// Minimum and maximum retention time over all scans, `None` when empty.
    pub fn global_rt_range(&self) -> Option<(f32, f32)> {
        let first = *self.scan_rts.first()?;
        Some(
            self.scan_rts
                .iter()
                .fold((first, first), |(lo, hi), &rt| (lo.min(rt), hi.max(rt))),
        )
    }

    // ==================== Bulk views ====================

    /// Entire contiguous m/z array, for accelerated backends.
    pub fn all_mz(&self) -> &[f32] {
        &self.all_mz
    }

    /// Entire contiguous intensity array, aligned with [`Self::all_mz`].
    pub fn all_intensity(&self) -> &[f32] {
        &self.all_intensity
    }

    /// Per-scan retention times.
    pub fn all_scan_rts(&self) -> &[f32] {
        &self.scan_rts
    }

    /// Per-scan peak offsets into the bulk arrays.
    pub fn all_scan_offsets(&self) -> &[u32] {
        &self.scan_offsets
    }

    /// Per-scan peak counts.
    pub fn all_scan_lengths(&self) -> &[u32] {
        &self.scan_lengths
    }

    /// Per-scan window ids.
    pub fn all_scan_window_ids(&self) -> &[u32] {
        &self.scan_window_ids
    }

    // ==================== Teardown ====================

    /// Release all storage. Idempotent; afterwards the index is empty.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        self.all_mz = Vec::new();
        self.all_intensity = Vec::new();
        self.scan_offsets = Vec::new();
        self.scan_lengths = Vec::new();
        self.scan_rts = Vec::new();
        self.scan_window_ids = Vec::new();
        self.scan_numbers = Vec::new();
        self.windows = Vec::new();
    }

    /// Whether [`Self::release`] has been called.
    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl Default for ScanIndex {
    fn default() -> Self {
        Self::empty()
    }
}
