/// A DIA isolation window discovered during index build.
///
/// Window ids are dense and assigned in order of first appearance of each
/// distinct isolation center, so `id` is also the position of the window in
/// [`ScanIndex::windows`](super::ScanIndex::windows).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsolationWindow {
    /// Dense window id
    pub id: u32,
    /// Isolation center m/z as reported by the instrument
    pub center: f64,
    /// Lower m/z bound (center - width / 2)
    pub lower_bound: f32,
    /// Upper m/z bound (center + width / 2)
    pub upper_bound: f32,
    /// First scan position of this window
    pub scan_start: usize,
    /// Number of scans in this window
    pub scan_count: usize,
}

impl IsolationWindow {
    /// Range of scan positions covered by this window.
    #[inline]
    pub fn scan_range(&self) -> std::ops::Range<usize> {
        self.scan_start..self.scan_start + self.scan_count
    }

    /// Whether `mz` falls inside `[lower_bound, upper_bound]`.
    #[inline]
    pub fn contains_mz(&self, mz: f32) -> bool {
        mz >= self.lower_bound && mz <= self.upper_bound
    }

    /// Window width in m/z (0 when the source scans carried no width).
    pub fn width(&self) -> f32 {
        self.upper_bound - self.lower_bound
    }
}
