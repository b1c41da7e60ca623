use std::ops::Range;

/// One fragment-mass lookup: "where does `target_mz` appear in window
/// `window_id` between `rt_min` and `rt_max`?"
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FragmentQuery {
    /// Target fragment m/z
    pub target_mz: f32,
    /// Relative mass tolerance in parts per million
    pub tolerance_ppm: f32,
    /// Lower retention time bound in minutes (inclusive)
    pub rt_min: f32,
    /// Upper retention time bound in minutes (inclusive)
    pub rt_max: f32,
    /// Isolation window to search
    pub window_id: u32,
    /// Opaque caller identifier, echoed in the result
    pub query_id: u64,
}

impl FragmentQuery {
    /// Create a new query.
    pub fn new(
        target_mz: f32,
        tolerance_ppm: f32,
        rt_min: f32,
        rt_max: f32,
        window_id: u32,
        query_id: u64,
    ) -> Self {
        Self {
            target_mz,
            tolerance_ppm,
            rt_min,
            rt_max,
            window_id,
            query_id,
        }
    }

    /// Absolute m/z window implied by the target and ppm tolerance.
    #[inline]
    pub fn mass_window(&self) -> MassWindow {
        MassWindow::from_ppm(self.target_mz, self.tolerance_ppm)
    }
}

/// Closed m/z interval `[lower, upper]` used for peak matching.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassWindow {
    /// Lower bound (inclusive)
    pub lower: f32,
    /// Upper bound (inclusive)
    pub upper: f32,
}

impl MassWindow {
    /// `[target * (1 - ppm/1e6), target * (1 + ppm/1e6)]`.
    ///
    /// Computed in `f64` and rounded once, so every backend matches against
    /// identical `f32` bounds.
    #[inline]
    pub fn from_ppm(target_mz: f32, tolerance_ppm: f32) -> Self {
        let target = target_mz as f64;
        let tol = tolerance_ppm as f64 / 1e6;
        Self {
            lower: (target * (1.0 - tol)) as f32,
            upper: (target * (1.0 + tol)) as f32,
        }
    }

    /// Whether `mz` lies inside the window.
    #[inline]
    pub fn contains(&self, mz: f32) -> bool {
        mz >= self.lower && mz <= self.upper
    }
}

/// Outcome of one [`FragmentQuery`].
///
/// The chromatogram points live in the caller's output buffers at
/// `buffer_offset..buffer_offset + data_point_count`; the retention time and
/// intensity buffers share the same positions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FragmentResult {
    /// Echo of [`FragmentQuery::query_id`]
    pub query_id: u64,
    /// Number of chromatogram points written
    pub data_point_count: usize,
    /// Sum of intensities over all written points
    pub total_intensity: f32,
    /// First buffer position written for this query
    pub buffer_offset: usize,
}

impl FragmentResult {
    /// A result with no points, anchored at `buffer_offset`.
    pub fn empty(query_id: u64, buffer_offset: usize) -> Self {
        Self {
            query_id,
            data_point_count: 0,
            total_intensity: 0.0,
            buffer_offset,
        }
    }

    /// Positions of this result's points in the output buffers.
    #[inline]
    pub fn buffer_range(&self) -> Range<usize> {
        self.buffer_offset..self.buffer_offset + self.data_point_count
    }

    /// Returns true if no points were found.
    pub fn is_empty(&self) -> bool {
        self.data_point_count == 0
    }
}
