//! Input scan records handed over by the upstream file-reading layer.
//!
//! A [`Scan`] is a fully parsed spectrum: retention time, MS level, optional
//! isolation window and SoA peak arrays. Only MS2 scans with an isolation
//! center are indexed; everything else is dropped by the
//! [`ScanIndexBuilder`](crate::index::ScanIndexBuilder).

/// SoA peak storage for a single scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeakArrays {
    /// Mass-to-charge ratios, expected ascending (re-sorted at index build otherwise).
    pub mz: Vec<f64>,
    /// Peak intensities, aligned 1:1 with `mz`.
    pub intensity: Vec<f32>,
}

impl PeakArrays {
    /// Create a new peak array set.
    pub fn new(mz: Vec<f64>, intensity: Vec<f32>) -> Self {
        Self { mz, intensity }
    }

    /// Returns the number of peaks.
    pub fn len(&self) -> usize {
        self.mz.len()
    }

    /// Returns true if there are no peaks.
    pub fn is_empty(&self) -> bool {
        self.mz.is_empty()
    }

    /// Returns true if `mz` is non-decreasing.
    pub fn is_sorted_by_mz(&self) -> bool {
        self.mz.windows(2).all(|w| w[0] <= w[1])
    }
}

/// A fragmentation (or survey) spectrum as produced by a file reader.
#[derive(Debug, Clone, PartialEq)]
pub struct Scan {
    /// Native one-based scan number from the instrument file
    pub scan_number: i64,
    /// MS level (1, 2, ...)
    pub ms_level: i16,
    /// Retention time in minutes
    pub retention_time: f64,
    /// Isolation window center m/z (MS2+)
    pub isolation_center: Option<f64>,
    /// Full isolation window width in m/z
    pub isolation_width: Option<f64>,
    /// Peak arrays (SoA)
    pub peaks: PeakArrays,
}

impl Scan {
    /// Create a new MS1 scan.
    pub fn new_ms1(scan_number: i64, retention_time: f64, peaks: PeakArrays) -> Self {
        Self {
            scan_number,
            ms_level: 1,
            retention_time,
            isolation_center: None,
            isolation_width: None,
            peaks,
        }
    }

    /// Create a new MS2 scan with isolation window information.
    pub fn new_ms2(
        scan_number: i64,
        retention_time: f64,
        isolation_center: f64,
        isolation_width: Option<f64>,
        peaks: PeakArrays,
    ) -> Self {
        Self {
            scan_number,
            ms_level: 2,
            retention_time,
            isolation_center: Some(isolation_center),
            isolation_width,
            peaks,
        }
    }

    /// Whether this scan qualifies for the DIA index (MS2 with an isolation center).
    #[inline]
    pub fn is_dia_eligible(&self) -> bool {
        self.ms_level == 2 && self.isolation_center.is_some()
    }

    /// Get the number of peaks in this scan.
    pub fn peak_count(&self) -> usize {
        self.peaks.len()
    }
}

/// Builder for constructing [`Scan`] records, mostly in tests and benches.
#[derive(Debug, Clone)]
pub struct ScanBuilder {
    scan: Scan,
}

impl ScanBuilder {
    /// Start a new MS1 scan with no peaks at retention time 0.
    pub fn new(scan_number: i64) -> Self {
        Self {
            scan: Scan::new_ms1(scan_number, 0.0, PeakArrays::default()),
        }
    }

    /// Set the MS level.
    pub fn ms_level(mut self, level: i16) -> Self {
        self.scan.ms_level = level;
        self
    }

    /// Set the retention time in minutes.
    pub fn retention_time(mut self, rt: f64) -> Self {
        self.scan.retention_time = rt;
        self
    }

    /// Set the isolation window center and full width.
    pub fn isolation(mut self, center: f64, width: f64) -> Self {
        self.scan.isolation_center = Some(center);
        self.scan.isolation_width = Some(width);
        self
    }

    /// Set only the isolation center (width unknown).
    pub fn isolation_center(mut self, center: f64) -> Self {
        self.scan.isolation_center = Some(center);
        self
    }

    /// Append a single peak.
    pub fn add_peak(mut self, mz: f64, intensity: f32) -> Self {
        self.scan.peaks.mz.push(mz);
        self.scan.peaks.intensity.push(intensity);
        self
    }

    /// Replace the peak arrays.
    pub fn peaks(mut self, mz: Vec<f64>, intensity: Vec<f32>) -> Self {
        self.scan.peaks = PeakArrays::new(mz, intensity);
        self
    }

    /// Finish the scan.
    pub fn build(self) -> Scan {
        self.scan
    }
}
