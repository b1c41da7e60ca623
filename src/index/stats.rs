use std::fmt;

/// Statistics from a completed index build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Number of scan records handed to the builder (including absent ones)
    pub scans_considered: usize,
    /// Number of scans retained in the index
    pub scans_indexed: usize,
    /// Number of scans dropped (absent, non-MS2, or without isolation center)
    pub scans_skipped: usize,
    /// Number of scans whose peaks had to be re-sorted by m/z
    pub scans_resorted: usize,
    /// Total number of peaks stored
    pub peaks_indexed: usize,
    /// Number of distinct isolation windows
    pub windows: usize,
}

impl fmt::Display for IndexStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Indexed {} of {} scans ({} peaks) across {} windows",
            self.scans_indexed, self.scans_considered, self.peaks_indexed, self.windows
        )
    }
}
