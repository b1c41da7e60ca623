/// Errors that can occur while building a [`ScanIndex`](super::ScanIndex)
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// An eligible scan has m/z and intensity arrays of different lengths
    #[error("Scan {scan_number}: m/z array has {mz_len} elements, intensity array has {intensity_len} elements")]
    PeakArrayLengthMismatch {
        /// Native scan number of the offending scan
        scan_number: i64,
        /// Length of the m/z array
        mz_len: usize,
        /// Length of the intensity array
        intensity_len: usize,
    },

    /// An eligible scan has a NaN or infinite retention time
    #[error("Scan {scan_number}: retention time is not finite")]
    NonFiniteRetentionTime {
        /// Native scan number of the offending scan
        scan_number: i64,
    },

    /// An eligible scan has an m/z value that is NaN, infinite, or outside the `f32` range
    #[error("Scan {scan_number}: m/z value {mz} is not finite in single precision")]
    NonFiniteMz {
        /// Native scan number of the offending scan
        scan_number: i64,
        /// The offending value
        mz: f64,
    },

    /// The retained peaks do not fit the 32-bit offset space
    #[error("Total peak count ({0}) exceeds the single-index limit of u32::MAX")]
    TooManyPeaks(usize),
}
