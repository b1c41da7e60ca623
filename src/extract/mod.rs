//! # Fragment Extraction Module
//!
//! Turns batches of [`FragmentQuery`] into extracted ion chromatograms (XICs)
//! against a [`ScanIndex`](crate::index::ScanIndex).
//!
//! ## Output model
//!
//! A batch writes into four caller-owned slices:
//!
//! ```text
//! results[i]            one FragmentResult per query, same order
//! rt_buffer[..]         retention times of all points, query after query
//! intensity_buffer[..]  summed intensities, aligned with rt_buffer
//! ```
//!
//! Query `i`'s points occupy `results[i].buffer_range()` in both buffers.
//! Ranges are contiguous and non-overlapping, in query order, starting at 0.
//!
//! ## Point rule
//!
//! For each scan of the query's window inside `[rt_min, rt_max]`, all peaks
//! within the ppm window are summed into a single intensity. A point is
//! written only when that sum is strictly positive.
//!
//! ## Backends
//!
//! - [`CpuFragmentExtractor`]: scalar reference implementation
//! - `SimdFragmentExtractor`: vectorized reduction, behind the `simd` feature
//!
//! Both produce the same points; summed intensities may differ in the last
//! bits because of summation order.

mod cpu;
mod query;
mod search;
#[cfg(feature = "simd")]
mod simd;


pub use cpu::CpuFragmentExtractor;
pub use query::{FragmentQuery, FragmentResult, MassWindow};
pub use search::lower_bound;
#[cfg(feature = "simd")]
pub use simd::SimdFragmentExtractor;

pub(crate) use search::rt_scan_range;

/// Which implementation sits behind a [`FragmentExtractor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractorKind {
    /// Scalar CPU reference
    Cpu,
    /// Vectorized SIMD backend
    Simd,
}

impl std::fmt::Display for ExtractorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractorKind::Cpu => write!(f, "CPU"),
            ExtractorKind::Simd => write!(f, "SIMD"),
        }
    }
}

/// Batch XIC extraction over a borrowed index.
///
/// Implementations hold a shared reference to the index and may keep
/// per-instance scratch space, so one instance must not be driven from two
/// threads at once. Parallel callers create one extractor per worker.
pub trait FragmentExtractor {
    /// Extract chromatograms for every query in `queries`.
    ///
    /// Writes one result per query into `results` and the points into
    /// `rt_buffer` / `intensity_buffer` starting at position 0. Returns the
    /// total number of points written.
    ///
    /// # Panics
    ///
    /// Panics if `results.len() != queries.len()`, or if either output buffer
    /// is too small to hold every point.
    fn extract_batch(
        &mut self,
        queries: &[FragmentQuery],
        results: &mut [FragmentResult],
        rt_buffer: &mut [f32],
        intensity_buffer: &mut [f32],
    ) -> usize;

    /// Backend behind this extractor.
    fn kind(&self) -> ExtractorKind;

    /// Free any scratch storage. Idempotent; the extractor stays usable.
    fn release(&mut self) {}
}

#[inline]
pub(crate) fn check_batch_shape(queries: &[FragmentQuery], results: &[FragmentResult]) {
    assert_eq!(
        queries.len(),
        results.len(),
        "results length {} does not match queries length {}",
        results.len(),
        queries.len()
    );
}

/// Append one point at `cursor`.
#[inline]
pub(crate) fn write_point(
    rt_buffer: &mut [f32],
    intensity_buffer: &mut [f32],
    cursor: usize,
    rt: f32,
    intensity: f32,
) {
    assert!(
        cursor < rt_buffer.len() && cursor < intensity_buffer.len(),
        "output buffers too small: rt_buffer {} / intensity_buffer {} slots, need more than {}",
        rt_buffer.len(),
        intensity_buffer.len(),
        cursor
    );
    rt_buffer[cursor] = rt;
    intensity_buffer[cursor] = intensity;
}
