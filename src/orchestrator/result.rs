use std::fmt;

use crate::extract::FragmentResult;

/// Aggregate output of [`ExtractionOrchestrator::extract_all`](super::ExtractionOrchestrator::extract_all).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionResult {
    /// One result per query, in query order
    pub results: Vec<FragmentResult>,
    /// Retention times of all points; see [`FragmentResult::buffer_range`]
    pub rt_buffer: Vec<f32>,
    /// Summed intensities, aligned with `rt_buffer`
    pub intensity_buffer: Vec<f32>,
    /// Total number of points across all queries
    pub total_data_points: usize,
}

impl ExtractionResult {
    /// Number of queries.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns true if there were no queries.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// The (retention time, intensity) views of query `i`'s chromatogram.
    ///
    /// # Panics
    /// Panics if `i >= self.len()`.
    pub fn xic(&self, i: usize) -> (&[f32], &[f32]) {
        let range = self.results[i].buffer_range();
        (&self.rt_buffer[range.clone()], &self.intensity_buffer[range])
    }

    /// Iterate over `(result, rt, intensity)` for every query.
    pub fn xics(&self) -> impl Iterator<Item = (&FragmentResult, &[f32], &[f32])> + '_ {
        self.results.iter().map(move |r| {
            let range = r.buffer_range();
            (
                r,
                &self.rt_buffer[range.clone()],
                &self.intensity_buffer[range],
            )
        })
    }

    /// Number of queries that produced at least one point.
    pub fn non_empty_count(&self) -> usize {
        self.results.iter().filter(|r| !r.is_empty()).count()
    }
}

impl fmt::Display for ExtractionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Extracted {} data points for {} queries ({} with signal)",
            self.total_data_points,
            self.results.len(),
            self.non_empty_count()
        )
    }
}
