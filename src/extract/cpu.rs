use super::{
    check_batch_shape, lower_bound, rt_scan_range, write_point, ExtractorKind,
    FragmentExtractor, FragmentQuery, FragmentResult, MassWindow,
};
use crate::index::ScanIndex;

/// Scalar reference extractor.
///
/// Stateless apart from the index borrow; cheap to create per worker.
#[derive(Debug, Clone, Copy)]
pub struct CpuFragmentExtractor<'a> {
    index: &'a ScanIndex,
}

impl<'a> CpuFragmentExtractor<'a> {
    /// Create an extractor over `index`.
    pub fn new(index: &'a ScanIndex) -> Self {
        Self { index }
    }

    /// The index this extractor reads.
    pub fn index(&self) -> &'a ScanIndex {
        self.index
    }

    /// Extract a single query, writing points from `offset` onwards.
    pub fn extract_one(
        &self,
        query: &FragmentQuery,
        rt_buffer: &mut [f32],
        intensity_buffer: &mut [f32],
        offset: usize,
    ) -> FragmentResult {
        let Some(scans) = rt_scan_range(self.index, query.window_id, query.rt_min, query.rt_max)
        else {
            return FragmentResult::empty(query.query_id, offset);
        };

        let window = query.mass_window();
        let mut cursor = offset;
        let mut total = 0.0f32;

        for scan in scans {
            let summed = sum_in_window(
                self.index.scan_mz(scan),
                self.index.scan_intensity(scan),
                window,
            );
            if summed > 0.0 {
                write_point(
                    rt_buffer,
                    intensity_buffer,
                    cursor,
                    self.index.scan_rt(scan),
                    summed,
                );
                cursor += 1;
                total += summed;
            }
        }

        FragmentResult {
            query_id: query.query_id,
            data_point_count: cursor - offset,
            total_intensity: total,
            buffer_offset: offset,
        }
    }
}

impl FragmentExtractor for CpuFragmentExtractor<'_> {
    fn extract_batch(
        &mut self,
        queries: &[FragmentQuery],
        results: &mut [FragmentResult],
        rt_buffer: &mut [f32],
        intensity_buffer: &mut [f32],
    ) -> usize {
        check_batch_shape(queries, results);

        let mut cursor = 0;
        for (query, result) in queries.iter().zip(results.iter_mut()) {
            *result = self.extract_one(query, rt_buffer, intensity_buffer, cursor);
            cursor += result.data_point_count;
        }
        cursor
    }

    fn kind(&self) -> ExtractorKind {
        ExtractorKind::Cpu
    }
}

/// Sum of intensities whose m/z lies in `window`. `mz` must be ascending.
#[inline]
fn sum_in_window(mz: &[f32], intensity: &[f32], window: MassWindow) -> f32 {
    let first = lower_bound(mz, window.lower);
    mz[first..]
        .iter()
        .zip(&intensity[first..])
        .take_while(|(&m, _)| m <= window.upper)
        .map(|(_, &i)| i)
        .sum()
}
