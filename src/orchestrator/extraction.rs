use std::time::Instant;

use log::{debug, info, trace, warn};
use rayon::prelude::*;

use super::result::ExtractionResult;
use crate::config::{resolve_parallelism, EngineConfig};
use crate::extract::{rt_scan_range, FragmentExtractor, FragmentQuery, FragmentResult};
use crate::hardware::{ExtractorConstructor, ExtractorFactory};
use crate::index::ScanIndex;

/// Parallel batch extraction over one shared [`ScanIndex`].
///
/// ```rust
/// use mzxic::extract::FragmentQuery;
/// use mzxic::index::ScanIndexBuilder;
/// use mzxic::orchestrator::ExtractionOrchestrator;
/// use mzxic::scan::ScanBuilder;
///
/// let scans: Vec<_> = (1..=3)
///     .map(|i| {
///         ScanBuilder::new(i).ms_level(2).retention_time(i as f64)
///             .isolation(500.0, 25.0).add_peak(300.0, 10.0).build()
///     })
///     .collect();
/// let index = ScanIndexBuilder::build(&scans)?;
///
/// let orchestrator = ExtractionOrchestrator::new(&index, false);
/// let queries = vec![FragmentQuery::new(300.0, 10.0, 0.0, 10.0, 0, 1)];
/// let output = orchestrator.extract_all(&queries, 4);
///
/// assert_eq!(output.total_data_points, 3);
/// let (rt, intensity) = output.xic(0);
/// assert_eq!(rt, &[1.0, 2.0, 3.0]);
/// assert_eq!(intensity, &[10.0, 10.0, 10.0]);
/// # Ok::<(), mzxic::index::IndexError>(())
/// ```
pub struct ExtractionOrchestrator<'a> {
    index: &'a ScanIndex,
    factory: ExtractorConstructor,
    default_parallelism: usize,
}

/// Output of one partition, in its own coordinate space.
struct PartitionOutput {
    rt_buffer: Vec<f32>,
    intensity_buffer: Vec<f32>,
}

/// Releases the wrapped extractor on every exit path, including unwinding.
struct ReleaseGuard<'i>(Box<dyn FragmentExtractor + 'i>);

impl Drop for ReleaseGuard<'_> {
    fn drop(&mut self) {
        self.0.release();
    }
}

impl<'a> ExtractionOrchestrator<'a> {
    /// Orchestrator using the factory's backend choice.
    pub fn new(index: &'a ScanIndex, prefer_cpu: bool) -> Self {
        debug!(
            "Extraction backend: {}",
            ExtractorFactory::describe_backend(prefer_cpu)
        );
        Self::with_factory(index, ExtractorFactory::create_factory(prefer_cpu))
    }

    /// Orchestrator using a caller-supplied extractor constructor.
    pub fn with_factory(index: &'a ScanIndex, factory: ExtractorConstructor) -> Self {
        Self {
            index,
            factory,
            default_parallelism: 0,
        }
    }

    /// Orchestrator configured from an [`EngineConfig`].
    pub fn from_config(index: &'a ScanIndex, config: &EngineConfig) -> Self {
        Self::new(index, config.prefer_cpu).with_default_parallelism(config.max_parallelism)
    }

    /// Set the parallelism used by [`Self::extract`]. 0 means the rayon pool size.
    pub fn with_default_parallelism(mut self, max_parallelism: usize) -> Self {
        self.default_parallelism = max_parallelism;
        self
    }

    /// The shared index.
    pub fn index(&self) -> &'a ScanIndex {
        self.index
    }

    /// [`Self::extract_all`] with the configured default parallelism.
    pub fn extract(&self, queries: &[FragmentQuery]) -> ExtractionResult {
        self.extract_all(queries, self.default_parallelism)
    }

    /// Extract every query, using at most `max_parallelism` concurrent
    /// partitions (0 means the rayon pool size).
    ///
    /// Results come back in query order. Offsets in the results refer to the
    /// concatenated output buffers of the returned [`ExtractionResult`].
    pub fn extract_all(&self, queries: &[FragmentQuery], max_parallelism: usize) -> ExtractionResult {
        if queries.is_empty() {
            return ExtractionResult::default();
        }

        let start = Instant::now();
        let n = queries.len();
        let partitions = resolve_parallelism(max_parallelism).min(n);
        let chunk_size = (n + partitions - 1) / partitions;
        debug!(
            "Extracting {} queries in {} partitions of up to {}",
            n,
            (n + chunk_size - 1) / chunk_size,
            chunk_size
        );

        let missing = queries
            .iter()
            .filter(|q| !self.index.contains_window(q.window_id))
            .count();
        if missing > 0 {
            warn!(
                "{} of {} queries reference windows missing from the index",
                missing, n
            );
        }

        let mut results = vec![FragmentResult::default(); n];
        let outputs: Vec<PartitionOutput> = results
            .par_chunks_mut(chunk_size)
            .zip(queries.par_chunks(chunk_size))
            .map(|(partition_results, partition_queries)| {
                self.run_partition(partition_queries, partition_results)
            })
            .collect();

        let total_data_points: usize = outputs.iter().map(|o| o.rt_buffer.len()).sum();
        let mut rt_buffer = Vec::with_capacity(total_data_points);
        let mut intensity_buffer = Vec::with_capacity(total_data_points);

        for (output, partition_results) in outputs.into_iter().zip(results.chunks_mut(chunk_size)) {
            let base = rt_buffer.len();
            for result in partition_results {
                result.buffer_offset += base;
            }
            rt_buffer.extend_from_slice(&output.rt_buffer);
            intensity_buffer.extend_from_slice(&output.intensity_buffer);
        }

        let extraction = ExtractionResult {
            results,
            rt_buffer,
            intensity_buffer,
            total_data_points,
        };
        info!("{} in {:.2?}", extraction, start.elapsed());
        extraction
    }

    fn run_partition(
        &self,
        queries: &[FragmentQuery],
        results: &mut [FragmentResult],
    ) -> PartitionOutput {
        // A scan contributes at most one point per query
        let capacity: usize = queries
            .iter()
            .map(|q| {
                rt_scan_range(self.index, q.window_id, q.rt_min, q.rt_max).map_or(0, |r| r.len())
            })
            .sum();

        let mut rt_buffer = vec![0.0f32; capacity];
        let mut intensity_buffer = vec![0.0f32; capacity];

        let mut extractor = ReleaseGuard((self.factory)(self.index));
        let points = extractor
            .0
            .extract_batch(queries, results, &mut rt_buffer, &mut intensity_buffer);
        trace!(
            "{} extractor wrote {} points for {} queries (capacity {})",
            extractor.0.kind(),
            points,
            queries.len(),
            capacity
        );
        drop(extractor);

        rt_buffer.truncate(points);
        intensity_buffer.truncate(points);
        PartitionOutput {
            rt_buffer,
            intensity_buffer,
        }
    }
}
