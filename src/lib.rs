//! # mzxic - DIA Fragment-Ion Chromatogram Extraction
//!
//! `mzxic` extracts fragment-ion chromatograms (XICs) from data-independent
//! acquisition (DIA) mass spectrometry runs, at the scale of thousands of
//! precursors times several fragments each.
//!
//! ## Key Features
//!
//! - **Columnar scan index**: all MS2 peaks packed into two contiguous `f32`
//!   arrays, grouped by isolation window and sorted by retention time.
//!
//! - **Batched extraction**: ppm/RT-windowed lookups answered with binary
//!   searches, written into caller-owned buffers with no per-query allocation.
//!
//! - **Pluggable backends**: a scalar CPU extractor and a SIMD extractor,
//!   selected at runtime from the detected hardware.
//!
//! - **Parallel orchestration**: large batches partitioned across the rayon
//!   pool with strictly disjoint output regions and no locks.
//!
//! - **Similarity scoring**: cosine and spectral-angle scores for comparing
//!   extracted intensities against library spectra.
//!
//! ## Quick Start
//!
//! ```rust
//! use mzxic::prelude::*;
//!
//! // Scans as handed over by a file reader
//! let scans: Vec<Scan> = (0..10)
//!     .map(|i| {
//!         ScanBuilder::new(i + 1)
//!             .ms_level(2)
//!             .retention_time(i as f64 * 0.1)
//!             .isolation(500.0, 25.0)
//!             .add_peak(300.0, 1000.0)
//!             .add_peak(450.0, 500.0)
//!             .build()
//!     })
//!     .collect();
//!
//! // Build the index once
//! let index = ScanIndexBuilder::build(&scans)?;
//!
//! // One query per fragment
//! let window = index.find_window_for_precursor_mz(498.0).unwrap_or(0);
//! let queries = vec![
//!     FragmentQuery::new(300.0, 10.0, 0.0, 1.0, window, 0),
//!     FragmentQuery::new(450.0, 10.0, 0.0, 1.0, window, 1),
//! ];
//!
//! // Extract in parallel
//! let orchestrator = ExtractionOrchestrator::new(&index, false);
//! let output = orchestrator.extract_all(&queries, 0);
//!
//! let (_rt, intensity) = output.xic(1);
//! assert_eq!(intensity.len(), 10);
//! let library = [1000.0, 500.0];
//! let observed: Vec<f32> = output.results.iter().map(|r| r.total_intensity).collect();
//! assert!(normalized_dot_product(&library, &observed) > 0.99);
//! # Ok::<(), mzxic::index::IndexError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`scan`]: input scan records
//! - [`index`]: columnar scan index and its builder
//! - [`extract`]: queries, results, and the extractor backends
//! - [`hardware`]: backend detection and extractor factory
//! - [`orchestrator`]: parallel batch extraction
//! - [`scoring`]: similarity scores
//! - [`config`]: TOML engine configuration

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod extract;
pub mod hardware;
pub mod index;
pub mod orchestrator;
pub mod scan;
pub mod scoring;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::config::{Config, EngineConfig};
    pub use crate::extract::{
        lower_bound, CpuFragmentExtractor, ExtractorKind, FragmentExtractor, FragmentQuery,
        FragmentResult, MassWindow,
    };
    #[cfg(feature = "simd")]
    pub use crate::extract::SimdFragmentExtractor;
    pub use crate::hardware::{
        AcceleratorBackend, ExtractorConstructor, ExtractorFactory, HardwareDetector,
    };
    pub use crate::index::{IndexError, IndexStats, IsolationWindow, ScanIndex, ScanIndexBuilder};
    pub use crate::orchestrator::{ExtractionOrchestrator, ExtractionResult};
    pub use crate::scan::{PeakArrays, Scan, ScanBuilder};
    pub use crate::scoring::{
        normalized_dot_product, spectral_angle, NormalizedDotProductScorer, Scorer,
        SpectralAngleScorer,
    };
}
