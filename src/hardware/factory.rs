use std::sync::Arc;

use log::trace;

use super::detector::HardwareDetector;
use crate::extract::{CpuFragmentExtractor, ExtractorKind, FragmentExtractor};
#[cfg(feature = "simd")]
use crate::extract::SimdFragmentExtractor;
use crate::index::ScanIndex;

/// Reusable "index -> fresh extractor" constructor.
///
/// Every call yields an independent instance, so parallel workers never share
/// extractor scratch state.
pub type ExtractorConstructor =
    Arc<dyn for<'i> Fn(&'i ScanIndex) -> Box<dyn FragmentExtractor + 'i> + Send + Sync>;

/// Chooses and builds extractor backends.
///
/// ```rust
/// use mzxic::extract::ExtractorKind;
/// use mzxic::hardware::ExtractorFactory;
/// use mzxic::index::ScanIndex;
///
/// let index = ScanIndex::empty();
/// let extractor = ExtractorFactory::create(&index, true);
/// assert_eq!(extractor.kind(), ExtractorKind::Cpu);
/// assert!(ExtractorFactory::describe_backend(true).contains("CPU"));
/// ```
pub struct ExtractorFactory;

impl ExtractorFactory {
    /// Backend that [`Self::create`] would pick.
    pub fn selected_kind(prefer_cpu: bool) -> ExtractorKind {
        if !prefer_cpu && HardwareDetector::is_available() {
            ExtractorKind::Simd
        } else {
            ExtractorKind::Cpu
        }
    }

    /// Create one extractor over `index`.
    ///
    /// Returns the CPU extractor when `prefer_cpu` is set or no accelerated
    /// backend is available.
    pub fn create(index: &ScanIndex, prefer_cpu: bool) -> Box<dyn FragmentExtractor + '_> {
        let kind = Self::selected_kind(prefer_cpu);
        trace!("Creating {} extractor", kind);
        match kind {
            #[cfg(feature = "simd")]
            ExtractorKind::Simd => Box::new(SimdFragmentExtractor::new(index)),
            _ => Box::new(CpuFragmentExtractor::new(index)),
        }
    }

    /// Constructor closure for per-worker extractor creation.
    pub fn create_factory(prefer_cpu: bool) -> ExtractorConstructor {
        if prefer_cpu {
            return Arc::new(create_cpu);
        }
        Arc::new(create_preferred)
    }

    /// Wrap an arbitrary constructor, e.g. a custom backend.
    pub fn constructor<F>(f: F) -> ExtractorConstructor
    where
        F: for<'i> Fn(&'i ScanIndex) -> Box<dyn FragmentExtractor + 'i> + Send + Sync + 'static,
    {
        Arc::new(f)
    }

    /// Diagnostic name of the backend that would be chosen.
    pub fn describe_backend(prefer_cpu: bool) -> String {
        if prefer_cpu {
            return "CPU (forced)".to_string();
        }
        match Self::selected_kind(false) {
            ExtractorKind::Simd => HardwareDetector::description().to_string(),
            ExtractorKind::Cpu => "CPU (no accelerated backend available)".to_string(),
        }
    }
}

fn create_cpu(index: &ScanIndex) -> Box<dyn FragmentExtractor + '_> {
    ExtractorFactory::create(index, true)
}

fn create_preferred(index: &ScanIndex) -> Box<dyn FragmentExtractor + '_> {
    ExtractorFactory::create(index, false)
}
