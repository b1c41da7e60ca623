//! # Hardware Module
//!
//! Backend discovery and extractor construction.
//!
//! [`HardwareDetector`] probes the CPU once per process for vector extensions.
//! The SIMD extractor itself is portable `wide` code whose instruction set is
//! fixed at compile time (SSE2 on a default x86_64 build, more with
//! `-C target-cpu=native`); the probe only decides whether to select it. [`ExtractorFactory`] turns that answer
//! into extractor instances: the SIMD backend when it is usable and not
//! overridden, the scalar CPU extractor otherwise.
//!
//! Probing never fails. Anything unexpected degrades to
//! [`AcceleratorBackend::None`] and the CPU path.

mod detector;
mod factory;


pub use detector::{AcceleratorBackend, HardwareDetector, HardwareInfo};
pub use factory::{ExtractorConstructor, ExtractorFactory};
