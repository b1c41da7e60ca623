use std::fmt;
use std::sync::OnceLock;

use log::debug;

/// Vector extension reported by the CPU at runtime.
///
/// Used to decide whether the SIMD extractor is worth selecting; it does not
/// switch code paths inside the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AcceleratorBackend {
    /// No usable acceleration; extraction runs on the scalar CPU path
    None,
    /// x86 AVX2 (256-bit lanes)
    Avx2,
    /// x86 SSE4.1 (128-bit lanes)
    Sse41,
    /// ARM NEON (128-bit lanes)
    Neon,
}

impl AcceleratorBackend {
    /// Whether this backend can run the SIMD extractor.
    pub fn is_accelerated(&self) -> bool {
        !matches!(self, AcceleratorBackend::None)
    }
}

impl fmt::Display for AcceleratorBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcceleratorBackend::None => write!(f, "none"),
            AcceleratorBackend::Avx2 => write!(f, "AVX2"),
            AcceleratorBackend::Sse41 => write!(f, "SSE4.1"),
            AcceleratorBackend::Neon => write!(f, "NEON"),
        }
    }
}

/// Result of the one-time hardware probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardwareInfo {
    backend: AcceleratorBackend,
    description: String,
}

impl HardwareInfo {
    /// Describe the backend. The SIMD path is `wide`'s portable `f32x8`,
    /// lowered to the compile-time target features.
    pub(crate) fn new(backend: AcceleratorBackend) -> Self {
        let description = match backend {
            AcceleratorBackend::None => {
                "CPU only (no SIMD acceleration available)".to_string()
            }
            accelerated => format!(
                "portable SIMD (wide f32x8, compile-time target features; CPU reports {})",
                accelerated
            ),
        };
        Self {
            backend,
            description,
        }
    }

    /// Whether an accelerated backend is usable.
    pub fn is_available(&self) -> bool {
        self.backend.is_accelerated()
    }

    /// Detected backend.
    pub fn backend(&self) -> AcceleratorBackend {
        self.backend
    }

    /// Human-readable description. Never empty.
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Process-wide hardware probe.
pub struct HardwareDetector;

static HARDWARE: OnceLock<HardwareInfo> = OnceLock::new();

impl HardwareDetector {
    /// Probe once and return the cached answer on every later call.
    pub fn detect() -> &'static HardwareInfo {
        HARDWARE.get_or_init(|| {
            let info = HardwareInfo::new(probe_backend());
            debug!("Hardware probe: {}", info.description());
            info
        })
    }

    /// Shorthand for `detect().is_available()`.
    pub fn is_available() -> bool {
        Self::detect().is_available()
    }

    /// Shorthand for `detect().backend()`.
    pub fn backend() -> AcceleratorBackend {
        Self::detect().backend()
    }

    /// Shorthand for `detect().description()`.
    pub fn description() -> &'static str {
        Self::detect().description()
    }
}

#[cfg(all(feature = "simd", any(target_arch = "x86", target_arch = "x86_64")))]
fn probe_backend() -> AcceleratorBackend {
    if is_x86_feature_detected!("avx2") {
        AcceleratorBackend::Avx2
    } else if is_x86_feature_detected!("sse4.1") {
        AcceleratorBackend::Sse41
    } else {
        AcceleratorBackend::None
    }
}

#[cfg(all(feature = "simd", target_arch = "aarch64"))]
fn probe_backend() -> AcceleratorBackend {
    if std::arch::is_aarch64_feature_detected!("neon") {
        AcceleratorBackend::Neon
    } else {
        AcceleratorBackend::None
    }
}

#[cfg(not(all(
    feature = "simd",
    any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")
)))]
fn probe_backend() -> AcceleratorBackend {
    AcceleratorBackend::None
}
