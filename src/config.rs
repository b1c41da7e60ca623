//! TOML configuration for the extraction engine.
//!
//! ```toml
//! # mzxic.toml
//! [engine]
//! prefer_cpu = false
//! max_parallelism = 8
//! default_tolerance_ppm = 10.0
//! ```

use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::Deserialize;

/// Root configuration structure for `mzxic.toml` files.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// Engine settings.
    #[serde(default)]
    pub engine: EngineConfig,
}

/// Settings for backend choice and parallel extraction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Always use the scalar CPU extractor, even when SIMD is available.
    pub prefer_cpu: bool,

    /// Upper bound on concurrent extraction partitions. 0 uses the rayon
    /// pool's thread count.
    pub max_parallelism: usize,

    /// Mass tolerance for callers that generate queries without one.
    pub default_tolerance_ppm: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            prefer_cpu: false,
            max_parallelism: 0,
            default_tolerance_ppm: 10.0,
        }
    }
}

impl EngineConfig {
    /// Configuration that forces the CPU path.
    pub fn cpu_only() -> Self {
        Self {
            prefer_cpu: true,
            ..Default::default()
        }
    }

    /// Load the `[engine]` section from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        Ok(Config::from_file(path)?.engine)
    }

    /// Parse the `[engine]` section from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        Ok(Config::from_str(content)?.engine)
    }

    /// Effective number of partitions for `max_parallelism`.
    pub fn resolved_parallelism(&self) -> usize {
        resolve_parallelism(self.max_parallelism)
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            self.default_tolerance_ppm.is_finite() && self.default_tolerance_ppm > 0.0,
            "default_tolerance_ppm must be a positive number, got {}",
            self.default_tolerance_ppm
        );
        Ok(())
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML configuration")?;
        config
            .engine
            .validate()
            .context("Invalid [engine] configuration")?;
        Ok(config)
    }
}

/// Map a requested parallelism to a partition count; 0 means "rayon pool size".
pub(crate) fn resolve_parallelism(requested: usize) -> usize {
    if requested == 0 {
        rayon::current_num_threads().max(1)
    } else {
        requested
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [engine]
            prefer_cpu = true
            max_parallelism = 4
            default_tolerance_ppm = 20.0
        "#;

        let config = Config::from_str(toml).unwrap();
        assert!(config.engine.prefer_cpu);
        assert_eq!(config.engine.max_parallelism, 4);
        assert_eq!(config.engine.default_tolerance_ppm, 20.0);
        assert_eq!(config.engine.resolved_parallelism(), 4);
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [engine]
            max_parallelism = 2
        "#;

        let engine = EngineConfig::from_str(toml).unwrap();
        assert!(!engine.prefer_cpu);
        assert_eq!(engine.max_parallelism, 2);
        assert_eq!(engine.default_tolerance_ppm, 10.0);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.engine, EngineConfig::default());
        assert!(config.engine.resolved_parallelism() >= 1);
    }

    #[test]
    fn test_rejects_bad_tolerance() {
        let err = Config::from_str("[engine]\ndefault_tolerance_ppm = -5.0\n").unwrap_err();
        assert!(format!("{:#}", err).contains("default_tolerance_ppm"));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        assert!(Config::from_str("[engine\nprefer_cpu = ").is_err());
        assert!(Config::from_str("[engine]\nprefer_cpu = \"yes\"").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[engine]\nprefer_cpu = true").unwrap();

        let engine = EngineConfig::from_file(file.path()).unwrap();
        assert_eq!(engine, EngineConfig::cpu_only());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::from_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
