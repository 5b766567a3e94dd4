// src/config/kernels_config.rs

use serde::{Deserialize, Serialize};
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use config::builder::DefaultState;
use std::path::Path;
use crate::error::Result;
use crate::registry::KernelId;

/// Main configuration for the kernel benchmark driver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KernelsConfig {
    /// Directory benchmark result files are written to
    pub output_dir: String,

    /// Logging level (error, warn, info, debug, trace)
    pub log_level: String,

    /// Write a JSON result file after `bench`
    pub save_results: bool,

    /// Cap on the process-wide Fibonacci memo; None leaves it unbounded
    #[serde(default)]
    pub memo_max_entries: Option<usize>,

    /// What `bench` runs
    #[serde(default)]
    pub benchmark: BenchmarkConfig,
}

/// Scenario lists for a full benchmark run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    /// Make one untimed call before timing each scenario
    #[serde(default)]
    pub warmup: bool,

    #[serde(default = "default_scenarios")]
    pub scenarios: Vec<ScenarioConfig>,

    #[serde(default = "default_comparisons")]
    pub comparisons: Vec<ComparisonConfig>,
}

/// One kernel timed at one input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub kernel: KernelId,
    pub input: i64,
    pub iterations: u32,
}

/// Two variants of one problem timed at the same input.
/// Without `candidate`, the baseline's counterpart is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonConfig {
    pub baseline: KernelId,
    #[serde(default)]
    pub candidate: Option<KernelId>,
    pub input: i64,
    pub iterations: u32,
}

fn default_scenarios() -> Vec<ScenarioConfig> {
    vec![
        ScenarioConfig { kernel: KernelId::SumOfSquares, input: 100_000, iterations: 5 },
        // Exponential time: keep n small.
        ScenarioConfig { kernel: KernelId::FibonacciRecursive, input: 35, iterations: 1 },
        ScenarioConfig { kernel: KernelId::PrimeCount, input: 10_000, iterations: 3 },
        ScenarioConfig { kernel: KernelId::MatrixMultiplication, input: 100, iterations: 3 },
    ]
}

fn default_comparisons() -> Vec<ComparisonConfig> {
    vec![
        ComparisonConfig { baseline: KernelId::SumOfSquares, candidate: None, input: 1_000_000, iterations: 10 },
        ComparisonConfig { baseline: KernelId::PrimeCount, candidate: None, input: 100_000, iterations: 3 },
        ComparisonConfig { baseline: KernelId::FibonacciRecursive, candidate: None, input: 40, iterations: 1 },
    ]
}

impl Default for KernelsConfig {
    fn default() -> Self {
        KernelsConfig {
            output_dir: ".".to_string(),
            log_level: "info".to_string(),
            save_results: true,
            memo_max_entries: None,
            benchmark: BenchmarkConfig::default(),
        }
    }
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        BenchmarkConfig {
            warmup: false,
            scenarios: default_scenarios(),
            comparisons: default_comparisons(),
        }
    }
}

impl KernelsConfig {
    /// Load configuration with precedence: defaults → kernels.toml / kernels.yaml → env vars
    pub fn load() -> Result<Self> {
        let mut builder = Self::defaults()?;

        // TOML preferred, YAML fallback
        if Path::new("kernels.toml").exists() {
            builder = builder.add_source(File::with_name("kernels.toml"));
        } else if Path::new("kernels.yaml").exists() {
            builder = builder.add_source(File::with_name("kernels.yaml"));
        }

        Self::finish(builder)
    }

    /// Load configuration from a specific file; a missing file is an error
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let builder = Self::defaults()?
            .add_source(File::from(path.as_ref()).required(true));
        Self::finish(builder)
    }

    fn defaults() -> std::result::Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("output_dir", ".")?
            .set_default("log_level", "info")?
            .set_default("save_results", true)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        // Environment overrides, e.g. KERNELS_LOG_LEVEL=debug, KERNELS_BENCHMARK__WARMUP=true
        let config = builder
            .add_source(
                Environment::with_prefix("KERNELS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KernelError;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{}_{}", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = KernelsConfig::default();
        assert_eq!(config.output_dir, ".");
        assert_eq!(config.log_level, "info");
        assert!(config.save_results);
        assert_eq!(config.memo_max_entries, None);
        assert!(!config.benchmark.warmup);
        assert_eq!(config.benchmark.scenarios.len(), 4);
        assert_eq!(config.benchmark.comparisons.len(), 3);
        assert_eq!(config.benchmark.scenarios[1].kernel, KernelId::FibonacciRecursive);
        assert_eq!(config.benchmark.scenarios[1].input, 35);
    }

    #[test]
    fn test_load_without_file() {
        // Should successfully load defaults when no config file exists
        let config = KernelsConfig::load().unwrap_or_else(|_| KernelsConfig::default());
        assert_eq!(config.output_dir, ".");
        assert_eq!(config.benchmark.scenarios.len(), 4);
    }

    #[test]
    fn test_load_from_toml() {
        let path = write_temp("kernels_test.toml", r#"
output_dir = "results"
memo_max_entries = 500

[benchmark]
warmup = true

[[benchmark.scenarios]]
kernel = "prime_count_optimized"
input = 1000000
iterations = 4

[[benchmark.comparisons]]
baseline = "sum_of_squares"
candidate = "sum_of_squares_optimized"
input = 5000
iterations = 2
"#);
        let config = KernelsConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.output_dir, "results");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.memo_max_entries, Some(500));
        assert!(config.benchmark.warmup);
        assert_eq!(config.benchmark.scenarios, vec![ScenarioConfig {
            kernel: KernelId::PrimeCountOptimized,
            input: 1_000_000,
            iterations: 4,
        }]);
        assert_eq!(config.benchmark.comparisons[0].candidate, Some(KernelId::SumOfSquaresOptimized));
    }

    #[test]
    fn test_unknown_kernel_name_rejected() {
        let path = write_temp("kernels_bad.toml", r#"
[[benchmark.scenarios]]
kernel = "bubble_sort"
input = 10
iterations = 1
"#);
        let result = KernelsConfig::load_from_file(&path);
        std::fs::remove_file(&path).ok();
        match result {
            Err(KernelError::Config(msg)) => assert!(msg.contains("bubble_sort"), "{}", msg),
            other => panic!("expected a config error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_error() {
        let result = KernelsConfig::load_from_file("/nonexistent/kernels.toml");
        assert!(matches!(result, Err(KernelError::Config(_))));
    }
}
