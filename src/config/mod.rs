// src/config/mod.rs

pub mod kernels_config;

// Re-export main types for convenience
pub use kernels_config::{BenchmarkConfig, ComparisonConfig, KernelsConfig, ScenarioConfig};
