// src/benchmark/mod.rs

pub mod system_info;
pub mod results;
pub mod runner;

pub use system_info::{BuildInfo, Checkout, SystemInfo};
pub use results::{BenchmarkResult, BenchmarkSuite, ComparisonResult, SpeedupSummary};
pub use runner::{benchmark_kernel, compare_kernels, profile_kernel, BenchmarkRunner, Comparison, KernelProfile, Timed};
