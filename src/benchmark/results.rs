// src/benchmark/results.rs

use std::path::Path;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use log::warn;
use crate::benchmark::system_info::SystemInfo;
use crate::error::Result;
use crate::registry::KernelId;

/// Timing of one kernel at one input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub kernel: KernelId,
    pub input: i64,
    pub iterations: u32,
    /// Last computed result, reduced to one integer (see `KernelOutput::sample`).
    pub result: i64,
    pub mean_time_ns: u64,
    pub median_time_ns: u64,
    pub std_dev_ns: u64,
    pub min_time_ns: u64,
    pub max_time_ns: u64,
}

/// Direct vs optimized timing of one problem at one input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub baseline: KernelId,
    pub candidate: KernelId,
    pub input: i64,
    pub iterations: u32,
    pub baseline_mean_ns: u64,
    pub baseline_std_dev_ns: u64,
    pub candidate_mean_ns: u64,
    pub candidate_std_dev_ns: u64,
    pub results_match: bool,
    /// Baseline mean over candidate mean.
    pub speedup: Option<f64>,
}

impl ComparisonResult {
    /// How much less time the candidate takes, as `(speedup - 1) * 100`.
    pub fn improvement_percent(&self) -> Option<f64> {
        self.speedup.map(improvement_percent)
    }
}

pub fn improvement_percent(speedup: f64) -> f64 {
    (speedup - 1.0) * 100.0
}

/// Aggregate of the speedups measured across a suite's comparisons.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedupSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Sample standard deviation; zero for a single comparison.
    pub std_dev: f64,
}

impl SpeedupSummary {
    /// None when no comparison has a measurable speedup.
    pub fn from_comparisons(comparisons: &[ComparisonResult]) -> Option<Self> {
        let mut speedups: Vec<f64> = comparisons.iter().filter_map(|c| c.speedup).collect();
        if speedups.is_empty() {
            return None;
        }
        speedups.sort_by(|a, b| a.total_cmp(b));

        let count = speedups.len();
        let mean = speedups.iter().sum::<f64>() / count as f64;
        let mid = count / 2;
        let median = if count % 2 == 0 {
            (speedups[mid - 1] + speedups[mid]) / 2.0
        } else {
            speedups[mid]
        };
        let std_dev = if count < 2 {
            0.0
        } else {
            let variance = speedups.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
            variance.sqrt()
        };

        Some(SpeedupSummary {
            count,
            mean,
            median,
            min: speedups[0],
            max: speedups[count - 1],
            std_dev,
        })
    }

    pub fn mean_improvement_percent(&self) -> f64 {
        improvement_percent(self.mean)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkSuite {
    pub timestamp: DateTime<Utc>,
    pub system_info: SystemInfo,
    pub kernel_benchmarks: Vec<BenchmarkResult>,
    pub comparisons: Vec<ComparisonResult>,
}

impl BenchmarkSuite {
    pub fn new() -> Self {
        Self::with_system_info(SystemInfo::collect())
    }

    pub fn with_system_info(system_info: SystemInfo) -> Self {
        BenchmarkSuite {
            timestamp: Utc::now(),
            system_info,
            kernel_benchmarks: Vec::new(),
            comparisons: Vec::new(),
        }
    }

    pub fn add_kernel_benchmark(&mut self, result: BenchmarkResult) {
        self.kernel_benchmarks.push(result);
    }

    pub fn add_comparison(&mut self, result: ComparisonResult) {
        self.comparisons.push(result);
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let suite = serde_json::from_str(&json)?;
        Ok(suite)
    }

    pub fn print_summary(&self) {
        println!("\n{}", "=".repeat(80));
        println!("NUMERIC KERNEL BENCHMARK RESULTS");
        println!("{}", "=".repeat(80));
        println!("\nTimestamp: {}", self.timestamp);
        if !self.system_info.build.is_release() {
            warn!("Timings were recorded with a debug build");
        }
        println!("{}", self.system_info);

        if !self.kernel_benchmarks.is_empty() {
            println!("{}", "-".repeat(80));
            println!("KERNELS");
            println!("{}", "-".repeat(80));
            println!("{:<28} {:>10} {:>6} {:>14} {:>14}", "Kernel", "Input", "Iters", "Mean Time", "Std Dev");
            println!("{}", "-".repeat(80));

            for bench in &self.kernel_benchmarks {
                println!("{:<28} {:>10} {:>6} {:>14} {:>14}",
                    bench.kernel.name(),
                    bench.input,
                    bench.iterations,
                    format_duration(bench.mean_time_ns),
                    format_duration(bench.std_dev_ns),
                );
            }
        }

        if !self.comparisons.is_empty() {
            println!("\n{}", "-".repeat(80));
            println!("DIRECT VS OPTIMIZED");
            println!("{}", "-".repeat(80));

            for cmp in &self.comparisons {
                println!("\n{} vs {} (input {}, {} iterations)",
                    cmp.baseline.name(), cmp.candidate.name(), cmp.input, cmp.iterations);
                println!("  Baseline:   {} ± {}",
                    format_duration(cmp.baseline_mean_ns), format_duration(cmp.baseline_std_dev_ns));
                println!("  Candidate:  {} ± {}",
                    format_duration(cmp.candidate_mean_ns), format_duration(cmp.candidate_std_dev_ns));
                println!("  Results:    {}", if cmp.results_match { "match" } else { "DIFFER" });
                println!("  Speedup:    {}", format_speedup(cmp.speedup));
                if let Some(percent) = cmp.improvement_percent() {
                    println!("  Improvement: {:.1}%", percent);
                }
            }
        }

        if let Some(summary) = self.speedup_summary() {
            println!("\n{}", "-".repeat(80));
            println!("SPEEDUP SUMMARY ({} comparisons)", summary.count);
            println!("{}", "-".repeat(80));
            println!("  Average:     {:.2}x", summary.mean);
            println!("  Median:      {:.2}x", summary.median);
            println!("  Max:         {:.2}x", summary.max);
            println!("  Min:         {:.2}x", summary.min);
            println!("  Std Dev:     {:.2}", summary.std_dev);
            println!("  Average improvement: {:.1}%", summary.mean_improvement_percent());
        }

        println!("\n{}", "=".repeat(80));
    }
}

impl BenchmarkSuite {
    pub fn speedup_summary(&self) -> Option<SpeedupSummary> {
        SpeedupSummary::from_comparisons(&self.comparisons)
    }
}

impl Default for BenchmarkSuite {
    fn default() -> Self {
        Self::new()
    }
}

/// Print a side-by-side view of two saved suites, matching kernel
/// benchmarks by kernel and input.
pub fn compare_suites(baseline: &BenchmarkSuite, current: &BenchmarkSuite) {
    println!("\n{}", "=".repeat(80));
    println!("BENCHMARK COMPARISON");
    println!("{}", "=".repeat(80));
    println!("\nBaseline: {} ({})", baseline.timestamp, baseline.system_info.short_commit());
    println!("Current:  {} ({})", current.timestamp, current.system_info.short_commit());
    for mismatch in baseline.system_info.timing_mismatches(&current.system_info) {
        warn!("Suites are not directly comparable: {}", mismatch);
    }

    println!("\n{}", "-".repeat(80));
    println!("{:<28} {:>10} {:>13} {:>13} {:>13}", "Kernel", "Input", "Baseline", "Current", "Change");
    println!("{}", "-".repeat(80));

    for (base, curr) in matched_benchmarks(baseline, current) {
        let speedup = ratio(base.mean_time_ns, curr.mean_time_ns);
        println!("{:<28} {:>10} {:>13} {:>13} {:>13}",
            curr.kernel.name(),
            curr.input,
            format_duration(base.mean_time_ns),
            format_duration(curr.mean_time_ns),
            format_speedup(speedup),
        );
    }

    println!("{}", "=".repeat(80));
}

/// Pairs of (baseline, current) results recorded for the same kernel and input.
pub fn matched_benchmarks<'a>(
    baseline: &'a BenchmarkSuite,
    current: &'a BenchmarkSuite,
) -> Vec<(&'a BenchmarkResult, &'a BenchmarkResult)> {
    current.kernel_benchmarks.iter()
        .filter_map(|curr| {
            baseline.kernel_benchmarks.iter()
                .find(|base| base.kernel == curr.kernel && base.input == curr.input)
                .map(|base| (base, curr))
        })
        .collect()
}

/// `before / after`, or None when `after` is zero.
pub fn ratio(before: u64, after: u64) -> Option<f64> {
    if after == 0 {
        None
    } else {
        Some(before as f64 / after as f64)
    }
}

pub fn format_speedup(speedup: Option<f64>) -> String {
    match speedup {
        Some(s) if s >= 1.0 => format!("{:.2}x faster", s),
        Some(s) if s > 0.0 => format!("{:.2}x slower", 1.0 / s),
        _ => "-".to_string(),
    }
}

pub fn format_duration(ns: u64) -> String {
    if ns < 1_000 {
        format!("{} ns", ns)
    } else if ns < 1_000_000 {
        format!("{:.2} µs", ns as f64 / 1_000.0)
    } else if ns < 1_000_000_000 {
        format!("{:.2} ms", ns as f64 / 1_000_000.0)
    } else {
        format!("{:.2} s", ns as f64 / 1_000_000_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmark::system_info::{BuildInfo, Checkout};

    fn sample_info() -> SystemInfo {
        SystemInfo {
            os: "Linux 6.1".to_string(),
            cpu_model: "Test CPU".to_string(),
            cpu_threads: 8,
            total_memory_mb: 16_384,
            build: BuildInfo {
                profile: "release".to_string(),
                target_arch: "x86_64".to_string(),
                crate_version: "0.1.0".to_string(),
            },
            checkout: Some(Checkout {
                commit: "0123456789abcdef".to_string(),
                branch: "main".to_string(),
                dirty: false,
            }),
        }
    }

    fn comparison(speedup: Option<f64>) -> ComparisonResult {
        ComparisonResult {
            baseline: KernelId::PrimeCount,
            candidate: KernelId::PrimeCountOptimized,
            input: 1000,
            iterations: 3,
            baseline_mean_ns: 1000,
            baseline_std_dev_ns: 0,
            candidate_mean_ns: 100,
            candidate_std_dev_ns: 0,
            results_match: true,
            speedup,
        }
    }

    fn result(kernel: KernelId, input: i64, mean_time_ns: u64) -> BenchmarkResult {
        BenchmarkResult {
            kernel,
            input,
            iterations: 3,
            result: 0,
            mean_time_ns,
            median_time_ns: mean_time_ns,
            std_dev_ns: 0,
            min_time_ns: mean_time_ns,
            max_time_ns: mean_time_ns,
        }
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(999), "999 ns");
        assert_eq!(format_duration(1_500), "1.50 µs");
        assert_eq!(format_duration(2_500_000), "2.50 ms");
        assert_eq!(format_duration(3_000_000_000), "3.00 s");
    }

    #[test]
    fn test_format_speedup() {
        assert_eq!(format_speedup(Some(4.0)), "4.00x faster");
        assert_eq!(format_speedup(Some(0.5)), "2.00x slower");
        assert_eq!(format_speedup(None), "-");
        assert_eq!(ratio(10, 0), None);
        assert_eq!(ratio(10, 5), Some(2.0));
    }

    #[test]
    fn test_save_and_load() {
        let mut suite = BenchmarkSuite::with_system_info(sample_info());
        suite.add_kernel_benchmark(result(KernelId::PrimeCount, 10_000, 1_200_000));

        let path = std::env::temp_dir().join(format!("numeric_kernels_suite_{}.json", std::process::id()));
        suite.save_to_file(&path).unwrap();
        let loaded = BenchmarkSuite::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.timestamp, suite.timestamp);
        assert_eq!(loaded.kernel_benchmarks.len(), 1);
        assert_eq!(loaded.kernel_benchmarks[0].kernel, KernelId::PrimeCount);
        assert_eq!(loaded.system_info, suite.system_info);
        assert_eq!(loaded.system_info.short_commit(), "01234567");
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = BenchmarkSuite::load_from_file("/nonexistent/suite.json").unwrap_err();
        assert!(matches!(err, crate::error::KernelError::Io(_)));
    }

    #[test]
    fn test_matched_benchmarks_pairs_by_kernel_and_input() {
        let mut baseline = BenchmarkSuite::with_system_info(sample_info());
        baseline.add_kernel_benchmark(result(KernelId::SumOfSquares, 100, 50));
        baseline.add_kernel_benchmark(result(KernelId::PrimeCount, 10, 80));

        let mut current = BenchmarkSuite::with_system_info(sample_info());
        current.add_kernel_benchmark(result(KernelId::SumOfSquares, 100, 25));
        current.add_kernel_benchmark(result(KernelId::SumOfSquares, 200, 25));

        let pairs = matched_benchmarks(&baseline, &current);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].0.mean_time_ns, 50);
        assert_eq!(pairs[0].1.mean_time_ns, 25);
    }

    #[test]
    fn test_improvement_percent() {
        assert_eq!(comparison(Some(3.0)).improvement_percent(), Some(200.0));
        assert_eq!(comparison(Some(0.5)).improvement_percent(), Some(-50.0));
        assert_eq!(comparison(None).improvement_percent(), None);
    }

    #[test]
    fn test_speedup_summary() {
        let comparisons = vec![
            comparison(Some(2.0)),
            comparison(None),
            comparison(Some(10.0)),
            comparison(Some(4.0)),
            comparison(Some(8.0)),
        ];
        let summary = SpeedupSummary::from_comparisons(&comparisons).unwrap();
        assert_eq!(summary.count, 4);
        assert_eq!(summary.mean, 6.0);
        assert_eq!(summary.median, 6.0);
        assert_eq!(summary.min, 2.0);
        assert_eq!(summary.max, 10.0);
        // sqrt((16 + 4 + 4 + 16) / 3)
        assert!((summary.std_dev - (40.0f64 / 3.0).sqrt()).abs() < 1e-12);
        assert_eq!(summary.mean_improvement_percent(), 500.0);
    }

    #[test]
    fn test_speedup_summary_edge_cases() {
        assert_eq!(SpeedupSummary::from_comparisons(&[]), None);
        assert_eq!(SpeedupSummary::from_comparisons(&[comparison(None)]), None);

        let single = SpeedupSummary::from_comparisons(&[comparison(Some(1.5))]).unwrap();
        assert_eq!(single.median, 1.5);
        assert_eq!(single.std_dev, 0.0);
        assert_eq!(single.mean_improvement_percent(), 50.0);

        let mut suite = BenchmarkSuite::with_system_info(sample_info());
        assert_eq!(suite.speedup_summary(), None);
        suite.add_comparison(comparison(Some(3.0)));
        assert_eq!(suite.speedup_summary().map(|s| s.max), Some(3.0));
    }
}
