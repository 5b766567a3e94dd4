// tests/benchmark_tests.rs
//
// Harness behaviour seen from outside the crate: what gets timed, what gets
// reported, and how suites survive a trip through disk.

use numeric_kernels::benchmark::results::matched_benchmarks;
use numeric_kernels::benchmark::{benchmark_kernel, compare_kernels, BenchmarkRunner, BenchmarkSuite};
use numeric_kernels::config::{ComparisonConfig, KernelsConfig, ScenarioConfig};
use numeric_kernels::kernels::{FibonacciMemoized, FibonacciRecursive, MatrixMultiplication, SumOfSquares, SumOfSquaresFormula};
use numeric_kernels::{KernelError, KernelId, KernelOutput};

#[cfg(test)]
mod benchmark_tests {
    use super::*;

    #[test]
    fn test_benchmark_returns_last_result_and_mean() {
        let timed = benchmark_kernel(SumOfSquares, 100_000, 5).unwrap();
        assert_eq!(timed.result, 333_338_333_350_000);
        assert!(timed.average_seconds >= 0.0);
    }

    #[test]
    fn test_benchmark_matrix_kernel() {
        let timed = benchmark_kernel(MatrixMultiplication, 100, 2).unwrap();
        assert_eq!(timed.result.size(), 100);
        assert_eq!(timed.result.get(0, 0), Some(4950));
    }

    #[test]
    fn test_benchmark_registered_kernel() {
        let timed = benchmark_kernel(KernelId::PrimeCountOptimized, 100_000, 3).unwrap();
        assert_eq!(timed.result, KernelOutput::Count(9592));
    }

    #[test]
    fn test_zero_iterations() {
        let err = benchmark_kernel(KernelId::SumOfSquares, 10, 0).unwrap_err();
        assert_eq!(err, KernelError::InvalidIterations);
    }

    #[test]
    fn test_memoized_kernel_keeps_cache_across_benchmarks() {
        let mut kernel = FibonacciMemoized::new();
        benchmark_kernel(&mut kernel, 40, 1).unwrap();
        assert_eq!(kernel.memo.len(), 41);
        let again = benchmark_kernel(&mut kernel, 40, 3).unwrap();
        assert_eq!(again.result, 102_334_155);
    }

    #[test]
    fn test_compare_direct_and_optimized() {
        let cmp = compare_kernels(SumOfSquares, SumOfSquaresFormula, 1_000_000, 3).unwrap();
        assert!(cmp.results_match);
        assert_eq!(cmp.baseline.result, cmp.candidate.result);

        let cmp = compare_kernels(FibonacciRecursive, FibonacciMemoized::new(), 25, 1).unwrap();
        assert!(cmp.results_match);
        assert_eq!(cmp.baseline.result, 75_025);
    }

    #[test]
    fn test_runner_with_custom_scenarios() {
        let mut config = KernelsConfig::default();
        config.benchmark.scenarios = vec![
            ScenarioConfig { kernel: KernelId::FibonacciRecursive, input: 15, iterations: 2 },
            ScenarioConfig { kernel: KernelId::PrimeCount, input: 1_000, iterations: 2 },
        ];
        config.benchmark.comparisons = vec![
            ComparisonConfig { baseline: KernelId::SumOfSquaresOptimized, candidate: None, input: 10_000, iterations: 2 },
        ];

        let mut runner = BenchmarkRunner::new();
        runner.run_from_config(&config.benchmark).unwrap();
        let suite = runner.into_suite();

        assert_eq!(suite.kernel_benchmarks[0].result, 610);
        assert_eq!(suite.kernel_benchmarks[1].result, 168);
        for bench in &suite.kernel_benchmarks {
            assert!(bench.min_time_ns <= bench.mean_time_ns);
            assert!(bench.mean_time_ns <= bench.max_time_ns);
        }
        assert_eq!(suite.comparisons[0].candidate, KernelId::SumOfSquares);
        assert!(suite.comparisons[0].results_match);
    }

    #[test]
    fn test_suite_file_round_trip_and_diff() {
        let mut runner = BenchmarkRunner::new();
        runner.run_scenarios(&[
            ScenarioConfig { kernel: KernelId::SumOfSquares, input: 10_000, iterations: 2 },
        ]).unwrap();

        let path = std::env::temp_dir().join(format!("numeric_kernels_it_{}.json", std::process::id()));
        runner.save_results(&path).unwrap();
        let loaded = BenchmarkSuite::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let pairs = matched_benchmarks(&loaded, runner.suite());
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].0.mean_time_ns, pairs[0].1.mean_time_ns);
        assert_eq!(pairs[0].0.result, 333_383_335_000);
    }
}
