// src/benchmark_cli.rs
// Command handlers for the numeric-kernels binary

use std::path::Path;
use chrono::Utc;
use log::info;
use numeric_kernels::benchmark::results::{compare_suites, format_speedup};
use numeric_kernels::benchmark::{benchmark_kernel, compare_kernels, BenchmarkRunner, BenchmarkSuite};
use numeric_kernels::config::KernelsConfig;
use numeric_kernels::kernels::{sum_of_squares, sum_of_squares_optimized};
use numeric_kernels::{KernelError, KernelId, Result};

pub const USAGE: &str = "\
Usage: numeric-kernels [--config PATH] <command>

Commands:
  list                                 List registered kernels
  run <kernel> <input> [iterations]    Time one kernel
  compare <kernel> <input> [iterations]
                                       Time a kernel against its other variant
  bench                                Run the configured benchmark suite
  diff <baseline.json> <current.json>  Compare two saved suites
  quick                                Sanity check sum of squares both ways";

pub fn list_kernels() {
    for id in KernelId::ALL {
        println!("{:<26} ({}) {}", id.name(), id.argument(), id.doc());
    }
}

pub fn run_kernel(args: &[String]) -> Result<()> {
    let (kernel, input, iterations) = parse_kernel_args(args)?;
    let timed = benchmark_kernel(kernel, input, iterations)?;

    println!("{}({} = {})", kernel.name(), kernel.argument(), input);
    println!("Result: {}", timed.result);
    println!("Time:   {:.6} seconds (mean of {})", timed.average_seconds, iterations);
    Ok(())
}

pub fn compare_kernel(args: &[String]) -> Result<()> {
    let (kernel, input, iterations) = parse_kernel_args(args)?;
    let counterpart = kernel.counterpart()
        .ok_or_else(|| KernelError::NoCounterpart(kernel.name().to_string()))?;
    let cmp = compare_kernels(kernel, counterpart, input, iterations)?;

    println!("\n{} vs {} ({} = {}, {} iterations)",
        kernel.name(), counterpart.name(), kernel.argument(), input, iterations);
    println!("{}", "=".repeat(60));
    println!("  {:<26} {:.6} s  -> {}", kernel.name(), cmp.baseline.average_seconds, cmp.baseline.result);
    println!("  {:<26} {:.6} s  -> {}", counterpart.name(), cmp.candidate.average_seconds, cmp.candidate.result);
    println!("  Results:  {}", if cmp.results_match { "match" } else { "DIFFER" });
    println!("  Speedup:  {}", format_speedup(cmp.speedup));
    Ok(())
}

pub fn run_benchmarks(config: &KernelsConfig) -> Result<()> {
    println!("\n{}", "=".repeat(80));
    println!("NUMERIC KERNEL BENCHMARK SUITE");
    println!("{}", "=".repeat(80));

    info!("Running {} scenarios and {} comparisons",
        config.benchmark.scenarios.len(), config.benchmark.comparisons.len());
    let mut runner = BenchmarkRunner::new();
    runner.run_from_config(&config.benchmark)?;
    runner.print_summary();

    if config.save_results {
        let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
        let path = Path::new(&config.output_dir).join(format!("benchmark_results_{}.json", timestamp));
        runner.save_results(&path)?;
        println!("\nResults saved to: {}", path.display());
        println!("Compare with a previous run: numeric-kernels diff <baseline.json> {}", path.display());
    }
    Ok(())
}

pub fn diff_results(args: &[String]) -> Result<()> {
    let (baseline_path, current_path) = match args {
        [baseline, current, ..] => (baseline, current),
        _ => return Err(KernelError::InvalidArgument("diff needs a baseline and a current result file".to_string())),
    };
    let baseline = BenchmarkSuite::load_from_file(baseline_path)?;
    let current = BenchmarkSuite::load_from_file(current_path)?;
    compare_suites(&baseline, &current);
    Ok(())
}

pub fn quick_check() -> Result<()> {
    println!("Quick Functionality Test");
    println!("{}", "=".repeat(25));

    let direct = sum_of_squares(1000);
    let formula = sum_of_squares_optimized(1000);
    println!("  Sum of squares (1-1000), loop:    {}", direct);
    println!("  Sum of squares (1-1000), formula: {}", formula);

    if direct == formula {
        println!("Both implementations produce the same result");
        Ok(())
    } else {
        Err(KernelError::ResultMismatch(format!("sum_of_squares {} vs sum_of_squares_optimized {}", direct, formula)))
    }
}

/// `<kernel> <input> [iterations]`, iterations defaulting to 1.
fn parse_kernel_args(args: &[String]) -> Result<(KernelId, i64, u32)> {
    let kernel: KernelId = args.first()
        .ok_or_else(|| KernelError::InvalidArgument("missing kernel name".to_string()))?
        .parse()?;
    let input = args.get(1)
        .ok_or_else(|| KernelError::InvalidArgument(format!("missing {} for {}", kernel.argument(), kernel.name())))?;
    let input = input.parse::<i64>()
        .map_err(|e| KernelError::InvalidArgument(format!("{} = {:?}: {}", kernel.argument(), input, e)))?;
    let iterations = match args.get(2) {
        Some(s) => s.parse::<u32>().map_err(|_| KernelError::InvalidIterations)?,
        None => 1,
    };
    Ok((kernel, input, iterations))
}
