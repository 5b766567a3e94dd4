// src/benchmark/runner.rs

use std::time::{Duration, Instant};
use log::{debug, info, warn};
use crate::benchmark::results::{ratio, BenchmarkResult, BenchmarkSuite, ComparisonResult};
use crate::config::{BenchmarkConfig, ComparisonConfig, ScenarioConfig};
use crate::error::{KernelError, Result};
use crate::kernels::Kernel;
use crate::registry::{KernelId, KernelOutput};

/// Last result of a repeated run and the mean wall time per call.
#[derive(Debug, Clone, PartialEq)]
pub struct Timed<T> {
    pub result: T,
    pub average_seconds: f64,
}

/// Calls `kernel` `iterations` times with the same input and reports the
/// last result together with the mean time per call.
///
/// The whole loop is timed as one span, so per-call overhead of the
/// clock is not included.
pub fn benchmark_kernel<K: Kernel>(mut kernel: K, input: i64, iterations: u32) -> Result<Timed<K::Output>> {
    if iterations == 0 {
        return Err(KernelError::InvalidIterations);
    }
    debug!("Timing {} ({}) x{}", kernel.name(), input, iterations);

    let start = Instant::now();
    let mut result = kernel.compute(input);
    for _ in 1..iterations {
        result = kernel.compute(input);
    }
    let elapsed = start.elapsed();

    Ok(Timed {
        result,
        average_seconds: elapsed.as_secs_f64() / iterations as f64,
    })
}

/// Per-call timings of a repeated run.
///
/// Every statistic is `Duration::ZERO` when there are no samples.
#[derive(Debug, Clone)]
pub struct KernelProfile<T> {
    pub result: T,
    pub samples: Vec<Duration>,
}

impl<T> KernelProfile<T> {
    pub fn iterations(&self) -> usize {
        self.samples.len()
    }

    pub fn mean(&self) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.samples.iter().sum();
        total / self.samples.len() as u32
    }

    pub fn median(&self) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }
        let mut sorted = self.samples.clone();
        sorted.sort();
        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2
        } else {
            sorted[mid]
        }
    }

    /// Sample standard deviation; zero for a single sample.
    pub fn std_dev(&self) -> Duration {
        let n = self.samples.len();
        if n < 2 {
            return Duration::ZERO;
        }
        let mean = self.mean().as_secs_f64();
        let variance = self.samples.iter()
            .map(|s| (s.as_secs_f64() - mean).powi(2))
            .sum::<f64>() / (n - 1) as f64;
        Duration::from_secs_f64(variance.sqrt())
    }

    pub fn min(&self) -> Duration {
        self.samples.iter().copied().min().unwrap_or_default()
    }

    pub fn max(&self) -> Duration {
        self.samples.iter().copied().max().unwrap_or_default()
    }
}

/// Times each call separately, optionally after one untimed warm-up call.
pub fn profile_kernel<K: Kernel>(mut kernel: K, input: i64, iterations: u32, warmup: bool) -> Result<KernelProfile<K::Output>> {
    if iterations == 0 {
        return Err(KernelError::InvalidIterations);
    }
    if warmup {
        kernel.compute(input);
    }

    let mut samples = Vec::with_capacity(iterations as usize);
    let mut result = None;
    for _ in 0..iterations {
        let start = Instant::now();
        let value = kernel.compute(input);
        samples.push(start.elapsed());
        result = Some(value);
    }

    match result {
        Some(result) => Ok(KernelProfile { result, samples }),
        None => Err(KernelError::InvalidIterations),
    }
}

/// Outcome of timing two interchangeable kernels on the same input.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison<T> {
    pub baseline: Timed<T>,
    pub candidate: Timed<T>,
    pub results_match: bool,
    /// Baseline time over candidate time; None if the candidate took no
    /// measurable time.
    pub speedup: Option<f64>,
}

pub fn compare_kernels<A, B>(baseline: A, candidate: B, input: i64, iterations: u32) -> Result<Comparison<A::Output>>
where
    A: Kernel,
    B: Kernel<Output = A::Output>,
    A::Output: PartialEq,
{
    let base = benchmark_kernel(baseline, input, iterations)?;
    let cand = benchmark_kernel(candidate, input, iterations)?;

    let results_match = base.result == cand.result;
    let speedup = if cand.average_seconds > 0.0 {
        Some(base.average_seconds / cand.average_seconds)
    } else {
        None
    };

    Ok(Comparison {
        baseline: base,
        candidate: cand,
        results_match,
        speedup,
    })
}

/// Runs configured scenarios and comparisons through the registry and
/// collects them into a `BenchmarkSuite`.
pub struct BenchmarkRunner {
    suite: BenchmarkSuite,
    warmup: bool,
}

impl BenchmarkRunner {
    pub fn new() -> Self {
        Self::with_suite(BenchmarkSuite::new())
    }

    pub fn with_suite(suite: BenchmarkSuite) -> Self {
        BenchmarkRunner { suite, warmup: false }
    }

    pub fn run_from_config(&mut self, config: &BenchmarkConfig) -> Result<()> {
        self.warmup = config.warmup;
        self.run_scenarios(&config.scenarios)?;
        self.run_comparisons(&config.comparisons)?;
        Ok(())
    }

    pub fn run_scenarios(&mut self, scenarios: &[ScenarioConfig]) -> Result<()> {
        for scenario in scenarios {
            let result = self.run_scenario(scenario.kernel, scenario.input, scenario.iterations)?;
            self.suite.add_kernel_benchmark(result);
        }
        Ok(())
    }

    pub fn run_comparisons(&mut self, comparisons: &[ComparisonConfig]) -> Result<()> {
        for cmp in comparisons {
            let counterpart = cmp.baseline.counterpart()
                .ok_or_else(|| KernelError::NoCounterpart(cmp.baseline.name().to_string()))?;
            let candidate = cmp.candidate.unwrap_or(counterpart);
            if candidate != counterpart {
                return Err(KernelError::InvalidArgument(format!(
                    "{} cannot be compared with {}; its counterpart is {}",
                    cmp.baseline, candidate, counterpart
                )));
            }
            let result = self.run_comparison(cmp.baseline, candidate, cmp.input, cmp.iterations)?;
            self.suite.add_comparison(result);
        }
        Ok(())
    }

    /// Profile a single registered kernel, starting from a cold memo.
    pub fn run_scenario(&self, kernel: KernelId, input: i64, iterations: u32) -> Result<BenchmarkResult> {
        info!("Benchmarking {}({} = {}) x{}", kernel.name(), kernel.argument(), input, iterations);
        let profile = self.profile(kernel, input, iterations)?;
        let mean = profile.mean();
        info!("  {} -> {} ({:?} per call)", kernel.name(), profile.result, mean);

        Ok(BenchmarkResult {
            kernel,
            input,
            iterations,
            result: profile.result.sample(),
            mean_time_ns: mean.as_nanos() as u64,
            median_time_ns: profile.median().as_nanos() as u64,
            std_dev_ns: profile.std_dev().as_nanos() as u64,
            min_time_ns: profile.min().as_nanos() as u64,
            max_time_ns: profile.max().as_nanos() as u64,
        })
    }

    /// Profile two registered kernels on the same input, each from a cold
    /// memo and with the runner's warm-up setting.
    pub fn run_comparison(&self, baseline: KernelId, candidate: KernelId, input: i64, iterations: u32) -> Result<ComparisonResult> {
        info!("Comparing {} vs {} at {} x{}", baseline.name(), candidate.name(), input, iterations);
        let base = self.profile(baseline, input, iterations)?;
        let cand = self.profile(candidate, input, iterations)?;

        let results_match = base.result == cand.result;
        if !results_match {
            warn!("{} and {} disagree at {}: {} vs {}",
                baseline.name(), candidate.name(), input, base.result, cand.result);
        }

        let baseline_mean_ns = base.mean().as_nanos() as u64;
        let candidate_mean_ns = cand.mean().as_nanos() as u64;
        Ok(ComparisonResult {
            baseline,
            candidate,
            input,
            iterations,
            baseline_mean_ns,
            baseline_std_dev_ns: base.std_dev().as_nanos() as u64,
            candidate_mean_ns,
            candidate_std_dev_ns: cand.std_dev().as_nanos() as u64,
            results_match,
            speedup: ratio(baseline_mean_ns, candidate_mean_ns),
        })
    }

    fn profile(&self, kernel: KernelId, input: i64, iterations: u32) -> Result<KernelProfile<KernelOutput>> {
        kernel.reset();
        profile_kernel(kernel, input, iterations, self.warmup)
    }

    pub fn save_results<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        self.suite.save_to_file(path)
    }

    pub fn print_summary(&self) {
        self.suite.print_summary();
    }

    pub fn suite(&self) -> &BenchmarkSuite {
        &self.suite
    }

    pub fn into_suite(self) -> BenchmarkSuite {
        self.suite
    }
}

impl Default for BenchmarkRunner {
    fn default() -> Self {
        Self::new()
    }
}
