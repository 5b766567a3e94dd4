// src/kernels/mod.rs
//
// Numeric kernels: each problem is solved twice, once the direct way and
// once with a better algorithm or closed form, so the two can be timed
// against each other.
//
// Problem             Direct                  Optimized
// ─────────────────────────────────────────────────────────────────────
// Sum of squares      loop, O(n)              n(n+1)(2n+1)/6, O(1)
// Fibonacci           double recursion        memoized, O(n) first call
// Prime count         trial division          sieve of Eratosthenes
// Matrix multiply     i-k-j triple loop       -
//
// All arithmetic wraps on overflow (two's complement), so every pair of
// variants agrees for every i64 input, not just the ones that fit.

pub mod sum_of_squares;
pub mod fibonacci;
pub mod prime_count;
pub mod matrix_multiplication;

pub use sum_of_squares::{sum_of_squares, sum_of_squares_optimized, SumOfSquares, SumOfSquaresFormula};
pub use fibonacci::{clear_shared_memo, configure_shared_memo, fibonacci_memoized, fibonacci_recursive, FibonacciMemo, FibonacciMemoized, FibonacciRecursive};
pub use prime_count::{prime_count, prime_count_optimized, PrimeCountSieve, PrimeCountTrialDivision};
pub use matrix_multiplication::{matrix_multiplication, MatrixMultiplication, SquareMatrix};

/// A single computation over one integer input.
///
/// The direct and optimized variants of a problem implement this with the
/// same `Output`, so a benchmark driver can take either one.
pub trait Kernel {
    type Output;

    /// Stable name the routine is registered under.
    fn name(&self) -> &'static str;

    fn compute(&mut self, input: i64) -> Self::Output;
}

impl<K: Kernel + ?Sized> Kernel for &mut K {
    type Output = K::Output;

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn compute(&mut self, input: i64) -> Self::Output {
        (**self).compute(input)
    }
}
