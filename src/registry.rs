// src/registry.rs
//
// Stable names for the seven kernels, so a caller that only has a string
// (command line, config file, a foreign binding) can pick one and get a
// uniform result back.

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::error::KernelError;
use crate::kernels::{
    clear_shared_memo, fibonacci_memoized, fibonacci_recursive, matrix_multiplication, prime_count,
    prime_count_optimized, sum_of_squares, sum_of_squares_optimized, Kernel, SquareMatrix,
};

/// One of the registered kernels. Serializes as its stable name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KernelId {
    SumOfSquares,
    SumOfSquaresOptimized,
    FibonacciRecursive,
    FibonacciMemoized,
    PrimeCount,
    PrimeCountOptimized,
    MatrixMultiplication,
}

impl KernelId {
    pub const ALL: [KernelId; 7] = [
        KernelId::SumOfSquares,
        KernelId::SumOfSquaresOptimized,
        KernelId::FibonacciRecursive,
        KernelId::FibonacciMemoized,
        KernelId::PrimeCount,
        KernelId::PrimeCountOptimized,
        KernelId::MatrixMultiplication,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::SumOfSquares => "sum_of_squares",
            Self::SumOfSquaresOptimized => "sum_of_squares_optimized",
            Self::FibonacciRecursive => "fibonacci_recursive",
            Self::FibonacciMemoized => "fibonacci_memoized",
            Self::PrimeCount => "prime_count",
            Self::PrimeCountOptimized => "prime_count_optimized",
            Self::MatrixMultiplication => "matrix_multiplication",
        }
    }

    pub fn doc(&self) -> &'static str {
        match self {
            Self::SumOfSquares => "Calculate the sum of squares from 1 to n",
            Self::SumOfSquaresOptimized => "Calculate sum of squares using the closed form n(n+1)(2n+1)/6",
            Self::FibonacciRecursive => "Calculate the nth Fibonacci number using naive recursion",
            Self::FibonacciMemoized => "Calculate the nth Fibonacci number with a process-wide memo",
            Self::PrimeCount => "Count primes up to limit by trial division",
            Self::PrimeCountOptimized => "Count primes up to limit using the Sieve of Eratosthenes",
            Self::MatrixMultiplication => "Multiply two generated size x size matrices",
        }
    }

    /// Name of the single integer argument.
    pub fn argument(&self) -> &'static str {
        match self {
            Self::SumOfSquares | Self::SumOfSquaresOptimized => "n",
            Self::FibonacciRecursive | Self::FibonacciMemoized => "n",
            Self::PrimeCount | Self::PrimeCountOptimized => "limit",
            Self::MatrixMultiplication => "size",
        }
    }

    /// The other variant of the same problem, if there is one.
    pub fn counterpart(&self) -> Option<KernelId> {
        match self {
            Self::SumOfSquares => Some(Self::SumOfSquaresOptimized),
            Self::SumOfSquaresOptimized => Some(Self::SumOfSquares),
            Self::FibonacciRecursive => Some(Self::FibonacciMemoized),
            Self::FibonacciMemoized => Some(Self::FibonacciRecursive),
            Self::PrimeCount => Some(Self::PrimeCountOptimized),
            Self::PrimeCountOptimized => Some(Self::PrimeCount),
            Self::MatrixMultiplication => None,
        }
    }

    pub fn is_optimized(&self) -> bool {
        matches!(
            self,
            Self::SumOfSquaresOptimized | Self::FibonacciMemoized | Self::PrimeCountOptimized
        )
    }

    /// Drop state carried between invocations, so the next call runs cold.
    /// Only `fibonacci_memoized` keeps any: the process-wide memo.
    pub fn reset(&self) {
        if let Self::FibonacciMemoized = self {
            clear_shared_memo();
        }
    }

    /// Run the kernel once. `fibonacci_memoized` goes through the
    /// process-wide memo.
    pub fn invoke(&self, input: i64) -> KernelOutput {
        match self {
            Self::SumOfSquares => KernelOutput::Scalar(sum_of_squares(input)),
            Self::SumOfSquaresOptimized => KernelOutput::Scalar(sum_of_squares_optimized(input)),
            Self::FibonacciRecursive => KernelOutput::Scalar(fibonacci_recursive(input)),
            Self::FibonacciMemoized => KernelOutput::Scalar(fibonacci_memoized(input)),
            Self::PrimeCount => KernelOutput::Count(prime_count(input)),
            Self::PrimeCountOptimized => KernelOutput::Count(prime_count_optimized(input)),
            Self::MatrixMultiplication => KernelOutput::Matrix(matrix_multiplication(input)),
        }
    }
}

impl fmt::Display for KernelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KernelId {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KernelId::ALL
            .iter()
            .copied()
            .find(|id| id.name() == s)
            .ok_or_else(|| KernelError::UnknownKernel(s.to_string()))
    }
}

/// Registered kernels are themselves kernels with a uniform output type.
impl Kernel for KernelId {
    type Output = KernelOutput;

    fn name(&self) -> &'static str {
        KernelId::name(self)
    }

    fn compute(&mut self, input: i64) -> KernelOutput {
        self.invoke(input)
    }
}

/// Result of a registered kernel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KernelOutput {
    Scalar(i64),
    Count(u64),
    Matrix(SquareMatrix),
}

impl KernelOutput {
    /// One integer standing for the whole result: the value itself, or
    /// element [0][0] of a matrix (0 when the matrix is empty).
    pub fn sample(&self) -> i64 {
        match self {
            Self::Scalar(v) => *v,
            Self::Count(c) => *c as i64,
            Self::Matrix(m) => m.get(0, 0).unwrap_or(0),
        }
    }
}

impl fmt::Display for KernelOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(v) => write!(f, "{}", v),
            Self::Count(c) => write!(f, "{}", c),
            Self::Matrix(m) => write!(f, "{}x{} matrix, first element = {}", m.size(), m.size(), self.sample()),
        }
    }
}
