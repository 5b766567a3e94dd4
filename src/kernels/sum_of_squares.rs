// src/kernels/sum_of_squares.rs

use log::trace;
use crate::kernels::Kernel;

/// Sum of i² for i in [1, n], one term at a time.
///
/// Returns 0 for n <= 0 (the empty sum).
pub fn sum_of_squares(n: i64) -> i64 {
    let mut total: i64 = 0;
    for i in 1..=n {
        total = total.wrapping_add(i.wrapping_mul(i));
    }
    total
}

/// Sum of i² for i in [1, n] via n(n+1)(2n+1)/6.
///
/// The factors 2 and 3 are divided out of the three terms before they are
/// multiplied, so the division is exact and the wrapping product matches
/// `sum_of_squares` bit for bit, including inputs whose sum overflows.
pub fn sum_of_squares_optimized(n: i64) -> i64 {
    if n <= 0 {
        trace!("sum_of_squares_optimized: n = {} is an empty sum", n);
        return 0;
    }

    let n = n as i128;
    let mut terms = [n, n + 1, 2 * n + 1];

    // Exactly one of n, n+1 is even.
    if terms[0] % 2 == 0 {
        terms[0] /= 2;
    } else {
        terms[1] /= 2;
    }

    // Exactly one of n, n+1, 2n+1 is a multiple of 3.
    if let Some(term) = terms.iter_mut().find(|t| **t % 3 == 0) {
        *term /= 3;
    }

    // Truncating each term to 64 bits keeps it congruent mod 2^64.
    terms.iter().fold(1i64, |acc, &t| acc.wrapping_mul(t as i64))
}

/// Direct summation, as a `Kernel`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SumOfSquares;

impl Kernel for SumOfSquares {
    type Output = i64;

    fn name(&self) -> &'static str {
        "sum_of_squares"
    }

    fn compute(&mut self, input: i64) -> i64 {
        sum_of_squares(input)
    }
}

/// Closed-form summation, as a `Kernel`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SumOfSquaresFormula;

impl Kernel for SumOfSquaresFormula {
    type Output = i64;

    fn name(&self) -> &'static str {
        "sum_of_squares_optimized"
    }

    fn compute(&mut self, input: i64) -> i64 {
        sum_of_squares_optimized(input)
    }
}
