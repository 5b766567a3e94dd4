// src/kernels/prime_count.rs

use bitvec::prelude::*;
use log::debug;
use num::integer::Roots;
use crate::kernels::Kernel;

/// Number of primes in [2, limit], testing each candidate by trial division
/// up to its integer square root.
///
/// Returns 0 for limit < 2.
pub fn prime_count(limit: i64) -> u64 {
    if limit < 2 {
        return 0;
    }

    let mut count = 0;
    for candidate in 2..=limit as u64 {
        if is_prime_by_trial_division(candidate) {
            count += 1;
        }
    }
    count
}

fn is_prime_by_trial_division(candidate: u64) -> bool {
    let bound = candidate.sqrt();
    (2..=bound).all(|divisor| candidate % divisor != 0)
}

/// Number of primes in [2, limit] using a sieve of Eratosthenes.
///
/// One bit per integer in [0, limit]. Each surviving i with i² <= limit
/// crosses off its multiples starting at i². Returns 0 for limit < 2.
pub fn prime_count_optimized(limit: i64) -> u64 {
    if limit < 2 {
        return 0;
    }
    let limit = limit as usize;
    debug!("Sieving {} bits for prime count", limit + 1);

    let mut is_prime = bitvec![1; limit + 1];
    is_prime.set(0, false);
    is_prime.set(1, false);

    let mut i = 2;
    while i * i <= limit {
        if is_prime[i] {
            for multiple in (i * i..=limit).step_by(i) {
                is_prime.set(multiple, false);
            }
        }
        i += 1;
    }

    is_prime[2..].count_ones() as u64
}

/// Trial division, as a `Kernel`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimeCountTrialDivision;

impl Kernel for PrimeCountTrialDivision {
    type Output = u64;

    fn name(&self) -> &'static str {
        "prime_count"
    }

    fn compute(&mut self, input: i64) -> u64 {
        prime_count(input)
    }
}

/// Sieve of Eratosthenes, as a `Kernel`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimeCountSieve;

impl Kernel for PrimeCountSieve {
    type Output = u64;

    fn name(&self) -> &'static str {
        "prime_count_optimized"
    }

    fn compute(&mut self, input: i64) -> u64 {
        prime_count_optimized(input)
    }
}
