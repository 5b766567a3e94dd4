// src/kernels/fibonacci.rs

use std::sync::Mutex;
use lazy_static::lazy_static;
use log::debug;
use crate::kernels::Kernel;

/// nth Fibonacci number (F(0) = 0, F(1) = 1) by naive double recursion.
///
/// Runs in Θ(φⁿ) time on purpose: this is the unoptimized baseline.
/// Returns n itself for n <= 1, negative n included.
pub fn fibonacci_recursive(n: i64) -> i64 {
    if n <= 1 {
        return n;
    }
    fibonacci_recursive(n - 1).wrapping_add(fibonacci_recursive(n - 2))
}

/// Growing cache of Fibonacci values keyed by index.
///
/// `None` marks an index that has not been computed yet. Index 0 and 1 are
/// never stored; they are answered directly.
#[derive(Debug, Clone, Default)]
pub struct FibonacciMemo {
    cache: Vec<Option<i64>>,
    max_entries: Option<usize>,
}

impl FibonacciMemo {
    /// An empty, unbounded memo.
    pub fn new() -> Self {
        FibonacciMemo {
            cache: Vec::new(),
            max_entries: None,
        }
    }

    /// An empty memo that never grows past `max_entries` slots.
    ///
    /// Indices beyond the cap are still answered correctly, walking forward
    /// from the last cached pair without storing the intermediate values.
    pub fn with_max_entries(max_entries: usize) -> Self {
        FibonacciMemo {
            cache: Vec::new(),
            max_entries: Some(max_entries),
        }
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn max_entries(&self) -> Option<usize> {
        self.max_entries
    }

    /// Number of indices whose value is already known.
    pub fn computed(&self) -> usize {
        self.cache.iter().filter(|slot| slot.is_some()).count()
    }

    /// Change the cap, dropping any slots beyond it.
    pub fn set_max_entries(&mut self, max_entries: Option<usize>) {
        if let Some(cap) = max_entries {
            self.cache.truncate(cap);
        }
        self.max_entries = max_entries;
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// nth Fibonacci number, reusing and extending the cache.
    pub fn get(&mut self, n: i64) -> i64 {
        if n <= 1 {
            return n;
        }
        let n = n as usize;

        let limit = self.max_entries.map_or(n + 1, |cap| cap.min(n + 1));
        if self.cache.len() < limit {
            debug!("Growing Fibonacci memo from {} to {} slots", self.cache.len(), limit);
            self.cache.resize(limit, None);
        }

        if let Some(Some(value)) = self.cache.get(n) {
            return *value;
        }

        // Fill upward from the highest index already known. The recursive
        // definition stores values in this same ascending order.
        let start = self.highest_known_below(n);
        let (mut prev, mut curr) = (self.lookup(start - 1), self.lookup(start));
        for i in start + 1..=n {
            let next = prev.wrapping_add(curr);
            prev = curr;
            curr = next;
            if let Some(slot) = self.cache.get_mut(i) {
                *slot = Some(curr);
            }
        }
        curr
    }

    /// Largest index k in [1, n) such that both F(k-1) and F(k) are known.
    fn highest_known_below(&self, n: usize) -> usize {
        let top = n.min(self.cache.len());
        (2..top)
            .rev()
            .find(|&k| self.cache[k].is_some() && (k == 2 || self.cache[k - 1].is_some()))
            .unwrap_or(1)
    }

    fn lookup(&self, index: usize) -> i64 {
        if index <= 1 {
            return index as i64;
        }
        self.cache[index].unwrap_or_default()
    }
}

lazy_static! {
    static ref SHARED_MEMO: Mutex<FibonacciMemo> = Mutex::new(FibonacciMemo::new());
}

/// nth Fibonacci number through the process-wide memo.
///
/// The memo lives for the whole process and grows without bound unless
/// capped with `configure_shared_memo`. Calls from different threads are
/// serialized by a mutex.
pub fn fibonacci_memoized(n: i64) -> i64 {
    if n <= 1 {
        return n;
    }
    // Slots only ever hold finished values, so a poisoned memo is still valid.
    let mut memo = SHARED_MEMO.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    memo.get(n)
}

/// Cap (or uncap, with `None`) the process-wide memo.
pub fn configure_shared_memo(max_entries: Option<usize>) {
    let mut memo = SHARED_MEMO.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    debug!("Shared Fibonacci memo cap set to {:?}", max_entries);
    memo.set_max_entries(max_entries);
}

/// Drop every value held by the process-wide memo.
pub fn clear_shared_memo() {
    let mut memo = SHARED_MEMO.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    memo.clear();
}

/// Naive recursion, as a `Kernel`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FibonacciRecursive;

impl Kernel for FibonacciRecursive {
    type Output = i64;

    fn name(&self) -> &'static str {
        "fibonacci_recursive"
    }

    fn compute(&mut self, input: i64) -> i64 {
        fibonacci_recursive(input)
    }
}

/// Memoized Fibonacci that owns its cache.
#[derive(Debug, Clone, Default)]
pub struct FibonacciMemoized {
    pub memo: FibonacciMemo,
}

impl FibonacciMemoized {
    pub fn new() -> Self {
        FibonacciMemoized { memo: FibonacciMemo::new() }
    }
}

impl Kernel for FibonacciMemoized {
    type Output = i64;

    fn name(&self) -> &'static str {
        "fibonacci_memoized"
    }

    fn compute(&mut self, input: i64) -> i64 {
        self.memo.get(input)
    }
}
