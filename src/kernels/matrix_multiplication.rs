// src/kernels/matrix_multiplication.rs

use std::fmt;
use log::debug;
use crate::kernels::Kernel;

/// Square, row-major matrix of i64 entries.
///
/// Every row has exactly `size` entries; there is no way to build a ragged one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SquareMatrix {
    rows: Vec<Vec<i64>>,
}

impl SquareMatrix {
    /// `size` x `size` matrix of zeros.
    pub fn zeros(size: usize) -> Self {
        SquareMatrix {
            rows: vec![vec![0; size]; size],
        }
    }

    /// Matrix whose entry (i, j) is `f(i, j)`, zero-based.
    pub fn from_fn<F>(size: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> i64,
    {
        let rows = (0..size)
            .map(|i| (0..size).map(|j| f(i, j)).collect())
            .collect();
        SquareMatrix { rows }
    }

    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<i64> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn rows(&self) -> &[Vec<i64>] {
        &self.rows
    }

    /// Standard product, accumulated in i-k-j order so the inner loop walks
    /// both `other` and the result along a row.
    fn multiply(&self, other: &SquareMatrix) -> SquareMatrix {
        let size = self.size();
        let mut result = SquareMatrix::zeros(size);

        for i in 0..size {
            let a_row = &self.rows[i];
            let out_row = &mut result.rows[i];
            for (k, &a_ik) in a_row.iter().enumerate() {
                let b_row = &other.rows[k];
                for (out, &b_kj) in out_row.iter_mut().zip(b_row) {
                    *out = out.wrapping_add(a_ik.wrapping_mul(b_kj));
                }
            }
        }

        result
    }
}

impl PartialEq<Vec<Vec<i64>>> for SquareMatrix {
    fn eq(&self, other: &Vec<Vec<i64>>) -> bool {
        &self.rows == other
    }
}

impl fmt::Display for SquareMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            writeln!(f, "[{}]", cells.join(", "))?;
        }
        Ok(())
    }
}

/// A[i][j] = i + j
pub fn left_operand(size: usize) -> SquareMatrix {
    SquareMatrix::from_fn(size, |i, j| (i as i64).wrapping_add(j as i64))
}

/// B[i][j] = i * j + 1
pub fn right_operand(size: usize) -> SquareMatrix {
    SquareMatrix::from_fn(size, |i, j| (i as i64).wrapping_mul(j as i64).wrapping_add(1))
}

/// Builds A and B of the given size and returns A·B.
///
/// Returns an empty matrix (no rows) for size <= 0.
pub fn matrix_multiplication(size: i64) -> SquareMatrix {
    if size <= 0 {
        return SquareMatrix::default();
    }
    let size = size as usize;
    debug!("Multiplying two {}x{} matrices", size, size);

    let a = left_operand(size);
    let b = right_operand(size);
    a.multiply(&b)
}

/// Triple-loop product of the generated operands, as a `Kernel`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatrixMultiplication;

impl Kernel for MatrixMultiplication {
    type Output = SquareMatrix;

    fn name(&self) -> &'static str {
        "matrix_multiplication"
    }

    fn compute(&mut self, input: i64) -> SquareMatrix {
        matrix_multiplication(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Textbook i-j-k product, used only to check the i-k-j loop.
    fn naive_product(a: &SquareMatrix, b: &SquareMatrix) -> Vec<Vec<i64>> {
        let n = a.size();
        let mut out = vec![vec![0i64; n]; n];
        for i in 0..n {
            for j in 0..n {
                for k in 0..n {
                    out[i][j] += a.rows()[i][k] * b.rows()[k][j];
                }
            }
        }
        out
    }

    #[test]
    fn test_size_two() {
        // A = [[0, 1], [1, 2]], B = [[1, 1], [1, 2]]
        assert_eq!(matrix_multiplication(2), vec![vec![1, 2], vec![3, 5]]);
    }

    #[test]
    fn test_size_one() {
        // A = [[0]], B = [[1]]
        assert_eq!(matrix_multiplication(1), vec![vec![0]]);
    }

    #[test]
    fn test_non_positive_size_is_empty() {
        for size in [0, -1, i64::MIN] {
            let m = matrix_multiplication(size);
            assert!(m.is_empty());
            assert_eq!(m.size(), 0);
            assert!(m.rows().is_empty());
        }
    }

    #[test]
    fn test_result_is_square() {
        for size in 1..=12 {
            let m = matrix_multiplication(size);
            assert_eq!(m.size(), size as usize);
            assert!(m.rows().iter().all(|row| row.len() == size as usize));
        }
    }

    #[test]
    fn test_loop_order_matches_textbook_product() {
        let size = 17;
        let expected = naive_product(&left_operand(size), &right_operand(size));
        assert_eq!(matrix_multiplication(size as i64), expected);
    }

    #[test]
    fn test_operands() {
        assert_eq!(left_operand(2), vec![vec![0, 1], vec![1, 2]]);
        assert_eq!(right_operand(2), vec![vec![1, 1], vec![1, 2]]);
    }

    #[test]
    fn test_first_element_at_size_100() {
        // C[0][0] = sum over k of k * 1
        let m = matrix_multiplication(100);
        assert_eq!(m.get(0, 0), Some(4950));
        assert_eq!(m.get(100, 0), None);
    }

    #[test]
    fn test_display() {
        let m = matrix_multiplication(2);
        assert_eq!(m.to_string(), "[1, 2]\n[3, 5]\n");
    }
}
