use std::ops::{Add, Mul, Sub};

use crate::math::error::MatrixError;
use crate::math::random::RandomSource;

/// Tolerance used by [`Matrix::approx_eq`] callers that want an exact match
/// up to accumulated rounding on small values.
pub const DEFAULT_EPSILON: f64 = 1e-15;

/// Dense `rows x cols` matrix of `f64`, stored row by row.
///
/// Every constructor guarantees `rows >= 1`, `cols >= 1` and that each row
/// holds exactly `cols` values.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Vec<f64>>,
}

impl Matrix {
    /// Allocates a zero-filled matrix.
    ///
    /// # Panics
    /// Panics if either dimension is 0.
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        assert!(
            rows > 0 && cols > 0,
            "matrix dimensions must be at least 1x1, got {rows}x{cols}"
        );
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Fills a new matrix with independent N(0, 1) samples drawn row by row.
    ///
    /// # Panics
    /// Panics if either dimension is 0.
    pub fn gaussian(rows: usize, cols: usize, rng: &mut RandomSource) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);
        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = rng.gaussian();
            }
        }
        res
    }

    /// Builds a matrix from `rows * cols` values given in row-major order.
    ///
    /// ```
    /// use sigmoid_nn::Matrix;
    /// let m = Matrix::from_values(2, 2, &[1.0, 2.0, 3.0, 4.0]).unwrap();
    /// assert_eq!(m.get(1, 0), 3.0);
    /// ```
    pub fn from_values(rows: usize, cols: usize, values: &[f64]) -> Result<Matrix, MatrixError> {
        if rows == 0 || cols == 0 {
            return Err(MatrixError::EmptyShape { rows, cols });
        }
        if values.len() != rows * cols {
            return Err(MatrixError::LengthMismatch {
                rows,
                cols,
                expected: rows * cols,
                actual: values.len(),
            });
        }
        let data = values.chunks(cols).map(|row| row.to_vec()).collect();
        Ok(Matrix { rows, cols, data })
    }

    /// Wraps row data, checking that it is non-empty and rectangular.
    pub fn from_data(data: Vec<Vec<f64>>) -> Result<Matrix, MatrixError> {
        let rows = data.len();
        let cols = data.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(MatrixError::EmptyShape { rows, cols });
        }
        if let Some((row, r)) = data.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(MatrixError::Ragged {
                row,
                expected: cols,
                actual: r.len(),
            });
        }
        Ok(Matrix { rows, cols, data })
    }

    /// Builds an `n x 1` column vector, preserving order.
    ///
    /// # Panics
    /// Panics if `values` is empty.
    pub fn column(values: &[f64]) -> Matrix {
        assert!(!values.is_empty(), "column vector must hold at least one value");
        Matrix {
            rows: values.len(),
            cols: 1,
            data: values.iter().map(|&v| vec![v]).collect(),
        }
    }

    /// Flattens the matrix into a vector in row-major order. For a column
    /// vector this is the inverse of [`Matrix::column`].
    pub fn to_vec(&self) -> Vec<f64> {
        self.data.iter().flatten().copied().collect()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row][col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row][col] = value;
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row]
    }

    /// Overwrites every entry with `value`.
    pub fn fill(&mut self, value: f64) {
        for row in &mut self.data {
            row.fill(value);
        }
    }

    /// Multiplies every entry by `k` in place.
    pub fn scale(&mut self, k: f64) {
        for x in self.data.iter_mut().flatten() {
            *x *= k;
        }
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = self.data[j][i];
            }
        }

        res
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect(),
        }
    }

    /// Matrix product `self * rhs`; requires `self.cols == rhs.rows`.
    pub fn product(&self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        if self.cols != rhs.rows {
            return Err(mismatch("product", self, rhs));
        }

        let mut res = Matrix::zeros(self.rows, rhs.cols);

        for i in 0..res.rows {
            for j in 0..res.cols {
                let mut sum = 0.0;

                for k in 0..self.cols {
                    sum += self.data[i][k] * rhs.data[k][j];
                }

                res.data[i][j] = sum;
            }
        }

        Ok(res)
    }

    /// Element-wise (Hadamard) product of two same-shape matrices.
    pub fn hadamard(&self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        let mut res = self.clone();
        res.zip_assign("hadamard", rhs, |a, b| a * b)?;
        Ok(res)
    }

    /// In-place Hadamard product. `self` is untouched on mismatch.
    pub fn hadamard_assign(&mut self, rhs: &Matrix) -> Result<(), MatrixError> {
        self.zip_assign("hadamard", rhs, |a, b| a * b)
    }

    /// `self += rhs`. `self` is untouched on mismatch.
    pub fn add_assign(&mut self, rhs: &Matrix) -> Result<(), MatrixError> {
        self.zip_assign("add", rhs, |a, b| a + b)
    }

    /// `self -= rhs`. `self` is untouched on mismatch.
    pub fn sub_assign(&mut self, rhs: &Matrix) -> Result<(), MatrixError> {
        self.zip_assign("subtract", rhs, |a, b| a - b)
    }

    pub fn add(&self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        let mut res = self.clone();
        res.add_assign(rhs)?;
        Ok(res)
    }

    pub fn sub(&self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        let mut res = self.clone();
        res.sub_assign(rhs)?;
        Ok(res)
    }

    /// True when shapes match and every entry differs by at most `epsilon`.
    pub fn approx_eq(&self, other: &Matrix, epsilon: f64) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .flatten()
                .zip(other.data.iter().flatten())
                .all(|(a, b)| (a - b).abs() <= epsilon)
    }

    fn zip_assign<F>(&mut self, op: &'static str, rhs: &Matrix, f: F) -> Result<(), MatrixError>
    where
        F: Fn(f64, f64) -> f64,
    {
        if self.shape() != rhs.shape() {
            return Err(mismatch(op, self, rhs));
        }
        for (row_a, row_b) in self.data.iter_mut().zip(rhs.data.iter()) {
            for (a, &b) in row_a.iter_mut().zip(row_b.iter()) {
                *a = f(*a, b);
            }
        }
        Ok(())
    }
}

pub(crate) fn mismatch(op: &'static str, left: &Matrix, right: &Matrix) -> MatrixError {
    log::warn!(
        "{op}: incompatible shapes {}x{} and {}x{}",
        left.rows,
        left.cols,
        right.rows,
        right.cols
    );
    MatrixError::ShapeMismatch {
        op,
        left: left.shape(),
        right: right.shape(),
    }
}

// Operator forms panic on mismatch; use them only where shapes are already
// guaranteed by construction.

impl Add for &Matrix {
    type Output = Matrix;

    fn add(self, rhs: Self) -> Self::Output {
        Matrix::add(self, rhs).unwrap_or_else(|e| panic!("{e}"))
    }
}

impl Sub for &Matrix {
    type Output = Matrix;

    fn sub(self, rhs: Self) -> Self::Output {
        Matrix::sub(self, rhs).unwrap_or_else(|e| panic!("{e}"))
    }
}

impl Mul for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Self) -> Self::Output {
        self.product(rhs).unwrap_or_else(|e| panic!("{e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: usize, cols: usize, values: &[f64]) -> Matrix {
        Matrix::from_values(rows, cols, values).unwrap()
    }

    #[test]
    fn zeros_is_zero_filled() {
        let z = Matrix::zeros(2, 3);
        assert_eq!(z.shape(), (2, 3));
        assert!(z.to_vec().iter().all(|&x| x == 0.0));
    }

    #[test]
    #[should_panic]
    fn zeros_rejects_empty_shape() {
        Matrix::zeros(0, 3);
    }

    #[test]
    #[should_panic(expected = "at least 1x1")]
    fn gaussian_rejects_empty_shape() {
        Matrix::gaussian(2, 0, &mut RandomSource::new(1));
    }

    #[test]
    fn literal_construction_matches_manual_assignment() {
        let mut manual = Matrix::zeros(2, 2);
        manual.set(0, 0, 1.0);
        manual.set(0, 1, 2.0);
        manual.set(1, 0, 3.0);
        manual.set(1, 1, 4.0);
        assert!(manual.approx_eq(&m(2, 2, &[1.0, 2.0, 3.0, 4.0]), DEFAULT_EPSILON));
    }

    #[test]
    fn from_values_checks_length() {
        let err = Matrix::from_values(2, 2, &[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::LengthMismatch { rows: 2, cols: 2, expected: 4, actual: 3 }
        );
        assert!(matches!(
            Matrix::from_values(0, 2, &[]),
            Err(MatrixError::EmptyShape { .. })
        ));
    }

    #[test]
    fn from_data_rejects_ragged_rows() {
        let err = Matrix::from_data(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(err, MatrixError::Ragged { row: 1, expected: 2, actual: 1 });
    }

    #[test]
    fn product_fixture() {
        let a = m(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let b = m(2, 3, &[2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        let expected = m(2, 3, &[12.0, 15.0, 18.0, 26.0, 33.0, 40.0]);
        assert!(a.product(&b).unwrap().approx_eq(&expected, DEFAULT_EPSILON));
    }

    #[test]
    fn three_row_product() {
        let a = m(3, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let b = m(2, 3, &[2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        let expected = m(3, 3, &[12.0, 15.0, 18.0, 26.0, 33.0, 40.0, 40.0, 51.0, 62.0]);
        assert!((&a * &b).approx_eq(&expected, DEFAULT_EPSILON));
    }

    #[test]
    fn product_rejects_incompatible_shapes() {
        let a = Matrix::zeros(3, 2);
        let b = Matrix::zeros(3, 2);
        assert_eq!(
            a.product(&b),
            Err(MatrixError::ShapeMismatch { op: "product", left: (3, 2), right: (3, 2) })
        );
    }

    #[test]
    fn hadamard_products() {
        let a = m(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let squares = m(2, 2, &[1.0, 4.0, 9.0, 16.0]);
        assert!(a.hadamard(&a).unwrap().approx_eq(&squares, DEFAULT_EPSILON));
        assert!(a.hadamard(&Matrix::zeros(2, 3)).is_err());

        let mut b = a.clone();
        b.hadamard_assign(&a).unwrap();
        assert_eq!(b, squares);
    }

    #[test]
    fn add_and_subtract_in_place() {
        let a = m(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let mut b = a.clone();
        b.add_assign(&a).unwrap();
        assert!(b.approx_eq(&m(2, 2, &[2.0, 4.0, 6.0, 8.0]), DEFAULT_EPSILON));
        b.sub_assign(&a).unwrap();
        assert_eq!(b, a);
    }

    #[test]
    fn mismatched_add_leaves_target_untouched() {
        let mut a = m(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let before = a.clone();
        assert!(a.add_assign(&Matrix::zeros(1, 2)).is_err());
        assert!(a.sub_assign(&Matrix::zeros(2, 1)).is_err());
        assert_eq!(a, before);
    }

    #[test]
    fn fill_and_scale() {
        let mut a = Matrix::zeros(2, 2);
        a.fill(1.5);
        a.scale(2.0);
        assert_eq!(a.to_vec(), vec![3.0; 4]);
    }

    #[test]
    fn transpose_swaps_dimensions() {
        let a = m(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let t = a.transpose();
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.to_vec(), vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
        assert_eq!(t.transpose(), a);
    }

    #[test]
    fn approx_eq_respects_shape_and_tolerance() {
        let a = m(1, 2, &[1.0, 2.0]);
        assert!(a.approx_eq(&a, 0.0));
        assert!(!a.approx_eq(&m(2, 1, &[1.0, 2.0]), 1.0));
        assert!(a.approx_eq(&m(1, 2, &[1.0, 2.05]), 0.1));
        assert!(!a.approx_eq(&m(1, 2, &[1.0, 2.05]), 0.01));
    }

    #[test]
    fn column_round_trip() {
        let values = [1.1, 2.2, 3.3];
        let col = Matrix::column(&values);
        assert_eq!(col.shape(), (3, 1));
        assert!(col.approx_eq(&m(3, 1, &[1.1, 2.2, 3.3]), DEFAULT_EPSILON));
        assert_eq!(col.to_vec(), values.to_vec());
    }
}
