use crate::activation::sigmoid::sigmoid_prime_matrix;
use crate::math::{Matrix, MatrixError};

pub struct QuadraticCost;

impl QuadraticCost {
    /// Scalar cost: 0.5 * ||a - y||²
    pub fn cost(predicted: &[f64], expected: &[f64]) -> f64 {
        0.5 * predicted.iter().zip(expected.iter())
            .map(|(a, y)| (a - y).powi(2))
            .sum::<f64>()
    }

    /// Output error δ = (a - y) ⊙ σ'(z)
    pub fn delta(z: &Matrix, a: &Matrix, y: &Matrix) -> Result<Matrix, MatrixError> {
        let mut delta = a.sub(y)?;
        delta.hadamard_assign(&sigmoid_prime_matrix(z))?;
        Ok(delta)
    }
}
