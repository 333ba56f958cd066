use crate::math::{Matrix, MatrixError};

/// Cross-entropy cost over independent sigmoid outputs.
pub struct CrossEntropyCost;

/// Keeps ln() finite when an output saturates at 0 or 1.
const EPS: f64 = 1e-12;

impl CrossEntropyCost {
    /// Scalar cost: -Σ (y·ln(a+ε) + (1-y)·ln(1-a+ε))
    pub fn cost(predicted: &[f64], expected: &[f64]) -> f64 {
        predicted.iter().zip(expected.iter())
            .map(|(a, y)| -(y * (a + EPS).ln() + (1.0 - y) * (1.0 - a + EPS).ln()))
            .sum()
    }

    /// Output error with respect to the pre-activation.
    ///
    /// The σ'(z) factor of the chain rule cancels against the cost's
    /// derivative, leaving δ = a - y. `z` is accepted only so both costs
    /// share one signature.
    pub fn delta(_z: &Matrix, a: &Matrix, y: &Matrix) -> Result<Matrix, MatrixError> {
        a.sub(y)
    }
}
