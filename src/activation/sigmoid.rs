use std::f64::consts::E;

use crate::math::matrix::Matrix;

/// Logistic function `1 / (1 + e^-x)`.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + E.powf(-x))
}

/// Derivative of the sigmoid at the pre-activation `z`.
pub fn sigmoid_prime(z: f64) -> f64 {
    let s = sigmoid(z);
    s * (1.0 - s)
}

/// Derivative of the sigmoid expressed through its output `a = sigmoid(z)`,
/// for callers that kept only the activation.
pub fn sigmoid_prime_from_activation(a: f64) -> f64 {
    a * (1.0 - a)
}

pub(crate) fn sigmoid_matrix(z: &Matrix) -> Matrix {
    z.map(sigmoid)
}

pub(crate) fn sigmoid_prime_matrix(z: &Matrix) -> Matrix {
    z.map(sigmoid_prime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_at_zero_is_half() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert_eq!(sigmoid_prime(0.0), 0.25);
    }

    #[test]
    fn sigmoid_saturates() {
        assert!(sigmoid(40.0) > 1.0 - 1e-12);
        assert!(sigmoid(-40.0) < 1e-12);
        assert_eq!(sigmoid(f64::INFINITY), 1.0);
        assert_eq!(sigmoid(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn both_derivative_forms_agree() {
        for i in -50..=50 {
            let z = i as f64 * 0.2;
            let from_z = sigmoid_prime(z);
            let from_a = sigmoid_prime_from_activation(sigmoid(z));
            assert!((from_z - from_a).abs() < 1e-15, "z = {z}");
        }
    }

    #[test]
    fn derivative_matches_finite_difference() {
        let h = 1e-6;
        for &z in &[-3.0, -0.5, 0.0, 0.7, 2.5] {
            let numeric = (sigmoid(z + h) - sigmoid(z - h)) / (2.0 * h);
            assert!((numeric - sigmoid_prime(z)).abs() < 1e-8, "z = {z}");
        }
    }
}
