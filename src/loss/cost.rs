use serde::{Deserialize, Serialize};

use crate::loss::cross_entropy::CrossEntropyCost;
use crate::loss::quadratic::QuadraticCost;
use crate::math::{Matrix, MatrixError};

/// Selects the cost minimised by training, and with it the output-layer
/// error used by backpropagation.
///
/// - `Quadratic`    — 0.5·||a − y||²; δ_L = (a − y) ⊙ σ'(z_L).
/// - `CrossEntropy` — sigmoid cross-entropy; δ_L = a − y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostFunction {
    #[default]
    Quadratic,
    CrossEntropy,
}

impl CostFunction {
    pub fn cost(&self, predicted: &[f64], expected: &[f64]) -> f64 {
        match self {
            CostFunction::Quadratic    => QuadraticCost::cost(predicted, expected),
            CostFunction::CrossEntropy => CrossEntropyCost::cost(predicted, expected),
        }
    }

    /// Output-layer error δ_L from the stored pre-activation `z`, the
    /// activation `a` and the target `y` (all column vectors).
    pub fn delta(&self, z: &Matrix, a: &Matrix, y: &Matrix) -> Result<Matrix, MatrixError> {
        match self {
            CostFunction::Quadratic    => QuadraticCost::delta(z, a, y),
            CostFunction::CrossEntropy => CrossEntropyCost::delta(z, a, y),
        }
    }
}
