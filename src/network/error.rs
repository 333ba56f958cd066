use thiserror::Error;

use crate::math::MatrixError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    #[error("a network needs at least 2 layers, got {0}")]
    TooFewLayers(usize),

    #[error("layer {0} has zero width")]
    EmptyLayer(usize),

    #[error("expected {expected} weight and bias matrices, got {weights} and {biases}")]
    ParameterCount {
        expected: usize,
        weights: usize,
        biases: usize,
    },

    #[error("weights[{layer}] should be {expected:?}, got {actual:?}")]
    WeightShape {
        layer: usize,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("biases[{layer}] should be {expected:?}, got {actual:?}")]
    BiasShape {
        layer: usize,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("input has {actual} values, network expects {expected}")]
    InputSize { expected: usize, actual: usize },

    #[error("target has {actual} values, network outputs {expected}")]
    TargetSize { expected: usize, actual: usize },

    #[error("{inputs} inputs but {labels} labels")]
    ExampleCount { inputs: usize, labels: usize },

    #[error(transparent)]
    Matrix(#[from] MatrixError),
}
