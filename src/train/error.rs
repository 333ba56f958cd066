use thiserror::Error;

use crate::math::MatrixError;
use crate::network::NetworkError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrainError {
    #[error("mini-batch size must be at least 1")]
    ZeroBatchSize,

    #[error("dataset inputs have {dataset} values, network input layer has {network}")]
    InputSize { network: usize, dataset: usize },

    #[error("dataset labels have {dataset} values, network output layer has {network}")]
    OutputSize { network: usize, dataset: usize },

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Matrix(#[from] MatrixError),
}
