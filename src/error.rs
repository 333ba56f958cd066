use thiserror::Error;

use crate::data::DatasetError;
use crate::math::MatrixError;
use crate::network::NetworkError;
use crate::train::TrainError;

/// Result type for this library
pub type Result<T> = std::result::Result<T, Error>;

/// Any failure raised by the library, for callers that do not need to
/// tell the layers apart.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Matrix(#[from] MatrixError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Train(#[from] TrainError),
}
