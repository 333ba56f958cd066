pub mod error;
pub mod matrix;
pub mod random;

pub use error::MatrixError;
pub use matrix::Matrix;
pub use random::RandomSource;
