pub mod activation;
pub mod data;
pub mod error;
pub mod loss;
pub mod math;
pub mod network;
pub mod optim;
pub mod train;

// Convenience re-exports
pub use activation::sigmoid::{sigmoid, sigmoid_prime};
pub use data::{MiniBatch, TrainingDataset};
pub use error::{Error, Result};
pub use loss::CostFunction;
pub use math::{Matrix, MatrixError, RandomSource};
pub use network::{backpropagate, GradientSet, Network};
pub use optim::Sgd;
pub use train::{accuracy, test_accuracy, train_loop, EpochStats, TrainConfig};
