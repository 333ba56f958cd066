pub mod dataset;
pub mod error;
pub mod idx;

pub use dataset::{one_hot, MiniBatch, TrainingDataset};
pub use error::DatasetError;
pub use idx::load_mnist;
