pub mod epoch_stats;
pub mod error;
pub mod evaluate;
pub mod loop_fn;
pub mod train_config;
pub mod trainer;

pub use epoch_stats::EpochStats;
pub use error::TrainError;
pub use evaluate::{accuracy, argmax, mean_cost, test_accuracy};
pub use loop_fn::train_loop;
pub use train_config::TrainConfig;
pub use trainer::{train_mini_batch, TrainPhase};
