use std::sync::mpsc;

use crate::loss::CostFunction;
use crate::optim::Sgd;
use crate::train::epoch_stats::EpochStats;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`        — total number of full passes over the training data
/// - `batch_size`    — examples per mini-batch; use `1` for online SGD
/// - `learning_rate` — η
/// - `lambda`        — L2 regularization strength λ; `0.0` disables it
/// - `cost`          — cost function, which fixes the output-layer error
/// - `evaluate`      — score the testing partition after every epoch
/// - `progress_tx`   — optional channel sender; one `EpochStats` is sent per
///                     completed epoch.  If the receiver is dropped the loop
///                     terminates early.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f64,
    pub lambda: f64,
    pub cost: CostFunction,
    pub evaluate: bool,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
}

impl TrainConfig {
    /// Unregularized quadratic-cost training with per-epoch evaluation and
    /// no progress channel.
    pub fn new(epochs: usize, batch_size: usize, learning_rate: f64) -> Self {
        TrainConfig {
            epochs,
            batch_size,
            learning_rate,
            lambda: 0.0,
            cost: CostFunction::Quadratic,
            evaluate: true,
            progress_tx: None,
        }
    }

    pub fn with_lambda(mut self, lambda: f64) -> Self {
        self.lambda = lambda;
        self
    }

    pub fn with_cost(mut self, cost: CostFunction) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_evaluation(mut self, evaluate: bool) -> Self {
        self.evaluate = evaluate;
        self
    }

    pub fn with_progress(mut self, tx: mpsc::Sender<EpochStats>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn optimizer(&self) -> Sgd {
        Sgd::new(self.learning_rate, self.lambda)
    }
}
