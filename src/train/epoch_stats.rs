use serde::{Serialize, Deserialize};

/// Per-epoch training statistics emitted by `train_loop`.
///
/// One value is returned per completed epoch and, when a `progress_tx`
/// channel is configured in `TrainConfig`, also sent on it as soon as the
/// epoch ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Mini-batches processed (one parameter update each).
    pub batches: usize,
    /// Training examples skipped because they did not fill a whole batch.
    pub dropped: usize,
    /// Mean cost over the training examples processed this epoch, measured
    /// before each example's batch update.
    pub train_cost: f64,
    /// Mean cost on the testing partition, if it was evaluated.
    pub test_cost: Option<f64>,
    /// Testing accuracy as a fraction in [0, 1], if it was evaluated.
    pub test_accuracy: Option<f64>,
    /// Wall-clock duration of this epoch in milliseconds.
    pub elapsed_ms: u64,
}
