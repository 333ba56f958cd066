use crate::data::MiniBatch;
use crate::loss::CostFunction;
use crate::network::backprop::backpropagate_with_output;
use crate::network::{GradientSet, Network};
use crate::optim::Sgd;
use crate::train::error::TrainError;

/// Stages of the training loop, reported through `log::trace!`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainPhase {
    Idle,
    Shuffling,
    Batching,
    Accumulating,
    Updating,
    Done,
}

/// Runs backpropagation over every example of `batch`, sums the gradients
/// and applies one `optimizer` step. Returns the summed cost of the batch as
/// seen before the update.
///
/// `n_total` is the full training set size used for weight decay.
pub fn train_mini_batch(
    network: &mut Network,
    batch: MiniBatch<'_>,
    optimizer: &Sgd,
    n_total: usize,
    cost: CostFunction,
) -> Result<f64, TrainError> {
    if batch.is_empty() {
        return Ok(0.0);
    }

    log::trace!("{:?}: batch at offset {}", TrainPhase::Accumulating, batch.offset);
    let mut acc = GradientSet::zeros_like(network);
    let mut batch_cost = 0.0;
    for (input, target) in batch.iter() {
        let (grads, output) = backpropagate_with_output(network, input, target, cost)?;
        batch_cost += cost.cost(&output.to_vec(), target);
        acc.accumulate(&grads)?;
    }

    log::trace!("{:?}: {} examples", TrainPhase::Updating, batch.len());
    optimizer.step(network, &acc, batch.len(), n_total)?;
    Ok(batch_cost)
}
