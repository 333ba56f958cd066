use std::time::Instant;

use crate::data::TrainingDataset;
use crate::math::RandomSource;
use crate::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::error::TrainError;
use crate::train::evaluate::{mean_cost, test_accuracy};
use crate::train::train_config::TrainConfig;
use crate::train::trainer::{train_mini_batch, TrainPhase};

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` with mini-batch SGD for `config.epochs` epochs and
/// returns the statistics of every completed epoch.
///
/// Each epoch shuffles the training partition of `dataset` with `rng`, splits
/// it into contiguous batches of `config.batch_size` and applies one update
/// per batch. Examples left over after the last full batch are skipped for
/// that epoch; a fresh shuffle decides which ones next time.
///
/// # Early termination
/// The loop stops after the current epoch if the `progress_tx` receiver has
/// been dropped.
///
/// # Errors
/// Fails before touching the network if `batch_size == 0` or the dataset's
/// dimensions do not match the network's input and output layers.
pub fn train_loop(
    network: &mut Network,
    dataset: &mut TrainingDataset,
    rng: &mut RandomSource,
    config: &TrainConfig,
) -> Result<Vec<EpochStats>, TrainError> {
    validate(network, dataset, config)?;

    let optimizer = config.optimizer();
    let n_total = dataset.n_train();
    let dropped = dataset.dropped_remainder(config.batch_size);
    if dropped == n_total && n_total > 0 {
        log::warn!(
            "batch size {} exceeds the {} training examples; no updates will be made",
            config.batch_size,
            n_total
        );
    }

    log::trace!("{:?}", TrainPhase::Idle);
    let mut history = Vec::with_capacity(config.epochs);

    for epoch in 1..=config.epochs {
        let t_start = Instant::now();

        // ── Shuffle, then one pass over the full batches ──────────────────
        log::trace!("{:?}: epoch {}", TrainPhase::Shuffling, epoch);
        dataset.shuffle_training(rng);

        log::trace!("{:?}: epoch {}", TrainPhase::Batching, epoch);
        let mut batches = 0;
        let mut total_cost = 0.0;
        for batch in dataset.mini_batches(config.batch_size) {
            total_cost += train_mini_batch(network, batch, &optimizer, n_total, config.cost)?;
            batches += 1;
        }
        let processed = batches * config.batch_size;
        let train_cost = if processed > 0 { total_cost / processed as f64 } else { 0.0 };

        // ── Evaluation on the untouched testing partition ────────────────
        let (test_cost, accuracy) = if config.evaluate && dataset.n_test() > 0 {
            let c = mean_cost(network, dataset.test_inputs(), dataset.test_labels(), config.cost)?;
            (Some(c), Some(test_accuracy(network, dataset)?))
        } else {
            (None, None)
        };

        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            batches,
            dropped,
            train_cost,
            test_cost,
            test_accuracy: accuracy,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };
        log_epoch(&stats, dataset.n_test());
        history.push(stats.clone());

        if let Some(ref tx) = config.progress_tx {
            // If the receiver has been dropped, stop training.
            if tx.send(stats).is_err() {
                log::debug!("progress receiver dropped; stopping after epoch {}", epoch);
                break;
            }
        }
    }

    log::trace!("{:?}", TrainPhase::Done);
    Ok(history)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn validate(network: &Network, dataset: &TrainingDataset, config: &TrainConfig) -> Result<(), TrainError> {
    if config.batch_size == 0 {
        return Err(TrainError::ZeroBatchSize);
    }
    if dataset.input_size() != network.input_size() {
        return Err(TrainError::InputSize { network: network.input_size(), dataset: dataset.input_size() });
    }
    if dataset.output_size() != network.output_size() {
        return Err(TrainError::OutputSize { network: network.output_size(), dataset: dataset.output_size() });
    }
    Ok(())
}

fn log_epoch(stats: &EpochStats, n_test: usize) {
    match stats.test_accuracy {
        Some(acc) => log::info!(
            "epoch {}/{}: {}/{} correct ({:.2}%), train cost {:.6}, {} ms",
            stats.epoch,
            stats.total_epochs,
            (acc * n_test as f64).round() as usize,
            n_test,
            acc * 100.0,
            stats.train_cost,
            stats.elapsed_ms
        ),
        None => log::info!(
            "epoch {}/{} complete: train cost {:.6}, {} ms",
            stats.epoch,
            stats.total_epochs,
            stats.train_cost,
            stats.elapsed_ms
        ),
    }
}
