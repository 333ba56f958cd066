use crate::data::TrainingDataset;
use crate::loss::CostFunction;
use crate::network::{Network, NetworkError};

/// Index of the largest element; the first one wins ties. Returns 0 for an
/// empty slice or one that is all NaN; otherwise NaN entries never win.
pub fn argmax(v: &[f64]) -> usize {
    let mut best = 0;
    for (i, &x) in v.iter().enumerate().skip(1) {
        if x > v[best] || (v[best].is_nan() && !x.is_nan()) {
            best = i;
        }
    }
    best
}

/// Fraction of examples whose output argmax matches the label argmax, in
/// [0, 1]. An empty set scores 0.
///
/// # Errors
/// Fails if `inputs` and `labels` differ in length or an input does not fit
/// the network.
pub fn accuracy(
    network: &Network,
    inputs: &[Vec<f64>],
    labels: &[Vec<f64>],
) -> Result<f64, NetworkError> {
    let n = example_count(inputs, labels)?;
    if n == 0 {
        return Ok(0.0);
    }
    let mut correct = 0usize;
    for (input, label) in inputs.iter().zip(labels.iter()) {
        let output = network.predict(input)?;
        if argmax(&output) == argmax(label) {
            correct += 1;
        }
    }
    Ok(correct as f64 / n as f64)
}

/// [`accuracy`] over the testing partition of `dataset`.
pub fn test_accuracy(network: &Network, dataset: &TrainingDataset) -> Result<f64, NetworkError> {
    accuracy(network, dataset.test_inputs(), dataset.test_labels())
}

/// Mean cost over a set of examples without touching the network.
pub fn mean_cost(
    network: &Network,
    inputs: &[Vec<f64>],
    labels: &[Vec<f64>],
    cost: CostFunction,
) -> Result<f64, NetworkError> {
    let n = example_count(inputs, labels)?;
    if n == 0 {
        return Ok(0.0);
    }
    let mut total = 0.0;
    for (input, label) in inputs.iter().zip(labels.iter()) {
        total += cost.cost(&network.predict(input)?, label);
    }
    Ok(total / n as f64)
}

fn example_count(inputs: &[Vec<f64>], labels: &[Vec<f64>]) -> Result<usize, NetworkError> {
    if inputs.len() != labels.len() {
        return Err(NetworkError::ExampleCount { inputs: inputs.len(), labels: labels.len() });
    }
    Ok(inputs.len())
}
