use crate::activation::sigmoid::{sigmoid_matrix, sigmoid_prime_from_activation};
use crate::loss::CostFunction;
use crate::math::Matrix;
use crate::network::error::NetworkError;
use crate::network::gradients::GradientSet;
use crate::network::network::Network;

/// Everything the forward pass produced for one input.
///
/// `activations[0]` is the input column; `zs[l]` and `activations[l + 1]`
/// belong to layer transition `l`.
#[derive(Debug, Clone)]
pub struct ForwardTrace {
    pub zs: Vec<Matrix>,
    pub activations: Vec<Matrix>,
}

impl ForwardTrace {
    pub fn record(network: &Network, input: &[f64]) -> Result<ForwardTrace, NetworkError> {
        network.check_input(input)?;

        let transitions = network.weights().len();
        let mut zs = Vec::with_capacity(transitions);
        let mut activations = Vec::with_capacity(transitions + 1);
        activations.push(Matrix::column(input));

        for (w, b) in network.weights().iter().zip(network.biases()) {
            let mut z = w.product(&activations[activations.len() - 1])?;
            z.add_assign(b)?;
            activations.push(sigmoid_matrix(&z));
            zs.push(z);
        }

        Ok(ForwardTrace { zs, activations })
    }

    pub fn output(&self) -> &Matrix {
        &self.activations[self.activations.len() - 1]
    }
}

/// Gradient of `cost` for one labelled example with respect to every weight
/// and bias of `network`.
pub fn backpropagate(
    network: &Network,
    input: &[f64],
    target: &[f64],
    cost: CostFunction,
) -> Result<GradientSet, NetworkError> {
    backpropagate_with_output(network, input, target, cost).map(|(grads, _)| grads)
}

/// [`backpropagate`], also handing back the network's output for `input`.
pub(crate) fn backpropagate_with_output(
    network: &Network,
    input: &[f64],
    target: &[f64],
    cost: CostFunction,
) -> Result<(GradientSet, Matrix), NetworkError> {
    if target.len() != network.output_size() {
        return Err(NetworkError::TargetSize { expected: network.output_size(), actual: target.len() });
    }

    let mut trace = ForwardTrace::record(network, input)?;
    let y = Matrix::column(target);
    let last = network.weights().len() - 1;
    let mut grads = GradientSet::zeros_like(network);

    let mut delta = cost.delta(&trace.zs[last], trace.output(), &y)?;
    grads.weights[last] = delta.product(&trace.activations[last].transpose())?;
    grads.biases[last] = delta.clone();

    for l in (0..last).rev() {
        // σ'(z_l) from the stored activation a_l = σ(z_l).
        let sp = trace.activations[l + 1].map(sigmoid_prime_from_activation);
        delta = network.weights()[l + 1].transpose().product(&delta)?;
        delta.hadamard_assign(&sp)?;
        grads.weights[l] = delta.product(&trace.activations[l].transpose())?;
        grads.biases[l] = delta.clone();
    }

    let output = trace.activations.swap_remove(last + 1);
    Ok((grads, output))
}
