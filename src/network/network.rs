use crate::activation::sigmoid::sigmoid_matrix;
use crate::math::{Matrix, RandomSource};
use crate::network::error::NetworkError;

/// Fully-connected sigmoid network.
///
/// `weights[i]` maps layer `i` to layer `i + 1` and has shape
/// `sizes[i + 1] x sizes[i]`; `biases[i]` is the matching
/// `sizes[i + 1] x 1` column.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    sizes: Vec<usize>,
    weights: Vec<Matrix>,
    biases: Vec<Matrix>,
}

impl Network {
    /// Builds a network with every weight and bias drawn from N(0, 1).
    pub fn new(sizes: &[usize], rng: &mut RandomSource) -> Result<Network, NetworkError> {
        check_sizes(sizes)?;

        let mut weights = Vec::with_capacity(sizes.len() - 1);
        let mut biases = Vec::with_capacity(sizes.len() - 1);
        for pair in sizes.windows(2) {
            weights.push(Matrix::gaussian(pair[1], pair[0], rng));
            biases.push(Matrix::gaussian(pair[1], 1, rng));
        }

        log::debug!("created network {:?}", sizes);
        Ok(Network { sizes: sizes.to_vec(), weights, biases })
    }

    /// Builds a network from explicit parameters, checking that every shape
    /// chains with `sizes`.
    pub fn from_parameters(
        sizes: &[usize],
        weights: Vec<Matrix>,
        biases: Vec<Matrix>,
    ) -> Result<Network, NetworkError> {
        check_sizes(sizes)?;

        let expected = sizes.len() - 1;
        if weights.len() != expected || biases.len() != expected {
            return Err(NetworkError::ParameterCount {
                expected,
                weights: weights.len(),
                biases: biases.len(),
            });
        }
        for (layer, pair) in sizes.windows(2).enumerate() {
            let w = (pair[1], pair[0]);
            if weights[layer].shape() != w {
                return Err(NetworkError::WeightShape { layer, expected: w, actual: weights[layer].shape() });
            }
            let b = (pair[1], 1);
            if biases[layer].shape() != b {
                return Err(NetworkError::BiasShape { layer, expected: b, actual: biases[layer].shape() });
            }
        }

        Ok(Network { sizes: sizes.to_vec(), weights, biases })
    }

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    pub fn weights(&self) -> &[Matrix] {
        &self.weights
    }

    pub fn biases(&self) -> &[Matrix] {
        &self.biases
    }

    /// Number of layers, counting the input layer.
    pub fn num_layers(&self) -> usize {
        self.sizes.len()
    }

    pub fn input_size(&self) -> usize {
        self.sizes[0]
    }

    pub fn output_size(&self) -> usize {
        self.sizes[self.sizes.len() - 1]
    }

    /// Forward pass: `a <- sigmoid(W·a + b)` for each layer. Returns the
    /// output activations as a column vector.
    pub fn feedforward(&self, input: &[f64]) -> Result<Matrix, NetworkError> {
        self.check_input(input)?;

        let mut a = Matrix::column(input);
        for (w, b) in self.weights.iter().zip(self.biases.iter()) {
            let mut z = w.product(&a)?;
            z.add_assign(b)?;
            a = sigmoid_matrix(&z);
        }
        Ok(a)
    }

    /// [`Network::feedforward`] flattened into a plain vector.
    pub fn predict(&self, input: &[f64]) -> Result<Vec<f64>, NetworkError> {
        Ok(self.feedforward(input)?.to_vec())
    }

    pub(crate) fn check_input(&self, input: &[f64]) -> Result<(), NetworkError> {
        if input.len() != self.input_size() {
            return Err(NetworkError::InputSize { expected: self.input_size(), actual: input.len() });
        }
        Ok(())
    }

    /// Weight/bias pairs for in-place updates. Shapes must be preserved.
    pub(crate) fn parameters_mut(&mut self) -> impl Iterator<Item = (&mut Matrix, &mut Matrix)> {
        self.weights.iter_mut().zip(self.biases.iter_mut())
    }
}

fn check_sizes(sizes: &[usize]) -> Result<(), NetworkError> {
    if sizes.len() < 2 {
        return Err(NetworkError::TooFewLayers(sizes.len()));
    }
    if let Some(i) = sizes.iter().position(|&s| s == 0) {
        return Err(NetworkError::EmptyLayer(i));
    }
    Ok(())
}
