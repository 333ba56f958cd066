use crate::math::matrix::mismatch;
use crate::math::{Matrix, MatrixError};
use crate::network::network::Network;

/// Per-layer cost gradients, shaped like a network's parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientSet {
    pub weights: Vec<Matrix>,
    pub biases: Vec<Matrix>,
}

impl GradientSet {
    /// Zero gradients matching every weight and bias of `network`.
    pub fn zeros_like(network: &Network) -> GradientSet {
        GradientSet {
            weights: network.weights().iter().map(|w| Matrix::zeros(w.rows(), w.cols())).collect(),
            biases: network.biases().iter().map(|b| Matrix::zeros(b.rows(), b.cols())).collect(),
        }
    }

    /// Number of layer transitions covered.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Checks that every layer of `self` has the shape of the matching
    /// parameter in `weights` and `biases`, and that the layer counts agree.
    pub(crate) fn check_layers(
        &self,
        op: &'static str,
        weights: &[Matrix],
        biases: &[Matrix],
    ) -> Result<(), MatrixError> {
        for (expected, actual) in [(weights.len(), self.weights.len()), (biases.len(), self.biases.len())] {
            if expected != actual {
                log::warn!("{op}: expected {expected} layers, got {actual}");
                return Err(MatrixError::LayerCount { op, expected, actual });
            }
        }
        let pairs = weights.iter().zip(&self.weights).chain(biases.iter().zip(&self.biases));
        for (param, grad) in pairs {
            if param.shape() != grad.shape() {
                return Err(mismatch(op, param, grad));
            }
        }
        Ok(())
    }

    /// Element-wise `self += other`. Summation is order-independent up to
    /// rounding, so batches may be reduced in any order.
    ///
    /// On a layer-count or shape mismatch nothing is added.
    pub fn accumulate(&mut self, other: &GradientSet) -> Result<(), MatrixError> {
        other.check_layers("accumulate", &self.weights, &self.biases)?;
        for (acc, g) in self.weights.iter_mut().zip(other.weights.iter()) {
            acc.add_assign(g)?;
        }
        for (acc, g) in self.biases.iter_mut().zip(other.biases.iter()) {
            acc.add_assign(g)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::RandomSource;

    #[test]
    fn zeros_like_matches_network_shapes() {
        let net = Network::new(&[3, 2, 4], &mut RandomSource::new(1)).unwrap();
        let g = GradientSet::zeros_like(&net);
        assert_eq!(g.len(), 2);
        for (gw, w) in g.weights.iter().zip(net.weights()) {
            assert_eq!(gw.shape(), w.shape());
            assert!(gw.to_vec().iter().all(|&x| x == 0.0));
        }
        for (gb, b) in g.biases.iter().zip(net.biases()) {
            assert_eq!(gb.shape(), b.shape());
        }
    }

    #[test]
    fn accumulate_sums_elementwise() {
        let net = Network::new(&[2, 1], &mut RandomSource::new(1)).unwrap();
        let mut acc = GradientSet::zeros_like(&net);
        let mut step = GradientSet::zeros_like(&net);
        step.weights[0].fill(1.5);
        step.biases[0].fill(-2.0);

        acc.accumulate(&step).unwrap();
        acc.accumulate(&step).unwrap();
        assert_eq!(acc.weights[0].to_vec(), vec![3.0, 3.0]);
        assert_eq!(acc.biases[0].to_vec(), vec![-4.0]);
    }

    #[test]
    fn accumulate_rejects_foreign_shapes() {
        let a = Network::new(&[2, 1], &mut RandomSource::new(1)).unwrap();
        let b = Network::new(&[3, 1], &mut RandomSource::new(1)).unwrap();
        let mut acc = GradientSet::zeros_like(&a);
        assert!(acc.accumulate(&GradientSet::zeros_like(&b)).is_err());
    }

    #[test]
    fn accumulate_rejects_different_depth() {
        let mut rng = RandomSource::new(1);
        let deep = Network::new(&[2, 3, 1], &mut rng).unwrap();
        let shallow = Network::new(&[2, 3], &mut rng).unwrap();

        let mut acc = GradientSet::zeros_like(&deep);
        acc.weights[0].fill(1.0);
        let before = acc.clone();
        let mut other = GradientSet::zeros_like(&shallow);
        other.weights[0].fill(2.0);

        assert_eq!(
            acc.accumulate(&other),
            Err(MatrixError::LayerCount { op: "accumulate", expected: 2, actual: 1 })
        );
        assert_eq!(acc, before);

        let mut acc = GradientSet::zeros_like(&shallow);
        assert_eq!(
            acc.accumulate(&GradientSet::zeros_like(&deep)),
            Err(MatrixError::LayerCount { op: "accumulate", expected: 1, actual: 2 })
        );
    }
}
