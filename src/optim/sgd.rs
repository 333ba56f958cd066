use crate::math::MatrixError;
use crate::network::{GradientSet, Network};

/// Plain SGD with optional L2 weight decay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    pub learning_rate: f64,
    /// L2 strength λ; 0 disables weight decay.
    pub lambda: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64, lambda: f64) -> Sgd {
        Sgd { learning_rate, lambda }
    }

    /// Factor `1 - η·λ/N_total` applied to every weight before the gradient
    /// step. Scaled by the full training set size so the decay per epoch
    /// does not depend on the batch size.
    pub fn decay_factor(&self, n_total: usize) -> f64 {
        1.0 - self.learning_rate * self.lambda / n_total as f64
    }

    /// Applies one update from gradients summed over `batch_len` examples:
    ///
    /// `W <- decay·W - (η/batch_len)·ΣdW`, `b <- b - (η/batch_len)·Σdb`
    ///
    /// `grads` must cover every layer with matching shapes; otherwise the
    /// network is left unchanged and an error is returned.
    pub fn step(
        &self,
        network: &mut Network,
        grads: &GradientSet,
        batch_len: usize,
        n_total: usize,
    ) -> Result<(), MatrixError> {
        grads.check_layers("sgd step", network.weights(), network.biases())?;

        let decay = self.decay_factor(n_total);
        let rate = self.learning_rate / batch_len as f64;

        let layer_grads = grads.weights.iter().zip(grads.biases.iter());
        for ((w, b), (gw, gb)) in network.parameters_mut().zip(layer_grads) {
            let mut dw = gw.clone();
            dw.scale(rate);
            let mut db = gb.clone();
            db.scale(rate);

            w.scale(decay);
            w.sub_assign(&dw)?;
            b.sub_assign(&db)?;
        }
        Ok(())
    }
}
