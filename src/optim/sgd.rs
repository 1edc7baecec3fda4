use crate::math::matrix::Matrix;

/// Plain online gradient step. The caller passes the layer delta already
/// multiplied by the activation derivative, so the update is a scaled outer
/// product.
#[derive(Debug, Clone, Copy)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// `weights += lr * delta · inputsᵀ`
    pub fn step(&self, weights: &mut Matrix, delta: &[f64], inputs: &[f64]) {
        weights.add_scaled_outer(self.learning_rate, delta, inputs);
    }
}
