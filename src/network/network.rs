use rand::Rng;

use crate::activation::{sigmoid, sigmoid_derivative_from_output};
use crate::error::Result;
use crate::math::matrix::Matrix;
use crate::network::spec::NetworkSpec;
use crate::optim::sgd::Sgd;

/// Fully connected network with one sigmoid hidden layer and a sigmoid
/// output layer, trained online one record at a time.
#[derive(Debug, Clone)]
pub struct Network {
    spec: NetworkSpec,
    /// `hidden_size × input_size`
    w_hidden: Matrix,
    /// `output_size × hidden_size`
    w_output: Matrix,
    optimizer: Sgd,
}

/// Activations retained from a forward pass for the backward pass.
struct Activations {
    hidden: Vec<f64>,
    outputs: Vec<f64>,
}

impl Network {
    /// Builds a network with weights drawn from N(0, n^-0.5), where `n` is
    /// the size of the layer the weights feed into.
    pub fn new(spec: NetworkSpec) -> Result<Network> {
        Network::with_rng(spec, &mut rand::thread_rng())
    }

    /// Same as [`Network::new`] with a caller-supplied RNG, so tests can
    /// pin the initial weights.
    pub fn with_rng<R: Rng + ?Sized>(spec: NetworkSpec, rng: &mut R) -> Result<Network> {
        spec.validate()?;

        let w_hidden = Matrix::normal(
            spec.hidden_size,
            spec.input_size,
            (spec.hidden_size as f64).powf(-0.5),
            rng,
        );
        let w_output = Matrix::normal(
            spec.output_size,
            spec.hidden_size,
            (spec.output_size as f64).powf(-0.5),
            rng,
        );

        Ok(Network {
            spec,
            w_hidden,
            w_output,
            optimizer: Sgd::new(spec.learning_rate),
        })
    }

    pub fn spec(&self) -> &NetworkSpec {
        &self.spec
    }

    pub fn input_size(&self) -> usize {
        self.spec.input_size
    }

    pub fn output_size(&self) -> usize {
        self.spec.output_size
    }

    pub fn hidden_weights(&self) -> &Matrix {
        &self.w_hidden
    }

    pub fn output_weights(&self) -> &Matrix {
        &self.w_output
    }

    /// Inference only; weights are not touched.
    pub fn forward(&self, inputs: &[f64]) -> Vec<f64> {
        self.activate(inputs).outputs
    }

    /// One online gradient step on a single `(inputs, targets)` pair.
    ///
    /// The hidden error is back-propagated through the output weights as
    /// they were *before* this step updates them.
    pub fn train_one(&mut self, inputs: &[f64], targets: &[f64]) {
        assert_eq!(targets.len(), self.spec.output_size, "target length must equal output_size");

        let Activations { hidden, outputs } = self.activate(inputs);

        let output_errors: Vec<f64> = targets.iter().zip(&outputs).map(|(t, o)| t - o).collect();
        let hidden_errors = self.w_output.transpose_mul_vec(&output_errors);

        let output_delta = layer_delta(&output_errors, &outputs);
        let hidden_delta = layer_delta(&hidden_errors, &hidden);

        self.optimizer.step(&mut self.w_output, &output_delta, &hidden);
        self.optimizer.step(&mut self.w_hidden, &hidden_delta, inputs);
    }

    fn activate(&self, inputs: &[f64]) -> Activations {
        let hidden: Vec<f64> = self.w_hidden.mul_vec(inputs).into_iter().map(sigmoid).collect();
        let outputs: Vec<f64> = self.w_output.mul_vec(&hidden).into_iter().map(sigmoid).collect();
        Activations { hidden, outputs }
    }
}

/// `error ⊙ y ⊙ (1 - y)`
fn layer_delta(errors: &[f64], activations: &[f64]) -> Vec<f64> {
    errors
        .iter()
        .zip(activations)
        .map(|(e, &y)| e * sigmoid_derivative_from_output(y))
        .collect()
}
