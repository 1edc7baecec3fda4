use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Shape and learning rate of a one-hidden-layer network.
///
/// Fields:
/// - `input_size`: features per record (784 for 28×28 digits)
/// - `hidden_size`: nodes in the single hidden layer
/// - `output_size`: number of classes
/// - `learning_rate`: step size applied on every `train_one` call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkSpec {
    pub input_size: usize,
    pub hidden_size: usize,
    pub output_size: usize,
    pub learning_rate: f64,
}

impl Default for NetworkSpec {
    fn default() -> Self {
        NetworkSpec {
            input_size: 784,
            hidden_size: 100,
            output_size: 10,
            learning_rate: 0.2,
        }
    }
}

impl NetworkSpec {
    pub fn new(input_size: usize, hidden_size: usize, output_size: usize, learning_rate: f64) -> Self {
        NetworkSpec { input_size, hidden_size, output_size, learning_rate }
    }

    pub fn validate(&self) -> Result<()> {
        if self.input_size == 0 || self.hidden_size == 0 || self.output_size == 0 {
            return Err(Error::InvalidDimensions {
                input: self.input_size,
                hidden: self.hidden_size,
                output: self.output_size,
            });
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(Error::InvalidLearningRate(self.learning_rate));
        }
        Ok(())
    }
}
