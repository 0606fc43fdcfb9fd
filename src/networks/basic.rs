use serde::{Deserialize, Serialize};
use tch::{Kind, Tensor, nn, nn::Module};

use crate::error::{Error, Result};

const HIDDEN_UNITS: i64 = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    #[default]
    Relu,
    Tanh,
    Sigmoid,
}

impl Activation {
    pub fn apply(self, xs: &Tensor) -> Tensor {
        match self {
            Activation::Relu => xs.relu(),
            Activation::Tanh => xs.tanh(),
            Activation::Sigmoid => xs.sigmoid(),
        }
    }
}

/// Fully connected trunk shared by the DQN- and Rainbow-style models.
///
/// Inputs are rescaled to `[-1, 1]` with `min_vals` / `max_vals` before the
/// two hidden layers. With `num_atoms` set the output layer has
/// `num_actions * num_atoms` units, otherwise `num_actions`.
#[derive(Debug)]
pub struct BasicDiscreteDomainNetwork {
    dense1: nn::Linear,
    dense2: nn::Linear,
    last_layer: nn::Linear,
    activation: Activation,
    min_vals: Tensor,
    max_vals: Tensor,
    num_actions: usize,
    num_atoms: Option<usize>,
}

impl BasicDiscreteDomainNetwork {
    pub fn new(
        path: &nn::Path,
        min_vals: &[f32],
        max_vals: &[f32],
        num_actions: usize,
        num_atoms: Option<usize>,
        activation: Activation,
    ) -> Result<Self> {
        if min_vals.len() != max_vals.len() {
            return Err(Error::ShapeMismatch {
                what: "max_vals",
                expected: min_vals.len(),
                actual: max_vals.len(),
            });
        }
        let input_dim = min_vals.len() as i64;
        let output_dim = (num_actions * num_atoms.unwrap_or(1)) as i64;

        let dense1 = nn::linear(path / "fully_connected", input_dim, HIDDEN_UNITS, Default::default());
        let dense2 = nn::linear(path / "fully_connected_1", HIDDEN_UNITS, HIDDEN_UNITS, Default::default());
        let last_layer = nn::linear(path / "fully_connected_2", HIDDEN_UNITS, output_dim, Default::default());

        let device = path.device();
        Ok(Self {
            dense1,
            dense2,
            last_layer,
            activation,
            min_vals: Tensor::from_slice(min_vals).to_device(device),
            max_vals: Tensor::from_slice(max_vals).to_device(device),
            num_actions,
            num_atoms,
        })
    }

    pub fn num_actions(&self) -> usize {
        self.num_actions
    }

    pub fn num_atoms(&self) -> Option<usize> {
        self.num_atoms
    }

    /// Casts, flattens and rescales a state batch into `[-1, 1]`.
    pub fn normalize(&self, state: &Tensor) -> Result<Tensor> {
        check_batched(state)?;
        let x = state.to_kind(Kind::Float).flatten(1, -1);
        let width = x.size()[1] as usize;
        let expected = self.min_vals.size()[0] as usize;
        if width != expected {
            return Err(Error::ShapeMismatch {
                what: "state",
                expected,
                actual: width,
            });
        }
        let x = (x - &self.min_vals) / (&self.max_vals - &self.min_vals);
        Ok(x * 2.0 - 1.0)
    }

    pub fn forward(&self, state: &Tensor) -> Result<Tensor> {
        let x = self.normalize(state)?;
        let x = self.activation.apply(&self.dense1.forward(&x));
        let x = self.activation.apply(&self.dense2.forward(&x));
        Ok(self.last_layer.forward(&x))
    }
}

/// States must carry a leading batch dimension.
pub(crate) fn check_batched(state: &Tensor) -> Result<()> {
    if state.dim() < 2 {
        return Err(Error::ShapeMismatch {
            what: "state rank",
            expected: 2,
            actual: state.dim(),
        });
    }
    Ok(())
}
