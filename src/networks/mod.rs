pub mod basic;
pub mod fourier;
pub mod models;

use tch::{Device, Kind, Tensor};

use crate::error::Result;

pub use basic::{Activation, BasicDiscreteDomainNetwork};
pub use fourier::FourierBasis;
pub use models::{DqnNetwork, FourierDqnNetwork, RainbowNetwork};

#[derive(Debug)]
pub enum NetworkOutput {
    /// `[batch, num_actions]`
    Dqn { q_values: Tensor },
    /// `q_values` is `[batch, num_actions]`; `logits` and `probabilities` are
    /// `[batch, num_actions, num_atoms]`.
    Rainbow {
        q_values: Tensor,
        logits: Tensor,
        probabilities: Tensor,
    },
}

impl NetworkOutput {
    pub fn q_values(&self) -> &Tensor {
        match self {
            NetworkOutput::Dqn { q_values } | NetworkOutput::Rainbow { q_values, .. } => q_values,
        }
    }

    pub fn into_q_values(self) -> Tensor {
        match self {
            NetworkOutput::Dqn { q_values } | NetworkOutput::Rainbow { q_values, .. } => q_values,
        }
    }

    pub fn probabilities(&self) -> Option<&Tensor> {
        match self {
            NetworkOutput::Dqn { .. } => None,
            NetworkOutput::Rainbow { probabilities, .. } => Some(probabilities),
        }
    }
}

/// A value network over batched states (`[batch, state_dim]`).
pub trait QNetwork {
    /// Takes `&mut self` because some models finish building on first call.
    /// A state without a batch dimension is a `ShapeMismatch`.
    fn call(&mut self, state: &Tensor) -> Result<NetworkOutput>;

    fn num_actions(&self) -> usize;

    fn var_store(&self) -> &tch::nn::VarStore;

    fn device(&self) -> Device {
        self.var_store().device()
    }
}

/// Evenly spaced support of `num_atoms` values in `[v_min, v_max]`.
pub fn support(v_min: f64, v_max: f64, num_atoms: usize, device: Device) -> Tensor {
    Tensor::linspace(v_min, v_max, num_atoms as i64, (Kind::Float, device))
}
