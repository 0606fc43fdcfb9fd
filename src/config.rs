use std::path::Path;

use serde::{Deserialize, Serialize};
use tch::nn;

use crate::domains::Domain;
use crate::environments::{ClassicControl, GymPreprocessing, create_gym_environment};
use crate::error::Result;
use crate::networks::models::DEFAULT_FOURIER_BASIS_ORDER;
use crate::networks::{self, Activation, DqnNetwork, FourierDqnNetwork, QNetwork, RainbowNetwork};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub environment: EnvironmentConfig,
    pub network: NetworkConfig,
    pub gridworld: GridWorldConfig,
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub name: Option<String>,
    pub version: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            name: None,
            version: "v0".to_string(),
        }
    }
}

impl EnvironmentConfig {
    pub fn create(&self) -> Result<GymPreprocessing<ClassicControl>> {
        create_gym_environment(self.name.as_deref(), &self.version)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkKind {
    #[default]
    Dqn,
    Rainbow,
    FourierDqn,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub kind: NetworkKind,
    pub domain: Domain,
    pub num_actions: usize,
    /// Rainbow only.
    pub num_atoms: usize,
    /// Rainbow only; the support spans `[-v_max, v_max]`.
    pub v_max: f64,
    pub fourier_basis_order: usize,
    pub activation: Activation,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            kind: NetworkKind::Dqn,
            domain: Domain::Cartpole,
            num_actions: 2,
            num_atoms: 51,
            v_max: 10.0,
            fourier_basis_order: DEFAULT_FOURIER_BASIS_ORDER,
            activation: Activation::Relu,
        }
    }
}

impl NetworkConfig {
    pub fn build(&self, vs: nn::VarStore) -> Result<Box<dyn QNetwork>> {
        let (min_vals, max_vals) = (self.domain.min_vals(), self.domain.max_vals());
        tracing::debug!(kind = ?self.kind, domain = ?self.domain, "building network");
        let network: Box<dyn QNetwork> = match self.kind {
            NetworkKind::Dqn => Box::new(DqnNetwork::new(
                vs,
                min_vals,
                max_vals,
                self.num_actions,
                self.activation,
            )?),
            NetworkKind::Rainbow => {
                let support = networks::support(-self.v_max, self.v_max, self.num_atoms, vs.device());
                Box::new(RainbowNetwork::new(
                    vs,
                    min_vals,
                    max_vals,
                    self.num_actions,
                    self.num_atoms,
                    support,
                    self.activation,
                )?)
            }
            NetworkKind::FourierDqn => Box::new(FourierDqnNetwork::new(
                vs,
                min_vals,
                Some(max_vals),
                self.num_actions,
                self.fourier_basis_order,
            )),
        };
        Ok(network)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridWorldConfig {
    /// Chance that the chosen action is replaced by a uniformly random one.
    pub random_action_prob: f64,
    /// Seeds the slip RNG; `None` draws from the OS.
    pub seed: Option<u64>,
}

impl Default for GridWorldConfig {
    fn default() -> Self {
        Self {
            random_action_prob: 0.1,
            seed: None,
        }
    }
}
