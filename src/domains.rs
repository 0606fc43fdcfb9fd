use std::f32::consts::PI;

use serde::{Deserialize, Serialize};
use tch::Kind;

pub const CARTPOLE_MIN_VALS: [f32; 4] = [-2.4, -5.0, -PI / 12.0, -PI * 2.0];
pub const CARTPOLE_MAX_VALS: [f32; 4] = [2.4, 5.0, PI / 12.0, PI * 2.0];
pub const ACROBOT_MIN_VALS: [f32; 6] = [-1.0, -1.0, -1.0, -1.0, -5.0, -5.0];
pub const ACROBOT_MAX_VALS: [f32; 6] = [1.0, 1.0, 1.0, 1.0, 5.0, 5.0];

// agent 侧的观测格式: 单帧, float64
pub const CARTPOLE_OBSERVATION_SHAPE: [i64; 2] = [4, 1];
pub const CARTPOLE_OBSERVATION_DTYPE: Kind = Kind::Double;
pub const CARTPOLE_STACK_SIZE: usize = 1;
pub const ACROBOT_OBSERVATION_SHAPE: [i64; 2] = [6, 1];
pub const ACROBOT_OBSERVATION_DTYPE: Kind = Kind::Double;
pub const ACROBOT_STACK_SIZE: usize = 1;

/// Classic-control domains with known observation bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    #[default]
    Cartpole,
    Acrobot,
}

impl Domain {
    pub fn min_vals(self) -> &'static [f32] {
        match self {
            Domain::Cartpole => &CARTPOLE_MIN_VALS,
            Domain::Acrobot => &ACROBOT_MIN_VALS,
        }
    }

    pub fn max_vals(self) -> &'static [f32] {
        match self {
            Domain::Cartpole => &CARTPOLE_MAX_VALS,
            Domain::Acrobot => &ACROBOT_MAX_VALS,
        }
    }

    pub fn state_dim(self) -> usize {
        self.min_vals().len()
    }

    pub fn observation_shape(self) -> [i64; 2] {
        match self {
            Domain::Cartpole => CARTPOLE_OBSERVATION_SHAPE,
            Domain::Acrobot => ACROBOT_OBSERVATION_SHAPE,
        }
    }

    pub fn observation_dtype(self) -> Kind {
        match self {
            Domain::Cartpole => CARTPOLE_OBSERVATION_DTYPE,
            Domain::Acrobot => ACROBOT_OBSERVATION_DTYPE,
        }
    }

    pub fn stack_size(self) -> usize {
        match self {
            Domain::Cartpole => CARTPOLE_STACK_SIZE,
            Domain::Acrobot => ACROBOT_STACK_SIZE,
        }
    }
}
