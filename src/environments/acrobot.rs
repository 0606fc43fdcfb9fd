//! Two-link underactuated pendulum (Sutton & Barto, "book" dynamics).
//!
//! The internal state is `[theta1, theta2, dtheta1, dtheta2]`; observations
//! are `[cos theta1, sin theta1, cos theta2, sin theta2, dtheta1, dtheta2]`.
//! The episode ends once the free end swings above the bar by one link length.

use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::environment::{Environment, Info, Metadata, Space, StepResult};
use crate::error::{Error, Result};

const DT: f64 = 0.2;

const LINK_LENGTH_1: f64 = 1.0;
const LINK_MASS_1: f64 = 1.0;
const LINK_MASS_2: f64 = 1.0;
const LINK_COM_POS_1: f64 = 0.5;
const LINK_COM_POS_2: f64 = 0.5;
const LINK_MOI: f64 = 1.0;
const GRAVITY: f64 = 9.8;

const MAX_VEL_1: f64 = 4.0 * PI;
const MAX_VEL_2: f64 = 9.0 * PI;

const AVAIL_TORQUE: [f64; 3] = [-1.0, 0.0, 1.0];

pub struct Acrobot {
    state: [f64; 4],
    rng: StdRng,
}

impl Default for Acrobot {
    fn default() -> Self {
        Self::new()
    }
}

impl Acrobot {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            state: [0.0; 4],
            rng,
        }
    }

    pub fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    fn observation(&self) -> Vec<f32> {
        let [theta1, theta2, dtheta1, dtheta2] = self.state;
        vec![
            theta1.cos() as f32,
            theta1.sin() as f32,
            theta2.cos() as f32,
            theta2.sin() as f32,
            dtheta1 as f32,
            dtheta2 as f32,
        ]
    }

    fn is_terminal(&self) -> bool {
        let [theta1, theta2, ..] = self.state;
        -theta1.cos() - (theta2 + theta1).cos() > 1.0
    }
}

/// Time derivative of `[theta1, theta2, dtheta1, dtheta2]` under `torque`.
fn dsdt(s: [f64; 4], torque: f64) -> [f64; 4] {
    let (m1, m2) = (LINK_MASS_1, LINK_MASS_2);
    let l1 = LINK_LENGTH_1;
    let (lc1, lc2) = (LINK_COM_POS_1, LINK_COM_POS_2);
    let (i1, i2) = (LINK_MOI, LINK_MOI);
    let g = GRAVITY;
    let [theta1, theta2, dtheta1, dtheta2] = s;

    let d1 = m1 * lc1.powi(2)
        + m2 * (l1.powi(2) + lc2.powi(2) + 2.0 * l1 * lc2 * theta2.cos())
        + i1
        + i2;
    let d2 = m2 * (lc2.powi(2) + l1 * lc2 * theta2.cos()) + i2;
    let phi2 = m2 * lc2 * g * (theta1 + theta2 - PI / 2.0).cos();
    let phi1 = -m2 * l1 * lc2 * dtheta2.powi(2) * theta2.sin()
        - 2.0 * m2 * l1 * lc2 * dtheta2 * dtheta1 * theta2.sin()
        + (m1 * lc1 + m2 * l1) * g * (theta1 - PI / 2.0).cos()
        + phi2;
    let ddtheta2 = (torque + d2 / d1 * phi1 - m2 * l1 * lc2 * dtheta1.powi(2) * theta2.sin() - phi2)
        / (m2 * lc2.powi(2) + i2 - d2.powi(2) / d1);
    let ddtheta1 = -(d2 * ddtheta2 + phi1) / d1;

    [dtheta1, dtheta2, ddtheta1, ddtheta2]
}

/// One classic fourth-order Runge-Kutta step of length `dt`.
fn rk4(s: [f64; 4], torque: f64, dt: f64) -> [f64; 4] {
    let offset = |base: [f64; 4], k: [f64; 4], h: f64| -> [f64; 4] {
        std::array::from_fn(|i| base[i] + h * k[i])
    };
    let k1 = dsdt(s, torque);
    let k2 = dsdt(offset(s, k1, dt / 2.0), torque);
    let k3 = dsdt(offset(s, k2, dt / 2.0), torque);
    let k4 = dsdt(offset(s, k3, dt), torque);
    std::array::from_fn(|i| s[i] + dt / 6.0 * (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i]))
}

/// Wraps `x` into `[lo, hi]` by whole periods.
fn wrap(mut x: f64, lo: f64, hi: f64) -> f64 {
    let diff = hi - lo;
    while x > hi {
        x -= diff;
    }
    while x < lo {
        x += diff;
    }
    x
}

impl Environment for Acrobot {
    type State = Vec<f32>;
    type Action = i64; // 0: -1 torque, 1: none, 2: +1 torque
    type Reward = f32;

    fn reset(&mut self) -> Self::State {
        for value in self.state.iter_mut() {
            *value = self.rng.random_range(-0.1..0.1);
        }
        self.observation()
    }

    fn step(&mut self, action: &Self::Action) -> Result<StepResult<Self::State, Self::Reward>> {
        let torque = usize::try_from(*action)
            .ok()
            .and_then(|index| AVAIL_TORQUE.get(index).copied())
            .ok_or(Error::InvalidAction {
                action: *action,
                num_actions: AVAIL_TORQUE.len(),
            })?;

        let mut next = rk4(self.state, torque, DT);
        next[0] = wrap(next[0], -PI, PI);
        next[1] = wrap(next[1], -PI, PI);
        next[2] = next[2].clamp(-MAX_VEL_1, MAX_VEL_1);
        next[3] = next[3].clamp(-MAX_VEL_2, MAX_VEL_2);
        self.state = next;

        let done = self.is_terminal();
        let reward = if done { 0.0 } else { -1.0 };
        tracing::trace!(state = ?self.state, reward, done, "acrobot step");

        Ok(StepResult {
            next_state: self.observation(),
            reward,
            done,
            info: Info::new(),
        })
    }

    fn current_state(&self) -> Self::State {
        self.observation()
    }

    fn observation_space(&self) -> Space {
        let high = vec![1.0, 1.0, 1.0, 1.0, MAX_VEL_1 as f32, MAX_VEL_2 as f32];
        Space::Box {
            low: high.iter().map(|v| -v).collect(),
            high,
        }
    }

    fn action_space(&self) -> Space {
        Space::Discrete(AVAIL_TORQUE.len())
    }

    fn reward_range(&self) -> (f32, f32) {
        (-1.0, 0.0)
    }

    fn metadata(&self) -> Metadata {
        Metadata {
            render_modes: vec!["human".to_string(), "rgb_array".to_string()],
            frames_per_second: Some(15),
        }
    }
}
