use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::environment::{Environment, Info, Metadata, Space, StepResult};
use crate::error::{Error, Result};

// 动力学参数
const GRAVITY: f32 = 9.8;
const CART_MASS: f32 = 1.0;
const POLE_MASS: f32 = 0.1;
const HALF_POLE_LENGTH: f32 = 0.5;
const FORCE_MAG: f32 = 10.0;
const TAU: f32 = 0.02;

const X_THRESHOLD: f32 = 2.4;
const THETA_THRESHOLD: f32 = 12.0 * 2.0 * std::f32::consts::PI / 360.0;

/// CartPole 环境，状态为 [x, x_dot, theta, theta_dot]，没有步数上限
pub struct CartPole {
    state: [f32; 4],
    steps_beyond_done: Option<usize>,
    rng: StdRng,
}

impl Default for CartPole {
    fn default() -> Self {
        Self::new()
    }
}

impl CartPole {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            state: [0.0; 4],
            steps_beyond_done: None,
            rng,
        }
    }

    pub fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    fn is_done(state: &[f32; 4]) -> bool {
        state[0].abs() > X_THRESHOLD || state[2].abs() > THETA_THRESHOLD
    }
}

impl Environment for CartPole {
    type State = Vec<f32>;
    type Action = i64; // 0: left, 1: right
    type Reward = f32;

    fn reset(&mut self) -> Self::State {
        for value in self.state.iter_mut() {
            *value = self.rng.random_range(-0.05..0.05);
        }
        self.steps_beyond_done = None;
        self.state.to_vec()
    }

    fn step(&mut self, action: &Self::Action) -> Result<StepResult<Self::State, Self::Reward>> {
        let force = match *action {
            0 => -FORCE_MAG,
            1 => FORCE_MAG,
            action => {
                return Err(Error::InvalidAction {
                    action,
                    num_actions: 2,
                });
            }
        };

        let [x, x_dot, theta, theta_dot] = self.state;
        let total_mass = CART_MASS + POLE_MASS;
        let polemass_length = POLE_MASS * HALF_POLE_LENGTH;

        let costheta = theta.cos();
        let sintheta = theta.sin();
        let temp = (force + polemass_length * theta_dot.powi(2) * sintheta) / total_mass;
        let theta_acc = (GRAVITY * sintheta - costheta * temp)
            / (HALF_POLE_LENGTH * (4.0 / 3.0 - POLE_MASS * costheta.powi(2) / total_mass));
        let x_acc = temp - polemass_length * theta_acc * costheta / total_mass;

        // Euler
        self.state = [
            x + TAU * x_dot,
            x_dot + TAU * x_acc,
            theta + TAU * theta_dot,
            theta_dot + TAU * theta_acc,
        ];

        let done = Self::is_done(&self.state);
        let mut info = Info::new();
        let reward = match (done, self.steps_beyond_done) {
            (false, _) => 1.0,
            // 刚好倒下的这一步仍然有奖励
            (true, None) => {
                self.steps_beyond_done = Some(0);
                1.0
            }
            (true, Some(steps)) => {
                if steps == 0 {
                    tracing::warn!("step() called on a finished CartPole episode; call reset() first");
                }
                self.steps_beyond_done = Some(steps + 1);
                info.insert("steps_beyond_done", (steps + 1) as f64);
                0.0
            }
        };
        tracing::trace!(state = ?self.state, reward, done, "cartpole step");

        Ok(StepResult {
            next_state: self.state.to_vec(),
            reward,
            done,
            info,
        })
    }

    fn current_state(&self) -> Self::State {
        self.state.to_vec()
    }

    fn observation_space(&self) -> Space {
        let high = vec![X_THRESHOLD * 2.0, f32::MAX, THETA_THRESHOLD * 2.0, f32::MAX];
        Space::Box {
            low: high.iter().map(|v| -v).collect(),
            high,
        }
    }

    fn action_space(&self) -> Space {
        Space::Discrete(2) // 0: left, 1: right
    }

    fn reward_range(&self) -> (f32, f32) {
        (0.0, 1.0)
    }

    fn metadata(&self) -> Metadata {
        Metadata {
            render_modes: vec!["human".to_string(), "rgb_array".to_string()],
            frames_per_second: Some(50),
        }
    }
}
