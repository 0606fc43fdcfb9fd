use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Extra diagnostics attached to a step, keyed by name.
pub type Info = BTreeMap<&'static str, f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct StepResult<S, R> {
    pub next_state: S,
    pub reward: R,
    pub done: bool,
    pub info: Info,
}

impl<S, R: Default> StepResult<S, R> {
    /// 回合开始时的转移: reward 为 0, 未结束
    pub fn initial(state: S) -> Self {
        Self {
            next_state: state,
            reward: R::default(),
            done: false,
            info: Info::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Space {
    Discrete(usize),
    Box { low: Vec<f32>, high: Vec<f32> },
    Tuple(Vec<Space>),
}

impl Space {
    /// Number of scalar components an element of this space has.
    pub fn flat_dim(&self) -> usize {
        match self {
            Space::Discrete(_) => 1,
            Space::Box { low, .. } => low.len(),
            Space::Tuple(spaces) => spaces.iter().map(Space::flat_dim).sum(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub render_modes: Vec<String>,
    pub frames_per_second: Option<u32>,
}

pub trait Environment {
    type State;
    type Action;
    type Reward: Copy + Into<f32>;

    fn reset(&mut self) -> Self::State;
    fn step(&mut self, action: &Self::Action) -> Result<StepResult<Self::State, Self::Reward>>; // (next_state, reward, if_done, info)

    /// 获取当前状态
    fn current_state(&self) -> Self::State;

    fn observation_space(&self) -> Space;

    fn action_space(&self) -> Space;

    fn reward_range(&self) -> (f32, f32) {
        (f32::NEG_INFINITY, f32::INFINITY)
    }

    fn metadata(&self) -> Metadata {
        Metadata::default()
    }

    /// Textual dump of the current state; empty when the environment has none.
    fn render(&self) -> String {
        String::new()
    }

    /// 状态空间维度
    fn state_dim(&self) -> usize {
        self.observation_space().flat_dim()
    }
}

impl<E: Environment + ?Sized> Environment for Box<E> {
    type State = E::State;
    type Action = E::Action;
    type Reward = E::Reward;

    fn reset(&mut self) -> Self::State {
        (**self).reset()
    }

    fn step(&mut self, action: &Self::Action) -> Result<StepResult<Self::State, Self::Reward>> {
        (**self).step(action)
    }

    fn current_state(&self) -> Self::State {
        (**self).current_state()
    }

    fn observation_space(&self) -> Space {
        (**self).observation_space()
    }

    fn action_space(&self) -> Space {
        (**self).action_space()
    }

    fn reward_range(&self) -> (f32, f32) {
        (**self).reward_range()
    }

    fn metadata(&self) -> Metadata {
        (**self).metadata()
    }

    fn render(&self) -> String {
        (**self).render()
    }

    fn state_dim(&self) -> usize {
        (**self).state_dim()
    }
}
