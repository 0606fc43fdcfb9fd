use crate::environment::{Environment, Metadata, Space, StepResult};
use crate::error::Result;

/// Forwards everything to the wrapped environment and remembers whether the
/// last step ended the episode.
pub struct GymPreprocessing<E> {
    environment: E,
    game_over: bool,
}

impl<E: Environment> GymPreprocessing<E> {
    pub fn new(environment: E) -> Self {
        Self {
            environment,
            game_over: false,
        }
    }

    /// `done` of the most recent step. Not cleared by `reset`.
    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn environment(&self) -> &E {
        &self.environment
    }

    pub fn environment_mut(&mut self) -> &mut E {
        &mut self.environment
    }

    pub fn into_inner(self) -> E {
        self.environment
    }
}

impl<E: Environment> Environment for GymPreprocessing<E> {
    type State = E::State;
    type Action = E::Action;
    type Reward = E::Reward;

    fn reset(&mut self) -> Self::State {
        self.environment.reset()
    }

    fn step(&mut self, action: &Self::Action) -> Result<StepResult<Self::State, Self::Reward>> {
        let result = self.environment.step(action)?;
        self.game_over = result.done;
        Ok(result)
    }

    fn current_state(&self) -> Self::State {
        self.environment.current_state()
    }

    fn observation_space(&self) -> Space {
        self.environment.observation_space()
    }

    fn action_space(&self) -> Space {
        self.environment.action_space()
    }

    fn reward_range(&self) -> (f32, f32) {
        self.environment.reward_range()
    }

    fn metadata(&self) -> Metadata {
        self.environment.metadata()
    }

    fn render(&self) -> String {
        self.environment.render()
    }

    fn state_dim(&self) -> usize {
        self.environment.state_dim()
    }
}
