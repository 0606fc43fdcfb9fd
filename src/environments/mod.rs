pub mod acrobot;
pub mod cartpole;
pub mod gridworld;
pub mod preprocessing;

use crate::environment::Environment;
use crate::error::{Error, Result};

pub use acrobot::Acrobot;
pub use cartpole::CartPole;
pub use gridworld::DoubleRoomWindyGridWorld;
pub use preprocessing::GymPreprocessing;

/// Classic-control environments with vector observations and discrete actions.
pub type ClassicControl = Box<dyn Environment<State = Vec<f32>, Action = i64, Reward = f32>>;

/// Looks up a registered environment by its full id, e.g. `"CartPole-v0"`.
pub fn make(id: &str) -> Result<ClassicControl> {
    match id {
        "CartPole-v0" | "CartPole-v1" => Ok(Box::new(CartPole::new())),
        "Acrobot-v1" => Ok(Box::new(Acrobot::new())),
        _ => Err(Error::UnknownEnvironment(id.to_string())),
    }
}

/// Builds `"{environment_name}-{version}"` and wraps it in [`GymPreprocessing`].
///
/// Registered environments carry no step limit.
pub fn create_gym_environment(
    environment_name: Option<&str>,
    version: &str,
) -> Result<GymPreprocessing<ClassicControl>> {
    let environment_name = environment_name.ok_or(Error::MissingEnvironmentName)?;
    let full_game_name = format!("{environment_name}-{version}");
    let env = make(&full_game_name)?;
    tracing::debug!(id = %full_game_name, "created gym environment");
    Ok(GymPreprocessing::new(env))
}
