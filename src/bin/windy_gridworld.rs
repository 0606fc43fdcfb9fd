//! Runs one random-policy episode on the double-room windy gridworld.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rand::Rng;
use tracing_subscriber::EnvFilter;

use discrete_domains::config::Config;
use discrete_domains::environment::Environment;
use discrete_domains::environments::{DoubleRoomWindyGridWorld, GymPreprocessing};

#[derive(Parser, Debug)]
#[command(name = "windy_gridworld")]
#[command(about = "Random-policy episode on the double-room windy gridworld")]
struct Args {
    /// JSON config file; defaults are used when omitted
    config: Option<PathBuf>,

    /// Stop after this many steps even if the goal was not reached
    #[arg(long, default_value_t = 10_000)]
    max_steps: usize,

    /// Override the slip RNG seed from the config
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => Config::from_path(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::default(),
    };

    let mut env = GymPreprocessing::new(DoubleRoomWindyGridWorld::new(&config.gridworld));
    if let Some(seed) = args.seed {
        env.environment_mut().seed(seed);
    }
    let mut rng = rand::rng();

    env.reset();
    let mut total_reward = 0.0;
    let mut steps = 0;
    while steps < args.max_steps && !env.game_over() {
        let action = rng.random_range(0..4);
        let result = env.step(&action)?;
        total_reward += result.reward;
        steps += 1;
    }

    tracing::info!(
        steps,
        total_reward,
        reached_goal = env.game_over(),
        position = ?env.environment().position(),
        "episode finished"
    );
    print!("{}", env.render());
    Ok(())
}
