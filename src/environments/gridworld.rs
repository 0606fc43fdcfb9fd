//! Two rooms joined by a single door, with upward wind in some columns.
//!
//! ```text
//!  # # # # # # # # # # # # #
//!  #           #           #
//!  #           #           #
//!  #           #           #
//!  #                       #   <- door, row 3
//!  #           #           #
//!  ...
//!  # S         #         G #
//!  # # # # # # # # # # # # #
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GridWorldConfig;
use crate::environment::{Environment, Info, Metadata, Space, StepResult};
use crate::error::{Error, Result};

pub const WIDTH: usize = 5 * 2 + 1;
pub const HEIGHT: usize = 14;
pub const DOOR_ROW: usize = 3;
pub const DOOR_Y: usize = (WIDTH - 1) / 2;
pub const START_STATE: (usize, usize) = (HEIGHT - 1, 0);
pub const GOAL_STATE: (usize, usize) = (HEIGHT - 1, WIDTH - 1);

const WINDY_COLUMNS: [usize; 4] = [1, 2, 3, 4];
const WINDY_LEVELS: [i64; 4] = [1, 2, 2, 2];

/// up, right, down, left
const MOVES: [(i64, i64); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

/// Every row of the middle column is wall except the door row.
pub fn is_wall_row(x: usize) -> bool {
    x < HEIGHT && x != DOOR_ROW
}

pub struct DoubleRoomWindyGridWorld {
    x: usize,
    y: usize,
    random_action_prob: f64,
    rng: StdRng,
}

impl Default for DoubleRoomWindyGridWorld {
    fn default() -> Self {
        Self::new(&GridWorldConfig::default())
    }
}

impl DoubleRoomWindyGridWorld {
    pub fn new(config: &GridWorldConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let (x, y) = START_STATE;
        Self {
            x,
            y,
            random_action_prob: config.random_action_prob,
            rng,
        }
    }

    pub fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    /// Places the agent on `position`. Wall cells and cells outside the grid
    /// are rejected.
    pub fn set_position(&mut self, position: (usize, usize)) -> Result<()> {
        let (x, y) = position;
        if x >= HEIGHT || y >= WIDTH || (is_wall_row(x) && y == DOOR_Y) {
            return Err(Error::InvalidPosition { row: x, column: y });
        }
        self.x = x;
        self.y = y;
        Ok(())
    }

    /// Resets and reports the start as a transition: reward 0, not done.
    pub fn reset_transition(&mut self) -> StepResult<(usize, usize), f32> {
        StepResult::initial(self.reset())
    }

    fn sample_action(&mut self, action: usize) -> usize {
        if self.rng.random::<f64>() < self.random_action_prob {
            self.rng.random_range(0..MOVES.len())
        } else {
            action
        }
    }

    /// Applies wind and `real_action` to the current position.
    fn transition(&mut self, real_action: usize) {
        let (move_x, move_y) = MOVES[real_action];
        let mut x = self.x as i64;
        let y = self.y as i64;

        if let Some(column) = WINDY_COLUMNS.iter().position(|&c| c == self.y) {
            x -= WINDY_LEVELS[column];
        }
        // 在门所在的列时, 行方向不动
        let next_x = if self.y == DOOR_Y { x } else { x + move_x };
        self.x = next_x.clamp(0, HEIGHT as i64 - 1) as usize;

        let next_y = if y + move_y == DOOR_Y as i64 {
            if is_wall_row(self.x) { y } else { DOOR_Y as i64 }
        } else {
            y + move_y
        };
        self.y = next_y.clamp(0, WIDTH as i64 - 1) as usize;

        assert!(
            !(is_wall_row(self.x) && self.y == DOOR_Y),
            "agent inside the wall at ({}, {})",
            self.x,
            self.y
        );
    }
}

impl Environment for DoubleRoomWindyGridWorld {
    type State = (usize, usize);
    type Action = i64; // 0: up, 1: right, 2: down, 3: left
    type Reward = f32;

    fn reset(&mut self) -> Self::State {
        (self.x, self.y) = START_STATE;
        START_STATE
    }

    fn step(&mut self, action: &Self::Action) -> Result<StepResult<Self::State, Self::Reward>> {
        let action = usize::try_from(*action)
            .ok()
            .filter(|&a| a < MOVES.len())
            .ok_or(Error::InvalidAction {
                action: *action,
                num_actions: MOVES.len(),
            })?;

        let real_action = self.sample_action(action);
        let last_position = self.position();
        self.transition(real_action);

        let next_state = self.position();
        let done = next_state == GOAL_STATE;
        let reward = if done { 1.0 } else { 0.0 };
        tracing::trace!(
            action,
            real_action,
            from = ?last_position,
            to = ?next_state,
            done,
            "gridworld step"
        );

        Ok(StepResult {
            next_state,
            reward,
            done,
            info: Info::new(),
        })
    }

    fn current_state(&self) -> Self::State {
        self.position()
    }

    fn observation_space(&self) -> Space {
        Space::Tuple(vec![Space::Discrete(HEIGHT), Space::Discrete(WIDTH)])
    }

    fn action_space(&self) -> Space {
        Space::Discrete(MOVES.len())
    }

    fn reward_range(&self) -> (f32, f32) {
        (0.0, 1.0)
    }

    fn metadata(&self) -> Metadata {
        Metadata {
            render_modes: vec!["human".to_string()],
            frames_per_second: None,
        }
    }

    /// `X` agent, `G` goal, `S` start, `#` border and wall; two characters per
    /// cell, one line per row, then a blank line.
    fn render(&self) -> String {
        let mut board = String::new();
        for x in -1..=HEIGHT as i64 {
            for y in -1..=WIDTH as i64 {
                let cell = if x >= 0 && y >= 0 { Some((x as usize, y as usize)) } else { None };
                let on_border = x == -1 || x == HEIGHT as i64 || y == -1 || y == WIDTH as i64;
                let output = if cell == Some(self.position()) {
                    "X "
                } else if cell == Some(GOAL_STATE) {
                    "G "
                } else if cell == Some(START_STATE) {
                    "S "
                } else if on_border || (is_wall_row(x as usize) && y == DOOR_Y as i64) {
                    "# "
                } else {
                    "  "
                };
                board.push_str(output);
                if y == WIDTH as i64 {
                    board.push('\n');
                }
            }
        }
        board.push('\n');
        board
    }
}
