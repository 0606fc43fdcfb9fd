use discrete_domains::Error;
use discrete_domains::config::GridWorldConfig;
use discrete_domains::environment::{Environment, Space};
use discrete_domains::utils::ToTensor;
use discrete_domains::environments::{DoubleRoomWindyGridWorld, GymPreprocessing};
use discrete_domains::environments::gridworld::{
    DOOR_Y, GOAL_STATE, HEIGHT, START_STATE, WIDTH, is_wall_row,
};

const UP: i64 = 0;
const RIGHT: i64 = 1;
const DOWN: i64 = 2;
const LEFT: i64 = 3;

fn deterministic() -> DoubleRoomWindyGridWorld {
    DoubleRoomWindyGridWorld::new(&GridWorldConfig {
        random_action_prob: 0.0,
        seed: Some(0),
    })
}

fn step_from(env: &mut DoubleRoomWindyGridWorld, from: (usize, usize), action: i64) -> (usize, usize) {
    env.set_position(from).unwrap();
    env.step(&action).unwrap().next_state
}

#[test]
fn reset_returns_start_cell() {
    let mut env = deterministic();
    env.set_position((0, 0)).unwrap();
    assert_eq!(env.reset(), START_STATE);
    assert_eq!(env.current_state(), START_STATE);

    let initial = env.reset_transition();
    assert_eq!(initial.next_state, START_STATE);
    assert_eq!(initial.reward, 0.0);
    assert!(!initial.done);
}

#[test]
fn reaching_goal_ends_episode() {
    let mut env = deterministic();

    env.set_position((HEIGHT - 1, WIDTH - 2)).unwrap();
    let result = env.step(&RIGHT).unwrap();
    assert_eq!(result.next_state, GOAL_STATE);
    assert_eq!(result.reward, 1.0);
    assert!(result.done);

    env.set_position((HEIGHT - 2, WIDTH - 1)).unwrap();
    let result = env.step(&DOWN).unwrap();
    assert_eq!(result.next_state, GOAL_STATE);
    assert_eq!(result.reward, 1.0);
    assert!(result.done);
}

#[test]
fn ordinary_moves_give_no_reward() {
    let mut env = deterministic();
    env.reset();
    let result = env.step(&UP).unwrap();
    assert_eq!(result.next_state, (HEIGHT - 2, 0));
    assert_eq!(result.reward, 0.0);
    assert!(!result.done);
}

#[test]
fn wind_pushes_up_before_the_move() {
    let mut env = deterministic();
    // column 2 has wind 2
    assert_eq!(step_from(&mut env, (10, 2), RIGHT), (8, 3));
    // column 1 has wind 1, then one step down cancels it
    assert_eq!(step_from(&mut env, (10, 1), DOWN), (10, 1));
    // clamped at the top row
    assert_eq!(step_from(&mut env, (0, 1), UP), (0, 1));
    // calm columns
    assert_eq!(step_from(&mut env, (10, 7), UP), (9, 7));
}

#[test]
fn wall_blocks_entry_except_through_door() {
    let mut env = deterministic();
    assert_eq!(step_from(&mut env, (8, 6), LEFT), (8, 6));
    assert_eq!(step_from(&mut env, (3, 6), LEFT), (3, DOOR_Y));
    // wind in column 4 lifts the agent from row 5 to the door row first
    assert_eq!(step_from(&mut env, (5, 4), RIGHT), (3, DOOR_Y));
    // ...but from row 8 it only reaches row 6, which is wall
    assert_eq!(step_from(&mut env, (8, 4), RIGHT), (6, 4));
}

#[test]
fn row_is_frozen_in_door_column() {
    let mut env = deterministic();
    assert_eq!(step_from(&mut env, (3, DOOR_Y), UP), (3, DOOR_Y));
    assert_eq!(step_from(&mut env, (3, DOOR_Y), DOWN), (3, DOOR_Y));
    assert_eq!(step_from(&mut env, (3, DOOR_Y), RIGHT), (3, DOOR_Y + 1));
    assert_eq!(step_from(&mut env, (3, DOOR_Y), LEFT), (3, DOOR_Y - 1));
}

#[test]
fn positions_stay_in_bounds_and_out_of_walls() {
    let mut env = DoubleRoomWindyGridWorld::new(&GridWorldConfig {
        random_action_prob: 0.1,
        seed: Some(7),
    });
    env.reset();
    for i in 0..20_000 {
        let action = (i * 7 % 11 % 4) as i64;
        let result = env.step(&action).unwrap();
        let (x, y) = result.next_state;
        assert!(x < HEIGHT && y < WIDTH, "out of bounds at {:?}", (x, y));
        assert!(!(is_wall_row(x) && y == DOOR_Y), "inside wall at {:?}", (x, y));
        if result.done {
            env.reset();
        }
    }
}

#[test]
fn slip_always_replaces_action_when_probability_is_one() {
    let mut env = DoubleRoomWindyGridWorld::new(&GridWorldConfig {
        random_action_prob: 1.0,
        seed: Some(3),
    });
    let mut seen = std::collections::HashSet::new();
    for _ in 0..200 {
        seen.insert(step_from(&mut env, (10, 8), UP));
    }
    // every one of the four neighbours shows up
    assert_eq!(seen.len(), 4);
}

#[test]
fn invalid_actions_are_rejected() {
    let mut env = deterministic();
    for action in [-1, 4, 100] {
        let err = env.step(&action).unwrap_err();
        assert!(matches!(err, Error::InvalidAction { num_actions: 4, .. }));
    }
    assert_eq!(env.current_state(), START_STATE);
}

#[test]
fn wall_cells_cannot_be_set() {
    let mut env = deterministic();
    assert!(matches!(
        env.set_position((0, DOOR_Y)),
        Err(Error::InvalidPosition { row: 0, column: 5 })
    ));
    assert!(env.set_position((HEIGHT, 0)).is_err());
    assert!(env.set_position((3, DOOR_Y)).is_ok());
}

#[test]
fn spaces_describe_the_grid() {
    let env = deterministic();
    assert_eq!(
        env.observation_space(),
        Space::Tuple(vec![Space::Discrete(HEIGHT), Space::Discrete(WIDTH)])
    );
    assert_eq!(env.action_space(), Space::Discrete(4));
    assert_eq!(env.state_dim(), 2);
    assert_eq!(env.reward_range(), (0.0, 1.0));
}

#[test]
fn render_draws_walls_agent_and_goal() {
    let mut env = deterministic();
    env.reset();
    let board = env.render();
    let lines: Vec<&str> = board.split('\n').collect();

    // border rows + grid rows, then the blank line
    assert_eq!(lines.len(), HEIGHT + 2 + 2);
    assert_eq!(lines[0], "# ".repeat(WIDTH + 2));
    assert_eq!(lines[HEIGHT + 1], "# ".repeat(WIDTH + 2));
    assert_eq!(lines[HEIGHT + 2], "");

    let room = "  ".repeat(4);
    assert_eq!(lines[1], format!("# {room}  # {room}  # "));
    assert_eq!(lines[1 + 3], format!("# {room}    {room}  # "));
    assert_eq!(lines[HEIGHT], format!("# X {room}# {room}G # "));

    env.set_position((5, 2)).unwrap();
    let board = env.render();
    let lines: Vec<&str> = board.split('\n').collect();
    assert_eq!(lines[HEIGHT], format!("# S {room}# {room}G # "));
    assert_eq!(lines[1 + 5], format!("#     X {}# {room}  # ", "  ".repeat(2)));
}

fn slip_trajectory(env: &mut DoubleRoomWindyGridWorld, steps: usize) -> Vec<(usize, usize)> {
    env.reset();
    (0..steps)
        .map(|_| {
            let result = env.step(&RIGHT).unwrap();
            if result.done {
                env.reset();
            }
            result.next_state
        })
        .collect()
}

#[test]
fn reseeding_reproduces_slip_trajectory() {
    let mut env = DoubleRoomWindyGridWorld::new(&GridWorldConfig {
        random_action_prob: 0.5,
        seed: None,
    });

    env.seed(21);
    let first = slip_trajectory(&mut env, 60);
    env.seed(21);
    let second = slip_trajectory(&mut env, 60);
    assert_eq!(first, second);

    // without slips, pushing right from the start would only ever follow the wind
    let mut calm = deterministic();
    assert_ne!(first, slip_trajectory(&mut calm, 60));
}

#[test]
fn wrapper_forwards_render() {
    let mut env = GymPreprocessing::new(DoubleRoomWindyGridWorld::default());
    assert_eq!(env.render(), env.environment().render());

    env.environment_mut().set_position((3, DOOR_Y)).unwrap();
    assert_eq!(env.render(), env.environment().render());
    assert!(env.render().contains("X "));

    let inner = env.into_inner();
    assert_eq!(inner.position(), (3, DOOR_Y));
}

#[test]
fn grid_position_converts_to_a_tensor() {
    let mut env = deterministic();
    let state = env.reset().to_tensor();
    assert_eq!(state.size(), vec![1, 2]);
    assert_eq!(
        Vec::<f32>::try_from(state.flatten(0, -1)).unwrap(),
        vec![(HEIGHT - 1) as f32, 0.0]
    );
}
