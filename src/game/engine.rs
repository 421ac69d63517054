use log::{debug, info};
use rand::Rng;
use rand::rngs::ThreadRng;

use super::{
    action::{Action, Direction},
    config::{GameConfig, MIN_MOVE_INTERVAL_MS, SPEEDUP_STEP_MS},
    state::{GameState, Position, Snake, Status},
};

/// Length of a freshly reset snake
const INITIAL_SNAKE_LENGTH: usize = 2;

/// What a call to [`GameEngine::advance`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Paused, over, or not yet due
    Idle,
    /// The snake translated by one cell
    Moved,
    /// The snake ate the food and grew by one cell
    Ate,
    /// The new head hit the body; the game is over
    Crashed,
}

/// Drives a [`GameState`] forward; owns the randomness used for food
pub struct GameEngine<R: Rng = ThreadRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<ThreadRng> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create an engine drawing food positions from `rng`
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self { config, rng }
    }

    /// Board configuration this engine resets to
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build a fresh game: a two-cell snake centred on the board heading right
    pub fn reset(&mut self) -> GameState {
        let center_x = (self.config.grid_width / 2) as i32;
        let center_y = (self.config.grid_height / 2) as i32;

        let snake = Snake::new(
            Position::new(center_x, center_y),
            Direction::Right,
            INITIAL_SNAKE_LENGTH,
        );

        let mut state = GameState::new(
            snake,
            Direction::Right,
            Position::new(0, 0),
            self.config.grid_width,
            self.config.grid_height,
        );
        state.food = self.place_food(&state);

        debug!(
            "reset {}x{} board, head at {:?}, food at {:?}",
            state.grid_width,
            state.grid_height,
            state.snake.head(),
            state.food
        );

        state
    }

    /// Pick a uniformly random cell of the board not covered by the snake.
    ///
    /// Rejection sampling: loops forever if the snake fills the whole board.
    pub fn place_food(&mut self, state: &GameState) -> Position {
        loop {
            let x = self.rng.gen_range(0..state.grid_width) as i32;
            let y = self.rng.gen_range(0..state.grid_height) as i32;
            let pos = Position::new(x, y);

            if !state.is_occupied_by_snake(pos) {
                return pos;
            }
        }
    }

    /// Route a player request to the state
    pub fn apply(&self, state: &mut GameState, action: Action) {
        match action {
            Action::Steer(direction) => state.request_direction(direction),
            Action::TogglePause => state.toggle_pause(),
        }
    }

    /// Run one logical tick if the game is running and `now_ms` is at least
    /// `move_interval_ms` past the previous move.
    pub fn advance(&mut self, state: &mut GameState, now_ms: u64) -> Tick {
        if state.status != Status::Running {
            return Tick::Idle;
        }

        if now_ms.saturating_sub(state.last_move_ms) < state.move_interval_ms {
            return Tick::Idle;
        }

        state.last_move_ms = now_ms;
        state.direction = state.next_direction;

        let new_head = state
            .snake
            .head()
            .moved_in_direction(state.direction)
            .wrapped(state.grid_width, state.grid_height);

        // The tail has not moved yet, so stepping onto it counts as a crash
        if state.snake.occupies(new_head) {
            state.status = Status::GameOver;
            info!(
                "game over at {:?} with score {} (length {})",
                new_head,
                state.score,
                state.snake.len()
            );
            return Tick::Crashed;
        }

        let ate_food = new_head == state.food;
        state.snake.push_head(new_head, ate_food);

        if !ate_food {
            return Tick::Moved;
        }

        state.score += 1;
        state.food = self.place_food(state);
        state.move_interval_ms = state
            .move_interval_ms
            .saturating_sub(SPEEDUP_STEP_MS)
            .max(MIN_MOVE_INTERVAL_MS);

        debug!(
            "ate food: score {}, interval {}ms, next food at {:?}",
            state.score, state.move_interval_ms, state.food
        );

        Tick::Ate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::INITIAL_MOVE_INTERVAL_MS;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn seeded(config: GameConfig) -> GameEngine<StdRng> {
        GameEngine::with_rng(config, StdRng::seed_from_u64(7))
    }

    /// 20x20 board with the snake at [(10,10),(9,10)] heading right
    fn centred_state(engine: &mut GameEngine<StdRng>, food: Position) -> GameState {
        let mut state = engine.reset();
        state.food = food;
        state
    }

    #[test]
    fn test_reset() {
        let mut engine = seeded(GameConfig::new(20, 20));
        let state = engine.reset();

        assert!(state.is_running());
        assert_eq!(state.score, 0);
        assert_eq!(
            state.snake.body,
            vec![Position::new(10, 10), Position::new(9, 10)]
        );
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.next_direction, Direction::Right);
        assert_eq!(state.move_interval_ms, INITIAL_MOVE_INTERVAL_MS);
        assert_eq!(state.last_move_ms, 0);
        assert!(!state.is_occupied_by_snake(state.food));
    }

    #[test]
    fn test_reset_uses_engine_config() {
        let mut engine = seeded(GameConfig::small());
        let state = engine.reset();

        assert_eq!(engine.config(), &GameConfig::small());
        assert_eq!(
            (state.grid_width, state.grid_height),
            (engine.config().grid_width, engine.config().grid_height)
        );
    }

    #[test]
    fn test_reset_odd_board_uses_floor() {
        let mut engine = seeded(GameConfig::new(7, 5));
        let state = engine.reset();
        assert_eq!(state.snake.body, vec![Position::new(3, 2), Position::new(2, 2)]);
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = seeded(GameConfig::new(20, 20));
        let mut state = centred_state(&mut engine, Position::new(0, 0));

        let tick = engine.advance(&mut state, 150);

        assert_eq!(tick, Tick::Moved);
        assert_eq!(
            state.snake.body,
            vec![Position::new(11, 10), Position::new(10, 10)]
        );
        assert_eq!(state.score, 0);
        assert_eq!(state.last_move_ms, 150);
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = seeded(GameConfig::new(20, 20));
        let mut state = centred_state(&mut engine, Position::new(11, 10));

        let tick = engine.advance(&mut state, 150);

        assert_eq!(tick, Tick::Ate);
        assert_eq!(
            state.snake.body,
            vec![
                Position::new(11, 10),
                Position::new(10, 10),
                Position::new(9, 10)
            ]
        );
        assert_eq!(state.score, 1);
        assert_eq!(state.move_interval_ms, 148);
        assert!(!state.is_occupied_by_snake(state.food));
    }

    #[test]
    fn test_rate_limiting() {
        let mut engine = seeded(GameConfig::new(20, 20));
        let mut state = centred_state(&mut engine, Position::new(0, 0));

        assert_eq!(engine.advance(&mut state, 149), Tick::Idle);
        assert_eq!(state.snake.head(), Position::new(10, 10));

        assert_eq!(engine.advance(&mut state, 150), Tick::Moved);
        assert_eq!(engine.advance(&mut state, 200), Tick::Idle);
        assert_eq!(engine.advance(&mut state, 299), Tick::Idle);
        assert_eq!(engine.advance(&mut state, 300), Tick::Moved);
        assert_eq!(state.snake.head(), Position::new(12, 10));
    }

    #[test]
    fn test_clock_going_backwards_is_idle() {
        let mut engine = seeded(GameConfig::new(20, 20));
        let mut state = centred_state(&mut engine, Position::new(0, 0));
        state.last_move_ms = 1_000;

        assert_eq!(engine.advance(&mut state, 10), Tick::Idle);
    }

    #[test]
    fn test_latched_direction_commits_on_tick() {
        let mut engine = seeded(GameConfig::new(20, 20));
        let mut state = centred_state(&mut engine, Position::new(0, 0));

        engine.apply(&mut state, Action::Steer(Direction::Up));
        assert_eq!(state.direction, Direction::Right);

        engine.advance(&mut state, 150);
        assert_eq!(state.direction, Direction::Up);
        assert_eq!(state.snake.head(), Position::new(10, 9));
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut engine = seeded(GameConfig::new(20, 20));
        let mut state = centred_state(&mut engine, Position::new(0, 0));

        engine.apply(&mut state, Action::Steer(Direction::Left));
        assert_eq!(state.next_direction, Direction::Right);

        engine.advance(&mut state, 150);
        assert!(state.is_running());
        assert_eq!(state.snake.head(), Position::new(11, 10));
    }

    #[test]
    fn test_wrap_around_edges() {
        let mut engine = seeded(GameConfig::new(20, 20));

        let cases = [
            (Position::new(19, 4), Direction::Right, Position::new(0, 4)),
            (Position::new(0, 4), Direction::Left, Position::new(19, 4)),
            (Position::new(4, 19), Direction::Down, Position::new(4, 0)),
            (Position::new(4, 0), Direction::Up, Position::new(4, 19)),
        ];

        for (head, direction, expected) in cases {
            let mut state = GameState::new(
                Snake::new(head, direction, 2),
                direction,
                Position::new(10, 10),
                20,
                20,
            );

            assert_eq!(engine.advance(&mut state, 150), Tick::Moved);
            assert_eq!(state.snake.head(), expected);
        }
    }

    #[test]
    fn test_self_collision() {
        let mut engine = seeded(GameConfig::small());

        // Heading up from (5,5) lands on (5,4), the last body cell of a coiled snake
        let body = vec![
            Position::new(5, 5),
            Position::new(6, 5),
            Position::new(6, 4),
            Position::new(5, 4),
        ];
        let mut state = GameState::new(
            Snake::from_cells(body.clone()),
            Direction::Up,
            Position::new(0, 0),
            10,
            10,
        );

        let tick = engine.advance(&mut state, 150);

        assert_eq!(tick, Tick::Crashed);
        assert!(state.is_over());
        assert_eq!(state.snake.body, body);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_collision_into_neck_column() {
        let mut engine = seeded(GameConfig::small());

        // Head (5,5) heading down into (5,6)
        let body = vec![
            Position::new(5, 5),
            Position::new(4, 5),
            Position::new(4, 6),
            Position::new(5, 6),
            Position::new(5, 7),
        ];
        let mut state = GameState::new(
            Snake::from_cells(body.clone()),
            Direction::Down,
            Position::new(0, 0),
            10,
            10,
        );

        assert_eq!(engine.advance(&mut state, 150), Tick::Crashed);
        assert_eq!(state.snake.body, body);
    }

    #[test]
    fn test_game_over_is_absorbing() {
        let mut engine = seeded(GameConfig::new(20, 20));
        let mut state = centred_state(&mut engine, Position::new(0, 0));
        state.status = Status::GameOver;
        let before = state.clone();

        assert_eq!(engine.advance(&mut state, 10_000), Tick::Idle);
        engine.apply(&mut state, Action::Steer(Direction::Up));
        engine.apply(&mut state, Action::TogglePause);

        assert_eq!(state, before);
    }

    #[test]
    fn test_paused_game_does_not_move() {
        let mut engine = seeded(GameConfig::new(20, 20));
        let mut state = centred_state(&mut engine, Position::new(0, 0));

        engine.apply(&mut state, Action::TogglePause);
        assert_eq!(engine.advance(&mut state, 1_000), Tick::Idle);
        assert_eq!(state.snake.head(), Position::new(10, 10));
        assert_eq!(state.last_move_ms, 0);

        engine.apply(&mut state, Action::TogglePause);
        assert_eq!(engine.advance(&mut state, 1_000), Tick::Moved);
    }

    #[test]
    fn test_speed_floor() {
        let mut engine = seeded(GameConfig::new(20, 20));
        let mut state = centred_state(&mut engine, Position::new(11, 10));
        state.move_interval_ms = MIN_MOVE_INTERVAL_MS + 1;

        assert_eq!(engine.advance(&mut state, 1_000), Tick::Ate);
        assert_eq!(state.move_interval_ms, MIN_MOVE_INTERVAL_MS);
    }

    #[test]
    fn test_place_food_avoids_snake() {
        let mut engine = seeded(GameConfig::new(3, 1));

        // Two of three cells taken: the only free cell must be chosen
        let state = GameState::new(
            Snake::from_cells([Position::new(0, 0), Position::new(1, 0)]),
            Direction::Left,
            Position::new(2, 0),
            3,
            1,
        );

        for _ in 0..50 {
            assert_eq!(engine.place_food(&state), Position::new(2, 0));
        }
    }

    #[test]
    fn test_reset_replaces_finished_game() {
        let mut engine = seeded(GameConfig::new(20, 20));
        let mut state = centred_state(&mut engine, Position::new(11, 10));
        engine.advance(&mut state, 150);
        state.status = Status::GameOver;

        state = engine.reset();

        assert_eq!(state.score, 0);
        assert!(state.is_running());
        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.move_interval_ms, INITIAL_MOVE_INTERVAL_MS);
    }
}
