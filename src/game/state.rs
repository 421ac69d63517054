use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::config::INITIAL_MOVE_INTERVAL_MS;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Fold the position back onto a `width` x `height` torus
    pub fn wrapped(&self, width: usize, height: usize) -> Self {
        let (w, h) = (width as i32, height as i32);
        Self {
            x: self.x.rem_euclid(w),
            y: self.y.rem_euclid(h),
        }
    }
}

/// The snake's body, head first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
}

impl Snake {
    /// Lay out `length` cells trailing behind `head`, opposite to `direction`
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        let (dx, dy) = direction.delta();
        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(-dx, -dy));
        }

        Self { body }
    }

    pub fn from_cells(cells: impl IntoIterator<Item = Position>) -> Self {
        Self {
            body: cells.into_iter().collect(),
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// True if any segment, head or tail included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Push a new head; the tail stays put when growing
    pub fn push_head(&mut self, new_head: Position, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Where the game is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Running,
    Paused,
    /// Absorbing: only a reset leaves it
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// Heading committed on the last tick
    pub direction: Direction,
    /// Latched input, committed on the next tick
    pub next_direction: Direction,
    pub food: Position,
    pub grid_width: usize,
    pub grid_height: usize,
    pub score: u32,
    pub status: Status,
    pub move_interval_ms: u64,
    pub last_move_ms: u64,
}

impl GameState {
    /// Create a running game heading in `direction`
    pub fn new(
        snake: Snake,
        direction: Direction,
        food: Position,
        grid_width: usize,
        grid_height: usize,
    ) -> Self {
        Self {
            snake,
            direction,
            next_direction: direction,
            food,
            grid_width,
            grid_height,
            score: 0,
            status: Status::Running,
            move_interval_ms: INITIAL_MOVE_INTERVAL_MS,
            last_move_ms: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    pub fn is_paused(&self) -> bool {
        self.status == Status::Paused
    }

    pub fn is_over(&self) -> bool {
        self.status == Status::GameOver
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }

    /// Latch `direction` for the next tick.
    ///
    /// Ignored unless the game is running, and ignored when it would reverse
    /// the committed heading. The last accepted request between two ticks wins.
    pub fn request_direction(&mut self, direction: Direction) {
        if self.is_running() && !self.direction.is_opposite(direction) {
            self.next_direction = direction;
        }
    }

    /// Flip between running and paused; a finished game stays finished
    pub fn toggle_pause(&mut self) {
        self.status = match self.status {
            Status::Running => Status::Paused,
            Status::Paused => Status::Running,
            Status::GameOver => Status::GameOver,
        };
    }

    /// Read-only view handed to the renderer and the scoreboard
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            snake: &self.snake.body,
            food: self.food,
            score: self.score,
            status: self.status,
            grid_width: self.grid_width,
            grid_height: self.grid_height,
            move_interval_ms: self.move_interval_ms,
        }
    }
}

/// Borrowed, immutable view of a [`GameState`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot<'a> {
    /// Snake cells ordered head first
    pub snake: &'a [Position],
    pub food: Position,
    pub score: u32,
    pub status: Status,
    pub grid_width: usize,
    pub grid_height: usize,
    pub move_interval_ms: u64,
}

impl Snapshot<'_> {
    pub fn head(&self) -> Option<Position> {
        self.snake.first().copied()
    }
}
