use serde::{Deserialize, Serialize};

/// One of the four unit steps the snake can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Returns the unit vector (dx, dy) for this direction; y grows downwards
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// A request coming from the player, applied to the running game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Latch a new heading for the next tick
    Steer(Direction),
    /// Flip between running and paused
    TogglePause,
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        Action::Steer(direction)
    }
}
