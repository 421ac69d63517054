use log::info;
use std::time::{Duration, Instant};

use crate::game::{Snapshot, Status};

/// Score and status panel state, fed from snapshots of the running game
pub struct Scoreboard {
    /// Score currently on display
    pub score: u32,
    /// Final score shown on the game-over panel, if it is visible
    pub game_over_panel: Option<u32>,
    /// Best final score of this session
    pub best_score: u32,
    pub games_played: u32,
    pub start_time: Instant,
    /// Play time of the current game; frozen while paused or over
    pub elapsed_time: Duration,
    last_status: Status,
    paused_at: Option<Instant>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self {
            score: 0,
            game_over_panel: None,
            best_score: 0,
            games_played: 0,
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            last_status: Status::Running,
            paused_at: None,
        }
    }

    /// Sync with the latest snapshot; call once per frame
    pub fn observe(&mut self, snapshot: &Snapshot<'_>) {
        match (self.last_status, snapshot.status) {
            (Status::GameOver, Status::GameOver) => {}
            (_, Status::GameOver) => self.on_game_over(snapshot.score),
            (Status::GameOver, _) => self.on_game_start(),
            (Status::Running, Status::Paused) => self.paused_at = Some(Instant::now()),
            (Status::Paused, Status::Paused) => {}
            (_, Status::Running) => {
                // Shift the start forward so the pause does not count
                if let Some(paused_at) = self.paused_at.take() {
                    self.start_time += paused_at.elapsed();
                }
                self.elapsed_time = self.start_time.elapsed();
            }
        }

        self.score = snapshot.score;
        self.last_status = snapshot.status;
    }

    /// A new game began; hide the panel and restart the clock
    pub fn on_game_start(&mut self) {
        self.game_over_panel = None;
        self.score = 0;
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.paused_at = None;
    }

    fn on_game_over(&mut self, final_score: u32) {
        if let Some(paused_at) = self.paused_at.take() {
            self.start_time += paused_at.elapsed();
        }
        self.games_played += 1;
        self.best_score = self.best_score.max(final_score);
        self.game_over_panel = Some(final_score);
        self.elapsed_time = self.start_time.elapsed();

        info!(
            "game {} finished with score {} after {} (best {})",
            self.games_played,
            final_score,
            self.format_time(),
            self.best_score
        );
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new()
    }
}
