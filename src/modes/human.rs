use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{debug, info};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::{MissedTickBehavior, interval};

use crate::game::{Action, GameConfig, GameEngine, GameState, Tick};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::Scoreboard;
use crate::render::Renderer;

/// Roughly one display refresh; the engine throttles actual moves itself
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    scoreboard: Scoreboard,
    renderer: Renderer,
    input_handler: InputHandler,
    started_at: Instant,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        let mut engine = GameEngine::new(config);
        let state = engine.reset();

        Self {
            engine,
            state,
            scoreboard: Scoreboard::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            started_at: Instant::now(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let config = self.engine.config();
        info!(
            "session started on a {}x{} board",
            config.grid_width, config.grid_height
        );

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        info!(
            "session ended: {} games, best score {}",
            self.scoreboard.games_played, self.scoreboard.best_score
        );

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut frame_timer = interval(FRAME_INTERVAL);
        frame_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Advance, then draw
                _ = frame_timer.tick() => {
                    self.update_game();
                    let snapshot = self.state.snapshot();
                    self.scoreboard.observe(&snapshot);
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &snapshot, &self.scoreboard);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };

        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::GameAction(action) => self.apply(action),
            KeyAction::Restart => self.reset_game(),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    /// Forward a player request; only ever latches input or flips the pause flag
    fn apply(&mut self, action: Action) {
        self.engine.apply(&mut self.state, action);

        if action == Action::TogglePause {
            debug!("pause toggled, status now {:?}", self.state.status);
        }
    }

    fn update_game(&mut self) {
        let now_ms = self.started_at.elapsed().as_millis() as u64;

        if self.engine.advance(&mut self.state, now_ms) == Tick::Ate {
            debug!("score {}", self.state.score);
        }
    }

    /// Throw the current game away and start a fresh one
    fn reset_game(&mut self) {
        self.state = self.engine.reset();
        self.scoreboard.on_game_start();
        info!("game restarted");
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
