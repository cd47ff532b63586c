use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::future;
use std::io::{Stdout, stdout};
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

use crate::game::{GameConfig, GameEngine, GameStatus, TickOutcome};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Raw mode plus alternate screen, given back to the shell on drop
struct TerminalSession {
    terminal: Tui,
}

impl TerminalSession {
    fn enter() -> Result<Self> {
        let terminal =
            Terminal::new(CrosstermBackend::new(stdout())).context("Failed to create terminal")?;
        enable_raw_mode().context("Failed to enable raw mode")?;

        // Drop restores the terminal from here on, even if setup fails
        let mut session = Self { terminal };
        execute!(session.terminal.backend_mut(), EnterAlternateScreen)
            .context("Failed to enter alternate screen")?;
        session
            .terminal
            .hide_cursor()
            .context("Failed to hide cursor")?;
        session.terminal.clear().context("Failed to clear terminal")?;

        Ok(session)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            warn!("failed to disable raw mode: {e}");
        }
        if let Err(e) = execute!(self.terminal.backend_mut(), LeaveAlternateScreen) {
            warn!("failed to leave alternate screen: {e}");
        }
        if let Err(e) = self.terminal.show_cursor() {
            warn!("failed to show cursor: {e}");
        }
    }
}

/// Wait for the next tick, or forever when the timer has been released
async fn next_tick(timer: &mut Option<Interval>) {
    match timer {
        Some(timer) => {
            timer.tick().await;
        }
        None => future::pending().await,
    }
}

/// Interactive terminal driver.
///
/// Owns the engine, a tick timer and the key listener. The timer exists only
/// while the game is running; restarting builds a fresh engine and a fresh
/// timer.
pub struct HumanMode {
    config: GameConfig,
    seed: Option<u64>,
    engine: GameEngine,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, seed: Option<u64>) -> Result<Self> {
        let engine = Self::new_engine(&config, seed, 0)?;

        Ok(Self {
            config,
            seed,
            engine,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        })
    }

    /// Each game of a seeded session gets its own, reproducible, seed
    fn new_engine(config: &GameConfig, seed: Option<u64>, game: u32) -> Result<GameEngine> {
        match seed {
            Some(seed) => GameEngine::with_seed(config.clone(), seed.wrapping_add(game as u64)),
            None => GameEngine::new(config.clone()),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut session = TerminalSession::enter()?;
        self.run_game_loop(&mut session.terminal).await
    }

    async fn run_game_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = Some(self.start_timer());

        self.draw(terminal)?;

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => match maybe_event {
                    Some(Ok(event)) => self.handle_event(event)?,
                    Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                    None => self.should_quit = true,
                },

                _ = next_tick(&mut tick_timer) => self.update_game(),

                _ = tokio::signal::ctrl_c() => self.should_quit = true,
            }

            if self.should_quit {
                break;
            }

            // Release the timer with the game; take a new one after a restart
            match (self.engine.status(), tick_timer.is_some()) {
                (GameStatus::GameOver, true) => tick_timer = None,
                (GameStatus::Running, false) => tick_timer = Some(self.start_timer()),
                _ => {}
            }

            self.draw(terminal)?;
        }

        Ok(())
    }

    fn start_timer(&self) -> Interval {
        let period = self.config.tick_interval;
        let mut timer = interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        timer
    }

    fn draw(&mut self, terminal: &mut Tui) -> Result<()> {
        self.metrics.update();
        let snapshot = self.engine.snapshot();
        terminal
            .draw(|frame| self.renderer.render(frame, &snapshot, &self.metrics))
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        let Event::Key(key) = event else {
            return Ok(());
        };

        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Turn(direction) => self.engine.set_heading(direction),
            KeyAction::Restart => self.reset_game()?,
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }

        Ok(())
    }

    fn update_game(&mut self) {
        if let TickOutcome::Ended(_) = self.engine.tick() {
            self.metrics.on_game_over(self.engine.snapshot().score());
        }
    }

    /// Throw the engine away and start over from the initial state
    fn reset_game(&mut self) -> Result<()> {
        self.engine = Self::new_engine(&self.config, self.seed, self.metrics.games_played)?;
        self.metrics.on_game_start();
        info!("new game started");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Direction, Heading};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_game_initialization() {
        let mode = HumanMode::new(GameConfig::default(), Some(3)).unwrap();
        assert_eq!(mode.engine.status(), GameStatus::Running);
        assert_eq!(mode.engine.snake().cells(), &[Cell::new(2, 2)]);
        assert!(!mode.should_quit);
    }

    #[test]
    fn test_turn_key_changes_heading() {
        let mut mode = HumanMode::new(GameConfig::default(), Some(3)).unwrap();

        mode.handle_event(key(KeyCode::Down)).unwrap();

        assert_eq!(mode.engine.heading(), Heading::from(Direction::Down));
    }

    #[test]
    fn test_tick_advances_snake() {
        let mut mode = HumanMode::new(GameConfig::default(), Some(3)).unwrap();

        mode.update_game();

        assert_eq!(mode.engine.snake().head(), Cell::new(3, 2));
    }

    #[test]
    fn test_game_over_then_restart() {
        let mut mode = HumanMode::new(GameConfig::default(), Some(3)).unwrap();
        mode.engine = GameEngine::from_state(
            GameConfig::default(),
            vec![Cell::new(0, 0)],
            Cell::new(5, 5),
            Direction::Left,
            3,
        )
        .unwrap();

        mode.update_game();
        assert_eq!(mode.engine.status(), GameStatus::GameOver);
        assert_eq!(mode.metrics.games_played, 1);

        mode.handle_event(key(KeyCode::Char('r'))).unwrap();
        assert_eq!(mode.engine.status(), GameStatus::Running);
        assert_eq!(mode.engine.snake().cells(), &[Cell::new(2, 2)]);
        assert_eq!(mode.engine.food(), Cell::new(5, 5));
    }

    #[test]
    fn test_quit_key() {
        let mut mode = HumanMode::new(GameConfig::default(), None).unwrap();

        mode.handle_event(key(KeyCode::Char('x'))).unwrap();
        assert!(!mode.should_quit);

        mode.handle_event(key(KeyCode::Esc)).unwrap();
        assert!(mode.should_quit);
    }
}
