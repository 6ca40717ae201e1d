use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{backend::CrosstermBackend, Terminal};

use super::game_view;
use crate::config::AppConfig;
use crate::game::{MatchState, MatchStatus, MoveError, SIZE};

pub struct App {
    match_state: MatchState,
    cursor: (usize, usize),
    should_quit: bool,
    message: Option<String>,
    /// Turn baseline: the instant the running clock was last charged.
    last_tick: Instant,
    poll_interval: Duration,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        App {
            match_state: MatchState::new(config.clock.budget_secs),
            cursor: (SIZE / 2, SIZE / 2),
            should_quit: false,
            message: None,
            last_tick: Instant::now(),
            poll_interval: Duration::from_millis(config.ui.poll_interval_ms),
        }
    }

    /// Main application loop: draw, charge the running clock with the
    /// wall-clock time since the last pass, then wait for input.
    pub fn run<W: io::Write>(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<W>>,
    ) -> io::Result<()> {
        self.last_tick = Instant::now();

        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.tick_clock();
            self.handle_events()?;
        }

        Ok(())
    }

    /// Charge the elapsed wall-clock time to the current player.
    fn tick_clock(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;

        self.match_state.advance_time(elapsed.as_secs_f64());

        if let MatchStatus::TimedOut(winner) = self.match_state.status() {
            if self.message.is_none() {
                self.message = Some(format!(
                    "{} wins on time! Press 'r' or click to restart.",
                    winner.name()
                ));
            }
        }
    }

    /// Handle keyboard and mouse events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(self.poll_interval)? {
            match event::read()? {
                Event::Key(key) => self.handle_key(key),
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.cursor.0 = self.cursor.0.saturating_sub(1);
            }
            KeyCode::Right => {
                self.cursor.0 = (self.cursor.0 + 1).min(SIZE - 1);
            }
            KeyCode::Up => {
                self.cursor.1 = self.cursor.1.saturating_sub(1);
            }
            KeyCode::Down => {
                self.cursor.1 = (self.cursor.1 + 1).min(SIZE - 1);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let (x, y) = self.cursor;
                self.place(x as i32, y as i32);
            }
            KeyCode::Char('r') => {
                self.restart();
            }
            _ => {}
        }
    }

    /// Handle mouse click: map the screen position to a cell, or restart
    /// when the game is over (any click restarts then).
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return;
        }

        if self.match_state.is_terminal() {
            self.restart();
            return;
        }

        if let Some((x, y)) = game_view::cell_at(mouse.column, mouse.row) {
            self.cursor = (x, y);
            self.place(x as i32, y as i32);
        }
        // Clicks outside the board are dropped
    }

    /// Submit a move for the player to move
    fn place(&mut self, x: i32, y: i32) {
        match self.match_state.submit_move(x, y) {
            Ok(status) => {
                // New turn, new clock baseline
                self.last_tick = Instant::now();
                self.message = match status {
                    MatchStatus::InProgress => None,
                    MatchStatus::Won(winner) => Some(format!(
                        "{} wins! Press 'r' or click to restart.",
                        winner.name()
                    )),
                    MatchStatus::Draw => {
                        Some("It's a draw! Press 'r' or click to restart.".to_string())
                    }
                    MatchStatus::TimedOut(winner) => {
                        Some(format!("{} wins on time!", winner.name()))
                    }
                };
            }
            Err(MoveError::Occupied) => {
                self.message = Some("That cell is taken!".to_string());
            }
            Err(MoveError::OutOfBounds) => {
                self.message = Some("Outside the board!".to_string());
            }
            Err(MoveError::GameOver) => {
                self.message = Some("Game over! Press 'r' or click to restart.".to_string());
            }
        }
    }

    /// Start a new match
    fn restart(&mut self) {
        self.match_state.reset();
        self.cursor = (SIZE / 2, SIZE / 2);
        self.message = Some("New game started!".to_string());
        self.last_tick = Instant::now();
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        let cursor = if self.match_state.is_terminal() {
            None
        } else {
            Some(self.cursor)
        };
        game_view::render(frame, &self.match_state, cursor, &self.message);
    }
}
