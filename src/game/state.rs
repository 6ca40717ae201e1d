use tracing::{debug, info};

use super::board::PlaceError;
use super::{Board, ChessClock, Player};

/// Overall game status. `InProgress` is the initial state; the other
/// three are terminal and only `reset` leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    InProgress,
    Won(Player),
    Draw,
    /// A flag fell; carries the winner (the player who still had time).
    TimedOut(Player),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    Occupied,
    OutOfBounds,
    GameOver,
}

/// The match controller: turn order, per-player clocks, and game status.
/// Consumes discrete move submissions and elapsed-time ticks; knows
/// nothing about rendering or wall clocks.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchState {
    board: Board,
    current_player: Player,
    status: MatchStatus,
    move_count: u32,
    clock: ChessClock,
    budget_secs: f64,
}

impl MatchState {
    /// Create a fresh match with `budget_secs` on each clock.
    pub fn new(budget_secs: f64) -> Self {
        MatchState {
            board: Board::new(),
            current_player: Player::Cross, // Player 1 starts
            status: MatchStatus::InProgress,
            move_count: 0,
            clock: ChessClock::new(budget_secs),
            budget_secs,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Remaining time for `player` in seconds.
    pub fn remaining_time(&self, player: Player) -> f64 {
        self.clock.remaining(player)
    }

    /// Check if the game is over
    pub fn is_terminal(&self) -> bool {
        self.status != MatchStatus::InProgress
    }

    /// Submit a move for the player to move. `Ok` carries the status the
    /// match is in after the move; any rejection leaves every part of
    /// the state untouched.
    pub fn submit_move(&mut self, x: i32, y: i32) -> Result<MatchStatus, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        self.board
            .place(x, y, self.current_player.to_cell())
            .map_err(|e| match e {
                PlaceError::Occupied => MoveError::Occupied,
                PlaceError::OutOfBounds => MoveError::OutOfBounds,
            })?;

        self.move_count += 1;
        debug!(x, y, player = self.current_player.name(), "move accepted");

        if self.board.has_win(self.current_player.to_cell()) {
            self.status = MatchStatus::Won(self.current_player);
            info!(winner = self.current_player.name(), "five in a row");
        } else if self.board.is_full() {
            self.status = MatchStatus::Draw;
            info!("board full, draw");
        } else {
            // The mover keeps its identity in `Won`; only switch turns
            // while the game is still running.
            self.current_player = self.current_player.other();
        }

        Ok(self.status)
    }

    /// Advance the current player's clock by a wall-clock delta. Safe to
    /// call at any frequency; non-positive deltas and ticks after the
    /// game ended are no-ops.
    pub fn advance_time(&mut self, elapsed_secs: f64) {
        if self.is_terminal() {
            return;
        }

        if self.clock.deduct(self.current_player, elapsed_secs) {
            let winner = self.current_player.other();
            self.status = MatchStatus::TimedOut(winner);
            info!(
                loser = self.current_player.name(),
                winner = winner.name(),
                "flag fell"
            );
        }
    }

    /// Start over: empty board, player 1 to move, full clocks.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.current_player = Player::Cross;
        self.status = MatchStatus::InProgress;
        self.move_count = 0;
        self.clock.reset(self.budget_secs);
        info!("match reset");
    }
}
