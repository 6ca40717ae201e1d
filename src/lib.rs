//! # Blitz Gomoku
//!
//! Five-in-a-row on a 10x10 board for two players, each on a chess
//! clock. Runs in the terminal with Ratatui; place marks with the mouse
//! or the keyboard cursor.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, players, chess clocks, match
//!   state machine
//! - [`ui`] — Terminal UI: event loop, rendering, input mapping
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod ui;
