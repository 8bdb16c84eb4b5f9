//! Minesweeper board/game engine with terminal shells.
//!
//! The engine ([`Board`], [`Cell`], [`Game`]) is presentation-agnostic:
//! shells feed it coordinates and re-read the grid after each move. The
//! crate ships two such shells, a line-command console loop and a
//! ratatui TUI.

pub mod board;
pub mod cell;
pub mod error;
pub mod game;
pub mod tui;

pub use board::{Board, Difficulty, RevealOutcome};
pub use cell::{Cell, Content, Visibility};
pub use error::Error;
pub use game::Game;
