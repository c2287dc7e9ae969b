//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has **zero dependencies** on UI, networking, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games (local battles rely on it)
//! - **Testable**: Unit tests for every rule, property tests for the board
//! - **Portable**: Can run under any front end or headless
//!
//! # Module Structure
//!
//! - [`board`]: grid with collision detection, line clearing and garbage injection
//! - [`game_state`]: one player's engine: active piece, hold, preview, timing
//! - [`pieces`]: tetromino shape table and the one-column wall kick order
//! - [`rng`]: 7-bag random piece generation over an injectable random source
//! - [`scoring`]: line clear points, level, gravity and attack size
//! - [`snapshot`]: read-only engine state for renderers and the sync codec
//! - [`battle`]: two engines on one machine with attacks routed between them
//!
//! # Game Rules
//!
//! - **7-Bag Randomizer**: every run of seven pieces from a fresh bag holds each kind once
//! - **Rotation**: clockwise only; tries in place, then one column right, then left
//! - **Lock Delay**: 500ms once gravity is blocked; blocked ticks don't extend it
//! - **Hold**: store one piece for later use (once per piece)
//! - **Scoring**: 100/300/500/800 per level for 1-4 lines; drops score nothing
//! - **Attack**: clearing k > 1 lines sends k - 1 garbage rows to the opponent
//!
//! # Example
//!
//! ```
//! use duel_tetris_core::GameState;
//! use duel_tetris_types::GameAction;
//!
//! // Create and start a game
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! // Apply game actions
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! // Drops alone never score
//! assert_eq!(game.score(), 0);
//! assert!(!game.game_over());
//! ```
//!
//! # Timing
//!
//! There is no clock in here. The caller measures time and reports it:
//! - **Gravity**: 1000ms at level 1, 100ms faster per level, floor 100ms
//! - **Lock Delay**: 500ms when piece is grounded
//!
//! Call [`GameState::tick`](game_state::GameState::tick) every frame with elapsed time.

pub mod battle;
pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use duel_tetris_types as types;

// Re-export commonly used types for convenience
pub use battle::{LocalBattle, Side};
pub use board::Board;
pub use game_state::{EngineEvent, EnginePhase, GameState, Tetromino};
pub use pieces::{cells_of, cells_of_id};
pub use rng::{Bag, RandomSource, SimpleRng};
pub use scoring::{attack_for_lines, drop_interval_ms, level_for_score, line_clear_score};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
