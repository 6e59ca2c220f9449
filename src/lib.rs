//! model-2048: rules engine for the 2048 sliding-tile puzzle
//!
//! This crate provides:
//! - A square `Grid` with rotation-based slides in all four directions (`engine` module)
//! - A stateful `Board` with score, max tile, undo history and seeded spawns
//! - A greedy auto-player ranking moves by `MoveEfficiency` (`auto` module)
//! - Tile colour lookups for drivers that draw the grid (`palette` module)
//!
//! Quick start:
//! ```
//! use model_2048::engine::{Board, Move};
//! use model_2048::GameConfig;
//!
//! // Deterministic board with two random tiles
//! let mut board = Board::with_config(&GameConfig::seeded(42)).unwrap();
//! board.apply_move(Move::Left);
//! board.auto_move();
//! board.rollback();
//! assert!(board.can_move());
//! ```
//!
//! Full loop (simplest possible)
//! ```
//! use model_2048::engine::Board;
//! use model_2048::GameConfig;
//!
//! let mut board = Board::with_config(&GameConfig::seeded(123)).unwrap();
//! while board.auto_move().is_some() {}
//! assert!(!board.can_move());
//! println!("score {} max tile {}{}", board.score(), board.max_tile(), board.grid());
//! ```
//!
pub mod auto;
pub mod config;
pub mod engine;
pub mod palette;

pub use config::{ConfigError, GameConfig};
