//! Weighted move pool for tic-tac-toe style learning agents
//!
//! This crate provides:
//! - A weighted random selector over the nine board cells with
//!   reward/penalty feedback on the last draw
//! - Board rotation so one learned weight table serves all four orientations
//! - Text and binary persistence of the move history

pub mod config;
pub mod error;
pub mod persistence;
pub mod pool;
pub mod types;
pub mod utils;

pub use config::SelectorConfig;
pub use error::{Error, Result};
pub use pool::WeightedStepSelector;
pub use types::{MoveId, Rotation};
