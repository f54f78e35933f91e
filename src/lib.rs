//! Admin backend for the customer suggestion board.

pub mod board;
pub mod config;
pub mod error;
pub mod telemetry;
