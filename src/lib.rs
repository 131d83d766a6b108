//! Tavli rules engine library.
//!
//! Exposes the board representation, move generation, dice matching, and
//! protocol modules for use by integration tests and front-ends.

pub mod board;
pub mod dice;
pub mod error;
pub mod matcher;
pub mod movegen;
pub mod protocol;

pub use error::EngineError;
