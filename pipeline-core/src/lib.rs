//! Pipeline Core
//!
//! The token-dispatch bridge between a scanner and a parsing automaton, its
//! configuration, and a driver that runs one into the other.

pub mod bridge;
pub mod config;
pub mod pipeline;

pub use bridge::TokenBridge;
pub use config::{BridgeConfig, LOG_LEXEMES_VERBOSITY};
pub use pipeline::{Pipeline, PipelineError};
