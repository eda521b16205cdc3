//! Error kinds surfaced by the engine.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// Malformed FEN input; only ever produced by the FEN reader.
    #[error("invalid fen string")]
    InvalidFen,

    /// A search was requested while another one is still running.
    #[error("engine already running")]
    EngineBusy,
}
