use thiserror::Error;

/// Errors raised by the bracket engine.
///
/// The input variants are recoverable and surfaced to the caller as rejected
/// requests. `Corrupt` means persisted state violates an engine invariant
/// (bug upstream or tampered rows); it aborts the operation and must never
/// be patched over.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("tournament needs at least two entrants, got {0}")]
    EntrantCount(i64),

    #[error("invalid round {0}")]
    Round(i32),

    #[error("slot {slot} out of range for round {round}")]
    Slot { round: i32, slot: i32 },

    #[error("participant {fid} outside [1, {total}]")]
    Participant { fid: i64, total: i64 },

    #[error("corrupt match state: {0}")]
    Corrupt(String),
}

impl GameError {
    pub fn is_corrupt(&self) -> bool {
        matches!(self, GameError::Corrupt(_))
    }
}
