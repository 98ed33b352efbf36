//! Errors raised when a caller breaks the engine's input contract.
//!
//! Illegal moves are not errors: they come back as
//! [`MoveOutcome::Rejected`](crate::engine::MoveOutcome::Rejected).

use thiserror::Error;

use crate::board::{PieceId, Player};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The identifier does not name a piece kind, or its instance number is malformed
    #[error("unknown piece `{0}`")]
    UnknownPiece(String),

    /// A multi-instance kind was named without its instance number
    #[error("`{identifier}` is ambiguous, add an instance number (e.g. `{identifier}1`)")]
    AmbiguousPiece { identifier: String },

    /// No live piece of the mover matches the identifier
    #[error("{player} has no piece `{piece}` on the board")]
    PieceNotFound { player: Player, piece: PieceId },

    #[error("unknown square `{0}`")]
    UnknownSquare(String),

    #[error("square index {0} is outside the board (must be 0-63)")]
    SquareOutOfBounds(usize),

    #[error("invalid FEN placement `{fen}`: {reason}")]
    InvalidFen { fen: String, reason: String },
}

pub type EngineResult<T> = Result<T, EngineError>;
