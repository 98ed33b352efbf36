/*
 * Chess rules engine - library entry
 *
 * Modules
 * - board: squares, piece tokens, the 64-cell board and piece identifiers
 * - constant: lazily built lookup tables (square names, FEN letters, back rank order)
 * - movegen: per-piece destination generators
 * - rules: occupancy predicates (same-color capture, path blocking)
 * - engine: move orchestration, the only place a board is replaced
 * - error: caller-contract errors
 */
pub mod board;
pub mod constant;
pub mod engine;
pub mod error;
pub mod movegen;
pub mod rules;

pub use board::{Board, Chess, ChessType, PieceId, Player, Square};
pub use engine::{attempt_move, Engine, MoveOutcome, Rejection};
pub use error::{EngineError, EngineResult};
