/* Move orchestrator: resolves the piece, simulates the move on a scratch board and commits only when every check passes */
use std::fmt;

use tracing::{debug, info};

use crate::board::{square_of, Board, Chess, ChessType, PieceId, Player, Square};
use crate::error::EngineResult;
use crate::movegen::generate_move_for_chess_type;
use crate::rules::{is_path_blocked, is_same_color_capture};

/// Why a move was refused. Checks run in declaration order and the first failure wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    SameColorCapture,
    PathBlocked,
    Unreachable,
    KingCapture,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Rejection::SameColorCapture => "the square holds one of your own pieces",
            Rejection::PathBlocked => "the path is blocked",
            Rejection::Unreachable => "the piece does not move that way",
            Rejection::KingCapture => "kings cannot be captured",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Accepted {
        board: Board,
        origin: Square,
        destination: Square,
        captured: Option<Chess>,
    },
    Rejected {
        piece: PieceId,
        destination: Square,
        reason: Rejection,
    },
}

impl MoveOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, MoveOutcome::Accepted { .. })
    }
}

impl fmt::Display for MoveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveOutcome::Accepted {
                origin,
                destination,
                captured,
                ..
            } => {
                write!(f, "{origin} -> {destination}")?;
                if let Some(captured) = captured {
                    write!(f, ", captured {captured}")?;
                }
                Ok(())
            }
            MoveOutcome::Rejected {
                piece,
                destination,
                reason,
            } => write!(f, "{piece} can't move to {destination}: {reason}"),
        }
    }
}

fn rejected(piece: PieceId, destination: Square, reason: Rejection) -> MoveOutcome {
    debug!(%piece, %destination, %reason, "move rejected");
    MoveOutcome::Rejected {
        piece,
        destination,
        reason,
    }
}

/// Tries `player`'s `piece` on `destination` against `board`.
///
/// `board` itself is never touched: an accepted move hands back the updated copy. Errors
/// are reserved for identifiers that do not resolve to a live piece of `player`.
pub fn attempt_move(board: &Board, player: Player, piece: PieceId, destination: Square) -> EngineResult<MoveOutcome> {
    // resolve
    let origin = board.locate(piece.token(player))?;
    debug!(%player, %piece, %origin, %destination, "piece resolved");

    // provisionally apply on a scratch copy
    let mut scratch = board.clone();
    scratch.swap(origin, destination);
    let replaced = scratch.chess_at(origin);

    if is_same_color_capture(replaced, player) {
        return Ok(rejected(piece, destination, Rejection::SameColorCapture));
    }
    if piece.kind.is_sliding() && is_path_blocked(&scratch, origin, destination) {
        return Ok(rejected(piece, destination, Rejection::PathBlocked));
    }
    // reachability is judged on the position before the move
    if !generate_move_for_chess_type(board, piece.kind, player, origin).contains(&destination) {
        return Ok(rejected(piece, destination, Rejection::Unreachable));
    }
    if replaced.chess_type() == Some(ChessType::King) {
        return Ok(rejected(piece, destination, Rejection::KingCapture));
    }

    // the exchanged-out enemy piece is captured, not kept on the origin square
    let captured = (!replaced.is_none()).then_some(replaced);
    scratch.set_chess(origin, Chess::None);
    info!(%player, %piece, %origin, %destination, captured = captured.is_some(), "move accepted");
    Ok(MoveOutcome::Accepted {
        board: scratch,
        origin,
        destination,
        captured,
    })
}

/// Owns the canonical board between moves.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    pub board: Board,
    // (previous square, current square) of the last accepted move
    pub last_move: Option<(Square, Square)>,
}

impl Engine {
    pub fn new() -> Self {
        Engine::default()
    }

    pub fn with_board(board: Board) -> Self {
        Engine { board, last_move: None }
    }

    /// Parses `piece` and `destination`, runs [`attempt_move`] and commits an accepted move.
    pub fn attempt_move(&mut self, player: Player, piece: &str, destination: &str) -> EngineResult<MoveOutcome> {
        let piece: PieceId = piece.parse()?;
        let destination = square_of(destination)?;
        let outcome = attempt_move(&self.board, player, piece, destination)?;
        if let MoveOutcome::Accepted {
            board,
            origin,
            destination,
            ..
        } = &outcome
        {
            self.board = board.clone();
            self.last_move = Some((*origin, *destination));
        }
        Ok(outcome)
    }

    /// Every destination `piece` could be moved to right now, in a8..h1 order.
    pub fn valid_moves(&self, player: Player, piece: &str) -> EngineResult<Vec<Square>> {
        let piece: PieceId = piece.parse()?;
        let origin = self.board.locate(piece.token(player))?;
        let mut moves = vec![];
        for target in generate_move_for_chess_type(&self.board, piece.kind, player, origin) {
            if attempt_move(&self.board, player, piece, target)?.is_accepted() {
                moves.push(target);
            }
        }
        moves.sort();
        Ok(moves)
    }
}

#[cfg(test)]
mod tests {
    use crate::board::*;
    use crate::engine::*;
    use crate::error::EngineError;

    fn sq(name: &str) -> Square {
        square_of(name).unwrap()
    }

    #[test]
    fn test_accepted_move_updates_board() {
        let mut engine = Engine::new();
        let outcome = engine.attempt_move(Player::White, "p5", "e4").unwrap();
        assert!(outcome.is_accepted());
        assert_eq!(engine.board.chess_at(sq("e4")), Chess::White(ChessType::Pawn, 5));
        assert!(engine.board.chess_at(sq("e2")).is_none());
        assert_eq!(engine.last_move, Some((sq("e2"), sq("e4"))));
        assert_eq!(engine.board.piece_count(), 32);
    }

    #[test]
    fn test_rejection_leaves_board_untouched() {
        let mut engine = Engine::new();
        let before = engine.board.clone();
        let outcome = engine.attempt_move(Player::White, "r1", "a4").unwrap();
        assert_eq!(
            outcome,
            MoveOutcome::Rejected {
                piece: PieceId::new(ChessType::Rook, 1),
                destination: sq("a4"),
                reason: Rejection::PathBlocked,
            }
        );
        assert_eq!(engine.board, before);
        assert_eq!(engine.last_move, None);
        assert_eq!(outcome.to_string(), "r1 can't move to a4: the path is blocked");
    }

    #[test]
    fn test_checks_run_in_order() {
        let board = Board::init();
        // own piece on the destination beats the blocked path
        let outcome = attempt_move(&board, Player::White, PieceId::new(ChessType::Rook, 1), sq("a2")).unwrap();
        assert!(matches!(outcome, MoveOutcome::Rejected { reason: Rejection::SameColorCapture, .. }));
        // staying put is a same-color capture of itself
        let outcome = attempt_move(&board, Player::White, PieceId::new(ChessType::Knight, 1), sq("b1")).unwrap();
        assert!(matches!(outcome, MoveOutcome::Rejected { reason: Rejection::SameColorCapture, .. }));
        // no shared rank, file or diagonal means no path at all
        let outcome = attempt_move(&board, Player::White, PieceId::new(ChessType::Rook, 2), sq("g3")).unwrap();
        assert!(matches!(outcome, MoveOutcome::Rejected { reason: Rejection::PathBlocked, .. }));
        let outcome = attempt_move(&board, Player::White, PieceId::new(ChessType::Pawn, 1), sq("a5")).unwrap();
        assert!(matches!(outcome, MoveOutcome::Rejected { reason: Rejection::Unreachable, .. }));
    }

    #[test]
    fn test_capture_removes_piece() {
        let board = Board::from_fen("4k3/8/8/8/3p4/8/8/3RK3").unwrap();
        let outcome = attempt_move(&board, Player::White, PieceId::new(ChessType::Rook, 1), sq("d4")).unwrap();
        let MoveOutcome::Accepted { board: after, origin, captured, .. } = outcome else {
            panic!("capture should be accepted");
        };
        assert_eq!(origin, sq("d1"));
        assert_eq!(captured, Some(Chess::Black(ChessType::Pawn, 1)));
        assert!(after.chess_at(sq("d1")).is_none());
        assert_eq!(after.chess_at(sq("d4")), Chess::White(ChessType::Rook, 1));
        assert_eq!(after.piece_count(), board.piece_count() - 1);
    }

    #[test]
    fn test_king_cannot_be_captured() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/4RK2").unwrap();
        let outcome = attempt_move(&board, Player::White, PieceId::new(ChessType::Rook, 1), sq("e8")).unwrap();
        assert!(matches!(outcome, MoveOutcome::Rejected { reason: Rejection::KingCapture, .. }));
    }

    #[test]
    fn test_resolution_errors() {
        let mut engine = Engine::new();
        assert_eq!(
            engine.attempt_move(Player::White, "r", "a3"),
            Err(EngineError::AmbiguousPiece { identifier: "r".into() })
        );
        assert_eq!(
            engine.attempt_move(Player::White, "r1", "z9"),
            Err(EngineError::UnknownSquare("z9".into()))
        );
        let mut engine = Engine::with_board(Board::from_fen("4k3/8/8/8/8/8/8/4K3").unwrap());
        assert_eq!(
            engine.attempt_move(Player::Black, "q", "d8"),
            Err(EngineError::PieceNotFound {
                player: Player::Black,
                piece: PieceId::new(ChessType::Queen, 1),
            })
        );
    }

    #[test]
    fn test_valid_moves() {
        let engine = Engine::new();
        assert_eq!(engine.valid_moves(Player::White, "n1").unwrap(), vec![sq("a3"), sq("c3")]);
        assert_eq!(engine.valid_moves(Player::Black, "p4").unwrap(), vec![sq("d6"), sq("d5")]);
        assert!(engine.valid_moves(Player::White, "r2").unwrap().is_empty());
        assert!(engine.valid_moves(Player::White, "q").unwrap().is_empty());
    }
}
