//! Piece move generators
//!
//! Every piece kind turns one origin square into the set of squares it can reach. The
//! generators only read the board:
//!
//! - king and knight: fixed offsets, bounds checked, occupancy ignored
//! - rook, bishop, queen: one shared ray caster over a direction set; a ray stops at the
//!   first occupied square, keeping it when it holds an enemy piece
//! - pawn: one step forward, two from the home rank when the first step is empty
//!
//! Output order carries no meaning and a square never appears twice.

use crate::board::{Board, ChessType, Player, Square};
use crate::rules::is_friendly;

// (row, col) deltas; row grows toward rank 1
pub const ROOK_DIRS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, 1), (0, -1)];

pub const BISHOP_DIRS: [(i32, i32); 4] = [(-1, 1), (-1, -1), (1, 1), (1, -1)];

pub const QUEEN_DIRS: [(i32, i32); 8] = [
    (-1, 0),
    (1, 0),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, -1),
    (1, 1),
    (1, -1),
];

pub const KING_STEPS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub const KNIGHT_DELTAS: [(i32, i32); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Squares a `ct` owned by `player` standing on `from` can reach.
pub fn generate_move_for_chess_type(board: &Board, ct: ChessType, player: Player, from: Square) -> Vec<Square> {
    match ct {
        ChessType::King => steps(from, &KING_STEPS),
        ChessType::Queen => slide(board, player, from, &QUEEN_DIRS),
        ChessType::Rook => slide(board, player, from, &ROOK_DIRS),
        ChessType::Bishop => slide(board, player, from, &BISHOP_DIRS),
        ChessType::Knight => steps(from, &KNIGHT_DELTAS),
        ChessType::Pawn => pawn_moves(board, player, from),
    }
}

fn steps(from: Square, deltas: &[(i32, i32)]) -> Vec<Square> {
    deltas
        .iter()
        .filter_map(|&(d_row, d_col)| from.offset(d_row, d_col))
        .collect()
}

/// Casts one ray per direction until the edge or the first occupied square.
pub fn slide(board: &Board, player: Player, from: Square, dirs: &[(i32, i32)]) -> Vec<Square> {
    let mut targets = vec![];
    for &(d_row, d_col) in dirs {
        let mut current = from;
        while let Some(next) = current.offset(d_row, d_col) {
            if is_friendly(board, next, player) {
                break;
            }
            targets.push(next);
            if !board.chess_at(next).is_none() {
                // enemy piece: capturable, but the ray ends here
                break;
            }
            current = next;
        }
    }
    targets
}

fn pawn_moves(board: &Board, player: Player, from: Square) -> Vec<Square> {
    let mut targets = vec![];
    let forward = player.forward();
    let Some(one) = from.offset(forward, 0) else {
        return targets;
    };
    if !is_friendly(board, one, player) {
        targets.push(one);
    }
    if from.row() == player.home_row() && board.chess_at(one).is_none() {
        if let Some(two) = one.offset(forward, 0) {
            if !is_friendly(board, two, player) {
                targets.push(two);
            }
        }
    }
    targets
}
