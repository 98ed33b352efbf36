//! Occupancy predicates.
//!
//! Everything here reads a board and answers yes/no; nothing mutates. Geometry is done on
//! file/rank coordinates rather than raw indices so board edges never wrap.

use crate::board::{Board, Chess, Player, Square};

/// `square` holds a piece owned by `player`.
pub fn is_friendly(board: &Board, square: Square, player: Player) -> bool {
    board.chess_at(square).belong_to(player)
}

/// The piece that used to stand on the destination belongs to the mover.
pub fn is_same_color_capture(replaced: Chess, player: Player) -> bool {
    replaced.belong_to(player)
}

/// Squares strictly between `from` and `to` along a file, rank or diagonal.
///
/// `None` when the two squares share no line at all.
pub fn squares_between(from: Square, to: Square) -> Option<Vec<Square>> {
    let d_file = to.file() - from.file();
    let d_rank = to.rank() - from.rank();
    if d_file != 0 && d_rank != 0 && d_file.abs() != d_rank.abs() {
        return None;
    }
    let (step_file, step_rank) = (d_file.signum(), d_rank.signum());
    let distance = d_file.abs().max(d_rank.abs());
    (1..distance)
        .map(|i| Square::from_file_rank(from.file() + step_file * i, from.rank() + step_rank * i))
        .collect()
}

// Any piece, of either color, in the open interval blocks; an unaligned pair is never a path
pub fn is_path_blocked(board: &Board, from: Square, to: Square) -> bool {
    match squares_between(from, to) {
        Some(squares) => squares.into_iter().any(|square| !board.chess_at(square).is_none()),
        None => true,
    }
}
