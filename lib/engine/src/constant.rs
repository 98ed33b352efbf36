use crate::board::{ChessType, Player, Square};
use std::{collections::HashMap, sync::LazyLock};

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

pub const BACK_RANK: [ChessType; 8] = [
    ChessType::Rook,
    ChessType::Knight,
    ChessType::Bishop,
    ChessType::Queen,
    ChessType::King,
    ChessType::Bishop,
    ChessType::Knight,
    ChessType::Rook,
];

// a8, b8, ..., h8, a7, ..., h1
pub static SQUARE_NAMES: LazyLock<Vec<String>> = LazyLock::new(|| {
    (1..=8)
        .rev()
        .flat_map(|rank| ('a'..='h').map(move |file| format!("{file}{rank}")))
        .collect()
});

pub static SQUARE_INDEX: LazyLock<HashMap<&'static str, Square>> = LazyLock::new(|| {
    SQUARE_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), Square(i as u8)))
        .collect::<HashMap<_, _>>()
});

pub static FEN_MAP: LazyLock<HashMap<char, (Player, ChessType)>> = LazyLock::new(|| {
    HashMap::from([
        ('k', (Player::Black, ChessType::King)),
        ('q', (Player::Black, ChessType::Queen)),
        ('r', (Player::Black, ChessType::Rook)),
        ('b', (Player::Black, ChessType::Bishop)),
        ('n', (Player::Black, ChessType::Knight)),
        ('p', (Player::Black, ChessType::Pawn)),
        ('K', (Player::White, ChessType::King)),
        ('Q', (Player::White, ChessType::Queen)),
        ('R', (Player::White, ChessType::Rook)),
        ('B', (Player::White, ChessType::Bishop)),
        ('N', (Player::White, ChessType::Knight)),
        ('P', (Player::White, ChessType::Pawn)),
    ])
});
