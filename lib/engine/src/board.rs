/*
 * Board model - squares, piece tokens and the 64-cell board
 *
 * Design points
 * - 8 x 8 board stored row-major: index 0 is a8, index 63 is h1, white at the bottom
 * - Chess is one cell: White/Black carry the piece kind and its instance id, Chess::None is empty
 * - ChessType is the closed set of piece kinds, Player the two sides
 * - Square wraps a 0..63 index; its name comes from the notation table in `constant`
 * - PieceId is what a player types to name one of their pieces (`r1`, `n2`, `p5`, `q`)
 *
 * Main operations
 * - standard starting layout, empty board, FEN placement in and out
 * - locate a token, read/write a cell, raw swap of two cells
 *
 * Nothing here checks legality, that is the job of `rules`, `movegen` and `engine`.
 */

use std::fmt;
use std::str::FromStr;

use crate::constant::{BACK_RANK, FEN_MAP, SQUARE_INDEX, SQUARE_NAMES};
use crate::error::{EngineError, EngineResult};

pub const BOARD_WIDTH: i32 = 8;
pub const BOARD_HEIGHT: i32 = 8;
pub const BOARD_SIZE: usize = (BOARD_WIDTH * BOARD_HEIGHT) as usize;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Chess {
    White(ChessType, u8),
    Black(ChessType, u8),
    None,
}

impl Chess {
    pub fn new(player: Player, chess_type: ChessType, instance: u8) -> Chess {
        match player {
            Player::White => Chess::White(chess_type, instance),
            Player::Black => Chess::Black(chess_type, instance),
        }
    }
    pub fn belong_to(&self, player: Player) -> bool {
        Some(player) == self.player()
    }
    pub fn chess_type(&self) -> Option<ChessType> {
        match self {
            Chess::White(ct, _) | Chess::Black(ct, _) => Some(*ct),
            Chess::None => None,
        }
    }
    pub fn player(&self) -> Option<Player> {
        match self {
            Chess::White(..) => Some(Player::White),
            Chess::Black(..) => Some(Player::Black),
            Chess::None => None,
        }
    }
    pub fn instance(&self) -> Option<u8> {
        match self {
            Chess::White(_, id) | Chess::Black(_, id) => Some(*id),
            Chess::None => None,
        }
    }
    pub fn is_none(&self) -> bool {
        *self == Chess::None
    }
    // Identifier the owner would type for this piece
    pub fn piece_id(&self) -> Option<PieceId> {
        Some(PieceId::new(self.chess_type()?, self.instance()?))
    }
    pub fn fen_char(&self) -> Option<char> {
        let letter = self.chess_type()?.letter();
        match self {
            Chess::White(..) => Some(letter.to_ascii_uppercase()),
            _ => Some(letter),
        }
    }
    pub fn glyph(&self) -> Option<char> {
        Some(self.chess_type()?.glyph(self.player()?))
    }
}

impl fmt::Display for Chess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.player(), self.piece_id()) {
            (Some(player), Some(id)) => write!(f, "{player} {} ({id})", id.kind.name_value()),
            _ => f.write_str("empty"),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum ChessType {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl ChessType {
    pub fn value(&self) -> usize {
        match self {
            ChessType::King => 0,
            ChessType::Queen => 1,
            ChessType::Rook => 2,
            ChessType::Bishop => 3,
            ChessType::Knight => 4,
            ChessType::Pawn => 5,
        }
    }

    pub fn letter(&self) -> char {
        match self {
            ChessType::King => 'k',
            ChessType::Queen => 'q',
            ChessType::Rook => 'r',
            ChessType::Bishop => 'b',
            ChessType::Knight => 'n',
            ChessType::Pawn => 'p',
        }
    }

    pub fn name_value(&self) -> &'static str {
        match self {
            ChessType::King => "king",
            ChessType::Queen => "queen",
            ChessType::Rook => "rook",
            ChessType::Bishop => "bishop",
            ChessType::Knight => "knight",
            ChessType::Pawn => "pawn",
        }
    }

    pub fn glyph(&self, player: Player) -> char {
        match (player, self) {
            (Player::White, ChessType::King) => '♔',
            (Player::White, ChessType::Queen) => '♕',
            (Player::White, ChessType::Rook) => '♖',
            (Player::White, ChessType::Bishop) => '♗',
            (Player::White, ChessType::Knight) => '♘',
            (Player::White, ChessType::Pawn) => '♙',
            (Player::Black, ChessType::King) => '♚',
            (Player::Black, ChessType::Queen) => '♛',
            (Player::Black, ChessType::Rook) => '♜',
            (Player::Black, ChessType::Bishop) => '♝',
            (Player::Black, ChessType::Knight) => '♞',
            (Player::Black, ChessType::Pawn) => '♟',
        }
    }

    /// Rook, bishop and queen move along rays and can be blocked mid-path.
    pub fn is_sliding(&self) -> bool {
        matches!(self, ChessType::Queen | ChessType::Rook | ChessType::Bishop)
    }

    /// King and queen start as a single instance, so their identifier may omit the number.
    pub fn is_unique(&self) -> bool {
        matches!(self, ChessType::King | ChessType::Queen)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Player {
    White,
    Black,
}

impl Player {
    pub fn value(&self) -> usize {
        if self == &Player::White { 0 } else { 1 }
    }
    pub fn next(&self) -> Player {
        if self == &Player::White {
            Player::Black
        } else {
            Player::White
        }
    }
    // Row delta of a pawn step: white walks toward row 0 (rank 8)
    pub fn forward(&self) -> i32 {
        if self == &Player::White { -1 } else { 1 }
    }
    // Row the pawns start on
    pub fn home_row(&self) -> i32 {
        if self == &Player::White {
            BOARD_HEIGHT - 2
        } else {
            1
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Player::White => "white",
            Player::Black => "black",
        })
    }
}

/// A board square, `0` is a8 and `63` is h1.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct Square(pub(crate) u8);

// Square is inside the 8 x 8 board
pub fn in_board(row: i32, col: i32) -> bool {
    (0..BOARD_HEIGHT).contains(&row) && (0..BOARD_WIDTH).contains(&col)
}

impl Square {
    pub fn new(row: i32, col: i32) -> Option<Square> {
        in_board(row, col).then(|| Square((row * BOARD_WIDTH + col) as u8))
    }

    pub fn from_index(index: usize) -> EngineResult<Square> {
        if index < BOARD_SIZE {
            Ok(Square(index as u8))
        } else {
            Err(EngineError::SquareOutOfBounds(index))
        }
    }

    /// `file` 0..=7 for a..h, `rank` 1..=8.
    pub fn from_file_rank(file: i32, rank: i32) -> Option<Square> {
        Square::new(BOARD_HEIGHT - rank, file)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
    pub fn row(self) -> i32 {
        self.0 as i32 / BOARD_WIDTH
    }
    pub fn col(self) -> i32 {
        self.0 as i32 % BOARD_WIDTH
    }
    pub fn file(self) -> i32 {
        self.col()
    }
    pub fn rank(self) -> i32 {
        BOARD_HEIGHT - self.row()
    }

    pub fn name(self) -> &'static str {
        name_of(self)
    }

    pub fn offset(self, d_row: i32, d_col: i32) -> Option<Square> {
        Square::new(self.row() + d_row, self.col() + d_col)
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE as u8).map(Square)
    }
}

pub fn square_of(name: &str) -> EngineResult<Square> {
    let name = name.trim().to_ascii_lowercase();
    SQUARE_INDEX
        .get(name.as_str())
        .copied()
        .ok_or(EngineError::UnknownSquare(name))
}

pub fn name_of(square: Square) -> &'static str {
    SQUARE_NAMES[square.index()].as_str()
}

impl FromStr for Square {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        square_of(s)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a player types to name one of their own pieces.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct PieceId {
    pub kind: ChessType,
    pub instance: u8,
}

impl PieceId {
    pub fn new(kind: ChessType, instance: u8) -> Self {
        PieceId { kind, instance }
    }
    pub fn token(self, player: Player) -> Chess {
        Chess::new(player, self.kind, self.instance)
    }
}

impl FromStr for PieceId {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let identifier = s.trim().to_lowercase();
        let mut chars = identifier.chars();
        let kind = chars
            .next()
            .and_then(|letter| FEN_MAP.get(&letter))
            .map(|(_, ct)| *ct)
            .ok_or_else(|| EngineError::UnknownPiece(identifier.clone()))?;

        let number = chars.as_str();
        let instance = if number.is_empty() {
            if !kind.is_unique() {
                return Err(EngineError::AmbiguousPiece { identifier });
            }
            1
        } else {
            if !number.bytes().all(|b| b.is_ascii_digit()) {
                return Err(EngineError::UnknownPiece(identifier));
            }
            number
                .parse::<u8>()
                .ok()
                .filter(|n| *n >= 1)
                .ok_or_else(|| EngineError::UnknownPiece(identifier.clone()))?
        };
        Ok(PieceId { kind, instance })
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind.is_unique() && self.instance == 1 {
            write!(f, "{}", self.kind.letter())
        } else {
            write!(f, "{}{}", self.kind.letter(), self.instance)
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    // a8..h8, a7..h7, ..., a1..h1
    pub chesses: [Chess; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Board::init()
    }
}

impl Board {
    // Standard opening layout; rooks, knights and bishops are numbered 1 on the queen side
    // and 2 on the king side, pawns 1..8 from file a to h
    pub fn init() -> Self {
        let mut board = Board::empty();
        for (col, ct) in BACK_RANK.iter().enumerate() {
            let col = col as i32;
            let instance = if ct.is_unique() || col < 4 { 1 } else { 2 };
            for (player, row) in [(Player::Black, 0), (Player::White, BOARD_HEIGHT - 1)] {
                if let Some(square) = Square::new(row, col) {
                    board.set_chess(square, Chess::new(player, *ct, instance));
                }
            }
            for player in [Player::Black, Player::White] {
                if let Some(square) = Square::new(player.home_row(), col) {
                    board.set_chess(square, Chess::new(player, ChessType::Pawn, col as u8 + 1));
                }
            }
        }
        board
    }

    pub fn empty() -> Self {
        Board {
            chesses: [Chess::None; BOARD_SIZE],
        }
    }

    /// Builds a board from the placement field of a FEN string (anything after the first
    /// space is ignored). Instance ids are handed out in a8..h1 scan order per side and kind.
    /// Each side must have exactly one king.
    pub fn from_fen(fen: &str) -> EngineResult<Self> {
        let invalid = |reason: &str| EngineError::InvalidFen {
            fen: fen.to_owned(),
            reason: reason.to_owned(),
        };
        let placement = fen.split_whitespace().next().ok_or_else(|| invalid("empty"))?;

        let mut board = Board::empty();
        let mut counters = [[0u8; 6]; 2];
        let rows = placement.split('/').collect::<Vec<_>>();
        if rows.len() != BOARD_HEIGHT as usize {
            return Err(invalid("expected 8 ranks"));
        }
        for (i, row) in rows.iter().enumerate() {
            let mut j = 0;
            for ch in row.chars() {
                if let Some(skip) = ch.to_digit(10) {
                    if skip == 0 || skip > BOARD_WIDTH as u32 {
                        return Err(invalid("empty-square run must be 1-8"));
                    }
                    j += skip as i32;
                } else {
                    let (player, ct) = FEN_MAP.get(&ch).ok_or_else(|| invalid("unknown piece letter"))?;
                    let square = Square::new(i as i32, j).ok_or_else(|| invalid("rank longer than 8 squares"))?;
                    let counter = &mut counters[player.value()][ct.value()];
                    *counter += 1;
                    board.set_chess(square, Chess::new(*player, *ct, *counter));
                    j += 1;
                }
            }
            if j != BOARD_WIDTH {
                return Err(invalid("every rank must cover 8 squares"));
            }
        }
        if counters.iter().any(|side| side[ChessType::King.value()] != 1) {
            return Err(invalid("each side needs exactly one king"));
        }
        Ok(board)
    }

    pub fn fen(&self) -> String {
        let mut fen = String::new();
        for (i, row) in self.chesses.chunks(BOARD_WIDTH as usize).enumerate() {
            if i > 0 {
                fen.push('/');
            }
            let mut empty = 0;
            for chess in row {
                match chess.fen_char() {
                    Some(ch) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(ch);
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
        }
        fen
    }

    pub fn chess_at(&self, square: Square) -> Chess {
        self.chesses[square.index()]
    }

    pub fn set_chess(&mut self, square: Square, chess: Chess) {
        self.chesses[square.index()] = chess;
    }

    // Raw exchange of two cells, no rules involved
    pub fn swap(&mut self, a: Square, b: Square) {
        self.chesses.swap(a.index(), b.index());
    }

    /// Square currently holding `token`.
    pub fn locate(&self, token: Chess) -> EngineResult<Square> {
        let not_found = || match (token.player(), token.piece_id()) {
            (Some(player), Some(piece)) => EngineError::PieceNotFound { player, piece },
            _ => EngineError::UnknownPiece(token.to_string()),
        };
        if token.is_none() {
            return Err(not_found());
        }
        self.chesses
            .iter()
            .position(|chess| *chess == token)
            .ok_or_else(not_found)
            .and_then(Square::from_index)
    }

    pub fn pieces(&self, player: Player) -> impl Iterator<Item = (Square, Chess)> + '_ {
        Square::all()
            .map(move |square| (square, self.chess_at(square)))
            .filter(move |(_, chess)| chess.belong_to(player))
    }

    pub fn piece_count(&self) -> usize {
        self.chesses.iter().filter(|chess| !chess.is_none()).count()
    }
}
