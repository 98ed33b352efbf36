use engine::board::{Board, Square, BOARD_HEIGHT, BOARD_WIDTH};

const LIGHT_SQUARE: (u8, u8, u8) = (0xEE, 0xEE, 0xD2);
const DARK_SQUARE: (u8, u8, u8) = (0x77, 0x97, 0x56);
const PREVIOUS_SQUARE: (u8, u8, u8) = (0xF5, 0xF6, 0x7F);
const CURRENT_SQUARE: (u8, u8, u8) = (0xBB, 0xCB, 0x44);
const RESET: &str = "\x1b[0m";
const FILES: &str = "   a  b  c  d  e  f  g  h";

#[derive(Debug, Clone, Copy)]
pub struct Style {
    pub color: bool,
}

#[derive(Clone, Copy, PartialEq)]
enum Highlight {
    Previous,
    Current,
}

// Black sits on top, white at the bottom; the last move's squares are highlighted
pub fn render(board: &Board, last_move: Option<(Square, Square)>, white: &str, black: &str, style: Style) -> String {
    let mut output = String::new();
    output.push_str(black);
    output.push('\n');
    output.push_str(FILES);
    output.push('\n');
    for row in 0..BOARD_HEIGHT {
        let rank = BOARD_HEIGHT - row;
        output.push_str(&format!("{rank} "));
        for col in 0..BOARD_WIDTH {
            let Some(square) = Square::new(row, col) else {
                continue;
            };
            let highlight = match last_move {
                Some((previous, _)) if previous == square => Some(Highlight::Previous),
                Some((_, current)) if current == square => Some(Highlight::Current),
                _ => None,
            };
            let light = (row + col) % 2 == 0;
            output.push_str(&cell(board.chess_at(square).glyph(), highlight, light, style));
        }
        output.push_str(&format!(" {rank}\n"));
    }
    output.push_str(FILES);
    output.push('\n');
    output.push_str(white);
    output
}

fn cell(glyph: Option<char>, highlight: Option<Highlight>, light: bool, style: Style) -> String {
    if style.color {
        let (r, g, b) = match highlight {
            Some(Highlight::Previous) => PREVIOUS_SQUARE,
            Some(Highlight::Current) => CURRENT_SQUARE,
            None if light => LIGHT_SQUARE,
            None => DARK_SQUARE,
        };
        format!("\x1b[48;2;{r};{g};{b}m\x1b[38;2;0;0;0m {} {RESET}", glyph.unwrap_or(' '))
    } else {
        let glyph = glyph.unwrap_or('.');
        match highlight {
            Some(Highlight::Previous) => format!("({glyph})"),
            Some(Highlight::Current) => format!("[{glyph}]"),
            None => format!(" {glyph} "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::board::square_of;

    const PLAIN: Style = Style { color: false };

    #[test]
    fn test_render_initial_board() {
        let text = render(&Board::init(), None, "alice", "bob", PLAIN);
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0], "bob");
        assert_eq!(lines[2], "8  ♜  ♞  ♝  ♛  ♚  ♝  ♞  ♜  8");
        assert_eq!(lines[5], "5  .  .  .  .  .  .  .  .  5");
        assert_eq!(lines[9], "1  ♖  ♘  ♗  ♕  ♔  ♗  ♘  ♖  1");
        assert_eq!(lines[11], "alice");
    }

    #[test]
    fn test_render_marks_last_move() {
        let mut board = Board::init();
        let (from, to) = (square_of("e2").unwrap(), square_of("e4").unwrap());
        board.swap(from, to);
        let text = render(&board, Some((from, to)), "w", "b", PLAIN);
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines[6], "4  .  .  .  . [♙] .  .  .  4");
        assert_eq!(lines[8], "2  ♙  ♙  ♙  ♙ (.) ♙  ♙  ♙  2");
    }

    #[test]
    fn test_render_with_color() {
        let text = render(&Board::init(), None, "w", "b", Style { color: true });
        assert!(text.contains("\x1b[48;2;238;238;210m"));
        assert!(text.contains("\x1b[48;2;119;151;86m"));
        assert!(text.contains(RESET));
    }
}
