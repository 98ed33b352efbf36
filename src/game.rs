use std::io::{BufRead, Write};
use std::sync::LazyLock;

use engine::board::{Board, Player};
use engine::{Engine, MoveOutcome};
use regex::Regex;
use tracing::{debug, info};

use crate::ui::{self, Style};

static COMMAND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?P<quit>quit|exit)|(?P<board>board)|(?P<help>help)|moves\s+(?P<query>\S+)|(?P<piece>\S+)\s+(?P<to>\S+))$")
        .expect("command pattern compiles")
});

const HELP: &str = "\
commands:
  <piece> <square>   move a piece, e.g. `p5 e4`, `n2 f3`, `q d3`
  moves <piece>      list the squares a piece can move to
  board              print the board again
  help               show this text
  quit               leave the game
pieces: k q r b n p plus a number counted from the a-file, e.g. r1 is the a1 rook and p8 the h-pawn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Move { piece: String, to: String },
    Moves(String),
    Board,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Option<Command> {
        let line = line.trim().to_lowercase();
        let captures = COMMAND_RE.captures(&line)?;
        if captures.name("quit").is_some() {
            return Some(Command::Quit);
        }
        if captures.name("board").is_some() {
            return Some(Command::Board);
        }
        if captures.name("help").is_some() {
            return Some(Command::Help);
        }
        if let Some(query) = captures.name("query") {
            return Some(Command::Moves(query.as_str().to_owned()));
        }
        match (captures.name("piece"), captures.name("to")) {
            (Some(piece), Some(to)) => Some(Command::Move {
                piece: piece.as_str().to_owned(),
                to: to.as_str().to_owned(),
            }),
            _ => None,
        }
    }
}

/// Two players sharing one terminal; white moves first.
pub struct Game {
    engine: Engine,
    white: String,
    black: String,
    turn: Player,
    style: Style,
}

impl Game {
    pub fn new(board: Board, white: String, black: String, style: Style) -> Self {
        Game {
            engine: Engine::with_board(board),
            white,
            black,
            turn: Player::White,
            style,
        }
    }

    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn board(&self) -> &Board {
        &self.engine.board
    }

    fn name(&self, player: Player) -> &str {
        match player {
            Player::White => &self.white,
            Player::Black => &self.black,
        }
    }

    pub fn render(&self) -> String {
        ui::render(&self.engine.board, self.engine.last_move, &self.white, &self.black, self.style)
    }

    pub fn prompt(&self) -> String {
        format!("{} ({}) > ", self.name(self.turn), self.turn)
    }

    /// Reply to one line of input, `None` once the players want to stop.
    pub fn handle_line(&mut self, line: &str) -> Option<String> {
        let Some(command) = Command::parse(line) else {
            return Some(format!("can't read `{}`, type `help` for the commands", line.trim()));
        };
        debug!(?command, player = %self.turn, "command");
        match command {
            Command::Quit => None,
            Command::Board => Some(self.render()),
            Command::Help => Some(HELP.to_owned()),
            Command::Moves(piece) => Some(self.list_moves(&piece)),
            Command::Move { piece, to } => Some(self.play(&piece, &to)),
        }
    }

    fn list_moves(&self, piece: &str) -> String {
        match self.engine.valid_moves(self.turn, piece) {
            Ok(moves) if moves.is_empty() => format!("{piece} has no valid moves"),
            Ok(moves) => {
                let names = moves.iter().map(|square| square.name()).collect::<Vec<_>>();
                format!("{piece}: {}", names.join(" "))
            }
            Err(err) => err.to_string(),
        }
    }

    // the turn only passes on an accepted move
    fn play(&mut self, piece: &str, to: &str) -> String {
        match self.engine.attempt_move(self.turn, piece, to) {
            Ok(MoveOutcome::Accepted { captured, .. }) => {
                let mut reply = self.render();
                if let Some(captured) = captured {
                    reply.push_str(&format!("\n{} captured {captured}", self.name(self.turn)));
                }
                self.turn = self.turn.next();
                reply
            }
            Ok(rejected) => rejected.to_string(),
            Err(err) => {
                debug!(%err, "request refused");
                err.to_string()
            }
        }
    }

    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> anyhow::Result<()> {
        info!(white = %self.white, black = %self.black, "game started");
        writeln!(output, "{}", self.render())?;
        let mut lines = input.lines();
        loop {
            write!(output, "\n{}", self.prompt())?;
            output.flush()?;
            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match self.handle_line(&line) {
                Some(reply) => writeln!(output, "{reply}")?,
                None => break,
            }
        }
        writeln!(output, "\nbye")?;
        info!(fen = %self.engine.board.fen(), "game ended");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::board::{square_of, Chess, ChessType};
    use std::io::Cursor;

    fn game() -> Game {
        Game::new(Board::init(), "alice".into(), "bob".into(), Style { color: false })
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            Command::parse("  P5  E4 "),
            Some(Command::Move {
                piece: "p5".into(),
                to: "e4".into()
            })
        );
        assert_eq!(Command::parse("moves n2"), Some(Command::Moves("n2".into())));
        assert_eq!(Command::parse("board"), Some(Command::Board));
        assert_eq!(Command::parse("HELP"), Some(Command::Help));
        assert_eq!(Command::parse("exit"), Some(Command::Quit));
        assert_eq!(Command::parse("e4"), None);
        assert_eq!(Command::parse("p5 e4 e5"), None);
    }

    #[test]
    fn test_turn_passes_only_on_accepted_move() {
        let mut game = game();
        let reply = game.handle_line("r1 a4").unwrap();
        assert_eq!(reply, "r1 can't move to a4: the path is blocked");
        assert_eq!(game.turn(), Player::White);

        let reply = game.handle_line("r9 a4").unwrap();
        assert!(!reply.is_empty());
        assert_eq!(game.turn(), Player::White);

        game.handle_line("p5 e4").unwrap();
        assert_eq!(game.turn(), Player::Black);
        assert_eq!(game.board().chess_at(square_of("e4").unwrap()), Chess::White(ChessType::Pawn, 5));
        assert_eq!(game.prompt(), "bob (black) > ");
    }

    #[test]
    fn test_capture_is_reported() {
        let board = Board::from_fen("4k3/8/8/8/3p4/8/8/3RK3").unwrap();
        let mut game = Game::new(board, "alice".into(), "bob".into(), Style { color: false });
        let reply = game.handle_line("r1 d4").unwrap();
        assert!(reply.ends_with("alice captured black pawn (p1)"), "{reply}");
    }

    #[test]
    fn test_moves_query() {
        let mut game = game();
        assert_eq!(game.handle_line("moves n1").unwrap(), "n1: a3 c3");
        assert_eq!(game.handle_line("moves r1").unwrap(), "r1 has no valid moves");
        assert_eq!(game.turn(), Player::White);
    }

    #[test]
    fn test_run_until_quit() {
        let mut game = game();
        let input = Cursor::new("p5 e4\n\np5 e5\nquit\np4 d4\n");
        let mut output = vec![];
        game.run(input, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("alice (white) > "));
        assert!(text.contains("bob (black) > "));
        assert!(text.ends_with("bye\n"));
        // the line after quit is never played
        assert_eq!(game.turn(), Player::White);
        assert!(game.board().chess_at(square_of("d2").unwrap()).belong_to(Player::White));
    }

    #[test]
    fn test_run_stops_at_eof() {
        let mut game = game();
        let mut output = vec![];
        game.run(Cursor::new("n2 f3\n"), &mut output).unwrap();
        assert_eq!(game.turn(), Player::Black);
    }
}
