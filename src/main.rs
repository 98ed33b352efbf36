use clap::Parser;
use engine::board::Board;
use tracing_subscriber::EnvFilter;

mod cli;
mod game;
mod ui;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    let filter = match &cli.log_level {
        Some(level) => EnvFilter::try_new(level)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    // stdout belongs to the board
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let board = match &cli.fen {
        Some(fen) => Board::from_fen(fen)?,
        None => Board::init(),
    };
    let style = ui::Style { color: !cli.no_color };
    let mut game = game::Game::new(board, cli.white, cli.black, style);
    game.run(std::io::stdin().lock(), std::io::stdout().lock())?;
    Ok(())
}
