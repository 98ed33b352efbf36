use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "terminal-chess", version, about = "Two-player chess in the terminal")]
pub struct Cli {
    /// Name of the white player
    #[arg(long, default_value = "white")]
    pub white: String,

    /// Name of the black player
    #[arg(long, default_value = "black")]
    pub black: String,

    /// Print the board without ANSI colours
    #[arg(long)]
    pub no_color: bool,

    /// Start from this FEN placement instead of the standard layout
    #[arg(long)]
    pub fen: Option<String>,

    /// Log filter, e.g. `debug` or `engine=trace` (overrides RUST_LOG)
    #[arg(long)]
    pub log_level: Option<String>,
}
