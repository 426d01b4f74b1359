//! Command-line frontend for the Journey to Mount Qaf.

mod logging;
mod play;

use std::path::PathBuf;
use std::process;

use clap::Parser;

use qaf_engine::EngineConfig;

#[derive(Parser)]
#[command(
    name = "qaf",
    about = "Journey to Mount Qaf, a turn-based text adventure",
    version
)]
struct Cli {
    /// Story file to play
    #[arg(long, default_value = "data/story.json")]
    story: PathBuf,

    /// Directory holding saved games
    #[arg(long, default_value = "data/saves")]
    saves: PathBuf,

    /// Log engine decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = EngineConfig::default()
        .with_story_path(cli.story)
        .with_saves_dir(cli.saves);

    if let Err(e) = play::run(config) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
