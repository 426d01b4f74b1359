use std::io::{self, BufRead, Write};

use colored::Colorize;

use qaf_engine::{EngineConfig, Game};

pub fn run(config: EngineConfig) -> Result<(), String> {
    let mut game = Game::open(config).map_err(|e| format!("failed to start game: {e}"))?;

    println!("{}\n", game.greeting().green().bold());

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    while !game.is_finished() {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        // Blank lines are answers too (an empty snack slot).
        match game.process(line.trim_end_matches(['\r', '\n'])) {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{output}\n");
                }
            }
            Err(e) if e.is_recoverable() => {
                println!("{}\n", e.to_string().yellow());
            }
            Err(e) => {
                tracing::error!(error = %e, "turn failed");
                println!("{}\n", e.to_string().red());
            }
        }
    }

    tracing::debug!("session ended");
    Ok(())
}
