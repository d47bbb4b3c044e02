mod commands;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use checkers_core::Color;
use minimax_engine::Difficulty;
use session::{GameMode, Session, SessionConfig};

use commands::{parse_command, Command, Shell};

/// Play checkers over a line protocol on stdin/stdout.
#[derive(Parser, Debug)]
#[command(name = "checkers", version, about)]
struct Args {
    /// TOML session config; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// easy, medium, hard or expert
    #[arg(short, long)]
    difficulty: Option<Difficulty>,

    /// human-vs-human, human-vs-computer or computer-vs-computer
    #[arg(short, long)]
    mode: Option<GameMode>,

    /// Side the computer plays in human-vs-computer mode
    #[arg(long, value_parser = parse_color)]
    computer_color: Option<Color>,

    /// Search budget per computer move before the fallback engine answers
    #[arg(long)]
    ai_timeout_ms: Option<u64>,

    /// Pause for the difficulty's thinking time before computer moves
    #[arg(long)]
    thinking_delay: bool,

    #[arg(long)]
    no_backward_capture: bool,

    #[arg(long)]
    no_flying_kings: bool,

    #[arg(long)]
    no_mandatory_capture: bool,
}

fn parse_color(s: &str) -> Result<Color, String> {
    match s.to_ascii_lowercase().as_str() {
        "red" => Ok(Color::Red),
        "black" => Ok(Color::Black),
        other => Err(format!("unknown colour '{other}'")),
    }
}

impl Args {
    fn session_config(&self) -> Result<SessionConfig> {
        let mut config = match &self.config {
            Some(path) => SessionConfig::load(path)?,
            None => SessionConfig::default(),
        };
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty;
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(color) = self.computer_color {
            config.computer_color = color;
        }
        if let Some(ms) = self.ai_timeout_ms {
            config.ai_timeout_ms = ms;
        }
        config.thinking_delay |= self.thinking_delay;
        if self.no_backward_capture {
            config.rules.backward_capture = false;
        }
        if self.no_flying_kings {
            config.rules.flying_kings = false;
        }
        if self.no_mandatory_capture {
            config.rules.mandatory_capture = false;
        }
        Ok(config)
    }
}

fn reply(out: &mut impl Write, result: Result<String, String>) -> io::Result<()> {
    match result {
        Ok(text) => writeln!(out, "ok {text}")?,
        Err(text) => writeln!(out, "error {text}")?,
    }
    out.flush()
}

fn main() -> Result<()> {
    // Protocol replies own stdout; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = args.session_config()?;
    info!(?config, "starting session");

    let mut shell = Shell::new(Session::new(config));
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    // The computer may have the first move
    if let Some(result) = shell.auto_reply() {
        reply(&mut stdout, result)?;
    }

    for line in stdin.lock().lines() {
        let line = line?;
        let cmd = match parse_command(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                reply(&mut stdout, Err(e))?;
                continue;
            }
        };
        debug!(?cmd, "command");

        if cmd == Command::Quit {
            reply(&mut stdout, Ok("bye".to_string()))?;
            break;
        }

        let result = shell.execute(cmd);
        let succeeded = result.is_ok();
        reply(&mut stdout, result)?;
        if succeeded {
            if let Some(result) = shell.auto_reply() {
                reply(&mut stdout, result)?;
            }
        }
    }

    Ok(())
}
