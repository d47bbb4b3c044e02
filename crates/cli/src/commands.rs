//! Line protocol: one command per line, one reply per command.
//!
//! Every reply starts with `ok` or `error`. Multi-line replies (`show`,
//! `history`, `hint`, `replay`) put the details on the following lines.

use std::fmt::Write as _;
use std::path::PathBuf;

use checkers_core::{parse_square, Applied, GameResult, Rules, Square};
use minimax_engine::Difficulty;
use session::{ComputerMove, GameMode, Session};

const DEFAULT_HINTS: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleName {
    Backward,
    Flying,
    Mandatory,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    New,
    Show,
    Select(Square),
    Move(Square),
    Play(Square, Square),
    Undo(usize),
    Ai,
    Hint(usize),
    Rule(RuleName, bool),
    Difficulty(Difficulty),
    History,
    Stats,
    Save(PathBuf),
    Load(PathBuf),
    Replay(usize),
    Quit,
}

/// Parses one input line. Blank lines give `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some((&name, args)) = parts.split_first() else {
        return Ok(None);
    };

    let cmd = match (name.to_ascii_lowercase().as_str(), args) {
        ("new", []) => Command::New,
        ("show", []) => Command::Show,
        ("select", [sq]) => Command::Select(square(sq)?),
        ("move", [sq]) => Command::Move(square(sq)?),
        ("play", [from, to]) => Command::Play(square(from)?, square(to)?),
        ("undo", []) => Command::Undo(1),
        ("undo", [n]) => Command::Undo(count(n)?),
        ("ai", []) => Command::Ai,
        ("hint", []) => Command::Hint(DEFAULT_HINTS),
        ("hint", [n]) => Command::Hint(count(n)?),
        ("rules", [rule, value]) => Command::Rule(rule_name(rule)?, switch(value)?),
        ("difficulty", [level]) => Command::Difficulty(level.parse()?),
        ("history", []) => Command::History,
        ("stats", []) => Command::Stats,
        ("save", [path]) => Command::Save(PathBuf::from(path)),
        ("load", [path]) => Command::Load(PathBuf::from(path)),
        ("replay", [n]) => Command::Replay(count(n)?),
        ("quit" | "exit", []) => Command::Quit,
        (other, _) => return Err(format!("bad command '{other}' with {} argument(s)", args.len())),
    };
    Ok(Some(cmd))
}

fn square(txt: &str) -> Result<Square, String> {
    parse_square(txt).map_err(|e| e.to_string())
}

fn count(txt: &str) -> Result<usize, String> {
    txt.parse().map_err(|_| format!("bad number '{txt}'"))
}

fn rule_name(txt: &str) -> Result<RuleName, String> {
    match txt.to_ascii_lowercase().as_str() {
        "backward" => Ok(RuleName::Backward),
        "flying" => Ok(RuleName::Flying),
        "mandatory" => Ok(RuleName::Mandatory),
        other => Err(format!("unknown rule '{other}'")),
    }
}

fn switch(txt: &str) -> Result<bool, String> {
    match txt.to_ascii_lowercase().as_str() {
        "on" | "true" | "1" => Ok(true),
        "off" | "false" | "0" => Ok(false),
        other => Err(format!("expected on/off, got '{other}'")),
    }
}

fn describe(applied: Applied) -> String {
    match applied {
        Applied::TurnPassed { next } => format!("{next} to move"),
        Applied::ChainContinues { piece } => format!("{piece} must jump again"),
        Applied::GameOver { winner } => format!("game over, {winner} wins"),
    }
}

fn describe_computer(played: &[ComputerMove]) -> String {
    let mut line = String::from("computer");
    for cm in played {
        let _ = write!(line, " {}", cm.mv);
    }
    if let Some(last) = played.last() {
        let _ = write!(line, ", {}", describe(last.applied));
    }
    line
}

/// Drives a `Session` from protocol commands.
pub struct Shell {
    session: Session,
}

impl Shell {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Runs one command and returns the reply text (without the `ok`/`error`
    /// prefix).
    pub fn execute(&mut self, cmd: Command) -> Result<String, String> {
        self.run(cmd).map_err(|e| e.to_string())
    }

    fn run(&mut self, cmd: Command) -> GameResult<String> {
        let reply = match cmd {
            Command::New => {
                self.session.new_game();
                format!("new game, {} to move", self.session.game().current_player())
            }
            Command::Show => self.show(),
            Command::Select(sq) => {
                let moves = self.session.select(sq)?;
                let targets: Vec<String> = moves.iter().map(|m| m.to().to_string()).collect();
                format!("{sq} can move to {}", targets.join(" "))
            }
            Command::Move(to) => {
                let applied = self.session.move_to(to)?;
                describe(applied)
            }
            Command::Play(from, to) => {
                self.session.select(from)?;
                let applied = self.session.move_to(to)?;
                describe(applied)
            }
            Command::Undo(n) => {
                let removed = self.session.undo(n);
                format!(
                    "undid {removed} record(s), {} to move",
                    self.session.game().current_player()
                )
            }
            Command::Ai => {
                let played = self.session.computer_turn()?;
                describe_computer(&played)
            }
            Command::Hint(n) => {
                let hints = self.session.hint(n);
                let mut reply = format!("{} suggestion(s)", hints.len());
                for hint in &hints {
                    let _ = write!(reply, "\n{hint}");
                }
                reply
            }
            Command::Rule(name, on) => {
                let mut rules: Rules = self.session.config().rules;
                match name {
                    RuleName::Backward => rules.backward_capture = on,
                    RuleName::Flying => rules.flying_kings = on,
                    RuleName::Mandatory => rules.mandatory_capture = on,
                }
                self.session.set_rules(rules);
                format!("{rules:?}")
            }
            Command::Difficulty(level) => {
                self.session.set_difficulty(level);
                format!("difficulty {level}")
            }
            Command::History => {
                let history = self.session.game().history();
                let mut reply = format!("{} record(s)", history.len());
                for (i, rec) in history.iter().enumerate() {
                    let _ = write!(reply, "\n{} {} {}", i + 1, rec.player, rec.mv);
                    if rec.became_king {
                        reply.push_str(" king");
                    }
                }
                reply
            }
            Command::Stats => serde_json::to_string(&self.session.stats())?,
            Command::Save(path) => {
                self.session.save(&path)?;
                format!("saved {}", path.display())
            }
            Command::Load(path) => {
                self.session.load(&path)?;
                format!(
                    "loaded {} record(s), {} to move",
                    self.session.game().history().len(),
                    self.session.game().current_player()
                )
            }
            Command::Replay(index) => {
                let mut playback = self.session.playback();
                playback.go_to(index)?;
                let mut reply = format!("position {} of {}", playback.cursor(), playback.len());
                if let Some(rec) = playback.record_at_cursor() {
                    let _ = write!(reply, " after {} {}", rec.player, rec.mv);
                }
                let board = playback.current().board().to_string();
                let _ = write!(reply, "\n{}", board.trim_end());
                reply
            }
            Command::Quit => "bye".to_string(),
        };
        Ok(reply)
    }

    fn show(&self) -> String {
        let game = self.session.game();
        let status = match game.winner() {
            Some(winner) => format!("game over, {winner} wins"),
            None if game.in_multi_jump() => format!(
                "{} to move, chain on {}",
                game.current_player(),
                game.chain_piece().map(|sq| sq.to_string()).unwrap_or_default()
            ),
            None => format!("{} to move", game.current_player()),
        };
        format!("{status}\n{}", game.board().to_string().trim_end())
    }

    /// In human-vs-computer mode, lets the computer answer until a human is
    /// on move again. `None` when there was nothing to play.
    pub fn auto_reply(&mut self) -> Option<Result<String, String>> {
        if self.session.config().mode != GameMode::HumanVsComputer
            || !self.session.is_computer_turn()
        {
            return None;
        }
        Some(
            self.session
                .computer_turn()
                .map(|played| describe_computer(&played))
                .map_err(|e| e.to_string()),
        )
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod commands_tests;
