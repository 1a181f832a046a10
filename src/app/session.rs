//! Interactive operator session
//!
//! Reads one command per line, applies it to the queue engine and redraws the
//! board. The session also guards the rules the engine leaves to its caller:
//! no new call while one is still active, and source reloads that fail leave
//! the running queue untouched.

use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::{Context, Result};
use log::{info, warn};
use thiserror::Error;
use uuid::Uuid;

use crate::display::{render_board, BoardFormat, BoardRole, ColourManager};
use crate::ingest::{IdentifierSource, IngestResult};
use crate::queue::{QueueEngine, QueueParams};

const HELP: &str = "\
Commands:
  done, d        complete the active call and call the next
  skip, s        skip the active call and call the next
  next, n        call the next identifier when no call is active
  recall K, r K  move skipped entry K back to the front of the staging window
  restart        reload the identifier source and start over
  show           redraw the board
  help           show this list
  quit, q        end the session
";

/// Errors for operator input that does not form a command
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}'. Enter 'help' for the command list")]
    Unknown(String),

    #[error("'recall' needs a position from the skipped list, e.g. 'recall 2'")]
    MissingPosition,

    #[error("Invalid recall position '{0}': expected a number from the skipped list")]
    InvalidPosition(String),

    #[error("'{0}' takes no arguments")]
    UnexpectedArgument(String),
}

/// One operator action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Done,
    Skip,
    Next,
    /// 1-based position in the skipped list, as shown on the board
    Recall(usize),
    Restart,
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let name = words.next().unwrap_or_default().to_lowercase();
        let argument = words.next();

        let command = match name.as_str() {
            "done" | "d" | "complete" => Command::Done,
            "skip" | "s" => Command::Skip,
            "next" | "n" | "call" => Command::Next,
            "recall" | "r" => {
                let position = argument.ok_or(CommandError::MissingPosition)?;
                let position = position
                    .parse::<usize>()
                    .map_err(|_| CommandError::InvalidPosition(position.to_string()))?;
                if words.next().is_some() {
                    return Err(CommandError::UnexpectedArgument(name));
                }
                return Ok(Command::Recall(position));
            }
            "restart" => Command::Restart,
            "show" | "status" | "ls" => Command::Show,
            "help" | "h" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            _ => return Err(CommandError::Unknown(s.trim().to_string())),
        };

        if argument.is_some() {
            return Err(CommandError::UnexpectedArgument(name));
        }
        Ok(command)
    }
}

/// Message shown to the operator alongside the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Warning(String),
    Error(String),
}

/// What the console should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Redraw the board, optionally after a notice
    Board(Option<Notice>),
    Help,
    Quit,
}

/// A queue session bound to its identifier source.
///
/// The engine is rebuilt from the source on `restart`; everything else
/// operates on the engine in place.
pub struct OperatorSession {
    source: IdentifierSource,
    params: QueueParams,
    engine: QueueEngine,
    session_id: String,
    colours: ColourManager,
    format: BoardFormat,
}

impl OperatorSession {
    /// Load the source and start a session with the first identifier already called
    pub fn start(
        source: IdentifierSource,
        params: QueueParams,
        colours: ColourManager,
        format: BoardFormat,
    ) -> IngestResult<Self> {
        let engine = Self::build_engine(&source, params)?;
        let session = Self {
            source,
            params,
            engine,
            session_id: Uuid::now_v7().to_string(),
            colours,
            format,
        };
        info!(
            "Session {} started: {} identifiers, capacity {}, threshold {}, batch {}",
            session.session_id,
            session.engine.source().len(),
            params.staging_capacity(),
            params.refill_threshold(),
            params.refill_batch()
        );
        Ok(session)
    }

    fn build_engine(source: &IdentifierSource, params: QueueParams) -> IngestResult<QueueEngine> {
        let mut engine = QueueEngine::new(source.load()?, params);
        engine.reset();
        Ok(engine)
    }

    pub fn engine(&self) -> &QueueEngine {
        &self.engine
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Apply one command
    pub fn execute(&mut self, command: Command) -> Reply {
        match command {
            Command::Done => {
                if self.engine.complete_and_next() {
                    Reply::Board(self.exhausted_notice())
                } else {
                    warn!("Complete requested with no active call");
                    Reply::Board(Some(Notice::Warning("No active call to complete".to_string())))
                }
            }
            Command::Skip => {
                if self.engine.skip_and_next() {
                    Reply::Board(self.exhausted_notice())
                } else {
                    warn!("Skip requested with no active call");
                    Reply::Board(Some(Notice::Warning("No active call to skip".to_string())))
                }
            }
            Command::Next => self.call_next(),
            Command::Recall(position) => self.recall(position),
            Command::Restart => self.restart(),
            Command::Show => Reply::Board(None),
            Command::Help => Reply::Help,
            Command::Quit => Reply::Quit,
        }
    }

    fn call_next(&mut self) -> Reply {
        if let Some(active) = self.engine.active() {
            warn!("Next requested while {} is still active", active);
            return Reply::Board(Some(Notice::Warning(format!(
                "{} is still active: complete or skip it first",
                active
            ))));
        }

        match self.engine.call_next() {
            Some(_) => Reply::Board(None),
            None => Reply::Board(Some(Notice::Info("Nothing left to call".to_string()))),
        }
    }

    fn recall(&mut self, position: usize) -> Reply {
        let skipped = self.engine.skipped().len();
        let recalled = position
            .checked_sub(1)
            .is_some_and(|index| self.engine.recall_skip(index));

        if recalled {
            info!("Recalled skipped entry {}", position);
            Reply::Board(None)
        } else {
            warn!("Recall position {} is out of range ({} skipped)", position, skipped);
            Reply::Board(Some(Notice::Warning(format!(
                "No skipped entry at position {} ({} skipped)",
                position, skipped
            ))))
        }
    }

    fn restart(&mut self) -> Reply {
        match Self::build_engine(&self.source, self.params) {
            Ok(engine) => {
                let previous = std::mem::replace(&mut self.session_id, Uuid::now_v7().to_string());
                self.engine = engine;
                info!(
                    "Session {} restarted as {} with {} identifiers",
                    previous,
                    self.session_id,
                    self.engine.source().len()
                );
                Reply::Board(Some(Notice::Info(format!("Restarted from {}", self.source))))
            }
            Err(e) => {
                warn!("Restart failed, keeping the current queue: {}", e);
                Reply::Board(Some(Notice::Error(format!("Restart failed, queue unchanged: {}", e))))
            }
        }
    }

    fn exhausted_notice(&self) -> Option<Notice> {
        if !self.engine.is_exhausted() {
            return None;
        }
        let message = match self.engine.skipped().len() {
            0 => "All identifiers have been called".to_string(),
            skipped => format!(
                "All identifiers have been called; {} skipped can still be recalled",
                skipped
            ),
        };
        Some(Notice::Info(message))
    }

    /// Render the current board
    pub fn render(&self) -> Result<String> {
        render_board(&self.engine.snapshot(), &self.session_id, &self.colours, self.format)
    }

    fn render_notice(&self, notice: &Notice) -> String {
        let line = match notice {
            Notice::Info(message) => self.colours.paint(BoardRole::Notice, message),
            Notice::Warning(message) => self.colours.paint(BoardRole::Warning, message),
            Notice::Error(message) => self.colours.paint(BoardRole::Error, message),
        };
        format!("{}\n", line)
    }

    fn write_board<W: Write>(&self, output: &mut W) -> Result<()> {
        output.write_all(self.render()?.as_bytes()).context("Failed to write board")?;
        if self.format == BoardFormat::Text {
            write!(output, "\n> ").context("Failed to write prompt")?;
        }
        output.flush().context("Failed to flush output")
    }

    fn write_notice<W: Write>(&self, output: &mut W, notice: &Notice) -> Result<()> {
        // JSON output stays machine-readable; notices still reach the log
        if self.format == BoardFormat::Json {
            return Ok(());
        }
        output
            .write_all(self.render_notice(notice).as_bytes())
            .context("Failed to write notice")
    }

    /// Drive the session from line-based input until `quit` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, output: &mut W) -> Result<()> {
        self.write_board(output)?;

        let mut buffer = Vec::new();
        loop {
            buffer.clear();
            if input.read_until(b'\n', &mut buffer).context("Failed to read operator input")? == 0 {
                break;
            }
            // undecodable bytes become U+FFFD and fail to parse as a command
            let line = String::from_utf8_lossy(&buffer);
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match line.parse::<Command>() {
                Ok(command) => match self.execute(command) {
                    Reply::Board(notice) => {
                        if let Some(notice) = notice {
                            self.write_notice(output, &notice)?;
                        }
                        self.write_board(output)?;
                    }
                    Reply::Help => {
                        if self.format != BoardFormat::Json {
                            write!(output, "{}\n> ", HELP).context("Failed to write help")?;
                            output.flush().context("Failed to flush output")?;
                        }
                    }
                    Reply::Quit => break,
                },
                Err(e) => {
                    warn!("Rejected operator input {:?}: {}", line, e);
                    self.write_notice(output, &Notice::Error(e.to_string()))?;
                    if self.format == BoardFormat::Text {
                        write!(output, "> ").context("Failed to write prompt")?;
                    }
                    output.flush().context("Failed to flush output")?;
                }
            }
        }

        info!(
            "Session {} ended: {} completed, {} skipped, {} waiting",
            self.session_id,
            self.engine.completed().len(),
            self.engine.skipped().len(),
            self.engine.staging().len() + self.engine.remaining() + usize::from(self.engine.active().is_some())
        );
        Ok(())
    }
}
