//! Logging behind the `log` facade
//!
//! Records go to stderr, to a log file, or both, each with its own level.
//! Nothing is written to stdout, which belongs to the operator board.
//! Lines are either `YYYY-MM-DD HH:MM:SS [LEVEL] message` or one JSON object.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use log::{Level, LevelFilter, Log, Metadata, Record};
use serde::{Deserialize, Serialize};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: {}. Valid options: text, json", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogDestination {
    #[default]
    Console,
    File(PathBuf),
    Both(PathBuf),
}

impl LogDestination {
    fn file_path(&self) -> Option<&Path> {
        match self {
            LogDestination::Console => None,
            LogDestination::File(path) | LogDestination::Both(path) => Some(path),
        }
    }

    fn to_console(&self) -> bool {
        !matches!(self, LogDestination::File(_))
    }
}

/// One line of JSON log output
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonLogEntry {
    pub timestamp: String,
    pub level: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
}

impl JsonLogEntry {
    fn from_record(record: &Record, timestamp: String) -> Self {
        let mut detail = serde_json::json!({ "target": record.target() });
        if let Some(line) = record.line() {
            detail["line"] = line.into();
        }
        Self {
            timestamp,
            level: record.level().to_string(),
            message: record.args().to_string(),
            detail: Some(detail),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub console_level: LevelFilter,
    /// `None` unless a log file is configured
    pub file_level: Option<LevelFilter>,
    pub format: LogFormat,
    pub destination: LogDestination,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            console_level: LevelFilter::Warn,
            file_level: None,
            format: LogFormat::default(),
            destination: LogDestination::default(),
        }
    }
}

impl LogConfig {
    /// Most verbose level any destination accepts
    pub fn max_level(&self) -> LevelFilter {
        self.file_level.map_or(self.console_level, |file_level| file_level.max(self.console_level))
    }
}

pub struct CallqLogger {
    config: LogConfig,
    file: Option<Mutex<File>>,
}

impl CallqLogger {
    /// Create the logger, opening the log file for appending if one is configured
    pub fn new(config: LogConfig) -> Result<Self> {
        let file = config
            .destination
            .file_path()
            .map(|path| {
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map(Mutex::new)
                    .with_context(|| format!("Failed to open log file: {}", path.display()))
            })
            .transpose()?;
        Ok(Self { config, file })
    }

    fn timestamp() -> String {
        Local::now().format(TIMESTAMP_FORMAT).to_string()
    }

    fn render(&self, record: &Record) -> String {
        let timestamp = Self::timestamp();
        match self.config.format {
            LogFormat::Text => format!("{} [{}] {}", timestamp, record.level(), record.args()),
            LogFormat::Json => {
                let entry = JsonLogEntry::from_record(record, timestamp);
                serde_json::to_string(&entry).unwrap_or_else(|e| {
                    format!("{} [{}] {} (JSON encoding failed: {})", entry.timestamp, entry.level, entry.message, e)
                })
            }
        }
    }

    fn console_accepts(&self, level: Level) -> bool {
        self.config.destination.to_console() && level <= self.config.console_level
    }

    fn file_accepts(&self, level: Level) -> bool {
        self.file.is_some() && self.config.file_level.is_some_and(|file_level| level <= file_level)
    }
}

impl Log for CallqLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.console_accepts(metadata.level()) || self.file_accepts(metadata.level())
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = self.render(record);

        if self.console_accepts(record.level()) {
            let _ = writeln!(io::stderr(), "{}", line);
        }

        if self.file_accepts(record.level()) {
            if let Some(Ok(mut file)) = self.file.as_ref().map(Mutex::lock) {
                if let Err(e) = writeln!(file, "{}", line) {
                    eprintln!("File logging error: {}", e);
                }
            }
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
        if let Some(Ok(mut file)) = self.file.as_ref().map(Mutex::lock) {
            let _ = file.flush();
        }
    }
}

/// Install the logger as the global `log` backend
pub fn init_logger(config: LogConfig) -> Result<()> {
    let max_level = config.max_level();
    let logger = CallqLogger::new(config)?;

    log::set_boxed_logger(Box::new(logger)).context("Failed to set global logger")?;
    log::set_max_level(max_level);
    Ok(())
}

/// Parse a level name: error, warn, info, debug, trace or off (any case)
pub fn parse_log_level(level_str: &str) -> Result<LevelFilter> {
    LevelFilter::from_str(level_str.trim()).map_err(|_| {
        anyhow!(
            "Invalid log level: {}. Valid levels: error, warn, info, debug, trace, off",
            level_str
        )
    })
}
