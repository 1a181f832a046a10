//! Configuration file support
//!
//! A TOML file is flattened into `section -> key -> value` strings. Nested
//! tables become dotted section names and root-level keys land in `[base]`.
//! Lookups try the section chosen with `--config-name`, then the requested
//! section, then `[base]`.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use log::{debug, info, LevelFilter};
use toml::Value;

pub type Configuration = HashMap<String, HashMap<String, String>>;

pub const BASE_SECTION: &str = "base";

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV_VAR: &str = "CALLQ_CONFIG";

pub struct ConfigManager {
    config: Configuration,
    config_file_path: Option<PathBuf>,
    selected_section: Option<String>,
}

impl ConfigManager {
    pub fn from_config(config: Configuration) -> Self {
        Self {
            config,
            config_file_path: None,
            selected_section: None,
        }
    }

    /// Load the first configuration file found by discovery, or built-in defaults
    pub fn load() -> Result<Self> {
        match discover_config_files().into_iter().find(|path| path.is_file()) {
            Some(path) => Self::load_from_file(path),
            None => {
                info!("No configuration file found, using built-in defaults");
                Ok(Self::from_config(Configuration::new()))
            }
        }
    }

    pub fn load_from_file(path: PathBuf) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = parse_toml_config(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        info!("Loaded configuration from: {}", path.display());
        Ok(Self {
            config,
            config_file_path: Some(path),
            selected_section: None,
        })
    }

    pub fn config_file_path(&self) -> Option<&Path> {
        self.config_file_path.as_deref()
    }

    /// Prefer `section` over the requested one in every lookup (`--config-name`)
    pub fn select_section(&mut self, section: String) {
        if !self.config.contains_key(&section) {
            debug!("Selected configuration section '{}' is not defined", section);
        }
        self.selected_section = Some(section);
    }

    pub fn get_value(&self, section: &str, key: &str) -> Option<&String> {
        self.selected_section
            .as_deref()
            .into_iter()
            .chain([section, BASE_SECTION])
            .find_map(|name| self.config.get(name).and_then(|values| values.get(key)))
    }

    /// Look up `key` and convert it, naming the offending entry on failure
    fn get_parsed<T>(&self, section: &str, key: &str, parse: impl FnOnce(&str) -> Result<T>) -> Result<Option<T>> {
        self.get_value(section, key)
            .map(|value| parse(value.trim()).with_context(|| format!("Invalid value for {}.{}: {:?}", section, key, value)))
            .transpose()
    }

    pub fn get_bool(&self, section: &str, key: &str) -> Result<Option<bool>> {
        self.get_parsed(section, key, |value| match value.to_lowercase().as_str() {
            "true" | "yes" | "on" => Ok(true),
            "false" | "no" | "off" => Ok(false),
            _ => Err(anyhow!("expected true or false")),
        })
    }

    pub fn get_usize(&self, section: &str, key: &str) -> Result<Option<usize>> {
        self.get_parsed(section, key, |value| value.parse::<usize>().map_err(anyhow::Error::from))
    }

    pub fn get_char(&self, section: &str, key: &str) -> Result<Option<char>> {
        // delimiters may legitimately be whitespace, so no trimming here
        match self.get_value(section, key) {
            Some(value) => parse_char(value)
                .map(Some)
                .with_context(|| format!("Invalid value for {}.{}: {:?}", section, key, value)),
            None => Ok(None),
        }
    }

    pub fn get_log_level(&self, section: &str, key: &str) -> Result<Option<LevelFilter>> {
        self.get_parsed(section, key, crate::logging::parse_log_level)
    }

    pub fn get_path(&self, section: &str, key: &str) -> Option<PathBuf> {
        self.get_value(section, key).map(PathBuf::from)
    }
}

/// Parse a single character; `\t` and `tab` name a tab
pub fn parse_char(value: &str) -> Result<char> {
    if value == "\\t" || value.eq_ignore_ascii_case("tab") {
        return Ok('\t');
    }

    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(anyhow!("Expected a single character, got {:?}", value)),
    }
}

/// Candidate configuration files, most specific first
fn discover_config_files() -> Vec<PathBuf> {
    let paths: Vec<PathBuf> = [
        env::var_os(CONFIG_ENV_VAR).map(PathBuf::from),
        dirs::config_dir().map(|dir| dir.join("callq").join("config.toml")),
        dirs::home_dir().map(|dir| dir.join(".callq.toml")),
        Some(PathBuf::from(".callq.toml")),
    ]
    .into_iter()
    .flatten()
    .collect();

    debug!("Config discovery paths: {:?}", paths);
    paths
}

fn parse_toml_config(content: &str) -> Result<Configuration> {
    let table: toml::Table = content.parse().context("Failed to parse TOML content")?;

    let mut config = Configuration::new();
    flatten_toml_table(&table, None, &mut config);
    Ok(config)
}

fn flatten_toml_table(table: &toml::Table, section: Option<&str>, config: &mut Configuration) {
    for (key, value) in table {
        if let Value::Table(nested) = value {
            let name = match section {
                Some(parent) => format!("{}.{}", parent, key),
                None => key.clone(),
            };
            flatten_toml_table(nested, Some(&name), config);
        } else {
            config
                .entry(section.unwrap_or(BASE_SECTION).to_string())
                .or_default()
                .insert(key.clone(), toml_value_to_string(value));
        }
    }
}

fn toml_value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
