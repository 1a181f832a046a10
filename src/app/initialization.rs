//! Application initialization and configuration
//!
//! Every setting resolves as: command-line flag, then configuration file,
//! then built-in default.

use anyhow::{Context, Result};
use log::{debug, LevelFilter};

use crate::cli::Args;
use crate::config::{parse_char, ConfigManager};
use crate::display::{BoardFormat, ColourConfig, ColourManager, ColourTheme};
use crate::ingest::IdentifierSource;
use crate::logging::{self, LogConfig, LogDestination, LogFormat};
use crate::queue::params::{DEFAULT_REFILL_BATCH, DEFAULT_REFILL_THRESHOLD, DEFAULT_STAGING_CAPACITY};
use crate::queue::QueueParams;

pub fn load_configuration(args: &Args) -> Result<ConfigManager> {
    let mut manager = if let Some(config_file) = &args.config_file {
        debug!("Loading configuration from explicit file: {}", config_file.display());
        ConfigManager::load_from_file(config_file.clone())?
    } else {
        ConfigManager::load()?
    };

    if let Some(section_name) = &args.config_name {
        manager.select_section(section_name.clone());
    }

    Ok(manager)
}

pub fn configure_logging(args: &Args, config: &ConfigManager) -> Result<LogConfig> {
    let console_level = if args.debug {
        LevelFilter::Trace
    } else if args.verbose {
        LevelFilter::Debug
    } else if args.quiet {
        LevelFilter::Error
    } else {
        config
            .get_log_level("base", "console-level")?
            .unwrap_or(LevelFilter::Warn)
    };

    let format = match args.log_format.as_deref().or(config.get_value("base", "log-format").map(String::as_str)) {
        Some(format) => format.parse::<LogFormat>().map_err(|e| anyhow::anyhow!(e))?,
        None => LogFormat::Text,
    };

    let log_file = args.log_file.clone().or_else(|| config.get_path("base", "log-file"));

    let file_level = match &args.log_file_level {
        Some(level) => Some(logging::parse_log_level(level)?),
        None => config.get_log_level("base", "file-log-level")?,
    };

    let (destination, file_level) = match log_file {
        Some(path) => {
            let level = file_level.unwrap_or(console_level);
            debug!("File logging enabled: {} (level: {:?})", path.display(), level);
            (LogDestination::Both(path), Some(level))
        }
        None => (LogDestination::Console, None),
    };

    Ok(LogConfig {
        console_level,
        file_level,
        format,
        destination,
    })
}

/// Resolve the staging window parameters and validate their ranges
pub fn resolve_queue_params(args: &Args, config: &ConfigManager) -> Result<QueueParams> {
    let capacity = match args.capacity {
        Some(n) => n,
        None => config.get_usize("queue", "staging-capacity")?.unwrap_or(DEFAULT_STAGING_CAPACITY),
    };
    let threshold = match args.threshold {
        Some(y) => y,
        None => config.get_usize("queue", "refill-threshold")?.unwrap_or(DEFAULT_REFILL_THRESHOLD),
    };
    let batch = match args.batch {
        Some(z) => z,
        None => config.get_usize("queue", "refill-batch")?.unwrap_or(DEFAULT_REFILL_BATCH),
    };

    let params = QueueParams::new(capacity, threshold, batch).context("Invalid queue parameters")?;
    debug!("Queue parameters: {:?}", params);
    Ok(params)
}

/// Resolve the identifier source, filling table options from the `[input]` section
pub fn resolve_source(args: &Args, config: &ConfigManager) -> Result<IdentifierSource> {
    let column = args.column.clone().or_else(|| config.get_value("input", "column").cloned());

    let delimiter = match &args.delimiter {
        Some(value) => Some(parse_char(value).context("Invalid --delimiter")?),
        None => config.get_char("input", "delimiter")?,
    };

    args.identifier_source(column, delimiter)
        .context("No identifier source given")
}

pub fn resolve_board_format(args: &Args, config: &ConfigManager) -> Result<BoardFormat> {
    match args.output.as_deref().or(config.get_value("display", "output").map(String::as_str)) {
        Some(format) => format.parse::<BoardFormat>().map_err(|e| anyhow::anyhow!(e)),
        None => Ok(BoardFormat::default()),
    }
}

/// Create a ColourManager from CLI arguments and configuration file
pub fn create_colour_manager(args: &Args, config: &ConfigManager) -> Result<ColourManager> {
    let mut colour_config = ColourConfig::default();

    if let Some(enabled) = config.get_bool("display", "color")? {
        colour_config.set_enabled(enabled);
    }
    if let Some(theme) = config.get_value("display", "theme") {
        colour_config.set_theme(theme.parse::<ColourTheme>().map_err(|e| anyhow::anyhow!(e))?);
    }

    Ok(ColourManager::from_color_args(args.no_color, args.color, Some(colour_config)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Configuration;
    use crate::display::ColourPalette;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn config_with(section: &str, entries: &[(&str, &str)]) -> ConfigManager {
        let mut config = Configuration::new();
        let values: HashMap<String, String> =
            entries.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        config.insert(section.to_string(), values);
        ConfigManager::from_config(config)
    }

    fn inline_args() -> Args {
        Args {
            ids: vec!["1".to_string()],
            ..Args::default()
        }
    }

    #[test]
    fn test_queue_params_defaults() {
        let params = resolve_queue_params(&inline_args(), &ConfigManager::from_config(Configuration::new())).unwrap();
        assert_eq!(params, QueueParams::default());
    }

    #[test]
    fn test_queue_params_precedence() {
        let config = config_with("queue", &[("staging-capacity", "20"), ("refill-threshold", "8"), ("refill-batch", "6")]);
        let mut args = inline_args();
        args.threshold = Some(3);

        let params = resolve_queue_params(&args, &config).unwrap();
        assert_eq!(params.staging_capacity(), 20);
        assert_eq!(params.refill_threshold(), 3);
        assert_eq!(params.refill_batch(), 6);
    }

    #[test]
    fn test_queue_params_out_of_range() {
        let mut args = inline_args();
        args.capacity = Some(4);
        args.threshold = Some(5);
        let err = resolve_queue_params(&args, &ConfigManager::from_config(Configuration::new())).unwrap_err();
        assert!(format!("{:#}", err).contains("refill threshold"));

        let config = config_with("queue", &[("staging-capacity", "lots")]);
        assert!(resolve_queue_params(&inline_args(), &config).is_err());
    }

    #[test]
    fn test_logging_defaults_and_flags() {
        let empty = ConfigManager::from_config(Configuration::new());
        let log_config = configure_logging(&inline_args(), &empty).unwrap();
        assert_eq!(log_config.console_level, LevelFilter::Warn);
        assert_eq!(log_config.destination, LogDestination::Console);
        assert_eq!(log_config.format, LogFormat::Text);

        let mut args = inline_args();
        args.verbose = true;
        args.log_file = Some(PathBuf::from("/tmp/callq.log"));
        let log_config = configure_logging(&args, &empty).unwrap();
        assert_eq!(log_config.console_level, LevelFilter::Debug);
        assert_eq!(log_config.file_level, Some(LevelFilter::Debug));
        assert_eq!(log_config.destination, LogDestination::Both(PathBuf::from("/tmp/callq.log")));
    }

    #[test]
    fn test_logging_from_config() {
        let config = config_with("base", &[("console-level", "info"), ("log-format", "json")]);
        let log_config = configure_logging(&inline_args(), &config).unwrap();
        assert_eq!(log_config.console_level, LevelFilter::Info);
        assert_eq!(log_config.format, LogFormat::Json);
    }

    #[test]
    fn test_source_uses_input_section() {
        let config = config_with("input", &[("column", "ticket"), ("delimiter", ";")]);
        let args = Args {
            csv: Some(PathBuf::from("q.csv")),
            ..Args::default()
        };

        let source = resolve_source(&args, &config).unwrap();
        assert_eq!(
            source,
            IdentifierSource::Table {
                path: PathBuf::from("q.csv"),
                column: Some("ticket".to_string()),
                delimiter: ';',
            }
        );
    }

    #[test]
    fn test_board_format_resolution() {
        let config = config_with("display", &[("output", "compact")]);
        assert_eq!(resolve_board_format(&inline_args(), &config).unwrap(), BoardFormat::Compact);

        let mut args = inline_args();
        args.output = Some("json".to_string());
        assert_eq!(resolve_board_format(&args, &config).unwrap(), BoardFormat::Json);
    }

    #[test]
    fn test_colour_manager_from_config() {
        let config = config_with("display", &[("color", "false"), ("theme", "light")]);
        let manager = create_colour_manager(&inline_args(), &config).unwrap();
        assert!(!manager.colours_enabled());
        assert_eq!(*manager.palette(), ColourPalette::light());

        let config = config_with("display", &[("theme", "neon")]);
        assert!(create_colour_manager(&inline_args(), &config).is_err());
    }
}
