use std::io;
use std::process;

use anyhow::{Context, Result};
use log::{error, info};

use callq::app::{self, OperatorSession};
use callq::{cli, logging};

fn main() {
    if let Err(e) = run() {
        error!("Application error: {:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = cli::parse_args();

    cli::validate_args(&args)?;

    let config_manager = app::load_configuration(&args)?;

    let log_config = app::configure_logging(&args, &config_manager)?;
    logging::init_logger(log_config)?;

    if let Some(path) = config_manager.config_file_path() {
        info!("Using configuration file: {}", path.display());
    }

    let params = app::resolve_queue_params(&args, &config_manager)?;
    let source = app::resolve_source(&args, &config_manager)?;
    let format = app::resolve_board_format(&args, &config_manager)?;

    let colours = app::create_colour_manager(&args, &config_manager)?;
    colours.apply_global_override();

    let mut session = OperatorSession::start(source.clone(), params, colours, format)
        .with_context(|| format!("Failed to load identifiers from {}", source))?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    session.run(stdin.lock(), &mut stdout.lock())
}
