//! Application orchestration module

pub mod initialization;
pub mod session;

pub use initialization::{
    configure_logging,
    create_colour_manager,
    load_configuration,
    resolve_board_format,
    resolve_queue_params,
    resolve_source,
};
pub use session::{Command, CommandError, Notice, OperatorSession, Reply};
