//! Display module for colour management and board rendering
//!
//! This module provides colour support, output formats and the operator board
//! while maintaining terminal compatibility and accessibility.

pub mod board;
pub mod colours;
pub mod config;
pub mod format;
pub mod table;

pub use board::*;
pub use colours::*;
pub use config::*;
pub use format::*;
pub use table::*;
