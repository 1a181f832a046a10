//! Single-line call queue with a bounded staging window.
//!
//! The [`queue`] module holds the engine; the rest of the crate loads
//! identifiers, resolves settings and runs the operator console.

pub mod app;
pub mod cli;
pub mod config;
pub mod display;
pub mod ingest;
pub mod logging;
pub mod queue;
