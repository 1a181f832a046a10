//! Identifier ingestion
//!
//! Turns a delimited table, a one-per-line text file or a list of values into
//! the ordered identifier sequence a queue session is built from.

pub mod error;
pub mod lines;
pub mod source;
pub mod table;

pub use error::{IngestError, IngestResult};
pub use lines::parse_lines;
pub use source::IdentifierSource;
pub use table::{read_column, DEFAULT_DELIMITER};
