//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;


pub use cli::ProbeArgs;
pub use defaults::{DEFAULT_CONCURRENCY, DEFAULT_CONFIG_FILES, DEFAULT_TIMEOUT_SECS};
pub use parsers::{parse_header, parse_resolve, parse_timeout_secs};
pub use types::OutputFormat;
