//! Process-level concerns: logging setup and the startup banner.
pub mod banner;
pub mod logger;
