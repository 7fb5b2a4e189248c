//! Core library for the `tamperx` CLI.
//!
//! This crate provides the building blocks used by the binary: CLI argument
//! types, configuration parsing, probe execution and failure
//! classification, and result rendering. The primary user-facing interface
//! is the `tamperx` command-line application; the [`http`] module can also
//! be driven directly with a custom [`http::ProbeExecutor`].
pub mod args;
pub mod config;
pub mod error;
pub mod http;
pub mod report;
pub mod system;
