//! Probe execution: target validation, per-method requests, failure
//! classification, and bounded fan-out.
pub mod classify;
mod dispatch;
mod executor;
pub mod identity;
mod outcome;
mod pool;
mod target;

pub use classify::{FailureSignals, TransportCategory, classify};
pub use dispatch::Dispatcher;
pub use executor::{DEFAULT_TIMEOUT, HttpExecutor, ProbeConfig, ProbeExecutor};
pub use identity::{DEFAULT_USER_AGENT, USER_AGENT_POOL, UserAgentPolicy};
pub use outcome::{ProbeError, ProbeOutcome, ProbeResponse, VALIDATION_METHOD};
pub use pool::{PermitPool, ProbePermit};
pub use target::{is_valid_target, validate_target};

/// Methods probed on every run, in report order.
pub const PROBE_METHODS: [&str; 8] = [
    "GET", "HEAD", "POST", "PUT", "DELETE", "CONNECT", "TRACE", "PATCH",
];
