use clap::Parser;
use std::net::IpAddr;
use std::time::Duration;

use crate::http::{ProbeConfig, UserAgentPolicy};

use super::defaults::{DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT_SECS};
use super::parsers::{parse_header, parse_resolve, parse_timeout_secs};
use super::types::OutputFormat;

#[derive(Debug, Parser, Clone)]
#[clap(
    name = "tamperx",
    version,
    about = "HTTP verb tampering checker - sends every common method to a target and reports the status, body size, or classified network error for each.",
    next_help_heading = "Advanced Options"
)]
pub struct ProbeArgs {
    /// Target URL to probe
    #[arg(long, short, env = "TAMPERX_URL", help_heading = "Common Options")]
    pub url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(
        long,
        short = 't',
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = parse_timeout_secs,
        help_heading = "Common Options"
    )]
    pub timeout: u64,

    /// Maximum probes in flight (values below 1 run probes one at a time)
    #[arg(
        long,
        short = 'c',
        default_value_t = DEFAULT_CONCURRENCY,
        allow_negative_numbers = true,
        help_heading = "Common Options"
    )]
    pub concurrency: i64,

    /// Forward proxy for all schemes (e.g. http://127.0.0.1:8080)
    #[arg(long, short = 'p', env = "TAMPERX_PROXY", help_heading = "Common Options")]
    pub proxy: Option<String>,

    /// Send a random browser User-Agent with each request
    #[arg(long = "random-agent")]
    pub random_agent: bool,

    /// HTTP headers in 'Key: Value' format (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header, help_heading = "Common Options")]
    pub headers: Vec<(String, String)>,

    /// Static DNS override in 'host:ip' format (repeatable)
    #[arg(long = "resolve", value_parser = parse_resolve)]
    pub resolve: Vec<(String, IpAddr)>,

    /// Result rendering
    #[arg(long = "output-format", value_enum, default_value = "text")]
    pub output_format: OutputFormat,

    /// Path to a TOML or JSON config file
    #[arg(long)]
    pub config: Option<String>,

    /// Do not print the banner and run summary
    #[arg(long = "no-banner")]
    pub no_banner: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, short)]
    pub verbose: bool,
}

impl ProbeArgs {
    /// Concurrency limit as a permit count; anything below one becomes one.
    #[must_use]
    pub fn concurrency_limit(&self) -> usize {
        usize::try_from(self.concurrency.max(1)).unwrap_or(usize::MAX)
    }

    /// Proxy URL, ignoring a blank value.
    #[must_use]
    pub fn proxy_url(&self) -> Option<&str> {
        self.proxy
            .as_deref()
            .map(str::trim)
            .filter(|proxy| !proxy.is_empty())
    }

    #[must_use]
    pub fn probe_config(&self) -> ProbeConfig {
        ProbeConfig {
            timeout: Duration::from_secs(self.timeout),
            proxy: self.proxy_url().map(str::to_owned),
            headers: self.headers.clone(),
            user_agent: UserAgentPolicy::from_flag(self.random_agent),
            resolve: self.resolve.clone(),
        }
    }
}
