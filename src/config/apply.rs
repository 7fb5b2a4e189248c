use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{ProbeArgs, parse_header, parse_resolve};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Fills in arguments the user did not pass explicitly from `config`.
///
/// # Errors
///
/// Returns an error when a header or resolve entry is malformed, or the
/// timeout is zero.
pub fn apply_config(
    args: &mut ProbeArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_explicit(matches, "url")
        && let Some(url) = config.url.clone()
    {
        args.url = Some(url);
    }

    if !is_explicit(matches, "timeout")
        && let Some(timeout) = config.timeout
    {
        if timeout == 0 {
            return Err(AppError::config(ConfigError::TimeoutZero));
        }
        args.timeout = timeout;
    }

    if !is_explicit(matches, "concurrency")
        && let Some(concurrency) = config.concurrency
    {
        args.concurrency = concurrency;
    }

    if !is_explicit(matches, "proxy")
        && let Some(proxy) = config.proxy.clone()
    {
        args.proxy = Some(proxy);
    }

    if !is_explicit(matches, "random_agent")
        && let Some(random_agent) = config.random_agent
    {
        args.random_agent = random_agent;
    }

    if !is_explicit(matches, "headers")
        && let Some(headers) = config.headers.as_ref()
    {
        let mut parsed = Vec::with_capacity(headers.len());
        for header in headers {
            parsed.push(
                parse_header(header)
                    .map_err(|err| AppError::config(ConfigError::InvalidHeader { source: err }))?,
            );
        }
        args.headers = parsed;
    }

    if !is_explicit(matches, "resolve")
        && let Some(entries) = config.resolve.as_ref()
    {
        let mut parsed = Vec::with_capacity(entries.len());
        for entry in entries {
            parsed.push(
                parse_resolve(entry)
                    .map_err(|err| AppError::config(ConfigError::InvalidResolve { source: err }))?,
            );
        }
        args.resolve = parsed;
    }

    if !is_explicit(matches, "output_format")
        && let Some(format) = config.output_format
    {
        args.output_format = format;
    }

    if !is_explicit(matches, "no_banner")
        && let Some(no_banner) = config.no_banner
    {
        args.no_banner = no_banner;
    }

    if !is_explicit(matches, "no_color")
        && let Some(no_color) = config.no_color
    {
        args.no_color = no_color;
    }

    Ok(())
}

/// True when the value came from the command line or an environment
/// variable rather than a default.
fn is_explicit(matches: &ArgMatches, name: &str) -> bool {
    matches!(
        matches.value_source(name),
        Some(ValueSource::CommandLine | ValueSource::EnvVariable)
    )
}
