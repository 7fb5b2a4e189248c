use std::net::IpAddr;

use crate::error::ValidationError;

/// Parses `Name: Value`, splitting on the first colon and trimming both
/// sides.
///
/// # Errors
///
/// Returns an error when there is no colon or the name is empty.
pub fn parse_header(s: &str) -> Result<(String, String), ValidationError> {
    match s.split_once(':') {
        Some((key, value)) => {
            let key = key.trim();
            if key.is_empty() {
                return Err(ValidationError::HeaderNameEmpty {
                    value: s.to_owned(),
                });
            }
            Ok((key.to_owned(), value.trim().to_owned()))
        }
        None => Err(ValidationError::InvalidHeaderFormat {
            value: s.to_owned(),
        }),
    }
}

/// Parses a `HOST:IP` DNS override. Everything after the first colon is the
/// address, so IPv6 literals need no brackets.
///
/// # Errors
///
/// Returns an error when the host is missing or the address does not parse.
pub fn parse_resolve(s: &str) -> Result<(String, IpAddr), ValidationError> {
    let Some((host, addr)) = s.split_once(':') else {
        return Err(ValidationError::InvalidResolveFormat {
            value: s.to_owned(),
        });
    };
    let host = host.trim();
    if host.is_empty() {
        return Err(ValidationError::InvalidResolveFormat {
            value: s.to_owned(),
        });
    }
    let addr = addr.trim();
    let addr = addr
        .strip_prefix('[')
        .and_then(|inner| inner.strip_suffix(']'))
        .unwrap_or(addr);
    let ip = addr
        .parse::<IpAddr>()
        .map_err(|err| ValidationError::InvalidResolveAddress {
            value: s.to_owned(),
            source: err,
        })?;
    Ok((host.to_ascii_lowercase(), ip))
}

/// Parses a timeout in whole seconds.
///
/// # Errors
///
/// Returns an error when the value is not a number or is zero.
pub fn parse_timeout_secs(s: &str) -> Result<u64, ValidationError> {
    let secs = s
        .trim()
        .parse::<u64>()
        .map_err(|err| ValidationError::Message(format!("Invalid timeout '{}': {}", s, err)))?;
    if secs == 0 {
        return Err(ValidationError::TimeoutZero);
    }
    Ok(secs)
}
