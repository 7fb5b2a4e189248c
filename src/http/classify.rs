//! Transport failure classification.
//!
//! A failed probe is reduced to a [`FailureSignals`] view (structured flags
//! plus a textual description) and then mapped onto the fixed
//! [`TransportCategory`] taxonomy by [`classify`].
use std::error::Error as StdError;
use std::fmt;
use std::io;

use serde::Serialize;

/// Fixed taxonomy of transport-level probe failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransportCategory {
    Timeout,
    TemporaryNetworkError,
    DnsNotFound,
    DnsTemporary,
    DnsError,
    ConnectionRefused,
    HostNotFound,
    NetworkUnreachable,
    ConnectionReset,
    GenericNetworkError,
}

impl TransportCategory {
    pub const ALL: [Self; 10] = [
        Self::Timeout,
        Self::TemporaryNetworkError,
        Self::DnsNotFound,
        Self::DnsTemporary,
        Self::DnsError,
        Self::ConnectionRefused,
        Self::HostNotFound,
        Self::NetworkUnreachable,
        Self::ConnectionReset,
        Self::GenericNetworkError,
    ];

    /// Stable machine-readable identifier.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::TemporaryNetworkError => "temporary-network-error",
            Self::DnsNotFound => "dns-not-found",
            Self::DnsTemporary => "dns-temporary",
            Self::DnsError => "dns-error",
            Self::ConnectionRefused => "connection-refused",
            Self::HostNotFound => "host-not-found",
            Self::NetworkUnreachable => "network-unreachable",
            Self::ConnectionReset => "connection-reset",
            Self::GenericNetworkError => "generic-network-error",
        }
    }

    /// Human-readable label shown next to a failed method.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::TemporaryNetworkError => "temporary network error",
            Self::DnsNotFound => "domain not found",
            Self::DnsTemporary => "temporary DNS error",
            Self::DnsError => "DNS error",
            Self::ConnectionRefused => "connection refused",
            Self::HostNotFound => "host not found",
            Self::NetworkUnreachable => "network unreachable",
            Self::ConnectionReset => "connection reset",
            Self::GenericNetworkError => "network error",
        }
    }
}

impl fmt::Display for TransportCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Name-resolution sub-signals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionSignal {
    pub not_found: bool,
    pub temporary: bool,
}

/// Signals exposed by the request-level wrapper around a network failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestSignal {
    pub timed_out: bool,
    pub temporary: bool,
}

/// Structured view of a failure, as consumed by [`classify`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FailureSignals {
    pub timed_out: bool,
    pub temporary: bool,
    pub resolution: Option<ResolutionSignal>,
    pub request: Option<RequestSignal>,
    pub description: String,
}

const RESOLUTION_MARKERS: [&str; 3] = [
    "dns error",
    "failed to lookup address",
    "name resolution",
];
const RESOLUTION_NOT_FOUND_MARKERS: [&str; 5] = [
    "name or service not known",
    "no address associated",
    "nodename nor servname",
    "no such host",
    "host not found",
];
const RESOLUTION_TEMPORARY_MARKERS: [&str; 2] = ["temporary failure in name resolution", "try again"];

impl FailureSignals {
    /// Builds a signal view carrying only a textual description.
    #[must_use]
    pub fn from_description(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    /// Walks the `source()` chain of `error` and collects every signal it
    /// exposes. Unknown error shapes only contribute their message.
    #[must_use]
    pub fn from_error(error: &(dyn StdError + 'static)) -> Self {
        let mut signals = Self::default();
        let mut messages: Vec<String> = Vec::new();
        let mut current: Option<&(dyn StdError + 'static)> = Some(error);

        while let Some(cause) = current {
            if let Some(request_err) = cause.downcast_ref::<reqwest::Error>() {
                let request = signals.request.get_or_insert_with(RequestSignal::default);
                request.timed_out |= request_err.is_timeout();
            }
            if let Some(io_err) = cause.downcast_ref::<io::Error>() {
                let kind = io_err.kind();
                if kind == io::ErrorKind::TimedOut {
                    signals.timed_out = true;
                } else if matches!(
                    kind,
                    io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock
                ) {
                    signals.temporary = true;
                }
            }
            let message = cause.to_string().to_ascii_lowercase();
            if !message.is_empty() && !messages.iter().any(|seen| seen == &message) {
                messages.push(message);
            }
            current = cause.source();
        }

        signals.description = messages.join(": ");
        if RESOLUTION_MARKERS
            .iter()
            .any(|marker| signals.description.contains(marker))
        {
            signals.resolution = Some(ResolutionSignal {
                not_found: RESOLUTION_NOT_FOUND_MARKERS
                    .iter()
                    .any(|marker| signals.description.contains(marker)),
                temporary: RESOLUTION_TEMPORARY_MARKERS
                    .iter()
                    .any(|marker| signals.description.contains(marker)),
            });
        }
        signals
    }
}

/// Maps a failure onto its [`TransportCategory`]. Structured signals win
/// over text matches; anything unrecognized is a generic network error.
#[must_use]
pub fn classify(signals: &FailureSignals) -> TransportCategory {
    if signals.timed_out {
        return TransportCategory::Timeout;
    }
    if signals.temporary {
        return TransportCategory::TemporaryNetworkError;
    }

    if let Some(resolution) = signals.resolution {
        if resolution.not_found {
            return TransportCategory::DnsNotFound;
        }
        if resolution.temporary {
            return TransportCategory::DnsTemporary;
        }
        return TransportCategory::DnsError;
    }

    let text = signals.description.as_str();
    if let Some(request) = signals.request {
        if request.timed_out {
            return TransportCategory::Timeout;
        }
        if request.temporary {
            return TransportCategory::TemporaryNetworkError;
        }
        if text.contains("connection refused") {
            return TransportCategory::ConnectionRefused;
        }
        if text.contains("no such host") {
            return TransportCategory::HostNotFound;
        }
        if text.contains("network is unreachable") {
            return TransportCategory::NetworkUnreachable;
        }
    }

    if text.contains("connection reset") {
        TransportCategory::ConnectionReset
    } else if text.contains("connection refused") {
        TransportCategory::ConnectionRefused
    } else if text.contains("no such host") {
        TransportCategory::HostNotFound
    } else if text.contains("timeout") {
        TransportCategory::Timeout
    } else {
        TransportCategory::GenericNetworkError
    }
}
