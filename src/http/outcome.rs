use serde::{Serialize, Serializer};
use thiserror::Error;

use super::classify::TransportCategory;

/// Method label used for the single outcome of a rejected target.
pub const VALIDATION_METHOD: &str = "VALIDATION";

/// Why a single probe produced no usable response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("invalid URL format")]
    Validation,
    #[error("failed to create request: {detail}")]
    RequestConstruction { detail: String },
    #[error("{0}")]
    Transport(TransportCategory),
    #[error("failed to read response: {detail}")]
    ResponseRead { status: u16, detail: String },
    #[error("probe aborted: {detail}")]
    Interrupted { detail: String },
}

impl ProbeError {
    /// Stable identifier of the error family, with transport failures
    /// reported by their category.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation => "validation-error",
            Self::RequestConstruction { .. } => "request-construction-error",
            Self::Transport(category) => category.id(),
            Self::ResponseRead { .. } => "response-read-error",
            Self::Interrupted { .. } => "interrupted",
        }
    }

    /// Status line that was received before the failure, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::ResponseRead { status, .. } => Some(*status),
            Self::Validation
            | Self::RequestConstruction { .. }
            | Self::Transport(_)
            | Self::Interrupted { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProbeResponse {
    pub status: u16,
    pub content_length: u64,
}

/// Result of probing the target with one method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub method: String,
    pub result: Result<ProbeResponse, ProbeError>,
}

impl ProbeOutcome {
    pub fn success(method: impl Into<String>, status: u16, content_length: u64) -> Self {
        Self {
            method: method.into(),
            result: Ok(ProbeResponse {
                status,
                content_length,
            }),
        }
    }

    pub fn failure(method: impl Into<String>, error: ProbeError) -> Self {
        Self {
            method: method.into(),
            result: Err(error),
        }
    }

    #[must_use]
    pub fn validation() -> Self {
        Self::failure(VALIDATION_METHOD, ProbeError::Validation)
    }

    #[must_use]
    pub fn error(&self) -> Option<&ProbeError> {
        self.result.as_ref().err()
    }

    #[must_use]
    pub fn transport_category(&self) -> Option<TransportCategory> {
        match self.result {
            Err(ProbeError::Transport(category)) => Some(category),
            Ok(_)
            | Err(
                ProbeError::Validation
                | ProbeError::RequestConstruction { .. }
                | ProbeError::ResponseRead { .. }
                | ProbeError::Interrupted { .. },
            ) => None,
        }
    }
}

#[derive(Serialize)]
struct OutcomeRecord<'a> {
    method: &'a str,
    status: Option<u16>,
    content_length: u64,
    error: Option<String>,
    error_kind: Option<&'static str>,
}

impl Serialize for ProbeOutcome {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let record = match &self.result {
            Ok(response) => OutcomeRecord {
                method: &self.method,
                status: Some(response.status),
                content_length: response.content_length,
                error: None,
                error_kind: None,
            },
            Err(error) => OutcomeRecord {
                method: &self.method,
                status: error.status(),
                content_length: 0,
                error: Some(error.to_string()),
                error_kind: Some(error.kind()),
            },
        };
        record.serialize(serializer)
    }
}
