use crate::error::AppResult;
use crate::http::ProbeOutcome;

/// Serializes outcomes as a pretty-printed JSON array, in input order.
///
/// # Errors
///
/// Returns an error when serialization fails.
pub fn render_json(outcomes: &[ProbeOutcome]) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(outcomes)?)
}
