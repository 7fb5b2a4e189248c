use crate::http::ProbeOutcome;

pub const TABLE_RULE: &str = "--------------------------------";

#[must_use]
pub fn table_header() -> String {
    format!("{:<10} {:<10} {:<11}", "Method", "Status", "Content")
}

/// One row: status and body size, or `ERROR 0 (reason)` for a failed probe.
#[must_use]
pub fn outcome_line(outcome: &ProbeOutcome) -> String {
    match &outcome.result {
        Ok(response) => format!(
            "{:<10} {:<10} {:<11}",
            outcome.method, response.status, response.content_length
        ),
        Err(err) => format!("{:<10} {:<10} {:<11} ({})", outcome.method, "ERROR", "0", err),
    }
}

#[must_use]
pub fn table_lines(outcomes: &[ProbeOutcome]) -> Vec<String> {
    let mut lines = Vec::with_capacity(outcomes.len().saturating_add(2));
    lines.push(table_header());
    lines.push(TABLE_RULE.to_owned());
    lines.extend(outcomes.iter().map(outcome_line));
    lines
}
