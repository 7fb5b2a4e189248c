use serde::Deserialize;

use crate::args::OutputFormat;

/// On-disk config. Every key is optional; values given on the command line
/// or through the environment take precedence.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub url: Option<String>,
    /// Seconds.
    pub timeout: Option<u64>,
    pub concurrency: Option<i64>,
    pub proxy: Option<String>,
    pub random_agent: Option<bool>,
    /// `Name: Value` entries.
    pub headers: Option<Vec<String>>,
    /// `host:ip` entries.
    pub resolve: Option<Vec<String>>,
    pub output_format: Option<OutputFormat>,
    pub no_banner: Option<bool>,
    pub no_color: Option<bool>,
}
