pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CONCURRENCY: i64 = 8;

/// Config files picked up from the working directory when `--config` is not
/// given, in lookup order.
pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["tamperx.toml", "tamperx.json"];
