use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid header format: '{value}'. Expected 'Name: Value'")]
    InvalidHeaderFormat { value: String },
    #[error("Header name must not be empty in '{value}'.")]
    HeaderNameEmpty { value: String },
    #[error("Invalid header name '{header}': {source}")]
    InvalidHeaderName {
        header: String,
        #[source]
        source: reqwest::header::InvalidHeaderName,
    },
    #[error("Invalid header value for '{header}': {source}")]
    InvalidHeaderValue {
        header: String,
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },
    #[error("Invalid resolve entry '{value}'. Expected 'host:ip'.")]
    InvalidResolveFormat { value: String },
    #[error("Invalid resolve address in '{value}': {source}")]
    InvalidResolveAddress {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("Invalid proxy URL '{url}': {source}")]
    InvalidProxyUrl {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Timeout must be > 0 seconds.")]
    TimeoutZero,
    #[error("{0}")]
    Message(String),
}
