use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Client, Method, Proxy, Response, redirect};
use tracing::{debug, error};

use crate::error::{AppError, AppResult, HttpError, ValidationError};

use super::classify::{FailureSignals, classify};
use super::identity::UserAgentPolicy;
use super::outcome::{ProbeError, ProbeOutcome};
use super::target::validate_target;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Immutable per-run settings shared by every probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    pub timeout: Duration,
    pub proxy: Option<String>,
    /// Custom headers as `(name, value)`; applied after the defaults and
    /// allowed to replace them.
    pub headers: Vec<(String, String)>,
    pub user_agent: UserAgentPolicy,
    /// Static DNS overrides. The URL port is always used.
    pub resolve: Vec<(String, IpAddr)>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            proxy: None,
            headers: Vec::new(),
            user_agent: UserAgentPolicy::default(),
            resolve: Vec::new(),
        }
    }
}

/// Issues a single probe and normalizes whatever happens into an outcome.
#[async_trait]
pub trait ProbeExecutor: Send + Sync {
    async fn execute(&self, method: &str, target: &str) -> ProbeOutcome;
}

/// reqwest-backed executor. TLS verification is disabled so self-signed and
/// misconfigured hosts can still be probed, and redirects are reported
/// as-is rather than followed.
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: Client,
    custom_headers: Vec<(HeaderName, HeaderValue)>,
    user_agent: UserAgentPolicy,
}

impl HttpExecutor {
    /// Builds the shared HTTP client from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error when a custom header or the proxy URL is invalid, or
    /// when the client cannot be built.
    pub fn new(config: &ProbeConfig) -> AppResult<Self> {
        let custom_headers = parse_custom_headers(&config.headers)?;

        let mut client_builder = Client::builder()
            .timeout(config.timeout)
            .redirect(redirect::Policy::none())
            .danger_accept_invalid_certs(true)
            .danger_accept_invalid_hostnames(true);

        client_builder = match config.proxy.as_deref() {
            Some(proxy_url) => {
                let proxy = Proxy::all(proxy_url).map_err(|err| {
                    error!("Invalid proxy URL '{}': {}", proxy_url, err);
                    AppError::validation(ValidationError::InvalidProxyUrl {
                        url: proxy_url.to_owned(),
                        source: err,
                    })
                })?;
                client_builder.proxy(proxy)
            }
            None => client_builder.no_proxy(),
        };

        for (host, ip) in &config.resolve {
            client_builder = client_builder.resolve(host, SocketAddr::new(*ip, 0));
        }

        let client = client_builder
            .build()
            .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))?;

        Ok(Self {
            client,
            custom_headers,
            user_agent: config.user_agent.clone(),
        })
    }

    fn request_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::with_capacity(self.custom_headers.len().saturating_add(2));
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        if let Ok(agent) = HeaderValue::from_str(self.user_agent.select()) {
            headers.insert(USER_AGENT, agent);
        }
        for (name, value) in &self.custom_headers {
            headers.insert(name.clone(), value.clone());
        }
        headers
    }
}

#[async_trait]
impl ProbeExecutor for HttpExecutor {
    async fn execute(&self, method: &str, target: &str) -> ProbeOutcome {
        let url = match validate_target(target) {
            Ok(url) => url,
            Err(err) => return ProbeOutcome::failure(method, err),
        };
        let http_method = match Method::from_bytes(method.as_bytes()) {
            Ok(http_method) => http_method,
            Err(err) => {
                return ProbeOutcome::failure(
                    method,
                    ProbeError::RequestConstruction {
                        detail: err.to_string(),
                    },
                );
            }
        };

        let sent = self
            .client
            .request(http_method, url)
            .headers(self.request_headers())
            .send()
            .await;
        let response = match sent {
            Ok(response) => response,
            Err(err) if err.is_builder() => {
                return ProbeOutcome::failure(
                    method,
                    ProbeError::RequestConstruction {
                        detail: err.to_string(),
                    },
                );
            }
            Err(err) => {
                // The target URL must not feed the text fallbacks.
                let err = err.without_url();
                let signals = FailureSignals::from_error(&err);
                let category = classify(&signals);
                debug!(
                    method,
                    target,
                    category = category.id(),
                    detail = %signals.description,
                    "Probe failed at transport level"
                );
                return ProbeOutcome::failure(method, ProbeError::Transport(category));
            }
        };

        let status = response.status().as_u16();
        match body_length(response).await {
            Ok(length) => ProbeOutcome::success(method, status, length),
            Err(err) => {
                debug!(method, status, error = %err, "Failed to read response body");
                ProbeOutcome::failure(
                    method,
                    ProbeError::ResponseRead {
                        status,
                        detail: err.to_string(),
                    },
                )
            }
        }
    }
}

/// Streams the body to the end and counts its bytes. The response, and the
/// connection it holds, is dropped when this returns.
async fn body_length(mut response: Response) -> Result<u64, reqwest::Error> {
    let mut total: u64 = 0;
    while let Some(chunk) = response.chunk().await? {
        total = total.saturating_add(u64::try_from(chunk.len()).unwrap_or(u64::MAX));
    }
    Ok(total)
}

fn parse_custom_headers(headers: &[(String, String)]) -> AppResult<Vec<(HeaderName, HeaderValue)>> {
    let mut parsed = Vec::with_capacity(headers.len());
    for (key, value) in headers {
        let name = HeaderName::from_bytes(key.as_bytes()).map_err(|err| {
            AppError::validation(ValidationError::InvalidHeaderName {
                header: key.clone(),
                source: err,
            })
        })?;
        let val = HeaderValue::from_str(value).map_err(|err| {
            AppError::validation(ValidationError::InvalidHeaderValue {
                header: key.clone(),
                source: err,
            })
        })?;
        parsed.push((name, val));
    }
    Ok(parsed)
}
