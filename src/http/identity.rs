use rand::Rng;
use rand::rngs::OsRng;

/// Identifying User-Agent sent when random agents are disabled.
pub const DEFAULT_USER_AGENT: &str = concat!("tamperx/", env!("CARGO_PKG_VERSION"));

/// Browser signatures drawn from when random agents are enabled.
pub const USER_AGENT_POOL: [&str; 12] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14.4; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (X11; Linux x86_64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_4_1) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4.1 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36 Edg/124.0.2478.80",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_4_1 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4.1 Mobile/15E148 Safari/604.1",
    "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.6367.113 Mobile Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36 OPR/110.0.0.0",
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:124.0) Gecko/20100101 Firefox/124.0",
];

/// How the `User-Agent` header is chosen for each probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAgentPolicy {
    Fixed(String),
    Random,
}

impl Default for UserAgentPolicy {
    fn default() -> Self {
        Self::Fixed(DEFAULT_USER_AGENT.to_owned())
    }
}

impl UserAgentPolicy {
    #[must_use]
    pub fn from_flag(random_agent: bool) -> Self {
        if random_agent {
            Self::Random
        } else {
            Self::default()
        }
    }

    /// Returns the User-Agent for the next request. Random picks use the OS
    /// entropy source and an unbiased range sample over the pool.
    #[must_use]
    pub fn select(&self) -> &str {
        match self {
            Self::Fixed(agent) => agent,
            Self::Random => pick_random_agent(),
        }
    }
}

fn pick_random_agent() -> &'static str {
    let idx = OsRng.gen_range(0..USER_AGENT_POOL.len());
    USER_AGENT_POOL.get(idx).copied().unwrap_or(DEFAULT_USER_AGENT)
}
