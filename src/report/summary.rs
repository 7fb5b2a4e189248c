use crate::args::ProbeArgs;

/// Run settings echoed above the result table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary<'a> {
    pub target: &'a str,
    pub proxy: Option<&'a str>,
    pub random_agent: bool,
    pub header_count: usize,
    pub concurrency: usize,
    pub timeout_secs: u64,
}

impl<'a> RunSummary<'a> {
    #[must_use]
    pub fn from_args(args: &'a ProbeArgs, target: &'a str) -> Self {
        Self {
            target,
            proxy: args.proxy_url(),
            random_agent: args.random_agent,
            header_count: args.headers.len(),
            concurrency: args.concurrency_limit(),
            timeout_secs: args.timeout,
        }
    }

    /// Summary lines; proxy, random agent, and header count appear only
    /// when set.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        lines.push(format!("[+] Target Url: {}", self.target));
        if let Some(proxy) = self.proxy {
            lines.push(format!("[+] Using Proxy: {}", proxy));
        }
        if self.random_agent {
            lines.push("[+] Random User-Agent: Enabled".to_owned());
        }
        if self.header_count > 0 {
            lines.push(format!("[+] Custom Headers: {}", self.header_count));
        }
        lines.push(format!("[+] Concurrency: {}", self.concurrency));
        lines.push(format!("[+] Timeout: {}s", self.timeout_secs));
        lines
    }
}
