use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    /// Log filter used when `BABYHUB_LOG_LEVEL` is unset.
    #[must_use]
    pub fn default_log_level(&self) -> &'static str {
        match self {
            Environment::Development => "debug",
            Environment::Test => "warn",
            Environment::Production => "info",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Catalog JSON to serve. `None` uses the catalog bundled into the binary.
    pub catalog_path: Option<PathBuf>,
    /// Base URL of the recommendation/FAQ service, including its `/api` prefix.
    pub assist_base_url: String,
    /// Whole-request timeout for assist calls. Never zero.
    pub assist_timeout_secs: u64,
    /// Connection-establishment timeout for assist calls. Never zero.
    pub assist_connect_timeout_secs: u64,
    pub assist_max_retries: u32,
    pub assist_retry_backoff_base_ms: u64,
    /// Server-wide cap on proxied assist requests per window.
    pub assist_quota_max_requests: usize,
    pub assist_quota_window_secs: u64,
}
