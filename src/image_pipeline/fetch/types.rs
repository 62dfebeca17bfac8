//! Fetch configuration types

use std::time::Duration;

/// Request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration handed to a fetcher at construction
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Whole-request timeout, covering connect and body transfer
    pub timeout: Duration,
    /// User-Agent header sent with HTTP requests
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl FetchConfig {
    pub fn builder() -> FetchConfigBuilder {
        FetchConfigBuilder::default()
    }
}

/// Builder for FetchConfig
#[derive(Default)]
pub struct FetchConfigBuilder {
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl FetchConfigBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn build(self) -> FetchConfig {
        let default = FetchConfig::default();
        FetchConfig {
            timeout: self.timeout.unwrap_or(default.timeout),
            user_agent: self.user_agent.unwrap_or(default.user_agent),
        }
    }
}
