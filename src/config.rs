//! Console connection settings.
//!
//! Values come from the environment with production defaults; every field can
//! also be set in code with the `with_*` setters.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `QIANFAN_CONSOLE_BASE_URL` | `https://qianfan.baidubce.com` |
//! | `QIANFAN_BEARER_TOKEN` | unset |
//! | `QIANFAN_HTTP_TIMEOUT_SECS` | `60` |
//! | `QIANFAN_PROXY_URL` | unset |

use crate::{Error, ErrorContext, Result};
use std::env;
use std::time::Duration;
use url::Url;

pub const DEFAULT_CONSOLE_BASE_URL: &str = "https://qianfan.baidubce.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

const ENV_BASE_URL: &str = "QIANFAN_CONSOLE_BASE_URL";
const ENV_BEARER_TOKEN: &str = "QIANFAN_BEARER_TOKEN";
const ENV_TIMEOUT_SECS: &str = "QIANFAN_HTTP_TIMEOUT_SECS";
const ENV_PROXY_URL: &str = "QIANFAN_PROXY_URL";

#[derive(Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub base_url: String,
    pub bearer_token: Option<String>,
    pub timeout_secs: u64,
    pub proxy_url: Option<String>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CONSOLE_BASE_URL.to_string(),
            bearer_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            proxy_url: None,
        }
    }
}

// Keep the token out of logs.
impl std::fmt::Debug for ConsoleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleConfig")
            .field("base_url", &self.base_url)
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "******"))
            .field("timeout_secs", &self.timeout_secs)
            .field("proxy_url", &self.proxy_url)
            .finish()
    }
}

impl ConsoleConfig {
    /// Load from the process environment. Unset or empty variables keep their default.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load through an arbitrary lookup, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(base_url) = get(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        config.bearer_token = get(ENV_BEARER_TOKEN);
        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            config.timeout_secs = raw.trim().parse::<u64>().map_err(|_| {
                Error::configuration_with_context(
                    format!("timeout must be a whole number of seconds, got '{}'", raw),
                    ErrorContext::new()
                        .with_field_path(ENV_TIMEOUT_SECS)
                        .with_source("console_config"),
                )
            })?;
        }
        config.proxy_url = get(ENV_PROXY_URL);

        config.validate()?;
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_proxy_url(mut self, proxy_url: impl Into<String>) -> Self {
        self.proxy_url = Some(proxy_url.into());
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check that the base URL is an absolute http(s) URL and the timeout is non-zero.
    pub fn validate(&self) -> Result<()> {
        let parsed = Url::parse(&self.base_url).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid console base url '{}': {}", self.base_url, e),
                ErrorContext::new()
                    .with_field_path(ENV_BASE_URL)
                    .with_source("console_config"),
            )
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::configuration_with_context(
                format!("console base url must be http or https, got '{}'", parsed.scheme()),
                ErrorContext::new()
                    .with_field_path(ENV_BASE_URL)
                    .with_source("console_config"),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(Error::configuration_with_context(
                "timeout must be greater than zero",
                ErrorContext::new()
                    .with_field_path(ENV_TIMEOUT_SECS)
                    .with_source("console_config"),
            ));
        }
        Ok(())
    }
}
