//! Environment configuration
//!
//! | Variable | Default |
//! | --- | --- |
//! | `VAULTDOCK_HOST` | `0.0.0.0` |
//! | `VAULTDOCK_PORT` | `5001` |
//! | `VAULTDOCK_OTLP_ENDPOINT` | unset (no trace export) |
//! | `VAULTDOCK_LLM_PROVIDER` | unset (auto) |
//! | `VAULTDOCK_LLM_MODEL` | provider default |
//! | `OPENAI_API_KEY`, `ANTHROPIC_API_KEY` | unset |
//! | `OPENAI_BASE_URL`, `ANTHROPIC_BASE_URL` | public endpoints |

use std::net::SocketAddr;

use crate::providers::{ProviderConfig, ProviderKind};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5001;

/// Error type for configuration loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidPort(String),
    InvalidAddr(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidPort(v) => write!(f, "Invalid VAULTDOCK_PORT: {}", v),
            ConfigError::InvalidAddr(v) => write!(f, "Invalid listen address: {}", v),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Raw provider-related settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderEnv {
    pub explicit: Option<String>,
    pub model: Option<String>,
    pub openai_key: Option<String>,
    pub anthropic_key: Option<String>,
    pub openai_base_url: Option<String>,
    pub anthropic_base_url: Option<String>,
}

impl ProviderEnv {
    fn key_for(&self, kind: ProviderKind) -> Option<&str> {
        match kind {
            ProviderKind::OpenAi => self.openai_key.as_deref(),
            ProviderKind::Anthropic => self.anthropic_key.as_deref(),
        }
    }

    fn base_url_for(&self, kind: ProviderKind) -> Option<String> {
        match kind {
            ProviderKind::OpenAi => self.openai_base_url.clone(),
            ProviderKind::Anthropic => self.anthropic_base_url.clone(),
        }
    }
}

/// Pick a provider from the available credentials.
///
/// An explicit provider wins when its key is set; otherwise Anthropic, then
/// OpenAI. Returns `None` when no usable key exists.
pub fn select_provider(env: &ProviderEnv) -> Option<ProviderConfig> {
    let explicit = env
        .explicit
        .as_deref()
        .and_then(ProviderKind::parse)
        .filter(|kind| env.key_for(*kind).is_some());

    let kind = explicit.or_else(|| {
        [ProviderKind::Anthropic, ProviderKind::OpenAi]
            .into_iter()
            .find(|kind| env.key_for(*kind).is_some())
    })?;

    let api_key = env.key_for(kind)?.to_string();
    let model = env
        .model
        .clone()
        .unwrap_or_else(|| kind.default_model().to_string());

    Some(ProviderConfig {
        provider: kind,
        model,
        api_key,
        base_url: env.base_url_for(kind),
    })
}

/// Process configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub otlp_endpoint: Option<String>,
    pub provider: Option<ProviderConfig>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port = match get("VAULTDOCK_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => DEFAULT_PORT,
        };

        let provider_env = ProviderEnv {
            explicit: get("VAULTDOCK_LLM_PROVIDER"),
            model: get("VAULTDOCK_LLM_MODEL"),
            openai_key: get("OPENAI_API_KEY"),
            anthropic_key: get("ANTHROPIC_API_KEY"),
            openai_base_url: get("OPENAI_BASE_URL"),
            anthropic_base_url: get("ANTHROPIC_BASE_URL"),
        };

        Ok(Self {
            host: get("VAULTDOCK_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            otlp_endpoint: get("VAULTDOCK_OTLP_ENDPOINT"),
            provider: select_provider(&provider_env),
        })
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|_| ConfigError::InvalidAddr(addr))
    }
}
