//! # Console Configuration
//!
//! Unified configuration for the engine components and the binary.
//!
//! Loaded from a TOML file, then overridden by environment variables:
//!
//! | Variable          | Field                     |
//! |-------------------|---------------------------|
//! | `SF_API_DOMAIN`   | `api.api_domain`          |
//! | `SF_MEDIA_DOMAIN` | `media.media_file_domain` |
//! | `SF_TOKEN_PATH`   | `session.token_path`      |

use serde::{Deserialize, Serialize};
use sf_02_request_gateway::GatewayConfig;
use sf_04_effect_orchestrator::Endpoints;
use shared_types::{EntityKind, MediaRef};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

pub const ENV_API_DOMAIN: &str = "SF_API_DOMAIN";
pub const ENV_MEDIA_DOMAIN: &str = "SF_MEDIA_DOMAIN";
pub const ENV_TOKEN_PATH: &str = "SF_TOKEN_PATH";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Complete console configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub api: ApiConfig,
    pub media: MediaConfig,
    pub session: SessionConfig,
    pub paging: PagingConfig,
    pub runtime: RuntimeConfig,
}

impl ConsoleConfig {
    /// Read a TOML file and apply environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.apply_env();
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Apply `SF_*` overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply overrides from any variable source.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(domain) = lookup(ENV_API_DOMAIN) {
            debug!(api_domain = %domain, "API domain overridden from environment");
            self.api.api_domain = domain;
        }
        if let Some(domain) = lookup(ENV_MEDIA_DOMAIN) {
            self.media.media_file_domain = domain;
        }
        if let Some(path) = lookup(ENV_TOKEN_PATH) {
            self.session.token_path = PathBuf::from(path);
        }
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let domain = self.api.api_domain.trim();
        if domain.is_empty() {
            return Err(ConfigError::invalid("api.api_domain", "must not be empty"));
        }
        if !(domain.starts_with("http://") || domain.starts_with("https://")) {
            return Err(ConfigError::invalid(
                "api.api_domain",
                format!("{domain} is not an http(s) URL"),
            ));
        }
        if !self.api.upload_path.starts_with('/') {
            return Err(ConfigError::invalid("api.upload_path", "must start with '/'"));
        }
        if !self.api.login_path.starts_with('/') {
            return Err(ConfigError::invalid("api.login_path", "must start with '/'"));
        }
        if self.api.timeout.is_zero() {
            return Err(ConfigError::invalid("api.timeout", "must be non-zero"));
        }
        if self.api.connect_timeout.is_zero() {
            return Err(ConfigError::invalid("api.connect_timeout", "must be non-zero"));
        }
        if self.paging.default_page_size == 0 {
            return Err(ConfigError::invalid("paging.default_page_size", "must be non-zero"));
        }
        if self.paging.category_page_size == 0 {
            return Err(ConfigError::invalid("paging.category_page_size", "must be non-zero"));
        }
        if self.runtime.event_buffer == 0 {
            return Err(ConfigError::invalid("runtime.event_buffer", "must be non-zero"));
        }
        Ok(())
    }

    #[must_use]
    pub fn gateway(&self) -> GatewayConfig {
        GatewayConfig {
            api_domain: self.api.api_domain.clone(),
            upload_path: self.api.upload_path.clone(),
            timeout: self.api.timeout,
            connect_timeout: self.api.connect_timeout,
        }
    }

    #[must_use]
    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            login_path: self.api.login_path.clone(),
        }
    }
}

/// Storefront API configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub api_domain: String,
    pub upload_path: String,
    pub login_path: String,
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_domain: "http://localhost:3000".to_string(),
            upload_path: "/upload".to_string(),
            login_path: "/login".to_string(),
            timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(3),
        }
    }
}

/// Media file configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Domain relative media references are joined onto.
    pub media_file_domain: String,
    /// Whether uploads are stored by the storefront itself (relative paths)
    /// rather than an external host.
    pub save_media_file_local: bool,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            media_file_domain: "http://localhost:3000/media".to_string(),
            save_media_file_local: true,
        }
    }
}

impl MediaConfig {
    /// URL a logo is shown from.
    ///
    /// With local storage a fresh upload wins over the reference stored on
    /// the record.
    #[must_use]
    pub fn logo_url(&self, stored: Option<&str>, uploaded: Option<&MediaRef>) -> Option<String> {
        let media = match uploaded {
            Some(media) if self.save_media_file_local => media.clone(),
            _ => MediaRef::new(stored?),
        };
        Some(media.resolve(&self.media_file_domain))
    }
}

/// Session persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// File holding the persisted access token.
    pub token_path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_path: PathBuf::from("./.sf-console/access_token"),
        }
    }
}

/// Page sizes used when the caller does not choose one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagingConfig {
    pub default_page_size: u32,
    /// Categories are small and listed in one go.
    pub category_page_size: u32,
}

impl PagingConfig {
    #[must_use]
    pub fn page_size(&self, kind: EntityKind) -> u32 {
        match kind {
            EntityKind::Category => self.category_page_size,
            _ => self.default_page_size,
        }
    }
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            category_page_size: 200,
        }
    }
}

/// Engine runtime parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Capacity of the observer bus.
    pub event_buffer: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_buffer: shared_bus::DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

/// Serde adapter for durations written as `"10s"`, `"500ms"` or `"2m"`.
mod humantime_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if duration.subsec_millis() == 0 {
            serializer.serialize_str(&format!("{}s", duration.as_secs()))
        } else {
            serializer.serialize_str(&format!("{}ms", duration.as_millis()))
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_duration(&s).map_err(serde::de::Error::custom)
    }

    pub(super) fn parse_duration(s: &str) -> Result<Duration, &'static str> {
        let s = s.trim();
        // "ms" before "s": every millisecond value also ends in 's'.
        if let Some(ms) = s.strip_suffix("ms") {
            ms.trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| "invalid milliseconds")
        } else if let Some(secs) = s.strip_suffix('s') {
            secs.trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| "invalid seconds")
        } else if let Some(mins) = s.strip_suffix('m') {
            mins.trim()
                .parse::<u64>()
                .ok()
                .and_then(|m| m.checked_mul(60))
                .map(Duration::from_secs)
                .ok_or("invalid minutes")
        } else {
            s.parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| "invalid duration format")
        }
    }
}
