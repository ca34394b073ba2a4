use std::{env, fmt, str::FromStr, time::Duration};

/// Application configuration loaded from environment variables.
///
/// The `Debug` output redacts Redis credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// Whether reads go through the cache at all (default: true)
    pub cache_enabled: bool,
    /// Cache TTL in seconds (default: 600)
    pub cache_ttl_seconds: u64,
    /// Maximum number of cache entries (default: 10,000)
    /// Note: Only used when the `memory` feature is enabled.
    #[allow(dead_code)]
    pub cache_max_entries: usize,
    /// Upper bound for a single cache call in milliseconds (default: 250)
    pub cache_timeout_ms: u64,
    /// Upper bound for a single store call in milliseconds (default: 5,000)
    pub store_timeout_ms: u64,
    /// Upper bound for a whole HTTP request in seconds (default: 10)
    pub request_timeout_secs: u64,
    /// Path to SQLite database file (default: "tasktrack.db")
    /// Note: Only used when the `sqlite` feature is enabled.
    #[allow(dead_code)]
    pub sqlite_path: String,
    /// Full Redis URL; wins over the individual parts when set.
    #[allow(dead_code)]
    pub redis_url: Option<String>,
    /// Redis host (default: "localhost")
    #[allow(dead_code)]
    pub redis_host: String,
    /// Redis port (default: 6379)
    #[allow(dead_code)]
    pub redis_port: u16,
    /// Redis password (default: none)
    #[allow(dead_code)]
    pub redis_password: Option<String>,
    /// Application name reported by the health endpoint (default: "tasktrack")
    pub app_name: String,
    /// Deployment environment reported by the health endpoint (default: "development")
    pub app_environment: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CACHE_ENABLED` - Use the cache (default: true)
    /// - `CACHE_TTL_SECONDS` - Cache TTL in seconds (default: 600)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 10,000)
    /// - `CACHE_TIMEOUT_MS` - Per cache call timeout (default: 250)
    /// - `STORE_TIMEOUT_MS` - Per store call timeout (default: 5,000)
    /// - `REQUEST_TIMEOUT_SECS` - Whole request timeout (default: 10)
    /// - `SQLITE_PATH` - SQLite database path (default: "tasktrack.db")
    /// - `REDIS_URL` - Redis connection URL (default: built from the parts below)
    /// - `REDIS_HOST` / `REDIS_PORT` / `REDIS_PASSWORD` - Redis parts
    ///   (default: "localhost" / 6379 / none)
    /// - `APP_NAME` - Application name (default: "tasktrack")
    /// - `APP_ENVIRONMENT` - Deployment environment (default: "development")
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// Unparsable values fall back to their defaults; empty strings count as
    /// unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            cache_enabled: var("CACHE_ENABLED")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(true),
            cache_ttl_seconds: parse_value(var("CACHE_TTL_SECONDS")).unwrap_or(600),
            cache_max_entries: parse_value(var("CACHE_MAX_ENTRIES")).unwrap_or(10_000),
            cache_timeout_ms: parse_value(var("CACHE_TIMEOUT_MS")).unwrap_or(250),
            store_timeout_ms: parse_value(var("STORE_TIMEOUT_MS")).unwrap_or(5_000),
            request_timeout_secs: parse_value(var("REQUEST_TIMEOUT_SECS")).unwrap_or(10),
            sqlite_path: var("SQLITE_PATH").unwrap_or_else(|| "tasktrack.db".to_string()),
            redis_url: var("REDIS_URL"),
            redis_host: var("REDIS_HOST").unwrap_or_else(|| "localhost".to_string()),
            redis_port: parse_value(var("REDIS_PORT")).unwrap_or(6379),
            redis_password: var("REDIS_PASSWORD"),
            app_name: var("APP_NAME").unwrap_or_else(|| "tasktrack".to_string()),
            app_environment: var("APP_ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
        }
    }

    /// Get cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    /// Get the per cache call timeout as a Duration.
    pub fn cache_timeout(&self) -> Duration {
        Duration::from_millis(self.cache_timeout_ms)
    }

    /// Get the per store call timeout as a Duration.
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }

    /// Get the whole request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Redis connection URL: `REDIS_URL` if set, otherwise built from host,
    /// port and password.
    #[allow(dead_code)]
    pub fn redis_connection_url(&self) -> String {
        if let Some(url) = &self.redis_url {
            return url.clone();
        }
        match &self.redis_password {
            Some(password) => format!(
                "redis://:{}@{}:{}",
                password, self.redis_host, self.redis_port
            ),
            None => format!("redis://{}:{}", self.redis_host, self.redis_port),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("cache_enabled", &self.cache_enabled)
            .field("cache_ttl_seconds", &self.cache_ttl_seconds)
            .field("cache_max_entries", &self.cache_max_entries)
            .field("cache_timeout_ms", &self.cache_timeout_ms)
            .field("store_timeout_ms", &self.store_timeout_ms)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("sqlite_path", &self.sqlite_path)
            .field("redis_url", &self.redis_url.as_deref().map(redact_url))
            .field("redis_host", &self.redis_host)
            .field("redis_port", &self.redis_port)
            .field("redis_password", &self.redis_password.as_ref().map(|_| REDACTED))
            .field("app_name", &self.app_name)
            .field("app_environment", &self.app_environment)
            .finish()
    }
}

const REDACTED: &str = "***";

/// Replaces the userinfo part of a URL (`user:password@`) with `***`.
fn redact_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let (authority, path) = rest.split_at(rest.find('/').unwrap_or(rest.len()));
    match authority.rsplit_once('@') {
        Some((_, host)) => format!("{scheme}://{REDACTED}@{host}{path}"),
        None => url.to_string(),
    }
}

fn parse_value<T: FromStr>(raw: Option<String>) -> Option<T> {
    raw?.trim().parse().ok()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
