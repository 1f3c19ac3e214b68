//! Application configuration
//!
//! - [`ApiConfig`]: where the auth endpoints live, baked in at compile time
//!   from `API_URL` so the WASM bundle needs no runtime lookup.
//! - [`RoutePaths`]: the admin route layout used by guards and flows.
//! - [`Config`] (server only): environment configuration loaded with
//!   `Config::from_env()` after calling `dotenvy::dotenv()`.

/// Default API root when `API_URL` is not set at build time
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// REST API location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// API root without a trailing slash, e.g. `http://localhost:8000/api`
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Configuration compiled into the binary
    pub fn from_build_env() -> Self {
        Self::new(option_env!("API_URL").unwrap_or(DEFAULT_API_URL))
    }

    /// Absolute URL for an API path such as `auth/login/`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn login_url(&self) -> String {
        self.endpoint("auth/login/")
    }

    pub fn register_url(&self) -> String {
        self.endpoint("auth/register/")
    }

    pub fn verify_url(&self) -> String {
        self.endpoint("auth/verify/")
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_build_env()
    }
}

/// Route layout of the admin area
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePaths {
    pub root: String,
    pub login: String,
    pub register: String,
    pub dashboard: String,
}

impl RoutePaths {
    /// Whether `path` is one of the anonymous-only pages
    pub fn is_anonymous_only(&self, path: &str) -> bool {
        path == self.login || path == self.register
    }
}

impl Default for RoutePaths {
    fn default() -> Self {
        Self {
            root: "/".to_string(),
            login: "/admin/login".to_string(),
            register: "/admin/register".to_string(),
            dashboard: "/admin/dashboard".to_string(),
        }
    }
}

/// Server configuration loaded from environment variables.
#[cfg(feature = "ssr")]
#[derive(Debug, Clone)]
pub struct Config {
    /// API root the server advertises in its startup log
    /// Example: https://api.example.com/api
    pub api_url: String,

    /// `tracing_subscriber` filter directive
    /// Example: info,portfolio_admin=debug
    pub log_filter: Option<String>,
}

#[cfg(feature = "ssr")]
impl Config {
    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` before this to load from `.env` file.
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            log_filter: std::env::var("RUST_LOG").ok(),
        }
    }

    /// Check if a log filter is configured
    pub fn has_log_filter(&self) -> bool {
        self.log_filter.is_some()
    }

    pub fn api(&self) -> ApiConfig {
        ApiConfig::new(self.api_url.clone())
    }
}
