use biobank_core::paging::DEFAULT_PAGE_SIZE;

/// Configuration errors. Reported instead of panicking so the caller can
/// print a useful message.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Client configuration loaded from environment variables.
///
/// All fields have defaults suitable for a local development server.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the REST API (default: `http://localhost:9000`).
    pub api_url: String,
    /// Optional bearer token sent with every request.
    pub api_token: Option<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Page size used by list screens (default: `5`).
    pub page_size: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:9000".to_string(),
            api_token: None,
            request_timeout_secs: 30,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                        | Default                 |
    /// |--------------------------------|-------------------------|
    /// | `BIOBANK_API_URL`              | `http://localhost:9000` |
    /// | `BIOBANK_API_TOKEN`            | unset                   |
    /// | `BIOBANK_REQUEST_TIMEOUT_SECS` | `30`                    |
    /// | `BIOBANK_PAGE_SIZE`            | `5`                     |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let api_url = lookup("BIOBANK_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_url);

        let api_token = lookup("BIOBANK_API_TOKEN").filter(|t| !t.is_empty());

        let request_timeout_secs = match lookup("BIOBANK_REQUEST_TIMEOUT_SECS") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                var: "BIOBANK_REQUEST_TIMEOUT_SECS",
                expected: "u64",
                value,
            })?,
            None => defaults.request_timeout_secs,
        };

        let page_size = match lookup("BIOBANK_PAGE_SIZE") {
            Some(value) => match value.parse::<u32>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "BIOBANK_PAGE_SIZE",
                        expected: "positive integer",
                        value,
                    })
                }
            },
            None => defaults.page_size,
        };

        Ok(Self {
            api_url,
            api_token,
            request_timeout_secs,
            page_size,
        })
    }
}
