use crate::constants::*;

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backend base URL without a trailing slash.
    pub api_base: String,
    /// Prefix for every local storage key.
    pub storage_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            storage_prefix: DEFAULT_STORAGE_PREFIX.to_string(),
        }
    }
}

impl Config {
    /// Builds the configuration from `lookup`, falling back to defaults for
    /// missing or blank keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let api_base = read(ENV_API_BASE, DEFAULT_API_BASE);
        if !(api_base.starts_with("http://") || api_base.starts_with("https://")) {
            return Err(format!(
                "{} must start with http:// or https://, got '{}'",
                ENV_API_BASE, api_base
            ));
        }

        let storage_prefix = read(ENV_STORAGE_PREFIX, DEFAULT_STORAGE_PREFIX);
        if storage_prefix.contains(char::is_whitespace) {
            return Err(format!(
                "{} must not contain whitespace, got '{}'",
                ENV_STORAGE_PREFIX, storage_prefix
            ));
        }

        Ok(Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            storage_prefix,
        })
    }

    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    pub fn storage_key(&self, name: &str) -> String {
        format!("{}.{}", self.storage_prefix, name)
    }
}
