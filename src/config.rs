//! Site-specific configuration.
//!
//! The original plugin kept these values as mutable fields on a global
//! object; here they are an immutable value handed to the source at
//! construction time. The search query parameter and the popular sort key
//! have changed between site revisions, so both are configurable rather
//! than hard-coded.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, SourceError};

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Scheme + host, no trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Fixed client identifier sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Sort key for the popular listing: `/sort/<popular_sort>[/<page>]`.
    #[serde(default = "default_popular_sort")]
    pub popular_sort: String,

    /// Query parameter name for `/search?<search_param>=...`.
    #[serde(default = "default_search_param")]
    pub search_param: String,

    /// Cap on entries returned per listing/search page.
    #[serde(default = "default_max_list_results")]
    pub max_list_results: usize,

    /// Cap on genres kept from a detail page.
    #[serde(default = "default_max_genres")]
    pub max_genres: usize,

    /// Minimum length (chars) for an extraction stage's output to count.
    #[serde(default = "default_min_content_len")]
    pub min_content_len: usize,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://freewebnovel.com".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string()
}

fn default_popular_sort() -> String {
    "most-popular".to_string()
}

fn default_search_param() -> String {
    "q".to_string()
}

fn default_max_list_results() -> usize {
    40
}

fn default_max_genres() -> usize {
    6
}

fn default_min_content_len() -> usize {
    50
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            popular_sort: default_popular_sort(),
            search_param: default_search_param(),
            max_list_results: default_max_list_results(),
            max_genres: default_max_genres(),
            min_content_len: default_min_content_len(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SourceConfig {
    /// Loads configuration from a TOML file. Missing keys fall back to
    /// their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| SourceError::Config(format!("{}: {}", path.display(), e)))?;
        let mut config: SourceConfig =
            toml::from_str(&text).map_err(|e| SourceError::Config(e.to_string()))?;
        // A trailing slash would produce double slashes in every URL.
        while config.base_url.ends_with('/') {
            config.base_url.pop();
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = SourceConfig::default();
        assert_eq!(config.base_url, "https://freewebnovel.com");
        assert_eq!(config.popular_sort, "most-popular");
        assert_eq!(config.search_param, "q");
        assert!(config.min_content_len >= 50);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: SourceConfig =
            toml::from_str("base_url = \"https://example.org\"\nsearch_param = \"searchkey\"")
                .unwrap();
        assert_eq!(config.base_url, "https://example.org");
        assert_eq!(config.search_param, "searchkey");
        assert_eq!(config.max_list_results, 40);
        assert_eq!(config.timeout_secs, 30);
    }
}
