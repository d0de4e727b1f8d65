use thiserror::Error;
use url::Url;

/// Environment variable that overrides the service base address.
pub const API_URL_ENV: &str = "REGULATORY_API_URL";
pub const DEFAULT_API_URL: &str = "https://asj234.pythonanywhere.com/api";

pub const MAX_URL_LENGTH: usize = 2048;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Where the report service lives. Paths are joined onto `base_url`, which
/// always ends in `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, ConfigError> {
        let raw = base_url.as_ref().trim();
        let invalid = |reason: &str| ConfigError::InvalidBaseUrl {
            url: truncate(raw),
            reason: reason.to_string(),
        };

        if raw.is_empty() {
            return Err(invalid("URL cannot be empty"));
        }
        if raw.len() > MAX_URL_LENGTH {
            return Err(invalid("URL is too long"));
        }

        let mut parsed = Url::parse(raw).map_err(|e| invalid(&e.to_string()))?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(invalid("only 'http' and 'https' are allowed"));
        }
        if parsed.host_str().is_none() {
            return Err(invalid("URL must have a host"));
        }
        if !parsed.username().is_empty() || parsed.password().is_some() {
            return Err(invalid("credentials in URL are not allowed"));
        }

        parsed.set_query(None);
        parsed.set_fragment(None);
        if !parsed.path().ends_with('/') {
            let path = format!("{}/", parsed.path());
            parsed.set_path(&path);
        }

        Ok(Self {
            base_url: parsed.to_string(),
        })
    }

    /// Reads `REGULATORY_API_URL`, falling back to the default address when
    /// it is unset or unusable.
    pub fn from_env() -> Self {
        match std::env::var(API_URL_ENV) {
            Ok(value) => Self::from_override(Some(&value)),
            Err(_) => Self::from_override(None),
        }
    }

    fn from_override(value: Option<&str>) -> Self {
        let Some(value) = value.filter(|v| !v.trim().is_empty()) else {
            return Self::default();
        };

        match Self::new(value) {
            Ok(config) => {
                tracing::info!(base_url = config.base_url(), "using api base url override");
                config
            }
            Err(e) => {
                tracing::warn!(error = %e, "ignoring api base url override");
                Self::default()
            }
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a service path such as `reports/`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: format!("{DEFAULT_API_URL}/"),
        }
    }
}

fn truncate(url: &str) -> String {
    if url.len() <= 100 {
        url.to_string()
    } else {
        let cut = (0..=100).rev().find(|i| url.is_char_boundary(*i)).unwrap_or(0);
        format!("{}...", &url[..cut])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_hosted_service() {
        let config = ApiConfig::default();
        assert_eq!(
            config.endpoint("reports/"),
            "https://asj234.pythonanywhere.com/api/reports/"
        );
    }

    #[test]
    fn base_without_trailing_slash_keeps_last_segment() {
        let config = ApiConfig::new("http://localhost:8000/api").unwrap();
        assert_eq!(config.endpoint("analytics/"), "http://localhost:8000/api/analytics/");
        assert_eq!(config.endpoint("/translate/"), "http://localhost:8000/api/translate/");
    }

    #[test]
    fn rejects_unusable_urls() {
        assert!(ApiConfig::new("").is_err());
        assert!(ApiConfig::new("   ").is_err());
        assert!(ApiConfig::new("ftp://files.example.com").is_err());
        assert!(ApiConfig::new("not a url").is_err());
        assert!(ApiConfig::new("https://user:pw@example.com/api").is_err());
    }

    #[test]
    fn strips_query_and_fragment() {
        let config = ApiConfig::new("https://example.com/api?x=1#top").unwrap();
        assert_eq!(config.endpoint("reports/"), "https://example.com/api/reports/");
    }

    #[test]
    fn invalid_override_falls_back_to_default() {
        assert_eq!(ApiConfig::from_override(Some("javascript:alert(1)")), ApiConfig::default());
        assert_eq!(ApiConfig::from_override(Some("  ")), ApiConfig::default());
        assert_eq!(ApiConfig::from_override(None), ApiConfig::default());
    }

    #[test]
    fn valid_override_wins() {
        let config = ApiConfig::from_override(Some("http://10.0.2.2:8000/api/"));
        assert_eq!(config.base_url(), "http://10.0.2.2:8000/api/");
        assert_eq!(config.endpoint("reports/"), "http://10.0.2.2:8000/api/reports/");
    }
}
