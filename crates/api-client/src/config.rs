//! Configuration for the Souk API client
//!
//! Supports environment-based configuration with sensible defaults.

use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Local Supabase started by `supabase start`
const LOCAL_SUPABASE_URL: &str = "http://localhost:54321";

/// Table holding marketplace listings
const DEFAULT_LISTINGS_TABLE: &str = "ads";

/// Environment types
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development (typically localhost Supabase)
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    #[default]
    Production,
}

impl Environment {
    /// Parse from environment variable
    pub fn from_env() -> Self {
        Self::parse(&env::var("SOUK_ENV").unwrap_or_default())
    }

    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "development" | "dev" | "local" => Self::Development,
            "staging" | "stage" => Self::Staging,
            _ => Self::Production,
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Project URL, e.g. `https://<ref>.supabase.co`
    pub supabase_url: String,
    /// Supabase anonymous key (row-level security applies)
    pub anon_key: Option<String>,
    /// Supabase service role key (bypasses row-level security)
    pub service_role_key: Option<String>,
    /// Table queried for listings
    pub listings_table: String,
    /// Request timeout
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// Current environment
    pub environment: Environment,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::development()
    }
}

impl ClientConfig {
    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `SUPABASE_URL`: project URL (required outside development)
    /// - `SUPABASE_ANON_KEY`: anonymous key
    /// - `SUPABASE_SERVICE_ROLE_KEY`: service role key
    /// - `SOUK_LISTINGS_TABLE`: listings table (default `ads`)
    /// - `SOUK_ENV`: environment (development/staging/production)
    /// - `SOUK_TIMEOUT_SECS`: request timeout in seconds
    pub fn from_env() -> ApiResult<Self> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an injectable variable lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> ApiResult<Self> {
        let environment = var("SOUK_ENV")
            .map(|v| Environment::parse(&v))
            .unwrap_or_default();

        let supabase_url = match (var("SUPABASE_URL"), environment) {
            (Some(url), _) => url.trim_end_matches('/').to_string(),
            (None, Environment::Development) => LOCAL_SUPABASE_URL.to_string(),
            (None, _) => return Err(ApiError::missing_env("SUPABASE_URL")),
        };

        let timeout = var("SOUK_TIMEOUT_SECS")
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or_else(|| default_timeout(environment));

        Ok(Self {
            supabase_url,
            anon_key: var("SUPABASE_ANON_KEY"),
            service_role_key: var("SUPABASE_SERVICE_ROLE_KEY"),
            listings_table: var("SOUK_LISTINGS_TABLE")
                .unwrap_or_else(|| DEFAULT_LISTINGS_TABLE.to_string()),
            timeout,
            environment,
        })
    }

    /// Create development configuration (local Supabase)
    #[must_use]
    pub fn development() -> Self {
        Self {
            supabase_url: LOCAL_SUPABASE_URL.to_string(),
            anon_key: None,
            service_role_key: None,
            listings_table: DEFAULT_LISTINGS_TABLE.to_string(),
            timeout: default_timeout(Environment::Development),
            environment: Environment::Development,
        }
    }

    /// Builder-style method to set the project URL
    #[must_use]
    pub fn with_supabase_url(mut self, url: impl Into<String>) -> Self {
        self.supabase_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Builder-style method to set anon key
    #[must_use]
    pub fn with_anon_key(mut self, key: impl Into<String>) -> Self {
        self.anon_key = Some(key.into());
        self
    }

    /// Builder-style method to set service role key
    #[must_use]
    pub fn with_service_role_key(mut self, key: impl Into<String>) -> Self {
        self.service_role_key = Some(key.into());
        self
    }

    /// Builder-style method to set the listings table
    #[must_use]
    pub fn with_listings_table(mut self, table: impl Into<String>) -> Self {
        self.listings_table = table.into();
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// PostgREST base, `<supabase_url>/rest/v1`
    #[must_use]
    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.supabase_url)
    }

    /// Key sent in the `apikey` header: the service key if set, else the anon key
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.service_role_key.as_deref().or(self.anon_key.as_deref())
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.supabase_url.is_empty() {
            return Err(ApiError::config("supabase_url cannot be empty"));
        }

        if !self.supabase_url.starts_with("http://") && !self.supabase_url.starts_with("https://") {
            return Err(ApiError::config("supabase_url must start with http:// or https://"));
        }

        if self.listings_table.is_empty()
            || !self
                .listings_table
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(ApiError::config(format!(
                "invalid listings table name: {:?}",
                self.listings_table
            )));
        }

        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        if self.environment != Environment::Development && self.api_key().is_none() {
            return Err(ApiError::missing_env("SUPABASE_ANON_KEY"));
        }

        Ok(())
    }
}

fn default_timeout(environment: Environment) -> Duration {
    match environment {
        Environment::Development => Duration::from_secs(10),
        Environment::Staging | Environment::Production => Duration::from_secs(30),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert!(config.supabase_url.contains("localhost"));
        assert_eq!(config.listings_table, "ads");
        assert_eq!(config.environment, Environment::Development);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_vars_production() {
        let config = ClientConfig::from_vars(vars(&[
            ("SUPABASE_URL", "https://abc.supabase.co/"),
            ("SUPABASE_ANON_KEY", "anon"),
            ("SOUK_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.rest_url(), "https://abc.supabase.co/rest/v1");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.api_key(), Some("anon"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_vars_requires_url_outside_development() {
        let err = ClientConfig::from_vars(vars(&[("SOUK_ENV", "staging")])).unwrap_err();
        assert!(matches!(err, ApiError::MissingEnvVar(ref v) if v == "SUPABASE_URL"));

        let config = ClientConfig::from_vars(vars(&[("SOUK_ENV", "dev")])).unwrap();
        assert_eq!(config.supabase_url, LOCAL_SUPABASE_URL);
    }

    #[test]
    fn test_service_key_preferred() {
        let config = ClientConfig::development()
            .with_anon_key("anon")
            .with_service_role_key("service");
        assert_eq!(config.api_key(), Some("service"));
    }

    #[test]
    fn test_validation() {
        assert!(ClientConfig::default().with_supabase_url("").validate().is_err());
        assert!(ClientConfig::default().with_supabase_url("ftp://x").validate().is_err());
        assert!(ClientConfig::default().with_listings_table("ads;drop").validate().is_err());
        assert!(ClientConfig::default().with_timeout(Duration::ZERO).validate().is_err());

        let production = ClientConfig::from_vars(vars(&[("SUPABASE_URL", "https://abc.supabase.co")])).unwrap();
        assert!(production.validate().is_err());
    }
}
