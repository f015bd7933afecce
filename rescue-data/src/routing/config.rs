//! Endpoint and client settings for the HTTP route providers.

use std::time::Duration;

use rescue_core::DEFAULT_ATTEMPT_TIMEOUT;

/// Default user agent for outbound directions requests.
pub const DEFAULT_USER_AGENT: &str = "rescue-routing/0.1";

/// Default Google Directions endpoint.
pub const GOOGLE_DIRECTIONS_BASE_URL: &str = "https://maps.googleapis.com";

/// Default OpenRouteService endpoint.
pub const OPEN_ROUTE_SERVICE_BASE_URL: &str = "https://api.openrouteservice.org";

/// Default public OSRM endpoint.
pub const OSRM_BASE_URL: &str = "https://router.project-osrm.org";

/// Configuration for a single HTTP route provider.
#[derive(Clone, PartialEq, Eq)]
pub struct HttpRouteProviderConfig {
    /// Base URL for the service (e.g., `"https://router.project-osrm.org"`).
    pub base_url: String,
    /// Connect and request timeout.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
    /// Credential appended to requests, when the service needs one.
    pub api_key: Option<String>,
}

impl std::fmt::Debug for HttpRouteProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRouteProviderConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl HttpRouteProviderConfig {
    /// Create a configuration with the given base URL and no credential.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_ATTEMPT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            api_key: None,
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set or clear the credential. Blank keys count as absent.
    #[must_use]
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|key| !key.trim().is_empty());
        self
    }

    /// Credential, if one is configured.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}

/// Settings for the default provider chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingConfig {
    /// Google Directions settings.
    pub google: HttpRouteProviderConfig,
    /// OpenRouteService settings.
    pub open_route_service: HttpRouteProviderConfig,
    /// OSRM settings.
    pub osrm: HttpRouteProviderConfig,
    /// Budget for each provider attempt within the chain.
    pub attempt_timeout: Duration,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            google: HttpRouteProviderConfig::new(GOOGLE_DIRECTIONS_BASE_URL),
            open_route_service: HttpRouteProviderConfig::new(OPEN_ROUTE_SERVICE_BASE_URL),
            osrm: HttpRouteProviderConfig::new(OSRM_BASE_URL),
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
        }
    }
}

impl RoutingConfig {
    /// Apply `timeout` to every provider and to the chain's attempt budget.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.google.timeout = timeout;
        self.open_route_service.timeout = timeout;
        self.osrm.timeout = timeout;
        self.attempt_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn config_builder_pattern() {
        let config = HttpRouteProviderConfig::new("http://example.com")
            .with_timeout(Duration::from_secs(60))
            .with_user_agent("test-agent/1.0")
            .with_api_key(Some("secret".to_owned()));

        assert_eq!(config.base_url, "http://example.com");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.user_agent, "test-agent/1.0");
        assert_eq!(config.api_key(), Some("secret"));
    }

    #[rstest]
    #[case(None)]
    #[case(Some(String::new()))]
    #[case(Some("   ".to_owned()))]
    fn blank_api_keys_are_absent(#[case] key: Option<String>) {
        let config = HttpRouteProviderConfig::new(OSRM_BASE_URL).with_api_key(key);
        assert!(config.api_key().is_none());
    }

    #[rstest]
    fn debug_output_hides_api_key() {
        let config =
            HttpRouteProviderConfig::new(GOOGLE_DIRECTIONS_BASE_URL).with_api_key(Some("AIza-secret".to_owned()));
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("AIza-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[rstest]
    fn routing_timeout_applies_everywhere() {
        let config = RoutingConfig::default().with_timeout(Duration::from_secs(3));
        assert_eq!(config.google.timeout, Duration::from_secs(3));
        assert_eq!(config.open_route_service.timeout, Duration::from_secs(3));
        assert_eq!(config.osrm.timeout, Duration::from_secs(3));
        assert_eq!(config.attempt_timeout, Duration::from_secs(3));
    }
}
