//! Shared HTTP plumbing for the route providers.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::ACCEPT;
use rescue_core::ProviderError;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use super::config::HttpRouteProviderConfig;

/// Error type for route provider construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// The configured base URL could not be parsed.
    #[error("invalid base URL `{url}`: {source}")]
    InvalidBaseUrl {
        /// Rejected base URL.
        url: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
}

/// Build the client owned by one provider.
pub(super) fn build_client(config: &HttpRouteProviderConfig) -> Result<Client, ProviderBuildError> {
    Client::builder()
        .user_agent(&config.user_agent)
        .connect_timeout(config.timeout)
        .timeout(config.timeout)
        .build()
        .map_err(ProviderBuildError::HttpClient)
}

/// Validate the base URL and return it without a trailing slash.
pub(super) fn normalise_base_url(base_url: &str) -> Result<String, ProviderBuildError> {
    Url::parse(base_url).map_err(|source| ProviderBuildError::InvalidBaseUrl {
        url: base_url.to_owned(),
        source,
    })?;
    Ok(base_url.trim_end_matches('/').to_owned())
}

/// Append `path` and query `params` to `base`.
pub(super) fn endpoint(base: &str, path: &str, params: &[(&str, String)]) -> Result<Url, ProviderError> {
    let raw = format!("{base}{path}");
    Url::parse_with_params(&raw, params).map_err(|err| ProviderError::Malformed {
        message: format!("cannot build request URL: {err}"),
    })
}

/// Render `url` without its query string so credentials stay out of logs.
pub(super) fn redact(url: &Url) -> String {
    let mut public = url.clone();
    public.set_query(None);
    public.to_string()
}

/// Issue a GET request and decode the JSON body.
pub(super) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: Url,
    accept: Option<&str>,
    timeout: Duration,
) -> Result<T, ProviderError> {
    let public = redact(&url);
    let mut request = client.get(url);
    if let Some(accept) = accept {
        request = request.header(ACCEPT, accept);
    }

    let body = request
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|err| convert_reqwest_error(err, &public, timeout))?
        .text()
        .await
        .map_err(|err| convert_reqwest_error(err, &public, timeout))?;

    serde_json::from_str(&body).map_err(|err| ProviderError::Parse {
        message: err.to_string(),
    })
}

/// Convert a reqwest error to a `ProviderError`.
///
/// The URL embedded in reqwest's message is dropped; `public_url` is the
/// redacted form recorded instead.
pub(super) fn convert_reqwest_error(
    error: reqwest::Error,
    public_url: &str,
    timeout: Duration,
) -> ProviderError {
    if error.is_timeout() {
        return ProviderError::Timeout {
            target: public_url.to_owned(),
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        };
    }

    if let Some(status) = error.status() {
        return ProviderError::HttpStatus {
            url: public_url.to_owned(),
            status: status.as_u16(),
            message: status.canonical_reason().unwrap_or_default().to_owned(),
        };
    }

    ProviderError::Network {
        url: public_url.to_owned(),
        message: error.without_url().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn endpoint_encodes_query_parameters() {
        let url = endpoint(
            "https://maps.googleapis.com",
            "/maps/api/directions/json",
            &[
                ("origin", "10.01,10.01".to_owned()),
                ("key", "a b&c".to_owned()),
            ],
        )
        .expect("valid url");

        assert_eq!(url.path(), "/maps/api/directions/json");
        assert_eq!(url.query(), Some("origin=10.01%2C10.01&key=a+b%26c"));
    }

    #[rstest]
    fn redact_drops_credentials() {
        let url = endpoint(
            "https://api.openrouteservice.org",
            "/v2/directions/driving-car",
            &[("api_key", "secret".to_owned())],
        )
        .expect("valid url");

        let public = redact(&url);

        assert_eq!(public, "https://api.openrouteservice.org/v2/directions/driving-car");
    }

    #[rstest]
    #[case("http://localhost:5000/", "http://localhost:5000")]
    #[case("https://osrm.example.com/prefix", "https://osrm.example.com/prefix")]
    fn base_url_is_trimmed(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalise_base_url(raw).expect("valid"), expected);
    }

    #[rstest]
    fn base_url_must_parse() {
        let err = normalise_base_url("not a url").expect_err("should reject");
        assert!(matches!(err, ProviderBuildError::InvalidBaseUrl { .. }));
    }
}
