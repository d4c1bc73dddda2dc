//! JSON gateway shared by all API lookups.
//!
//! Builds query URLs, performs a single GET through the configured
//! [`HttpClient`], logs the outcome and decodes the body as JSON.

use log::{info, warn};
use serde_json::Value;

use crate::config::Config;
use crate::helpers::http_client::{self, HttpClient, HttpClientError};

/// Gateway to the Wikipedia, Wikidata, Wikimedia and Spotify APIs
#[derive(Debug, Clone)]
pub struct ApiGateway {
    client: Box<dyn HttpClient>,
    config: Config,
}

impl ApiGateway {
    /// Create a gateway with an explicit transport, e.g. a mock in tests
    pub fn new(client: Box<dyn HttpClient>, config: Config) -> Self {
        Self { client, config }
    }

    /// Create a gateway using the ureq transport configured in `config.http`
    pub fn from_config(config: Config) -> Self {
        let client = http_client::new_http_client(config.http.timeout_secs, &config.http.user_agent);
        Self::new(client, config)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// GET `endpoint` with `params` and decode the body as JSON.
    ///
    /// Returns `Ok(None)` when a Wikipedia query reports the page as missing
    /// (the `-1` page key). Transport and decoding failures are returned as
    /// errors and are never retried.
    pub fn get_json(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
        redirects: bool,
        description: &str,
    ) -> Result<Option<Value>, HttpClientError> {
        self.get_json_with_headers(endpoint, params, redirects, description, &[])
    }

    pub fn get_json_with_headers(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
        redirects: bool,
        description: &str,
        headers: &[(&str, &str)],
    ) -> Result<Option<Value>, HttpClientError> {
        let url = build_url(endpoint, params, redirects);

        let response = match self.client.get(&url, headers) {
            Ok(response) => response,
            Err(e) => {
                warn!("GET {} - {} ({}): {}", e.status_label(), description, url, e);
                return Err(e);
            }
        };
        info!("GET {} - {} ({})", response.status, description, url);

        let json: Value = serde_json::from_str(&response.body)
            .map_err(|e| HttpClientError::ParseError(format!("{}: {}", description, e)))?;

        if is_missing_page(&json) {
            return Ok(None);
        }
        Ok(Some(json))
    }
}

/// Join `endpoint` and the encoded query.
///
/// Values are percent-encoded except for `|`, which the MediaWiki APIs expect
/// literally as a list separator. `redirects` is appended as a bare flag.
pub fn build_url(endpoint: &str, params: &[(&str, String)], redirects: bool) -> String {
    let query = params
        .iter()
        .map(|(key, value)| {
            format!("{}={}", urlencoding::encode(key), urlencoding::encode(value).replace("%7C", "|"))
        })
        .collect::<Vec<_>>()
        .join("&");

    let mut url = endpoint.to_string();
    if !query.is_empty() || redirects {
        url.push('?');
    }
    url.push_str(&query);
    if redirects {
        if !query.is_empty() {
            url.push('&');
        }
        url.push_str("redirects");
    }
    url
}

fn is_missing_page(json: &Value) -> bool {
    json.get("query")
        .and_then(|q| q.get("pages"))
        .and_then(|p| p.get("-1"))
        .is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::http_client::testing::MockHttpClient;
    use serde_json::json;

    fn gateway(mock: &MockHttpClient) -> ApiGateway {
        ApiGateway::new(Box::new(mock.clone()), Config::default())
    }

    #[test]
    fn test_build_url_keeps_pipes() {
        let url = build_url(
            "https://en.wikipedia.org/w/api.php",
            &[("prop", "links|revisions".to_string()), ("titles", "Guns_N'_Roses".to_string())],
            true,
        );
        assert_eq!(
            url,
            "https://en.wikipedia.org/w/api.php?prop=links|revisions&titles=Guns_N%27_Roses&redirects"
        );
    }

    #[test]
    fn test_build_url_without_params() {
        assert_eq!(build_url("https://example.org/a/b", &[], false), "https://example.org/a/b");
        assert_eq!(build_url("https://example.org/a", &[], true), "https://example.org/a?redirects");
    }

    #[test]
    fn test_get_json_success() {
        let mock = MockHttpClient::new().respond("example.org", json!({"items": [1, 2]}));
        let result = gateway(&mock).get_json("https://example.org", &[], false, "test").unwrap();
        assert_eq!(result, Some(json!({"items": [1, 2]})));
        assert_eq!(mock.requests(), vec!["https://example.org"]);
    }

    #[test]
    fn test_missing_page_is_no_result() {
        let mock = MockHttpClient::new()
            .respond("example.org", json!({"query": {"pages": {"-1": {"missing": ""}}}}));
        let result = gateway(&mock).get_json("https://example.org", &[], true, "test").unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_status_is_error() {
        let mock = MockHttpClient::new().fail("example.org", 503);
        let result = gateway(&mock).get_json("https://example.org", &[], false, "test");
        assert!(matches!(result, Err(HttpClientError::Status(503))));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let mock = MockHttpClient::new().respond_raw("example.org", "<html>");
        let result = gateway(&mock).get_json("https://example.org", &[], false, "test");
        assert!(matches!(result, Err(HttpClientError::ParseError(_))));
    }
}
