use std::time::Duration;
use log::debug;
use thiserror::Error;

/// Error types that can occur when interacting with HTTP clients
#[derive(Debug, Error)]
pub enum HttpClientError {
    #[error("HTTP request error: {0}")]
    RequestError(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Empty response from server")]
    EmptyResponse,
}

impl HttpClientError {
    /// Status code to report in request log lines
    pub fn status_label(&self) -> String {
        match self {
            HttpClientError::Status(code) => code.to_string(),
            _ => "ERR".to_string(),
        }
    }
}

/// A successful (2xx) response with its decoded body
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// A trait for HTTP client implementations
/// This version avoids generic methods to enable dynamic dispatch
pub trait HttpClient: Send + Sync + std::fmt::Debug {
    /// Send a GET request with optional extra headers.
    ///
    /// Non-2xx responses are reported as `HttpClientError::Status`.
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, HttpClientError>;

    /// Clone the client as a boxed trait object
    fn clone_box(&self) -> Box<dyn HttpClient>;
}

impl Clone for Box<dyn HttpClient> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// An HTTP client implementation using ureq
#[derive(Clone, Debug)]
pub struct UreqHttpClient {
    timeout: Duration,
    user_agent: String,
}

impl UreqHttpClient {
    /// Create a new HTTP client with the specified timeout and user agent
    pub fn new(timeout_secs: u64, user_agent: &str) -> Self {
        Self {
            timeout: Duration::from_secs(timeout_secs),
            user_agent: user_agent.to_string(),
        }
    }
}

impl HttpClient for UreqHttpClient {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, HttpClientError> {
        debug!("GET request to {}", url);

        let mut request = ureq::get(url)
            .timeout(self.timeout)
            .set("User-Agent", &self.user_agent);
        for (name, value) in headers {
            request = request.set(name, value);
        }

        let response = match request.call() {
            Ok(resp) => resp,
            Err(ureq::Error::Status(code, _)) => {
                debug!("GET request to {} returned status {}", url, code);
                return Err(HttpClientError::Status(code));
            }
            Err(e) => {
                debug!("GET request to {} failed: {}", url, e);
                return Err(HttpClientError::RequestError(e.to_string()));
            }
        };

        let status = response.status();
        debug!("Response charset for {}: {}", url, response.charset());

        // ureq decodes using the declared charset, UTF-8 when none is given
        match response.into_string() {
            Ok(body) if body.is_empty() => Err(HttpClientError::EmptyResponse),
            Ok(body) => Ok(HttpResponse { status, body }),
            Err(e) => {
                debug!("Failed to read response body from {}: {}", url, e);
                Err(HttpClientError::ParseError(format!("Failed to read response body: {}", e)))
            }
        }
    }

    fn clone_box(&self) -> Box<dyn HttpClient> {
        Box::new(self.clone())
    }
}

/// Create a new HTTP client using the default implementation
pub fn new_http_client(timeout_secs: u64, user_agent: &str) -> Box<dyn HttpClient> {
    Box::new(UreqHttpClient::new(timeout_secs, user_agent))
}

/// Scripted client for unit tests
#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone)]
    enum Canned {
        Body(String),
        Status(u16),
    }

    /// Answers each request with the first rule whose pattern occurs in the URL.
    /// Unmatched URLs get a 404.
    #[derive(Debug, Clone, Default)]
    pub struct MockHttpClient {
        rules: Arc<Mutex<Vec<(String, Canned)>>>,
        requests: Arc<Mutex<Vec<String>>>,
    }

    impl MockHttpClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(self, pattern: &str, body: serde_json::Value) -> Self {
            self.rules.lock().unwrap().push((pattern.to_string(), Canned::Body(body.to_string())));
            self
        }

        pub fn respond_raw(self, pattern: &str, body: &str) -> Self {
            self.rules.lock().unwrap().push((pattern.to_string(), Canned::Body(body.to_string())));
            self
        }

        pub fn fail(self, pattern: &str, status: u16) -> Self {
            self.rules.lock().unwrap().push((pattern.to_string(), Canned::Status(status)));
            self
        }

        pub fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl HttpClient for MockHttpClient {
        fn get(&self, url: &str, _headers: &[(&str, &str)]) -> Result<HttpResponse, HttpClientError> {
            self.requests.lock().unwrap().push(url.to_string());
            let rules = self.rules.lock().unwrap();
            match rules.iter().find(|(pattern, _)| url.contains(pattern.as_str())) {
                Some((_, Canned::Body(body))) => Ok(HttpResponse { status: 200, body: body.clone() }),
                Some((_, Canned::Status(code))) => Err(HttpClientError::Status(*code)),
                None => Err(HttpClientError::Status(404)),
            }
        }

        fn clone_box(&self) -> Box<dyn HttpClient> {
            Box::new(self.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refused_connection_is_request_error() {
        let client = new_http_client(2, "wikirelated-test");
        let result = client.get("http://127.0.0.1:1/w/api.php", &[]);

        match result {
            Err(e @ HttpClientError::RequestError(_)) => assert_eq!(e.status_label(), "ERR"),
            other => panic!("expected a request error, got {:?}", other),
        }
    }
}
