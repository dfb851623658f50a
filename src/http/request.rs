//! HTTP request builder

use super::Response;
use crate::error::Result;
use crate::observability::{RequestMetadata, RequestTimer, ResponseMetadata};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use std::time::Duration;
use url::Url;

/// Builder for HTTP requests.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: Url,
    headers: HeaderMap,
    query: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    timeout: Duration,
    pub(crate) http_client: Option<reqwest::Client>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            query: Vec::new(),
            body: None,
            timeout: Duration::from_secs(30),
            http_client: None,
        }
    }

    /// Set the HTTP client to use
    pub(crate) fn with_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Set a header.
    ///
    /// # Panics
    /// Panics if the header name or value contains invalid characters.
    /// For fallible header setting, use [`try_header`](Self::try_header) instead.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key_str = key.into();
        let value_str = value.into();

        let key = key_str
            .parse::<HeaderName>()
            .unwrap_or_else(|e| panic!("Invalid header name '{}': {}", key_str, e));
        let value = value_str
            .parse::<HeaderValue>()
            .unwrap_or_else(|e| panic!("Invalid header value '{}': {}", value_str, e));

        self.headers.insert(key, value);
        self
    }

    /// Try to set a header, returning an error if the name or value is invalid.
    ///
    /// This is the fallible version of [`header`](Self::header).
    ///
    /// # Errors
    /// Returns an error if the header name or value contains invalid characters.
    pub fn try_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let key_str = key.into();
        let value_str = value.into();

        let key = key_str
            .parse::<HeaderName>()
            .map_err(|_| crate::error::Error::InvalidHeaderName(key_str.clone()))?;
        let value = value_str
            .parse::<HeaderValue>()
            .map_err(|_| crate::error::Error::InvalidHeaderValue(value_str.clone()))?;

        self.headers.insert(key, value);
        Ok(self)
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Set the request body.
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Send the request and get a response.
    ///
    /// The request is issued exactly once; transport faults map to
    /// [`Error::Timeout`](crate::Error::Timeout) and
    /// [`Error::Connection`](crate::Error::Connection). A response with an
    /// error status is still returned as `Ok`, so callers decide how to
    /// treat non-2xx statuses.
    pub async fn send(self) -> Result<Response> {
        let client = self.http_client.ok_or_else(|| {
            crate::error::Error::HttpClient("No HTTP client configured".to_string())
        })?;

        let mut url = self.url;
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }

        let mut metadata = RequestMetadata::new(self.method.as_str(), url.path());
        if let Some(body) = &self.body {
            metadata = metadata.with_body_size(body.len());
        }
        metadata.log_request();

        // Build reqwest request
        let mut req = client
            .request(self.method.clone(), url.as_str())
            .timeout(self.timeout);

        // Add headers
        for (key, value) in &self.headers {
            req = req.header(key, value);
        }

        // Add body if present
        if let Some(body) = self.body {
            req = req.body(body);
        }

        let timer = RequestTimer::start();
        match req.send().await {
            Ok(resp) => {
                let status = resp.status();
                let headers = resp.headers().clone();
                let body = resp
                    .bytes()
                    .await
                    .map_err(|e| crate::error::Error::Connection(e.to_string()))?
                    .to_vec();
                let elapsed = timer.elapsed();

                let response_metadata =
                    ResponseMetadata::new(status.as_u16(), elapsed).with_body_size(body.len());
                let response = Response::new(status, headers, body, elapsed);

                if response.is_error() {
                    response_metadata
                        .log_error(&metadata, status.canonical_reason().unwrap_or("unknown"));
                } else {
                    response_metadata.log_success(&metadata);
                }

                Ok(response)
            }
            Err(e) if e.is_timeout() => Err(crate::error::Error::Timeout(self.timeout)),
            Err(e) => Err(crate::error::Error::Connection(e.to_string())),
        }
    }

    /// Get the method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Get the URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Get the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get the pending query parameters.
    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    /// Get the timeout.
    pub fn timeout_duration(&self) -> Duration {
        self.timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_url() -> Url {
        "https://example.com/objects"
            .parse()
            .expect("valid test URL")
    }

    #[test]
    fn test_builder_accessors() {
        let builder = RequestBuilder::new(Method::GET, test_url())
            .header("accept", "application/json")
            .query("id", "3,4,10")
            .timeout(Duration::from_secs(5));

        assert_eq!(builder.method(), &Method::GET);
        assert_eq!(builder.url().path(), "/objects");
        assert!(builder.headers().contains_key("accept"));
        assert_eq!(
            builder.query_pairs(),
            &[("id".to_string(), "3,4,10".to_string())]
        );
        assert_eq!(builder.timeout_duration(), Duration::from_secs(5));
    }

    #[test]
    fn test_try_header_rejects_invalid_name() {
        let result = RequestBuilder::new(Method::GET, test_url()).try_header("bad header", "x");
        assert!(matches!(
            result,
            Err(crate::error::Error::InvalidHeaderName(_))
        ));
    }

    #[test]
    fn test_try_header_rejects_invalid_value() {
        let result = RequestBuilder::new(Method::GET, test_url()).try_header("x-probe", "a\nb");
        assert!(matches!(
            result,
            Err(crate::error::Error::InvalidHeaderValue(_))
        ));
    }

    #[tokio::test]
    async fn test_send_without_client_fails() {
        let result = RequestBuilder::new(Method::GET, test_url()).send().await;
        match result {
            Err(crate::error::Error::HttpClient(msg)) => {
                assert!(msg.contains("No HTTP client"));
            }
            _ => panic!("Expected HttpClient error"),
        }
    }
}
