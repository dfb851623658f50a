//! HTTP response handling

use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;

/// HTTP response wrapper.
#[derive(Debug)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
    elapsed: std::time::Duration,
}

/// Raw response wrapper that provides access to both the parsed body and HTTP metadata.
///
/// Returned by the `with_raw_response()` mode on resources, giving access to:
/// - Response headers
/// - HTTP status code
/// - Parsed response body
/// - Timing information (elapsed duration)
///
/// # Example
///
/// ```rust,no_run
/// # use devprobe::Client;
/// # async fn example(client: Client) -> Result<(), Box<dyn std::error::Error>> {
/// let raw = client.objects().with_raw_response().list().await?;
///
/// println!("Status: {}", raw.status_code());
/// println!("Elapsed: {:?}", raw.elapsed());
/// println!("Catalog size: {}", raw.parsed().len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RawResponse<T> {
    /// The parsed response body
    parsed: T,
    /// HTTP status code
    status: StatusCode,
    /// Response headers
    headers: HeaderMap,
    /// Time elapsed for the complete request/response cycle
    elapsed: std::time::Duration,
}

impl Response {
    /// Create a new response.
    pub fn new(
        status: StatusCode,
        headers: HeaderMap,
        body: Vec<u8>,
        elapsed: std::time::Duration,
    ) -> Self {
        Self {
            status,
            headers,
            body,
            elapsed,
        }
    }

    /// Get the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Get the status code as a bare number.
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Get the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get the `content-type` header value, if readable as a string.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }

    /// Get the raw body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Time elapsed for the complete request/response cycle.
    pub fn elapsed(&self) -> std::time::Duration {
        self.elapsed
    }

    /// Get the body as a string.
    pub fn text(&self) -> Result<String, crate::error::Error> {
        String::from_utf8(self.body.clone())
            .map_err(|e| crate::error::Error::ResponseValidation(e.to_string()))
    }

    /// Parse the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, crate::error::Error> {
        serde_json::from_slice(&self.body).map_err(crate::error::Error::Serialization)
    }

    /// Check if the response is successful (2xx status).
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Check if the response is an error (4xx or 5xx status).
    pub fn is_error(&self) -> bool {
        self.status.is_client_error() || self.status.is_server_error()
    }

    /// Convert this response into a `RawResponse` with a parsed body.
    ///
    /// This is used internally to support `with_raw_response()` mode.
    pub fn into_raw<T: DeserializeOwned>(self) -> Result<RawResponse<T>, crate::error::Error> {
        let parsed =
            serde_json::from_slice(&self.body).map_err(crate::error::Error::Serialization)?;

        Ok(RawResponse::with_metadata(
            parsed,
            self.status,
            self.headers,
            self.elapsed,
        ))
    }

    /// Parse a successful response, converting HTTP errors to typed errors.
    ///
    /// This is the DRY helper that eliminates the repeated error handling
    /// pattern across all resource methods.
    pub fn parse_result<T: DeserializeOwned>(self) -> Result<T, crate::error::Error> {
        if self.is_error() {
            return Err(crate::error::Error::from_response(
                self.status.as_u16(),
                &self.text()?,
            ));
        }
        self.json()
    }

    /// Parse a successful response into a `RawResponse`, converting HTTP errors to typed errors.
    pub fn into_parsed_raw<T: DeserializeOwned>(
        self,
    ) -> Result<RawResponse<T>, crate::error::Error> {
        if self.is_error() {
            return Err(crate::error::Error::from_response(
                self.status.as_u16(),
                &self.text()?,
            ));
        }
        self.into_raw()
    }
}

impl<T> RawResponse<T> {
    /// Create a new raw response.
    pub fn new(parsed: T, status: StatusCode, headers: HeaderMap) -> Self {
        Self {
            parsed,
            status,
            headers,
            elapsed: std::time::Duration::from_secs(0),
        }
    }

    /// Create a new raw response with timing information.
    pub fn with_metadata(
        parsed: T,
        status: StatusCode,
        headers: HeaderMap,
        elapsed: std::time::Duration,
    ) -> Self {
        Self {
            parsed,
            status,
            headers,
            elapsed,
        }
    }

    /// Get a reference to the parsed response body.
    pub fn parsed(&self) -> &T {
        &self.parsed
    }

    /// Consume this raw response and return the parsed body.
    pub fn into_parsed(self) -> T {
        self.parsed
    }

    /// Get the HTTP status code as a bare number.
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Get the HTTP status as a `StatusCode` object.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Get a reference to the response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Time elapsed for the complete request/response cycle.
    pub fn elapsed(&self) -> std::time::Duration {
        self.elapsed
    }

    /// Get a specific header value by name.
    pub fn get_header(&self, name: &str) -> Option<&http::HeaderValue> {
        self.headers.get(name)
    }
}
