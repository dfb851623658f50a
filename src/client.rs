//! Main client implementation for the device catalog API

use std::sync::Arc;
use std::sync::OnceLock;
use std::time::Duration;

use url::Url;

use crate::{
    config::ClientConfig,
    error::{Error, Result},
    http::RequestBuilder,
    resources::Objects,
};

/// Main client for interacting with the device catalog API.
///
/// The client owns a connection pool and hands out endpoint resources.
/// Cloning is cheap and clones share the same pool.
///
/// # Example
///
/// ```rust,no_run
/// use devprobe::Client;
///
/// let client = Client::new();
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    /// HTTP client for making requests
    http_client: reqwest::Client,
    /// Base URL for the API, normalized with a trailing slash
    base_url: Url,
    /// Default timeout for requests
    timeout: Duration,
    /// Custom headers to include with every request
    default_headers: http::HeaderMap,

    // Lazy-initialized resources
    objects: OnceLock<Objects>,
}

impl Client {
    /// Create a new client against the public service.
    ///
    /// # Panics
    ///
    /// This convenience method panics if the client cannot be built with the
    /// default configuration. For fallible construction with explicit error
    /// handling, use [`Client::try_new()`] instead.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use devprobe::Client;
    ///
    /// let client = Client::new();
    /// ```
    pub fn new() -> Self {
        Self::try_new().expect("Failed to build client with the default configuration")
    }

    /// Create a new client against the public service (fallible version).
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or HTTP client
    /// configuration fails.
    pub fn try_new() -> Result<Self> {
        Self::from_config(ClientConfig::default())
    }

    /// Create a new client builder for advanced configuration.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client from a configuration object.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let base_url_string = config
            .base_url
            .unwrap_or_else(|| crate::DEFAULT_BASE_URL.to_string());

        if base_url_string.trim().is_empty() {
            return Err(Error::InvalidUrl("Base URL cannot be empty".to_string()));
        }

        let mut base_url: Url = base_url_string
            .parse()
            .map_err(|e| Error::InvalidUrl(format!("{}", e)))?;

        // Validate URL scheme
        match base_url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(Error::InvalidUrl(format!(
                    "Invalid URL scheme '{}'. Only 'http' and 'https' are supported.",
                    scheme
                )));
            }
        }

        // Relative joins must keep the full mount path
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let user_agent = config
            .user_agent
            .unwrap_or_else(|| format!("devprobe/{}", crate::VERSION));

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::HttpClient(e.to_string()))?;

        let inner = Arc::new(ClientInner {
            http_client,
            base_url,
            timeout: config.timeout,
            default_headers: config.default_headers,
            objects: OnceLock::new(),
        });

        Ok(Self { inner })
    }

    /// Access the device catalog endpoint.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use devprobe::Client;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = Client::new();
    /// let devices = client.objects().list().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn objects(&self) -> &Objects {
        self.inner
            .objects
            .get_or_init(|| Objects::new(self.clone()))
    }

    /// Create a request builder for an API path.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be constructed from the base URL and path.
    pub(crate) fn request(&self, method: http::Method, path: &str) -> Result<RequestBuilder> {
        let url = self.inner.base_url.join(path).map_err(|e| {
            Error::InvalidUrl(format!(
                "Failed to construct URL from path '{}': {}",
                path, e
            ))
        })?;

        let mut builder = RequestBuilder::new(method, url)
            .with_client(self.inner.http_client.clone())
            .timeout(self.inner.timeout)
            .header("accept", "application/json")
            .header("content-type", "application/json");

        // Add custom default headers
        for (key, value) in &self.inner.default_headers {
            if let Ok(value_str) = value.to_str() {
                builder = builder.header(key.as_str(), value_str);
            }
        }

        Ok(builder)
    }

    /// Get the base URL for the API
    pub(crate) fn base_url(&self) -> &str {
        self.inner.base_url.as_str()
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating a configured Client.
#[derive(Default)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    /// Set the base URL for the API.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = Some(base_url.into());
        self
    }

    /// Set the default timeout for requests.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the user agent header value.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(user_agent.into());
        self
    }

    /// Add a custom default header.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid according to HTTP specifications.
    pub fn default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self> {
        let key_str = key.into();
        let value_str = value.into();

        let key: http::HeaderName = key_str
            .parse()
            .map_err(|_| Error::InvalidHeaderName(key_str.clone()))?;
        let value: http::HeaderValue = value_str
            .parse()
            .map_err(|_| Error::InvalidHeaderValue(value_str.clone()))?;

        self.config.default_headers.insert(key, value);
        Ok(self)
    }

    /// Build the client with the configured options.
    pub fn build(self) -> Result<Client> {
        Client::from_config(self.config)
    }
}
