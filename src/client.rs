//! Outseta API client.
//!
//! Low-level HTTP client that handles authentication and raw requests.
//! Higher-level operations are implemented via traits on entity types.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::error::{OutsetaError, Result};

const USER_AGENT: &str = concat!("outseta-rs/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Low-level Outseta API client.
///
/// Holds the base URL of an Outseta tenant (for example
/// `https://acme.outseta.com/api/v1`) and the headers sent with every
/// request. Entity-specific operations are implemented via the `Get`,
/// `List`, `Create`, `Update` and `Delete` traits on model types.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use outseta::OutsetaClient;
///
/// # fn example() -> outseta::Result<()> {
/// // Create from environment variables
/// let client = OutsetaClient::from_env()?;
///
/// // Or configure manually
/// let client = OutsetaClient::builder("https://acme.outseta.com/api/v1")
///     .api_key("Outseta my-key:my-secret")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct OutsetaClient {
    http: Client,
    base_url: Arc<Url>,
    headers: Arc<HeaderMap>,
}

impl std::fmt::Debug for OutsetaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutsetaClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl OutsetaClient {
    /// Start configuring a client for the given API base URL.
    pub fn builder(base_url: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(base_url)
    }

    /// Create a client from environment variables.
    ///
    /// Reads `OUTSETA_URL` for the base URL and authenticates with
    /// `OUTSETA_KEY` (sent verbatim as the `Authorization` header) or, when
    /// that is absent or blank, `OUTSETA_ACCESS_TOKEN` (sent as a bearer token).
    ///
    /// # Errors
    ///
    /// Returns an error if the URL or both credentials are missing.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("OUTSETA_URL").map_err(|_| {
            OutsetaError::ConfigMissing("OUTSETA_URL environment variable not set".to_string())
        })?;

        let builder = Self::builder(base_url);
        let builder = if let Some(key) = non_blank_var("OUTSETA_KEY") {
            builder.api_key(key)
        } else if let Some(token) = non_blank_var("OUTSETA_ACCESS_TOKEN") {
            builder.access_key(token)
        } else {
            return Err(OutsetaError::ConfigMissing(
                "set OUTSETA_KEY or OUTSETA_ACCESS_TOKEN".to_string(),
            ));
        };

        builder.build()
    }

    /// Create a new client with an API key and base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the key is blank.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        Self::builder(base_url).api_key(api_key).build()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Make a GET request.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, path: &str) -> Result<Response> {
        let request = self.request(Method::GET, path)?;
        self.execute(request).await
    }

    /// Make a GET request with query parameters.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Response> {
        let request = self.request(Method::GET, path)?.query(query);
        self.execute(request).await
    }

    /// Make a PUT request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let request = self.request(Method::PUT, path)?.json(body);
        self.execute(request).await
    }

    /// Make a PUT request without a body.
    #[tracing::instrument(skip(self))]
    pub async fn put_empty(&self, path: &str) -> Result<Response> {
        let request = self.request(Method::PUT, path)?.body("");
        self.execute(request).await
    }

    /// Make a POST request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let request = self.request(Method::POST, path)?.json(body);
        self.execute(request).await
    }

    /// Make a POST request with query parameters and JSON body.
    #[tracing::instrument(skip(self, query, body))]
    pub async fn post_with_query<Q, B>(&self, path: &str, query: &Q, body: &B) -> Result<Response>
    where
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::POST, path)?.query(query).json(body);
        self.execute(request).await
    }

    /// Make a POST request without a body.
    #[tracing::instrument(skip(self))]
    pub async fn post_empty(&self, path: &str) -> Result<Response> {
        let request = self.request(Method::POST, path)?.body("");
        self.execute(request).await
    }

    /// Make a DELETE request.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> Result<Response> {
        let request = self.request(Method::DELETE, path)?;
        self.execute(request).await
    }

    /// Read a successful response body as JSON.
    pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let body = response.text().await.map_err(OutsetaError::HttpError)?;
        Ok(serde_json::from_str(&body)?)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.base_url.join(path.trim_start_matches('/'))?;
        tracing::debug!(%method, %url, "sending Outseta request");

        Ok(self
            .http
            .request(method, url)
            .headers(self.headers.as_ref().clone()))
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(OutsetaError::HttpError)?;
        tracing::debug!(status = response.status().as_u16(), "Outseta responded");
        Self::check_response(response).await
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        // Handle rate limiting
        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(OutsetaError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let url = response.url().to_string();
        let message = Self::extract_error_message(response, status).await;
        Err(OutsetaError::ApiError {
            message,
            url,
            status_code: Some(status.as_u16()),
        })
    }

    /// Extract error message from a failed response.
    async fn extract_error_message(response: Response, status: reqwest::StatusCode) -> String {
        let body = match response.text().await {
            Ok(b) if !b.trim().is_empty() => b,
            _ => return format!("HTTP {status}"),
        };

        // Outseta reports "Message"; other gateways in front of it use lower case
        if let Ok(json) = serde_json::from_str::<serde_json::Value>(&body) {
            for key in ["Message", "message", "ErrorMessage", "error"] {
                if let Some(msg) = json.get(key).and_then(|m| m.as_str()) {
                    return msg.to_string();
                }
            }
        }

        body
    }
}

/// Value of `name`, treating an unset or blank variable alike.
fn non_blank_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Builder for [`OutsetaClient`].
///
/// Setters never fail; the first invalid setting is reported by
/// [`ClientBuilder::build`].
pub struct ClientBuilder {
    base_url: String,
    headers: Vec<(String, String)>,
    timeout: Duration,
    http: Option<Client>,
    error: Option<OutsetaError>,
}

impl std::fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let header_names: Vec<&str> = self.headers.iter().map(|(n, _)| n.as_str()).collect();
        f.debug_struct("ClientBuilder")
            .field("base_url", &self.base_url)
            .field("headers", &header_names)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ClientBuilder {
    fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            headers: vec![
                (CONTENT_TYPE.to_string(), "application/json".to_string()),
                (ACCEPT.to_string(), "application/json".to_string()),
            ],
            timeout: DEFAULT_TIMEOUT,
            http: None,
            error: None,
        }
    }

    /// Replace the API base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Authenticate with a server-side API key.
    ///
    /// The value is sent verbatim as the `Authorization` header, so it
    /// should look like `Outseta <key>:<secret>`.
    pub fn api_key(self, api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return self.fail("The api key cannot be blank.");
        }
        self.header(AUTHORIZATION.as_str(), api_key)
    }

    /// Authenticate with a user access token obtained from `tokens`.
    pub fn access_key(self, access_key: impl Into<String>) -> Self {
        let access_key = access_key.into();
        if access_key.trim().is_empty() {
            return self.fail("The access key cannot be blank.");
        }
        self.header(AUTHORIZATION.as_str(), format!("Bearer {access_key}"))
    }

    /// Add or replace a single header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    /// Add or replace several headers.
    pub fn headers<I, K, V>(self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        headers
            .into_iter()
            .fold(self, |builder, (k, v)| builder.header(k, v))
    }

    /// Set the request timeout (defaults to five minutes).
    ///
    /// Ignored when a custom HTTP client is supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use a preconfigured `reqwest` client for transport.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http = Some(client);
        self
    }

    fn fail(mut self, reason: &str) -> Self {
        if self.error.is_none() {
            self.error = Some(OutsetaError::ClientBuild(reason.to_string()));
        }
        self
    }

    /// Validate settings and create the client.
    ///
    /// # Errors
    ///
    /// Returns [`OutsetaError::ClientBuild`] if the base URL is blank, a
    /// credential was blank, or no `Authorization` header was configured.
    pub fn build(self) -> Result<OutsetaClient> {
        if let Some(err) = self.error {
            return Err(err);
        }

        if self.base_url.trim().is_empty() {
            return Err(OutsetaError::ClientBuild(
                "The base url cannot be blank.".to_string(),
            ));
        }

        let mut headers = HeaderMap::new();
        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| OutsetaError::InvalidHeader(name.clone()))?;
            let mut header_value = HeaderValue::from_str(value)
                .map_err(|_| OutsetaError::InvalidHeader(name.clone()))?;
            if header_name == AUTHORIZATION {
                header_value.set_sensitive(true);
            }
            headers.insert(header_name, header_value);
        }

        if !headers.contains_key(AUTHORIZATION) {
            return Err(OutsetaError::ClientBuild(
                "Either an api key or an access key is required. Alternatively, provide the Authorization header directly."
                    .to_string(),
            ));
        }

        // Ensure base URL ends with /
        let base_url_str = if self.base_url.ends_with('/') {
            self.base_url.clone()
        } else {
            format!("{}/", self.base_url)
        };
        let base_url = Url::parse(&base_url_str)?;

        let http = match self.http {
            Some(client) => client,
            None => Client::builder()
                .user_agent(USER_AGENT)
                .brotli(true)
                .gzip(true)
                .deflate(true)
                .timeout(self.timeout)
                .build()
                .map_err(OutsetaError::HttpError)?,
        };

        Ok(OutsetaClient {
            http,
            base_url: Arc::new(base_url),
            headers: Arc::new(headers),
        })
    }
}
