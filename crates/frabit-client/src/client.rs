//! Main client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::{
    AgentsApi, BackupsApi, ClustersApi, DatabasesApi, OrgsApi, ProjectsApi, TeamsApi, UsersApi,
};
use crate::error::{Error, Result};
use crate::transport::Transport;

/// SDK version, sent in the default user agent.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default user agent, `frabit-rust-sdk/<version>`.
pub fn default_user_agent() -> String {
    format!("frabit-rust-sdk/{}", VERSION)
}

/// Frabit API client.
///
/// Cheap to clone; all clones share one transport.
///
/// # Example
///
/// ```no_run
/// use frabit_client::{CreateDatabaseRequest, FrabitClient};
///
/// # async fn example() -> frabit_client::Result<()> {
/// let client = FrabitClient::builder()
///     .base_url("http://localhost:9180")
///     .header("X-Team", "dba")
///     .build()?;
///
/// let db = client
///     .databases()
///     .create(CreateDatabaseRequest {
///         workspace: "prod".into(),
///         name: "orders".into(),
///         owner: "alice".into(),
///     })
///     .await?;
/// println!("created {}", db.name);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct FrabitClient {
    inner: Arc<Transport>,
}

impl FrabitClient {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client for `base_url` with default settings.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::builder().base_url(base_url).build()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Get the configured bearer token, if any.
    pub fn token(&self) -> Option<&str> {
        self.inner.token.as_deref()
    }

    /// Get the user agent sent with every request.
    pub fn user_agent(&self) -> &str {
        self.inner.user_agent.to_str().unwrap_or_default()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // API accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Access the agents API.
    pub fn agents(&self) -> AgentsApi {
        AgentsApi::new(self.clone())
    }

    /// Access the backups API.
    pub fn backups(&self) -> BackupsApi {
        BackupsApi::new(self.clone())
    }

    /// Access the clusters API.
    pub fn clusters(&self) -> ClustersApi {
        ClustersApi::new(self.clone())
    }

    /// Access the databases API.
    pub fn databases(&self) -> DatabasesApi {
        DatabasesApi::new(self.clone())
    }

    /// Access the orgs API.
    pub fn orgs(&self) -> OrgsApi {
        OrgsApi::new(self.clone())
    }

    /// Access the projects API.
    pub fn projects(&self) -> ProjectsApi {
        ProjectsApi::new(self.clone())
    }

    /// Access the teams API.
    pub fn teams(&self) -> TeamsApi {
        TeamsApi::new(self.clone())
    }

    /// Access the users API.
    pub fn users(&self) -> UsersApi {
        UsersApi::new(self.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal HTTP methods
    // ─────────────────────────────────────────────────────────────────────────

    /// Send a request and decode the response, defaulting when there is
    /// nothing to decode.
    pub(crate) async fn send<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        let request = self.inner.build_request(method, path, body)?;
        let decoded = self.inner.execute(request).await?;
        Ok(decoded.unwrap_or_default())
    }

    /// Send a request and ignore the response body.
    pub(crate) async fn send_discard<B>(&self, method: Method, path: &str, body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let request = self.inner.build_request(method, path, Some(body))?;
        self.inner.execute_discard(request).await
    }

    /// Make a GET request.
    pub(crate) async fn get<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        self.send::<T, ()>(Method::GET, path, None).await
    }

    /// Make a POST request.
    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        self.send(Method::POST, path, Some(body)).await
    }

    /// Make a PUT request.
    pub(crate) async fn put<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        self.send(Method::PUT, path, Some(body)).await
    }
}

impl std::fmt::Debug for FrabitClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrabitClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("user_agent", &self.user_agent())
            .finish_non_exhaustive()
    }
}

/// Builder for creating a FrabitClient.
#[derive(Debug, Default)]
pub struct ClientBuilder {
    base_url: Option<String>,
    token: Option<String>,
    user_agent: Option<String>,
    headers: Vec<(String, String)>,
    timeout: Option<Duration>,
    legacy_error_status: bool,
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL for the server.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the bearer token. It is stored on the client but not sent.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Prefix the default user agent with `agent`.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Add a static header sent with every request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Merge static headers; later entries replace earlier ones by name.
    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Set an overall per-request timeout on the transport.
    ///
    /// Unset by default; callers can also wrap calls in their own timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Treat 4xx/5xx responses as an empty success instead of an error.
    ///
    /// Off by default. Only for callers that depend on the old behavior.
    pub fn legacy_error_status(mut self, enabled: bool) -> Self {
        self.legacy_error_status = enabled;
        self
    }

    /// Build the client.
    ///
    /// Settings are validated in order (base URL, user agent, headers) and
    /// the first failure is returned.
    pub fn build(self) -> Result<FrabitClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::Config("base_url is required".to_string()))?;

        // Parse and normalize base URL
        let mut base_url = Url::parse(&base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!("base_url '{}' cannot be a base", base_url)));
        }
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        let user_agent = match self.user_agent {
            Some(prefix) => format!("{} {}", prefix, default_user_agent()),
            None => default_user_agent(),
        };
        // `HeaderValue` accepts obs-text bytes that `to_str` later rejects.
        if !user_agent.bytes().all(|b| b == b' ' || b.is_ascii_graphic()) {
            return Err(Error::Config(format!("invalid user agent '{}'", user_agent)));
        }
        let user_agent = HeaderValue::from_str(&user_agent)
            .map_err(|_| Error::Config(format!("invalid user agent '{}'", user_agent)))?;

        let mut headers = HeaderMap::new();
        for (name, value) in self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| Error::Config(format!("invalid header name '{}'", name)))?;
            let header_value = HeaderValue::from_str(&value)
                .map_err(|_| Error::Config(format!("invalid value for header '{}'", name)))?;
            headers.insert(header_name, header_value);
        }

        let mut http = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            http = http.timeout(timeout);
        }
        let http = http.build()?;

        Ok(FrabitClient {
            inner: Arc::new(Transport {
                http,
                base_url,
                headers,
                user_agent,
                token: self.token,
                legacy_error_status: self.legacy_error_status,
            }),
        })
    }
}
