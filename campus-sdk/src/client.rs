//! Low-level HTTP transport for the campus backend.

use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use url::Url;

use crate::errors::{BuildError, RequestError, Result};

const DEFAULT_USER_AGENT: &str = concat!("campus-sdk", "@", env!("CARGO_PKG_VERSION"));

/// Configures a [`CampusHttpClient`] before construction.
///
/// Most code obtains this via [`CampusHttpClient::builder()`], which simply
/// returns `CampusHttpClientBuilder::default()`.
///
/// # Defaults
/// - HTTP request timeout: reqwest default (no global timeout) unless set
///   via [`Self::request_timeout`]
/// - User-agent: `campus-sdk@<crate-version>` plus any
///   [`Self::user_agent_extra`]
///
/// # Example
/// ```no_run
/// use std::time::Duration;
/// # use campus::CampusHttpClient;
/// let client = CampusHttpClient::builder()
///     .base_url("https://school.example.net/api")
///     .request_timeout(Duration::from_secs(10))
///     .user_agent_extra("frontdesk/1.2.3")
///     .build()?;
/// # Ok::<_, campus::BuildError>(())
/// ```
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct CampusHttpClientBuilder {
    base_url: Option<String>,
    http_request_timeout: Option<Duration>,

    /// Optional user-agent segment appended to the default UA.
    user_agent_extra: Option<String>,
}

impl CampusHttpClientBuilder {
    /// Set the backend base URL, including any fixed path prefix the
    /// deployment mounts the API under (commonly `/api`).
    pub fn base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the HTTP request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.http_request_timeout = Some(timeout);
        self
    }

    /// Append an extra user-agent segment after the default
    /// `campus-sdk@<version>`. Example: `.user_agent_extra("frontdesk/1.2.3")`.
    pub fn user_agent_extra<S: Into<String>>(mut self, extra: S) -> Self {
        self.user_agent_extra = Some(extra.into());
        self
    }

    /// Build the [`CampusHttpClient`].
    pub fn build(&self) -> Result<CampusHttpClient, BuildError> {
        let base_url = self.base_url.as_deref().ok_or(BuildError::MissingBaseUrl)?;
        // Normalize away a trailing slash so endpoint paths concatenate
        // without doubling.
        let base_url = Url::parse(base_url.trim_end_matches('/'))?;

        let user_agent = match &self.user_agent_extra {
            Some(extra) if !extra.trim().is_empty() => {
                format!("{DEFAULT_USER_AGENT} {}", extra.trim())
            }
            _ => DEFAULT_USER_AGENT.to_string(),
        };

        let mut http_builder = reqwest::Client::builder().user_agent(user_agent);
        if let Some(timeout) = self.http_request_timeout {
            http_builder = http_builder.timeout(timeout);
        }

        Ok(CampusHttpClient {
            http: http_builder.build()?,
            base_url,
        })
    }
}

/// Stateless transport client for the campus REST backend.
///
/// `CampusHttpClient` owns a reqwest client and the backend base URL, and
/// knows how to turn an API path like `/students/7` into a full request.
/// It is **not** session aware: no credential is attached here. For
/// authenticated calls use [`crate::ApiGateway`], which wraps this client
/// and injects the bearer token.
#[derive(Debug, Clone)]
pub struct CampusHttpClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: Url,
}

impl CampusHttpClient {
    /// Returns a builder to edit settings before creating the client.
    pub fn builder() -> CampusHttpClientBuilder {
        CampusHttpClientBuilder::default()
    }

    /// The configured backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an API path (must start with `/`) against the base URL,
    /// preserving any path prefix the base carries.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
        if !path.starts_with('/') {
            return Err(RequestError::Validation {
                message: format!("API path must start with `/`: `{path}`"),
            }
            .into());
        }
        let joined = format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path);
        Ok(Url::parse(&joined)?)
    }

    /// Start building an unauthenticated request against an API path.
    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.endpoint(path)?;
        Ok(self.http.request(method, url))
    }
}
