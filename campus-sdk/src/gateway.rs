//! The API gateway: the single chokepoint through which all remote calls
//! are issued and uniformly authenticated and intercepted.

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use campus_common::records::ServerMessage;

use crate::client::CampusHttpClient;
use crate::errors::{AuthError, Error, RequestError, Result};
use crate::session::SessionStore;

/// Uniform request dispatch with credential attachment and session
/// invalidation on authentication failure.
///
/// Every outbound call attaches the stored token as a bearer header when
/// one is present; without a token the call proceeds unauthenticated and
/// the server rejects it if the endpoint needs auth. When any response
/// comes back authentication-rejected (401) while a session is held, the
/// gateway clears the [`SessionStore`], whichever view issued the call,
/// and returns [`AuthError::SessionExpired`]; the router derives the login
/// screen from the now-empty store. All other error statuses surface as
/// [`RequestError::Server`] with the backend's `{"message": ...}` body
/// carried verbatim for the calling view to present.
///
/// There is no retry policy: a failed call fails exactly once, and the
/// user retries.
#[derive(Debug, Clone)]
pub struct ApiGateway {
    client: CampusHttpClient,
    session: SessionStore,
}

impl ApiGateway {
    /// Wrap a transport client and a session store.
    pub fn new(client: CampusHttpClient, session: SessionStore) -> Self {
        ApiGateway { client, session }
    }

    /// The session store this gateway reads tokens from and clears on
    /// authentication failure.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// The underlying transport client.
    pub fn client(&self) -> &CampusHttpClient {
        &self.client
    }

    /// Build a request with the bearer credential attached when present.
    pub(crate) fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let mut builder = self.client.request(method, path)?;
        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    /// Send a prepared request and run the uniform response check.
    pub(crate) async fn dispatch(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await.map_err(RequestError::Transport)?;
        self.check_response(response).await
    }

    /// The cross-cutting interceptor (spec: fires for every call site).
    async fn check_response(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // A 401 while holding a session means the server no longer accepts
        // our token: drop the session so navigation falls back to login.
        // A 401 without a session (e.g. bad login credentials) is an
        // ordinary server error for the caller to present.
        if status == StatusCode::UNAUTHORIZED && self.session.is_authenticated() {
            tracing::warn!("session rejected by the server; clearing stored credentials");
            self.session.clear();
            return Err(AuthError::SessionExpired.into());
        }

        let message = extract_message(response).await;
        Err(RequestError::Server { status, message }.into())
    }

    // === JSON verbs ===

    /// `GET` a JSON collection or document.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        tracing::debug!(%path, "GET");
        let response = self.dispatch(self.request(Method::GET, path)?).await?;
        decode_json(response).await
    }

    /// `GET` with query parameters.
    pub(crate) async fn get_json_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        tracing::debug!(%path, "GET");
        let builder = self.request(Method::GET, path)?.query(query);
        let response = self.dispatch(builder).await?;
        decode_json(response).await
    }

    /// `POST` a JSON body, decode a JSON response.
    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        tracing::debug!(%path, "POST");
        let builder = self.request(Method::POST, path)?.json(body);
        let response = self.dispatch(builder).await?;
        decode_json(response).await
    }

    /// `PUT` a JSON body, decode a JSON response.
    pub(crate) async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        tracing::debug!(%path, "PUT");
        let builder = self.request(Method::PUT, path)?.json(body);
        let response = self.dispatch(builder).await?;
        decode_json(response).await
    }

    /// `DELETE`, returning the server's `{message}` acknowledgement.
    pub(crate) async fn delete(&self, path: &str) -> Result<ServerMessage> {
        tracing::debug!(%path, "DELETE");
        let response = self.dispatch(self.request(Method::DELETE, path)?).await?;
        decode_json(response).await
    }

    /// `GET` raw bytes (file exports).
    pub(crate) async fn get_bytes(&self, path: &str) -> Result<Vec<u8>> {
        tracing::debug!(%path, "GET (bytes)");
        let response = self.dispatch(self.request(Method::GET, path)?).await?;
        let bytes = response.bytes().await.map_err(RequestError::Transport)?;
        Ok(bytes.to_vec())
    }
}

/// Pull the backend's `{"message": ...}` out of an error body, falling
/// back to the raw text and then to the status canonical reason.
async fn extract_message(response: Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if let Ok(ServerMessage { message }) = serde_json::from_str::<ServerMessage>(&body) {
        return message;
    }
    if !body.trim().is_empty() {
        return body;
    }
    status.canonical_reason().unwrap_or("Unknown Error").to_string()
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await.map_err(RequestError::Transport)?;
    serde_json::from_slice(&bytes).map_err(|err| {
        Error::from(RequestError::DecodeJson {
            message: err.to_string(),
        })
    })
}

/// The user-facing text for a failed call: validation/business errors
/// surface the server message verbatim, everything else gets the caller's
/// generic fallback.
pub(crate) fn surface_message(err: &Error, fallback: &str) -> String {
    match err {
        Error::Request(RequestError::Server { message, .. }) => message.clone(),
        Error::Request(RequestError::Validation { message }) => message.clone(),
        _ => fallback.to_string(),
    }
}
