//! Unified error types for the `campus` crate.
//!
//! This module centralizes all failures that can occur while using the SDK
//! and provides a single top-level [`Error`] enum plus the convenient
//! [`Result`] alias. Errors from lower layers (`reqwest`, URL parsing) are
//! mapped into structured variants so callers can handle them precisely.

use thiserror::Error;

// --- Build-Time Error ---

/// Errors that can occur while building a [`crate::CampusHttpClient`].
#[derive(Debug, Error)]
pub enum BuildError {
    /// No backend base URL was configured.
    #[error("No base URL was configured for the API backend")]
    MissingBaseUrl,

    /// The configured base URL did not parse.
    #[error("Invalid base URL: {0}")]
    BaseUrl(#[from] url::ParseError),

    /// Failed to build the HTTP client (reqwest configuration).
    #[error("Failed to build the HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

// --- The Main Operational Error Enum ---

/// The crate's top-level error type.
///
/// It groups failures into high-level categories:
/// - [`Error::Request`]: HTTP transport/server/validation issues
/// - [`Error::Authentication`]: session and credential issues
/// - [`Error::Parse`]: URL parsing failures
/// - [`Error::Build`]: construction of the client failed
///
/// Most lower-level errors automatically convert into this enum via `From`.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request/response failed (transport, server, validation, JSON).
    #[error("Request failed: {0}")]
    Request(#[from] RequestError),

    /// Session or credential handling failed.
    #[error("Authentication error: {0}")]
    Authentication(#[from] AuthError),

    /// URL parsing failed while preparing a request.
    #[error("Failed to parse URL: {0}")]
    Parse(#[from] url::ParseError),

    /// Building the client failed.
    #[error("Client build failed: {0}")]
    Build(#[from] BuildError),
}

// --- Consolidated Authentication Error ---

/// Errors originating from session and credential handling.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The server rejected the stored credential. The gateway has already
    /// cleared the session; the UI must return to the login screen.
    #[error("The session was rejected by the server and has been cleared")]
    SessionExpired,

    /// An operation that needs a signed-in user was attempted without one.
    #[error("No authenticated session")]
    NotAuthenticated,

    /// Writing or removing the durable session copy failed.
    #[error("Failed to persist the session: {0}")]
    Persist(#[from] std::io::Error),

    /// Caller or input validation error.
    #[error("General authentication error: {0}")]
    Validation(String),
}

// --- Consolidated Request Error ---

/// Transport and server-side HTTP errors.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Network/protocol failure from reqwest (timeouts, TLS, I/O, etc.).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server returned a non-success status. `message` carries the
    /// backend's `{"message": ...}` body verbatim when one was present.
    #[error("Server responded with an error: {status} - {message}")]
    Server {
        /// The HTTP status code returned by the server.
        status: reqwest::StatusCode,
        /// The server-provided message, or the status canonical reason.
        message: String,
    },

    /// Caller supplied an invalid path/argument for this API.
    #[error("Invalid request: {message}")]
    Validation {
        /// Human-readable explanation of what was invalid.
        message: String,
    },

    /// JSON decoding failed when parsing a server response.
    #[error("JSON decode error: {message}")]
    DecodeJson {
        /// Error message from the JSON deserializer.
        message: String,
    },
}

/// A specialized `Result` type for `campus` operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

// Ergonomic "staircase" From implementations ---
// A macro to reduce boilerplate for converting base errors into the
// top-level Error.
macro_rules! impl_from_for_error {
    ($from_type:ty, $to_variant:path) => {
        impl From<$from_type> for Error {
            fn from(err: $from_type) -> Self {
                $to_variant(err.into())
            }
        }
    };
}

impl_from_for_error!(reqwest::Error, Error::Request);
impl_from_for_error!(std::io::Error, Error::Authentication);
