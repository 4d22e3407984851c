#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod auth;
mod client;
pub mod errors;
mod gateway;
mod router;
mod session;

pub mod views;

// --- PUBLIC API EXPORTS ---
// Transport
pub use client::{CampusHttpClient, CampusHttpClientBuilder};
// Session and gating
pub use gateway::ApiGateway;
pub use router::{NavigationDenied, Router, Screen, View};
pub use session::{Session, SessionStore};
pub use views::AccessDenied;

// Error and result types
pub use errors::{AuthError, BuildError, Error, RequestError, Result};

// Re-exports
pub use campus_common::capabilities::{Capabilities, Capability};
pub use campus_common::profile::UserProfile;
pub use campus_common::records;
pub use campus_common::role::Role;
pub use reqwest::{Method, StatusCode};
