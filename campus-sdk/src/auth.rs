//! Login, registration, and logout flows.

use serde::{Deserialize, Serialize};

use campus_common::profile::UserProfile;
use campus_common::records::{ServerMessage, UserDraft};

use crate::errors::Result;
use crate::gateway::ApiGateway;

#[derive(Serialize)]
struct LoginBody<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
    user: UserProfile,
}

impl ApiGateway {
    /// Sign in with username and password.
    ///
    /// On success the store holds the new session (token and profile set
    /// together) and the profile is returned. Bad credentials come back as
    /// a server error with the backend's message; nothing is cleared,
    /// since a failed login never had a session to invalidate.
    pub async fn login(&self, username: &str, password: &str) -> Result<UserProfile> {
        let body = LoginBody { username, password };
        let response: LoginResponse = self.post_json("/auth/login", &body).await?;
        self.session()
            .set_session(response.token, response.user.clone())?;
        tracing::debug!(username, "signed in");
        Ok(response.user)
    }

    /// Create a staff account. The backend restricts this to admins; a
    /// non-admin caller gets the server's refusal back as an error.
    pub async fn register(&self, draft: &UserDraft) -> Result<ServerMessage> {
        self.post_json("/auth/register", draft).await
    }

    /// Sign out: drop the session locally. The backend issues stateless
    /// tokens, so there is no server call to make.
    pub fn logout(&self) {
        self.session().clear();
        tracing::debug!("signed out");
    }
}
