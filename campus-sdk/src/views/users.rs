//! Staff account management (admin only).

use campus_common::records::{RoleInfo, ServerMessage, User, UserDraft};

use super::{check_entry, AccessDenied};
use crate::errors::Result;
use crate::gateway::{surface_message, ApiGateway};
use crate::router::View;

/// Create/edit buffer for the account form. The same draft serves both:
/// on update the server treats an empty password as "keep current".
#[derive(Debug, Clone, Default)]
pub struct UserForm {
    /// Account id being edited; `None` means creating.
    pub editing: Option<i64>,
    /// The fields as currently entered.
    pub draft: UserDraft,
    /// Whether the form is shown at all.
    pub open: bool,
}

/// The Users screen. Opening re-checks the admin capability; navigation
/// filtering alone is not trusted.
#[derive(Debug)]
pub struct UsersView {
    gateway: ApiGateway,
    users: Vec<User>,
    roles: Vec<RoleInfo>,
    form: UserForm,
    error: Option<String>,
}

impl UsersView {
    /// Open the view; non-admins get [`AccessDenied`] to render instead.
    pub fn open(gateway: &ApiGateway) -> Result<Self, AccessDenied> {
        check_entry(gateway.session(), View::Users)?;
        Ok(UsersView {
            gateway: gateway.clone(),
            users: Vec::new(),
            roles: Vec::new(),
            form: UserForm::default(),
            error: None,
        })
    }

    /// Fetch accounts and the assignable roles, in that order. Failed
    /// reads log and leave the lists empty.
    pub async fn refresh(&mut self) {
        match self.gateway.get_json("/users").await {
            Ok(users) => self.users = users,
            Err(err) => tracing::debug!(%err, "error loading users"),
        }
        match self.gateway.get_json("/roles").await {
            Ok(roles) => self.roles = roles,
            Err(err) => tracing::debug!(%err, "error loading roles"),
        }
    }

    /// The last successfully fetched accounts.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Roles available for assignment.
    pub fn roles(&self) -> &[RoleInfo] {
        &self.roles
    }

    /// Current form state.
    pub fn form(&self) -> &UserForm {
        &self.form
    }

    /// Mutable access to the draft fields while the form is open.
    pub fn draft_mut(&mut self) -> &mut UserDraft {
        &mut self.form.draft
    }

    /// The form-level error message to display, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Open an empty form for a new account.
    pub fn begin_create(&mut self) {
        self.form = UserForm {
            editing: None,
            draft: UserDraft::default(),
            open: true,
        };
        self.error = None;
    }

    /// Open the form pre-filled from an existing account. The password
    /// field starts empty; leaving it empty keeps the current one.
    pub fn begin_edit(&mut self, user: &User) {
        self.form = UserForm {
            editing: Some(user.id),
            draft: UserDraft {
                username: user.username.clone(),
                email: user.email.clone(),
                password: String::new(),
                role: user.role.clone(),
            },
            open: true,
        };
        self.error = None;
    }

    /// Close the form and discard the buffer. No request is issued.
    pub fn cancel(&mut self) {
        self.form = UserForm::default();
        self.error = None;
    }

    /// Submit the form: update when editing, otherwise register a new
    /// account. On success the buffer clears and the lists re-fetch; on
    /// failure the server message (e.g. "Cannot modify your own account")
    /// is recorded verbatim.
    pub async fn submit(&mut self) -> Result<()> {
        self.error = None;
        let outcome = match self.form.editing {
            Some(id) => {
                self.gateway
                    .put_json::<_, ServerMessage>(&format!("/users/{id}"), &self.form.draft)
                    .await
            }
            None => self.gateway.register(&self.form.draft).await,
        };

        match outcome {
            Ok(_) => {
                self.form = UserForm::default();
                self.refresh().await;
                Ok(())
            }
            Err(err) => {
                let fallback = if self.form.editing.is_some() {
                    "Error updating user"
                } else {
                    "Error creating user"
                };
                self.error = Some(surface_message(&err, fallback));
                Err(err)
            }
        }
    }

    /// Delete an account. Requires explicit confirmation; without it no
    /// request is issued and `false` is returned. The server refuses
    /// self-deletion; that refusal surfaces as the error message.
    pub async fn delete(&mut self, id: i64, confirmed: bool) -> Result<bool> {
        if !confirmed {
            return Ok(false);
        }
        match self.gateway.delete(&format!("/users/{id}")).await {
            Ok(_) => {
                self.refresh().await;
                Ok(true)
            }
            Err(err) => {
                self.error = Some(surface_message(&err, "Error deleting user"));
                Err(err)
            }
        }
    }
}
