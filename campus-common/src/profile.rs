//! The cached user profile and the authorization predicate over it.

use serde::{Deserialize, Serialize};

use crate::capabilities::{Capabilities, Capability};
use crate::role::Role;

/// The profile the backend returns at login, cached client-side for the
/// lifetime of the session. Replaced wholesale on login, never partially
/// mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Backend account id.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Staff role. Unknown strings map to [`Role::Other`].
    pub role: Role,
    /// Granted capabilities. Profiles that omit the array get an empty set.
    #[serde(default)]
    pub permissions: Capabilities,
}

impl UserProfile {
    /// Can this profile perform `capability`?
    ///
    /// Admin bypasses the set entirely; everyone else needs exact
    /// membership. This is a UI convenience gate deciding what is
    /// *offered*; the server re-checks every mutating request, so this
    /// must never be treated as a security boundary.
    pub fn has_permission(&self, capability: &Capability) -> bool {
        if self.role.is_privileged() {
            return true;
        }
        self.permissions.contains(capability)
    }

    /// True iff the role is admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_privileged()
    }

    /// True iff the role is teacher or admin.
    pub fn is_staff_or_admin(&self) -> bool {
        self.role.is_staff()
    }
}
