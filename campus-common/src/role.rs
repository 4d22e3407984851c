//! Staff roles.
//!
//! Roles are a closed set on the client even though the backend stores them
//! as strings: the known ones get their own variant so privilege decisions
//! are exhaustive matches, and anything else lands in [`Role::Other`] with
//! no elevated rights. Adding a role is a compile-time decision, not a
//! string-comparison patch.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The role attached to a staff account.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    /// Full access; bypasses all capability checks.
    Admin,
    /// Teaching staff; capabilities are granted explicitly.
    Teacher,
    /// Read-only staff; capabilities are granted explicitly.
    Viewer,
    /// A role this client release does not know. Never privileged.
    Other(String),
}

impl Role {
    /// True only for [`Role::Admin`]. Exhaustive on purpose: a new variant
    /// forces this decision to be revisited.
    pub fn is_privileged(&self) -> bool {
        match self {
            Role::Admin => true,
            Role::Teacher | Role::Viewer | Role::Other(_) => false,
        }
    }

    /// Teacher or admin.
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Teacher | Role::Admin)
    }

    /// Role name as sent on the wire.
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Viewer => "viewer",
            Role::Other(name) => name,
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        match value {
            "admin" => Role::Admin,
            "teacher" => Role::Teacher,
            "viewer" => Role::Viewer,
            other => Role::Other(other.to_string()),
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name: String = Deserialize::deserialize(deserializer)?;
        Ok(Role::from(name.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_round_trip() {
        for name in ["admin", "teacher", "viewer"] {
            let role = Role::from(name);
            assert_eq!(role.as_str(), name);
            let json = serde_json::to_string(&role).unwrap();
            let back: Role = serde_json::from_str(&json).unwrap();
            assert_eq!(back, role);
        }
    }

    #[test]
    fn unknown_role_is_never_privileged() {
        let role: Role = serde_json::from_str("\"principal\"").unwrap();
        assert_eq!(role, Role::Other("principal".to_string()));
        assert!(!role.is_privileged());
        assert!(!role.is_staff());
    }

    #[test]
    fn only_admin_is_privileged() {
        assert!(Role::Admin.is_privileged());
        assert!(!Role::Teacher.is_privileged());
        assert!(!Role::Viewer.is_privileged());
        assert!(Role::Teacher.is_staff());
        assert!(!Role::Viewer.is_staff());
    }
}
