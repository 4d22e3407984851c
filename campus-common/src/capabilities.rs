//! Capability strings and capability sets.
//!
//! A [`Capability`] is an opaque, case-sensitive identifier naming one
//! grantable action (for example `manage_students`). The backend owns the
//! vocabulary; the client only compares for exact membership. Constructors
//! exist for the capabilities the backend seeds, but arbitrary strings are
//! accepted so new server-side capabilities do not require a client release.

use std::collections::BTreeSet;
use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One grantable action, e.g. `manage_grades`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capability(String);

impl Capability {
    /// Full system access. A profile whose *role* is admin bypasses
    /// capability checks entirely; this string also gates the Users view.
    pub fn admin() -> Self {
        Capability("admin".to_string())
    }

    /// Add, edit, and delete students.
    pub fn manage_students() -> Self {
        Capability("manage_students".to_string())
    }

    /// Mark and manage attendance.
    pub fn manage_attendance() -> Self {
        Capability("manage_attendance".to_string())
    }

    /// Add and manage grades.
    pub fn manage_grades() -> Self {
        Capability("manage_grades".to_string())
    }

    /// View rosters, attendance history, and grade history.
    pub fn view_data() -> Self {
        Capability("view_data".to_string())
    }

    /// Access analytics summaries and reports.
    pub fn view_analytics() -> Self {
        Capability("view_analytics".to_string())
    }

    /// Capability string as sent on the wire.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Capability {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Error> {
        if value.trim().is_empty() {
            return Err(Error::Empty);
        }
        Ok(Capability(value.to_string()))
    }
}

impl TryFrom<&str> for Capability {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Error> {
        value.parse()
    }
}

/// Error parsing a [`Capability`].
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// Capability strings must be non-empty.
    #[error("Capability: empty capability string")]
    Empty,
}

/// The set of capabilities granted to a profile.
///
/// Always a concrete set, empty by default; there is no "absent" state.
/// The wire representation is a JSON array of strings, and profiles that
/// omit the array deserialize to an empty set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capabilities(BTreeSet<Capability>);

impl Capabilities {
    /// An empty capability set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact-match membership test. The only operation gating uses.
    pub fn contains(&self, capability: &Capability) -> bool {
        self.0.contains(capability)
    }

    /// Number of granted capabilities.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when nothing has been granted.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the granted capabilities in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &Capability> {
        self.0.iter()
    }
}

impl FromIterator<Capability> for Capabilities {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Capabilities(iter.into_iter().collect())
    }
}
