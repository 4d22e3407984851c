use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use campus_common::capabilities::Capability;
use campus_common::profile::UserProfile;

use super::persist::{load as persist_load, remove as persist_remove, save as persist_save};
use crate::errors::Result;

/// The authenticated actor: credential token plus cached profile.
///
/// Created whole on a successful login response, replaced whole on the
/// next login, destroyed whole on logout or when the server rejects the
/// token. The two fields are never stored separately, which is what makes
/// "token present iff profile present" hold by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer credential issued by the backend.
    pub token: String,
    /// The profile cached at login. Authoritative copy lives server-side.
    pub user: UserProfile,
}

/// Explicit, injectable session handle shared by everything that issues
/// requests or renders navigation.
///
/// Cheap to clone; clones share one slot. There is deliberately no
/// process-wide instance: tests construct isolated stores and run them
/// concurrently. All writes are whole-value replacements (set or clear),
/// so a single lock with no further discipline is enough.
///
/// With a backing file (see [`SessionStore::with_file`]) the session
/// survives process restarts; without one the store is memory-only.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    slot: RwLock<Option<Session>>,
    file: Option<PathBuf>,
}

impl SessionStore {
    /// A memory-only store, signed out.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store backed by a file. If the file already holds a session from
    /// a previous run it is restored; an unreadable or malformed file is
    /// treated as signed out.
    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let restored = persist_load(&path);
        SessionStore {
            inner: Arc::new(Inner {
                slot: RwLock::new(restored),
                file: Some(path),
            }),
        }
    }

    /// Store a new session, token and profile together, overwriting any
    /// prior one. Writes the durable copy before publishing so a crash
    /// between the two cannot leave them disagreeing.
    pub fn set_session(&self, token: String, user: UserProfile) -> Result<()> {
        let session = Session { token, user };
        if let Some(path) = &self.inner.file {
            persist_save(path, &session)?;
        }
        *self.write_slot() = Some(session);
        Ok(())
    }

    /// The stored credential token, if signed in.
    pub fn token(&self) -> Option<String> {
        self.read_slot().as_ref().map(|s| s.token.clone())
    }

    /// The cached profile, if signed in.
    pub fn user(&self) -> Option<UserProfile> {
        self.read_slot().as_ref().map(|s| s.user.clone())
    }

    /// Remove the session from memory and durable storage. Idempotent.
    pub fn clear(&self) {
        *self.write_slot() = None;
        if let Some(path) = &self.inner.file {
            if let Err(err) = persist_remove(path) {
                tracing::warn!(?path, %err, "failed to remove the stored session file");
            }
        }
    }

    /// True iff a session (token and profile together) is present.
    pub fn is_authenticated(&self) -> bool {
        self.read_slot().is_some()
    }

    // === Authorization predicate passthroughs ===
    //
    // Convenience gates over the cached profile; they answer without a
    // network round trip and always deny when signed out. They decide what
    // the UI offers; the server is the authority for every mutation.

    /// Can the signed-in user perform `capability`? False when signed out.
    pub fn has_permission(&self, capability: &Capability) -> bool {
        self.read_slot()
            .as_ref()
            .is_some_and(|s| s.user.has_permission(capability))
    }

    /// Is the signed-in user an admin? False when signed out.
    pub fn is_admin(&self) -> bool {
        self.read_slot().as_ref().is_some_and(|s| s.user.is_admin())
    }

    /// Is the signed-in user teaching staff or an admin? False when
    /// signed out.
    pub fn is_staff_or_admin(&self) -> bool {
        self.read_slot()
            .as_ref()
            .is_some_and(|s| s.user.is_staff_or_admin())
    }

    fn read_slot(&self) -> std::sync::RwLockReadGuard<'_, Option<Session>> {
        self.inner.slot.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_slot(&self) -> std::sync::RwLockWriteGuard<'_, Option<Session>> {
        self.inner
            .slot
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
