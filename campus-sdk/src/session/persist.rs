//! Durable copy of the session.
//!
//! The token and profile are written together as one JSON document, so the
//! "user present iff token present" invariant also holds across restarts.
//! Treat the file as a bearer secret: on unix it is created with mode 600.

use std::io;
use std::path::Path;

use super::core::Session;

/// Read a previously stored session. Any failure (missing file, bad
/// permissions, malformed JSON) means "signed out"; a stale or corrupt
/// durable copy must never block a fresh login.
pub(super) fn load(path: &Path) -> Option<Session> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
        Err(err) => {
            tracing::debug!(?path, %err, "could not read the stored session file");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(session) => Some(session),
        Err(err) => {
            tracing::debug!(?path, %err, "stored session file is malformed; ignoring it");
            None
        }
    }
}

/// Write the session to `path`, overwriting any previous copy. On unix the
/// file permissions are set to 600.
pub(super) fn save(path: &Path, session: &Session) -> io::Result<()> {
    let json = serde_json::to_string(session).map_err(io::Error::other)?;
    std::fs::write(path, json)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    }
    Ok(())
}

/// Remove the durable copy. A file that is already gone is fine.
pub(super) fn remove(path: &Path) -> io::Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err),
    }
}
