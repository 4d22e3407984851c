//! The session store: single source of truth for "who is signed in".

mod core;
mod persist;

pub use self::core::{Session, SessionStore};
