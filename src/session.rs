use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::config::Environ;

/// Fixed name of the bearer-credential cookie.
pub const AUTH_COOKIE: &str = "pipebird-admin-auth";

/// Persisted bearer credential. No expiry is tracked client-side; the
/// backend decides validity per request. Injected into the client so tests
/// can substitute [`MemorySession`].
pub trait SessionStore: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, secret: &str, secure: bool);
    fn clear(&self);
}

/// Cookie persisted as a single `name=value[; Secure]` line on disk.
/// Read/write failures have no error channel in the consuming flow, so they
/// are logged and surface as an absent credential.
#[derive(Debug)]
pub struct CookieFile {
    path: PathBuf,
}

impl CookieFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStore for CookieFile {
    fn get(&self) -> Option<String> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) => {
                if err.kind() != ErrorKind::NotFound {
                    warn!(path = %self.path.display(), error = %err, "failed to read auth cookie");
                }
                return None;
            }
        };

        let pair = contents.lines().next()?.split(';').next()?.trim();
        let (name, value) = pair.split_once('=')?;
        if name == AUTH_COOKIE && !value.is_empty() {
            Some(value.to_string())
        } else {
            None
        }
    }

    fn set(&self, secret: &str, secure: bool) {
        let line = if secure {
            format!("{}={}; Secure", AUTH_COOKIE, secret)
        } else {
            format!("{}={}", AUTH_COOKIE, secret)
        };
        if let Err(err) = fs::write(&self.path, line) {
            warn!(path = %self.path.display(), error = %err, "failed to persist auth cookie");
        } else {
            debug!(secure, "auth cookie stored");
        }
    }

    fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!("auth cookie cleared"),
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "failed to clear auth cookie")
            }
        }
    }
}

/// In-memory store for tests and embedded use.
#[derive(Debug, Default)]
pub struct MemorySession {
    secret: Mutex<Option<String>>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: Mutex::new(Some(secret.into())),
        }
    }
}

impl SessionStore for MemorySession {
    fn get(&self) -> Option<String> {
        self.secret.lock().ok()?.clone()
    }

    fn set(&self, secret: &str, _secure: bool) {
        if let Ok(mut guard) = self.secret.lock() {
            *guard = Some(secret.to_string());
        }
    }

    fn clear(&self) {
        if let Ok(mut guard) = self.secret.lock() {
            *guard = None;
        }
    }
}

/// Legacy variant: a secret bound once from configuration, matching the old
/// fetch helper that froze its bearer header at construction. Mutations are
/// no-ops.
#[derive(Debug)]
pub struct StaticSecret {
    secret: Option<String>,
}

impl StaticSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Some(secret.into()),
        }
    }

    pub fn from_environ(environ: &Environ) -> Self {
        Self {
            secret: environ.secret_key.clone(),
        }
    }
}

impl SessionStore for StaticSecret {
    fn get(&self) -> Option<String> {
        self.secret.clone()
    }

    fn set(&self, _secret: &str, _secure: bool) {}

    fn clear(&self) {}
}
