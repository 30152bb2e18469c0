use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

pub const SESSION_KEY: &str = "neo_auth";

const SESSION_DIR: &str = "cricket_terminal";
const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn is_well_formed(&self) -> bool {
        !self.username.trim().is_empty() && !self.password.trim().is_empty()
    }
}

/// Session-scoped key-value backing for cached credentials.
pub trait SessionStore {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str);
}

/// Interactive capture of a username/password pair. None means cancelled.
pub trait CredentialPrompt {
    fn request(&self) -> Option<Credentials>;
}

pub struct AuthContext {
    store: Box<dyn SessionStore>,
    key: String,
}

impl AuthContext {
    pub fn new(store: Box<dyn SessionStore>) -> Self {
        Self {
            store,
            key: SESSION_KEY.to_string(),
        }
    }

    /// Cached token if present, otherwise one interactive prompt cycle.
    /// Returns None when the user cancels or leaves a field empty; the
    /// caller must abort the protected operation.
    pub fn token(
        &self,
        prompt: &dyn CredentialPrompt,
        log: &mut dyn FnMut(String),
    ) -> Option<String> {
        if let Some(token) = self.stored_token() {
            return Some(token);
        }

        let creds = prompt.request()?;
        if !creds.is_well_formed() {
            return None;
        }

        match serde_json::to_string(&creds) {
            Ok(json) => {
                if let Err(err) = self.store.save(&self.key, &json) {
                    log(format!(
                        "[WARN] Could not persist session credentials: {err:#}"
                    ));
                }
            }
            Err(err) => log(format!("[WARN] Could not encode session credentials: {err}")),
        }

        Some(basic_token(&creds))
    }

    /// Token from the cached pair only; never prompts.
    pub fn stored_token(&self) -> Option<String> {
        let raw = self.store.load(&self.key)?;
        let creds = serde_json::from_str::<Credentials>(&raw).ok()?;
        if creds.is_well_formed() {
            Some(basic_token(&creds))
        } else {
            None
        }
    }

    pub fn clear(&self) {
        self.store.remove(&self.key);
    }
}

pub fn basic_token(creds: &Credentials) -> String {
    let pair = format!("{}:{}", creds.username, creds.password);
    format!("Basic {}", BASE64.encode(pair))
}

/// Only a short prefix of the encoded token is safe to show in the console.
pub fn token_preview(token: &str) -> String {
    let prefix: String = token.chars().take(12).collect();
    format!("{prefix}...")
}

#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl SessionStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .expect("session store lock poisoned")
            .get(key)
            .cloned()
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .expect("session store lock poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .expect("session store lock poisoned")
            .remove(key);
    }
}

/// File-backed store under the login session's runtime directory, so the
/// cached pair disappears with the session rather than surviving it.
pub struct FileStore {
    path: Option<PathBuf>,
}

impl FileStore {
    pub fn new() -> Self {
        Self {
            path: session_path(),
        }
    }

    fn read_entries(&self) -> HashMap<String, String> {
        let Some(path) = &self.path else {
            return HashMap::new();
        };
        let Ok(raw) = fs::read_to_string(path) else {
            return HashMap::new();
        };
        serde_json::from_str(&raw).unwrap_or_default()
    }

    fn write_entries(&self, entries: &HashMap<String, String>) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let Some(dir) = path.parent() else {
            return Ok(());
        };
        fs::create_dir_all(dir).context("create session dir")?;
        let json = serde_json::to_string(entries).context("serialize session store")?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).context("write session store")?;
        fs::rename(&tmp, path).context("swap session store")?;
        Ok(())
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for FileStore {
    fn load(&self, key: &str) -> Option<String> {
        self.read_entries().remove(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read_entries();
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn remove(&self, key: &str) {
        let mut entries = self.read_entries();
        if entries.remove(key).is_some() {
            let _ = self.write_entries(&entries);
        }
    }
}

fn session_path() -> Option<PathBuf> {
    // XDG_RUNTIME_DIR lives for the login session and is wiped afterwards.
    if let Ok(base) = std::env::var("XDG_RUNTIME_DIR") {
        if !base.trim().is_empty() {
            return Some(PathBuf::from(base).join(SESSION_DIR).join(SESSION_FILE));
        }
    }
    Some(std::env::temp_dir().join(SESSION_DIR).join(SESSION_FILE))
}
