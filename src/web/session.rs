//! Server-side login sessions keyed by an opaque cookie token.

use anyhow::anyhow;
use base64::prelude::*;
use std::collections::HashMap;
use std::sync::Mutex;

pub const SESSION_COOKIE: &str = "phishcheck_session";

const TOKEN_BYTES: usize = 32;

#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, String>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session for `username` and return its token.
    pub fn create(&self, username: &str) -> anyhow::Result<String> {
        let mut bytes = [0u8; TOKEN_BYTES];
        getrandom::getrandom(&mut bytes)
            .map_err(|e| anyhow!("Failed to generate session token: {}", e))?;
        let token = BASE64_URL_SAFE_NO_PAD.encode(bytes);

        self.lock().insert(token.clone(), username.to_string());
        Ok(token)
    }

    pub fn user(&self, token: &str) -> Option<String> {
        self.lock().get(token).cloned()
    }

    pub fn remove(&self, token: &str) -> bool {
        self.lock().remove(token).is_some()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // Poisoning is ignored: every update is a single insert or remove.
        self.sessions.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Value of the session cookie in a `Cookie` request header, if present.
pub fn token_from_cookie_header(header: &str) -> Option<&str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

pub fn set_cookie(token: &str) -> String {
    format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/",
        SESSION_COOKIE, token
    )
}

pub fn clear_cookie() -> String {
    format!(
        "{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0",
        SESSION_COOKIE
    )
}
