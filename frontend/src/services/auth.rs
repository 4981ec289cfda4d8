use wasm_bindgen::JsValue;
use web_sys::{Storage, UrlSearchParams};

/// The single durable piece of client state: the bearer token, under one
/// fixed storage key. No expiry is tracked here; the backend rejecting the
/// token is the only expiry signal.
const TOKEN_STORAGE_KEY: &str = "scheduleSyncToken";

/// Query parameter the OAuth return leg delivers the token in
const TOKEN_QUERY_PARAM: &str = "token";

/// Explicit handle to the stored credential, injected into every
/// authenticated API call instead of being read as a global.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthSession;

impl AuthSession {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    pub fn get(&self) -> Option<String> {
        Self::storage()?.get_item(TOKEN_STORAGE_KEY).ok().flatten()
    }

    pub fn set(&self, token: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(TOKEN_STORAGE_KEY, token);
        }
    }

    pub fn clear(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(TOKEN_STORAGE_KEY);
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.get().is_some()
    }

    /// OAuth return leg: if the current URL carries a `token` query
    /// parameter, persist it and strip it from the visible URL. The query
    /// string is a single-use transport, not where the credential lives.
    /// Returns true when a token was captured.
    pub fn capture_token_from_url(&self) -> bool {
        self.try_capture().unwrap_or(false)
    }

    fn try_capture(&self) -> Option<bool> {
        let window = web_sys::window()?;
        let location = window.location();
        let search = location.search().ok()?;
        if search.is_empty() {
            return Some(false);
        }
        let params = UrlSearchParams::new_with_str(&search).ok()?;
        let token = match params.get(TOKEN_QUERY_PARAM) {
            Some(t) if !t.is_empty() => t,
            _ => return Some(false),
        };
        self.set(&token);

        params.delete(TOKEN_QUERY_PARAM);
        let remaining = params.to_string().as_string().unwrap_or_default();
        let path = location.pathname().ok()?;
        let clean = if remaining.is_empty() {
            path
        } else {
            format!("{}?{}", path, remaining)
        };
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&clean));
        }
        Some(true)
    }
}
