//! Inference credential
//!
//! Bearer token lookup: environment first, then the persistent store.

use super::kv::{KeyValueStore, StorageError};
use crate::constants::KEY_HF_TOKEN;

/// Resolve the bearer token; `env_token` wins over the stored one
pub fn resolve_token(env_token: Option<String>, store: &dyn KeyValueStore) -> Option<String> {
    if let Some(token) = env_token.filter(|t| !t.trim().is_empty()) {
        return Some(token);
    }

    match store.get(KEY_HF_TOKEN) {
        Ok(token) => token.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()),
        Err(e) => {
            log::warn!("Failed to read stored credential: {}", e);
            None
        }
    }
}

/// Persist a token; an empty value clears it
pub fn save_token(store: &dyn KeyValueStore, token: &str) -> Result<(), StorageError> {
    let token = token.trim();
    if token.is_empty() {
        store.remove(KEY_HF_TOKEN)
    } else {
        store.set(KEY_HF_TOKEN, token)
    }
}

/// Short, log-safe rendering of a token
pub fn mask_token(token: &str) -> String {
    let visible: String = token.chars().take(5).collect();
    format!("{}...", visible)
}
