//! API key provisioning hook.
//!
//! The generative adapter needs a key, but must not assume how the host
//! environment stores or asks for one. `KeyProvider` is that boundary: a
//! query for the currently selected key and an action that prompts the user
//! for one. The production provider (env var, settings file, entry dialog)
//! lives on the UI side; this module owns the resolution logic.

use super::error::{AppError, Result};

/// Name of the environment variable that overrides any saved key.
pub const KEY_ENV_VAR: &str = "GEMINI_API_KEY";

pub trait KeyProvider {
    /// The usable key currently selected, if any.
    fn current_key(&self) -> Option<String>;

    /// Prompt the user to provide a key. Returns the key on success; `None`
    /// means the user declined.
    fn request_key(&self) -> Option<String>;
}

/// Read the environment override, treating empty values as absent.
pub fn key_from_env() -> Option<String> {
    std::env::var(KEY_ENV_VAR)
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
}

/// Resolve a key, prompting through the provider when none is selected.
/// A declined prompt is reported as `MissingKey`; callers treat that as a
/// cancelled action, not a hard error.
pub fn ensure_key(provider: &dyn KeyProvider) -> Result<String> {
    if let Some(key) = provider.current_key() {
        return Ok(key);
    }
    provider.request_key().ok_or(AppError::MissingKey)
}
