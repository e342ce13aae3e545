//! API key entry dialog and the production `KeyProvider`.
//!
//! Resolution order: the `GEMINI_API_KEY` environment variable wins, then
//! the key saved in settings, then the user is prompted. A key entered in
//! the prompt is persisted so the next session does not ask again.

use std::cell::RefCell;
use std::rc::Rc;

use fltk::dialog;

use crate::app::credentials::{key_from_env, KeyProvider};
use crate::app::settings::AppSettings;

pub struct DialogKeyProvider {
    settings: Rc<RefCell<AppSettings>>,
}

impl DialogKeyProvider {
    pub fn new(settings: Rc<RefCell<AppSettings>>) -> Self {
        Self { settings }
    }
}

impl KeyProvider for DialogKeyProvider {
    fn current_key(&self) -> Option<String> {
        key_from_env().or_else(|| {
            self.settings
                .borrow()
                .api_key
                .clone()
                .filter(|k| !k.trim().is_empty())
        })
    }

    fn request_key(&self) -> Option<String> {
        prompt_for_key(&self.settings)
    }
}

/// Ask the user for a Gemini API key and persist it. Returns the key, or
/// `None` when the user cancelled or entered nothing.
pub fn prompt_for_key(settings: &Rc<RefCell<AppSettings>>) -> Option<String> {
    let current = settings.borrow().api_key.clone().unwrap_or_default();
    let entered = dialog::password_default(
        "Enter your Google Gemini API key.\nIt is stored in your local settings file.",
        &current,
    )?;

    let key = entered.trim().to_string();
    if key.is_empty() {
        return None;
    }

    {
        let mut s = settings.borrow_mut();
        s.api_key = Some(key.clone());
        if let Err(e) = s.save() {
            dialog::alert_default(&format!("Failed to save settings: {}", e));
        }
    }
    Some(key)
}
