use anyhow::Result;
use gloo_console::error as console_error;
use web_sys::Storage;

use common::theme::{PreferenceStore, Theme};

use super::{js_err, window};

// blocked storage (privacy modes, sandboxed frames) shows up as either a thrown
// SecurityError or a missing object; both become an ordinary error here
fn local_storage() -> Result<Storage> {
    window()?
        .local_storage()
        .map_err(js_err)?
        .ok_or_else(|| anyhow::Error::msg("local storage is not available"))
}

// the theme preference is read by the stylesheet-only pages of the site as well, so it
// is stored as the bare string rather than through serde (which would quote it)
pub fn get_local_storage(key: &str) -> Result<Option<String>> {
    local_storage()?.get_item(key).map_err(|err| {
        let err = js_err(err);
        console_error!(format!("Failed to fetch local storage {key}: {err}"));
        anyhow::Error::msg("Local storage failure, see console log")
    })
}

pub fn set_local_storage(key: &str, value: &str) -> Result<()> {
    local_storage()?.set_item(key, value).map_err(|err| {
        let err = js_err(err);
        console_error!(format!("Failed to set local storage {key}: {err}"));
        anyhow::Error::msg("Local storage failure, see console log")
    })
}

pub struct LocalPreference {
    key: String,
}

impl LocalPreference {
    pub fn new(key: &str) -> Self {
        LocalPreference {
            key: String::from(key),
        }
    }
}

impl PreferenceStore for LocalPreference {
    // an unrecognized value counts as "no preference"
    fn load(&self) -> Result<Option<Theme>> {
        let value = get_local_storage(&self.key)?;

        Ok(value.and_then(|value| value.parse().ok()))
    }

    fn save(&self, theme: Theme) -> Result<()> {
        set_local_storage(&self.key, theme.as_str())
    }
}
