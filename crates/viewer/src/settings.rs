use crate::error::{Result, ViewerError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_INBOX: &str = "inbox";
pub const DEFAULT_RESOLVE_DEBOUNCE_MS: u64 = 50;

/// User settings of the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerSettings {
    /// Inbox folder path. Ancestors under it are not expanded, and files lose
    /// their last tag into it.
    pub inbox: String,

    /// Window of the leading-edge debounce applied to metadata "resolve" bursts
    pub resolve_debounce_ms: u64,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            inbox: DEFAULT_INBOX.to_string(),
            resolve_debounce_ms: DEFAULT_RESOLVE_DEBOUNCE_MS,
        }
    }
}

impl ViewerSettings {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::parse(&bytes)
    }

    /// Accepts JSON or TOML
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let settings: Self = match serde_json::from_slice(bytes) {
            Ok(settings) => settings,
            Err(json_err) => {
                let utf8 = std::str::from_utf8(bytes)
                    .map_err(|err| ViewerError::InvalidSettings(format!("{json_err}; {err}")))?;
                toml::from_str(utf8).map_err(|toml_err| {
                    ViewerError::InvalidSettings(format!(
                        "not valid JSON ({json_err}) or TOML ({toml_err})"
                    ))
                })?
            }
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.resolve_debounce_ms == 0 {
            return Err(ViewerError::InvalidSettings(
                "resolve_debounce_ms must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn resolve_debounce(&self) -> Duration {
        Duration::from_millis(self.resolve_debounce_ms)
    }
}
