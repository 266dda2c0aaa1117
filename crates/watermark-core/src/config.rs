use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_BASE_URL, DEFAULT_ERROR_DISPLAY_SECS, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_TIMEOUT_SECS,
};
use crate::error::Result;
use crate::params::{HexColor, Opacity};

/// Client settings, loadable from a TOML file. Every field is optional in the file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Server origin the `/process` and `/download` paths are appended to.
    pub base_url: String,
    pub timeout_secs: u64,
    /// How long a transient error stays visible.
    pub error_display_secs: u64,
    pub max_upload_bytes: usize,
    pub default_opacity: Opacity,
    pub default_color: HexColor,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            error_display_secs: DEFAULT_ERROR_DISPLAY_SECS,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            default_opacity: Opacity::default(),
            default_color: HexColor::default(),
        }
    }
}

impl ClientConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn error_display(&self) -> Duration {
        Duration::from_secs(self.error_display_secs)
    }
}
