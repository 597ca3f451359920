use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::common::constants::{
    BIND_ADDRESS_ENV, DEFAULT_BIND_ADDRESS, HTTP_TIMEOUT_SECS, MAX_PAGE_SIZE, MAX_REQUEST_SIZE,
    SETTINGS_DIR_NAME, SETTINGS_FILE_NAME, USER_AGENT,
};

fn default_bind_address() -> String {
    DEFAULT_BIND_ADDRESS.to_string()
}

fn default_max_request_size() -> usize {
    MAX_REQUEST_SIZE
}

fn default_max_page_size() -> usize {
    MAX_PAGE_SIZE
}

fn default_http_timeout_secs() -> u64 {
    HTTP_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    USER_AGENT.to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Settings {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Request body ceiling in bytes. The public API contract is 2000;
    /// other values are for local testing only.
    #[serde(default = "default_max_request_size")]
    pub max_request_size: usize,
    /// Cap on upstream page bodies read during scraping
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            max_request_size: default_max_request_size(),
            max_page_size: default_max_page_size(),
            http_timeout_secs: default_http_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Settings {
    pub fn load(settings_file: &str) -> Result<Self> {
        let path = Path::new(settings_file);
        if !path.exists() {
            return Err(anyhow::anyhow!(
                "settings.json not found at '{}'. Exiting...",
                settings_file
            ));
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", settings_file))?;

        let settings: Settings = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file: {}", settings_file))?;

        info!("Settings loaded from '{}'.", settings_file);
        Ok(settings)
    }

    /// Loads the explicit file if one is given, otherwise the file in the
    /// user config directory if it exists, otherwise the defaults. The
    /// bind address environment override is applied last.
    pub fn resolve(settings_file: Option<&str>) -> Result<Self> {
        let mut settings = match settings_file {
            Some(file) => Self::load(file)?,
            None => match default_settings_path().filter(|path| path.exists()) {
                Some(path) => Self::load(&path.to_string_lossy())?,
                None => {
                    debug!("No settings file found, using defaults");
                    Self::default()
                }
            },
        };

        if let Ok(bind_address) = env::var(BIND_ADDRESS_ENV) {
            settings.apply_bind_override(bind_address);
        }

        Ok(settings)
    }

    pub fn apply_bind_override(&mut self, bind_address: String) {
        if !bind_address.trim().is_empty() {
            debug!("Bind address overridden to {}", bind_address);
            self.bind_address = bind_address;
        }
    }
}

fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(SETTINGS_DIR_NAME).join(SETTINGS_FILE_NAME))
}
