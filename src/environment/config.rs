use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::{Error, Result};

const DEFAULT_API_URL: &str = "https://jsonplaceholder.typicode.com";
const API_URL_ENV: &str = "STATELAB_API_URL";

#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: Url,
    pub timeout_ms: u64,
    pub page_size: usize,
    pub search_debounce_ms: u64,
    pub toast_duration_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_API_URL).expect("valid default url"),
            timeout_ms: 10_000,
            page_size: 12,
            search_debounce_ms: 300,
            toast_duration_ms: 3000,
        }
    }
}

impl Config {
    /// Parse the config, `STATELAB_API_URL` still wins over the json
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?.with_env()
    }

    /// Read the config from disk, a missing file means defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config = match std::fs::read(path) {
            Ok(data) => serde_json::from_slice::<Config>(&data)?.validate()?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                Config::default()
            }
            Err(e) => return Err(Error::Request(format!("Could not read config: {e}"))),
        };
        config.with_env()
    }

    /// `STATELAB_API_URL` replaces the configured api url
    pub fn with_env(self) -> Result<Self> {
        self.with_env_var(API_URL_ENV)
    }

    fn with_env_var(self, name: &str) -> Result<Self> {
        match std::env::var(name) {
            Ok(value) => {
                log::debug!("{name} overrides api url with {value}");
                self.with_api_url(&value)
            }
            Err(_) => Ok(self),
        }
    }

    pub fn with_api_url(mut self, url: &str) -> Result<Self> {
        self.api_url = Url::parse(url)
            .map_err(|e| Error::InvalidArgument(format!("Invalid api url {url:?}: {e}")))?;
        Ok(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }

    fn validate(self) -> Result<Self> {
        if self.page_size == 0 {
            return Err(Error::InvalidArgument(
                "page_size must be greater than zero".to_string(),
            ));
        }
        Ok(self)
    }
}
