//! Client configuration (API location, session file).

use std::path::PathBuf;

use reqwest::Url;
use thiserror::Error;

pub const API_URL_ENV: &str = "SMARTBIZ_API_URL";
pub const SESSION_FILE_ENV: &str = "SMARTBIZ_SESSION_FILE";
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid API url '{url}': {reason}")]
    InvalidApiUrl { url: String, reason: String },

    #[error("failed to resolve OS app data directory for the session file")]
    NoDataDir,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_url: Url,
    session_file: PathBuf,
}

impl ClientConfig {
    /// Build a configuration for `api_url`, keeping the session file in the
    /// default location (or a relative fallback when no data dir exists).
    pub fn new(api_url: &str) -> Result<Self, ConfigError> {
        let session_file =
            default_session_file().unwrap_or_else(|_| PathBuf::from("smartbiz-session.json"));
        Ok(Self {
            api_url: parse_api_url(api_url)?,
            session_file,
        })
    }

    /// Read `SMARTBIZ_API_URL` and `SMARTBIZ_SESSION_FILE`, falling back to
    /// `http://localhost:8080` and `{data_dir}/smartbiz/session.json` when a
    /// variable is unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => url,
            _ => DEFAULT_API_URL.to_string(),
        };
        let session_file = match std::env::var_os(SESSION_FILE_ENV) {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => default_session_file()?,
        };

        Ok(Self {
            api_url: parse_api_url(&api_url)?,
            session_file,
        })
    }

    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = path.into();
        self
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    pub fn session_file(&self) -> &PathBuf {
        &self.session_file
    }

    /// Absolute URL for an API path such as `/api/suppliers`.
    ///
    /// Any path prefix on the base URL is kept (`http://host/v1` + `/api/x`
    /// gives `http://host/v1/api/x`).
    pub fn endpoint(&self, path: &str) -> Url {
        let mut url = self.api_url.clone();
        let base = url.path().trim_end_matches('/').to_string();
        let path = path.trim_start_matches('/');
        url.set_path(&format!("{base}/{path}"));
        url
    }
}

fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidApiUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("url cannot carry a path".to_string()));
    }
    Ok(url)
}

/// `{app_data_dir}/smartbiz/session.json`.
fn default_session_file() -> Result<PathBuf, ConfigError> {
    let mut dir = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .ok_or(ConfigError::NoDataDir)?;

    dir.push("smartbiz");
    dir.push("session.json");
    Ok(dir)
}
