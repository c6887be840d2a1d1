use anyhow::{Context, Result};
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1";
const DEFAULT_UPLOAD_DIR: &str = "uploads";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

/// Settings for the Gemini generateContent endpoint.
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
}

impl GeminiConfig {
    /// Full endpoint URL. Contains the API key, so never log it.
    pub fn endpoint_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.api_base.trim_end_matches('/'),
            self.model,
            self.api_key
        )
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini: GeminiConfig,
    pub upload_dir: PathBuf,
    pub bind_addr: SocketAddr,
    /// `None` means uploads are not size-limited.
    pub max_upload_bytes: Option<usize>,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Fails when `GEMINI_API_KEY` is missing so the server never starts
    /// without credentials.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = get("GEMINI_API_KEY").context(
            "Gemini API key is missing. Set GEMINI_API_KEY in your environment variables or .env file",
        )?;

        let gemini = GeminiConfig {
            api_key,
            model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_base: get("GEMINI_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        };

        let upload_dir = PathBuf::from(
            get("UPLOAD_DIR").unwrap_or_else(|| DEFAULT_UPLOAD_DIR.to_string()),
        );

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("BIND_ADDR must be a socket address like 127.0.0.1:5000")?;

        let max_upload_bytes = match get("MAX_UPLOAD_BYTES") {
            Some(raw) => Some(
                raw.parse::<usize>()
                    .with_context(|| format!("MAX_UPLOAD_BYTES must be a byte count, got '{}'", raw))?,
            ),
            None => None,
        };

        Ok(Self {
            gemini,
            upload_dir,
            bind_addr,
            max_upload_bytes,
        })
    }
}
