// src/config.rs
use crate::error::AppError;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub backend_url: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Reads `BACKEND_API_URL` and `PORT`, loading a `.env` file first if present.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_vars(
            std::env::var("BACKEND_API_URL").ok(),
            std::env::var("PORT").ok(),
        )
    }

    pub fn from_vars(backend_url: Option<String>, port: Option<String>) -> Result<Self, AppError> {
        let backend_url = match backend_url {
            Some(url) if !url.trim().is_empty() => normalize_url(&url),
            _ => DEFAULT_BACKEND_URL.to_string(),
        };

        let port = match port {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| AppError::Config(format!("PORT is not a valid port: {raw}")))?,
            None => DEFAULT_PORT,
        };

        Ok(Self { backend_url, port })
    }

    pub fn with_overrides(mut self, backend_url: Option<String>, port: Option<u16>) -> Self {
        if let Some(url) = backend_url {
            self.backend_url = normalize_url(&url);
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }
}

pub fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
