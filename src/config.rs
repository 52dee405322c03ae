use crate::error::{config::ConfigError, AppError};

const FIGMA_AUTH_URL: &str = "https://www.figma.com/oauth";
const FIGMA_TOKEN_URL: &str = "https://api.figma.com/v1/oauth/token";
const FIGMA_API_URL: &str = "https://api.figma.com";

const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";
const DEFAULT_SCOPES: &str = "file_read";

/// Seconds an upstream-facing request handler may run before it is aborted.
const DEFAULT_UPSTREAM_DEADLINE_SECONDS: u64 = 30;

pub struct Config {
    pub host: String,
    pub port: u16,

    pub figma_client_id: String,
    pub figma_client_secret: String,
    pub figma_redirect_url: String,
    pub figma_scopes: String,

    pub figma_auth_url: String,
    pub figma_token_url: String,
    pub figma_api_url: String,

    pub frontend_url: String,
    pub upstream_deadline_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidEnvVar("PORT".to_string()))?,
            figma_client_id: std::env::var("FIGMA_CLIENT_ID")
                .map_err(|_| ConfigError::MissingEnvVar("FIGMA_CLIENT_ID".to_string()))?,
            figma_client_secret: std::env::var("FIGMA_CLIENT_SECRET")
                .map_err(|_| ConfigError::MissingEnvVar("FIGMA_CLIENT_SECRET".to_string()))?,
            figma_redirect_url: std::env::var("FIGMA_REDIRECT_URL")
                .map_err(|_| ConfigError::MissingEnvVar("FIGMA_REDIRECT_URL".to_string()))?,
            figma_scopes: std::env::var("FIGMA_SCOPES")
                .unwrap_or_else(|_| DEFAULT_SCOPES.to_string()),
            figma_auth_url: std::env::var("FIGMA_AUTH_URL")
                .unwrap_or_else(|_| FIGMA_AUTH_URL.to_string()),
            figma_token_url: std::env::var("FIGMA_TOKEN_URL")
                .unwrap_or_else(|_| FIGMA_TOKEN_URL.to_string()),
            figma_api_url: std::env::var("FIGMA_API_URL")
                .unwrap_or_else(|_| FIGMA_API_URL.to_string()),
            frontend_url: std::env::var("FRONTEND_URL")
                .unwrap_or_else(|_| DEFAULT_FRONTEND_URL.to_string()),
            upstream_deadline_seconds: match std::env::var("UPSTREAM_DEADLINE_SECONDS") {
                Ok(value) => value
                    .parse()
                    .map_err(|_| ConfigError::InvalidEnvVar("UPSTREAM_DEADLINE_SECONDS".to_string()))?,
                Err(_) => DEFAULT_UPSTREAM_DEADLINE_SECONDS,
            },
        })
    }
}
