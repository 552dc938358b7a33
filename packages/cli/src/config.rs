use std::env;
use thiserror::Error;

const DEFAULT_API_URL: &str = "http://localhost:8080";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("OPSHUB_TOKEN is not set; export the console session token")]
    MissingToken,
}

#[derive(Debug)]
pub struct Config {
    pub api_url: String,
    pub token: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = env::var("OPSHUB_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let token = env::var("OPSHUB_TOKEN")
            .ok()
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken)?;

        Ok(Config { api_url, token })
    }
}
