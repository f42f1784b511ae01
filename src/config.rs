use std::env;
use std::time::Duration;
use url::Url;

use crate::errors::AppError;

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";
const DEFAULT_API_URL: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SESSION_IDLE_SECS: u64 = 3600;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: String,
    pub api_url: Url,
    pub request_timeout: Duration,
    pub session_idle: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_address = lookup("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let raw_url = lookup("EMPLOYEE_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = Url::parse(&raw_url)
            .map_err(|err| AppError::Config(format!("EMPLOYEE_API_URL '{}': {}", raw_url, err)))?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(AppError::Config(format!("EMPLOYEE_API_URL must be http(s), got '{}'", raw_url)));
        }

        let request_timeout = Duration::from_secs(parse_secs(&lookup, "REQUEST_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?);
        let session_idle = Duration::from_secs(parse_secs(&lookup, "SESSION_IDLE_SECS", DEFAULT_SESSION_IDLE_SECS)?);

        Ok(Config { bind_address, api_url, request_timeout, session_idle })
    }
}

fn parse_secs<F>(lookup: &F, key: &str, default: u64) -> Result<u64, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => match value.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(secs),
            _ => Err(AppError::Config(format!("{} must be a positive number of seconds, got '{}'", key, value))),
        },
    }
}
