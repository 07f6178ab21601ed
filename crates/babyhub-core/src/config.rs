use std::str::FromStr;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to a value that cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to a value that cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so only unparseable values fail.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let env = parse_environment(&or_default("BABYHUB_ENV", "development"));

    let bind_addr: SocketAddr =
        parse_as("BABYHUB_BIND_ADDR", &or_default("BABYHUB_BIND_ADDR", "0.0.0.0:3000"))?;
    let log_level = or_default("BABYHUB_LOG_LEVEL", env.default_log_level());
    let catalog_path = optional("BABYHUB_CATALOG_PATH").map(PathBuf::from);

    let assist_base_url = or_default("BABYHUB_ASSIST_BASE_URL", "http://127.0.0.1:5001/api");
    if !assist_base_url.starts_with("http://") && !assist_base_url.starts_with("https://") {
        return Err(ConfigError::InvalidEnvVar {
            var: "BABYHUB_ASSIST_BASE_URL".to_string(),
            reason: format!("expected an http(s) URL, got '{assist_base_url}'"),
        });
    }

    let assist_timeout_secs = parse_nonzero(
        "BABYHUB_ASSIST_TIMEOUT_SECS",
        &or_default("BABYHUB_ASSIST_TIMEOUT_SECS", "10"),
    )?;
    let assist_connect_timeout_secs = parse_nonzero(
        "BABYHUB_ASSIST_CONNECT_TIMEOUT_SECS",
        &or_default("BABYHUB_ASSIST_CONNECT_TIMEOUT_SECS", "5"),
    )?;
    let assist_max_retries = parse_as(
        "BABYHUB_ASSIST_MAX_RETRIES",
        &or_default("BABYHUB_ASSIST_MAX_RETRIES", "2"),
    )?;
    let assist_retry_backoff_base_ms = parse_as(
        "BABYHUB_ASSIST_RETRY_BACKOFF_BASE_MS",
        &or_default("BABYHUB_ASSIST_RETRY_BACKOFF_BASE_MS", "250"),
    )?;

    let assist_quota_max_requests = parse_nonzero(
        "BABYHUB_ASSIST_QUOTA_MAX_REQUESTS",
        &or_default("BABYHUB_ASSIST_QUOTA_MAX_REQUESTS", "60"),
    )?;
    let assist_quota_window_secs = parse_nonzero(
        "BABYHUB_ASSIST_QUOTA_WINDOW_SECS",
        &or_default("BABYHUB_ASSIST_QUOTA_WINDOW_SECS", "60"),
    )?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        catalog_path,
        assist_base_url,
        assist_timeout_secs,
        assist_connect_timeout_secs,
        assist_max_retries,
        assist_retry_backoff_base_ms,
        assist_quota_max_requests,
        assist_quota_window_secs,
    })
}

fn parse_as<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
}

/// Like [`parse_as`], but a zero value is rejected.
fn parse_nonzero<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr + Default + PartialEq,
    T::Err: std::fmt::Display,
{
    let value: T = parse_as(var, raw)?;
    if value == T::default() {
        return Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(value)
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
