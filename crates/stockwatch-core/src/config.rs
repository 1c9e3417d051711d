use std::path::PathBuf;

use crate::app_config::{AppConfig, FetchFailurePolicy, NotifyPolicy};
use crate::ConfigError;

pub const DEFAULT_PRODUCT_ID: &str = "735577";

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/92.0.4515.131 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` if a variable is set to a value that
/// does not parse.
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
/// Returns `ConfigError::InvalidEnvVar` if a variable is set to a value that
/// does not parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; the lookup is injected so tests can use a
/// plain `HashMap` instead of mutating the process environment.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let state_dir = PathBuf::from(or_default("STOCKWATCH_STATE_DIR", "."));
    let log_level = or_default("STOCKWATCH_LOG_LEVEL", "info");
    let product_id = or_default("STOCKWATCH_PRODUCT_ID", DEFAULT_PRODUCT_ID);
    let user_agent = or_default("STOCKWATCH_USER_AGENT", DEFAULT_USER_AGENT);
    let directory_url = lookup("STOCKWATCH_DIRECTORY_URL")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let fetch_max_retries = parse_u32("STOCKWATCH_FETCH_MAX_RETRIES", "2")?;
    let fetch_retry_backoff_base_secs =
        parse_u64("STOCKWATCH_FETCH_RETRY_BACKOFF_BASE_SECS", "5")?;

    let fetch_failure_policy =
        parse_fetch_failure_policy(&or_default("STOCKWATCH_FETCH_FAILURE_POLICY", "skip"))?;
    let notify_policy = parse_notify_policy(&or_default("STOCKWATCH_NOTIFY_POLICY", "every-cycle"))?;

    let show_countdown = match or_default("STOCKWATCH_SHOW_COUNTDOWN", "true")
        .to_ascii_lowercase()
        .as_str()
    {
        "true" | "1" | "yes" => true,
        "false" | "0" | "no" => false,
        other => {
            return Err(invalid(
                "STOCKWATCH_SHOW_COUNTDOWN",
                format!("'{other}' is not a boolean"),
            ))
        }
    };

    Ok(AppConfig {
        state_dir,
        log_level,
        product_id,
        user_agent,
        directory_url,
        fetch_max_retries,
        fetch_retry_backoff_base_secs,
        fetch_failure_policy,
        notify_policy,
        show_countdown,
    })
}

fn parse_fetch_failure_policy(s: &str) -> Result<FetchFailurePolicy, ConfigError> {
    match s {
        "skip" => Ok(FetchFailurePolicy::Skip),
        "exit" => Ok(FetchFailurePolicy::Exit),
        other => Err(ConfigError::InvalidEnvVar {
            var: "STOCKWATCH_FETCH_FAILURE_POLICY".to_string(),
            reason: format!("'{other}' is not one of: skip, exit"),
        }),
    }
}

fn parse_notify_policy(s: &str) -> Result<NotifyPolicy, ConfigError> {
    match s {
        "every-cycle" => Ok(NotifyPolicy::EveryCycle),
        "on-change" => Ok(NotifyPolicy::OnChange),
        other => Err(ConfigError::InvalidEnvVar {
            var: "STOCKWATCH_NOTIFY_POLICY".to_string(),
            reason: format!("'{other}' is not one of: every-cycle, on-change"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
