use std::path::PathBuf;
use std::str::FromStr;

use super::error::ConfigError;
use super::types::AppConfig;

/// Applies the environment layer; `lookup` is `std::env::var` outside tests.
///
/// Unset and empty variables leave the value untouched.
pub fn apply_env<F>(config: &mut AppConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(v) = get("LOCAL_BASE_URL") {
        config.endpoint.base_url = v;
    }
    if let Some(v) = get("LOCAL_API_KEY") {
        config.endpoint.api_key = v;
    }
    if let Some(v) = get("MODEL_CREATIVE") {
        config.models.creative = v;
    }
    if let Some(v) = get("MODEL_CRITICAL") {
        config.models.critical = v;
    }
    if let Some(v) = get("MODEL_JUDGE") {
        config.models.judge = v;
    }
    if let Some(v) = get("TEMP_A") {
        config.debate.temp_a = parse("TEMP_A", v)?;
    }
    if let Some(v) = get("TEMP_B") {
        config.debate.temp_b = parse("TEMP_B", v)?;
    }
    if let Some(v) = get("TEMP_J") {
        config.debate.temp_j = parse("TEMP_J", v)?;
    }
    if let Some(v) = get("MAX_ROUNDS") {
        config.debate.max_rounds = parse("MAX_ROUNDS", v)?;
    }
    if let Some(v) = get("CONVERGENCE_DELTA") {
        config.debate.convergence_delta = parse("CONVERGENCE_DELTA", v)?;
    }
    if let Some(v) = get("STOP_PHRASES") {
        config.debate.stop_phrases = split_phrases(&v);
    }
    if let Some(v) = get("MAX_CHARS_AGENT") {
        config.debate.max_chars_agent = parse("MAX_CHARS_AGENT", v)?;
    }
    if let Some(v) = get("MAX_CHARS_JUDGE") {
        config.debate.max_chars_judge = parse("MAX_CHARS_JUDGE", v)?;
    }
    if let Some(v) = get("SIMILARITY_THRESHOLD") {
        config.debate.similarity_threshold = parse("SIMILARITY_THRESHOLD", v)?;
    }
    if let Some(v) = get("RETRY_BOUND") {
        config.debate.retry_bound = parse("RETRY_BOUND", v)?;
    }
    if let Some(v) = get("SEED") {
        config.endpoint.seed = Some(parse("SEED", v)?);
    }
    if let Some(v) = get("REQUEST_TIMEOUT_SECS") {
        config.endpoint.timeout_secs = Some(parse("REQUEST_TIMEOUT_SECS", v)?);
    }
    if let Some(v) = get("TRANSPORT_ATTEMPTS") {
        config.endpoint.transport_attempts = parse("TRANSPORT_ATTEMPTS", v)?;
    }
    if let Some(v) = get("BACKOFF_BASE_MS") {
        config.endpoint.backoff_base_ms = parse("BACKOFF_BASE_MS", v)?;
    }
    if let Some(v) = get("BACKOFF_MAX_MS") {
        config.endpoint.backoff_max_ms = parse("BACKOFF_MAX_MS", v)?;
    }
    if let Some(v) = get("LOG_DIR") {
        config.debate.log_dir = PathBuf::from(v);
    }
    Ok(())
}

fn parse<T>(name: &'static str, value: String) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|err: T::Err| ConfigError::InvalidEnv {
            name,
            reason: err.to_string(),
            value,
        })
}

/// `;`-separated list; blank entries are dropped.
fn split_phrases(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
