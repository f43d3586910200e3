use super::error::ConfigError;
use super::types::AppConfig;

const MIN_CHAR_BUDGET: usize = 100;
const MAX_RETRY_BOUND: u32 = 10;
const TEMPERATURE_RANGE: std::ops::RangeInclusive<f32> = 0.0..=2.0;

/// Checks every constraint and reports all violations at once.
pub fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    let mut problems = Vec::new();

    if config.endpoint.base_url.trim().is_empty() {
        problems.push("endpoint.base_url must not be empty".to_string());
    }
    for (name, model) in [
        ("models.creative", &config.models.creative),
        ("models.critical", &config.models.critical),
        ("models.judge", &config.models.judge),
    ] {
        if model.trim().is_empty() {
            problems.push(format!("{name} must not be empty"));
        }
    }

    let d = &config.debate;
    if d.max_rounds < 1 {
        problems.push("debate.max_rounds must be >= 1".to_string());
    }
    if !d.convergence_delta.is_finite() || d.convergence_delta < 0.0 {
        problems.push(format!(
            "debate.convergence_delta must be >= 0, got {}",
            d.convergence_delta
        ));
    }
    for (name, temp) in [
        ("debate.temp_a", d.temp_a),
        ("debate.temp_b", d.temp_b),
        ("debate.temp_j", d.temp_j),
    ] {
        if !TEMPERATURE_RANGE.contains(&temp) {
            problems.push(format!("{name} must be within [0, 2], got {temp}"));
        }
    }
    for (name, budget) in [
        ("debate.max_chars_agent", d.max_chars_agent),
        ("debate.max_chars_judge", d.max_chars_judge),
    ] {
        if budget < MIN_CHAR_BUDGET {
            problems.push(format!("{name} must be >= {MIN_CHAR_BUDGET}, got {budget}"));
        }
    }
    if !(d.similarity_threshold > 0.0 && d.similarity_threshold <= 1.0) {
        problems.push(format!(
            "debate.similarity_threshold must be within (0, 1], got {}",
            d.similarity_threshold
        ));
    }
    if d.retry_bound > MAX_RETRY_BOUND {
        problems.push(format!(
            "debate.retry_bound must be <= {MAX_RETRY_BOUND}, got {}",
            d.retry_bound
        ));
    }
    if config.endpoint.transport_attempts < 1 {
        problems.push("endpoint.transport_attempts must be >= 1".to_string());
    }
    if config.endpoint.backoff_base_ms > config.endpoint.backoff_max_ms {
        problems.push(format!(
            "endpoint.backoff_base_ms ({}) must not exceed endpoint.backoff_max_ms ({})",
            config.endpoint.backoff_base_ms, config.endpoint.backoff_max_ms
        ));
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Invalid(problems))
    }
}
