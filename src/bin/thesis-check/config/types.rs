use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thesis_check::debate::DEFAULT_MODEL;
use thesis_check::turn::DEFAULT_RETRY_BOUND;
use thesis_check::validation::DEFAULT_SIMILARITY_THRESHOLD;
use thesis_check::{DebateConfig, RoleSettings};

const DEFAULT_LOG_ROTATE_SIZE: u64 = 10 * 1024 * 1024;
const DEFAULT_LOG_ROTATE_KEEP: usize = 5;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: EndpointConfig,
    pub models: ModelsConfig,
    pub debate: DebateSection,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// The typed configuration handed to the debate engine.
    pub fn debate_config(&self) -> DebateConfig {
        let d = &self.debate;
        DebateConfig {
            pro: RoleSettings::new(&self.models.creative, d.temp_a, d.max_chars_agent),
            contra: RoleSettings::new(&self.models.critical, d.temp_b, d.max_chars_agent),
            judge: RoleSettings::new(&self.models.judge, d.temp_j, d.max_chars_judge),
            max_rounds: d.max_rounds,
            convergence_delta: d.convergence_delta,
            stop_phrases: d.stop_phrases.clone(),
            similarity_threshold: d.similarity_threshold,
            retry_bound: d.retry_bound,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub base_url: String,
    pub api_key: String,
    pub seed: Option<u64>,
    pub timeout_secs: Option<u64>,
    /// Send `response_format: json_object` on judge turns.
    pub structured_output: bool,
    /// Transport attempts per completion; 1 keeps client errors fatal.
    pub transport_attempts: usize,
    /// Delay before the first transport retry.
    pub backoff_base_ms: u64,
    pub backoff_max_ms: u64,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:1234/v1".to_string(),
            api_key: "lm-studio".to_string(),
            seed: None,
            timeout_secs: None,
            structured_output: false,
            transport_attempts: 1,
            backoff_base_ms: 200,
            backoff_max_ms: 2_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelsConfig {
    /// Pro agent.
    pub creative: String,
    /// Contra agent.
    pub critical: String,
    pub judge: String,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            creative: DEFAULT_MODEL.to_string(),
            critical: DEFAULT_MODEL.to_string(),
            judge: DEFAULT_MODEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DebateSection {
    pub temp_a: f32,
    pub temp_b: f32,
    pub temp_j: f32,
    pub max_rounds: u32,
    pub convergence_delta: f64,
    pub stop_phrases: Vec<String>,
    pub max_chars_agent: usize,
    pub max_chars_judge: usize,
    pub similarity_threshold: f64,
    pub retry_bound: u32,
    pub log_dir: PathBuf,
}

impl Default for DebateSection {
    fn default() -> Self {
        let engine = DebateConfig::default();
        Self {
            temp_a: engine.pro.temperature,
            temp_b: engine.contra.temperature,
            temp_j: engine.judge.temperature,
            max_rounds: engine.max_rounds,
            convergence_delta: engine.convergence_delta,
            stop_phrases: engine.stop_phrases,
            max_chars_agent: engine.pro.max_chars,
            max_chars_judge: engine.judge.max_chars,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            retry_bound: DEFAULT_RETRY_BOUND,
            log_dir: PathBuf::from("runs"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Log to this file (rotated) instead of stderr.
    pub path: Option<String>,
    pub rotate_size: u64,
    pub rotate_keep: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            path: None,
            rotate_size: DEFAULT_LOG_ROTATE_SIZE,
            rotate_keep: DEFAULT_LOG_ROTATE_KEEP,
        }
    }
}
