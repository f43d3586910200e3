use clap::Parser;
use std::path::PathBuf;

use crate::config::AppConfig;

pub const DEFAULT_THESIS: &str =
    "Switching to a heat pump will reduce household emissions over 10 years.";

#[derive(Parser, Debug)]
#[command(
    name = "thesis-check",
    about = "Local Pro/Contra debate runner with a judge model (LM Studio or any OpenAI-compatible endpoint)"
)]
pub struct CliArgs {
    /// Thesis text; the words are joined with spaces
    pub thesis: Vec<String>,
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub max_rounds: Option<u32>,
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
    #[arg(long)]
    pub base_url: Option<String>,
    #[arg(long)]
    pub seed: Option<u64>,
    /// Print the run result as JSON
    #[arg(long)]
    pub json: bool,
    /// Print a previous run reconstructed from its event log
    #[arg(long, value_name = "FILE")]
    pub replay: Option<PathBuf>,
}

impl CliArgs {
    pub fn thesis(&self) -> String {
        let joined = self.thesis.join(" ");
        let trimmed = joined.trim();
        if trimmed.is_empty() {
            DEFAULT_THESIS.to_string()
        } else {
            trimmed.to_string()
        }
    }

    /// Flags win over every other configuration layer.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(max_rounds) = self.max_rounds {
            config.debate.max_rounds = max_rounds;
        }
        if let Some(log_dir) = &self.log_dir {
            config.debate.log_dir = log_dir.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.endpoint.base_url = base_url.clone();
        }
        if let Some(seed) = self.seed {
            config.endpoint.seed = Some(seed);
        }
    }
}
