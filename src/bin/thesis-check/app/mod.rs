mod render;
mod replay;

use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use thesis_check::builder::LLMBuilder;
use thesis_check::chat::ChatProvider;
use thesis_check::event_log::JsonlEventLog;
use thesis_check::Debate;

use crate::args::CliArgs;
use crate::config::{load_config, validate, AppConfig};
use crate::logging::init_logging;

pub async fn run() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let loaded = load_config(args.config.as_deref())?;
    let mut config = loaded.config.clone();
    args.apply_overrides(&mut config);
    let _logger = init_logging(&config.logging)?;
    loaded.log_sources();
    execute(&args, &config).await
}

/// Replays a log, or validates the configuration and runs a debate.
async fn execute(args: &CliArgs, config: &AppConfig) -> anyhow::Result<()> {
    if let Some(path) = &args.replay {
        return replay::print_replay(path, args.json);
    }
    validate(config)?;

    let thesis = args.thesis();
    let client = build_client(config)?;
    let debate = Debate::new(client, config.debate_config());
    let mut sink = JsonlEventLog::create(&config.debate.log_dir).with_context(|| {
        format!(
            "cannot create event log in {}",
            config.debate.log_dir.display()
        )
    })?;
    log::info!("event log: {}", sink.path().display());

    let started = Instant::now();
    let outcome = debate.run(&thesis, &mut sink).await?;
    let mut stdout = std::io::stdout().lock();
    if args.json {
        render::write_json(&mut stdout, &outcome)?;
    } else {
        render::write_report(&mut stdout, &outcome, config, started.elapsed())?;
    }
    Ok(())
}

fn build_client(config: &AppConfig) -> anyhow::Result<Box<dyn ChatProvider>> {
    let endpoint = &config.endpoint;
    let mut builder = LLMBuilder::new()
        .base_url(&endpoint.base_url)
        .api_key(&endpoint.api_key)
        .structured_output(endpoint.structured_output);
    if let Some(timeout) = endpoint.timeout_secs {
        builder = builder.timeout_seconds(timeout);
    }
    if let Some(seed) = endpoint.seed {
        builder = builder.seed(seed);
    }
    if endpoint.transport_attempts > 1 {
        builder = builder
            .resilient(true)
            .resilient_attempts(endpoint.transport_attempts)
            .resilient_backoff(endpoint.backoff_base_ms, endpoint.backoff_max_ms);
    }
    builder.build().context("cannot build completion client")
}
