use std::io::Write;
use std::path::Path;

use anyhow::Context;
use thesis_check::event_log::replay_file;

use super::render;

pub fn print_replay(path: &Path, json: bool) -> anyhow::Result<()> {
    let run = replay_file(path).with_context(|| format!("cannot replay {}", path.display()))?;
    let mut stdout = std::io::stdout().lock();
    if json {
        render::write_json(&mut stdout, &run)?;
        return Ok(());
    }
    render::write_transcript(&mut stdout, &run.thesis, &run.history, run.decision.as_ref())?;
    let state = run
        .state
        .map(|state| state.to_string())
        .unwrap_or_else(|| "incomplete (no run_stopped record)".to_string());
    writeln!(
        stdout,
        "\nModels: A={}, B={}, Judge={} | Stop: {} | Rounds: {}",
        run.models.pro,
        run.models.contra,
        run.models.judge,
        state,
        run.history.rounds()
    )?;
    Ok(())
}
