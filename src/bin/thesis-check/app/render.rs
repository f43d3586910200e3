use std::io::{self, Write};
use std::time::Duration;

use serde::Serialize;
use thesis_check::debate::DebateHistory;
use thesis_check::{DebateOutcome, JudgeDecision, Role, TurnOutput};

use crate::config::AppConfig;

pub fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

/// Human-readable report of a finished run.
pub fn write_report<W: Write>(
    out: &mut W,
    outcome: &DebateOutcome,
    config: &AppConfig,
    elapsed: Duration,
) -> io::Result<()> {
    write_transcript(out, &outcome.thesis, &outcome.history, Some(&outcome.decision))?;
    writeln!(
        out,
        "\nDuration: {:.1}s | Models: A={}, B={}, Judge={} | Stop: {} | Rounds: {}",
        elapsed.as_secs_f64(),
        config.models.creative,
        config.models.critical,
        config.models.judge,
        outcome.state,
        outcome.rounds,
    )?;
    if let Some(path) = &outcome.log_path {
        writeln!(out, "Log: {}", path.display())?;
    }
    Ok(())
}

/// Thesis, both agents' rounds, and the final decision if there is one.
pub fn write_transcript<W: Write>(
    out: &mut W,
    thesis: &str,
    history: &DebateHistory,
    decision: Option<&JudgeDecision>,
) -> io::Result<()> {
    writeln!(out, "=== THESIS ===\n{thesis}")?;
    for (title, role) in [("PRO", Role::Pro), ("CONTRA", Role::Contra)] {
        writeln!(out, "\n=== {title} ===")?;
        for turn in history.turns_of(role) {
            write_turn(out, turn)?;
        }
    }
    writeln!(out, "\n=== JUDGE (final) ===")?;
    match decision {
        Some(decision) => write_json(out, decision),
        None => writeln!(out, "(no final decision recorded)"),
    }
}

fn write_turn<W: Write>(out: &mut W, turn: &TurnOutput) -> io::Result<()> {
    if turn.outcome.is_fallback() {
        writeln!(out, "\nRound {} [fallback]", turn.round)?;
    } else {
        writeln!(out, "\nRound {}", turn.round)?;
    }
    writeln!(out, "{}", turn.text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use thesis_check::chat::Usage;
    use thesis_check::{DebateState, TurnOutcome};

    fn turn(role: Role, round: u32, text: &str, outcome: TurnOutcome) -> TurnOutput {
        TurnOutput {
            role,
            round,
            text: text.into(),
            raw: text.into(),
            outcome,
            rejected: Vec::new(),
            decision: None,
            usage: Usage::default(),
        }
    }

    fn outcome() -> DebateOutcome {
        let accepted = TurnOutcome::Accepted { attempts: 1 };
        DebateOutcome {
            thesis: "Tea beats coffee.".into(),
            history: DebateHistory::from(vec![
                turn(Role::Pro, 1, "- PRO1: antioxidants", accepted),
                turn(Role::Contra, 1, "- CONTRA1: caffeine", TurnOutcome::Fallback { attempts: 3 }),
            ]),
            decision: JudgeDecision::fallback("undecided"),
            state: DebateState::StoppedByMaxRounds,
            rounds: 1,
            usage: Usage::default(),
            log_path: Some("runs/run-20250101-120000.jsonl".into()),
        }
    }

    #[test]
    fn report_lists_rounds_and_flags_fallbacks() {
        let mut buf = Vec::new();
        write_report(&mut buf, &outcome(), &AppConfig::default(), Duration::from_millis(1500))
            .expect("render");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.contains("=== THESIS ===\nTea beats coffee."));
        assert!(text.contains("Round 1\n- PRO1: antioxidants"));
        assert!(text.contains("Round 1 [fallback]\n- CONTRA1: caffeine"));
        assert!(text.contains("\"probability\": 0.5"));
        assert!(text.contains("Duration: 1.5s"));
        assert!(text.contains("Stop: stopped_by_max_rounds"));
        assert!(text.contains("Log: runs/run-20250101-120000.jsonl"));
    }

    #[test]
    fn json_output_is_machine_readable() {
        let mut buf = Vec::new();
        write_json(&mut buf, &outcome()).expect("render");
        let value: serde_json::Value = serde_json::from_slice(&buf).expect("json");
        assert_eq!(value["state"], "stopped_by_max_rounds");
        assert_eq!(value["history"][1]["outcome"]["status"], "fallback");
    }
}
