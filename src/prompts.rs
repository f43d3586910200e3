//! Prompt text for the agents and the judge.

use crate::chat::ChatMessage;
use crate::turn::Role;
use crate::validation::{RejectReason, Rejection};

pub const SYSTEM_SAFETY: &str = "Answer in English, precisely and technically correct. \
Follow safety and legal standards. No dangerous instructions. \
Do not invent sources or statistics. If facts are uncertain, say so and name the data you would need.";

const AGENT_RULES: &str = "Rules: exactly these 4 lines, no repetition, \
no quotes or paraphrases of the other agent or of earlier rounds.";

const JUDGE_SHAPE: &str = r#"{"summary":"string","key_evidence_for":["..."],"key_evidence_against":["..."],"verdict":"string","probability":0.0}"#;

const AGENT_CONTEXT_LINES: usize = 4;

/// The role-specific system prompt.
pub fn role_prompt(role: Role) -> String {
    match role {
        Role::Pro => format!(
            "You are Agent A (Pro). Reply ONLY in the following template (no intro, no outro, no extra text):\n\
             - PRO1: <short, new argument>\n\
             - PRO2: <short, new argument>\n\
             - NEW_ASSUMPTION: <EXACTLY ONE new, justified assumption>\n\
             - RISK: <EXACTLY ONE concrete risk>\n\
             {AGENT_RULES}"
        ),
        Role::Contra => format!(
            "You are Agent B (Contra). Reply ONLY in the following template (no intro, no outro, no extra text):\n\
             - CONTRA1: <short, new counter-argument>\n\
             - CONTRA2: <short, new counter-argument>\n\
             - ASSUMPTION_CHECK: <EXACTLY ONE explicit check of an assumption made by A>\n\
             - EDGE_CASE: <EXACTLY ONE plausible counterexample>\n\
             {AGENT_RULES}"
        ),
        Role::JudgeProbe => format!(
            "You are the neutral judge. Reply EXCLUSIVELY with JSON (no markdown, no comments):\n\
             {JUDGE_SHAPE}\n\
             Assess ONLY the content of the LATEST round. probability is in [0, 1] and conservative \
             (for example 0.55, not 0.99)."
        ),
        Role::JudgeFinal => format!(
            "You are the neutral judge. Reply EXCLUSIVELY with JSON (no markdown, no comments):\n\
             {JUDGE_SHAPE}\n\
             Assess the WHOLE debate below. probability is in [0, 1] and conservative \
             (for example 0.55, not 0.99)."
        ),
    }
}

/// Messages for a Pro or Contra turn.
///
/// `context` is the condensed latest exchange; an empty one is left out.
pub fn agent_messages(role: Role, thesis: &str, context: &str) -> Vec<ChatMessage> {
    let mut messages = vec![
        ChatMessage::system().content(SYSTEM_SAFETY).build(),
        ChatMessage::system().content(role_prompt(role)).build(),
    ];
    if !context.trim().is_empty() {
        messages.push(
            ChatMessage::user()
                .content(format!("Context (last round, condensed):\n{context}"))
                .build(),
        );
    }
    messages.push(
        ChatMessage::user()
            .content(format!(
                "Thesis: {thesis}\nFollow the required template strictly."
            ))
            .build(),
    );
    messages
}

/// Condenses the latest Pro and Contra outputs to their first lines.
pub fn compact_history(last_pro: Option<&str>, last_contra: Option<&str>) -> String {
    if last_pro.is_none() && last_contra.is_none() {
        return String::new();
    }
    format!(
        "Last PRO:\n{}\n\nLast CONTRA:\n{}",
        first_lines(last_pro.unwrap_or_default(), AGENT_CONTEXT_LINES),
        first_lines(last_contra.unwrap_or_default(), AGENT_CONTEXT_LINES)
    )
}

/// Messages for the per-round judge probe.
pub fn probe_messages(thesis: &str, pro: &str, contra: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system().content(SYSTEM_SAFETY).build(),
        ChatMessage::system()
            .content(role_prompt(Role::JudgeProbe))
            .build(),
        ChatMessage::user()
            .content(format!(
                "Thesis: {thesis}\n\nPRO (last round):\n{pro}\n\nCONTRA (last round):\n{contra}"
            ))
            .build(),
    ]
}

/// Messages for the final judge over every round, given as `(round, pro, contra)`.
pub fn final_messages(thesis: &str, rounds: &[(u32, &str, &str)]) -> Vec<ChatMessage> {
    let transcript = rounds
        .iter()
        .map(|(round, pro, contra)| {
            format!("Round {round}\nPRO:\n{pro}\n\nCONTRA:\n{contra}")
        })
        .collect::<Vec<_>>()
        .join("\n\n");
    vec![
        ChatMessage::system().content(SYSTEM_SAFETY).build(),
        ChatMessage::system()
            .content(role_prompt(Role::JudgeFinal))
            .build(),
        ChatMessage::user()
            .content(format!("Thesis: {thesis}\n\n{transcript}"))
            .build(),
    ]
}

/// Instruction appended after a rejected attempt.
pub fn corrective_instruction(role: Role, rejection: &Rejection) -> String {
    let fix = match rejection.reason {
        RejectReason::TemplateViolation => {
            let skeleton = role
                .template()
                .map(|spec| spec.skeleton())
                .unwrap_or_default();
            format!(
                "Output exactly these lines and ONLY these lines, in this order. \
                 Do not add any other text. Do not output JSON.\n{skeleton}"
            )
        }
        RejectReason::Mirroring => "Do not quote or paraphrase the other agent. \
             Provide entirely new points from a different angle."
            .to_string(),
        RejectReason::SelfRepeat => "Do not repeat your previous round. \
             Provide entirely new points."
            .to_string(),
        RejectReason::JudgeFormatInvalid => "STRICT: Reply with valid JSON only. No extra text. \
             probability must be a number between 0 and 1."
            .to_string(),
    };
    format!("Your previous output was invalid because: {rejection}\n{fix}")
}

fn first_lines(text: &str, n: usize) -> String {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .take(n)
        .collect::<Vec<_>>()
        .join("\n")
}
