//! Judge decision parsing with a single structural repair step.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::truncate;

const MAX_EVIDENCE_ITEMS: usize = 10;
const EVIDENCE_ITEM_CHARS: usize = 300;
const FIELD_TRUNCATE_CHARS: usize = 600;
const FALLBACK_PROBABILITY: f64 = 0.5;

/// Structured verdict produced by every judge invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgeDecision {
    pub summary: String,
    pub key_evidence_for: Vec<String>,
    pub key_evidence_against: Vec<String>,
    pub verdict: String,
    /// Probability that the thesis holds, always within `[0.0, 1.0]`.
    pub probability: f64,
}

impl JudgeDecision {
    /// Decision used when the judge never produced a parseable answer.
    pub fn fallback(raw: &str) -> Self {
        Self {
            summary: "judge output could not be parsed".to_string(),
            key_evidence_for: Vec::new(),
            key_evidence_against: Vec::new(),
            verdict: truncate(raw.trim(), FIELD_TRUNCATE_CHARS),
            probability: FALLBACK_PROBABILITY,
        }
    }

    fn bounded(mut self) -> Self {
        self.summary = truncate(&self.summary, FIELD_TRUNCATE_CHARS);
        self.verdict = truncate(&self.verdict, FIELD_TRUNCATE_CHARS);
        for list in [&mut self.key_evidence_for, &mut self.key_evidence_against] {
            list.truncate(MAX_EVIDENCE_ITEMS);
            for item in list.iter_mut() {
                *item = truncate(item, EVIDENCE_ITEM_CHARS);
            }
        }
        self
    }
}

/// Parses a judge output into a decision.
///
/// Strict JSON is tried first. If that fails, exactly one repair is
/// attempted: the first balanced `{...}` substring of the text is parsed
/// instead. Either way the object must carry every required key with the
/// right type and a probability inside `[0, 1]`.
pub fn parse_judge(raw: &str) -> Result<JudgeDecision, String> {
    let trimmed = raw.trim();
    let value = match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => value,
        Err(strict_err) => {
            let candidate = extract_first_json_object(trimmed)
                .ok_or_else(|| format!("not valid JSON ({strict_err}) and no JSON object found"))?;
            serde_json::from_str::<Value>(candidate)
                .map_err(|err| format!("embedded JSON object is invalid: {err}"))?
        }
    };
    let object = value
        .as_object()
        .ok_or_else(|| "judge output is not a JSON object".to_string())?;
    decision_from_object(object).map(JudgeDecision::bounded)
}

/// Returns the first balanced JSON object substring of `text`.
///
/// Braces inside JSON strings (including escaped quotes) do not count.
/// If an opening brace is never closed, the search moves on to the next one.
pub fn extract_first_json_object(text: &str) -> Option<&str> {
    text.char_indices()
        .filter(|&(_, c)| c == '{')
        .find_map(|(start, _)| balanced_end(&text[start..]).map(|end| &text[start..start + end]))
}

/// Byte length of the balanced object starting at `text[0] == '{'`.
fn balanced_end(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (idx, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(idx + c.len_utf8());
                }
            }
            _ => {}
        }
    }
    None
}

fn decision_from_object(object: &Map<String, Value>) -> Result<JudgeDecision, String> {
    let probability = match object.get("probability") {
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| "probability is not a real number".to_string())?,
        Some(other) => return Err(format!("probability must be a number, got {other}")),
        None => return Err("missing key \"probability\"".to_string()),
    };
    if !(0.0..=1.0).contains(&probability) {
        return Err(format!("probability {probability} is outside [0, 1]"));
    }

    let verdict = string_field(object, "verdict")?;
    if verdict.trim().is_empty() {
        return Err("verdict is empty".to_string());
    }

    Ok(JudgeDecision {
        summary: string_field(object, "summary")?,
        key_evidence_for: string_list(object, "key_evidence_for")?,
        key_evidence_against: string_list(object, "key_evidence_against")?,
        verdict,
        probability,
    })
}

fn string_field(object: &Map<String, Value>, key: &str) -> Result<String, String> {
    match object.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(format!("{key} must be a string, got {other}")),
        None => Err(format!("missing key {key:?}")),
    }
}

fn string_list(object: &Map<String, Value>, key: &str) -> Result<Vec<String>, String> {
    let items = match object.get(key) {
        Some(Value::Array(items)) => items,
        Some(other) => return Err(format!("{key} must be an array, got {other}")),
        None => return Err(format!("missing key {key:?}")),
    };
    items
        .iter()
        .map(|item| match item {
            Value::String(s) => Ok(s.clone()),
            other => Err(format!("{key} items must be strings, got {other}")),
        })
        .collect()
}
