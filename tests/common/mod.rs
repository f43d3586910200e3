#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use thesis_check::chat::{ChatProvider, ChatRequest, ChatResponse, ChatRole};
use thesis_check::LLMError;

pub const PRO: [&str; 4] = [
    "- PRO1: Heat pumps deliver three units of heat per unit of electricity\n\
     - PRO2: Grid carbon intensity keeps falling each year\n\
     - NEW_ASSUMPTION: The home has at least average insulation\n\
     - RISK: Poor installation lowers efficiency",
    "- PRO1: Smart tariffs let owners run the compressor on cheap renewable hours\n\
     - PRO2: Modern refrigerants cut leakage impact sharply\n\
     - NEW_ASSUMPTION: Installers follow current commissioning guidance\n\
     - RISK: Winter peaks may still draw on gas plants",
    "- PRO1: Subsidy schemes shorten the payback period considerably\n\
     - PRO2: Removing the boiler eliminates on-site combustion altogether\n\
     - NEW_ASSUMPTION: Household heat demand stays roughly constant\n\
     - RISK: Electricity prices could rise faster than gas",
    "- PRO1: District planners can size substations for electrified heat\n\
     - PRO2: Heat pump lifetimes now exceed fifteen years\n\
     - NEW_ASSUMPTION: Maintenance contracts are honoured\n\
     - RISK: Supply chain shortages delay replacements",
];

pub const CONTRA: [&str; 4] = [
    "- CONTRA1: Manufacturing the unit carries a large embodied footprint\n\
     - CONTRA2: Old radiators need costly upgrades to work at low flow temperatures\n\
     - ASSUMPTION_CHECK: Average insulation is rare in pre-war housing stock\n\
     - EDGE_CASE: A coal-heavy grid during a cold snap",
    "- CONTRA1: Refrigerant leaks during servicing remain common in practice\n\
     - CONTRA2: Cheap-hour tariffs are unavailable in many regions\n\
     - ASSUMPTION_CHECK: Commissioning guidance is frequently skipped by busy installers\n\
     - EDGE_CASE: Rural homes on weak distribution lines",
    "- CONTRA1: Ten years is short compared to equipment lifetime emissions\n\
     - CONTRA2: Backup resistive heaters quietly erase the efficiency gains\n\
     - ASSUMPTION_CHECK: Demand tends to grow once heating feels cheaper\n\
     - EDGE_CASE: Tenants who cannot control the thermostat schedule",
    "- CONTRA1: Noise limits restrict outdoor unit placement in terraces\n\
     - CONTRA2: Skilled technicians are scarce outside large cities\n\
     - ASSUMPTION_CHECK: Contracts rarely cover compressor failures\n\
     - EDGE_CASE: Flats without any outdoor space",
];

pub fn judge_json(probability: f64) -> String {
    serde_json::json!({
        "summary": "Both sides raised concrete points.",
        "key_evidence_for": ["efficiency"],
        "key_evidence_against": ["embodied emissions"],
        "verdict": "leaning pro",
        "probability": probability,
    })
    .to_string()
}

#[derive(Debug)]
struct Reply(String);

impl std::fmt::Display for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl ChatResponse for Reply {
    fn text(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    Pro,
    Contra,
    Judge,
}

/// Answers each speaker from its own queue; an empty queue is a provider error.
pub struct ScriptedProvider {
    pro: Mutex<VecDeque<String>>,
    contra: Mutex<VecDeque<String>>,
    judge: Mutex<VecDeque<String>>,
    calls: Mutex<Vec<Speaker>>,
}

impl ScriptedProvider {
    pub fn new<P, C, J>(pro: P, contra: C, judge: J) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
        J: IntoIterator,
        J::Item: Into<String>,
    {
        Self {
            pro: Mutex::new(pro.into_iter().map(Into::into).collect()),
            contra: Mutex::new(contra.into_iter().map(Into::into).collect()),
            judge: Mutex::new(judge.into_iter().map(Into::into).collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Speaker> {
        self.calls.lock().expect("lock").clone()
    }

    fn speaker(request: &ChatRequest<'_>) -> Speaker {
        let system = request
            .messages
            .iter()
            .filter(|m| m.role == ChatRole::System)
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        if system.contains("(Pro)") {
            Speaker::Pro
        } else if system.contains("(Contra)") {
            Speaker::Contra
        } else {
            Speaker::Judge
        }
    }
}

#[async_trait]
impl ChatProvider for ScriptedProvider {
    async fn chat(&self, request: &ChatRequest<'_>) -> Result<Box<dyn ChatResponse>, LLMError> {
        let speaker = Self::speaker(request);
        self.calls.lock().expect("lock").push(speaker);
        let queue = match speaker {
            Speaker::Pro => &self.pro,
            Speaker::Contra => &self.contra,
            Speaker::Judge => &self.judge,
        };
        let reply = queue
            .lock()
            .expect("lock")
            .pop_front()
            .ok_or_else(|| LLMError::HttpError(format!("connection refused ({speaker:?})")))?;
        Ok(Box::new(Reply(reply)))
    }
}
