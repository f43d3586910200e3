use super::template::TemplateSpec;

/// Outputs at or above this similarity to a reference text are rejected.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.92;

/// Structural contract of a role's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat<'a> {
    /// Four `- KEY: value` lines in the order given by the spec.
    Agent(&'a TemplateSpec),
    /// A strict JSON judge decision.
    Judge,
}

/// Everything the validator needs to judge one candidate output.
#[derive(Debug, Clone, Copy)]
pub struct ValidationRules<'a> {
    pub format: OutputFormat<'a>,
    /// The opposing role's most recent accepted output.
    pub opponent_previous: Option<&'a str>,
    /// This role's own previous accepted output.
    pub own_previous: Option<&'a str>,
    pub similarity_threshold: f64,
}

impl<'a> ValidationRules<'a> {
    pub fn agent(
        spec: &'a TemplateSpec,
        opponent_previous: Option<&'a str>,
        own_previous: Option<&'a str>,
        similarity_threshold: f64,
    ) -> Self {
        Self {
            format: OutputFormat::Agent(spec),
            opponent_previous,
            own_previous,
            similarity_threshold,
        }
    }

    /// Judge outputs are only checked for their JSON contract.
    pub fn judge(similarity_threshold: f64) -> Self {
        Self {
            format: OutputFormat::Judge,
            opponent_previous: None,
            own_previous: None,
            similarity_threshold,
        }
    }
}
