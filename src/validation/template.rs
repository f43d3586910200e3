/// The ordered section markers an agent must emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSpec {
    pub keys: &'static [&'static str],
}

pub const PRO_TEMPLATE: TemplateSpec = TemplateSpec {
    keys: &["PRO1", "PRO2", "NEW_ASSUMPTION", "RISK"],
};

pub const CONTRA_TEMPLATE: TemplateSpec = TemplateSpec {
    keys: &["CONTRA1", "CONTRA2", "ASSUMPTION_CHECK", "EDGE_CASE"],
};

impl TemplateSpec {
    /// Renders the template skeleton used in prompts and corrective messages.
    pub fn skeleton(&self) -> String {
        self.keys
            .iter()
            .map(|key| format!("- {key}: <...>"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Parses a strict `- KEY: value` template into its ordered sections.
///
/// Blank lines are ignored. The remaining lines must match the template's keys
/// one to one and in order, each with a non-empty value.
pub fn parse_template<'t>(
    text: &'t str,
    spec: &TemplateSpec,
) -> Result<Vec<(&'t str, &'t str)>, String> {
    let lines: Vec<&str> = text
        .trim()
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .collect();

    if lines.len() != spec.keys.len() {
        return Err(format!(
            "expected exactly {} lines, got {}",
            spec.keys.len(),
            lines.len()
        ));
    }

    let mut sections = Vec::with_capacity(lines.len());
    for (idx, (line, expected)) in lines.iter().zip(spec.keys).enumerate() {
        let body = line
            .strip_prefix("- ")
            .ok_or_else(|| format!("line {} does not start with \"- \"", idx + 1))?;
        let (key, value) = body
            .split_once(':')
            .ok_or_else(|| format!("line {} has no \"KEY:\" marker", idx + 1))?;
        let (key, value) = (key.trim(), value.trim());
        if key != *expected {
            return Err(format!(
                "line {} has marker {key:?}, expected {expected:?}",
                idx + 1
            ));
        }
        if value.is_empty() {
            return Err(format!("section {key} is empty"));
        }
        sections.push((key, value));
    }
    Ok(sections)
}
