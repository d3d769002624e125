// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Follow-up prompt used when a previous answer could not be parsed.
/// Replace: {error}, {previous_output}, {original_prompt}
pub const REPAIR_PROMPT_TEMPLATE: &str = r#"Your previous answer could not be used because it was not valid JSON for the requested schema.

PARSE ERROR:
{error}

YOUR PREVIOUS ANSWER:
{previous_output}

Answer the original request again. Return ONLY a single JSON object that matches the schema exactly.

ORIGINAL REQUEST:
{original_prompt}"#;

/// Longest slice of a bad answer echoed back in a repair prompt.
pub const MAX_ECHOED_OUTPUT_CHARS: usize = 4000;

pub fn build_repair_prompt(original_prompt: &str, previous_output: &str, error: &str) -> String {
    let echoed: String = previous_output.chars().take(MAX_ECHOED_OUTPUT_CHARS).collect();
    fill_template(
        REPAIR_PROMPT_TEMPLATE,
        &[
            ("{error}", error),
            ("{previous_output}", echoed.as_str()),
            ("{original_prompt}", original_prompt),
        ],
    )
}

/// Single left-to-right pass over the template. Substituted values are never
/// scanned again, so placeholder-like text inside them stays literal.
fn fill_template(template: &str, slots: &[(&str, &str)]) -> String {
    let mut filled = String::with_capacity(template.len());
    let mut rest = template;
    while let Some((at, key, value)) = slots
        .iter()
        .filter_map(|(key, value)| rest.find(key).map(|at| (at, *key, *value)))
        .min_by_key(|(at, _, _)| *at)
    {
        filled.push_str(&rest[..at]);
        filled.push_str(value);
        rest = &rest[at + key.len()..];
    }
    filled.push_str(rest);
    filled
}
