// All LLM prompt constants for the Extraction module.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::models::document::DocumentKind;
use crate::models::skill::SkillCategory;

/// Role line for extraction calls; `extraction_system_prompt` appends the JSON rules.
pub const EXTRACTION_ROLE: &str = "You are an expert technical recruiter. \
    You read resumes and job descriptions and extract the skills, education \
    and certifications they mention.";

/// Extraction prompt template.
/// Replace: {document}, {document_upper}, {categories}, {side_rules}, {text}
pub const EXTRACTION_PROMPT_TEMPLATE: &str = r#"Extract every skill, education entry and certification from the following {document}.

Return a JSON object with this EXACT schema (no extra fields):
{
  "skills": [
    {"name": "Python", "category": "programming_languages"}
  ],
  "education": [
    {"degree": "Bachelor of Science", "field": "Computer Science", "required": false, "preferred": false}
  ],
  "certifications": [
    {"name": "AWS Certified Solutions Architect", "issuer": "Amazon", "required": false, "preferred": false}
  ]
}

CATEGORY OPTIONS (use exactly one label per skill):
{categories}

Rules:
- Use the shortest common name for each skill ("Kubernetes", not "Kubernetes cluster administration").
- List each skill once.
- Include soft skills (leadership, communication, teamwork) when the text states or clearly shows them.
- Use "other" only when no category fits.
- "field" and "issuer" may be null when the text does not say.
- Return empty arrays for sections with nothing to report.
{side_rules}

{document_upper}:
{text}"#;

const RESUME_RULES: &str = "- This is a candidate's resume. Extract what the candidate HAS. \
Set every \"required\" and \"preferred\" flag to false.";

const JOB_DESCRIPTION_RULES: &str = "- This is a job posting. Extract what the role ASKS FOR.\n\
- Set \"required\": true for must-haves (\"required\", \"must have\", minimum years).\n\
- Set \"preferred\": true for nice-to-haves (\"preferred\", \"bonus\", \"nice to have\", \"a plus\").";

pub fn extraction_system_prompt() -> String {
    format!("{EXTRACTION_ROLE} {JSON_ONLY_SYSTEM}")
}

fn category_options() -> String {
    SkillCategory::ALL
        .iter()
        .map(|c| format!("- \"{}\"", c.label()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build_extraction_prompt(text: &str, kind: DocumentKind) -> String {
    let side_rules = match kind {
        DocumentKind::Resume => RESUME_RULES,
        DocumentKind::JobDescription => JOB_DESCRIPTION_RULES,
    };
    // {text} last so document content can never be mistaken for a placeholder
    EXTRACTION_PROMPT_TEMPLATE
        .replace("{document_upper}", &kind.describe().to_uppercase())
        .replace("{document}", kind.describe())
        .replace("{categories}", &category_options())
        .replace("{side_rules}", side_rules)
        .replace("{text}", text)
}
