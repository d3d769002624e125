use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::extraction::prompts::{build_extraction_prompt, extraction_system_prompt};
use crate::extraction::repair::{parse_extraction, ParsePath};
use crate::extraction::{ExtractionError, TextExtractor};
use crate::llm_client::prompts::build_repair_prompt;
use crate::llm_client::ChatModel;
use crate::models::document::DocumentKind;
use crate::models::skill::{
    CertificationEntry, EducationEntry, Skill, SkillCategory, SkillExtractionResult,
};
use crate::taxonomy::normalizer::literal_form;
use crate::taxonomy::SkillTaxonomy;

/// Model-backed extractor: prompt, parse (strict then coerced), one repair
/// round-trip, then sanitation against the taxonomy.
pub struct LlmSkillExtractor<M> {
    model: M,
    taxonomy: Arc<SkillTaxonomy>,
}

impl<M: ChatModel> LlmSkillExtractor<M> {
    pub fn new(model: M, taxonomy: Arc<SkillTaxonomy>) -> Self {
        Self { model, taxonomy }
    }
}

#[async_trait]
impl<M: ChatModel> TextExtractor for LlmSkillExtractor<M> {
    async fn extract(
        &self,
        text: &str,
        kind: DocumentKind,
    ) -> Result<SkillExtractionResult, ExtractionError> {
        let system = extraction_system_prompt();
        let prompt = build_extraction_prompt(text, kind);

        let raw = self.model.complete(&prompt, &system).await?;
        let parsed = match parse_extraction(&raw) {
            Ok((result, path)) => {
                if path == ParsePath::Coerced {
                    debug!("{kind} extraction recovered by coercion");
                }
                result
            }
            Err(first_error) => {
                warn!("{kind} extraction output unusable ({first_error}), re-prompting once");
                let repair = build_repair_prompt(&prompt, &raw, &first_error);
                let second = self.model.complete(&repair, &system).await?;
                let (result, _) = parse_extraction(&second).map_err(|e| {
                    warn!("{kind} extraction still malformed after repair: {e}");
                    ExtractionError::MalformedResponse(e)
                })?;
                result
            }
        };

        let sanitized = sanitize_extraction(parsed, kind, &self.taxonomy);
        info!(
            "{kind} extraction: {} skills, {} education, {} certifications",
            sanitized.skills.len(),
            sanitized.education.len(),
            sanitized.certifications.len()
        );
        Ok(sanitized)
    }

    fn cache_scope(&self) -> Uuid {
        self.taxonomy.fingerprint()
    }
}

// ────────────────────────────────────────────────────────────────
// Sanitation
// ────────────────────────────────────────────────────────────────

/// Cleans a parsed extraction so downstream matching can rely on it:
/// no blank names, one entry per canonical skill (first occurrence wins),
/// `Other` re-categorized from the taxonomy, and requirement flags cleared
/// on the resume side.
pub fn sanitize_extraction(
    raw: SkillExtractionResult,
    kind: DocumentKind,
    taxonomy: &SkillTaxonomy,
) -> SkillExtractionResult {
    let mut seen = HashSet::new();
    let skills = raw
        .skills
        .into_iter()
        .filter_map(|skill| {
            let name = skill.name.trim().to_string();
            let canonical = taxonomy.canonical_form(&name);
            if canonical.is_empty() || !seen.insert(canonical.clone()) {
                return None;
            }
            let category = match skill.category {
                SkillCategory::Other => taxonomy.lookup_category(&canonical),
                known => known,
            };
            Some(Skill::new(name, category))
        })
        .collect();

    let mut seen_degrees = HashSet::new();
    let education = raw
        .education
        .into_iter()
        .filter_map(|entry| {
            let degree = entry.degree.trim().to_string();
            let field = non_blank(entry.field);
            if degree.is_empty() {
                return None;
            }
            let key = (literal_form(&degree), field.as_deref().map(literal_form));
            if !seen_degrees.insert(key) {
                return None;
            }
            let (required, preferred) = flags_for(kind, entry.required, entry.preferred);
            Some(EducationEntry {
                degree,
                field,
                required,
                preferred,
            })
        })
        .collect();

    let mut seen_certs = HashSet::new();
    let certifications = raw
        .certifications
        .into_iter()
        .filter_map(|entry| {
            let name = entry.name.trim().to_string();
            if name.is_empty() || !seen_certs.insert(literal_form(&name)) {
                return None;
            }
            let (required, preferred) = flags_for(kind, entry.required, entry.preferred);
            Some(CertificationEntry {
                name,
                issuer: non_blank(entry.issuer),
                required,
                preferred,
            })
        })
        .collect();

    SkillExtractionResult {
        skills,
        education,
        certifications,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Requirement flags only mean something on the job description side.
fn flags_for(kind: DocumentKind, required: bool, preferred: bool) -> (bool, bool) {
    match kind {
        DocumentKind::Resume => (false, false),
        DocumentKind::JobDescription => (required, preferred),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::extraction::ExtractionErrorKind;
    use crate::llm_client::LlmError;
    use crate::test_support::ScriptedModel;

    fn taxonomy() -> Arc<SkillTaxonomy> {
        Arc::new(SkillTaxonomy::builtin().unwrap())
    }

    const GOOD: &str = r#"{"skills": [{"name": "Python", "category": "programming_languages"}, {"name": "k8s", "category": "other"}], "education": [], "certifications": []}"#;

    #[tokio::test]
    async fn test_well_formed_answer_single_call() {
        let model = ScriptedModel::new(vec![Ok(GOOD.to_string())]);
        let extractor = LlmSkillExtractor::new(model.clone(), taxonomy());

        let result = extractor
            .extract("Python and k8s", DocumentKind::Resume)
            .await
            .unwrap();

        assert_eq!(model.call_count(), 1);
        assert_eq!(result.skills.len(), 2);
        // "other" is upgraded from the taxonomy
        assert_eq!(result.skills[1].category, SkillCategory::Devops);
    }

    #[tokio::test]
    async fn test_malformed_then_repaired() {
        let model = ScriptedModel::new(vec![
            Ok("I'm sorry, here is a list: Python, Go".to_string()),
            Ok(GOOD.to_string()),
        ]);
        let extractor = LlmSkillExtractor::new(model.clone(), taxonomy());

        let result = extractor
            .extract("Python", DocumentKind::Resume)
            .await
            .unwrap();

        assert_eq!(model.call_count(), 2);
        assert_eq!(result.skills[0].name, "Python");
        let prompts = model.prompts();
        assert!(prompts[1].contains("could not be used"));
        assert!(prompts[1].contains("here is a list"));
    }

    #[tokio::test]
    async fn test_malformed_twice_is_malformed_response() {
        let model = ScriptedModel::new(vec![
            Ok("not json".to_string()),
            Ok("still not json".to_string()),
        ]);
        let extractor = LlmSkillExtractor::new(model.clone(), taxonomy());

        let err = extractor
            .extract("Python", DocumentKind::JobDescription)
            .await
            .unwrap_err();

        assert_eq!(model.call_count(), 2);
        assert_eq!(err.kind(), ExtractionErrorKind::MalformedResponse);
    }

    #[tokio::test]
    async fn test_model_timeout_is_not_repaired() {
        let model = ScriptedModel::new(vec![Err(LlmError::Timeout(Duration::from_secs(45)))]);
        let extractor = LlmSkillExtractor::new(model.clone(), taxonomy());

        let err = extractor
            .extract("Python", DocumentKind::Resume)
            .await
            .unwrap_err();

        assert_eq!(err, ExtractionError::Timeout(Duration::from_secs(45)));
        assert_eq!(model.call_count(), 1);
    }

    #[test]
    fn test_sanitize_dedups_by_canonical_name() {
        let raw = SkillExtractionResult {
            skills: vec![
                Skill::new("JavaScript", SkillCategory::ProgrammingLanguages),
                Skill::new("  ", SkillCategory::Other),
                Skill::new("JS", SkillCategory::ProgrammingLanguages),
                Skill::new("React.js", SkillCategory::FrameworksLibraries),
                Skill::new("React", SkillCategory::FrameworksLibraries),
            ],
            ..Default::default()
        };
        let clean = sanitize_extraction(raw, DocumentKind::Resume, &taxonomy());
        let names: Vec<_> = clean.skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["JavaScript", "React.js"]);
    }

    #[test]
    fn test_sanitize_clears_flags_on_resume_only() {
        let raw = SkillExtractionResult {
            education: vec![EducationEntry {
                degree: " Bachelor's ".to_string(),
                field: Some("  ".to_string()),
                required: true,
                preferred: false,
            }],
            certifications: vec![
                CertificationEntry {
                    name: "CKA".to_string(),
                    issuer: None,
                    required: false,
                    preferred: true,
                },
                CertificationEntry {
                    name: "cka".to_string(),
                    issuer: None,
                    required: true,
                    preferred: false,
                },
            ],
            ..Default::default()
        };

        let resume = sanitize_extraction(raw.clone(), DocumentKind::Resume, &taxonomy());
        assert_eq!(resume.education[0].degree, "Bachelor's");
        assert_eq!(resume.education[0].field, None);
        assert!(!resume.education[0].required);
        assert_eq!(resume.certifications.len(), 1);
        assert!(!resume.certifications[0].preferred);

        let jd = sanitize_extraction(raw, DocumentKind::JobDescription, &taxonomy());
        assert!(jd.education[0].required);
        assert!(jd.certifications[0].preferred);
    }

    #[test]
    fn test_sanitize_keeps_model_category_when_known() {
        let raw = SkillExtractionResult {
            skills: vec![Skill::new("Python", SkillCategory::DataScience)],
            ..Default::default()
        };
        let clean = sanitize_extraction(raw, DocumentKind::JobDescription, &taxonomy());
        assert_eq!(clean.skills[0].category, SkillCategory::DataScience);
    }
}
