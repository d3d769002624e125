//! Parsing of model output into `SkillExtractionResult`.
//!
//! Strict schema parse first. If that fails, a deterministic coercion pass
//! recovers the common ways models drift from the schema: prose around the
//! JSON, skills given as bare strings, alternative field names, booleans
//! written as strings. Anything coercion cannot recover is reported as an
//! error message suitable for a repair prompt.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::llm_client::strip_json_fences;
use crate::models::skill::{
    CertificationEntry, EducationEntry, Skill, SkillCategory, SkillExtractionResult,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsePath {
    Strict,
    Coerced,
}

/// Schema as requested in the prompt; `skills` must be present.
#[derive(Debug, Deserialize)]
struct StrictExtraction {
    skills: Vec<Skill>,
    #[serde(default)]
    education: Vec<EducationEntry>,
    #[serde(default)]
    certifications: Vec<CertificationEntry>,
}

const SKILL_KEYS: &[&str] = &["skills", "technical_skills", "soft_skills"];
const EDUCATION_KEYS: &[&str] = &["education", "degrees"];
const CERTIFICATION_KEYS: &[&str] = &["certifications", "certificates"];

pub fn parse_extraction(raw: &str) -> Result<(SkillExtractionResult, ParsePath), String> {
    let cleaned = strip_json_fences(raw);
    match serde_json::from_str::<StrictExtraction>(cleaned) {
        Ok(parsed) => Ok((
            SkillExtractionResult {
                skills: parsed.skills,
                education: parsed.education,
                certifications: parsed.certifications,
            },
            ParsePath::Strict,
        )),
        Err(strict_err) => coerce_extraction(raw)
            .map(|result| (result, ParsePath::Coerced))
            .map_err(|coerce_err| format!("{strict_err}; {coerce_err}")),
    }
}

/// Best-effort recovery of a near-miss answer.
pub fn coerce_extraction(raw: &str) -> Result<SkillExtractionResult, String> {
    let candidate = outermost_json(strip_json_fences(raw))
        .ok_or_else(|| "no JSON object found in model output".to_string())?;
    let value: Value =
        serde_json::from_str(candidate).map_err(|e| format!("invalid JSON: {e}"))?;

    match value {
        // a bare list is read as the skill list
        Value::Array(items) => Ok(SkillExtractionResult {
            skills: items.iter().filter_map(coerce_skill).collect(),
            ..Default::default()
        }),
        Value::Object(map) => coerce_object(&map),
        other => Err(format!("expected a JSON object, got {}", type_name(&other))),
    }
}

fn coerce_object(map: &Map<String, Value>) -> Result<SkillExtractionResult, String> {
    let known = SKILL_KEYS
        .iter()
        .chain(EDUCATION_KEYS)
        .chain(CERTIFICATION_KEYS)
        .any(|k| map.contains_key(*k));
    if !known {
        return Err("no skills, education or certifications field in model output".to_string());
    }

    Ok(SkillExtractionResult {
        skills: collect_items(map, SKILL_KEYS, coerce_skill),
        education: collect_items(map, EDUCATION_KEYS, coerce_education),
        certifications: collect_items(map, CERTIFICATION_KEYS, coerce_certification),
    })
}

fn collect_items<T>(
    map: &Map<String, Value>,
    keys: &[&str],
    coerce: impl Fn(&Value) -> Option<T>,
) -> Vec<T> {
    keys.iter()
        .filter_map(|k| map.get(*k))
        .flat_map(|v| match v {
            Value::Array(items) => items.iter().collect::<Vec<_>>(),
            Value::Null => Vec::new(),
            single => vec![single],
        })
        .filter_map(coerce)
        .collect()
}

/// Slice from the first `{` or `[` to its last matching closer.
fn outermost_json(text: &str) -> Option<&str> {
    let start = text.find(['{', '['])?;
    let closer = if text[start..].starts_with('{') { '}' } else { ']' };
    let end = text.rfind(closer)?;
    (end > start).then(|| &text[start..=end])
}

fn coerce_skill(value: &Value) -> Option<Skill> {
    match value {
        Value::String(name) => Some(Skill::new(name.clone(), SkillCategory::Other)),
        Value::Object(obj) => {
            let name = first_string(obj, &["name", "skill", "title"])?;
            let category = first_string(obj, &["category", "type"])
                .map(|c| SkillCategory::from_label(&c))
                .unwrap_or(SkillCategory::Other);
            Some(Skill::new(name, category))
        }
        _ => None,
    }
}

fn coerce_education(value: &Value) -> Option<EducationEntry> {
    match value {
        Value::String(degree) => Some(EducationEntry {
            degree: degree.clone(),
            field: None,
            required: false,
            preferred: false,
        }),
        Value::Object(obj) => Some(EducationEntry {
            degree: first_string(obj, &["degree", "name", "level"])?,
            field: first_string(obj, &["field", "field_of_study", "major"]),
            required: obj.get("required").map(coerce_bool).unwrap_or(false),
            preferred: obj.get("preferred").map(coerce_bool).unwrap_or(false),
        }),
        _ => None,
    }
}

fn coerce_certification(value: &Value) -> Option<CertificationEntry> {
    match value {
        Value::String(name) => Some(CertificationEntry {
            name: name.clone(),
            issuer: None,
            required: false,
            preferred: false,
        }),
        Value::Object(obj) => Some(CertificationEntry {
            name: first_string(obj, &["name", "certification", "title"])?,
            issuer: first_string(obj, &["issuer", "provider", "organization"]),
            required: obj.get("required").map(coerce_bool).unwrap_or(false),
            preferred: obj.get("preferred").map(coerce_bool).unwrap_or(false),
        }),
        _ => None,
    }
}

fn first_string(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find_map(|v| match v {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            _ => None,
        })
}

fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => matches!(
            s.trim().to_lowercase().as_str(),
            "true" | "yes" | "y" | "1" | "required" | "preferred"
        ),
        _ => false,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
