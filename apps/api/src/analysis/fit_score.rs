//! Fit Score — turns a gap analysis into percentage scores.
//!
//! `overall_score` is a flat ratio of matched JD skills to all JD skills.
//! Technical and soft-skill scores apply the same ratio inside their
//! category group. Education and certification scores come from the
//! separate entry lists and are reported alongside, never blended into the
//! overall score. The weights are surfaced for display only.

use serde::{Deserialize, Serialize};

use crate::analysis::matcher::GapAnalysis;
use crate::models::skill::{CertificationEntry, EducationEntry, SkillCategory, SkillExtractionResult};
use crate::taxonomy::normalizer::literal_form;

/// Preferred entries met add at most this many points on top of the required share.
const PREFERRED_BONUS: f64 = 20.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitScoreBreakdown {
    pub overall_score: Option<f64>,
    pub technical_score: Option<f64>,
    pub soft_skills_score: Option<f64>,
    pub education_score: Option<f64>,
    pub certification_score: Option<f64>,
    pub technical_weight: f64,
    pub soft_skills_weight: f64,
    pub matched_count: u32,
    pub missing_count: u32,
    pub total_jd_skills: u32,
}

/// Configured display weights; `None` means derive from the JD.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeightSettings {
    pub technical: Option<f64>,
    pub soft_skills: Option<f64>,
}

pub fn calculate_fit_score(
    gap: &GapAnalysis,
    resume: &SkillExtractionResult,
    jd: &SkillExtractionResult,
    weights: &WeightSettings,
) -> FitScoreBreakdown {
    let matched_count = gap.matched_skills.len() as u32;
    let missing_count = gap.missing_skills.len() as u32;
    let total_jd_skills = matched_count + missing_count;

    let group_score = |in_group: fn(SkillCategory) -> bool| {
        let matched = gap
            .matched_skills
            .iter()
            .filter(|m| in_group(m.skill.category))
            .count();
        let missing = gap
            .missing_skills
            .iter()
            .filter(|s| in_group(s.category))
            .count();
        (matched, matched + missing)
    };
    let (technical_matched, technical_total) = group_score(SkillCategory::is_technical);
    let (soft_matched, soft_total) = group_score(SkillCategory::is_soft);

    let (technical_weight, soft_skills_weight) =
        resolve_weights(weights, technical_total, soft_total);

    FitScoreBreakdown {
        overall_score: ratio(matched_count as usize, total_jd_skills as usize),
        technical_score: ratio(technical_matched, technical_total),
        soft_skills_score: ratio(soft_matched, soft_total),
        education_score: requirement_score(&jd.education, |req| {
            resume.education.iter().any(|held| education_satisfies(held, req))
        }),
        certification_score: requirement_score(&jd.certifications, |req| {
            resume
                .certifications
                .iter()
                .any(|held| certification_satisfies(held, req))
        }),
        technical_weight,
        soft_skills_weight,
        matched_count,
        missing_count,
        total_jd_skills,
    }
}

fn ratio(part: usize, whole: usize) -> Option<f64> {
    (whole > 0).then(|| round2(100.0 * part as f64 / whole as f64))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn resolve_weights(settings: &WeightSettings, technical_total: usize, soft_total: usize) -> (f64, f64) {
    let (technical, soft) = match (settings.technical, settings.soft_skills) {
        (Some(t), Some(s)) => (t, s),
        (Some(t), None) => (t, 1.0 - t),
        (None, Some(s)) => (1.0 - s, s),
        (None, None) => {
            let total = technical_total + soft_total;
            if total == 0 {
                (0.5, 0.5)
            } else {
                let t = technical_total as f64 / total as f64;
                (t, 1.0 - t)
            }
        }
    };
    (round2(technical), round2(soft))
}

// ────────────────────────────────────────────────────────────────────────────
// Education / certification requirements
// ────────────────────────────────────────────────────────────────────────────

/// A JD-side entry with required / preferred flags.
/// Entries carrying neither flag are treated as required.
trait Requirement {
    fn flags(&self) -> (bool, bool);

    fn is_required(&self) -> bool {
        let (required, preferred) = self.flags();
        required || !preferred
    }
}

impl Requirement for EducationEntry {
    fn flags(&self) -> (bool, bool) {
        (self.required, self.preferred)
    }
}

impl Requirement for CertificationEntry {
    fn flags(&self) -> (bool, bool) {
        (self.required, self.preferred)
    }
}

/// Required share plus a bounded preferred bonus, capped at 100.
/// With only preferred entries, the plain share met. `None` for an empty list.
fn requirement_score<T: Requirement>(entries: &[T], met: impl Fn(&T) -> bool) -> Option<f64> {
    if entries.is_empty() {
        return None;
    }
    let (required, preferred): (Vec<&T>, Vec<&T>) = entries.iter().partition(|e| e.is_required());
    let share = |group: &[&T]| {
        let hits = group.iter().filter(|e| met(**e)).count();
        hits as f64 / group.len() as f64
    };

    let score = if required.is_empty() {
        100.0 * share(&preferred)
    } else {
        let bonus = if preferred.is_empty() {
            0.0
        } else {
            PREFERRED_BONUS * share(&preferred)
        };
        (100.0 * share(&required) + bonus).min(100.0)
    };
    Some(round2(score))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum DegreeLevel {
    Associate,
    Bachelor,
    Master,
    Doctorate,
}

/// Reads the first recognizable degree level from free text
/// ("B.Sc.", "Master's", "Ph.D.").
fn degree_level(degree: &str) -> Option<DegreeLevel> {
    let cleaned: String = degree
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    cleaned.split_whitespace().find_map(|token| match token {
        "phd" | "doctorate" | "doctoral" | "doctor" | "dphil" | "edd" => {
            Some(DegreeLevel::Doctorate)
        }
        "master" | "masters" | "ms" | "msc" | "ma" | "mba" | "meng" | "mtech" | "mphil" => {
            Some(DegreeLevel::Master)
        }
        "bachelor" | "bachelors" | "bs" | "bsc" | "ba" | "beng" | "btech" | "undergraduate" => {
            Some(DegreeLevel::Bachelor)
        }
        "associate" | "associates" | "aa" | "aas" => Some(DegreeLevel::Associate),
        _ => None,
    })
}

fn contains_either_way(a: &str, b: &str) -> bool {
    !a.is_empty() && !b.is_empty() && (a.contains(b) || b.contains(a))
}

fn education_satisfies(held: &EducationEntry, required: &EducationEntry) -> bool {
    let degree_ok = match (degree_level(&held.degree), degree_level(&required.degree)) {
        (Some(have), Some(need)) => have >= need,
        (_, None) => contains_either_way(&literal_form(&held.degree), &literal_form(&required.degree)),
        (None, Some(_)) => false,
    };
    let field_ok = match required.field.as_deref() {
        None => true,
        Some(need) => held
            .field
            .as_deref()
            .is_some_and(|have| contains_either_way(&literal_form(have), &literal_form(need))),
    };
    degree_ok && field_ok
}

fn certification_satisfies(held: &CertificationEntry, required: &CertificationEntry) -> bool {
    let name_ok = contains_either_way(&literal_form(&held.name), &literal_form(&required.name));
    let issuer_ok = match required.issuer.as_deref() {
        None => true,
        Some(need) => held
            .issuer
            .as_deref()
            .is_some_and(|have| literal_form(have) == literal_form(need)),
    };
    name_ok && issuer_ok
}
