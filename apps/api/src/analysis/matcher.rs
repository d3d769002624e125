//! Skill Matching — reconciles a resume inventory with a JD inventory.
//!
//! Algorithm (one-to-one, JD-driven):
//! 1. Normalize every name once into literal / surface / canonical forms.
//! 2. Run tiered passes over all still-unmatched JD skills:
//!    exact (1.0) → synonym (0.9) → normalized (0.85) → fuzzy (similarity).
//!    A resume skill consumed in one pass is unavailable to later JD skills,
//!    and because each tier completes before the next starts, an exact
//!    candidate can never be taken by a fuzzy match.
//! 3. Unmatched JD skills are missing; unconsumed resume skills are extra.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::models::skill::{Skill, SkillCategory};
use crate::taxonomy::{NormalizedName, SkillTaxonomy};

pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.75;
/// Very short names ("go", "r", "c") are too ambiguous to compare fuzzily.
const MIN_FUZZY_CHARS: usize = 3;
/// Fuzzy confidence stays strictly below an exact match.
const FUZZY_CONFIDENCE_CEILING: f64 = 0.99;

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    Exact,
    Normalized,
    Synonym,
    Fuzzy,
}

/// A matched JD skill. The resume-side skill is implied, not stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    pub skill: Skill,
    pub match_type: MatchType,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub matched: u32,
    pub missing: u32,
    pub extra: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GapAnalysis {
    pub matched_skills: Vec<SkillMatch>,
    pub missing_skills: Vec<Skill>,
    pub extra_skills: Vec<Skill>,
    pub category_breakdown: BTreeMap<SkillCategory, CategoryCounts>,
}

impl GapAnalysis {
    pub fn total_jd_skills(&self) -> usize {
        self.matched_skills.len() + self.missing_skills.len()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Matcher
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    Exact,
    Synonym,
    Normalized,
}

impl Tier {
    const ORDER: [Tier; 3] = [Tier::Exact, Tier::Synonym, Tier::Normalized];

    fn accepts(self, resume: &NormalizedName, jd: &NormalizedName) -> bool {
        match self {
            Tier::Exact => resume.literal == jd.literal,
            Tier::Synonym => resume.canonical == jd.canonical && resume.surface != jd.surface,
            Tier::Normalized => resume.surface == jd.surface && resume.literal != jd.literal,
        }
    }

    fn match_type(self) -> MatchType {
        match self {
            Tier::Exact => MatchType::Exact,
            Tier::Synonym => MatchType::Synonym,
            Tier::Normalized => MatchType::Normalized,
        }
    }

    fn confidence(self) -> f64 {
        match self {
            Tier::Exact => 1.0,
            Tier::Synonym => 0.9,
            Tier::Normalized => 0.85,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SkillMatcher {
    taxonomy: Arc<SkillTaxonomy>,
    fuzzy_threshold: f64,
}

impl SkillMatcher {
    pub fn new(taxonomy: Arc<SkillTaxonomy>, fuzzy_threshold: f64) -> Self {
        Self {
            taxonomy,
            fuzzy_threshold,
        }
    }

    pub fn match_skills(&self, resume: &[Skill], jd: &[Skill]) -> GapAnalysis {
        let resume_names: Vec<NormalizedName> = resume
            .iter()
            .map(|s| self.taxonomy.normalize_name(&s.name))
            .collect();
        let jd_names: Vec<NormalizedName> = jd
            .iter()
            .map(|s| self.taxonomy.normalize_name(&s.name))
            .collect();

        let mut consumed = vec![false; resume.len()];
        let mut assigned: Vec<Option<(MatchType, f64)>> = vec![None; jd.len()];

        for tier in Tier::ORDER {
            for (j, jd_name) in jd_names.iter().enumerate() {
                if assigned[j].is_some() || jd_name.canonical.is_empty() {
                    continue;
                }
                let candidate = (0..resume.len()).find(|&r| {
                    !consumed[r]
                        && !resume_names[r].canonical.is_empty()
                        && tier.accepts(&resume_names[r], jd_name)
                });
                if let Some(r) = candidate {
                    consumed[r] = true;
                    assigned[j] = Some((tier.match_type(), tier.confidence()));
                }
            }
        }

        for (j, jd_name) in jd_names.iter().enumerate() {
            if assigned[j].is_some() {
                continue;
            }
            let mut best: Option<(usize, f64)> = None;
            for (r, resume_name) in resume_names.iter().enumerate() {
                if consumed[r] {
                    continue;
                }
                let score = similarity(&resume_name.canonical, &jd_name.canonical);
                if score >= self.fuzzy_threshold && best.map_or(true, |(_, b)| score > b) {
                    best = Some((r, score));
                }
            }
            if let Some((r, score)) = best {
                consumed[r] = true;
                // the threshold wins over the ceiling when configured above it
                let confidence =
                    round3(score.min(FUZZY_CONFIDENCE_CEILING)).max(self.fuzzy_threshold);
                assigned[j] = Some((MatchType::Fuzzy, confidence));
            }
        }

        let mut analysis = GapAnalysis::default();
        for (skill, outcome) in jd.iter().zip(assigned) {
            match outcome {
                Some((match_type, confidence)) => {
                    tally(&mut analysis.category_breakdown, skill.category).matched += 1;
                    analysis.matched_skills.push(SkillMatch {
                        skill: skill.clone(),
                        match_type,
                        confidence,
                    });
                }
                None => {
                    tally(&mut analysis.category_breakdown, skill.category).missing += 1;
                    analysis.missing_skills.push(skill.clone());
                }
            }
        }
        for (skill, used) in resume.iter().zip(consumed) {
            if !used {
                tally(&mut analysis.category_breakdown, skill.category).extra += 1;
                analysis.extra_skills.push(skill.clone());
            }
        }

        analysis
    }
}

fn tally(
    breakdown: &mut BTreeMap<SkillCategory, CategoryCounts>,
    category: SkillCategory,
) -> &mut CategoryCounts {
    breakdown.entry(category).or_default()
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Similarity of two canonical names in `[0, 1]`: the better of normalized
/// Levenshtein and token-set Dice overlap. Names shorter than three
/// characters score zero.
pub fn similarity(a: &str, b: &str) -> f64 {
    if a.chars().count() < MIN_FUZZY_CHARS || b.chars().count() < MIN_FUZZY_CHARS {
        return 0.0;
    }
    strsim::normalized_levenshtein(a, b).max(token_dice(a, b))
}

fn token_dice(a: &str, b: &str) -> f64 {
    let left: BTreeSet<&str> = a.split_whitespace().collect();
    let right: BTreeSet<&str> = b.split_whitespace().collect();
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }
    let shared = left.intersection(&right).count();
    2.0 * shared as f64 / (left.len() + right.len()) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::skill::SkillCategory::*;

    fn matcher() -> SkillMatcher {
        SkillMatcher::new(
            Arc::new(SkillTaxonomy::builtin().unwrap()),
            DEFAULT_FUZZY_THRESHOLD,
        )
    }

    fn skills(items: &[(&str, SkillCategory)]) -> Vec<Skill> {
        items.iter().map(|(n, c)| Skill::new(*n, *c)).collect()
    }

    fn names(list: &[Skill]) -> Vec<&str> {
        list.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_reference_scenario() {
        let jd = skills(&[
            ("python", ProgrammingLanguages),
            ("communication", Communication),
            ("aws", CloudServices),
        ]);
        let resume = skills(&[
            ("Python", ProgrammingLanguages),
            ("AWS", CloudServices),
            ("leadership", Leadership),
        ]);

        let gap = matcher().match_skills(&resume, &jd);

        assert_eq!(gap.matched_skills.len(), 2);
        assert_eq!(gap.matched_skills[0].skill.name, "python");
        assert_eq!(gap.matched_skills[0].match_type, MatchType::Exact);
        assert_eq!(gap.matched_skills[0].confidence, 1.0);
        assert_eq!(gap.matched_skills[1].skill.name, "aws");
        assert_eq!(names(&gap.missing_skills), vec!["communication"]);
        assert_eq!(names(&gap.extra_skills), vec!["leadership"]);
        assert_eq!(gap.total_jd_skills(), 3);
    }

    #[test]
    fn test_match_types_and_confidences() {
        let jd = skills(&[
            ("Kubernetes", Devops),
            ("React", FrameworksLibraries),
            ("Machine Learning Engineering", MachineLearning),
        ]);
        let resume = skills(&[
            ("k8s", Devops),
            ("React.js", FrameworksLibraries),
            ("Machine Learning", MachineLearning),
        ]);

        let gap = matcher().match_skills(&resume, &jd);

        let types: Vec<_> = gap.matched_skills.iter().map(|m| m.match_type).collect();
        assert_eq!(
            types,
            vec![MatchType::Synonym, MatchType::Normalized, MatchType::Fuzzy]
        );
        assert_eq!(gap.matched_skills[0].confidence, 0.9);
        assert_eq!(gap.matched_skills[1].confidence, 0.85);
        let fuzzy = gap.matched_skills[2].confidence;
        assert!((DEFAULT_FUZZY_THRESHOLD..1.0).contains(&fuzzy), "{fuzzy}");
    }

    #[test]
    fn test_exact_match_beats_earlier_fuzzy_candidate() {
        // "Program Management" comes first and is a close fuzzy candidate for
        // the resume skill; the exact pass must claim it for the exact JD entry.
        let jd = skills(&[
            ("Program Management", Leadership),
            ("Project Management", Leadership),
        ]);
        let resume = skills(&[("Project Management", Leadership)]);

        let gap = matcher().match_skills(&resume, &jd);

        assert_eq!(gap.matched_skills.len(), 1);
        assert_eq!(gap.matched_skills[0].skill.name, "Project Management");
        assert_eq!(gap.matched_skills[0].match_type, MatchType::Exact);
        assert_eq!(names(&gap.missing_skills), vec!["Program Management"]);
    }

    #[test]
    fn test_one_resume_skill_matches_at_most_one_jd_skill() {
        let jd = skills(&[("JavaScript", ProgrammingLanguages), ("JS", ProgrammingLanguages)]);
        let resume = skills(&[("javascript", ProgrammingLanguages)]);

        let gap = matcher().match_skills(&resume, &jd);

        assert_eq!(gap.matched_skills.len(), 1);
        assert_eq!(gap.missing_skills.len(), 1);
        assert!(gap.extra_skills.is_empty());
    }

    #[test]
    fn test_partition_invariant() {
        let jd = skills(&[
            ("Rust", ProgrammingLanguages),
            ("PostgreSQL", Databases),
            ("Terraform", Devops),
            ("Teamwork", Collaboration),
            ("Go", ProgrammingLanguages),
        ]);
        let resume = skills(&[
            ("Postgres", Databases),
            ("collaboration", Collaboration),
            ("Golang", ProgrammingLanguages),
            ("Haskell", ProgrammingLanguages),
        ]);

        let gap = matcher().match_skills(&resume, &jd);

        let mut covered: Vec<&str> = gap
            .matched_skills
            .iter()
            .map(|m| m.skill.name.as_str())
            .chain(gap.missing_skills.iter().map(|s| s.name.as_str()))
            .collect();
        covered.sort();
        let mut expected = names(&jd);
        expected.sort();
        assert_eq!(covered, expected);
        assert_eq!(gap.matched_skills.len() + gap.extra_skills.len(), resume.len());
        assert_eq!(names(&gap.extra_skills), vec!["Haskell"]);
        assert_eq!(names(&gap.missing_skills), vec!["Rust", "Terraform"]);
    }

    #[test]
    fn test_threshold_above_ceiling_still_matches() {
        let strict = SkillMatcher::new(Arc::new(SkillTaxonomy::builtin().unwrap()), 0.995);
        let gap = strict.match_skills(
            &skills(&[("learning machine", MachineLearning)]),
            &skills(&[("machine learning", MachineLearning)]),
        );

        assert_eq!(gap.matched_skills.len(), 1);
        assert_eq!(gap.matched_skills[0].match_type, MatchType::Fuzzy);
        assert_eq!(gap.matched_skills[0].confidence, 0.995);
    }

    #[test]
    fn test_fuzzy_confidence_stays_below_exact() {
        let gap = matcher().match_skills(
            &skills(&[("learning machine", MachineLearning)]),
            &skills(&[("machine learning", MachineLearning)]),
        );
        assert_eq!(gap.matched_skills[0].confidence, 0.99);
    }

    #[test]
    fn test_short_names_never_fuzzy_match() {
        let gap = matcher().match_skills(
            &skills(&[("Go", ProgrammingLanguages)]),
            &skills(&[("Gi", ProgrammingLanguages)]),
        );
        assert!(gap.matched_skills.is_empty());
        assert_eq!(similarity("go", "gi"), 0.0);
    }

    #[test]
    fn test_unrelated_names_stay_apart() {
        let gap = matcher().match_skills(
            &skills(&[("Java", ProgrammingLanguages), ("React Native", FrameworksLibraries)]),
            &skills(&[("JavaScript", ProgrammingLanguages), ("React", FrameworksLibraries)]),
        );
        assert!(gap.matched_skills.is_empty());
    }

    #[test]
    fn test_empty_jd_makes_everything_extra() {
        let resume = skills(&[("Rust", ProgrammingLanguages), ("Leadership", Leadership)]);
        let gap = matcher().match_skills(&resume, &[]);
        assert!(gap.matched_skills.is_empty());
        assert!(gap.missing_skills.is_empty());
        assert_eq!(gap.extra_skills, resume);
    }

    #[test]
    fn test_category_breakdown_tallies() {
        let jd = skills(&[
            ("Python", ProgrammingLanguages),
            ("Go", ProgrammingLanguages),
            ("Communication", Communication),
        ]);
        let resume = skills(&[("Python", ProgrammingLanguages), ("Docker", Devops)]);

        let gap = matcher().match_skills(&resume, &jd);

        assert_eq!(
            gap.category_breakdown[&ProgrammingLanguages],
            CategoryCounts { matched: 1, missing: 1, extra: 0 }
        );
        assert_eq!(gap.category_breakdown[&Communication].missing, 1);
        assert_eq!(gap.category_breakdown[&Devops].extra, 1);
    }

    #[test]
    fn test_matching_is_deterministic() {
        let jd = skills(&[("Data Analysis", DataScience), ("SQL", Databases)]);
        let resume = skills(&[("data analytics", DataScience), ("MySQL", Databases)]);
        let m = matcher();
        let first = serde_json::to_string(&m.match_skills(&resume, &jd)).unwrap();
        let second = serde_json::to_string(&m.match_skills(&resume, &jd)).unwrap();
        assert_eq!(first, second);
    }
}
