use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::fit_score::{calculate_fit_score, FitScoreBreakdown};
use crate::analysis::matcher::{GapAnalysis, SkillMatcher};
use crate::analysis::recommendations::{recommend_courses, CourseRecommendation};
use crate::analysis::AnalysisSettings;
use crate::models::skill::{Skill, SkillExtractionResult};
use crate::taxonomy::SkillTaxonomy;

/// `SkillsOnly` marks a report built without a job description: nothing is
/// matched or missing and every resume skill is listed as extra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMode {
    Full,
    SkillsOnly,
}

impl AnalysisMode {
    pub fn for_job_description(present: bool) -> Self {
        if present {
            AnalysisMode::Full
        } else {
            AnalysisMode::SkillsOnly
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGapReport {
    pub gap_analysis: GapAnalysis,
    pub fit_score: FitScoreBreakdown,
    pub course_recommendations: Vec<CourseRecommendation>,
    pub mode: AnalysisMode,
    pub summary: String,
}

/// Assembles a report from already-computed parts.
pub fn assemble_report(
    gap_analysis: GapAnalysis,
    fit_score: FitScoreBreakdown,
    course_recommendations: Vec<CourseRecommendation>,
    mode: AnalysisMode,
) -> SkillGapReport {
    let summary = build_summary(mode, &fit_score, &gap_analysis);
    SkillGapReport {
        gap_analysis,
        fit_score,
        course_recommendations,
        mode,
        summary,
    }
}

/// Match → score → recommend → assemble, for one pair of inventories.
#[derive(Debug, Clone)]
pub struct SkillGapAnalyzer {
    matcher: SkillMatcher,
    settings: AnalysisSettings,
}

impl SkillGapAnalyzer {
    pub fn new(taxonomy: Arc<SkillTaxonomy>, settings: AnalysisSettings) -> Self {
        Self {
            matcher: SkillMatcher::new(taxonomy, settings.fuzzy_threshold),
            settings,
        }
    }

    pub fn analyze(
        &self,
        resume: &SkillExtractionResult,
        jd: Option<&SkillExtractionResult>,
    ) -> SkillGapReport {
        let mode = AnalysisMode::for_job_description(jd.is_some());
        let empty = SkillExtractionResult::default();
        let jd = jd.unwrap_or(&empty);

        let gap = self.matcher.match_skills(&resume.skills, &jd.skills);
        let fit = calculate_fit_score(&gap, resume, jd, &self.settings.weights);
        let courses = recommend_courses(&gap.missing_skills, self.settings.max_recommendations);

        info!(
            "Analysis ({mode:?}): {} matched, {} missing, {} extra, overall {:?}",
            gap.matched_skills.len(),
            gap.missing_skills.len(),
            gap.extra_skills.len(),
            fit.overall_score
        );

        assemble_report(gap, fit, courses, mode)
    }
}

/// Human-readable one-liner keyed by score band, naming the top gaps.
fn build_summary(mode: AnalysisMode, fit: &FitScoreBreakdown, gap: &GapAnalysis) -> String {
    if mode == AnalysisMode::SkillsOnly {
        return format!(
            "No job description supplied: listing the {} skills found on the resume without a gap analysis.",
            gap.extra_skills.len()
        );
    }

    let Some(score) = fit.overall_score else {
        return "The job description lists no skills to compare against.".to_string();
    };
    let top_gaps = top_gap_names(&gap.missing_skills);

    if score >= 80.0 {
        if top_gaps.is_empty() {
            format!("Strong fit ({score:.0}/100). The resume covers every listed skill.")
        } else {
            format!("Strong fit ({score:.0}/100). Remaining gaps: {top_gaps}.")
        }
    } else if score >= 60.0 {
        format!("Moderate fit ({score:.0}/100). Consider building experience in: {top_gaps}.")
    } else {
        format!("Low fit ({score:.0}/100). Significant gaps: {top_gaps}.")
    }
}

fn top_gap_names(missing: &[Skill]) -> String {
    missing
        .iter()
        .take(3)
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
