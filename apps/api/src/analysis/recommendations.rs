use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::skill::{Skill, SkillCategory};

pub const DEFAULT_MAX_RECOMMENDATIONS: usize = 10;
pub const LEARNING_PLATFORM: &str = "LinkedIn Learning";
const LINKEDIN_LEARNING_SEARCH_URL: &str = "https://www.linkedin.com/learning/search";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecommendation {
    pub skill_name: String,
    pub category: SkillCategory,
    pub platform: String,
    pub linkedin_learning_url: String,
}

/// One course search link per missing skill, in gap order, capped at `max`.
/// Pure URL construction; nothing is fetched.
pub fn recommend_courses(missing: &[Skill], max: usize) -> Vec<CourseRecommendation> {
    missing
        .iter()
        .filter(|skill| !skill.name.trim().is_empty())
        .filter_map(|skill| {
            let name = skill.name.trim();
            match Url::parse_with_params(LINKEDIN_LEARNING_SEARCH_URL, &[("keywords", name)]) {
                Ok(url) => Some(CourseRecommendation {
                    skill_name: name.to_string(),
                    category: skill.category,
                    platform: LEARNING_PLATFORM.to_string(),
                    linkedin_learning_url: url.into(),
                }),
                Err(e) => {
                    warn!("Skipping course link for '{name}': {e}");
                    None
                }
            }
        })
        .take(max)
        .collect()
}
