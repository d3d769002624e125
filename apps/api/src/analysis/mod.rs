//! Gap analysis: matching, fit scoring, course recommendations and the
//! final report. Everything here is synchronous and side-effect free.

pub mod fit_score;
pub mod handlers;
pub mod matcher;
pub mod recommendations;
pub mod report;

use crate::analysis::fit_score::WeightSettings;
use crate::analysis::matcher::DEFAULT_FUZZY_THRESHOLD;
use crate::analysis::recommendations::DEFAULT_MAX_RECOMMENDATIONS;

/// Tunables for one analyzer instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisSettings {
    pub fuzzy_threshold: f64,
    pub max_recommendations: usize,
    pub weights: WeightSettings,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            max_recommendations: DEFAULT_MAX_RECOMMENDATIONS,
            weights: WeightSettings::default(),
        }
    }
}
