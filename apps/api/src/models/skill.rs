use std::fmt;

use serde::{Deserialize, Serialize};

/// Fine-grained skill category as emitted by the extraction model.
///
/// Unknown labels deserialize to `Other` so a model inventing a category
/// never fails the whole extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    // technical
    ProgrammingLanguages,
    FrameworksLibraries,
    ToolsPlatforms,
    Databases,
    CloudServices,
    Devops,
    SoftwareArchitecture,
    MachineLearning,
    Blockchain,
    Cybersecurity,
    DataScience,
    CiCd,
    Fintech,
    HealthcareIt,
    ECommerce,
    // soft
    Leadership,
    Communication,
    Collaboration,
    ProblemSolving,
    AnalyticalThinking,
    Agile,
    Scrum,
    DesignThinking,
    // standalone
    Education,
    Certification,
    #[serde(other)]
    Other,
}

/// Coarse grouping used by the fit score breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryGroup {
    Technical,
    Soft,
    Education,
    Certification,
    Other,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 26] = [
        SkillCategory::ProgrammingLanguages,
        SkillCategory::FrameworksLibraries,
        SkillCategory::ToolsPlatforms,
        SkillCategory::Databases,
        SkillCategory::CloudServices,
        SkillCategory::Devops,
        SkillCategory::SoftwareArchitecture,
        SkillCategory::MachineLearning,
        SkillCategory::Blockchain,
        SkillCategory::Cybersecurity,
        SkillCategory::DataScience,
        SkillCategory::CiCd,
        SkillCategory::Fintech,
        SkillCategory::HealthcareIt,
        SkillCategory::ECommerce,
        SkillCategory::Leadership,
        SkillCategory::Communication,
        SkillCategory::Collaboration,
        SkillCategory::ProblemSolving,
        SkillCategory::AnalyticalThinking,
        SkillCategory::Agile,
        SkillCategory::Scrum,
        SkillCategory::DesignThinking,
        SkillCategory::Education,
        SkillCategory::Certification,
        SkillCategory::Other,
    ];

    pub fn group(self) -> CategoryGroup {
        use SkillCategory::*;
        match self {
            ProgrammingLanguages | FrameworksLibraries | ToolsPlatforms | Databases
            | CloudServices | Devops | SoftwareArchitecture | MachineLearning | Blockchain
            | Cybersecurity | DataScience | CiCd | Fintech | HealthcareIt | ECommerce => {
                CategoryGroup::Technical
            }
            Leadership | Communication | Collaboration | ProblemSolving | AnalyticalThinking
            | Agile | Scrum | DesignThinking => CategoryGroup::Soft,
            Education => CategoryGroup::Education,
            Certification => CategoryGroup::Certification,
            Other => CategoryGroup::Other,
        }
    }

    pub fn is_technical(self) -> bool {
        self.group() == CategoryGroup::Technical
    }

    pub fn is_soft(self) -> bool {
        self.group() == CategoryGroup::Soft
    }

    /// The snake_case wire label, e.g. `"cloud_services"`.
    pub fn label(self) -> &'static str {
        use SkillCategory::*;
        match self {
            ProgrammingLanguages => "programming_languages",
            FrameworksLibraries => "frameworks_libraries",
            ToolsPlatforms => "tools_platforms",
            Databases => "databases",
            CloudServices => "cloud_services",
            Devops => "devops",
            SoftwareArchitecture => "software_architecture",
            MachineLearning => "machine_learning",
            Blockchain => "blockchain",
            Cybersecurity => "cybersecurity",
            DataScience => "data_science",
            CiCd => "ci_cd",
            Fintech => "fintech",
            HealthcareIt => "healthcare_it",
            ECommerce => "e_commerce",
            Leadership => "leadership",
            Communication => "communication",
            Collaboration => "collaboration",
            ProblemSolving => "problem_solving",
            AnalyticalThinking => "analytical_thinking",
            Agile => "agile",
            Scrum => "scrum",
            DesignThinking => "design_thinking",
            Education => "education",
            Certification => "certification",
            Other => "other",
        }
    }

    /// Lenient label parsing for model output: case, spaces, hyphens and
    /// slashes are tolerated ("CI/CD", "Cloud Services", "e-commerce").
    pub fn from_label(label: &str) -> SkillCategory {
        let key: String = label
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == ' ' || c == '-' || c == '/' { '_' } else { c })
            .collect();
        SkillCategory::ALL
            .iter()
            .copied()
            .find(|c| c.label() == key)
            .unwrap_or(SkillCategory::Other)
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single named skill. Uniqueness within an inventory is by normalized name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub category: SkillCategory,
}

impl Skill {
    pub fn new(name: impl Into<String>, category: SkillCategory) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }
}

/// A degree requirement (JD side) or a degree held (resume side).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub preferred: bool,
}

/// A certification requirement (JD side) or a certification held (resume side).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificationEntry {
    pub name: String,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub preferred: bool,
}

/// Immutable snapshot of everything extracted from one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillExtractionResult {
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub certifications: Vec<CertificationEntry>,
}
