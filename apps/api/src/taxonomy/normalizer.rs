//! Text normalization for free-text skill mentions.
//!
//! Two layers:
//! - `surface_form` removes case, punctuation, version and filler-word
//!   variance. It needs no reference data.
//! - `SkillTaxonomy::canonical_form` additionally resolves aliases
//!   ("k8s" → "kubernetes") through the injected taxonomy.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::skill::SkillCategory;
use crate::taxonomy::SkillTaxonomy;

static PARENTHETICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\([^)]*\)").expect("valid parenthetical regex"));

static SCRIPT_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.(jsx?|tsx?)$").expect("valid script suffix regex"));

static VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+v?\d+(\.\d+)*(\.x)?\b").expect("valid version regex"));

// Adjectives that never begin a skill name strip on their own. Words that
// also start real names ("Knowledge Graphs", "SOLID principles") strip only
// before a preposition.
static FILLER_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^((proficient|experienced|skilled|familiar|hands on)( (in|with|of))?|((strong|solid|deep|working|advanced) )?(knowledge|expertise|expert|proficiency|familiarity|experience|background|understanding) (in|with|of)|(strong|solid|advanced) (in|with)) ",
    )
    .expect("valid filler prefix regex")
});

static FILLER_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r" (experience|proficiency|skills?|knowledge|framework|library)$")
        .expect("valid filler suffix regex")
});

/// Maximum filler-stripping rounds ("experienced with expertise in …" needs two).
const MAX_FILLER_ROUNDS: usize = 3;

/// Normalizes case, punctuation, whitespace, versions and filler words.
///
/// `"  React.js "` → `"react"`, `"Python 3.9"` → `"python"`,
/// `"Communication Skills"` → `"communication"`, `"C++"` → `"c++"`.
pub fn surface_form(raw: &str) -> String {
    let lowered = raw
        .trim()
        .trim_matches(|c: char| matches!(c, ',' | ';' | ':' | '*' | '•'))
        .to_lowercase();

    let without_parens = PARENTHETICAL.replace_all(&lowered, "");
    let spaced = without_parens.replace(['-', '_'], " ");
    let trimmed = spaced.trim();
    let without_suffix = SCRIPT_SUFFIX.replace(trimmed, "");
    let without_version = VERSION.replace_all(&without_suffix, "");

    let kept: String = without_version
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || matches!(c, '+' | '#' | '.' | '/' | '&'))
        .collect();

    let mut form = kept
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end_matches(['.', '/', '&'])
        .to_string();

    for _ in 0..MAX_FILLER_ROUNDS {
        let stripped = FILLER_SUFFIX
            .replace(&FILLER_PREFIX.replace(&form, ""), "")
            .trim()
            .to_string();
        if stripped == form || stripped.is_empty() {
            break;
        }
        form = stripped;
    }

    form
}

/// Lowercased, whitespace-collapsed raw text. Two names with equal literal
/// forms are an exact match.
pub fn literal_form(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// All three comparison forms of one skill name, computed once per matching pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedName {
    pub literal: String,
    pub surface: String,
    pub canonical: String,
}

impl SkillTaxonomy {
    /// Surface normalization followed by alias resolution. Unknown names
    /// pass through as their surface form.
    pub fn canonical_form(&self, raw: &str) -> String {
        let surface = surface_form(raw);
        self.resolve_alias(&surface)
            .map(str::to_string)
            .unwrap_or(surface)
    }

    /// Category of a canonical form; unknown skills are `Other`.
    pub fn lookup_category(&self, canonical: &str) -> SkillCategory {
        self.skill(canonical)
            .map(|s| s.category)
            .unwrap_or(SkillCategory::Other)
    }

    pub fn normalize_name(&self, raw: &str) -> NormalizedName {
        let surface = surface_form(raw);
        let canonical = self
            .resolve_alias(&surface)
            .map(str::to_string)
            .unwrap_or_else(|| surface.clone());
        NormalizedName {
            literal: literal_form(raw),
            surface,
            canonical,
        }
    }
}
