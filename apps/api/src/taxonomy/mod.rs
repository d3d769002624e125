//! Skill Taxonomy — the closed reference set of canonical skills, categories and aliases.
//!
//! Built once at startup (built-in table or a JSON override file) and shared
//! read-only as `Arc<SkillTaxonomy>`. Nothing mutates it afterwards, so no
//! locking is involved anywhere it is read.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::skill::SkillCategory;

mod builtin;
pub mod normalizer;

pub use normalizer::{surface_form, NormalizedName};

#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("failed to read taxonomy file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse taxonomy file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("skill name '{0}' normalizes to an empty string")]
    EmptyName(String),

    #[error("skill '{0}' is defined more than once")]
    DuplicateSkill(String),

    #[error("alias '{alias}' resolves to both '{first}' and '{second}'")]
    ConflictingAlias {
        alias: String,
        first: String,
        second: String,
    },
}

/// One row of the taxonomy as written in an override file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomyEntry {
    pub name: String,
    pub category: SkillCategory,
    #[serde(default)]
    pub aliases: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TaxonomyFile {
    skills: Vec<TaxonomyEntry>,
}

/// A canonical skill: display name, normalized key and category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalSkill {
    pub name: String,
    pub key: String,
    pub category: SkillCategory,
}

#[derive(Debug, Clone)]
pub struct SkillTaxonomy {
    skills: HashMap<String, CanonicalSkill>,
    aliases: HashMap<String, String>,
    fingerprint: Uuid,
}

impl SkillTaxonomy {
    /// The compiled-in reference table.
    pub fn builtin() -> Result<Self, TaxonomyError> {
        let entries = builtin::BUILTIN_SKILLS
            .iter()
            .map(|(name, category, aliases)| TaxonomyEntry {
                name: name.to_string(),
                category: *category,
                aliases: aliases.iter().map(|a| a.to_string()).collect(),
            })
            .collect::<Vec<_>>();
        Self::from_entries(entries)
    }

    /// Loads a taxonomy from a JSON file of the form `{"skills": [{name, category, aliases}]}`.
    pub fn from_json_file(path: &Path) -> Result<Self, TaxonomyError> {
        let raw = std::fs::read_to_string(path)?;
        let file: TaxonomyFile = serde_json::from_str(&raw)?;
        info!(
            "Loaded {} taxonomy entries from {}",
            file.skills.len(),
            path.display()
        );
        Self::from_entries(file.skills)
    }

    /// Builds and validates a taxonomy. Every alias must resolve to exactly one skill.
    pub fn from_entries(entries: Vec<TaxonomyEntry>) -> Result<Self, TaxonomyError> {
        let mut skills = HashMap::with_capacity(entries.len());

        for entry in &entries {
            let key = surface_form(&entry.name);
            if key.is_empty() {
                return Err(TaxonomyError::EmptyName(entry.name.clone()));
            }
            if skills.contains_key(&key) {
                return Err(TaxonomyError::DuplicateSkill(entry.name.clone()));
            }
            skills.insert(
                key.clone(),
                CanonicalSkill {
                    name: entry.name.clone(),
                    key,
                    category: entry.category,
                },
            );
        }

        let mut aliases: HashMap<String, String> = HashMap::new();
        for entry in &entries {
            let owner = surface_form(&entry.name);
            for alias in &entry.aliases {
                let alias_key = surface_form(alias);
                if alias_key.is_empty() || alias_key == owner {
                    continue;
                }
                if skills.contains_key(&alias_key) {
                    return Err(TaxonomyError::ConflictingAlias {
                        alias: alias.clone(),
                        first: alias_key,
                        second: owner,
                    });
                }
                match aliases.get(&alias_key) {
                    Some(existing) if existing != &owner => {
                        return Err(TaxonomyError::ConflictingAlias {
                            alias: alias.clone(),
                            first: existing.clone(),
                            second: owner,
                        });
                    }
                    Some(_) => debug!("Duplicate alias '{alias}' for '{owner}' ignored"),
                    None => {
                        aliases.insert(alias_key, owner.clone());
                    }
                }
            }
        }

        let fingerprint = fingerprint(&skills, &aliases);
        Ok(Self {
            skills,
            aliases,
            fingerprint,
        })
    }

    pub fn skill(&self, canonical: &str) -> Option<&CanonicalSkill> {
        self.skills.get(canonical)
    }

    /// Canonical key an alias points at, if the surface form is an alias.
    /// Canonical keys themselves resolve to themselves.
    pub fn resolve_alias(&self, surface: &str) -> Option<&str> {
        if let Some(skill) = self.skills.get(surface) {
            return Some(skill.key.as_str());
        }
        self.aliases.get(surface).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }

    /// Content hash of every skill, category and alias. Independent of
    /// entry order; changes whenever any of them changes.
    pub fn fingerprint(&self) -> Uuid {
        self.fingerprint
    }
}

fn fingerprint(
    skills: &HashMap<String, CanonicalSkill>,
    aliases: &HashMap<String, String>,
) -> Uuid {
    let mut lines: Vec<String> = skills
        .values()
        .map(|s| format!("skill\t{}\t{}\t{}", s.key, s.name, s.category))
        .chain(aliases.iter().map(|(alias, owner)| format!("alias\t{alias}\t{owner}")))
        .collect();
    lines.sort_unstable();
    Uuid::new_v5(&Uuid::NAMESPACE_OID, lines.join("\n").as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, category: SkillCategory, aliases: &[&str]) -> TaxonomyEntry {
        TaxonomyEntry {
            name: name.to_string(),
            category,
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }

    #[test]
    fn test_builtin_taxonomy_is_consistent() {
        let taxonomy = SkillTaxonomy::builtin().unwrap();
        assert!(taxonomy.len() > 100, "only {} skills", taxonomy.len());
        assert!(taxonomy.alias_count() > 50);
    }

    #[test]
    fn test_fingerprint_tracks_content_not_order() {
        let base = SkillTaxonomy::from_entries(vec![
            entry("Rust", SkillCategory::ProgrammingLanguages, &["rustlang"]),
            entry("Go", SkillCategory::ProgrammingLanguages, &["golang"]),
        ])
        .unwrap();
        let reordered = SkillTaxonomy::from_entries(vec![
            entry("Go", SkillCategory::ProgrammingLanguages, &["golang"]),
            entry("Rust", SkillCategory::ProgrammingLanguages, &["rustlang"]),
        ])
        .unwrap();
        let extra_alias = SkillTaxonomy::from_entries(vec![
            entry("Rust", SkillCategory::ProgrammingLanguages, &["rustlang", "rs"]),
            entry("Go", SkillCategory::ProgrammingLanguages, &["golang"]),
        ])
        .unwrap();
        let recategorized = SkillTaxonomy::from_entries(vec![
            entry("Rust", SkillCategory::Other, &["rustlang"]),
            entry("Go", SkillCategory::ProgrammingLanguages, &["golang"]),
        ])
        .unwrap();

        assert_eq!(base.fingerprint(), reordered.fingerprint());
        assert_ne!(base.fingerprint(), extra_alias.fingerprint());
        assert_ne!(base.fingerprint(), recategorized.fingerprint());
    }

    #[test]
    fn test_canonical_key_resolves_to_itself() {
        let taxonomy = SkillTaxonomy::builtin().unwrap();
        assert_eq!(taxonomy.resolve_alias("python"), Some("python"));
        assert_eq!(taxonomy.resolve_alias("golang"), Some("go"));
        assert_eq!(taxonomy.resolve_alias("cobol"), None);
    }

    #[test]
    fn test_display_name_preserved() {
        let taxonomy = SkillTaxonomy::builtin().unwrap();
        let skill = taxonomy.skill("postgresql").unwrap();
        assert_eq!(skill.name, "PostgreSQL");
        assert_eq!(skill.category, SkillCategory::Databases);
    }

    #[test]
    fn test_alias_shadowing_a_skill_is_rejected() {
        let result = SkillTaxonomy::from_entries(vec![
            entry("Java", SkillCategory::ProgrammingLanguages, &[]),
            entry("JavaScript", SkillCategory::ProgrammingLanguages, &["java"]),
        ]);
        assert!(matches!(result, Err(TaxonomyError::ConflictingAlias { .. })));
    }

    #[test]
    fn test_alias_shared_by_two_skills_is_rejected() {
        let result = SkillTaxonomy::from_entries(vec![
            entry("Go", SkillCategory::ProgrammingLanguages, &["gopher"]),
            entry("Gin", SkillCategory::FrameworksLibraries, &["gopher"]),
        ]);
        assert!(matches!(result, Err(TaxonomyError::ConflictingAlias { .. })));
    }

    #[test]
    fn test_duplicate_skill_is_rejected() {
        let result = SkillTaxonomy::from_entries(vec![
            entry("React", SkillCategory::FrameworksLibraries, &[]),
            entry("React.js", SkillCategory::FrameworksLibraries, &[]),
        ]);
        assert!(matches!(result, Err(TaxonomyError::DuplicateSkill(_))));
    }

    #[test]
    fn test_custom_taxonomy_overrides_builtin() {
        let taxonomy = SkillTaxonomy::from_entries(vec![entry(
            "Widget Tuning",
            SkillCategory::ToolsPlatforms,
            &["widgets"],
        )])
        .unwrap();
        assert_eq!(taxonomy.canonical_form("Widgets"), "widget tuning");
        assert_eq!(
            taxonomy.lookup_category("widget tuning"),
            SkillCategory::ToolsPlatforms
        );
        // builtin aliases are not present in a custom taxonomy
        assert_eq!(taxonomy.canonical_form("k8s"), "k8s");
    }

    #[test]
    fn test_taxonomy_file_format() {
        let json = r#"{"skills": [{"name": "Zig", "category": "programming_languages", "aliases": ["ziglang"]}]}"#;
        let file: TaxonomyFile = serde_json::from_str(json).unwrap();
        let taxonomy = SkillTaxonomy::from_entries(file.skills).unwrap();
        assert_eq!(taxonomy.canonical_form("ziglang"), "zig");
    }
}
