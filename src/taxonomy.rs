use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;

/// One taxonomy category: a name plus its ordered skill list.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Category {
    pub name: String,
    pub skills: Vec<String>,
}

/// The fixed skill taxonomy. Category order and per-category skill order are
/// significant: the flattened, first-occurrence-deduplicated union defines
/// which feature dimension each skill maps to, and that assignment must match
/// the one used when the model artifact was built.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SkillTaxonomy {
    pub categories: Vec<Category>,
}

impl SkillTaxonomy {
    /// Load the taxonomy from a JSON file, or fall back to the built-in
    /// default when no path is configured.
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read taxonomy file '{}'", path))?;
                let taxonomy: SkillTaxonomy = serde_json::from_str(&raw)
                    .with_context(|| format!("Failed to parse taxonomy file '{}'", path))?;
                if taxonomy.categories.is_empty() {
                    anyhow::bail!("Taxonomy file '{}' contains no categories.", path);
                }
                Ok(taxonomy)
            }
            None => Ok(Self::built_in()),
        }
    }

    /// The taxonomy shipped in the binary, used when no override file is set.
    pub fn built_in() -> Self {
        fn category(name: &str, skills: &[&str]) -> Category {
            Category {
                name: name.to_string(),
                skills: skills.iter().map(|s| s.to_string()).collect(),
            }
        }

        SkillTaxonomy {
            categories: vec![
                category(
                    "Computer Science",
                    &[
                        "Python",
                        "SQL",
                        "Machine Learning",
                        "Data Analysis",
                        "Cloud Computing",
                        "Cybersecurity",
                        "Web Development",
                    ],
                ),
                category(
                    "Design",
                    &[
                        "UI Design",
                        "UX Research",
                        "Graphic Design",
                        "Prototyping",
                    ],
                ),
                category(
                    "Business",
                    &[
                        "Project Management",
                        "Marketing",
                        "Financial Analysis",
                        "Communication",
                    ],
                ),
            ],
        }
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// The canonical skill ordering: categories flattened in declaration
    /// order, keeping only the first occurrence of a repeated skill name.
    pub fn canonical_skills(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.categories
            .iter()
            .flat_map(|c| c.skills.iter())
            .filter(|s| seen.insert(s.as_str()))
            .map(|s| s.as_str())
            .collect()
    }

    pub fn dimensions(&self) -> usize {
        self.canonical_skills().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn small_taxonomy() -> SkillTaxonomy {
        serde_json::from_value(serde_json::json!({
            "categories": [
                {"name": "Computer Science", "skills": ["Python", "SQL", "Machine Learning"]},
                {"name": "Business", "skills": ["Communication", "SQL"]}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn canonical_ordering_follows_declaration_order() {
        let taxonomy = small_taxonomy();
        assert_eq!(
            taxonomy.canonical_skills(),
            vec!["Python", "SQL", "Machine Learning", "Communication"]
        );
        assert_eq!(taxonomy.dimensions(), 4);
    }

    #[test]
    fn duplicate_skill_keeps_first_occurrence() {
        let taxonomy = small_taxonomy();
        // "SQL" appears in both categories but only claims one dimension.
        let skills = taxonomy.canonical_skills();
        assert_eq!(skills.iter().filter(|s| **s == "SQL").count(), 1);
        assert_eq!(skills[1], "SQL");
    }

    #[test]
    fn category_lookup_is_exact() {
        let taxonomy = small_taxonomy();
        assert!(taxonomy.category("Business").is_some());
        assert!(taxonomy.category("business").is_none());
        assert!(taxonomy.category("Missing").is_none());
    }

    #[test]
    fn load_reads_json_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"categories":[{{"name":"Ops","skills":["Linux","Networking"]}}]}}"#
        )
        .unwrap();
        let taxonomy = SkillTaxonomy::load(Some(file.path().to_str().unwrap())).unwrap();
        assert_eq!(taxonomy.canonical_skills(), vec!["Linux", "Networking"]);
    }

    #[test]
    fn load_rejects_empty_taxonomy() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"categories":[]}}"#).unwrap();
        assert!(SkillTaxonomy::load(Some(file.path().to_str().unwrap())).is_err());
    }

    #[test]
    fn built_in_taxonomy_is_used_without_override() {
        let taxonomy = SkillTaxonomy::load(None).unwrap();
        assert!(taxonomy.dimensions() > 0);
        assert!(taxonomy.category("Computer Science").is_some());
    }
}
