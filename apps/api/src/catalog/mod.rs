//! Skill catalog — immutable role definitions and the synonym table.
//!
//! Built once at startup (built-in JSON or override files) and shared via `Arc`.
//! Nothing in here is mutated after `SkillCatalog::load` returns.

pub mod handlers;
pub mod synonyms;

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

pub use synonyms::SynonymTable;

use synonyms::normalize_token;

const BUILTIN_ROLES: &str = include_str!("../../data/roles.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to parse {source_name}: {source}")]
    Parse {
        source_name: String,
        source: serde_json::Error,
    },

    #[error("Role name cannot be empty")]
    EmptyRoleName,

    #[error("Role '{0}' has a skill with an empty name")]
    EmptySkillName(String),

    #[error("Role '{0}' is defined more than once")]
    DuplicateRole(String),

    #[error("Role '{role}' lists skill '{skill}' more than once")]
    DuplicateSkill { role: String, skill: String },
}

// ────────────────────────────────────────────────────────────────────────────
// Data model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Technical,
    Framework,
    Tool,
    Soft,
}

/// How much a role cares about a skill. Drives the scoring weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Importance {
    Critical,
    Important,
    NiceToHave,
}

impl Importance {
    /// critical=3, important=2, nice-to-have=1
    pub fn weight(self) -> u32 {
        match self {
            Importance::Critical => 3,
            Importance::Important => 2,
            Importance::NiceToHave => 1,
        }
    }
}

/// One skill a role cares about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleSkillRequirement {
    pub name: String,
    pub category: SkillCategory,
    pub importance: Importance,
    /// Lowercase alternate spellings. Recognized case-insensitively.
    #[serde(default)]
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDefinition {
    pub name: String,
    #[serde(default)]
    pub required_skills: Vec<RoleSkillRequirement>,
    #[serde(default)]
    pub optional_skills: Vec<RoleSkillRequirement>,
}

impl RoleDefinition {
    /// Required skills followed by optional skills, in catalog order.
    pub fn requirements(&self) -> impl Iterator<Item = &RoleSkillRequirement> {
        self.required_skills.iter().chain(self.optional_skills.iter())
    }

    /// Finds a requirement by name. Exact match first, then ASCII case-insensitive.
    pub fn requirement(&self, name: &str) -> Option<&RoleSkillRequirement> {
        self.requirements()
            .find(|r| r.name == name)
            .or_else(|| self.requirements().find(|r| r.name.eq_ignore_ascii_case(name)))
    }

    fn normalize(&mut self) {
        self.name = self.name.trim().to_string();
        for req in self
            .required_skills
            .iter_mut()
            .chain(self.optional_skills.iter_mut())
        {
            req.name = req.name.trim().to_string();
            let mut seen = HashSet::new();
            req.aliases = req
                .aliases
                .iter()
                .map(|a| normalize_token(a))
                .filter(|a| !a.is_empty() && seen.insert(a.clone()))
                .collect();
        }
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.name.is_empty() {
            return Err(CatalogError::EmptyRoleName);
        }
        let mut names = HashSet::new();
        for req in self.requirements() {
            if req.name.is_empty() {
                return Err(CatalogError::EmptySkillName(self.name.clone()));
            }
            if !names.insert(req.name.to_lowercase()) {
                return Err(CatalogError::DuplicateSkill {
                    role: self.name.clone(),
                    skill: req.name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// A role lookup result. `fallback` is set when the default role was substituted.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedRole<'a> {
    pub role: &'a RoleDefinition,
    pub fallback: bool,
}

/// Registry of role definitions keyed by exact (case-sensitive) name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleCatalog {
    pub default_role: RoleDefinition,
    pub roles: Vec<RoleDefinition>,
}

impl RoleCatalog {
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_ROLES)
    }

    /// Parses and validates a role catalog document.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let mut catalog: RoleCatalog =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse {
                source_name: "role catalog".to_string(),
                source: e,
            })?;

        catalog.default_role.normalize();
        catalog.default_role.validate()?;

        let mut seen = HashSet::new();
        for role in &mut catalog.roles {
            role.normalize();
            role.validate()?;
            if !seen.insert(role.name.clone()) {
                return Err(CatalogError::DuplicateRole(role.name.clone()));
            }
        }
        Ok(catalog)
    }

    /// Case-sensitive lookup. No fallback.
    pub fn get(&self, name: &str) -> Option<&RoleDefinition> {
        self.roles.iter().find(|r| r.name == name)
    }

    /// Looks up a role, substituting the default role when the name is unknown.
    pub fn resolve(&self, name: &str) -> ResolvedRole<'_> {
        match self.get(name) {
            Some(role) => ResolvedRole {
                role,
                fallback: false,
            },
            None => ResolvedRole {
                role: &self.default_role,
                fallback: true,
            },
        }
    }

    pub fn role_names(&self) -> Vec<&str> {
        self.roles.iter().map(|r| r.name.as_str()).collect()
    }

    /// All roles including the default role, catalog order, default last.
    pub fn all_roles(&self) -> impl Iterator<Item = &RoleDefinition> {
        self.roles.iter().chain(std::iter::once(&self.default_role))
    }
}

/// Roles plus synonyms. The read-only reference data every scoring call uses.
#[derive(Debug, Clone)]
pub struct SkillCatalog {
    pub roles: RoleCatalog,
    pub synonyms: SynonymTable,
}

impl SkillCatalog {
    /// The catalog embedded in the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Ok(Self {
            roles: RoleCatalog::builtin()?,
            synonyms: SynonymTable::builtin()?,
        })
    }

    /// Loads the catalog, replacing either half with a JSON file when a path is given.
    pub fn load(roles_path: Option<&Path>, synonyms_path: Option<&Path>) -> anyhow::Result<Self> {
        if roles_path.is_none() && synonyms_path.is_none() {
            return Ok(Self::builtin()?);
        }

        let roles = match roles_path {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read role catalog {}", path.display()))?;
                info!("Loading role catalog from {}", path.display());
                RoleCatalog::from_json(&json)?
            }
            None => RoleCatalog::builtin()?,
        };

        let synonyms = match synonyms_path {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read synonym table {}", path.display()))?;
                info!("Loading synonym table from {}", path.display());
                SynonymTable::from_json(&json)?
            }
            None => SynonymTable::builtin()?,
        };

        Ok(Self { roles, synonyms })
    }
}
