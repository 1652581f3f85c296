//! Recommendation generator — turns missing skills into prioritized, readable records.

use serde::{Deserialize, Serialize};

use crate::catalog::{Importance, SkillCatalog, SkillCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl From<Importance> for Priority {
    fn from(importance: Importance) -> Self {
        match importance {
            Importance::Critical => Priority::High,
            Importance::Important => Priority::Medium,
            Importance::NiceToHave => Priority::Low,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub skill: String,
    pub priority: Priority,
    pub reason: String,
    pub recommended_action: String,
}

/// Builds one recommendation per missing skill, ordered high → medium → low.
/// Order within a priority follows `missing_skills`.
///
/// Unknown roles resolve to the default role. A skill the role does not list
/// gets medium priority and generic wording.
pub fn recommend(
    catalog: &SkillCatalog,
    role_name: &str,
    missing_skills: &[String],
) -> Vec<Recommendation> {
    let role = catalog.roles.resolve(role_name).role;

    let mut recommendations: Vec<Recommendation> = missing_skills
        .iter()
        .filter(|s| !s.trim().is_empty())
        .map(|skill| match role.requirement(skill) {
            Some(req) => Recommendation {
                skill: req.name.clone(),
                priority: req.importance.into(),
                reason: reason_for(&req.name, &role.name, req.importance),
                recommended_action: action_for(&req.name, req.category),
            },
            None => Recommendation {
                skill: skill.clone(),
                priority: Priority::Medium,
                reason: format!("{skill} was identified as a gap for the {} role.", role.name),
                recommended_action: format!(
                    "Research how {skill} is used in {} positions and add relevant experience.",
                    role.name
                ),
            },
        })
        .collect();

    // stable: keeps input order inside each priority
    recommendations.sort_by_key(|r| r.priority);
    recommendations
}

fn reason_for(skill: &str, role: &str, importance: Importance) -> String {
    match importance {
        Importance::Critical => {
            format!("{skill} is a critical requirement for {role} roles and is missing from your profile.")
        }
        Importance::Important => {
            format!("{skill} is an important skill for {role} roles and would strengthen your candidacy.")
        }
        Importance::NiceToHave => {
            format!("{skill} is a nice-to-have for {role} roles that can set you apart.")
        }
    }
}

fn action_for(skill: &str, category: SkillCategory) -> String {
    match category {
        SkillCategory::Technical => format!(
            "Take a structured course on {skill} and apply it in a hands-on project you can show."
        ),
        SkillCategory::Framework => format!(
            "Build a small application with {skill} and publish the code to your portfolio."
        ),
        SkillCategory::Tool => format!(
            "Practice {skill} in a real workflow and consider an official certification."
        ),
        SkillCategory::Soft => format!(
            "Seek opportunities to demonstrate {skill} through team projects, mentoring, or volunteering."
        ),
    }
}

/// One-line verdict for a match score, naming up to three gaps (criticals first).
pub fn summarize(score: u32, critical_missing: &[String], important_missing: &[String]) -> String {
    let top_gaps: Vec<&str> = critical_missing
        .iter()
        .chain(important_missing.iter())
        .take(3)
        .map(String::as_str)
        .collect();

    if score >= 80 {
        "Strong fit. Your skills cover the key requirements for this role.".to_string()
    } else if top_gaps.is_empty() {
        format!("Partial fit ({score}/100). Remaining gaps are nice-to-have skills.")
    } else if score >= 60 {
        format!(
            "Moderate fit ({score}/100). Consider building: {}.",
            top_gaps.join(", ")
        )
    } else {
        format!(
            "Low fit ({score}/100). Significant gaps: {}. Focus on these before applying.",
            top_gaps.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> SkillCatalog {
        SkillCatalog::builtin().unwrap()
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_priority_follows_importance() {
        let recs = recommend(
            &catalog(),
            "Data Scientist",
            &names(&["Deep Learning", "SQL", "Machine Learning"]),
        );
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0].skill, "Machine Learning");
        assert_eq!(recs[0].priority, Priority::High);
        assert_eq!(recs[1].skill, "SQL");
        assert_eq!(recs[1].priority, Priority::Medium);
        assert_eq!(recs[2].skill, "Deep Learning");
        assert_eq!(recs[2].priority, Priority::Low);
    }

    #[test]
    fn test_sort_is_stable_within_priority() {
        let recs = recommend(
            &catalog(),
            "Data Scientist",
            &names(&["Statistics", "Python", "Machine Learning"]),
        );
        let order: Vec<&str> = recs.iter().map(|r| r.skill.as_str()).collect();
        assert_eq!(order, vec!["Statistics", "Python", "Machine Learning"]);
    }

    #[test]
    fn test_unknown_skill_defaults_to_medium() {
        let recs = recommend(&catalog(), "Data Scientist", &names(&["Underwater Welding"]));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].priority, Priority::Medium);
        assert!(recs[0].reason.contains("Underwater Welding"));
        assert!(recs[0].reason.contains("Data Scientist"));
    }

    #[test]
    fn test_unknown_role_uses_default_role() {
        let recs = recommend(&catalog(), "Astronaut", &names(&["Communication"]));
        assert_eq!(recs[0].priority, Priority::High);
        assert!(recs[0].reason.contains("General Professional"));
    }

    #[test]
    fn test_action_varies_by_category() {
        let c = catalog();
        let tool = &recommend(&c, "DevOps Engineer", &names(&["Containers"]))[0];
        let soft = &recommend(&c, "Product Manager", &names(&["Stakeholder Management"]))[0];
        let framework = &recommend(&c, "Full Stack Developer", &names(&["Node.js"]))[0];
        let technical = &recommend(&c, "DevOps Engineer", &names(&["Linux"]))[0];

        assert!(tool.recommended_action.contains("certification"));
        assert!(soft.recommended_action.contains("mentoring"));
        assert!(framework.recommended_action.contains("portfolio"));
        assert!(technical.recommended_action.contains("course"));
    }

    #[test]
    fn test_lookup_ignores_case_and_uses_catalog_name() {
        let recs = recommend(&catalog(), "Data Scientist", &names(&["sql"]));
        assert_eq!(recs[0].skill, "SQL");
        assert_eq!(recs[0].priority, Priority::Medium);
    }

    #[test]
    fn test_empty_input() {
        assert!(recommend(&catalog(), "Data Scientist", &[]).is_empty());
        assert!(recommend(&catalog(), "Data Scientist", &names(&["  "])).is_empty());
    }

    #[test]
    fn test_priority_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), r#""high""#);
    }

    #[test]
    fn test_summary_strong() {
        assert!(summarize(85, &[], &[]).contains("Strong fit"));
    }

    #[test]
    fn test_summary_moderate_lists_gaps() {
        let s = summarize(65, &names(&["Kafka"]), &[]);
        assert!(s.contains("Kafka"));
        assert!(s.contains("65"));
    }

    #[test]
    fn test_summary_low_puts_criticals_first_and_caps_at_three() {
        let s = summarize(
            30,
            &names(&["Python", "Statistics"]),
            &names(&["SQL", "Data Visualization"]),
        );
        assert!(s.contains("Python, Statistics, SQL"));
        assert!(!s.contains("Data Visualization"));
    }

    #[test]
    fn test_summary_only_nice_to_have_gaps() {
        let s = summarize(70, &[], &[]);
        assert!(s.contains("nice-to-have"));
    }
}
