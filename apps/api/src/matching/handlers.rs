//! Axum route handlers for the skill matching API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::matching::extract::extract_skills;
use crate::matching::recommend::{recommend, summarize, Recommendation};
use crate::matching::scorer::MatchResult;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    #[serde(default)]
    pub user_skills: Vec<String>,
    pub target_role: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsRequest {
    pub target_role: String,
    #[serde(default)]
    pub missing_skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub user_skills: Vec<String>,
    /// Plain résumé text, scanned for catalog skill mentions.
    #[serde(default)]
    pub resume_text: Option<String>,
    pub target_role: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub extracted_skills: Vec<String>,
    #[serde(rename = "match")]
    pub match_result: MatchResult,
    pub recommendations: Vec<Recommendation>,
    pub summary: String,
    pub scorer_backend: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/skills/match
///
/// Scores the user's skills against a role. Unknown roles fall back to the
/// default role rather than erroring.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResult>, AppError> {
    let role = validate_role(&request.target_role)?;
    validate_count("userSkills", request.user_skills.len(), state.config.max_user_skills)?;

    let result = state.fit_scorer.score(&request.user_skills, role);
    info!(
        "Match '{}' (resolved '{}'): {}/100",
        role, result.role, result.match_score
    );

    Ok(Json(result))
}

/// POST /api/v1/skills/recommendations
///
/// Turns a list of missing skills into prioritized recommendations.
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Json(request): Json<RecommendationsRequest>,
) -> Result<Json<RecommendationsResponse>, AppError> {
    let role = validate_role(&request.target_role)?;
    validate_count(
        "missingSkills",
        request.missing_skills.len(),
        state.config.max_user_skills,
    )?;

    let recommendations = recommend(&state.catalog, role, &request.missing_skills);
    Ok(Json(RecommendationsResponse { recommendations }))
}

/// POST /api/v1/skills/analyze
///
/// Full pipeline: mention scan → score → recommendations → summary.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let role = validate_role(&request.target_role)?;
    validate_count("userSkills", request.user_skills.len(), state.config.max_user_skills)?;

    let extracted_skills = request
        .resume_text
        .as_deref()
        .map(|text| extract_skills(&state.catalog, text))
        .unwrap_or_default();

    let skills = merge_skills(&request.user_skills, &extracted_skills);
    let match_result = state.fit_scorer.score(&skills, role);
    let recommendations = recommend(&state.catalog, &match_result.role, &match_result.missing_skills);
    let summary = summarize(
        match_result.match_score,
        &match_result.critical_missing,
        &match_result.important_missing,
    );

    info!(
        "Analyze '{}': {} declared + {} extracted skills, {}/100",
        role,
        request.user_skills.len(),
        extracted_skills.len(),
        match_result.match_score
    );

    Ok(Json(AnalyzeResponse {
        extracted_skills,
        match_result,
        recommendations,
        summary,
        scorer_backend: state.fit_scorer.backend().to_string(),
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn validate_role(target_role: &str) -> Result<&str, AppError> {
    let role = target_role.trim();
    if role.is_empty() {
        return Err(AppError::Validation("targetRole cannot be empty".to_string()));
    }
    Ok(role)
}

fn validate_count(field: &str, count: usize, max: usize) -> Result<(), AppError> {
    if count > max {
        return Err(AppError::Validation(format!(
            "{field} has {count} entries; at most {max} are allowed"
        )));
    }
    Ok(())
}

/// Declared skills first, then extracted skills not already declared (case-insensitive).
fn merge_skills(declared: &[String], extracted: &[String]) -> Vec<String> {
    let mut merged = declared.to_vec();
    for skill in extracted {
        if !declared.iter().any(|d| d.trim().eq_ignore_ascii_case(skill)) {
            merged.push(skill.clone());
        }
    }
    merged
}
