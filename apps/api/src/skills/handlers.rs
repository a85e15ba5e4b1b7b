use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::courses::recommender::{recommend, RecommendedCourse};
use crate::errors::AppError;
use crate::skills::models::{SkillAnalysisResult, SkillAreas};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub cv_text: String,
    #[serde(default)]
    pub job_description: Option<String>,
}

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub analysis: SkillAnalysisResult,
    pub skill_areas: SkillAreas,
    pub recommended_courses: Vec<RecommendedCourse>,
}

/// POST /api/v1/skills/analyze
///
/// Runs the extractor over already-extracted CV text and recommends catalog
/// courses for the skills it finds. Only a blank CV is rejected; extraction
/// itself always produces a result.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    if req.cv_text.trim().is_empty() {
        return Err(AppError::Validation("cv_text must not be empty".to_string()));
    }

    let analysis = state
        .extractor
        .extract(&req.cv_text, req.job_description.as_deref())
        .await;
    info!(
        "Analyzed CV: {} skills, experience level {}",
        analysis.current_skills.len(),
        analysis.experience_level
    );

    let catalog = state.catalog.current().await;
    let recommended_courses = recommend(
        &analysis.current_skills,
        &catalog,
        state.config.max_recommendations,
    );
    let skill_areas = SkillAreas::from_skills(&analysis.current_skills);

    Ok(Json(AnalyzeResponse {
        analysis,
        skill_areas,
        recommended_courses,
    }))
}
