use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::courses::catalog::{course_brief, CatalogStats, Course};
use crate::courses::recommender::{recommend, RecommendedCourse};
use crate::courses::search::{search_courses, ScoredCourse};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Deserialize)]
pub struct DetailsQuery {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Serialize)]
pub struct CourseDetailsResponse {
    pub course: Course,
    pub category: String,
    pub brief: String,
}

#[derive(Deserialize)]
pub struct RecommendationRequest {
    pub skills: Vec<String>,
    pub max_recommendations: Option<usize>,
}

/// GET /api/v1/courses/search?query=
/// A missing or blank query returns an empty list.
pub async fn handle_search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Json<Vec<ScoredCourse>> {
    let catalog = state.catalog.current().await;
    let query = params.query.unwrap_or_default();
    Json(search_courses(&query, &catalog))
}

/// GET /api/v1/courses/details?name=
pub async fn handle_course_details(
    State(state): State<AppState>,
    Query(params): Query<DetailsQuery>,
) -> Result<Json<CourseDetailsResponse>, AppError> {
    let name = params.name.unwrap_or_default();
    if name.trim().is_empty() {
        return Err(AppError::Validation("Course name is required".to_string()));
    }

    let catalog = state.catalog.current().await;
    let found = catalog
        .find_course(&name)
        .ok_or_else(|| AppError::NotFound(format!("Course '{}' not found", name.trim())))?;

    Ok(Json(CourseDetailsResponse {
        course: found.course.clone(),
        category: found.category.name.clone(),
        brief: course_brief(found.course),
    }))
}

/// POST /api/v1/courses/recommendations
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Json(req): Json<RecommendationRequest>,
) -> Json<Vec<RecommendedCourse>> {
    let limit = req
        .max_recommendations
        .unwrap_or(state.config.max_recommendations);
    let catalog = state.catalog.current().await;
    Json(recommend(&req.skills, &catalog, limit))
}

/// POST /api/v1/catalog/reload
pub async fn handle_reload_catalog(
    State(state): State<AppState>,
) -> Result<Json<CatalogStats>, AppError> {
    let stats = state.catalog.reload().await?;
    tracing::info!(
        "Catalog reloaded: {} categories, {} courses",
        stats.categories,
        stats.courses
    );
    Ok(Json(stats))
}
