pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::courses::handlers as courses;
use crate::skills::handlers as skills;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Course catalog
        .route("/api/v1/courses/search", get(courses::handle_search))
        .route(
            "/api/v1/courses/details",
            get(courses::handle_course_details),
        )
        .route(
            "/api/v1/courses/recommendations",
            post(courses::handle_recommendations),
        )
        .route(
            "/api/v1/catalog/reload",
            post(courses::handle_reload_catalog),
        )
        // Skill analysis
        .route("/api/v1/skills/analyze", post(skills::handle_analyze))
        .with_state(state)
}
