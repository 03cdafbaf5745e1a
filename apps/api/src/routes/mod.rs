pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::advice::handlers as advice;
use crate::quiz::handlers as quiz;
use crate::reference::handlers as reference;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Quiz
        .route("/api/v1/quiz/questions", get(quiz::handle_list_questions))
        .route("/api/v1/quiz/session", post(quiz::handle_start_session))
        .route("/api/v1/quiz/answer", post(quiz::handle_submit_answer))
        .route("/api/v1/quiz/previous", post(quiz::handle_previous))
        .route("/api/v1/quiz/result", post(quiz::handle_result))
        // Reference data
        .route("/api/v1/clusters", get(reference::handle_list_clusters))
        .route(
            "/api/v1/clusters/:category",
            get(reference::handle_get_cluster),
        )
        .route(
            "/api/v1/clusters/:category/pathways",
            get(reference::handle_cluster_pathways),
        )
        .route("/api/v1/courses", get(reference::handle_list_courses))
        .route("/api/v1/courses/:id", get(reference::handle_get_course))
        .route("/api/v1/colleges", get(reference::handle_list_colleges))
        // Advice
        .route("/api/v1/advice", post(advice::handle_advice))
        .with_state(state)
}
