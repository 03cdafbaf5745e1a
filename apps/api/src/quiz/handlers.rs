//! Axum route handlers for the quiz.
//!
//! The server keeps no quiz state. Each request carries the client's
//! `QuizSession`; the response carries the updated one.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::quiz::bank::Question;
use crate::quiz::category::CategoryStyle;
use crate::quiz::scoring::ResultSummary;
use crate::quiz::{QuestionBank, QuizResult, QuizSession};
use crate::reference::models::{Cluster, Pathway};
use crate::reference::pathways::{list_for_cluster, select_default};
use crate::reference::resolver::resolve;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub questions: Vec<Question>,
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    #[serde(default)]
    pub session: QuizSession,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    #[serde(default)]
    pub session: QuizSession,
    /// Defaults to the session's current question.
    pub question_index: Option<usize>,
    pub option_id: String,
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session: QuizSession,
    pub question: Option<Question>,
    pub question_number: usize,
    pub total_questions: usize,
    pub progress_percent: u32,
    pub complete: bool,
}

impl SessionView {
    fn new(session: QuizSession, bank: &QuestionBank) -> Self {
        let total = bank.len();
        let progress_percent = (((session.current + 1) as f64 / total as f64) * 100.0).round() as u32;
        Self {
            question: session.current_question(bank).cloned(),
            question_number: session.current + 1,
            total_questions: total,
            progress_percent,
            complete: session.is_complete(bank),
            session,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuizResultResponse {
    pub result: QuizResult,
    pub summary: ResultSummary,
    pub cluster: Cluster,
    pub style: CategoryStyle,
    /// Empty when the cluster's pathways haven't been written yet.
    pub pathways: Vec<Pathway>,
    pub selected_pathway: Option<Pathway>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/quiz/questions
pub async fn handle_list_questions(State(state): State<AppState>) -> Json<QuestionsResponse> {
    Json(QuestionsResponse {
        questions: state.bank.questions().to_vec(),
        total: state.bank.len(),
    })
}

/// POST /api/v1/quiz/session
pub async fn handle_start_session(State(state): State<AppState>) -> Json<SessionView> {
    Json(SessionView::new(QuizSession::default(), &state.bank))
}

/// POST /api/v1/quiz/answer
pub async fn handle_submit_answer(
    State(state): State<AppState>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<SessionView>, AppError> {
    let mut session = request.session;
    session.validate(&state.bank)?;

    let index = request.question_index.unwrap_or(session.current);
    session.submit_answer(&state.bank, index, &request.option_id)?;

    Ok(Json(SessionView::new(session, &state.bank)))
}

/// POST /api/v1/quiz/previous
pub async fn handle_previous(
    State(state): State<AppState>,
    Json(request): Json<SessionRequest>,
) -> Result<Json<SessionView>, AppError> {
    let mut session = request.session;
    session.validate(&state.bank)?;
    session.go_to_previous(&state.bank)?;
    Ok(Json(SessionView::new(session, &state.bank)))
}

/// POST /api/v1/quiz/result
///
/// Scores the completed session, resolves the winning cluster and picks the
/// default pathway. A cluster with no pathways is not an error.
pub async fn handle_result(
    State(state): State<AppState>,
    Json(request): Json<SessionRequest>,
) -> Result<Json<QuizResultResponse>, AppError> {
    let session = request.session;
    session.validate(&state.bank)?;
    let result = session.compute_result(&state.bank)?;

    let cluster = resolve(state.reference.as_ref(), result.top_category).await?;
    let pathways = list_for_cluster(state.reference.as_ref(), cluster.id).await?;
    let selected_pathway = select_default(&pathways).cloned();

    tracing::info!(
        "Quiz completed: top_category={} pathways={}",
        result.top_category,
        pathways.len()
    );

    Ok(Json(QuizResultResponse {
        summary: result.summary(state.bank.len()),
        style: result.top_category.style(),
        result,
        cluster,
        pathways,
        selected_pathway,
    }))
}
