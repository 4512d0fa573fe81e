use axum::extract::State;

use crate::dto::HealthResponse;
use crate::envelope::ApiResponse;
use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> ApiResponse<HealthResponse> {
    ApiResponse::ok(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.started_at.elapsed().as_secs(),
        words: state.catalog.word_count(),
        quiz_questions: state.catalog.questions().len(),
        knowledge_items: state.catalog.knowledge_count(),
        accounts: state.accounts.len(),
    })
}
