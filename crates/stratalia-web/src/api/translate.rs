use axum::extract::State;
use stratalia_core::translate;
use stratalia_core::validation::strip_markup;

use crate::auth::middleware::MaybeUser;
use crate::dto::{
    TranslateRequest, TranslateResponse, TranslationFeedbackRequest, TranslationFeedbackResponse,
};
use crate::envelope::ApiResponse;
use crate::extract::ValidatedJson;
use crate::state::AppState;

pub async fn translate(
    ValidatedJson(body): ValidatedJson<TranslateRequest>,
) -> ApiResponse<TranslateResponse> {
    let text = strip_markup(body.text.trim());
    if let Some(context) = body.context.as_deref().map(strip_markup) {
        tracing::debug!("Translation context: {context}");
    }
    let translation = translate::translate(&text, body.direction);
    ApiResponse::ok(TranslateResponse {
        original: text,
        direction: body.direction,
        translation,
    })
}

pub async fn feedback(
    MaybeUser(user): MaybeUser,
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<TranslationFeedbackRequest>,
) -> ApiResponse<TranslationFeedbackResponse> {
    let phrase = strip_markup(body.phrase.trim());
    let translation = strip_markup(body.translation.trim());
    let votes = state
        .translation_feedback
        .record(&phrase, &translation, body.vote());
    tracing::info!(
        "Translation feedback: vote={:?}, user={}",
        body.vote(),
        user.as_ref().map_or("anonymous", |u| u.id())
    );
    ApiResponse::ok(TranslationFeedbackResponse {
        phrase,
        translation,
        votes,
    })
}
