use axum::extract::State;
use axum::http::StatusCode;
use stratalia_core::community::NewSubmission;
use stratalia_core::validation::strip_markup;
use stratalia_core::Submission;

use crate::auth::middleware::{AuthUser, MaybeUser};
use crate::dto::{SubmissionList, SubmissionRequest};
use crate::envelope::ApiResponse;
use crate::error::AppError;
use crate::extract::ValidatedJson;
use crate::state::AppState;

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| strip_markup(v.trim()))
        .filter(|v| !v.is_empty())
}

pub async fn submit(
    MaybeUser(user): MaybeUser,
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<SubmissionRequest>,
) -> Result<(StatusCode, ApiResponse<Submission>), AppError> {
    let submission = state.submissions.submit(
        &state.catalog,
        NewSubmission {
            word: body.word,
            definition: strip_markup(body.definition.trim()),
            example: clean(body.example),
            context: clean(body.context),
            source: clean(body.source),
            submitted_by: user.map(|u| u.account.id),
        },
    )?;
    Ok((StatusCode::CREATED, ApiResponse::ok(submission)))
}

pub async fn mine(user: AuthUser, State(state): State<AppState>) -> ApiResponse<SubmissionList> {
    let submissions = state.submissions.by_submitter(user.id());
    ApiResponse::ok(SubmissionList {
        count: submissions.len(),
        submissions,
    })
}
