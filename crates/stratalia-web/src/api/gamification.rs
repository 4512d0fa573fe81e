use axum::extract::State;
use chrono::Utc;
use stratalia_core::challenges::{ChallengeBoard, ProgressUpdate};
use stratalia_core::points::{LeaderboardEntry, PointsAward, UserPoints};
use stratalia_core::profile::Activity;

use crate::auth::middleware::{AuthUser, MaybeUser};
use crate::dto::{
    AwardPointsRequest, ChallengeProgressRequest, ChallengesQuery, LeaderboardQuery, PointsQuery,
};
use crate::envelope::ApiResponse;
use crate::error::AppError;
use crate::extract::{ValidatedJson, ValidatedQuery};
use crate::state::AppState;

pub async fn points(
    user: AuthUser,
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<PointsQuery>,
) -> Result<ApiResponse<UserPoints>, AppError> {
    let target = query.user_id.as_deref().unwrap_or(user.id());
    if target != user.id() && !user.is_admin() {
        return Err(AppError::Forbidden(
            "Je kunt alleen je eigen punten bekijken".to_string(),
        ));
    }

    let points = state.points.get(target).unwrap_or_else(|| {
        let name = if target == user.id() {
            user.account.full_name.as_str()
        } else {
            ""
        };
        UserPoints::new(target, name)
    });
    Ok(ApiResponse::ok(points))
}

pub async fn award(
    user: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<AwardPointsRequest>,
) -> Result<ApiResponse<PointsAward>, AppError> {
    let award = state.points.award(
        user.id(),
        &user.account.full_name,
        body.points,
        body.action_type.trim(),
        Utc::now().date_naive(),
    )?;
    Ok(ApiResponse::ok(award))
}

pub async fn leaderboard(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<LeaderboardQuery>,
) -> ApiResponse<Vec<LeaderboardEntry>> {
    ApiResponse::ok(state.points.leaderboard(
        query.period,
        query.limit,
        Utc::now().date_naive(),
    ))
}

pub async fn challenges(
    MaybeUser(user): MaybeUser,
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ChallengesQuery>,
) -> ApiResponse<ChallengeBoard> {
    let user_id = user.as_ref().map(|u| u.id());
    let activity = user_id.map_or_else(Activity::default, |id| state.activity(id));
    ApiResponse::ok(state.challenges.board(user_id, &activity, query.kind, query.status))
}

pub async fn challenge_progress(
    user: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<ChallengeProgressRequest>,
) -> Result<ApiResponse<ProgressUpdate>, AppError> {
    let update = state.challenges.record_progress(
        user.id(),
        &user.account.full_name,
        body.challenge_id.trim(),
        body.completed,
        &state.activity(user.id()),
        &state.points,
        Utc::now().date_naive(),
    )?;
    Ok(ApiResponse::ok(update))
}
