use axum::extract::State;
use stratalia_core::profile::{self, Achievements, ProfileStats};

use crate::auth::middleware::AuthUser;
use crate::envelope::ApiResponse;
use crate::state::AppState;

pub async fn stats(user: AuthUser, State(state): State<AppState>) -> ApiResponse<ProfileStats> {
    ApiResponse::ok(ProfileStats::from(&state.activity(user.id())))
}

pub async fn achievements(user: AuthUser, State(state): State<AppState>) -> ApiResponse<Achievements> {
    let achievements = profile::achievements(&state.activity(user.id()));
    tracing::debug!(
        "Achievements for {}: {}/{} earned",
        user.id(),
        achievements.stats.earned_achievements,
        achievements.stats.total_achievements
    );
    ApiResponse::ok(achievements)
}
