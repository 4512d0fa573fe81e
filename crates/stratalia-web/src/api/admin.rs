use std::collections::BTreeMap;
use std::time::Instant;

use axum::extract::{Path, State};
use chrono::Utc;
use stratalia_core::community::{Moderation, ModerationStats};
use stratalia_core::validation::escape_html;
use stratalia_core::{Account, Category};

use crate::auth::middleware::AdminUser;
use crate::dto::*;
use crate::envelope::ApiResponse;
use crate::error::AppError;
use crate::extract::{ValidatedJson, ValidatedQuery};
use crate::state::AppState;

pub async fn submissions(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<SubmissionsQuery>,
) -> ApiResponse<SubmissionList> {
    let submissions = state.submissions.list(query.status_filter(), query.limit);
    ApiResponse::ok(SubmissionList {
        count: submissions.len(),
        submissions,
    })
}

pub async fn moderate(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<ModerationRequest>,
) -> Result<ApiResponse<Moderation>, AppError> {
    let moderation = state.submissions.moderate(
        &id,
        body.action,
        admin.id(),
        body.review_notes.as_deref().map(escape_html),
        &state.catalog,
        &state.points,
        Utc::now().date_naive(),
    )?;
    if moderation.word.is_some() {
        state.search_cache.invalidate_prefix("search:");
    }
    Ok(ApiResponse::ok(moderation))
}

pub async fn moderation_stats(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
) -> ApiResponse<ModerationStats> {
    ApiResponse::ok(state.submissions.stats())
}

pub async fn block_user(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<BlockRequest>,
) -> Result<ApiResponse<Account>, AppError> {
    let reason = body.reason.as_deref().map(escape_html);
    let account = state.accounts.set_blocked(&id, true, reason)?;
    tracing::info!("Account {} blocked by {}", account.id, admin.id());
    Ok(ApiResponse::ok(account))
}

pub async fn unblock_user(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Account>, AppError> {
    let account = state.accounts.set_blocked(&id, false, None)?;
    tracing::info!("Account {} unblocked by {}", account.id, admin.id());
    Ok(ApiResponse::ok(account))
}

pub async fn rate_limits(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
) -> ApiResponse<RateLimitOverview> {
    let policies = state.limiter.policies();
    ApiResponse::ok(RateLimitOverview {
        stats: state.limiter.stats(Instant::now()),
        policies: Category::ALL
            .iter()
            .map(|&c| (c.as_str(), policies.get(c)))
            .collect::<BTreeMap<_, _>>(),
    })
}

pub async fn unblock_client(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<UnblockClientRequest>,
) -> ApiResponse<UnblockResponse> {
    let unblocked_entries = state.limiter.unblock(body.fingerprint.trim());
    tracing::info!(
        "Client {} unblocked by {}: {unblocked_entries} entries",
        body.fingerprint,
        admin.id()
    );
    ApiResponse::ok(UnblockResponse {
        fingerprint: body.fingerprint,
        unblocked_entries,
    })
}
