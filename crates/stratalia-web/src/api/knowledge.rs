use axum::extract::{Path, State};
use stratalia_core::catalog::{KnowledgeStats, LikeOutcome};
use stratalia_core::search;
use stratalia_core::validation::strip_markup;
use stratalia_core::KnowledgeItem;

use crate::auth::middleware::AuthUser;
use crate::dto::{KnowledgeList, KnowledgeQuery, KnowledgeSearchQuery};
use crate::envelope::ApiResponse;
use crate::error::AppError;
use crate::extract::ValidatedQuery;
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<KnowledgeQuery>,
) -> ApiResponse<KnowledgeList> {
    let items = state.catalog.knowledge_items(&query.to_filter());
    ApiResponse::ok(KnowledgeList {
        count: items.len(),
        items,
        offset: query.offset,
        limit: query.limit,
    })
}

pub async fn search(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<KnowledgeSearchQuery>,
) -> ApiResponse<KnowledgeList> {
    let items = search::search_knowledge(&state.catalog, &strip_markup(&query.q), query.limit);
    ApiResponse::ok(KnowledgeList {
        count: items.len(),
        items,
        offset: 0,
        limit: query.limit,
    })
}

pub async fn stats(State(state): State<AppState>) -> ApiResponse<KnowledgeStats> {
    ApiResponse::ok(state.catalog.knowledge_stats())
}

pub async fn item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<KnowledgeItem>, AppError> {
    state
        .catalog
        .knowledge_by_id(&id)
        .map(ApiResponse::ok)
        .ok_or_else(|| AppError::NotFound("Kennisitem niet gevonden".to_string()))
}

pub async fn like(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<LikeOutcome>, AppError> {
    let outcome = state.catalog.toggle_like(user.id(), &id)?;
    Ok(ApiResponse::ok(outcome))
}
