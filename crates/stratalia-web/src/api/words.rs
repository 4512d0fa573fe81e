use axum::extract::{Path, State};
use stratalia_core::daily::DAILY_WORD_POINTS;
use stratalia_core::search::{self, SearchOutcome};
use stratalia_core::validation::strip_markup;
use stratalia_core::{DailyWords, TtlCache};

use crate::auth::middleware::{AuthUser, MaybeUser};
use crate::dto::*;
use crate::envelope::{ApiResponse, Source};
use crate::error::AppError;
use crate::extract::{ValidatedJson, ValidatedQuery};
use crate::state::AppState;

pub async fn search(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<SearchQuery>,
) -> ApiResponse<SearchOutcome> {
    let term = strip_markup(&query.query);
    let key = TtlCache::<SearchOutcome>::key("search", &[&term, &query.limit.to_string()]);

    if let Some(cached) = state.search_cache.get(&key) {
        tracing::debug!("Search cache hit: {key}");
        return ApiResponse::with_source(cached, Source::Cache);
    }

    let outcome = search::search(&state.catalog, &term, query.limit);
    state
        .search_cache
        .insert(key, outcome.clone(), state.search_ttl());
    ApiResponse::with_source(outcome, Source::Database)
}

pub async fn list(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<WordsQuery>,
) -> ApiResponse<WordsPage> {
    let (words, total) = state.catalog.list_words(query.page, query.limit);
    ApiResponse::ok(WordsPage {
        words,
        total,
        page: query.page,
        limit: query.limit,
        total_pages: total.div_ceil(query.limit),
    })
}

pub async fn detail(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<ApiResponse<WordDetail>, AppError> {
    let word = state
        .catalog
        .lookup_word(&key)
        .ok_or_else(|| AppError::NotFound(format!("Woord '{}' niet gevonden", strip_markup(&key))))?;
    let related = state.catalog.related_words(&word, 5);
    let feedback = state.catalog.feedback_for(&word.word);
    Ok(ApiResponse::ok(WordDetail {
        word,
        related,
        feedback,
    }))
}

pub async fn daily(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<DailyQuery>,
) -> Result<ApiResponse<DailyWordResponse>, AppError> {
    let date = query
        .date
        .unwrap_or_else(|| chrono::Utc::now().date_naive());
    let word = state.daily.word_for(&state.catalog, date)?;
    Ok(ApiResponse::ok(DailyWordResponse { date, word }))
}

pub async fn learn_daily(
    user: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<DailyLearnRequest>,
) -> Result<ApiResponse<DailyLearnResponse>, AppError> {
    let today = chrono::Utc::now().date_naive();
    let date = body.date.unwrap_or(today);
    DailyWords::check_learn_date(date, today)?;

    let word = state.daily.word_for(&state.catalog, date)?;
    if body.word_id.as_deref().is_some_and(|id| id != word.id) {
        return Err(AppError::validation("word_id", "Dit is niet het woord van de dag"));
    }

    let newly_completed = state.daily.mark_learned(user.id(), date, today)?;
    let award = if newly_completed {
        Some(state.points.award(
            user.id(),
            &user.account.full_name,
            DAILY_WORD_POINTS,
            "daily_word",
            today,
        )?)
    } else {
        None
    };

    Ok(ApiResponse::ok(DailyLearnResponse {
        date,
        word_id: word.id,
        newly_completed,
        award,
    }))
}

pub async fn feedback(
    MaybeUser(user): MaybeUser,
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<FeedbackRequest>,
) -> ApiResponse<FeedbackResponse> {
    let word = strip_markup(body.word.trim()).to_lowercase();
    let feedback = state.catalog.record_feedback(&word, body.helpful);
    tracing::info!(
        "Word feedback: word={word}, helpful={}, user={}",
        body.helpful,
        user.as_ref().map_or("anonymous", |u| u.id())
    );
    ApiResponse::ok(FeedbackResponse { word, feedback })
}
