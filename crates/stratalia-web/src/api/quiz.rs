use axum::extract::State;
use chrono::Utc;
use stratalia_core::points::PointsAward;
use stratalia_core::quiz::{self, QuizRecord, QuizStats};
use stratalia_core::{QuizQuestion, TtlCache};

use crate::auth::middleware::{AuthUser, MaybeUser};
use crate::dto::*;
use crate::envelope::{ApiResponse, Source};
use crate::error::AppError;
use crate::extract::{ValidatedJson, ValidatedQuery};
use crate::state::AppState;

const QUIZ_ACTION: &str = "quiz_completed";

pub async fn questions(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<QuizQuery>,
) -> Result<ApiResponse<QuizResponse>, AppError> {
    let questions: Vec<QuizQuestionDto> = {
        let mut rng = rand::thread_rng();
        quiz::select_questions(state.catalog.questions(), query.difficulty, query.limit, &mut rng)
            .iter()
            .map(|q| QuizQuestionDto::shuffled(q, &mut rng))
            .collect()
    };

    if questions.is_empty() {
        return Err(AppError::NotFound(
            "Geen quizvragen gevonden voor deze moeilijkheidsgraad".to_string(),
        ));
    }

    Ok(ApiResponse::ok(QuizResponse {
        total: questions.len(),
        questions,
        difficulty: query.difficulty,
    }))
}

pub async fn stats(State(state): State<AppState>) -> ApiResponse<QuizStats> {
    let key = TtlCache::<QuizStats>::key("quiz_stats", &[]);
    if let Some(cached) = state.stats_cache.get(&key) {
        return ApiResponse::with_source(cached, Source::Cache);
    }
    let stats = quiz::quiz_stats(state.catalog.questions());
    state.stats_cache.insert(key, stats.clone(), state.stats_ttl());
    ApiResponse::with_source(stats, Source::Database)
}

/// Awards quiz points and stores the result. A result that earns nothing is
/// still stored.
fn save_result(
    state: &AppState,
    user: &AuthUser,
    mut record: QuizRecord,
) -> Result<(QuizRecord, Option<PointsAward>), AppError> {
    let points = quiz::quiz_points(record.score, record.time_taken_secs, record.difficulty);
    let award = if points > 0 {
        Some(state.points.award(
            user.id(),
            &user.account.full_name,
            points,
            QUIZ_ACTION,
            Utc::now().date_naive(),
        )?)
    } else {
        None
    };
    record.points_earned = points;
    state.quiz_history.record(record.clone());
    Ok((record, award))
}

pub async fn check(
    MaybeUser(user): MaybeUser,
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<QuizCheckRequest>,
) -> Result<ApiResponse<QuizCheckResponse>, AppError> {
    let ids = body.question_ids();
    let asked: Vec<QuizQuestion> = ids
        .iter()
        .filter_map(|id| state.catalog.questions().iter().find(|q| &q.id == id))
        .cloned()
        .collect();
    if asked.len() < ids.len() {
        tracing::debug!("Quiz check ignored {} unknown question ids", ids.len() - asked.len());
    }

    let outcome = quiz::score_answers(&asked, &body.answers, body.time_taken_ms)?;

    let award = match &user {
        Some(user) => {
            let record = QuizRecord {
                id: uuid::Uuid::new_v4().to_string(),
                user_id: user.id().to_string(),
                score: outcome.score,
                total_questions: outcome.total_questions,
                percentage: f64::from(outcome.percentage),
                time_taken_secs: outcome.time_taken_ms / 1000,
                difficulty: outcome.difficulty,
                correct_answers: outcome.correct_answers.clone(),
                wrong_answers: outcome.wrong_answers.clone(),
                points_earned: 0,
                completed_at: Utc::now(),
            };
            save_result(&state, user, record)?.1
        }
        None => None,
    };

    Ok(ApiResponse::ok(QuizCheckResponse { outcome, award }))
}

pub async fn submit_result(
    user: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<QuizResultRequest>,
) -> Result<ApiResponse<QuizResultResponse>, AppError> {
    let record = QuizRecord {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: user.id().to_string(),
        score: body.score,
        total_questions: body.total_questions,
        percentage: body.percentage,
        time_taken_secs: body.time_taken,
        difficulty: body.difficulty,
        correct_answers: body.correct_answers,
        wrong_answers: body.wrong_answers,
        points_earned: 0,
        completed_at: Utc::now(),
    };
    let (result, award) = save_result(&state, &user, record)?;
    Ok(ApiResponse::ok(QuizResultResponse { result, award }))
}

pub async fn history(
    user: AuthUser,
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<QuizHistoryQuery>,
) -> ApiResponse<QuizHistoryResponse> {
    ApiResponse::ok(QuizHistoryResponse {
        results: state.quiz_history.history(user.id(), query.limit),
        summary: state.quiz_history.summary(user.id()),
    })
}
