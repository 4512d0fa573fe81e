use stratalia_core::learning::{self, Answer, LearningPlan};

use crate::dto::LearningRequest;
use crate::envelope::ApiResponse;
use crate::extract::ValidatedJson;

pub async fn adaptive(
    ValidatedJson(body): ValidatedJson<LearningRequest>,
) -> ApiResponse<LearningPlan> {
    let answer = Answer {
        word_id: body.word_id,
        difficulty: body.difficulty,
        response_time_ms: body.response_time,
        correct: body.correct,
        attempts: body.attempts,
    };
    ApiResponse::ok(learning::plan(
        &answer,
        chrono::Utc::now(),
        &mut rand::thread_rng(),
    ))
}
