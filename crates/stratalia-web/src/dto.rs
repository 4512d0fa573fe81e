use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use stratalia_core::catalog::{
    KnowledgeFilter, KnowledgeItem, KnowledgeLevel, KnowledgeType, WordFeedback,
};
use stratalia_core::points::{PointsAward, UserPoints};
use stratalia_core::quiz::{QuizOutcome, QuizRecord, QuizSummary, WrongAnswer};
use stratalia_core::ratelimit::{LimiterStats, RateLimitPolicy};
use stratalia_core::challenges::{ChallengeStatus, ChallengeType};
use stratalia_core::translate::{Translation, Vote, Votes};
use stratalia_core::validation::{is_person_name, is_slang_word, password_problem};
use stratalia_core::{
    Account, Decision, Difficulty, Direction, Period, QuizQuestion, SlangWord, Submission,
    SubmissionStatus,
};
use validator::{Validate, ValidationError};

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

fn validate_password(password: &str) -> Result<(), ValidationError> {
    match password_problem(password) {
        Some(problem) => Err(invalid("password", problem)),
        None => Ok(()),
    }
}

fn validate_person_name(name: &str) -> Result<(), ValidationError> {
    if is_person_name(name.trim()) {
        Ok(())
    } else {
        Err(invalid(
            "full_name",
            "Naam mag alleen letters, spaties, koppeltekens, apostroffen en punten bevatten",
        ))
    }
}

fn validate_terms(accepted: &bool) -> Result<(), ValidationError> {
    if *accepted {
        Ok(())
    } else {
        Err(invalid("terms_accepted", "Je moet akkoord gaan met de voorwaarden"))
    }
}

fn validate_slang_word(word: &str) -> Result<(), ValidationError> {
    if is_slang_word(word.trim()) {
        Ok(())
    } else {
        Err(invalid(
            "word",
            "Woord mag alleen letters, spaties, koppeltekens en apostroffen bevatten",
        ))
    }
}

fn validate_search_query(query: &str) -> Result<(), ValidationError> {
    if query.trim().chars().count() > 100 {
        Err(invalid("query", "Zoekterm mag maximaal 100 tekens lang zijn"))
    } else {
        Ok(())
    }
}

fn validate_status_filter(status: &str) -> Result<(), ValidationError> {
    match status {
        "all" | "pending" | "approved" | "rejected" => Ok(()),
        _ => Err(invalid(
            "status",
            "Status moet all, pending, approved of rejected zijn",
        )),
    }
}

// --- Auth ---

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        email(message = "Ongeldig e-mailadres"),
        length(min = 5, max = 100, message = "E-mailadres moet tussen 5 en 100 tekens lang zijn")
    )]
    pub email: String,
    #[validate(custom(function = "validate_password"))]
    pub password: String,
    #[validate(
        length(min = 2, max = 100, message = "Naam moet tussen 2 en 100 tekens lang zijn"),
        custom(function = "validate_person_name")
    )]
    pub full_name: String,
    #[serde(default)]
    #[validate(custom(function = "validate_terms"))]
    pub terms_accepted: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Ongeldig e-mailadres"))]
    pub email: String,
    #[validate(length(min = 1, max = 128, message = "Wachtwoord is verplicht"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub expires_at: u64,
    pub user: Account,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: Account,
    pub points: Option<UserPoints>,
}

// --- Words ---

#[derive(Debug, Deserialize, Validate)]
pub struct SearchQuery {
    #[serde(default, alias = "q")]
    #[validate(custom(function = "validate_search_query"))]
    pub query: String,
    #[serde(default = "default_search_limit")]
    #[validate(range(min = 1, max = 50, message = "Limiet moet tussen 1 en 50 liggen"))]
    pub limit: usize,
}

fn default_search_limit() -> usize {
    10
}

#[derive(Debug, Deserialize, Validate)]
pub struct WordsQuery {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Pagina moet minimaal 1 zijn"))]
    pub page: usize,
    #[serde(default = "default_words_limit")]
    #[validate(range(min = 1, max = 100, message = "Limiet moet tussen 1 en 100 liggen"))]
    pub limit: usize,
}

fn default_page() -> usize {
    1
}

fn default_words_limit() -> usize {
    20
}

#[derive(Debug, Serialize)]
pub struct WordsPage {
    pub words: Vec<SlangWord>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub total_pages: usize,
}

#[derive(Debug, Serialize)]
pub struct WordDetail {
    #[serde(flatten)]
    pub word: SlangWord,
    pub related: Vec<SlangWord>,
    pub feedback: WordFeedback,
}

#[derive(Debug, Deserialize, Validate)]
pub struct DailyQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct DailyWordResponse {
    pub date: NaiveDate,
    pub word: SlangWord,
}

#[derive(Debug, Deserialize, Validate)]
pub struct DailyLearnRequest {
    pub word_id: Option<String>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct DailyLearnResponse {
    pub date: NaiveDate,
    pub word_id: String,
    /// `false` when this date was already completed.
    pub newly_completed: bool,
    pub award: Option<PointsAward>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct FeedbackRequest {
    #[validate(length(min = 1, max = 50, message = "Woord moet tussen 1 en 50 tekens lang zijn"))]
    pub word: String,
    #[validate(length(max = 500, message = "Betekenis mag maximaal 500 tekens lang zijn"))]
    pub meaning: Option<String>,
    pub helpful: bool,
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub word: String,
    pub feedback: WordFeedback,
}

// --- Translation ---

#[derive(Debug, Deserialize, Validate)]
pub struct TranslateRequest {
    #[validate(length(min = 1, max = 500, message = "Tekst moet tussen 1 en 500 tekens lang zijn"))]
    pub text: String,
    pub direction: Direction,
    #[validate(length(max = 200, message = "Context mag maximaal 200 tekens lang zijn"))]
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub original: String,
    pub direction: Direction,
    #[serde(flatten)]
    pub translation: Translation,
}

fn validate_single_vote(req: &TranslationFeedbackRequest) -> Result<(), ValidationError> {
    if req.upvote == req.downvote {
        return Err(invalid("vote", "Kies een upvote of een downvote"));
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_single_vote"))]
pub struct TranslationFeedbackRequest {
    #[validate(length(min = 1, max = 500, message = "Zin moet tussen 1 en 500 tekens lang zijn"))]
    pub phrase: String,
    #[validate(length(min = 1, max = 500, message = "Vertaling moet tussen 1 en 500 tekens lang zijn"))]
    pub translation: String,
    #[serde(default)]
    pub upvote: bool,
    #[serde(default)]
    pub downvote: bool,
}

impl TranslationFeedbackRequest {
    pub fn vote(&self) -> Vote {
        if self.upvote {
            Vote::Up
        } else {
            Vote::Down
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TranslationFeedbackResponse {
    pub phrase: String,
    pub translation: String,
    #[serde(flatten)]
    pub votes: Votes,
}

// --- Quiz ---

#[derive(Debug, Deserialize, Validate)]
pub struct QuizQuery {
    pub difficulty: Option<Difficulty>,
    #[serde(default = "default_quiz_limit")]
    #[validate(range(min = 1, max = 20, message = "Aantal vragen moet tussen 1 en 20 liggen"))]
    pub limit: usize,
}

fn default_quiz_limit() -> usize {
    5
}

/// A question as shown to the player: the correct answer is mixed into the
/// options and not marked.
#[derive(Debug, Serialize)]
pub struct QuizQuestionDto {
    pub id: String,
    pub word: String,
    pub question_text: String,
    pub options: Vec<String>,
    pub difficulty: Difficulty,
}

impl QuizQuestionDto {
    pub fn shuffled<R: Rng + ?Sized>(question: &QuizQuestion, rng: &mut R) -> Self {
        let mut options = Vec::with_capacity(question.wrong_answers.len() + 1);
        options.push(question.correct_answer.clone());
        options.extend(question.wrong_answers.iter().cloned());
        options.shuffle(rng);
        Self {
            id: question.id.clone(),
            word: question.word.clone(),
            question_text: question.question_text.clone(),
            options,
            difficulty: question.difficulty,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub questions: Vec<QuizQuestionDto>,
    pub total: usize,
    pub difficulty: Option<Difficulty>,
}

fn validate_quiz_check(req: &QuizCheckRequest) -> Result<(), ValidationError> {
    let mut seen = std::collections::HashSet::new();
    if !req.question_ids.iter().all(|id| seen.insert(id.as_str())) {
        return Err(invalid("question_ids", "Elke vraag mag maar één keer voorkomen"));
    }
    let count = if req.question_ids.is_empty() {
        req.answers.len()
    } else {
        req.question_ids.len()
    };
    match count {
        0 => Err(invalid("answers", "Er moet minimaal 1 antwoord zijn")),
        1..=50 => Ok(()),
        _ => Err(invalid("answers", "Maximaal 50 vragen per quiz")),
    }
}

#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_quiz_check"))]
pub struct QuizCheckRequest {
    /// Questions that were shown. Defaults to the keys of `answers`.
    #[serde(default)]
    pub question_ids: Vec<String>,
    /// Question id to the chosen option.
    #[serde(default)]
    pub answers: HashMap<String, String>,
    #[serde(default)]
    pub time_taken_ms: u64,
}

impl QuizCheckRequest {
    pub fn question_ids(&self) -> Vec<String> {
        if self.question_ids.is_empty() {
            let mut ids: Vec<String> = self.answers.keys().cloned().collect();
            ids.sort();
            ids
        } else {
            self.question_ids.clone()
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuizCheckResponse {
    #[serde(flatten)]
    pub outcome: QuizOutcome,
    /// Set when the result was saved for a signed-in user.
    pub award: Option<PointsAward>,
}

fn validate_score_within_total(req: &QuizResultRequest) -> Result<(), ValidationError> {
    if req.score > req.total_questions {
        Err(invalid(
            "score",
            "Score kan niet hoger zijn dan het totaal aantal vragen",
        ))
    } else {
        Ok(())
    }
}

#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_score_within_total"))]
pub struct QuizResultRequest {
    pub score: u32,
    #[validate(range(min = 1, max = 50, message = "Aantal vragen moet tussen 1 en 50 liggen"))]
    pub total_questions: u32,
    #[validate(range(min = 0.0, max = 100.0, message = "Percentage moet tussen 0 en 100 liggen"))]
    pub percentage: f64,
    /// Seconds.
    pub time_taken: u64,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub questions: Vec<String>,
    #[serde(default)]
    pub correct_answers: Vec<String>,
    #[serde(default)]
    pub wrong_answers: Vec<WrongAnswer>,
}

#[derive(Debug, Serialize)]
pub struct QuizResultResponse {
    pub result: QuizRecord,
    /// `None` when the result earned no points.
    pub award: Option<PointsAward>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct QuizHistoryQuery {
    #[serde(default = "default_history_limit")]
    #[validate(range(min = 1, max = 50, message = "Limiet moet tussen 1 en 50 liggen"))]
    pub limit: usize,
}

fn default_history_limit() -> usize {
    10
}

#[derive(Debug, Serialize)]
pub struct QuizHistoryResponse {
    pub results: Vec<QuizRecord>,
    pub summary: QuizSummary,
}

// --- Learning ---

#[derive(Debug, Deserialize, Validate)]
pub struct LearningRequest {
    #[validate(length(min = 1, message = "Woord ID is verplicht"))]
    pub word_id: String,
    pub difficulty: Difficulty,
    /// Milliseconds.
    #[serde(alias = "response_time_ms")]
    pub response_time: u64,
    pub correct: bool,
    #[validate(range(min = 1, message = "Aantal pogingen moet minimaal 1 zijn"))]
    pub attempts: u32,
}

// --- Gamification ---

#[derive(Debug, Deserialize, Validate)]
pub struct PointsQuery {
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AwardPointsRequest {
    #[validate(range(min = 1, max = 1000, message = "Punten moeten tussen 1 en 1000 liggen"))]
    pub points: u32,
    #[validate(length(min = 1, max = 50, message = "Actie type is verplicht"))]
    pub action_type: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LeaderboardQuery {
    #[serde(default)]
    pub period: Period,
    #[serde(default = "default_leaderboard_limit")]
    #[validate(range(min = 1, max = 100, message = "Limiet moet tussen 1 en 100 liggen"))]
    pub limit: usize,
}

fn default_leaderboard_limit() -> usize {
    10
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChallengesQuery {
    #[serde(rename = "type")]
    pub kind: Option<ChallengeType>,
    pub status: Option<ChallengeStatus>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChallengeProgressRequest {
    #[validate(length(min = 1, max = 100, message = "Uitdaging is verplicht"))]
    pub challenge_id: String,
    /// Ask for completion; refused unless the target is reached.
    #[serde(default)]
    pub completed: bool,
}

// --- Knowledge ---

#[derive(Debug, Deserialize, Validate)]
pub struct KnowledgeQuery {
    #[serde(rename = "type")]
    pub kind: Option<KnowledgeType>,
    pub difficulty: Option<KnowledgeLevel>,
    #[validate(length(max = 50, message = "Categorie mag maximaal 50 tekens lang zijn"))]
    pub category: Option<String>,
    /// Comma separated.
    pub tags: Option<String>,
    #[serde(default = "default_knowledge_limit")]
    #[validate(range(min = 1, max = 50, message = "Limiet moet tussen 1 en 50 liggen"))]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

fn default_knowledge_limit() -> usize {
    10
}

impl KnowledgeQuery {
    pub fn to_filter(&self) -> KnowledgeFilter {
        KnowledgeFilter {
            kind: self.kind,
            difficulty: self.difficulty,
            category: self.category.clone(),
            tags: self
                .tags
                .as_deref()
                .unwrap_or_default()
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
            offset: self.offset,
            limit: self.limit,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct KnowledgeList {
    pub items: Vec<KnowledgeItem>,
    pub count: usize,
    pub offset: usize,
    pub limit: usize,
}

#[derive(Debug, Deserialize, Validate)]
pub struct KnowledgeSearchQuery {
    #[validate(length(min = 1, max = 100, message = "Zoekterm moet tussen 1 en 100 tekens lang zijn"))]
    pub q: String,
    #[serde(default = "default_knowledge_limit")]
    #[validate(range(min = 1, max = 50, message = "Limiet moet tussen 1 en 50 liggen"))]
    pub limit: usize,
}

// --- Community ---

#[derive(Debug, Deserialize, Validate)]
pub struct SubmissionRequest {
    #[validate(
        length(min = 1, max = 50, message = "Woord moet tussen 1 en 50 tekens lang zijn"),
        custom(function = "validate_slang_word")
    )]
    pub word: String,
    #[validate(length(min = 5, max = 500, message = "Definitie moet tussen 5 en 500 tekens lang zijn"))]
    pub definition: String,
    #[validate(length(min = 5, max = 300, message = "Voorbeeld moet tussen 5 en 300 tekens lang zijn"))]
    pub example: Option<String>,
    #[validate(length(max = 200, message = "Context mag maximaal 200 tekens lang zijn"))]
    pub context: Option<String>,
    #[validate(length(max = 100, message = "Bron mag maximaal 100 tekens lang zijn"))]
    pub source: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubmissionList {
    pub submissions: Vec<Submission>,
    pub count: usize,
}

// --- Admin ---

#[derive(Debug, Deserialize, Validate)]
pub struct SubmissionsQuery {
    #[serde(default = "default_status_filter")]
    #[validate(custom(function = "validate_status_filter"))]
    pub status: String,
    #[serde(default = "default_admin_limit")]
    #[validate(range(min = 1, max = 100, message = "Limiet moet tussen 1 en 100 liggen"))]
    pub limit: usize,
}

fn default_status_filter() -> String {
    "pending".to_string()
}

fn default_admin_limit() -> usize {
    50
}

impl SubmissionsQuery {
    /// `None` lists every status.
    pub fn status_filter(&self) -> Option<SubmissionStatus> {
        match self.status.as_str() {
            "approved" => Some(SubmissionStatus::Approved),
            "rejected" => Some(SubmissionStatus::Rejected),
            "all" => None,
            _ => Some(SubmissionStatus::Pending),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ModerationRequest {
    pub action: Decision,
    #[validate(length(max = 500, message = "Opmerkingen mogen maximaal 500 tekens lang zijn"))]
    pub review_notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct BlockRequest {
    #[validate(length(max = 200, message = "Reden mag maximaal 200 tekens lang zijn"))]
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UnblockClientRequest {
    #[validate(length(min = 1, max = 64, message = "Fingerprint is verplicht"))]
    pub fingerprint: String,
}

#[derive(Debug, Serialize)]
pub struct RateLimitOverview {
    #[serde(flatten)]
    pub stats: LimiterStats,
    pub policies: BTreeMap<&'static str, RateLimitPolicy>,
}

#[derive(Debug, Serialize)]
pub struct UnblockResponse {
    pub fingerprint: String,
    pub unblocked_entries: usize,
}

// --- Health ---

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_secs: u64,
    pub words: usize,
    pub quiz_questions: usize,
    pub knowledge_items: usize,
    pub accounts: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn register(password: &str, name: &str, terms: bool) -> RegisterRequest {
        RegisterRequest {
            email: "sanne@example.nl".to_string(),
            password: password.to_string(),
            full_name: name.to_string(),
            terms_accepted: terms,
        }
    }

    #[test]
    fn register_accepts_strong_password() {
        assert!(register("Straattaal1!", "Sanne de Vries", true).validate().is_ok());
    }

    #[test]
    fn register_rejects_weak_password_and_terms() {
        let errors = register("zwak", "Sanne", false).validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("terms_accepted"));
    }

    #[test]
    fn register_rejects_digits_in_name() {
        let errors = register("Straattaal1!", "R2D2", true).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("full_name"));
    }

    #[test]
    fn quiz_result_score_cannot_exceed_total() {
        let req = QuizResultRequest {
            score: 6,
            total_questions: 5,
            percentage: 100.0,
            time_taken: 30,
            difficulty: Difficulty::Easy,
            questions: Vec::new(),
            correct_answers: Vec::new(),
            wrong_answers: Vec::new(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn quiz_check_falls_back_to_answer_keys() {
        let req: QuizCheckRequest =
            serde_json::from_str(r#"{"answers":{"2":"a","1":"b"}}"#).unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.question_ids(), vec!["1".to_string(), "2".to_string()]);

        let empty: QuizCheckRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.validate().is_err());
    }

    #[test]
    fn translation_feedback_needs_exactly_one_vote() {
        let parse = |body: &str| serde_json::from_str::<TranslationFeedbackRequest>(body).unwrap();

        let up = parse(r#"{"phrase":"dope","translation":"geweldig","upvote":true}"#);
        assert!(up.validate().is_ok());
        assert_eq!(up.vote(), Vote::Up);

        let down = parse(r#"{"phrase":"dope","translation":"geweldig","downvote":true}"#);
        assert_eq!(down.vote(), Vote::Down);

        assert!(parse(r#"{"phrase":"dope","translation":"geweldig"}"#).validate().is_err());
        assert!(parse(r#"{"phrase":"dope","translation":"geweldig","upvote":true,"downvote":true}"#)
            .validate()
            .is_err());
        assert!(parse(r#"{"phrase":"","translation":"geweldig","upvote":true}"#).validate().is_err());
    }

    #[test]
    fn quiz_check_rejects_repeated_question_ids() {
        let req: QuizCheckRequest =
            serde_json::from_str(r#"{"question_ids":["1","2","1"],"answers":{"1":"a"}}"#).unwrap();
        let errors = req.validate().unwrap_err();
        assert!(errors.to_string().contains("question_ids"));
    }

    #[test]
    fn submission_word_must_be_slang_chars() {
        let req = SubmissionRequest {
            word: "<b>".to_string(),
            definition: "iets cools".to_string(),
            example: None,
            context: None,
            source: None,
        };
        assert!(req.validate().unwrap_err().field_errors().contains_key("word"));
    }

    #[test]
    fn knowledge_tags_are_split_on_commas() {
        let query: KnowledgeQuery =
            serde_json::from_str(r#"{"type":"video","tags":"muziek, ,cultuur"}"#).unwrap();
        let filter = query.to_filter();
        assert_eq!(filter.kind, Some(KnowledgeType::Video));
        assert_eq!(filter.tags, vec!["muziek", "cultuur"]);
        assert_eq!(filter.limit, 10);
    }

    #[test]
    fn submissions_query_defaults_to_pending() {
        let query: SubmissionsQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.status_filter(), Some(SubmissionStatus::Pending));
        let all: SubmissionsQuery = serde_json::from_str(r#"{"status":"all"}"#).unwrap();
        assert_eq!(all.status_filter(), None);
        let bad: SubmissionsQuery = serde_json::from_str(r#"{"status":"x"}"#).unwrap();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn shuffled_question_contains_every_option() {
        let question = QuizQuestion {
            id: "1".to_string(),
            word: "swag".to_string(),
            question_text: "Wat betekent swag?".to_string(),
            correct_answer: "stijl".to_string(),
            wrong_answers: vec!["honger".to_string(), "regen".to_string()],
            difficulty: Difficulty::Easy,
        };
        let mut rng = StdRng::seed_from_u64(7);
        let dto = QuizQuestionDto::shuffled(&question, &mut rng);
        let mut options = dto.options.clone();
        options.sort();
        assert_eq!(options, vec!["honger", "regen", "stijl"]);
        let json = serde_json::to_value(&dto).unwrap();
        assert!(json.get("correct_answer").is_none());
    }
}
