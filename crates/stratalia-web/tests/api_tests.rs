use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use stratalia_web::config::{AdminConfig, ServerConfig};
use stratalia_web::state::AppState;
use stratalia_web::{auth, build_app, seed};
use tower::ServiceExt;

const BROWSER: &str = "Mozilla/5.0 (test)";
const ADMIN_EMAIL: &str = "admin@stratalia.nl";
const ADMIN_PASSWORD: &str = "Beheer123!";

struct TestApp {
    router: Router,
}

fn config() -> ServerConfig {
    let mut config = ServerConfig::default();
    config.auth.jwt_secret = "integration-test-secret-with-enough-length".to_string();
    config
}

impl TestApp {
    fn new() -> Self {
        Self::with_config(config())
    }

    fn with_admin() -> Self {
        let mut config = config();
        config.auth.admins.push(AdminConfig {
            email: ADMIN_EMAIL.to_string(),
            full_name: "Beheerder".to_string(),
            password_hash: auth::password::hash_password(ADMIN_PASSWORD).unwrap(),
        });
        Self::with_config(config)
    }

    fn with_config(config: ServerConfig) -> Self {
        let state = AppState::new(config, seed::embedded().unwrap()).unwrap();
        Self {
            router: build_app(state).unwrap(),
        }
    }

    async fn send(&self, req: Request<Body>) -> (StatusCode, Value, Response<()>) {
        let response = self.router.clone().oneshot(req).await.unwrap();
        let (parts, body) = response.into_parts();
        let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (parts.status, json, Response::from_parts(parts, ()))
    }

    async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let (status, body, _) = self.send(request(Method::GET, uri, token, None, "198.51.100.1")).await;
        (status, body)
    }

    async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        let (status, body, _) = self
            .send(request(Method::POST, uri, token, Some(body), "198.51.100.1"))
            .await;
        (status, body)
    }

    /// Registers a user from its own address and returns the token.
    async fn register(&self, email: &str, ip: &str) -> String {
        let body = json!({
            "email": email,
            "password": "Straattaal1!",
            "full_name": "Sanne de Vries",
            "terms_accepted": true
        });
        let (status, body, _) = self
            .send(request(Method::POST, "/api/auth/register", None, Some(body), ip))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["token"].as_str().unwrap().to_string()
    }

    async fn admin_token(&self) -> String {
        let body = json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD });
        let (status, body, _) = self
            .send(request(Method::POST, "/api/auth/login", None, Some(body), "198.51.100.250"))
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["data"]["token"].as_str().unwrap().to_string()
    }
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>, ip: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-forwarded-for", ip)
        .header(header::USER_AGENT, BROWSER)
        .header(header::REFERER, "https://stratalia.nl/");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

#[tokio::test]
async fn health_reports_content_and_headers() {
    let app = TestApp::new();
    let (status, body, response) = app
        .send(request(Method::GET, "/api/health", None, None, "198.51.100.1"))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["words"], 65);
    assert_eq!(body["data"]["quiz_questions"], 50);
    assert!(body["meta"]["timestamp"].is_string());
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
}

#[tokio::test]
async fn unknown_route_uses_error_envelope() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/does-not-exist", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn search_is_cached_on_second_call() {
    let app = TestApp::new();
    let (status, body, response) = app
        .send(request(Method::GET, "/api/words/search?query=swag", None, None, "198.51.100.1"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["source"], "database");
    assert_eq!(body["data"]["results"][0]["word"], "swag");
    assert_eq!(body["data"]["results"][0]["match_type"], "exact");
    assert_eq!(response.headers()["x-ratelimit-limit"], "100");

    let (_, cached) = app.get("/api/words/search?query=SWAG", None).await;
    assert_eq!(cached["meta"]["source"], "cache");
    assert_eq!(cached["data"]["total"], body["data"]["total"]);
}

#[tokio::test]
async fn empty_search_prompts_for_a_term() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/words/search?query=", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["message"], "Voer een zoekterm in");
    assert!(!body["data"]["suggestions"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn overlong_search_is_rejected() {
    let app = TestApp::new();
    let uri = format!("/api/words/search?query={}", "a".repeat(101));
    let (status, body) = app.get(&uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["field"], "query");
}

#[tokio::test]
async fn words_are_paginated() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/words?page=2&limit=5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["words"].as_array().unwrap().len(), 5);
    assert_eq!(body["data"]["words"][0]["word"], "dope");
    assert_eq!(body["data"]["total"], 65);
    assert_eq!(body["data"]["total_pages"], 13);

    let (status, _) = app.get("/api/words?limit=101", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn word_detail_by_name_and_missing_word() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/words/Swag", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["word"], "swag");
    assert!(body["data"]["related"].is_array());

    let (status, body) = app.get("/api/words/onbestaandwoord", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn daily_word_is_stable_per_date() {
    let app = TestApp::new();
    let (status, first) = app.get("/api/words/daily?date=2024-03-01", None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, second) = app.get("/api/words/daily?date=2024-03-01", None).await;
    assert_eq!(first["data"]["word"]["id"], second["data"]["word"]["id"]);
    assert_eq!(first["data"]["date"], "2024-03-01");
}

#[tokio::test]
async fn learning_daily_word_awards_points_once() {
    let app = TestApp::new();
    let token = app.register("daily@example.nl", "198.51.100.10").await;

    let (status, body) = app.post("/api/words/daily/learn", Some(&token), json!({})).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["newly_completed"], true);
    assert_eq!(body["data"]["award"]["points_earned"], 5);

    let (_, again) = app.post("/api/words/daily/learn", Some(&token), json!({})).await;
    assert_eq!(again["data"]["newly_completed"], false);
    assert!(again["data"]["award"].is_null());

    let (status, _) = app.post("/api/words/daily/learn", None, json!({})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn daily_word_from_last_week_cannot_be_learned() {
    let app = TestApp::new();
    let token = app.register("oud@example.nl", "198.51.100.13").await;
    let last_week = chrono::Utc::now().date_naive() - chrono::Days::new(7);

    let (status, body) = app
        .post("/api/words/daily/learn", Some(&token), json!({ "date": last_week }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    assert_eq!(body["error"]["field"], "date");

    let yesterday = chrono::Utc::now().date_naive() - chrono::Days::new(1);
    let (status, body) = app
        .post("/api/words/daily/learn", Some(&token), json!({ "date": yesterday }))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["newly_completed"], true);
}

#[tokio::test]
async fn translate_to_formal() {
    let app = TestApp::new();
    let (status, body) = app
        .post(
            "/api/translate",
            None,
            json!({ "text": "Dat is swag!", "direction": "to_formal" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(body["data"]["translation"]
        .as_str()
        .unwrap()
        .contains("stijl, cool, stoer"));
    assert_eq!(body["data"]["confidence"], 0.9);
    assert_eq!(body["data"]["direction"], "to_formal");

    let (status, body) = app
        .post("/api/translate", None, json!({ "text": "", "direction": "to_slang" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "text");
}

#[tokio::test]
async fn quiz_hides_correct_answer() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/quiz?limit=3&difficulty=easy", None).await;
    assert_eq!(status, StatusCode::OK);
    let questions = body["data"]["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 3);
    for q in questions {
        assert!(q.get("correct_answer").is_none());
        assert_eq!(q["difficulty"], "easy");
        assert!(q["options"].as_array().unwrap().len() >= 2);
    }

    let (status, _) = app.get("/api/quiz?limit=21", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn quiz_stats_are_cached() {
    let app = TestApp::new();
    let (_, first) = app.get("/api/quiz/stats", None).await;
    assert_eq!(first["data"]["total_questions"], 50);
    assert_eq!(first["meta"]["source"], "database");
    let (_, second) = app.get("/api/quiz/stats", None).await;
    assert_eq!(second["meta"]["source"], "cache");
}

#[tokio::test]
async fn anonymous_quiz_check_scores_without_saving() {
    let app = TestApp::new();
    let (status, body) = app
        .post(
            "/api/quiz/check",
            None,
            json!({
                "question_ids": ["1", "2"],
                "answers": { "1": "stijl, cool, stoer", "2": "fout" },
                "time_taken_ms": 12000
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["score"], 1);
    assert_eq!(body["data"]["total_questions"], 2);
    assert_eq!(body["data"]["percentage"], 50);
    assert_eq!(body["data"]["correct_answers"][0], "swag");
    assert!(body["data"]["award"].is_null());
}

#[tokio::test]
async fn quiz_check_rejects_a_repeated_question() {
    let app = TestApp::new();
    let (status, body) = app
        .post(
            "/api/quiz/check",
            None,
            json!({
                "question_ids": ["1", "1", "1"],
                "answers": { "1": "stijl, cool, stoer" },
                "time_taken_ms": 5000
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn signed_in_quiz_check_is_saved() {
    let app = TestApp::new();
    let token = app.register("quiz@example.nl", "198.51.100.11").await;
    let (status, body) = app
        .post(
            "/api/quiz/check",
            Some(&token),
            json!({ "answers": { "1": "stijl, cool, stoer" }, "time_taken_ms": 10000 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    // (10 + 40) * 1.0 for an easy quiz
    assert_eq!(body["data"]["award"]["points_earned"], 50);

    let (_, history) = app.get("/api/quiz/results", Some(&token)).await;
    assert_eq!(history["data"]["summary"]["total_quizzes"], 1);
    assert_eq!(history["data"]["results"][0]["points_earned"], 50);
}

#[tokio::test]
async fn quiz_result_submission_awards_points() {
    let app = TestApp::new();
    let token = app.register("result@example.nl", "198.51.100.12").await;
    let result = json!({
        "score": 4,
        "total_questions": 5,
        "percentage": 80.0,
        "time_taken": 30,
        "difficulty": "medium",
        "correct_answers": ["swag", "skeer", "lit", "dope"],
        "wrong_answers": [{ "question": "Wat betekent cap?", "selected": "pet", "correct": "lieg" }]
    });
    let (status, body) = app.post("/api/quiz/results", Some(&token), result).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    // (40 + 20) * 1.5
    assert_eq!(body["data"]["award"]["points_earned"], 90);

    let (status, body) = app
        .post(
            "/api/quiz/results",
            Some(&token),
            json!({ "score": 6, "total_questions": 5, "percentage": 100.0,
                    "time_taken": 10, "difficulty": "easy" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, _) = app.get("/api/quiz/results", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn adaptive_learning_plan() {
    let app = TestApp::new();
    let (status, body) = app
        .post(
            "/api/learning/adaptive",
            None,
            json!({ "word_id": "1", "difficulty": "easy", "response_time": 3000,
                    "correct": true, "attempts": 1 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["mastery_score"], 1.0);
    assert_eq!(body["data"]["next_difficulty"], "medium");
    assert_eq!(body["data"]["next_review_hours"], 168);

    let (status, body) = app
        .post(
            "/api/learning/adaptive",
            None,
            json!({ "word_id": "1", "difficulty": "easy", "response_time": 3000,
                    "correct": true, "attempts": 0 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "attempts");
}

#[tokio::test]
async fn auth_flow_register_me_logout() {
    let app = TestApp::new();
    let token = app.register("flow@example.nl", "198.51.100.13").await;

    let (status, me) = app.get("/api/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["data"]["user"]["email"], "flow@example.nl");
    assert_eq!(me["data"]["user"]["role"], "user");
    assert!(me["data"]["user"].get("password_hash").is_none());

    let (status, _) = app.post("/api/auth/logout", Some(&token), json!({})).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.get("/api/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn register_rejects_duplicates_and_weak_passwords() {
    let app = TestApp::new();
    app.register("dubbel@example.nl", "198.51.100.14").await;

    let (status, body) = app
        .post(
            "/api/auth/register",
            None,
            json!({ "email": "DUBBEL@example.nl", "password": "Straattaal1!",
                    "full_name": "Sanne", "terms_accepted": true }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");

    let (status, body) = app
        .post(
            "/api/auth/register",
            None,
            json!({ "email": "zwak@example.nl", "password": "zwakwachtwoord",
                    "full_name": "Sanne", "terms_accepted": true }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "password");
}

#[tokio::test]
async fn login_with_wrong_password_fails() {
    let app = TestApp::new();
    app.register("login@example.nl", "198.51.100.15").await;
    let (status, body) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": "login@example.nl", "password": "Verkeerd1!" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn malformed_json_is_a_validation_error() {
    let app = TestApp::new();
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/translate")
        .header("x-forwarded-for", "198.51.100.1")
        .header(header::USER_AGENT, BROWSER)
        .header(header::REFERER, "https://stratalia.nl/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body, _) = app.send(req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn points_and_leaderboard() {
    let app = TestApp::new();
    let token = app.register("punten@example.nl", "198.51.100.16").await;

    let (status, body) = app
        .post(
            "/api/gamification/points",
            Some(&token),
            json!({ "points": 150, "action_type": "practice" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["total_points"], 150);
    assert_eq!(body["data"]["new_level"], 2);
    assert_eq!(body["data"]["leveled_up"], true);

    let (_, mine) = app.get("/api/gamification/points", Some(&token)).await;
    assert_eq!(mine["data"]["total_points"], 150);
    assert_eq!(mine["data"]["current_streak"], 1);

    let (status, _) = app
        .get("/api/gamification/points?user_id=user-1", Some(&token))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .post(
            "/api/gamification/points",
            Some(&token),
            json!({ "points": 0, "action_type": "practice" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, board) = app.get("/api/gamification/leaderboard?limit=3", None).await;
    assert_eq!(status, StatusCode::OK);
    let entries = board["data"].as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["rank"], 1);
    assert_eq!(entries[0]["display_name"], "Ahmed Hassan");
}

#[tokio::test]
async fn knowledge_listing_detail_and_likes() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/knowledge?type=video&limit=50", None).await;
    assert_eq!(status, StatusCode::OK);
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 4);
    assert!(items.iter().all(|i| i["type"] == "video"));

    let (status, body) = app.get("/api/knowledge/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], "1");

    let (status, _) = app.get("/api/knowledge/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.post("/api/knowledge/1/like", None, json!({})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = app.register("likes@example.nl", "198.51.100.17").await;
    let (_, liked) = app.post("/api/knowledge/1/like", Some(&token), json!({})).await;
    assert_eq!(liked["data"]["result"], "added");
    assert_eq!(liked["data"]["user_liked"], true);
    let (_, unliked) = app.post("/api/knowledge/1/like", Some(&token), json!({})).await;
    assert_eq!(unliked["data"]["result"], "removed");

    let (_, stats) = app.get("/api/knowledge/stats", None).await;
    assert_eq!(stats["data"]["total"], 15);

    let (status, found) = app.get("/api/knowledge/search?q=muziek", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(found["data"]["count"].as_u64().unwrap() >= 1);
}

#[tokio::test]
async fn submission_moderation_adds_word_and_points() {
    let app = TestApp::with_admin();
    let user = app.register("bijdrage@example.nl", "198.51.100.18").await;

    let (status, body) = app
        .post(
            "/api/community/submit",
            Some(&user),
            json!({ "word": "Skrrrt", "definition": "snel weggaan", "example": "Ik ga skrrrt naar huis." }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["word"], "skrrrt");
    assert_eq!(body["data"]["status"], "pending");
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = app
        .post(
            "/api/community/submit",
            None,
            json!({ "word": "swag", "definition": "bestaat al" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, mine) = app.get("/api/community/submissions/my", Some(&user)).await;
    assert_eq!(mine["data"]["count"], 1);

    let (status, _) = app.get("/api/admin/submissions", Some(&user)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let admin = app.admin_token().await;
    let (status, pending) = app.get("/api/admin/submissions", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pending["data"]["count"], 1);

    let uri = format!("/api/admin/submissions/{id}/moderate");
    let (status, body) = app
        .post(&uri, Some(&admin), json!({ "action": "approve", "review_notes": "Top" }))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["submission"]["status"], "approved");
    assert_eq!(body["data"]["award"]["points_earned"], 25);

    let (status, _) = app
        .post(&uri, Some(&admin), json!({ "action": "reject" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, word) = app.get("/api/words/skrrrt", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(word["data"]["meaning"], "snel weggaan");

    let (_, me) = app.get("/api/auth/me", Some(&user)).await;
    assert_eq!(me["data"]["points"]["total_points"], 25);

    let (_, stats) = app.get("/api/admin/moderation/stats", Some(&admin)).await;
    assert_eq!(stats["data"]["approved"], 1);
    assert_eq!(stats["data"]["pending"], 0);
}

#[tokio::test]
async fn blocked_account_is_refused() {
    let app = TestApp::with_admin();
    let user = app.register("geblokkeerd@example.nl", "198.51.100.19").await;
    let (_, me) = app.get("/api/auth/me", Some(&user)).await;
    let user_id = me["data"]["user"]["id"].as_str().unwrap().to_string();

    let admin = app.admin_token().await;
    let (status, body) = app
        .post(
            &format!("/api/admin/users/{user_id}/block"),
            Some(&admin),
            json!({ "reason": "spam" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["blocked"], true);

    let (status, body) = app.get("/api/auth/me", Some(&user)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "FORBIDDEN");

    let (status, _) = app
        .post(&format!("/api/admin/users/{user_id}/unblock"), Some(&admin), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.get("/api/auth/me", Some(&user)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn bot_traffic_is_blocked_and_admin_can_lift_it() {
    let app = TestApp::with_admin();
    let bot = |uri: &str| {
        Request::builder()
            .uri(uri)
            .header("x-forwarded-for", "203.0.113.99")
            .header(header::USER_AGENT, "curl/8.4.0")
            .body(Body::empty())
            .unwrap()
    };

    // The search threshold is five suspicious requests.
    for _ in 0..4 {
        let (status, _, _) = app.send(bot("/api/words/search?query=lit")).await;
        assert_eq!(status, StatusCode::OK);
    }
    let (status, body, response) = app.send(bot("/api/words/search?query=lit")).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"]["code"], "SUSPICIOUS_ACTIVITY_BLOCKED");
    assert_eq!(response.headers()[header::RETRY_AFTER], "180");

    let (_, body, _) = app.send(bot("/api/words/search?query=lit")).await;
    assert_eq!(body["error"]["code"], "CLIENT_BLOCKED");

    let admin = app.admin_token().await;
    let (status, overview) = app.get("/api/admin/rate-limits", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(overview["data"]["blocked_clients"], 1);
    assert_eq!(overview["data"]["policies"]["auth"]["max_requests"], 5);

    let fingerprint = stratalia_core::ratelimit::fingerprint("203.0.113.99", "curl/8.4.0");
    let (status, body) = app
        .post(
            "/api/admin/rate-limits/unblock",
            Some(&admin),
            json!({ "fingerprint": fingerprint }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["unblocked_entries"], 1);

    let (status, _, _) = app.send(bot("/api/words/search?query=lit")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn auth_posts_without_referer_get_blocked() {
    let app = TestApp::new();
    let login = || {
        Request::builder()
            .method(Method::POST)
            .uri("/api/auth/login")
            .header("x-forwarded-for", "203.0.113.50")
            .header(header::USER_AGENT, BROWSER)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({ "email": "niemand@example.nl", "password": "Wachtwoord1!" }).to_string(),
            ))
            .unwrap()
    };

    let (status, _, _) = app.send(login()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, body, _) = app.send(login()).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"]["code"], "SUSPICIOUS_ACTIVITY_BLOCKED");
}

#[tokio::test]
async fn profile_stats_and_achievements_follow_activity() {
    let app = TestApp::new();
    let token = app.register("profiel@example.nl", "198.51.100.20").await;

    let (status, _) = app.get("/api/profile/stats", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    app.post("/api/words/daily/learn", Some(&token), json!({})).await;
    let (status, _) = app
        .post(
            "/api/quiz/check",
            Some(&token),
            json!({ "answers": { "1": "stijl, cool, stoer" }, "time_taken_ms": 10000 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, stats) = app.get("/api/profile/stats", Some(&token)).await;
    assert_eq!(status, StatusCode::OK, "{stats}");
    // 5 for the daily word, 50 for the quiz
    assert_eq!(stats["data"]["total_points"], 55);
    assert_eq!(stats["data"]["words_learned"], 1);
    assert_eq!(stats["data"]["quizzes_completed"], 1);
    assert_eq!(stats["data"]["average_score"], 100.0);
    assert_eq!(stats["data"]["submissions_count"], 0);

    let (status, body) = app.get("/api/profile/achievements", Some(&token)).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let achievements = body["data"]["achievements"].as_array().unwrap();
    assert_eq!(achievements.len(), 13);
    let first_quiz = achievements.iter().find(|a| a["id"] == "first_quiz").unwrap();
    assert_eq!(first_quiz["is_earned"], true);
    assert_eq!(first_quiz["progress"], 1);
    let words = achievements.iter().find(|a| a["id"] == "word_learner_10").unwrap();
    assert_eq!(words["is_earned"], false);
    assert_eq!(words["progress"], 1);
    assert_eq!(words["target"], 10);
    // first_quiz and high_score
    assert_eq!(body["data"]["stats"]["earned_achievements"], 2);
    assert_eq!(body["data"]["stats"]["total_points_from_achievements"], 300);
}

#[tokio::test]
async fn challenges_track_progress_and_pay_once() {
    let app = TestApp::new();

    let (status, board) = app.get("/api/gamification/challenges", None).await;
    assert_eq!(status, StatusCode::OK, "{board}");
    for challenge in board["data"]["challenges"].as_array().unwrap() {
        for field in ["id", "title", "description", "reward_points", "type"] {
            assert!(!challenge[field].is_null(), "{field} missing in {challenge}");
        }
    }
    assert_eq!(board["data"]["user_stats"]["total_challenges_completed"], 0);

    let token = app.register("uitdaging@example.nl", "198.51.100.21").await;
    let (status, _) = app
        .post("/api/challenges/progress", None, json!({ "challenge_id": "daily_word" }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .post(
            "/api/challenges/progress",
            Some(&token),
            json!({ "challenge_id": "daily_word", "completed": true }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");

    app.post("/api/words/daily/learn", Some(&token), json!({})).await;
    let (status, body) = app
        .post(
            "/api/challenges/progress",
            Some(&token),
            json!({ "challenge_id": "daily_word", "completed": true }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["award"]["points_earned"], 10);
    assert_eq!(body["data"]["award"]["action_type"], "challenge_completed");
    assert_eq!(body["data"]["challenge"]["is_completed"], true);

    let (_, again) = app
        .post("/api/challenges/progress", Some(&token), json!({ "challenge_id": "daily_word" }))
        .await;
    assert!(again["data"]["award"].is_null());

    let (status, _) = app
        .post("/api/challenges/progress", Some(&token), json!({ "challenge_id": "onbekend" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app
        .post(
            "/api/challenges/progress",
            Some(&token),
            json!({ "challenge_id": "summer_slang_2024" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, done) = app
        .get("/api/gamification/challenges?status=completed", Some(&token))
        .await;
    assert_eq!(done["data"]["challenges"].as_array().unwrap().len(), 1);
    assert_eq!(done["data"]["challenges"][0]["id"], "daily_word");
    assert_eq!(done["data"]["user_stats"]["total_challenges_completed"], 1);

    let (_, weekly) = app.get("/api/gamification/challenges?type=weekly", Some(&token)).await;
    let weekly = weekly["data"]["challenges"].as_array().unwrap();
    assert!(!weekly.is_empty());
    assert!(weekly.iter().all(|c| c["type"] == "weekly"));
}

#[tokio::test]
async fn translation_feedback_counts_votes() {
    let app = TestApp::new();
    let vote = |kind: &str| {
        json!({ "phrase": "Die outfit is dope", "translation": "die outfit is geweldig", kind: true })
    };

    app.post("/api/translations/feedback", None, vote("upvote")).await;
    app.post("/api/translations/feedback", None, vote("upvote")).await;
    let (status, body) = app.post("/api/translations/feedback", None, vote("downvote")).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["upvotes"], 2);
    assert_eq!(body["data"]["downvotes"], 1);

    let (status, body) = app
        .post(
            "/api/translations/feedback",
            None,
            json!({ "phrase": "dope", "translation": "geweldig", "upvote": true, "downvote": true }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}
