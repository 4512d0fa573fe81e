mod admin;
mod auth_handlers;
mod community;
mod gamification;
mod health;
mod knowledge;
mod learning;
mod profile;
mod quiz;
mod translate;
mod words;

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use stratalia_core::Category;

use crate::middleware::throttle::{throttle, Throttle};
use crate::state::AppState;

/// Applies the per-client limiter for `category` to every route in `routes`.
fn limited(state: &AppState, category: Category, routes: Router<AppState>) -> Router<AppState> {
    routes.route_layer(from_fn_with_state(
        Throttle {
            limiter: state.limiter.clone(),
            category,
        },
        throttle,
    ))
}

/// Register, login and logout. Kept apart so the caller can put the per-IP
/// governor in front of them.
pub fn auth_router(state: &AppState) -> Router<AppState> {
    limited(
        state,
        Category::Auth,
        Router::new()
            .route("/auth/register", post(auth_handlers::register))
            .route("/auth/login", post(auth_handlers::login))
            .route("/auth/logout", post(auth_handlers::logout)),
    )
}

/// Every other API route.
pub fn router(state: &AppState) -> Router<AppState> {
    let default = Router::new()
        .route("/words", get(words::list))
        .route("/words/daily", get(words::daily))
        .route("/words/daily/learn", post(words::learn_daily))
        .route("/words/feedback", post(words::feedback))
        .route("/words/{word}", get(words::detail))
        .route("/learning/adaptive", post(learning::adaptive))
        .route(
            "/gamification/points",
            get(gamification::points).post(gamification::award),
        )
        .route("/gamification/leaderboard", get(gamification::leaderboard))
        .route("/gamification/challenges", get(gamification::challenges))
        .route("/challenges/progress", post(gamification::challenge_progress))
        .route("/profile/stats", get(profile::stats))
        .route("/profile/achievements", get(profile::achievements))
        .route("/knowledge", get(knowledge::list))
        .route("/knowledge/stats", get(knowledge::stats))
        .route("/knowledge/{id}", get(knowledge::item))
        .route("/knowledge/{id}/like", post(knowledge::like))
        .route("/community/submit", post(community::submit))
        .route("/community/submissions/my", get(community::mine))
        .route("/auth/me", get(auth_handlers::me));

    let search = Router::new()
        .route("/words/search", get(words::search))
        .route("/knowledge/search", get(knowledge::search));

    let translate = Router::new()
        .route("/translate", post(translate::translate))
        .route("/translations/feedback", post(translate::feedback));

    let quiz = Router::new()
        .route("/quiz", get(quiz::questions))
        .route("/quiz/stats", get(quiz::stats))
        .route("/quiz/check", post(quiz::check))
        .route(
            "/quiz/results",
            get(quiz::history).post(quiz::submit_result),
        );

    let admin = Router::new()
        .route("/admin/submissions", get(admin::submissions))
        .route("/admin/submissions/{id}/moderate", post(admin::moderate))
        .route("/admin/moderation/stats", get(admin::moderation_stats))
        .route("/admin/users/{id}/block", post(admin::block_user))
        .route("/admin/users/{id}/unblock", post(admin::unblock_user))
        .route("/admin/rate-limits", get(admin::rate_limits))
        .route("/admin/rate-limits/unblock", post(admin::unblock_client));

    Router::new()
        .route("/health", get(health::health))
        .merge(limited(state, Category::Default, default))
        .merge(limited(state, Category::Search, search))
        .merge(limited(state, Category::Translate, translate))
        .merge(limited(state, Category::Quiz, quiz))
        .merge(limited(state, Category::Admin, admin))
}
