use axum::Router;

use crate::bootstrap::app_context::AppContext;

pub mod auth;
pub mod error;
pub mod games;
pub mod health;
pub mod leaderboard;
pub mod todos;

/// All application routes without middleware; the binary adds CORS, tracing and docs.
pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .merge(health::routes(ctx.clone()))
        .nest("/auth", auth::routes(ctx.clone()))
        .merge(leaderboard::routes(ctx.clone()))
        .merge(games::routes(ctx.clone()))
        .merge(todos::routes(ctx))
}
