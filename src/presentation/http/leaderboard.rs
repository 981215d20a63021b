use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::use_cases::auth::current_player::ResolvePlayer;
use crate::application::use_cases::leaderboard::list_leaderboard::ListLeaderboard;
use crate::application::use_cases::leaderboard::submit_score::SubmitScore;
use crate::application::use_cases::leaderboard::user_highscore::UserHighScore;
use crate::bootstrap::app_context::AppContext;
use crate::domain::games::mode::{GameMode, ModeFilter};
use crate::domain::leaderboard::entry::LeaderboardEntry as DomainEntry;
use crate::presentation::http::auth::{self, Bearer};
use crate::presentation::http::error::ApiError;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub score: i32,
    pub mode: GameMode,
    pub date: chrono::DateTime<chrono::Utc>,
}

impl From<DomainEntry> for LeaderboardEntry {
    fn from(e: DomainEntry) -> Self {
        LeaderboardEntry {
            id: e.id,
            user_id: e.user_id,
            username: e.username,
            score: e.score,
            mode: e.mode,
            date: e.date,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LeaderboardResponse {
    pub leaderboard: Vec<LeaderboardEntry>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitScoreRequest {
    pub score: i32,
    pub mode: GameMode,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitScoreResponse {
    pub entry: LeaderboardEntry,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HighScoreResponse {
    pub high_score: i32,
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub mode: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ModeQuery {
    pub mode: Option<String>,
}

/// `None` for a mode no entry can have; callers answer with an empty result.
fn mode_filter(raw: Option<&str>) -> Option<ModeFilter> {
    match ModeFilter::parse(raw) {
        Ok(filter) => Some(filter),
        Err(e) => {
            tracing::debug!(error = %e, "unknown_mode_filter");
            None
        }
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/leaderboard", get(get_leaderboard).post(submit_score))
        .route("/users/me/highscore", get(user_highscore))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/leaderboard", tag = "Leaderboard",
    params(
        ("mode" = Option<String>, Query, description = "all | walls | pass-through"),
        ("limit" = Option<i64>, Query, description = "Max entries (1-100, default 50)")
    ),
    responses((status = 200, body = LeaderboardResponse)))]
pub async fn get_leaderboard(
    State(ctx): State<AppContext>,
    Query(q): Query<LeaderboardQuery>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    ctx.ensure_seeded().await?;
    let Some(filter) = mode_filter(q.mode.as_deref()) else {
        return Ok(Json(LeaderboardResponse {
            leaderboard: Vec::new(),
        }));
    };
    let repo = ctx.leaderboard_repo();
    let uc = ListLeaderboard {
        repo: repo.as_ref(),
    };
    let entries = uc.execute(filter, q.limit).await?;
    Ok(Json(LeaderboardResponse {
        leaderboard: entries.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(post, path = "/leaderboard", tag = "Leaderboard", request_body = SubmitScoreRequest,
    responses(
        (status = 201, body = SubmitScoreResponse),
        (status = 401, body = crate::presentation::http::error::ErrorBody)
    ))]
pub async fn submit_score(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
    Json(req): Json<SubmitScoreRequest>,
) -> Result<(StatusCode, Json<SubmitScoreResponse>), ApiError> {
    ctx.ensure_seeded().await?;
    let users = ctx.user_repo();
    let player = ResolvePlayer {
        repo: users.as_ref(),
    }
    .execute(auth::token_user(&ctx.cfg, bearer))
    .await?
    .ok_or_else(|| ApiError::unauthorized("User not found"))?;

    let repo = ctx.leaderboard_repo();
    let uc = SubmitScore {
        repo: repo.as_ref(),
    };
    let entry = uc.execute(&player, req.score, req.mode).await?;
    Ok((
        StatusCode::CREATED,
        Json(SubmitScoreResponse {
            entry: entry.into(),
        }),
    ))
}

#[utoipa::path(get, path = "/users/me/highscore", tag = "Leaderboard",
    params(("mode" = Option<String>, Query, description = "all | walls | pass-through")),
    responses((status = 200, body = HighScoreResponse)))]
pub async fn user_highscore(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
    Query(q): Query<ModeQuery>,
) -> Result<Json<HighScoreResponse>, ApiError> {
    ctx.ensure_seeded().await?;
    let Some(filter) = mode_filter(q.mode.as_deref()) else {
        return Ok(Json(HighScoreResponse { high_score: 0 }));
    };
    let users = ctx.user_repo();
    let player = ResolvePlayer {
        repo: users.as_ref(),
    }
    .execute(auth::token_user(&ctx.cfg, bearer))
    .await?;

    let repo = ctx.leaderboard_repo();
    let uc = UserHighScore {
        repo: repo.as_ref(),
    };
    let high_score = uc.execute(player.as_ref(), filter).await?;
    Ok(Json(HighScoreResponse { high_score }))
}
