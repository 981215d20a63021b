use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::use_cases::auth::current_player::ResolvePlayer;
use crate::application::use_cases::games::end_game::EndGame;
use crate::application::use_cases::games::get_game::GetGame;
use crate::application::use_cases::games::list_active_games::ListActiveGames;
use crate::application::use_cases::games::start_game::StartGame;
use crate::bootstrap::app_context::AppContext;
use crate::domain::games::game::Game;
use crate::domain::games::mode::GameMode;
use crate::presentation::http::auth::{self, Bearer};
use crate::presentation::http::error::ApiError;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameSession {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub mode: GameMode,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub score: Option<i32>,
    pub is_active: bool,
}

impl From<Game> for GameSession {
    fn from(g: Game) -> Self {
        GameSession {
            id: g.id,
            user_id: g.user_id,
            username: g.username,
            mode: g.mode,
            start_time: g.start_time,
            end_time: g.end_time,
            score: g.score,
            is_active: g.is_active,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StartGameRequest {
    pub mode: GameMode,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StartGameResponse {
    pub game_session: GameSession,
}

/// Game fields are merged in when the game exists.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStateResponse {
    pub game_id: i64,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub game: Option<GameSession>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct EndGameRequest {
    #[serde(default)]
    pub score: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EndGameResponse {
    pub game_id: i64,
    pub score: Option<i32>,
    pub end_time: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActiveGame {
    pub id: i64,
    pub username: String,
    pub mode: GameMode,
    pub current_score: i32,
    pub game_start_time: DateTime<Utc>,
    pub is_playing: bool,
}

impl From<Game> for ActiveGame {
    fn from(g: Game) -> Self {
        ActiveGame {
            id: g.id,
            username: g.username,
            mode: g.mode,
            current_score: g.score.unwrap_or(0),
            game_start_time: g.start_time,
            is_playing: g.is_active,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ActiveGamesResponse {
    pub games: Vec<ActiveGame>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/games", post(start_game))
        .route("/games/:id", get(game_state))
        .route("/games/:id/end", post(end_game))
        .route("/active-games", get(active_games))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/games", tag = "Games", request_body = StartGameRequest,
    responses(
        (status = 201, body = StartGameResponse),
        (status = 401, body = crate::presentation::http::error::ErrorBody)
    ))]
pub async fn start_game(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
    Json(req): Json<StartGameRequest>,
) -> Result<(StatusCode, Json<StartGameResponse>), ApiError> {
    ctx.ensure_seeded().await?;
    let users = ctx.user_repo();
    let player = ResolvePlayer {
        repo: users.as_ref(),
    }
    .execute(auth::token_user(&ctx.cfg, bearer))
    .await?
    .ok_or_else(|| ApiError::unauthorized("User not found"))?;

    let repo = ctx.game_repo();
    let uc = StartGame {
        repo: repo.as_ref(),
    };
    let game = uc.execute(&player, req.mode).await?;
    Ok((
        StatusCode::CREATED,
        Json(StartGameResponse {
            game_session: game.into(),
        }),
    ))
}

#[utoipa::path(get, path = "/games/{id}", tag = "Games",
    params(("id" = i64, Path, description = "Game ID")),
    responses((status = 200, description = "Game state; only gameId and timestamp for unknown games")))]
pub async fn game_state(
    State(ctx): State<AppContext>,
    Path(id): Path<i64>,
) -> Result<Json<GameStateResponse>, ApiError> {
    let repo = ctx.game_repo();
    let uc = GetGame {
        repo: repo.as_ref(),
    };
    let game = uc.execute(id).await?;
    Ok(Json(GameStateResponse {
        game_id: id,
        timestamp: Utc::now(),
        game: game.map(Into::into),
    }))
}

#[utoipa::path(post, path = "/games/{id}/end", tag = "Games",
    params(("id" = i64, Path, description = "Game ID")),
    request_body(content = EndGameRequest, description = "Final score; the body may be omitted"),
    responses(
        (status = 200, body = EndGameResponse),
        (status = 422, body = crate::presentation::http::error::ErrorBody)
    ))]
pub async fn end_game(
    State(ctx): State<AppContext>,
    Path(id): Path<i64>,
    body: Bytes,
) -> Result<Json<EndGameResponse>, ApiError> {
    let score = end_game_score(&body)?;
    let repo = ctx.game_repo();
    let uc = EndGame {
        repo: repo.as_ref(),
    };
    let ended = uc.execute(id, score).await?;
    Ok(Json(EndGameResponse {
        game_id: id,
        score,
        end_time: ended.and_then(|g| g.end_time).unwrap_or_else(Utc::now),
    }))
}

/// An empty body means no score; anything else must be a valid `EndGameRequest`.
fn end_game_score(body: &[u8]) -> Result<Option<i32>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let Json(req) = Json::<EndGameRequest>::from_bytes(body)
        .map_err(|rejection| ApiError::new(rejection.status(), rejection.body_text()))?;
    Ok(req.score)
}

#[utoipa::path(get, path = "/active-games", tag = "Games",
    responses((status = 200, body = ActiveGamesResponse)))]
pub async fn active_games(
    State(ctx): State<AppContext>,
) -> Result<Json<ActiveGamesResponse>, ApiError> {
    ctx.ensure_seeded().await?;
    let repo = ctx.game_repo();
    let uc = ListActiveGames {
        repo: repo.as_ref(),
    };
    let games = uc.execute().await?;
    Ok(Json(ActiveGamesResponse {
        games: games.into_iter().map(Into::into).collect(),
    }))
}
