use std::net::SocketAddr;

use axum::extract::MatchedPath;
use dotenvy::dotenv;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use arcade::bootstrap::app_context::{AppContext, AppServices};
use arcade::bootstrap::config::{Config, DatabaseBackend};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            arcade::presentation::http::auth::signup,
            arcade::presentation::http::auth::login,
            arcade::presentation::http::auth::logout,
            arcade::presentation::http::auth::me,
            arcade::presentation::http::leaderboard::get_leaderboard,
            arcade::presentation::http::leaderboard::submit_score,
            arcade::presentation::http::leaderboard::user_highscore,
            arcade::presentation::http::games::start_game,
            arcade::presentation::http::games::game_state,
            arcade::presentation::http::games::end_game,
            arcade::presentation::http::games::active_games,
            arcade::presentation::http::todos::list_todos,
            arcade::presentation::http::todos::create_todo,
            arcade::presentation::http::todos::update_todo,
            arcade::presentation::http::todos::delete_todo,
            arcade::presentation::http::todos::toggle_todo,
            arcade::presentation::http::health::health,
        ),
        components(schemas(
            arcade::presentation::http::error::ErrorBody,
            arcade::presentation::http::auth::SignupRequest,
            arcade::presentation::http::auth::LoginRequest,
            arcade::presentation::http::auth::UserResponse,
            arcade::presentation::http::auth::AuthResponse,
            arcade::presentation::http::auth::LogoutResponse,
            arcade::presentation::http::leaderboard::LeaderboardEntry,
            arcade::presentation::http::leaderboard::LeaderboardResponse,
            arcade::presentation::http::leaderboard::SubmitScoreRequest,
            arcade::presentation::http::leaderboard::SubmitScoreResponse,
            arcade::presentation::http::leaderboard::HighScoreResponse,
            arcade::presentation::http::games::GameSession,
            arcade::presentation::http::games::StartGameRequest,
            arcade::presentation::http::games::StartGameResponse,
            arcade::presentation::http::games::EndGameRequest,
            arcade::presentation::http::games::EndGameResponse,
            arcade::presentation::http::games::ActiveGame,
            arcade::presentation::http::games::ActiveGamesResponse,
            arcade::presentation::http::health::HealthResp,
            arcade::domain::games::mode::GameMode,
        )),
        tags(
            (name = "Auth", description = "Signup, login and token handling"),
            (name = "Leaderboard", description = "Scores and high scores"),
            (name = "Games", description = "Game sessions"),
            (name = "Todos", description = "Server-rendered to-do list"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "arcade=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(
        port = cfg.api_port,
        backend = ?cfg.database_backend,
        seed_defaults = cfg.seed_defaults,
        production = cfg.is_production,
        "Starting arcade backend"
    );

    let services = match cfg.database_backend {
        DatabaseBackend::Postgres => {
            let pool = arcade::infrastructure::db::connect_pool(
                &cfg.database_url,
                cfg.database_max_connections,
            )
            .await?;
            arcade::infrastructure::db::migrate(&pool).await?;
            AppServices::postgres(pool)
        }
        DatabaseBackend::Memory => {
            tracing::warn!("using in-memory store; data is lost on restart");
            AppServices::in_memory()
        }
    };

    let ctx = AppContext::new(cfg.clone(), services);
    if let Err(e) = ctx.ensure_seeded().await {
        tracing::warn!(error = ?e, "initial seeding failed; will retry on demand");
    }

    let cors = build_cors(&cfg);

    let app = arcade::presentation::http::router(ctx.clone())
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP API stopped");
    Ok(())
}

fn build_cors(cfg: &Config) -> CorsLayer {
    // every route is GET or POST; OPTIONS covers preflight
    let methods = [http::Method::GET, http::Method::POST, http::Method::OPTIONS];
    let headers = [http::header::CONTENT_TYPE, http::header::AUTHORIZATION];

    let origin = match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(v)) => AllowOrigin::exact(v),
        Some(Err(_)) | None if cfg.is_production => {
            // FRONTEND_URL is enforced at startup in production; deny everything else
            AllowOrigin::exact(HeaderValue::from_static("http://invalid"))
        }
        _ => AllowOrigin::mirror_request(),
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(methods)
        .allow_headers(headers)
        .allow_credentials(true)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
