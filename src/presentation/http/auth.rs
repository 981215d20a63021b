use crate::application::ports::user_repository::UserRow;
use crate::application::use_cases::auth::login::{Login as LoginUc, LoginRequest as LoginDto};
use crate::application::use_cases::auth::me::GetMe;
use crate::application::use_cases::auth::signup::{
    Signup as SignupUc, SignupError, SignupRequest as SignupDto,
};
use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::Config;
use crate::presentation::http::error::ApiError;
use axum::{
    Json, Router,
    extract::{FromRequestParts, State},
    http::{HeaderMap, HeaderValue, StatusCode, header, request::Parts},
    routing::{get, post},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub login_time: chrono::DateTime<chrono::Utc>,
}

impl From<UserRow> for UserResponse {
    fn from(u: UserRow) -> Self {
        UserResponse {
            id: u.id,
            username: u.username,
            email: u.email,
            login_time: u.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LogoutResponse {
    pub success: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/auth/signup", tag = "Auth", request_body = SignupRequest, security(()), responses(
    (status = 201, body = AuthResponse),
    (status = 400, body = crate::presentation::http::error::ErrorBody)
))]
pub async fn signup(
    State(ctx): State<AppContext>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, HeaderMap, Json<AuthResponse>), ApiError> {
    ctx.ensure_seeded().await?;
    let repo = ctx.user_repo();
    let uc = SignupUc {
        repo: repo.as_ref(),
    };
    let dto = SignupDto {
        username: req.username,
        email: req.email,
        password: req.password,
    };
    let user = uc.execute(&dto).await.map_err(|e| match e {
        SignupError::Internal(err) => ApiError::internal(&err),
        other => ApiError::bad_request(other.to_string()),
    })?;
    let (headers, body) = session_for(&ctx.cfg, user)?;
    Ok((StatusCode::CREATED, headers, Json(body)))
}

#[utoipa::path(post, path = "/auth/login", tag = "Auth", request_body = LoginRequest, security(()), responses(
    (status = 200, body = AuthResponse),
    (status = 401, body = crate::presentation::http::error::ErrorBody)
))]
pub async fn login(
    State(ctx): State<AppContext>,
    Json(req): Json<LoginRequest>,
) -> Result<(HeaderMap, Json<AuthResponse>), ApiError> {
    ctx.ensure_seeded().await?;
    let repo = ctx.user_repo();
    let uc = LoginUc {
        repo: repo.as_ref(),
    };
    let dto = LoginDto {
        username: req.username,
        password: req.password,
    };
    let user = uc
        .execute(&dto)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid username or password"))?;
    let (headers, body) = session_for(&ctx.cfg, user)?;
    Ok((headers, Json(body)))
}

#[utoipa::path(get, path = "/auth/me", tag = "Auth", responses(
    (status = 200, body = UserResponse),
    (status = 401, body = crate::presentation::http::error::ErrorBody)
))]
pub async fn me(
    State(ctx): State<AppContext>,
    bearer: Option<Bearer>,
) -> Result<Json<UserResponse>, ApiError> {
    let id = bearer
        .and_then(|b| validate_bearer(&ctx.cfg, b).ok())
        .ok_or_else(|| ApiError::unauthorized("Not authenticated"))?;
    let repo = ctx.user_repo();
    let uc = GetMe {
        repo: repo.as_ref(),
    };
    let row = uc
        .execute(id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Not authenticated"))?;
    Ok(Json(row.into()))
}

fn session_for(cfg: &Config, user: UserRow) -> Result<(HeaderMap, AuthResponse), ApiError> {
    let token = issue_token(cfg, user.id)?;

    let mut headers = HeaderMap::new();
    let cookie = build_access_cookie(&token, cfg.jwt_expires_secs, cfg.secure_cookies());
    let cookie = HeaderValue::from_str(&cookie)
        .map_err(|e| ApiError::internal(&anyhow::Error::new(e)))?;
    headers.insert(header::SET_COOKIE, cookie);
    Ok((
        headers,
        AuthResponse {
            user: user.into(),
            access_token: token,
        },
    ))
}

pub(crate) fn issue_token(cfg: &Config, user_id: i64) -> Result<String, ApiError> {
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + (cfg.jwt_expires_secs.max(0) as usize),
    };
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(cfg.jwt_secret_pem.as_bytes()),
    )
    .map_err(|e| ApiError::internal(&anyhow::Error::new(e)))
}

pub const ACCESS_COOKIE: &str = "access_token";

/// Raw access token from `Authorization: Bearer …` or the `access_token` cookie.
pub struct Bearer(pub String);

impl Bearer {
    fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let header_token = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::to_string);
        header_token
            .or_else(|| {
                headers
                    .get(header::COOKIE)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|c| get_cookie(c, ACCESS_COOKIE))
            })
            .filter(|t| !t.is_empty())
            .map(Bearer)
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for Bearer
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Bearer::from_headers(&parts.headers).ok_or(StatusCode::UNAUTHORIZED)
    }
}

/// Returns the user id carried by a valid token.
pub(crate) fn validate_bearer(cfg: &Config, bearer: Bearer) -> Result<i64, StatusCode> {
    let data = jsonwebtoken::decode::<Claims>(
        &bearer.0,
        &DecodingKey::from_secret(cfg.jwt_secret_pem.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| StatusCode::UNAUTHORIZED)?;
    data.claims
        .sub
        .parse()
        .map_err(|_| StatusCode::UNAUTHORIZED)
}

/// User id from an optional bearer; invalid or expired tokens count as anonymous.
pub(crate) fn token_user(cfg: &Config, bearer: Option<Bearer>) -> Option<i64> {
    bearer.and_then(|b| validate_bearer(cfg, b).ok())
}

fn get_cookie(cookie_header: &str, name: &str) -> Option<String> {
    cookie_header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| k.trim() == name)
        .map(|(_, v)| v.trim().to_string())
}

fn build_access_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{ACCESS_COOKIE}={token}; HttpOnly; Path=/; Max-Age={}; SameSite=Lax",
        max_age_secs.max(0)
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

#[utoipa::path(post, path = "/auth/logout", tag = "Auth", responses((status = 200, body = LogoutResponse)))]
pub async fn logout(State(ctx): State<AppContext>) -> (HeaderMap, Json<LogoutResponse>) {
    let mut headers = HeaderMap::new();
    let expired = build_access_cookie("", 0, ctx.cfg.secure_cookies());
    if let Ok(v) = HeaderValue::from_str(&expired) {
        headers.insert(header::SET_COOKIE, v);
    }
    tracing::debug!("logout");
    (headers, Json(LogoutResponse { success: true }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_named_cookie() {
        let hdr = "theme=dark; access_token=abc.def.ghi; other=1";
        assert_eq!(get_cookie(hdr, "access_token").as_deref(), Some("abc.def.ghi"));
        assert_eq!(get_cookie(hdr, "missing"), None);
    }

    #[test]
    fn token_round_trip_and_tamper() {
        let cfg = Config::for_memory();
        let token = issue_token(&cfg, 42).unwrap();
        assert_eq!(validate_bearer(&cfg, Bearer(token.clone())).unwrap(), 42);

        let mut other = Config::for_memory();
        other.jwt_secret_pem = "another-secret-entirely".into();
        assert!(validate_bearer(&other, Bearer(token)).is_err());
        assert_eq!(token_user(&cfg, Some(Bearer("garbage".into()))), None);
    }

    #[test]
    fn header_wins_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("access_token=from-cookie"));
        assert_eq!(Bearer::from_headers(&headers).unwrap().0, "from-cookie");

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        assert_eq!(Bearer::from_headers(&headers).unwrap().0, "from-header");

        headers.insert(header::COOKIE, HeaderValue::from_static("access_token="));
        headers.remove(header::AUTHORIZATION);
        assert!(Bearer::from_headers(&headers).is_none());
    }

    #[test]
    fn cookie_flags() {
        let c = build_access_cookie("t", 60, true);
        assert!(c.ends_with("; Secure"));
        assert!(c.contains("Max-Age=60"));
        assert!(!build_access_cookie("t", -5, false).contains("Secure"));
    }
}
