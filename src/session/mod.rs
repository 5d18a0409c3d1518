/// 쿠키 기반 로그인 세션
// region:    --- Imports
use crate::accounts::model::User;
use crate::error::AppError;
use crate::handlers::AppState;
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;
use tracing::debug;

// endregion: --- Imports

// region:    --- Modules
pub mod flash;

pub use flash::Flash;
// endregion: --- Modules

// region:    --- Cookies
pub const SESSION_COOKIE: &str = "sessionid";

pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build()
}

pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path("/").build()
}

pub fn session_token(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE).map(|c| c.value().to_string())
}
// endregion: --- Cookies

// region:    --- Extractors
/// 로그인한 사용자 (없으면 로그인 페이지로 리다이렉트)
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// 로그인 여부와 무관한 페이지용
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<User>);

impl MaybeUser {
    pub fn user(&self) -> Option<&User> {
        self.0.as_ref()
    }
}

async fn resolve_user(parts: &Parts, state: &AppState) -> Result<Option<User>, AppError> {
    let jar = CookieJar::from_headers(&parts.headers);
    let Some(token) = session_token(&jar) else {
        return Ok(None);
    };

    let Some(session) = state.store.find_session(&token, Utc::now()).await? else {
        debug!("{:<12} --> 만료되었거나 없는 세션", "Session");
        return Ok(None);
    };

    state.store.find_user(session.user_id).await
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        resolve_user(parts, state)
            .await?
            .map(CurrentUser)
            .ok_or(AppError::Unauthenticated)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(resolve_user(parts, state).await?))
    }
}
// endregion: --- Extractors
