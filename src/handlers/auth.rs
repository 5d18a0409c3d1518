/// 로그인 / 로그아웃 / 회원 가입
// region:    --- Imports
use super::{redirect_with_flash, AppState};
use crate::accounts::commands::{
    end_session, handle_login, handle_register, start_session, LoginCommand, RegisterCommand,
};
use crate::error::AppError;
use crate::session::{self, flash, Flash};
use crate::templates;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use tracing::info;

// endregion: --- Imports

// region:    --- Login
pub async fn login_form(jar: CookieJar) -> impl IntoResponse {
    let (jar, message) = flash::take(jar);
    (jar, Html(templates::accounts::login_page(message, None, "")))
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(cmd): Form<LoginCommand>,
) -> Result<Response, AppError> {
    info!("{:<12} --> 로그인 요청 처리", "Handler");
    let username = cmd.username.clone();

    match handle_login(cmd, state.store.as_ref()).await {
        Ok(user) => {
            let session =
                start_session(state.store.as_ref(), &user, state.config.session_ttl()).await?;
            let jar = jar.add(session::session_cookie(
                session.token,
                state.config.cookie_secure,
            ));
            Ok((jar, Redirect::to("/")).into_response())
        }
        Err(AppError::InvalidCredentials) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(templates::accounts::login_page(
                None,
                Some(&AppError::InvalidCredentials.to_string()),
                &username,
            )),
        )
            .into_response()),
        Err(e) => Err(e),
    }
}

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Result<Response, AppError> {
    if let Some(token) = session::session_token(&jar) {
        end_session(state.store.as_ref(), &token).await?;
    }
    let jar = jar.remove(session::removal_cookie());
    Ok(redirect_with_flash(jar, "/", Flash::LoggedOut))
}
// endregion: --- Login

// region:    --- Register
pub async fn register_form() -> Html<String> {
    Html(templates::accounts::register_page(None, None, "", ""))
}

pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(cmd): Form<RegisterCommand>,
) -> Result<Response, AppError> {
    info!("{:<12} --> 회원 가입 요청 처리", "Handler");
    let username = cmd.username.clone();
    let email = cmd.email.clone();

    let rejected = |errors: Option<&crate::error::ValidationErrors>, alert: Option<&str>| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(templates::accounts::register_page(
                errors, alert, &username, &email,
            )),
        )
            .into_response()
    };

    match handle_register(cmd, state.store.as_ref()).await {
        Ok(user) => {
            let session =
                start_session(state.store.as_ref(), &user, state.config.session_ttl()).await?;
            let jar = jar.add(session::session_cookie(
                session.token,
                state.config.cookie_secure,
            ));
            Ok(redirect_with_flash(jar, "/", Flash::Welcome))
        }
        Err(AppError::Validation(errors)) => Ok(rejected(Some(&errors), None)),
        Err(AppError::UsernameTaken) => Ok(rejected(
            None,
            Some(&AppError::UsernameTaken.to_string()),
        )),
        Err(e) => Err(e),
    }
}
// endregion: --- Register
