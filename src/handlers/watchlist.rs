/// 관심 목록 추가 / 제거 / 토글 / 조회
// region:    --- Imports
use super::{listing_url, redirect_with_flash, AppState};
use crate::auction::commands::{handle_watch, WatchAction, WatchChange, WatchCommand};
use crate::error::AppError;
use crate::session::{flash, CurrentUser, Flash};
use crate::templates;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use tracing::info;

// endregion: --- Imports

async fn apply(
    state: &AppState,
    user_id: i64,
    listing_id: i64,
    action: WatchAction,
) -> Result<WatchChange, AppError> {
    let cmd = WatchCommand {
        user_id,
        listing_id,
        action,
    };
    handle_watch(cmd, state.store.as_ref()).await
}

pub async fn watch(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
    Path(listing_id): Path<i64>,
) -> Result<Response, AppError> {
    let change = apply(&state, user.id, listing_id, WatchAction::Add).await?;
    let message = if change.changed {
        Flash::Watching
    } else {
        Flash::AlreadyWatching
    };
    Ok(redirect_with_flash(jar, &listing_url(listing_id), message))
}

pub async fn unwatch(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
    Path(listing_id): Path<i64>,
) -> Result<Response, AppError> {
    let change = apply(&state, user.id, listing_id, WatchAction::Remove).await?;
    let message = if change.changed {
        Flash::Unwatched
    } else {
        Flash::NotWatching
    };
    Ok(redirect_with_flash(jar, &listing_url(listing_id), message))
}

pub async fn toggle(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
    Path(listing_id): Path<i64>,
) -> Result<Response, AppError> {
    let change = apply(&state, user.id, listing_id, WatchAction::Toggle).await?;
    let message = if change.watching {
        Flash::Watching
    } else {
        Flash::Unwatched
    };
    Ok(redirect_with_flash(jar, &listing_url(listing_id), message))
}

/// 사용자 관심 목록 (종료된 경매 포함)
pub async fn show(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
) -> Result<Response, AppError> {
    info!("{:<12} --> 관심 목록 조회 user: {}", "Handler", user.id);
    let (jar, message) = flash::take(jar);
    let listings = state.store.watched_listings(user.id).await?;
    let html = templates::listings::listings_page(
        "Watchlist",
        Some(&user),
        message,
        &listings,
        "Your watchlist is empty.",
    );
    Ok((jar, Html(html)).into_response())
}
