// region:    --- Imports
use super::AppState;
use crate::auction::model::Category;
use crate::error::AppError;
use crate::session::{flash, MaybeUser};
use crate::templates;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use tracing::info;

// endregion: --- Imports

pub async fn index(viewer: MaybeUser, jar: CookieJar) -> impl IntoResponse {
    let (jar, message) = flash::take(jar);
    (
        jar,
        Html(templates::listings::categories_page(viewer.user(), message)),
    )
}

/// 카테고리별 진행 중인 상품 (알 수 없는 카테고리는 404)
pub async fn show(
    State(state): State<AppState>,
    viewer: MaybeUser,
    jar: CookieJar,
    Path(slug): Path<String>,
) -> Result<Response, AppError> {
    let category: Category = slug.parse().map_err(|_| AppError::NotFound)?;
    info!("{:<12} --> 카테고리 조회: {}", "Handler", category.slug());

    let (jar, message) = flash::take(jar);
    let listings = state.store.active_listings(Some(category)).await?;
    let html = templates::listings::listings_page(
        category.display_name(),
        viewer.user(),
        message,
        &listings,
        "No active listings in this category.",
    );
    Ok((jar, Html(html)).into_response())
}
