// region:    --- Imports
use crate::config::Config;
use crate::error::AppError;
use crate::session::{flash, Flash};
use crate::store::AuctionStore;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

// endregion: --- Imports

// region:    --- Modules
pub mod auth;
pub mod categories;
pub mod listings;
pub mod watchlist;
// endregion: --- Modules

// region:    --- App State
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AuctionStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn AuctionStore>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}
// endregion: --- App State

// region:    --- Router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(listings::index))
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/register", get(auth::register_form).post(auth::register))
        .route("/create", get(listings::create_form).post(listings::create))
        .route("/listing/:id", get(listings::show))
        .route("/listing/:id/bid", post(listings::bid))
        .route("/listing/:id/comment", post(listings::comment))
        .route("/listing/:id/close", post(listings::close))
        .route("/listing/:id/watch", post(watchlist::watch))
        .route("/listing/:id/unwatch", post(watchlist::unwatch))
        .route("/listing/:id/toggle-watch", post(watchlist::toggle))
        .route("/watchlist", get(watchlist::show))
        .route("/categories", get(categories::index))
        .route("/category/:category", get(categories::show))
        .route("/health", get(health))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn not_found() -> AppError {
    AppError::NotFound
}
// endregion: --- Router

// region:    --- Helpers
/// 알림 메시지를 남기고 리다이렉트 (303)
pub(crate) fn redirect_with_flash(jar: CookieJar, to: &str, message: Flash) -> Response {
    (flash::set(jar, message), Redirect::to(to)).into_response()
}

pub(crate) fn listing_url(listing_id: i64) -> String {
    format!("/listing/{}", listing_id)
}
// endregion: --- Helpers
