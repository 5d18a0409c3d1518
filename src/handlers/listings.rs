/// 상품 목록 / 상세 / 등록 / 입찰 / 댓글 / 경매 종료
// region:    --- Imports
use super::{listing_url, redirect_with_flash, AppState};
use crate::accounts::model::User;
use crate::auction::commands::{
    handle_add_comment, handle_close_listing, handle_create_listing, AddCommentCommand,
    CloseListingCommand, CloseOutcome, ListingForm,
};
use crate::bidding::commands::{handle_place_bid, BidForm, PlaceBidCommand};
use crate::error::AppError;
use crate::session::{flash, CurrentUser, Flash, MaybeUser};
use crate::templates;
use crate::templates::listings::ListingPage;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tracing::info;

// endregion: --- Imports

// region:    --- Query Handlers
/// 진행 중인 상품 목록
pub async fn index(
    State(state): State<AppState>,
    viewer: MaybeUser,
    jar: CookieJar,
) -> Result<Response, AppError> {
    info!("{:<12} --> 진행 중인 상품 조회", "Handler");
    let (jar, message) = flash::take(jar);
    let listings = state.store.active_listings(None).await?;
    let html = templates::listings::listings_page(
        "Active Listings",
        viewer.user(),
        message,
        &listings,
        "No active listings.",
    );
    Ok((jar, Html(html)).into_response())
}

/// 상품 상세
pub async fn show(
    State(state): State<AppState>,
    viewer: MaybeUser,
    jar: CookieJar,
    Path(listing_id): Path<i64>,
) -> Result<Response, AppError> {
    info!("{:<12} --> 상품 조회 id: {}", "Handler", listing_id);
    let (jar, message) = flash::take(jar);
    let html = render_listing(
        &state,
        viewer.user(),
        message,
        listing_id,
        FormFeedback::default(),
    )
    .await?;
    Ok((jar, Html(html)).into_response())
}

/// 상세 페이지 폼 에러 및 입력값
#[derive(Default)]
struct FormFeedback<'a> {
    bid_error: Option<&'a str>,
    bid_input: &'a str,
    comment_error: Option<&'a str>,
    comment_input: &'a str,
}

async fn render_listing(
    state: &AppState,
    viewer: Option<&User>,
    message: Option<Flash>,
    listing_id: i64,
    feedback: FormFeedback<'_>,
) -> Result<String, AppError> {
    let store = state.store.as_ref();
    let listing = store
        .find_listing(listing_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let owner = store
        .find_user(listing.owner_id)
        .await?
        .map(|u| u.username)
        .unwrap_or_default();
    let bids = store.bids_for_listing(listing_id).await?;
    let comments = store.comments_for_listing(listing_id).await?;
    let watching = match viewer {
        Some(user) => store.is_watching(user.id, listing_id).await?,
        None => false,
    };
    let winner = match listing.winner_id {
        Some(winner_id) => store.find_user(winner_id).await?.map(|u| u.username),
        None => None,
    };

    Ok(templates::listings::listing_page(&ListingPage {
        viewer,
        flash: message,
        listing: &listing,
        owner: &owner,
        bids: &bids,
        comments: &comments,
        watching,
        winner: winner.as_deref(),
        bid_error: feedback.bid_error,
        bid_input: feedback.bid_input,
        comment_error: feedback.comment_error,
        comment_input: feedback.comment_input,
    }))
}
// endregion: --- Query Handlers

// region:    --- Command Handlers
pub async fn create_form(CurrentUser(user): CurrentUser) -> Html<String> {
    Html(templates::listings::create_page(
        &user,
        &ListingForm::default(),
        None,
    ))
}

/// 상품 등록
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
    Form(form): Form<ListingForm>,
) -> Result<Response, AppError> {
    info!("{:<12} --> 상품 등록 요청 user: {}", "Handler", user.id);
    match handle_create_listing(user.id, &form, state.store.as_ref()).await {
        Ok(listing) => Ok(redirect_with_flash(
            jar,
            &listing_url(listing.id),
            Flash::ListingCreated,
        )),
        Err(AppError::Validation(errors)) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(templates::listings::create_page(&user, &form, Some(&errors))),
        )
            .into_response()),
        Err(e) => Err(e),
    }
}

/// 입찰
pub async fn bid(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
    Path(listing_id): Path<i64>,
    Form(form): Form<BidForm>,
) -> Result<Response, AppError> {
    info!(
        "{:<12} --> 입찰 요청 listing: {}, user: {}",
        "Handler", listing_id, user.id
    );
    let result = match PlaceBidCommand::from_form(listing_id, user.id, &form) {
        Ok(cmd) => handle_place_bid(cmd, state.store.as_ref()).await.map(|_| ()),
        Err(e) => Err(e),
    };

    let error = match result {
        Ok(()) => {
            return Ok(redirect_with_flash(
                jar,
                &listing_url(listing_id),
                Flash::BidPlaced,
            ))
        }
        Err(AppError::Validation(errors)) => errors.get("amount").unwrap_or_default().to_string(),
        Err(AppError::BidRejected(reason)) => reason.to_string(),
        Err(e) => return Err(e),
    };

    let html = render_listing(
        &state,
        Some(&user),
        None,
        listing_id,
        FormFeedback {
            bid_error: Some(&error),
            bid_input: &form.amount,
            ..FormFeedback::default()
        },
    )
    .await?;
    Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response())
}

#[derive(Debug, Default, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub content: String,
}

/// 댓글 작성
pub async fn comment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
    Path(listing_id): Path<i64>,
    Form(form): Form<CommentForm>,
) -> Result<Response, AppError> {
    let cmd = AddCommentCommand {
        listing_id,
        author_id: user.id,
        content: form.content.clone(),
    };

    match handle_add_comment(cmd, state.store.as_ref()).await {
        Ok(_) => Ok(redirect_with_flash(
            jar,
            &listing_url(listing_id),
            Flash::CommentAdded,
        )),
        Err(AppError::Validation(errors)) => {
            let error = errors.get("content").unwrap_or_default().to_string();
            let html = render_listing(
                &state,
                Some(&user),
                None,
                listing_id,
                FormFeedback {
                    comment_error: Some(&error),
                    comment_input: &form.content,
                    ..FormFeedback::default()
                },
            )
            .await?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response())
        }
        Err(e) => Err(e),
    }
}

/// 경매 종료 (소유자만 가능)
pub async fn close(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
    Path(listing_id): Path<i64>,
) -> Result<Response, AppError> {
    let cmd = CloseListingCommand {
        listing_id,
        requester_id: user.id,
    };
    let message = match handle_close_listing(cmd, state.store.as_ref()).await? {
        CloseOutcome::Closed { winner: Some(_) } => Flash::ClosedWithWinner,
        CloseOutcome::Closed { winner: None } => Flash::ClosedWithoutBids,
        CloseOutcome::AlreadyClosed => Flash::AlreadyClosed,
    };
    Ok(redirect_with_flash(jar, &listing_url(listing_id), message))
}
// endregion: --- Command Handlers
