/// 경매 상품 관련 커맨드 처리
/// 1. 상품 등록
/// 2. 댓글 작성
/// 3. 경매 종료
/// 4. 관심 목록 변경
// region:    --- Imports
use super::model::{Category, Comment, Listing, NewListing};
use super::money::Money;
use crate::error::{AppError, ValidationErrors};
use crate::store::AuctionStore;
use serde::Deserialize;
use tracing::{info, warn};

// endregion: --- Imports

// region:    --- Commands
/// 상품 등록 폼
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub starting_bid: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub category: String,
}

const MAX_TITLE_LEN: usize = 128;

impl ListingForm {
    /// 폼 검증
    pub fn validate(&self) -> Result<NewListing, AppError> {
        let mut errors = ValidationErrors::new();

        let title = self.title.trim();
        if title.is_empty() {
            errors.add("title", "This field is required.");
        } else if title.chars().count() > MAX_TITLE_LEN {
            errors.add("title", "Ensure this value has at most 128 characters.");
        }

        let description = self.description.trim();
        if description.is_empty() {
            errors.add("description", "This field is required.");
        }

        let starting_price = if self.starting_bid.trim().is_empty() {
            errors.add("starting_bid", "This field is required.");
            None
        } else {
            Money::parse_positive(&self.starting_bid)
                .map_err(|e| errors.add("starting_bid", e.to_string()))
                .ok()
        };

        let image_url = self.image_url.trim();
        if !image_url.is_empty()
            && !(image_url.starts_with("http://") || image_url.starts_with("https://"))
        {
            errors.add("image_url", "Enter a valid URL.");
        }

        let category = match self.category.trim() {
            "" => Some(Category::default()),
            slug => slug
                .parse::<Category>()
                .map_err(|_| {
                    errors.add(
                        "category",
                        "Select a valid choice. That choice is not one of the available choices.",
                    )
                })
                .ok(),
        };

        match (starting_price, category) {
            (Some(starting_price), Some(category)) if errors.is_empty() => Ok(NewListing {
                title: title.to_string(),
                description: description.to_string(),
                starting_price,
                image_url: image_url.to_string(),
                category,
            }),
            _ => Err(AppError::Validation(errors)),
        }
    }
}

/// 1. 상품 등록
pub async fn handle_create_listing(
    owner_id: i64,
    form: &ListingForm,
    store: &dyn AuctionStore,
) -> Result<Listing, AppError> {
    info!("{:<12} --> 상품 등록 요청 owner: {}", "Command", owner_id);
    let new_listing = form.validate()?;
    let listing = store.create_listing(owner_id, new_listing).await?;
    info!("{:<12} --> 상품 등록 완료 id: {}", "Command", listing.id);
    Ok(listing)
}

/// 댓글 작성 명령
#[derive(Debug, Clone)]
pub struct AddCommentCommand {
    pub listing_id: i64,
    pub author_id: i64,
    pub content: String,
}

/// 2. 댓글 작성
pub async fn handle_add_comment(
    cmd: AddCommentCommand,
    store: &dyn AuctionStore,
) -> Result<Comment, AppError> {
    info!(
        "{:<12} --> 댓글 작성 요청 listing: {}, author: {}",
        "Command", cmd.listing_id, cmd.author_id
    );
    let content = cmd.content.trim();
    if content.is_empty() {
        return Err(AppError::validation("content", "This field is required."));
    }

    store
        .find_listing(cmd.listing_id)
        .await?
        .ok_or(AppError::NotFound)?;
    store.add_comment(cmd.listing_id, cmd.author_id, content).await
}

/// 경매 종료 명령
#[derive(Debug, Clone, Copy)]
pub struct CloseListingCommand {
    pub listing_id: i64,
    pub requester_id: i64,
}

/// 경매 종료 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseOutcome {
    /// 낙찰자 이름 (입찰이 없으면 None)
    Closed { winner: Option<String> },
    AlreadyClosed,
}

/// 3. 경매 종료 (소유자만 가능)
pub async fn handle_close_listing(
    cmd: CloseListingCommand,
    store: &dyn AuctionStore,
) -> Result<CloseOutcome, AppError> {
    info!("{:<12} --> 경매 종료 요청: {:?}", "Command", cmd);
    let listing = store
        .find_listing(cmd.listing_id)
        .await?
        .ok_or(AppError::NotFound)?;

    if !listing.is_owned_by(cmd.requester_id) {
        warn!(
            "{:<12} --> 소유자가 아닌 사용자의 종료 요청: {:?}",
            "Command", cmd
        );
        return Err(AppError::Forbidden(
            "Only the owner can close this auction.".to_string(),
        ));
    }

    let Some(closed) = store.close_listing(cmd.listing_id).await? else {
        return Ok(CloseOutcome::AlreadyClosed);
    };

    let winner = match closed.winner_id {
        Some(winner_id) => store.find_user(winner_id).await?.map(|u| u.username),
        None => None,
    };
    info!(
        "{:<12} --> 경매 종료 id: {}, 낙찰자: {:?}",
        "Command", closed.id, winner
    );
    Ok(CloseOutcome::Closed { winner })
}

/// 관심 목록 변경 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchAction {
    Add,
    Remove,
    Toggle,
}

/// 관심 목록 변경 명령
#[derive(Debug, Clone, Copy)]
pub struct WatchCommand {
    pub user_id: i64,
    pub listing_id: i64,
    pub action: WatchAction,
}

/// 관심 목록 변경 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchChange {
    pub watching: bool,
    pub changed: bool,
}

/// 4. 관심 목록 변경
pub async fn handle_watch(
    cmd: WatchCommand,
    store: &dyn AuctionStore,
) -> Result<WatchChange, AppError> {
    info!("{:<12} --> 관심 목록 변경 요청: {:?}", "Command", cmd);
    store
        .find_listing(cmd.listing_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let change = match cmd.action {
        WatchAction::Add => WatchChange {
            watching: true,
            changed: store.add_to_watchlist(cmd.user_id, cmd.listing_id).await?,
        },
        WatchAction::Remove => WatchChange {
            watching: false,
            changed: store
                .remove_from_watchlist(cmd.user_id, cmd.listing_id)
                .await?,
        },
        WatchAction::Toggle => WatchChange {
            watching: store.toggle_watchlist(cmd.user_id, cmd.listing_id).await?,
            changed: true,
        },
    };
    Ok(change)
}
// endregion: --- Commands
