/// 저장소 트레이트
/// 운영 환경은 PostgresStore, 테스트와 로컬 실행은 MemoryStore 를 사용한다.
// region:    --- Imports
use crate::accounts::model::{Session, User};
use crate::auction::model::{Category, Comment, Listing, NewListing};
use crate::auction::money::Money;
use crate::bidding::model::Bid;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

// endregion: --- Imports

// region:    --- Modules
pub mod memory;

pub use memory::MemoryStore;
// endregion: --- Modules

// region:    --- Auction Store Trait
#[async_trait]
pub trait AuctionStore: Send + Sync {
    // -- 사용자
    /// 사용자 이름이 중복이면 `AppError::UsernameTaken`
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AppError>;
    async fn find_user(&self, user_id: i64) -> Result<Option<User>, AppError>;
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    // -- 세션
    async fn create_session(
        &self,
        user_id: i64,
        expires_at: DateTime<Utc>,
    ) -> Result<Session, AppError>;
    /// 만료된 세션은 없는 것으로 취급
    async fn find_session(&self, token: &str, now: DateTime<Utc>)
        -> Result<Option<Session>, AppError>;
    async fn delete_session(&self, token: &str) -> Result<(), AppError>;
    async fn delete_expired_sessions(&self, now: DateTime<Utc>) -> Result<u64, AppError>;

    // -- 상품
    async fn create_listing(&self, owner_id: i64, listing: NewListing)
        -> Result<Listing, AppError>;
    async fn find_listing(&self, listing_id: i64) -> Result<Option<Listing>, AppError>;
    /// 진행 중인 상품 (최신순), 카테고리 필터 선택
    async fn active_listings(&self, category: Option<Category>) -> Result<Vec<Listing>, AppError>;
    /// 경매를 종료하고 최고 입찰자를 낙찰자로 기록한다.
    /// 이미 종료된 경우 `None`, 상품이 없으면 `AppError::NotFound`
    async fn close_listing(&self, listing_id: i64) -> Result<Option<Listing>, AppError>;

    // -- 입찰
    /// 상품 행을 잠근 상태에서 입찰 규칙을 적용하고 현재 가격과 입찰 기록을 함께 갱신한다.
    async fn place_bid(
        &self,
        listing_id: i64,
        bidder_id: i64,
        amount: Money,
    ) -> Result<Bid, AppError>;
    /// 입찰 이력 (최신순)
    async fn bids_for_listing(&self, listing_id: i64) -> Result<Vec<Bid>, AppError>;

    // -- 댓글
    async fn add_comment(
        &self,
        listing_id: i64,
        author_id: i64,
        content: &str,
    ) -> Result<Comment, AppError>;
    /// 댓글 목록 (작성순)
    async fn comments_for_listing(&self, listing_id: i64) -> Result<Vec<Comment>, AppError>;

    // -- 관심 목록
    async fn is_watching(&self, user_id: i64, listing_id: i64) -> Result<bool, AppError>;
    /// 새로 추가되었으면 true
    async fn add_to_watchlist(&self, user_id: i64, listing_id: i64) -> Result<bool, AppError>;
    /// 실제로 삭제되었으면 true
    async fn remove_from_watchlist(&self, user_id: i64, listing_id: i64)
        -> Result<bool, AppError>;
    /// 토글 후 관심 목록 포함 여부
    async fn toggle_watchlist(&self, user_id: i64, listing_id: i64) -> Result<bool, AppError>;
    async fn watched_listings(&self, user_id: i64) -> Result<Vec<Listing>, AppError>;
}
// endregion: --- Auction Store Trait
