/// 메모리 저장소
/// DATABASE_URL 없이 로컬에서 실행하거나 테스트할 때 사용한다.
/// 모든 연산은 하나의 뮤텍스 아래에서 수행되므로 입찰 검증과 갱신이 원자적으로 처리된다.
// region:    --- Imports
use super::AuctionStore;
use crate::accounts::model::{Session, User};
use crate::auction::model::{Category, Comment, Listing, NewListing};
use crate::auction::money::Money;
use crate::bidding::model::Bid;
use crate::bidding::rules;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

// endregion: --- Imports

// region:    --- Tables
#[derive(Default)]
struct Tables {
    users: Vec<User>,
    sessions: HashMap<String, Session>,
    listings: Vec<Listing>,
    bids: Vec<Bid>,
    comments: Vec<Comment>,
    // (user_id, listing_id), 추가된 순서 유지
    watchlist: Vec<(i64, i64)>,
}

impl Tables {
    fn user(&self, user_id: i64) -> Result<&User, AppError> {
        self.users
            .iter()
            .find(|u| u.id == user_id)
            .ok_or(AppError::NotFound)
    }

    fn listing_mut(&mut self, listing_id: i64) -> Result<&mut Listing, AppError> {
        self.listings
            .iter_mut()
            .find(|l| l.id == listing_id)
            .ok_or(AppError::NotFound)
    }

    fn listing_exists(&self, listing_id: i64) -> bool {
        self.listings.iter().any(|l| l.id == listing_id)
    }
}
// endregion: --- Tables

// region:    --- Memory Store
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuctionStore for MemoryStore {
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AppError> {
        let mut tables = self.tables.lock().await;
        if tables.users.iter().any(|u| u.username == username) {
            return Err(AppError::UsernameTaken);
        }

        let user = User {
            id: tables.users.len() as i64 + 1,
            username: username.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        debug!("{:<12} --> 사용자 생성 id: {}", "Store", user.id);
        Ok(user)
    }

    async fn find_user(&self, user_id: i64) -> Result<Option<User>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables.users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn create_session(
        &self,
        user_id: i64,
        expires_at: DateTime<Utc>,
    ) -> Result<Session, AppError> {
        let mut tables = self.tables.lock().await;
        tables.user(user_id)?;

        let session = Session {
            token: Uuid::new_v4().to_string(),
            user_id,
            expires_at,
            created_at: Utc::now(),
        };
        tables
            .sessions
            .insert(session.token.clone(), session.clone());
        Ok(session)
    }

    async fn find_session(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Session>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .sessions
            .get(token)
            .filter(|s| !s.is_expired(now))
            .cloned())
    }

    async fn delete_session(&self, token: &str) -> Result<(), AppError> {
        self.tables.lock().await.sessions.remove(token);
        Ok(())
    }

    async fn delete_expired_sessions(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let mut tables = self.tables.lock().await;
        let before = tables.sessions.len();
        tables.sessions.retain(|_, s| !s.is_expired(now));
        Ok((before - tables.sessions.len()) as u64)
    }

    async fn create_listing(
        &self,
        owner_id: i64,
        listing: NewListing,
    ) -> Result<Listing, AppError> {
        let mut tables = self.tables.lock().await;
        tables.user(owner_id)?;

        let listing = Listing {
            id: tables.listings.len() as i64 + 1,
            owner_id,
            title: listing.title,
            description: listing.description,
            starting_price: listing.starting_price,
            current_price: listing.starting_price,
            image_url: listing.image_url,
            category: listing.category,
            active: true,
            winner_id: None,
            created_at: Utc::now(),
        };
        tables.listings.push(listing.clone());
        Ok(listing)
    }

    async fn find_listing(&self, listing_id: i64) -> Result<Option<Listing>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables.listings.iter().find(|l| l.id == listing_id).cloned())
    }

    async fn active_listings(&self, category: Option<Category>) -> Result<Vec<Listing>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .listings
            .iter()
            .rev()
            .filter(|l| l.active && category.map_or(true, |c| l.category == c))
            .cloned()
            .collect())
    }

    async fn close_listing(&self, listing_id: i64) -> Result<Option<Listing>, AppError> {
        let mut tables = self.tables.lock().await;
        let winner_id = tables
            .bids
            .iter()
            .filter(|b| b.listing_id == listing_id)
            .max_by_key(|b| b.amount)
            .map(|b| b.bidder_id);

        let listing = tables.listing_mut(listing_id)?;
        if !listing.active {
            return Ok(None);
        }
        listing.active = false;
        listing.winner_id = winner_id;
        Ok(Some(listing.clone()))
    }

    async fn place_bid(
        &self,
        listing_id: i64,
        bidder_id: i64,
        amount: Money,
    ) -> Result<Bid, AppError> {
        let mut tables = self.tables.lock().await;
        let bidder = tables.user(bidder_id)?.username.clone();
        let has_bids = tables.bids.iter().any(|b| b.listing_id == listing_id);
        let next_id = tables.bids.len() as i64 + 1;

        let listing = tables.listing_mut(listing_id)?;
        rules::evaluate_bid(listing, has_bids, amount)?;
        listing.current_price = amount;

        let bid = Bid {
            id: next_id,
            listing_id,
            bidder_id,
            bidder,
            amount,
            created_at: Utc::now(),
        };
        tables.bids.push(bid.clone());
        Ok(bid)
    }

    async fn bids_for_listing(&self, listing_id: i64) -> Result<Vec<Bid>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .bids
            .iter()
            .rev()
            .filter(|b| b.listing_id == listing_id)
            .cloned()
            .collect())
    }

    async fn add_comment(
        &self,
        listing_id: i64,
        author_id: i64,
        content: &str,
    ) -> Result<Comment, AppError> {
        let mut tables = self.tables.lock().await;
        let author = tables.user(author_id)?.username.clone();
        if !tables.listing_exists(listing_id) {
            return Err(AppError::NotFound);
        }

        let comment = Comment {
            id: tables.comments.len() as i64 + 1,
            listing_id,
            author_id,
            author,
            content: content.to_string(),
            created_at: Utc::now(),
        };
        tables.comments.push(comment.clone());
        Ok(comment)
    }

    async fn comments_for_listing(&self, listing_id: i64) -> Result<Vec<Comment>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .comments
            .iter()
            .filter(|c| c.listing_id == listing_id)
            .cloned()
            .collect())
    }

    async fn is_watching(&self, user_id: i64, listing_id: i64) -> Result<bool, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables.watchlist.contains(&(user_id, listing_id)))
    }

    async fn add_to_watchlist(&self, user_id: i64, listing_id: i64) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().await;
        if !tables.listing_exists(listing_id) {
            return Err(AppError::NotFound);
        }
        if tables.watchlist.contains(&(user_id, listing_id)) {
            return Ok(false);
        }
        tables.watchlist.push((user_id, listing_id));
        Ok(true)
    }

    async fn remove_from_watchlist(
        &self,
        user_id: i64,
        listing_id: i64,
    ) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().await;
        let before = tables.watchlist.len();
        tables.watchlist.retain(|entry| *entry != (user_id, listing_id));
        Ok(tables.watchlist.len() != before)
    }

    async fn toggle_watchlist(&self, user_id: i64, listing_id: i64) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().await;
        if !tables.listing_exists(listing_id) {
            return Err(AppError::NotFound);
        }
        if let Some(pos) = tables
            .watchlist
            .iter()
            .position(|entry| *entry == (user_id, listing_id))
        {
            tables.watchlist.remove(pos);
            Ok(false)
        } else {
            tables.watchlist.push((user_id, listing_id));
            Ok(true)
        }
    }

    async fn watched_listings(&self, user_id: i64) -> Result<Vec<Listing>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .watchlist
            .iter()
            .rev()
            .filter(|(uid, _)| *uid == user_id)
            .filter_map(|(_, lid)| tables.listings.iter().find(|l| l.id == *lid).cloned())
            .collect())
    }
}
// endregion: --- Memory Store
