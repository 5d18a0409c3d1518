/// Postgres 저장소 구현체
// region:    --- Imports
use super::queries;
use super::DatabaseManager;
use crate::accounts::model::{Session, User};
use crate::auction::model::{Category, Comment, Listing, NewListing};
use crate::auction::money::Money;
use crate::bidding::model::Bid;
use crate::bidding::rules;
use crate::error::AppError;
use crate::store::AuctionStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

// endregion: --- Imports

// region:    --- Postgres Store
pub struct PostgresStore {
    db: Arc<DatabaseManager>,
}

impl PostgresStore {
    pub fn new(db: Arc<DatabaseManager>) -> Self {
        Self { db }
    }

    async fn listing_exists(&self, listing_id: i64) -> Result<bool, AppError> {
        Ok(self.find_listing(listing_id).await?.is_some())
    }
}

#[async_trait]
impl AuctionStore for PostgresStore {
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AppError> {
        let result = sqlx::query_as::<_, User>(queries::INSERT_USER)
            .bind(username)
            .bind(email)
            .bind(password_hash)
            .fetch_one(self.db.pool())
            .await;

        match result {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(AppError::UsernameTaken)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_user(&self, user_id: i64) -> Result<Option<User>, AppError> {
        Ok(sqlx::query_as::<_, User>(queries::GET_USER)
            .bind(user_id)
            .fetch_optional(self.db.pool())
            .await?)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(sqlx::query_as::<_, User>(queries::GET_USER_BY_USERNAME)
            .bind(username)
            .fetch_optional(self.db.pool())
            .await?)
    }

    async fn create_session(
        &self,
        user_id: i64,
        expires_at: DateTime<Utc>,
    ) -> Result<Session, AppError> {
        Ok(sqlx::query_as::<_, Session>(queries::INSERT_SESSION)
            .bind(Uuid::new_v4().to_string())
            .bind(user_id)
            .bind(expires_at)
            .fetch_one(self.db.pool())
            .await?)
    }

    async fn find_session(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Session>, AppError> {
        Ok(sqlx::query_as::<_, Session>(queries::GET_LIVE_SESSION)
            .bind(token)
            .bind(now)
            .fetch_optional(self.db.pool())
            .await?)
    }

    async fn delete_session(&self, token: &str) -> Result<(), AppError> {
        sqlx::query(queries::DELETE_SESSION)
            .bind(token)
            .execute(self.db.pool())
            .await?;
        Ok(())
    }

    async fn delete_expired_sessions(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let result = sqlx::query(queries::DELETE_EXPIRED_SESSIONS)
            .bind(now)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected())
    }

    async fn create_listing(
        &self,
        owner_id: i64,
        listing: NewListing,
    ) -> Result<Listing, AppError> {
        Ok(sqlx::query_as::<_, Listing>(queries::INSERT_LISTING)
            .bind(owner_id)
            .bind(&listing.title)
            .bind(&listing.description)
            .bind(listing.starting_price)
            .bind(&listing.image_url)
            .bind(listing.category.slug())
            .fetch_one(self.db.pool())
            .await?)
    }

    async fn find_listing(&self, listing_id: i64) -> Result<Option<Listing>, AppError> {
        Ok(sqlx::query_as::<_, Listing>(queries::GET_LISTING)
            .bind(listing_id)
            .fetch_optional(self.db.pool())
            .await?)
    }

    async fn active_listings(&self, category: Option<Category>) -> Result<Vec<Listing>, AppError> {
        Ok(sqlx::query_as::<_, Listing>(queries::GET_ACTIVE_LISTINGS)
            .bind(category.map(Category::slug))
            .fetch_all(self.db.pool())
            .await?)
    }

    async fn close_listing(&self, listing_id: i64) -> Result<Option<Listing>, AppError> {
        self.db
            .transaction(|tx| {
                Box::pin(async move {
                    let listing = sqlx::query_as::<_, Listing>(queries::GET_LISTING_FOR_UPDATE)
                        .bind(listing_id)
                        .fetch_optional(&mut **tx)
                        .await?
                        .ok_or(AppError::NotFound)?;
                    if !listing.active {
                        return Ok(None);
                    }

                    let winner = sqlx::query_as::<_, Bid>(queries::GET_HIGHEST_BID)
                        .bind(listing_id)
                        .fetch_optional(&mut **tx)
                        .await?;

                    let closed = sqlx::query_as::<_, Listing>(queries::CLOSE_LISTING)
                        .bind(listing_id)
                        .bind(winner.map(|bid| bid.bidder_id))
                        .fetch_optional(&mut **tx)
                        .await?;
                    Ok::<_, AppError>(closed)
                })
            })
            .await
    }

    async fn place_bid(
        &self,
        listing_id: i64,
        bidder_id: i64,
        amount: Money,
    ) -> Result<Bid, AppError> {
        let bid = self
            .db
            .transaction(|tx| {
                Box::pin(async move {
                    let listing = sqlx::query_as::<_, Listing>(queries::GET_LISTING_FOR_UPDATE)
                        .bind(listing_id)
                        .fetch_optional(&mut **tx)
                        .await?
                        .ok_or(AppError::NotFound)?;

                    let has_bids: bool = sqlx::query_scalar(queries::HAS_BIDS)
                        .bind(listing_id)
                        .fetch_one(&mut **tx)
                        .await?;

                    rules::evaluate_bid(&listing, has_bids, amount)?;

                    sqlx::query(queries::UPDATE_CURRENT_PRICE)
                        .bind(amount)
                        .bind(listing_id)
                        .execute(&mut **tx)
                        .await?;

                    let bid = sqlx::query_as::<_, Bid>(queries::INSERT_BID)
                        .bind(listing_id)
                        .bind(bidder_id)
                        .bind(amount)
                        .fetch_one(&mut **tx)
                        .await?;
                    Ok::<_, AppError>(bid)
                })
            })
            .await?;

        info!(
            "{:<12} --> 입찰 저장 listing: {}, 금액: {}",
            "Store", listing_id, bid.amount
        );
        Ok(bid)
    }

    async fn bids_for_listing(&self, listing_id: i64) -> Result<Vec<Bid>, AppError> {
        Ok(sqlx::query_as::<_, Bid>(queries::GET_LISTING_BIDS)
            .bind(listing_id)
            .fetch_all(self.db.pool())
            .await?)
    }

    async fn add_comment(
        &self,
        listing_id: i64,
        author_id: i64,
        content: &str,
    ) -> Result<Comment, AppError> {
        Ok(sqlx::query_as::<_, Comment>(queries::INSERT_COMMENT)
            .bind(listing_id)
            .bind(author_id)
            .bind(content)
            .fetch_one(self.db.pool())
            .await?)
    }

    async fn comments_for_listing(&self, listing_id: i64) -> Result<Vec<Comment>, AppError> {
        Ok(sqlx::query_as::<_, Comment>(queries::GET_LISTING_COMMENTS)
            .bind(listing_id)
            .fetch_all(self.db.pool())
            .await?)
    }

    async fn is_watching(&self, user_id: i64, listing_id: i64) -> Result<bool, AppError> {
        Ok(sqlx::query_scalar(queries::IS_WATCHING)
            .bind(user_id)
            .bind(listing_id)
            .fetch_one(self.db.pool())
            .await?)
    }

    async fn add_to_watchlist(&self, user_id: i64, listing_id: i64) -> Result<bool, AppError> {
        if !self.listing_exists(listing_id).await? {
            return Err(AppError::NotFound);
        }
        let result = sqlx::query(queries::INSERT_WATCH)
            .bind(user_id)
            .bind(listing_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn remove_from_watchlist(
        &self,
        user_id: i64,
        listing_id: i64,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(queries::DELETE_WATCH)
            .bind(user_id)
            .bind(listing_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn toggle_watchlist(&self, user_id: i64, listing_id: i64) -> Result<bool, AppError> {
        if !self.listing_exists(listing_id).await? {
            return Err(AppError::NotFound);
        }
        self.db
            .transaction(|tx| {
                Box::pin(async move {
                    let removed = sqlx::query(queries::DELETE_WATCH)
                        .bind(user_id)
                        .bind(listing_id)
                        .execute(&mut **tx)
                        .await?
                        .rows_affected();
                    if removed > 0 {
                        return Ok(false);
                    }

                    sqlx::query(queries::INSERT_WATCH)
                        .bind(user_id)
                        .bind(listing_id)
                        .execute(&mut **tx)
                        .await?;
                    Ok::<_, AppError>(true)
                })
            })
            .await
    }

    async fn watched_listings(&self, user_id: i64) -> Result<Vec<Listing>, AppError> {
        Ok(sqlx::query_as::<_, Listing>(queries::GET_WATCHED_LISTINGS)
            .bind(user_id)
            .fetch_all(self.db.pool())
            .await?)
    }
}
// endregion: --- Postgres Store
