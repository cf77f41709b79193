// region:    --- Imports
use super::DatabaseManager;
use crate::auth::model::{NewUser, User};
use crate::bidding::commands::{check_bid, BidOutcome};
use crate::bidding::model::Bid;
use crate::comment::model::Comment;
use crate::error::{AppError, AppResult};
use crate::listing::model::{CloseRejection, Listing, ListingStatus, ListingSummary, NewListing};
use crate::query::queries;
use crate::store::AuctionStore;
use crate::watchlist::{WatchlistAddition, WatchlistRemoval};
use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::Row;
use std::collections::HashMap;
use tracing::info;

// endregion: --- Imports

// region:    --- Helpers
fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}

impl DatabaseManager {
    /// 상품 목록에 현재 입찰을 붙임
    async fn summarize(&self, listings: Vec<Listing>) -> AppResult<Vec<ListingSummary>> {
        let ids: Vec<i64> = listings.iter().map(|l| l.id).collect();
        let mut bids: HashMap<i64, Bid> = sqlx::query_as::<_, Bid>(queries::GET_CURRENT_BIDS)
            .bind(&ids)
            .fetch_all(self.pool())
            .await?
            .into_iter()
            .map(|b| (b.listing_id, b))
            .collect();

        Ok(listings
            .into_iter()
            .map(|listing| {
                let bid = bids.remove(&listing.id);
                ListingSummary { listing, bid }
            })
            .collect())
    }
}

// endregion: --- Helpers

// region:    --- Postgres Store
#[async_trait]
impl AuctionStore for DatabaseManager {
    async fn create_user(&self, user: NewUser) -> AppResult<User> {
        info!("{:<12} --> 사용자 생성: {}", "Store", user.username);
        sqlx::query_as::<_, User>(queries::INSERT_USER)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .fetch_one(self.pool())
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::Conflict("Username already taken.".to_string())
                } else {
                    e.into()
                }
            })
    }

    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(sqlx::query_as::<_, User>(queries::GET_USER_BY_USERNAME)
            .bind(username)
            .fetch_optional(self.pool())
            .await?)
    }

    async fn find_user_by_id(&self, user_id: i64) -> AppResult<Option<User>> {
        Ok(sqlx::query_as::<_, User>(queries::GET_USER_BY_ID)
            .bind(user_id)
            .fetch_optional(self.pool())
            .await?)
    }

    async fn create_listing(&self, owner_id: i64, listing: NewListing) -> AppResult<Listing> {
        info!("{:<12} --> 상품 생성: owner={}", "Store", owner_id);
        Ok(sqlx::query_as::<_, Listing>(queries::INSERT_LISTING)
            .bind(&listing.name)
            .bind(listing.initial)
            .bind(&listing.image)
            .bind(listing.category.as_str())
            .bind(owner_id)
            .fetch_one(self.pool())
            .await?)
    }

    async fn get_listing(&self, listing_id: i64) -> AppResult<Option<Listing>> {
        info!("{:<12} --> 상품 조회 id: {}", "Store", listing_id);
        Ok(sqlx::query_as::<_, Listing>(queries::GET_LISTING)
            .bind(listing_id)
            .fetch_optional(self.pool())
            .await?)
    }

    async fn pending_listings(&self) -> AppResult<Vec<ListingSummary>> {
        info!("{:<12} --> 진행 중 상품 조회", "Store");
        let listings = sqlx::query_as::<_, Listing>(queries::GET_PENDING_LISTINGS)
            .fetch_all(self.pool())
            .await?;
        self.summarize(listings).await
    }

    async fn pending_listings_by_owner(&self, owner_id: i64) -> AppResult<Vec<ListingSummary>> {
        info!("{:<12} --> 사용자 상품 조회 owner: {}", "Store", owner_id);
        let listings = sqlx::query_as::<_, Listing>(queries::GET_PENDING_LISTINGS_BY_OWNER)
            .bind(owner_id)
            .fetch_all(self.pool())
            .await?;
        self.summarize(listings).await
    }

    async fn close_listing(
        &self,
        listing_id: i64,
        user_id: i64,
    ) -> AppResult<Result<Listing, CloseRejection>> {
        info!("{:<12} --> 상품 종료 id: {}", "Store", listing_id);
        self.transaction(|tx| {
            Box::pin(async move {
                let mut listing = sqlx::query_as::<_, Listing>(queries::LOCK_LISTING)
                    .bind(listing_id)
                    .fetch_optional(&mut **tx)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("listing {}", listing_id)))?;

                if let Err(rejection) = listing.close(user_id) {
                    return Ok(Err(rejection));
                }

                sqlx::query(queries::UPDATE_LISTING_STATUS)
                    .bind(ListingStatus::Closed.as_str())
                    .bind(listing_id)
                    .execute(&mut **tx)
                    .await?;
                Ok(Ok(listing))
            })
        })
        .await
    }

    async fn current_bid(&self, listing_id: i64) -> AppResult<Option<Bid>> {
        Ok(sqlx::query_as::<_, Bid>(queries::GET_CURRENT_BID)
            .bind(listing_id)
            .fetch_optional(self.pool())
            .await?)
    }

    async fn place_bid(
        &self,
        listing_id: i64,
        bidder_id: i64,
        amount: Decimal,
    ) -> AppResult<BidOutcome> {
        info!(
            "{:<12} --> 입찰 장부 갱신 시도 listing: {} amount: {}",
            "Store", listing_id, amount
        );
        self.transaction(|tx| {
            Box::pin(async move {
                // 상품 행을 잠가 동일 상품 입찰을 직렬화
                let listing = sqlx::query_as::<_, Listing>(queries::LOCK_LISTING)
                    .bind(listing_id)
                    .fetch_optional(&mut **tx)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("listing {}", listing_id)))?;

                let current = sqlx::query_as::<_, Bid>(queries::GET_CURRENT_BID)
                    .bind(listing_id)
                    .fetch_optional(&mut **tx)
                    .await?;

                if let Err(rejection) = check_bid(&listing, current.as_ref(), amount) {
                    return Ok(BidOutcome::Rejected(rejection));
                }

                let bid = sqlx::query_as::<_, Bid>(queries::UPSERT_BID)
                    .bind(listing_id)
                    .bind(bidder_id)
                    .bind(amount)
                    .fetch_one(&mut **tx)
                    .await?;
                Ok(BidOutcome::Accepted(bid))
            })
        })
        .await
    }

    async fn bid_count(&self, listing_id: i64) -> AppResult<i64> {
        let row = sqlx::query(queries::COUNT_BIDS)
            .bind(listing_id)
            .fetch_one(self.pool())
            .await?;
        Ok(row.get("count"))
    }

    async fn add_comment(
        &self,
        listing_id: i64,
        author_id: i64,
        text: String,
    ) -> AppResult<Comment> {
        info!("{:<12} --> 댓글 작성 listing: {}", "Store", listing_id);
        sqlx::query_as::<_, Comment>(queries::INSERT_COMMENT)
            .bind(listing_id)
            .bind(author_id)
            .bind(&text)
            .fetch_one(self.pool())
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    AppError::NotFound(format!("listing {}", listing_id))
                } else {
                    e.into()
                }
            })
    }

    async fn comments_for(&self, listing_id: i64) -> AppResult<Vec<Comment>> {
        Ok(sqlx::query_as::<_, Comment>(queries::GET_COMMENTS)
            .bind(listing_id)
            .fetch_all(self.pool())
            .await?)
    }

    async fn add_to_watchlist(
        &self,
        user_id: i64,
        listing_id: i64,
    ) -> AppResult<WatchlistAddition> {
        info!(
            "{:<12} --> 관심 목록 추가 user: {} listing: {}",
            "Store", user_id, listing_id
        );
        let inserted = sqlx::query(queries::INSERT_WATCHLIST)
            .bind(user_id)
            .bind(listing_id)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    AppError::NotFound(format!("listing {}", listing_id))
                } else {
                    AppError::from(e)
                }
            })?;

        Ok(match inserted {
            Some(_) => WatchlistAddition::Added,
            None => WatchlistAddition::AlreadyPresent,
        })
    }

    async fn remove_from_watchlist(
        &self,
        user_id: i64,
        listing_id: i64,
    ) -> AppResult<WatchlistRemoval> {
        info!(
            "{:<12} --> 관심 목록 제거 user: {} listing: {}",
            "Store", user_id, listing_id
        );
        self.transaction(|tx| {
            Box::pin(async move {
                let removed = sqlx::query(queries::DELETE_WATCHLIST)
                    .bind(user_id)
                    .bind(listing_id)
                    .fetch_optional(&mut **tx)
                    .await?;
                if removed.is_some() {
                    return Ok(WatchlistRemoval::Removed);
                }

                let remaining: i64 = sqlx::query(queries::COUNT_WATCHLIST)
                    .bind(user_id)
                    .fetch_one(&mut **tx)
                    .await?
                    .get("count");
                Ok(if remaining == 0 {
                    WatchlistRemoval::Empty
                } else {
                    WatchlistRemoval::NotPresent
                })
            })
        })
        .await
    }

    async fn watchlist(&self, user_id: i64) -> AppResult<Vec<ListingSummary>> {
        let listings = sqlx::query_as::<_, Listing>(queries::GET_WATCHLIST_LISTINGS)
            .bind(user_id)
            .fetch_all(self.pool())
            .await?;
        self.summarize(listings).await
    }
}

// endregion: --- Postgres Store
