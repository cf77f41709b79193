// region:    --- Imports
use super::AuctionStore;
use crate::auth::model::{NewUser, User};
use crate::bidding::commands::{check_bid, BidOutcome};
use crate::bidding::model::Bid;
use crate::comment::model::Comment;
use crate::error::{AppError, AppResult};
use crate::listing::model::{CloseRejection, Listing, ListingStatus, ListingSummary, NewListing};
use crate::watchlist::{WatchlistAddition, WatchlistRemoval};
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use tracing::debug;

// endregion: --- Imports

// region:    --- Memory Store
#[derive(Default)]
struct Tables {
    last_user_id: i64,
    users: BTreeMap<i64, User>,
    last_listing_id: i64,
    listings: BTreeMap<i64, Listing>,
    // listing_id -> 현재 최고 입찰
    bids: HashMap<i64, Bid>,
    last_comment_id: i64,
    comments: Vec<Comment>,
    // user_id -> 추가 순서대로의 listing_id
    watchlists: HashMap<i64, Vec<i64>>,
}

impl Tables {
    fn summarize(&self, listing: &Listing) -> ListingSummary {
        ListingSummary {
            listing: listing.clone(),
            bid: self.bids.get(&listing.id).cloned(),
        }
    }

    fn listing(&self, listing_id: i64) -> AppResult<&Listing> {
        self.listings
            .get(&listing_id)
            .ok_or_else(|| AppError::NotFound(format!("listing {}", listing_id)))
    }
}

/// 프로세스 메모리 저장소 (재시작 시 데이터 소멸)
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuctionStore for MemoryStore {
    async fn create_user(&self, user: NewUser) -> AppResult<User> {
        let mut t = self.tables.write().await;
        if t.users.values().any(|u| u.username == user.username) {
            return Err(AppError::Conflict("Username already taken.".to_string()));
        }
        t.last_user_id += 1;
        let created = User {
            id: t.last_user_id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            joined_at: Utc::now(),
        };
        t.users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let t = self.tables.read().await;
        Ok(t.users.values().find(|u| u.username == username).cloned())
    }

    async fn find_user_by_id(&self, user_id: i64) -> AppResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&user_id).cloned())
    }

    async fn create_listing(&self, owner_id: i64, listing: NewListing) -> AppResult<Listing> {
        let mut t = self.tables.write().await;
        t.last_listing_id += 1;
        let created = Listing {
            id: t.last_listing_id,
            name: listing.name,
            initial: listing.initial,
            image: listing.image,
            category: listing.category,
            created_at: Utc::now(),
            status: ListingStatus::Pending,
            owner_id,
        };
        t.listings.insert(created.id, created.clone());
        debug!("{:<12} --> 상품 생성 id: {}", "MemoryStore", created.id);
        Ok(created)
    }

    async fn get_listing(&self, listing_id: i64) -> AppResult<Option<Listing>> {
        let t = self.tables.read().await;
        Ok(t.listings.get(&listing_id).cloned())
    }

    async fn pending_listings(&self) -> AppResult<Vec<ListingSummary>> {
        let t = self.tables.read().await;
        Ok(t.listings
            .values()
            .filter(|l| l.is_open())
            .map(|l| t.summarize(l))
            .collect())
    }

    async fn pending_listings_by_owner(&self, owner_id: i64) -> AppResult<Vec<ListingSummary>> {
        let t = self.tables.read().await;
        Ok(t.listings
            .values()
            .filter(|l| l.is_open() && l.owner_id == owner_id)
            .map(|l| t.summarize(l))
            .collect())
    }

    async fn close_listing(
        &self,
        listing_id: i64,
        user_id: i64,
    ) -> AppResult<Result<Listing, CloseRejection>> {
        let mut t = self.tables.write().await;
        let listing = t
            .listings
            .get_mut(&listing_id)
            .ok_or_else(|| AppError::NotFound(format!("listing {}", listing_id)))?;
        Ok(listing.close(user_id).map(|_| listing.clone()))
    }

    async fn current_bid(&self, listing_id: i64) -> AppResult<Option<Bid>> {
        let t = self.tables.read().await;
        Ok(t.bids.get(&listing_id).cloned())
    }

    async fn place_bid(
        &self,
        listing_id: i64,
        bidder_id: i64,
        amount: Decimal,
    ) -> AppResult<BidOutcome> {
        let mut t = self.tables.write().await;
        let listing = t.listing(listing_id)?;
        if let Err(rejection) = check_bid(listing, t.bids.get(&listing_id), amount) {
            return Ok(BidOutcome::Rejected(rejection));
        }

        let bid = Bid {
            listing_id,
            bidder_id,
            amount,
            placed_at: Utc::now(),
        };
        t.bids.insert(listing_id, bid.clone());
        Ok(BidOutcome::Accepted(bid))
    }

    async fn bid_count(&self, listing_id: i64) -> AppResult<i64> {
        let t = self.tables.read().await;
        Ok(i64::from(t.bids.contains_key(&listing_id)))
    }

    async fn add_comment(
        &self,
        listing_id: i64,
        author_id: i64,
        text: String,
    ) -> AppResult<Comment> {
        let mut t = self.tables.write().await;
        t.listing(listing_id)?;
        t.last_comment_id += 1;
        let comment = Comment {
            id: t.last_comment_id,
            listing_id,
            author_id,
            text,
            added_at: Utc::now(),
        };
        t.comments.push(comment.clone());
        Ok(comment)
    }

    async fn comments_for(&self, listing_id: i64) -> AppResult<Vec<Comment>> {
        let t = self.tables.read().await;
        Ok(t.comments
            .iter()
            .filter(|c| c.listing_id == listing_id)
            .cloned()
            .collect())
    }

    async fn add_to_watchlist(
        &self,
        user_id: i64,
        listing_id: i64,
    ) -> AppResult<WatchlistAddition> {
        let mut t = self.tables.write().await;
        t.listing(listing_id)?;
        let entries = t.watchlists.entry(user_id).or_default();
        if entries.contains(&listing_id) {
            return Ok(WatchlistAddition::AlreadyPresent);
        }
        entries.push(listing_id);
        Ok(WatchlistAddition::Added)
    }

    async fn remove_from_watchlist(
        &self,
        user_id: i64,
        listing_id: i64,
    ) -> AppResult<WatchlistRemoval> {
        let mut t = self.tables.write().await;
        let Some(entries) = t.watchlists.get_mut(&user_id) else {
            return Ok(WatchlistRemoval::Empty);
        };
        let Some(pos) = entries.iter().position(|id| *id == listing_id) else {
            return Ok(WatchlistRemoval::NotPresent);
        };
        entries.remove(pos);
        if entries.is_empty() {
            t.watchlists.remove(&user_id);
        }
        Ok(WatchlistRemoval::Removed)
    }

    async fn watchlist(&self, user_id: i64) -> AppResult<Vec<ListingSummary>> {
        let t = self.tables.read().await;
        let Some(entries) = t.watchlists.get(&user_id) else {
            return Ok(Vec::new());
        };
        Ok(entries
            .iter()
            .filter_map(|id| t.listings.get(id))
            .map(|l| t.summarize(l))
            .collect())
    }
}

// endregion: --- Memory Store
