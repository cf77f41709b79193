//! 저장소 추상화
//! 1. PostgreSQL (`DatabaseManager`)
//! 2. 프로세스 메모리 (`MemoryStore`, DATABASE_URL 미설정 시 / 테스트용)
// region:    --- Imports
use crate::auth::model::{NewUser, User};
use crate::bidding::commands::BidOutcome;
use crate::bidding::model::Bid;
use crate::comment::model::Comment;
use crate::error::AppResult;
use crate::listing::model::{CloseRejection, Listing, ListingSummary, NewListing};
use crate::watchlist::{WatchlistAddition, WatchlistRemoval};
use async_trait::async_trait;
use rust_decimal::Decimal;

// endregion: --- Imports

pub mod memory;

pub use memory::MemoryStore;

// region:    --- Auction Store Trait
/// 경매 저장소 트레이트
#[async_trait]
pub trait AuctionStore: Send + Sync {
    // -- 사용자
    /// 사용자 생성 (username 중복 시 Conflict)
    async fn create_user(&self, user: NewUser) -> AppResult<User>;
    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>>;
    async fn find_user_by_id(&self, user_id: i64) -> AppResult<Option<User>>;

    // -- 상품
    async fn create_listing(&self, owner_id: i64, listing: NewListing) -> AppResult<Listing>;
    async fn get_listing(&self, listing_id: i64) -> AppResult<Option<Listing>>;
    /// 진행 중(Pending)인 상품 목록 + 현재 입찰
    async fn pending_listings(&self) -> AppResult<Vec<ListingSummary>>;
    /// 사용자의 진행 중 상품 목록 + 현재 입찰
    async fn pending_listings_by_owner(&self, owner_id: i64) -> AppResult<Vec<ListingSummary>>;
    /// 상품 종료 (존재하지 않으면 NotFound)
    async fn close_listing(
        &self,
        listing_id: i64,
        user_id: i64,
    ) -> AppResult<Result<Listing, CloseRejection>>;

    // -- 입찰 장부
    async fn current_bid(&self, listing_id: i64) -> AppResult<Option<Bid>>;
    /// 입찰 검증과 장부 갱신을 원자적으로 수행
    async fn place_bid(
        &self,
        listing_id: i64,
        bidder_id: i64,
        amount: Decimal,
    ) -> AppResult<BidOutcome>;
    async fn bid_count(&self, listing_id: i64) -> AppResult<i64>;

    // -- 댓글
    async fn add_comment(&self, listing_id: i64, author_id: i64, text: String)
        -> AppResult<Comment>;
    async fn comments_for(&self, listing_id: i64) -> AppResult<Vec<Comment>>;

    // -- 관심 목록
    async fn add_to_watchlist(&self, user_id: i64, listing_id: i64)
        -> AppResult<WatchlistAddition>;
    async fn remove_from_watchlist(
        &self,
        user_id: i64,
        listing_id: i64,
    ) -> AppResult<WatchlistRemoval>;
    async fn watchlist(&self, user_id: i64) -> AppResult<Vec<ListingSummary>>;
}

// endregion: --- Auction Store Trait
