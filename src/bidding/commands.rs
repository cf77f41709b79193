/// 입찰 관련 커맨드 처리
/// 1. 입찰 검증 규칙
/// 2. 입찰
// region:    --- Imports
use super::model::Bid;
use crate::error::AppResult;
use crate::listing::model::Listing;
use crate::money::check_amount;
use crate::store::AuctionStore;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{info, warn};

// endregion: --- Imports

/// 다음 입찰 추천 증가폭
pub const SUGGESTED_INCREMENT: i64 = 10;

// region:    --- Commands
/// 입찰 명령
#[derive(Debug, Deserialize, Clone)]
pub struct PlaceBidCommand {
    pub list_id: i64,
    pub bid: Decimal,
}

/// 입찰 거부 사유
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidRejection {
    /// 이미 종료된 상품
    ListingClosed,
    /// 최저 입찰가 이하
    TooLow { floor: Decimal },
    /// 현재 최고 입찰가와 동일
    Tie { current: Decimal },
}

impl BidRejection {
    pub fn code(&self) -> &'static str {
        match self {
            BidRejection::ListingClosed => "ALREADY_ENDED",
            BidRejection::TooLow { .. } => "LOW_BID",
            BidRejection::Tie { .. } => "TIE_BID",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            BidRejection::ListingClosed => "This listing is closed.",
            BidRejection::TooLow { .. } => "The bid you placed was lower than needed.",
            BidRejection::Tie { .. } => "The bid you placed was the same as the current bid",
        }
    }
}

/// 입찰 처리 결과
#[derive(Debug, Clone, PartialEq)]
pub enum BidOutcome {
    Accepted(Bid),
    Rejected(BidRejection),
}

/// 1. 입찰 검증 규칙
/// 입찰 없음: amount > 시작가, 입찰 있음: amount > 현재 최고가
pub fn check_bid(
    listing: &Listing,
    current: Option<&Bid>,
    amount: Decimal,
) -> Result<(), BidRejection> {
    if !listing.is_open() {
        return Err(BidRejection::ListingClosed);
    }

    match current {
        None if amount <= listing.initial => Err(BidRejection::TooLow {
            floor: listing.initial,
        }),
        Some(bid) if amount < bid.amount => Err(BidRejection::TooLow { floor: bid.amount }),
        Some(bid) if amount == bid.amount => Err(BidRejection::Tie {
            current: bid.amount,
        }),
        _ => Ok(()),
    }
}

/// 상품 페이지에 보여줄 추천 입찰가
pub fn suggested_bid(listing: &Listing, current: Option<&Bid>) -> Decimal {
    current.map(|b| b.amount).unwrap_or(listing.initial) + Decimal::from(SUGGESTED_INCREMENT)
}

/// 2. 입찰
pub async fn handle_place_bid(
    store: &dyn AuctionStore,
    bidder_id: i64,
    cmd: PlaceBidCommand,
) -> AppResult<BidOutcome> {
    info!(
        "{:<12} --> 입찰 요청 처리 시작: {:?} bidder={}",
        "Command", cmd, bidder_id
    );

    check_amount(cmd.bid, "Bid")?;

    let outcome = store.place_bid(cmd.list_id, bidder_id, cmd.bid).await?;
    match &outcome {
        BidOutcome::Accepted(bid) => info!(
            "{:<12} --> 입찰 성공: listing={} amount={}",
            "Command", bid.listing_id, bid.amount
        ),
        BidOutcome::Rejected(reason) => warn!(
            "{:<12} --> 입찰 거부: listing={} reason={:?}",
            "Command", cmd.list_id, reason
        ),
    }
    Ok(outcome)
}

// endregion: --- Commands
