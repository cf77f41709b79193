// region:    --- Imports
use super::model::Listing;
use crate::bidding::commands::suggested_bid;
use crate::bidding::model::Bid;
use crate::comment::model::Comment;
use rust_decimal::Decimal;
use serde::Serialize;

// endregion: --- Imports

// region:    --- Listing View
/// 상품 상세 화면
/// 종료된 상품의 낙찰자는 별도 필드 없이 현재 입찰 보유자로 판단한다
#[derive(Debug, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum ListingView {
    Open {
        listing: Listing,
        bid: Option<Bid>,
        comments: Vec<Comment>,
        suggested_bid: Decimal,
    },
    Won {
        listing: Listing,
        bid: Bid,
    },
    Closed {
        listing_id: i64,
        message: &'static str,
    },
}

pub fn resolve_view(
    listing: Listing,
    bid: Option<Bid>,
    comments: Vec<Comment>,
    viewer_id: i64,
) -> ListingView {
    if listing.is_open() {
        let suggested_bid = suggested_bid(&listing, bid.as_ref());
        return ListingView::Open {
            listing,
            bid,
            comments,
            suggested_bid,
        };
    }

    match bid {
        Some(bid) if bid.bidder_id == viewer_id => ListingView::Won { listing, bid },
        _ => ListingView::Closed {
            listing_id: listing.id,
            message: "This listing is closed.",
        },
    }
}

// endregion: --- Listing View

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::model::{Category, ListingStatus};
    use chrono::Utc;

    fn listing(status: ListingStatus) -> Listing {
        Listing {
            id: 3,
            name: "vase".to_string(),
            initial: Decimal::from(100),
            image: None,
            category: Category::Decoration,
            created_at: Utc::now(),
            status,
            owner_id: 1,
        }
    }

    fn bid(bidder_id: i64) -> Bid {
        Bid {
            listing_id: 3,
            bidder_id,
            amount: Decimal::from(130),
            placed_at: Utc::now(),
        }
    }

    #[test]
    fn open_listing_shows_suggested_bid() {
        match resolve_view(listing(ListingStatus::Pending), Some(bid(2)), vec![], 5) {
            ListingView::Open { suggested_bid, .. } => {
                assert_eq!(suggested_bid, Decimal::from(140))
            }
            other => panic!("unexpected view: {:?}", other),
        }
    }

    #[test]
    fn closed_listing_shows_win_only_to_holder() {
        let won = resolve_view(listing(ListingStatus::Closed), Some(bid(2)), vec![], 2);
        assert!(matches!(won, ListingView::Won { .. }));

        let lost = resolve_view(listing(ListingStatus::Closed), Some(bid(2)), vec![], 9);
        assert!(matches!(lost, ListingView::Closed { listing_id: 3, .. }));
    }

    #[test]
    fn closed_listing_without_bids_has_no_winner() {
        let view = resolve_view(listing(ListingStatus::Closed), None, vec![], 1);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["view"], "closed");
    }
}
