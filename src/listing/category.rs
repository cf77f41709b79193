use super::model::{Category, ListingSummary};
use std::collections::BTreeMap;

/// 진행 중 상품을 카테고리별로 묶음 (조회 전용)
pub fn group_by_category(
    listings: Vec<ListingSummary>,
) -> BTreeMap<Category, Vec<ListingSummary>> {
    let mut grouped: BTreeMap<Category, Vec<ListingSummary>> = BTreeMap::new();
    for summary in listings.into_iter().filter(|s| s.listing.is_open()) {
        grouped
            .entry(summary.listing.category)
            .or_default()
            .push(summary);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::model::{Listing, ListingStatus};
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn summary(id: i64, category: Category, status: ListingStatus) -> ListingSummary {
        ListingSummary {
            listing: Listing {
                id,
                name: format!("item {}", id),
                initial: Decimal::from(10),
                image: None,
                category,
                created_at: Utc::now(),
                status,
                owner_id: 1,
            },
            bid: None,
        }
    }

    #[test]
    fn groups_open_listings_by_category() {
        let grouped = group_by_category(vec![
            summary(1, Category::Antiques, ListingStatus::Pending),
            summary(2, Category::Clothes, ListingStatus::Pending),
            summary(3, Category::Antiques, ListingStatus::Pending),
            summary(4, Category::Clothes, ListingStatus::Closed),
        ]);

        let antiques: Vec<i64> = grouped[&Category::Antiques]
            .iter()
            .map(|s| s.listing.id)
            .collect();
        assert_eq!(antiques, vec![1, 3]);
        assert_eq!(grouped[&Category::Clothes].len(), 1);
        assert!(!grouped.contains_key(&Category::Electronics));
    }

    #[test]
    fn serializes_with_category_labels_as_keys() {
        let grouped =
            group_by_category(vec![summary(1, Category::Valuables, ListingStatus::Pending)]);
        let json = serde_json::to_value(&grouped).unwrap();
        assert_eq!(json["Valuables"][0]["listing"]["id"], 1);
    }
}
