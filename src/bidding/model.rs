use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

// 입찰 장부 모델 (상품당 최고 입찰 1건, 갱신 시 덮어씀)
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Bid {
    pub listing_id: i64,
    pub bidder_id: i64,
    pub amount: Decimal,
    pub placed_at: DateTime<Utc>,
}
