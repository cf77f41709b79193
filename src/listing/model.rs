// region:    --- Imports
use crate::bidding::model::Bid;
use crate::error::{AppError, AppResult};
use crate::money::check_amount;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// endregion: --- Imports

/// 상품명 최대 길이
pub const NAME_MAX_CHARS: usize = 100;

// region:    --- Category
/// 상품 카테고리 (고정 목록)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Category {
    Accessories,
    Antiques,
    Clothes,
    Decoration,
    Electronics,
    #[default]
    Other,
    Valuables,
}

#[derive(Debug, Error)]
#[error("unknown category: {0}")]
pub struct ParseCategoryError(String);

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Accessories,
        Category::Antiques,
        Category::Clothes,
        Category::Decoration,
        Category::Electronics,
        Category::Other,
        Category::Valuables,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Accessories => "Accessories",
            Category::Antiques => "Antiques",
            Category::Clothes => "Clothes",
            Category::Decoration => "Decoration",
            Category::Electronics => "Electronics",
            Category::Other => "Other",
            Category::Valuables => "Valuables",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

impl TryFrom<String> for Category {
    type Error = ParseCategoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// endregion: --- Category

// region:    --- Listing Status
/// 상품 상태: Pending -> Closed (단방향)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListingStatus {
    Pending,
    Closed,
}

#[derive(Debug, Error)]
#[error("unknown listing status: {0}")]
pub struct ParseStatusError(String);

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Pending => "Pending",
            ListingStatus::Closed => "Closed",
        }
    }
}

impl TryFrom<String> for ListingStatus {
    type Error = ParseStatusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "Pending" => Ok(ListingStatus::Pending),
            "Closed" => Ok(ListingStatus::Closed),
            _ => Err(ParseStatusError(value)),
        }
    }
}

// endregion: --- Listing Status

// region:    --- Listing
/// 상품 모델
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Listing {
    pub id: i64,
    pub name: String,
    #[sqlx(rename = "initial_price")]
    pub initial: Decimal,
    pub image: Option<String>,
    #[sqlx(try_from = "String")]
    pub category: Category,
    pub created_at: DateTime<Utc>,
    #[sqlx(try_from = "String")]
    pub status: ListingStatus,
    pub owner_id: i64,
}

/// 상품 종료 거부 사유
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseRejection {
    NotOwner,
    AlreadyClosed,
}

impl CloseRejection {
    pub fn code(&self) -> &'static str {
        match self {
            CloseRejection::NotOwner => "NOT_OWNER",
            CloseRejection::AlreadyClosed => "ALREADY_CLOSED",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            CloseRejection::NotOwner => "Unable to close listing! Authentication error.",
            CloseRejection::AlreadyClosed => "Listing is already closed.",
        }
    }
}

impl Listing {
    pub fn is_open(&self) -> bool {
        self.status == ListingStatus::Pending
    }

    /// 소유자만 종료 가능, 종료 후 되돌릴 수 없음
    pub fn close(&mut self, user_id: i64) -> Result<(), CloseRejection> {
        if self.owner_id != user_id {
            return Err(CloseRejection::NotOwner);
        }
        if self.status == ListingStatus::Closed {
            return Err(CloseRejection::AlreadyClosed);
        }
        self.status = ListingStatus::Closed;
        Ok(())
    }
}

/// 상품 + 현재 최고 입찰
#[derive(Debug, Clone, Serialize)]
pub struct ListingSummary {
    pub listing: Listing,
    pub bid: Option<Bid>,
}

// endregion: --- Listing

// region:    --- New Listing
/// 상품 등록 요청
#[derive(Debug, Clone, Deserialize)]
pub struct NewListing {
    pub name: String,
    pub initial: Decimal,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Category,
}

impl NewListing {
    /// 등록 전 검증 후 정규화된 값 반환
    pub fn validate(self) -> AppResult<NewListing> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::Validation("Listing name must not be empty".to_string()));
        }
        if name.chars().count() > NAME_MAX_CHARS {
            return Err(AppError::Validation(format!(
                "Listing name must be at most {} characters",
                NAME_MAX_CHARS
            )));
        }
        if self.initial < Decimal::ZERO {
            return Err(AppError::Validation(
                "Starting price must not be negative".to_string(),
            ));
        }
        check_amount(self.initial, "Starting price")?;

        let image = self
            .image
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(NewListing {
            name,
            initial: self.initial,
            image,
            category: self.category,
        })
    }
}

// endregion: --- New Listing
