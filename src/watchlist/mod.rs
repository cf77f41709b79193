//! 사용자별 관심 목록
//! 저장은 `AuctionStore` 구현체가 (user_id, listing_id) 단위로 담당한다

/// 관심 목록 추가 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchlistAddition {
    Added,
    AlreadyPresent,
}

/// 관심 목록 제거 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchlistRemoval {
    Removed,
    /// 관심 목록이 비어 있음
    Empty,
    NotPresent,
}

impl WatchlistAddition {
    pub fn is_success(&self) -> bool {
        matches!(self, WatchlistAddition::Added)
    }

    pub fn message(&self) -> &'static str {
        match self {
            WatchlistAddition::Added => "Successfully added item to your WatchList.",
            WatchlistAddition::AlreadyPresent => "Item already present in your WatchList.",
        }
    }
}

impl WatchlistRemoval {
    pub fn is_success(&self) -> bool {
        matches!(self, WatchlistRemoval::Removed)
    }

    pub fn message(&self) -> &'static str {
        match self {
            WatchlistRemoval::Removed => "Successfully removed item from your WatchList.",
            WatchlistRemoval::Empty => "Cannot remove from empty WatchList.",
            WatchlistRemoval::NotPresent => "Item not in your WatchList.",
        }
    }
}
