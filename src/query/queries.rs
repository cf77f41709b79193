// -- 사용자

/// 사용자 생성
pub const INSERT_USER: &str = r#"
    INSERT INTO users (username, email, password_hash)
    VALUES ($1, $2, $3)
    RETURNING id, username, email, password_hash, joined_at
"#;

/// 사용자명으로 조회
pub const GET_USER_BY_USERNAME: &str =
    "SELECT id, username, email, password_hash, joined_at FROM users WHERE username = $1";

pub const GET_USER_BY_ID: &str =
    "SELECT id, username, email, password_hash, joined_at FROM users WHERE id = $1";

// -- 상품

/// 상품 생성
pub const INSERT_LISTING: &str = r#"
    INSERT INTO listings (name, initial_price, image, category, owner_id)
    VALUES ($1, $2, $3, $4, $5)
    RETURNING id, name, initial_price, image, category, created_at, status, owner_id
"#;

/// 상품 조회
pub const GET_LISTING: &str =
    "SELECT id, name, initial_price, image, category, created_at, status, owner_id FROM listings WHERE id = $1";

/// 상품 조회 + 행 잠금 (입찰 / 종료 직렬화)
pub const LOCK_LISTING: &str =
    "SELECT id, name, initial_price, image, category, created_at, status, owner_id FROM listings WHERE id = $1 FOR UPDATE";

/// 진행 중 상품 목록
pub const GET_PENDING_LISTINGS: &str =
    "SELECT id, name, initial_price, image, category, created_at, status, owner_id FROM listings WHERE status = 'Pending' ORDER BY id";

/// 사용자의 진행 중 상품 목록
pub const GET_PENDING_LISTINGS_BY_OWNER: &str =
    "SELECT id, name, initial_price, image, category, created_at, status, owner_id FROM listings WHERE status = 'Pending' AND owner_id = $1 ORDER BY id";

/// 상품 상태 변경
pub const UPDATE_LISTING_STATUS: &str = "UPDATE listings SET status = $1 WHERE id = $2";

// -- 입찰 장부

/// 현재 최고 입찰 조회
pub const GET_CURRENT_BID: &str =
    "SELECT listing_id, bidder_id, amount, placed_at FROM bids WHERE listing_id = $1";

/// 여러 상품의 현재 입찰 조회
pub const GET_CURRENT_BIDS: &str =
    "SELECT listing_id, bidder_id, amount, placed_at FROM bids WHERE listing_id = ANY($1)";

/// 장부 갱신 (상품당 한 행을 덮어씀)
pub const UPSERT_BID: &str = r#"
    INSERT INTO bids (listing_id, bidder_id, amount, placed_at)
    VALUES ($1, $2, $3, NOW())
    ON CONFLICT (listing_id)
    DO UPDATE SET bidder_id = EXCLUDED.bidder_id, amount = EXCLUDED.amount, placed_at = EXCLUDED.placed_at
    RETURNING listing_id, bidder_id, amount, placed_at
"#;

/// 상품별 입찰 행 수
pub const COUNT_BIDS: &str = "SELECT COUNT(*) AS count FROM bids WHERE listing_id = $1";

// -- 댓글

/// 댓글 생성
pub const INSERT_COMMENT: &str = r#"
    INSERT INTO comments (listing_id, author_id, text)
    VALUES ($1, $2, $3)
    RETURNING id, listing_id, author_id, text, added_at
"#;

/// 상품 댓글 목록
pub const GET_COMMENTS: &str =
    "SELECT id, listing_id, author_id, text, added_at FROM comments WHERE listing_id = $1 ORDER BY added_at, id";

// -- 관심 목록

/// 관심 목록 추가 (이미 있으면 무시)
pub const INSERT_WATCHLIST: &str = r#"
    INSERT INTO watchlist (user_id, listing_id)
    VALUES ($1, $2)
    ON CONFLICT (user_id, listing_id) DO NOTHING
    RETURNING listing_id
"#;

/// 관심 목록 제거
pub const DELETE_WATCHLIST: &str =
    "DELETE FROM watchlist WHERE user_id = $1 AND listing_id = $2 RETURNING listing_id";

/// 사용자 관심 목록 수
pub const COUNT_WATCHLIST: &str = "SELECT COUNT(*) AS count FROM watchlist WHERE user_id = $1";

/// 사용자 관심 목록 상품
pub const GET_WATCHLIST_LISTINGS: &str = r#"
    SELECT l.id, l.name, l.initial_price, l.image, l.category, l.created_at, l.status, l.owner_id
    FROM watchlist w
    JOIN listings l ON l.id = w.listing_id
    WHERE w.user_id = $1
    ORDER BY w.added_at, w.listing_id
"#;
