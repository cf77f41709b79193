use auctions::config::Config;
use auctions::routes::create_router;
use auctions::state::AppState;
use auctions::store::MemoryStore;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;

/// 테스트용 서버 (메모리 저장소, 임의 포트)
struct TestApp {
    base_url: String,
    client: Client,
}

fn test_config() -> Config {
    Config {
        bcrypt_cost: 4,
        ..Config::default()
    }
}

async fn spawn_app() -> TestApp {
    spawn_app_with(test_config()).await
}

async fn spawn_app_with(config: Config) -> TestApp {
    let state = AppState::new(Arc::new(MemoryStore::new()), config);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, create_router(state).into_make_service())
            .await
            .unwrap();
    });

    TestApp {
        base_url: format!("http://{}", addr),
        client: Client::new(),
    }
}

impl TestApp {
    async fn get(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut req = self.client.get(format!("{}{}", self.base_url, path));
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        let res = req.send().await.expect("Failed to send request");
        let status = res.status();
        (status, res.json().await.unwrap_or(Value::Null))
    }

    async fn post(&self, path: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        let mut req = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(&body);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        let res = req.send().await.expect("Failed to send request");
        let status = res.status();
        (status, res.json().await.unwrap_or(Value::Null))
    }

    /// 회원 가입 후 토큰 반환
    async fn register(&self, username: &str) -> String {
        let (status, body) = self
            .post(
                "/register",
                None,
                json!({
                    "username": username,
                    "email": format!("{}@baz.com", username),
                    "password": "baz",
                    "confirmation": "baz"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["token"].as_str().unwrap().to_string()
    }

    /// 상품 등록 후 id 반환
    async fn create_listing(&self, token: &str, name: &str, initial: i64, category: &str) -> i64 {
        let (status, body) = self
            .post(
                "/addListing",
                Some(token),
                json!({ "name": name, "initial": initial, "category": category }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["listing"]["id"].as_i64().unwrap()
    }

    async fn bid(&self, token: &str, listing_id: i64, amount: i64) -> (StatusCode, Value) {
        self.post(
            "/bid",
            Some(token),
            json!({ "list_id": listing_id, "bid": amount }),
        )
        .await
    }
}

/// 공개 경로와 로그인 필요 경로
#[tokio::test]
async fn test_public_and_protected_routes() {
    let app = spawn_app().await;

    let (status, body) = app.get("/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["listings"], json!([]));

    let (status, _) = app.get("/categories", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.get("/watchlist", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHORIZED");

    let (status, _) = app.get("/user_listings", Some("not-a-token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

/// 회원 가입 / 로그인
#[tokio::test]
async fn test_register_and_login() {
    let app = spawn_app().await;

    let (status, body) = app
        .post(
            "/register",
            None,
            json!({ "username": "foo", "email": "", "password": "a", "confirmation": "b" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Passwords must match.");

    app.register("foo").await;
    let (status, body) = app
        .post(
            "/register",
            None,
            json!({ "username": "foo", "email": "", "password": "x", "confirmation": "x" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Username already taken.");

    let (status, _) = app
        .post("/login", None, json!({ "username": "foo", "password": "wrong" }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .post("/login", None, json!({ "username": "foo", "password": "baz" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["user"].get("password_hash").is_none());

    let token = body["token"].as_str().unwrap();
    let (status, _) = app.get("/user_listings", Some(token)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.post("/logout", Some(token), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["level"], "success");
}

/// 입찰 규칙: 100 -> 110 성공, 105 낮음, 110 동일, 150 성공
#[tokio::test]
async fn test_bid_sequence() {
    let app = spawn_app().await;
    let seller = app.register("seller").await;
    let bidder = app.register("bidder").await;
    let listing_id = app.create_listing(&seller, "dummy1", 100, "Other").await;

    let (status, body) = app.bid(&bidder, listing_id, 100).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "LOW_BID");

    let (status, body) = app.bid(&bidder, listing_id, 110).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Bid Placed Successfully!");
    assert_eq!(body["bid"]["amount"], "110");

    let (status, body) = app.bid(&seller, listing_id, 105).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "LOW_BID");
    assert_eq!(body["message"], "The bid you placed was lower than needed.");

    let (status, body) = app.bid(&seller, listing_id, 110).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "TIE_BID");
    assert_eq!(
        body["message"],
        "The bid you placed was the same as the current bid"
    );

    let (status, _) = app.bid(&bidder, listing_id, 150).await;
    assert_eq!(status, StatusCode::OK);

    // NUMERIC(10,2) 범위 밖 금액
    for amount in [json!("150.001"), json!("1000000000000")] {
        let (status, body) = app
            .post(
                "/bid",
                Some(&bidder),
                json!({ "list_id": listing_id, "bid": amount }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", amount);
        assert_eq!(body["error"], "INVALID_INPUT");
    }

    let (status, view) = app.get(&format!("/listing/{}", listing_id), Some(&bidder)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["view"], "open");
    assert_eq!(view["bid"]["amount"], "150");
    assert_eq!(view["suggested_bid"], "160");

    let (_, index) = app.get("/", None).await;
    assert_eq!(index["listings"][0]["bid"]["amount"], "150");
}

/// 최대 시작가 상품에도 범위 내 입찰만 허용
#[tokio::test]
async fn test_bid_at_price_ceiling() {
    let app = spawn_app().await;
    let seller = app.register("seller").await;
    let bidder = app.register("bidder").await;
    let (status, body) = app
        .post(
            "/addListing",
            Some(&seller),
            json!({ "name": "vase", "initial": "99999999.98" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    let listing_id = body["listing"]["id"].as_i64().unwrap();

    let bid = |amount: &'static str| {
        app.post(
            "/bid",
            Some(&bidder),
            json!({ "list_id": listing_id, "bid": amount }),
        )
    };

    let (status, body) = bid("100000000").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Bid is too large");

    let (status, body) = bid("99999999.99").await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["bid"]["amount"], "99999999.99");
}

/// 재시작 후 같은 id 를 받은 다른 사용자로 인증되지 않음
#[tokio::test]
async fn test_token_from_previous_run_is_rejected() {
    let shared = test_config();
    let before = spawn_app_with(shared.clone()).await;
    let after = spawn_app_with(shared).await;

    let alice = before.register("alice").await;
    let bob = after.register("bob").await;
    let listing_id = after.create_listing(&bob, "bobs lamp", 10, "Decoration").await;

    let (status, body) = after
        .post(&format!("/close_listing/{}", listing_id), Some(&alice), json!({}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHORIZED");

    let (_, view) = after.get(&format!("/listing/{}", listing_id), Some(&bob)).await;
    assert_eq!(view["view"], "open");

    // 시크릿을 지정하지 않은 프로세스끼리는 토큰 호환 없음
    let other = spawn_app().await;
    let (status, _) = other.get("/watchlist", Some(&alice)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

/// 존재하지 않는 상품 입찰
#[tokio::test]
async fn test_bid_on_missing_listing() {
    let app = spawn_app().await;
    let bidder = app.register("bidder").await;

    let (status, body) = app.bid(&bidder, 404, 10).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");

    let (status, _) = app.get("/listing/404", Some(&bidder)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// 상품 종료: 소유자만, 되돌릴 수 없음, 낙찰자 화면
#[tokio::test]
async fn test_close_listing_lifecycle() {
    let app = spawn_app().await;
    let seller = app.register("seller").await;
    let bidder = app.register("bidder").await;
    let other = app.register("other").await;
    let listing_id = app.create_listing(&seller, "lamp", 20, "Decoration").await;
    let path = format!("/close_listing/{}", listing_id);

    app.bid(&bidder, listing_id, 25).await;

    let (status, body) = app.post(&path, Some(&bidder), json!({})).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Unable to close listing! Authentication error.");

    let (status, body) = app.post(&path, Some(&seller), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["listing"]["status"], "Closed");

    let (status, body) = app.post(&path, Some(&seller), json!({})).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "ALREADY_CLOSED");

    let (status, body) = app.bid(&other, listing_id, 1_000).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "ALREADY_ENDED");

    let listing_path = format!("/listing/{}", listing_id);
    let (_, won) = app.get(&listing_path, Some(&bidder)).await;
    assert_eq!(won["view"], "won");
    assert_eq!(won["bid"]["amount"], "25");

    let (_, closed) = app.get(&listing_path, Some(&other)).await;
    assert_eq!(closed["view"], "closed");

    let (_, index) = app.get("/", None).await;
    assert_eq!(index["listings"], json!([]));
    let (_, mine) = app.get("/user_listings", Some(&seller)).await;
    assert_eq!(mine["listings"], json!([]));
}

/// 입찰 없이 종료된 상품은 낙찰자 없음
#[tokio::test]
async fn test_close_without_bids() {
    let app = spawn_app().await;
    let seller = app.register("seller").await;
    let listing_id = app.create_listing(&seller, "chair", 5, "Antiques").await;

    app.post(&format!("/close_listing/{}", listing_id), Some(&seller), json!({}))
        .await;
    let (_, view) = app
        .get(&format!("/listing/{}", listing_id), Some(&seller))
        .await;
    assert_eq!(view["view"], "closed");
}

/// 관심 목록 추가 / 제거
#[tokio::test]
async fn test_watchlist_flow() {
    let app = spawn_app().await;
    let user = app.register("watcher").await;
    let listing_id = app.create_listing(&user, "clock", 50, "Antiques").await;

    let (status, body) = app
        .post(&format!("/removefrom/{}", listing_id), Some(&user), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["level"], "warning");
    assert_eq!(body["message"], "Cannot remove from empty WatchList.");

    let add_path = format!("/addtowatchlist/{}", listing_id);
    let (_, body) = app.post(&add_path, Some(&user), json!({})).await;
    assert_eq!(body["level"], "success");
    let (_, body) = app.post(&add_path, Some(&user), json!({})).await;
    assert_eq!(body["level"], "warning");
    assert_eq!(body["message"], "Item already present in your WatchList.");

    let (status, _) = app.post("/addtowatchlist/999", Some(&user), json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = app.post("/removefrom/999", Some(&user), json!({})).await;
    assert_eq!(body["message"], "Item not in your WatchList.");

    let (_, body) = app.get("/watchlist", Some(&user)).await;
    assert_eq!(body["listings"][0]["listing"]["id"], listing_id);

    let (_, body) = app
        .post(&format!("/removefrom/{}", listing_id), Some(&user), json!({}))
        .await;
    assert_eq!(body["level"], "success");

    let (_, body) = app.get("/watchlist", Some(&user)).await;
    assert_eq!(body["message"], "Nothing in your watchlist");
}

/// 댓글 작성
#[tokio::test]
async fn test_comments() {
    let app = spawn_app().await;
    let user = app.register("critic").await;
    let listing_id = app.create_listing(&user, "vase", 10, "Decoration").await;

    let (status, body) = app
        .post(
            "/comment",
            Some(&user),
            json!({ "list_id": listing_id, "content": "Lovely glaze" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["text"], "Lovely glaze");

    let (status, _) = app
        .post(
            "/comment",
            Some(&user),
            json!({ "list_id": listing_id, "content": "   " }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(
            "/comment",
            Some(&user),
            json!({ "list_id": listing_id, "content": "x".repeat(401) }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post("/comment", Some(&user), json!({ "list_id": 999, "content": "hi" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, view) = app
        .get(&format!("/listing/{}", listing_id), Some(&user))
        .await;
    assert_eq!(view["comments"].as_array().unwrap().len(), 1);
}

/// 카테고리별 조회와 상품 검증
#[tokio::test]
async fn test_categories_and_listing_validation() {
    let app = spawn_app().await;
    let user = app.register("seller").await;

    let (status, body) = app.get("/addListing", Some(&user)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["categories"].as_array().unwrap().len(), 7);

    let (status, _) = app
        .post(
            "/addListing",
            Some(&user),
            json!({ "name": "", "initial": 0 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(
            "/addListing",
            Some(&user),
            json!({ "name": "ring", "initial": 10, "category": "Jewels" }),
        )
        .await;
    assert!(status.is_client_error());

    let ring = app.create_listing(&user, "ring", 200, "Accessories").await;
    let scarf = app.create_listing(&user, "scarf", 15, "Clothes").await;
    let watch = app.create_listing(&user, "watch", 300, "Accessories").await;
    app.post(&format!("/close_listing/{}", scarf), Some(&user), json!({}))
        .await;

    let (_, body) = app.get("/categories", None).await;
    let groups = body["category_list"].as_object().unwrap();
    assert_eq!(groups.len(), 1);
    let ids: Vec<i64> = groups["Accessories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["listing"]["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![ring, watch]);
}
