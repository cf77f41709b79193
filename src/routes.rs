use crate::handlers;
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// 요청 본문 최대 크기 (1MB)
const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// 라우터 설정
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::handle_index))
        .route("/login", post(handlers::handle_login))
        .route("/logout", post(handlers::handle_logout))
        .route("/register", post(handlers::handle_register))
        .route("/listing/:id", get(handlers::handle_get_listing))
        .route("/bid", post(handlers::handle_bid))
        .route("/comment", post(handlers::handle_comment))
        .route("/watchlist", get(handlers::handle_watchlist))
        .route(
            "/addtowatchlist/:id",
            post(handlers::handle_add_to_watchlist),
        )
        .route(
            "/removefrom/:id",
            post(handlers::handle_remove_from_watchlist),
        )
        .route("/categories", get(handlers::handle_categories))
        .route(
            "/addListing",
            get(handlers::handle_add_listing_form).post(handlers::handle_add_listing),
        )
        .route("/user_listings", get(handlers::handle_user_listings))
        .route("/close_listing/:id", post(handlers::handle_close_listing))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .with_state(state)
}
