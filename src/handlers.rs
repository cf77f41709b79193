// region:    --- Imports
use crate::auth::model::{LoginCommand, NewUser, RegisterCommand};
use crate::auth::{self, CurrentUser};
use crate::bidding::commands::{handle_place_bid, BidOutcome, BidRejection, PlaceBidCommand};
use crate::comment::model::CommentCommand;
use crate::error::{AppError, AppResult};
use crate::listing::category::group_by_category;
use crate::listing::model::{Category, CloseRejection, NewListing};
use crate::listing::view::resolve_view;
use crate::notice::{Level, Notice};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::info;

// endregion: --- Imports

// region:    --- Account Handlers

/// 회원 가입
pub async fn handle_register(
    State(state): State<AppState>,
    Json(cmd): Json<RegisterCommand>,
) -> AppResult<impl IntoResponse> {
    info!("{:<12} --> 회원 가입 요청: {}", "Handler", cmd.username);
    cmd.validate()?;

    let password_hash = auth::hash_password(cmd.password, state.config.bcrypt_cost).await?;
    let user = state
        .store
        .create_user(NewUser {
            username: cmd.username.trim().to_string(),
            email: cmd.email.trim().to_string(),
            password_hash,
        })
        .await?;

    let token = auth::issue_token(&user, &state.config.jwt_secret, state.config.token_ttl_hours)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "token": token, "user": user })),
    ))
}

/// 로그인
pub async fn handle_login(
    State(state): State<AppState>,
    Json(cmd): Json<LoginCommand>,
) -> AppResult<impl IntoResponse> {
    info!("{:<12} --> 로그인 요청: {}", "Handler", cmd.username);
    let invalid = || AppError::Unauthorized("Invalid username and/or password.".to_string());

    let user = state
        .store
        .find_user_by_username(cmd.username.trim())
        .await?
        .ok_or_else(invalid)?;

    if !auth::verify_password(cmd.password, user.password_hash.clone()).await? {
        return Err(invalid());
    }

    let token = auth::issue_token(&user, &state.config.jwt_secret, state.config.token_ttl_hours)?;
    Ok(Json(json!({ "token": token, "user": user })))
}

/// 로그아웃 (토큰은 클라이언트가 폐기)
pub async fn handle_logout(user: CurrentUser) -> Json<Notice> {
    info!("{:<12} --> 로그아웃: {}", "Handler", user.username);
    Json(Notice::success("Logged out."))
}

// endregion: --- Account Handlers

// region:    --- Listing Handlers

/// 진행 중 상품 목록
pub async fn handle_index(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    info!("{:<12} --> 진행 중 상품 목록", "Handler");
    let listings = state.store.pending_listings().await?;
    Ok(Json(json!({ "listings": listings })))
}

/// 상품 상세
pub async fn handle_get_listing(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(listing_id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    info!("{:<12} --> 상품 상세 id: {}", "Handler", listing_id);
    let listing = state
        .store
        .get_listing(listing_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("listing {}", listing_id)))?;

    let bid = state.store.current_bid(listing_id).await?;
    let comments = if listing.is_open() {
        state.store.comments_for(listing_id).await?
    } else {
        Vec::new()
    };

    Ok(Json(resolve_view(listing, bid, comments, user.id)))
}

/// 상품 등록 화면 (선택 가능한 카테고리)
pub async fn handle_add_listing_form(_user: CurrentUser) -> impl IntoResponse {
    Json(json!({ "categories": Category::ALL }))
}

/// 상품 등록
pub async fn handle_add_listing(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(new_listing): Json<NewListing>,
) -> AppResult<impl IntoResponse> {
    info!("{:<12} --> 상품 등록 요청 owner: {}", "Handler", user.id);
    let new_listing = new_listing.validate()?;
    let listing = state.store.create_listing(user.id, new_listing).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "level": Level::Success,
            "message": "Successfully created your listing.",
            "listing": listing
        })),
    ))
}

/// 내 진행 중 상품 목록
pub async fn handle_user_listings(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<impl IntoResponse> {
    info!("{:<12} --> 내 상품 목록 owner: {}", "Handler", user.id);
    let listings = state.store.pending_listings_by_owner(user.id).await?;
    Ok(Json(json!({ "listings": listings })))
}

/// 상품 종료
pub async fn handle_close_listing(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(listing_id): Path<i64>,
) -> AppResult<Response> {
    info!(
        "{:<12} --> 상품 종료 요청 id: {} user: {}",
        "Handler", listing_id, user.id
    );
    let response = match state.store.close_listing(listing_id, user.id).await? {
        Ok(listing) => Json(json!({
            "level": Level::Success,
            "message": "Listing successfully closed.",
            "listing": listing
        }))
        .into_response(),
        Err(rejection) => {
            let status = match rejection {
                CloseRejection::NotOwner => StatusCode::FORBIDDEN,
                CloseRejection::AlreadyClosed => StatusCode::CONFLICT,
            };
            (
                status,
                Json(Notice::warning(rejection.message()).with_code(rejection.code())),
            )
                .into_response()
        }
    };
    Ok(response)
}

/// 카테고리별 진행 중 상품
pub async fn handle_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    info!("{:<12} --> 카테고리별 상품 조회", "Handler");
    let listings = state.store.pending_listings().await?;
    Ok(Json(json!({ "category_list": group_by_category(listings) })))
}

// endregion: --- Listing Handlers

// region:    --- Bid & Comment Handlers

/// 입찰
pub async fn handle_bid(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(cmd): Json<PlaceBidCommand>,
) -> AppResult<Response> {
    let response = match handle_place_bid(state.store.as_ref(), user.id, cmd).await? {
        BidOutcome::Accepted(bid) => Json(json!({
            "level": Level::Success,
            "message": "Bid Placed Successfully!",
            "bid": bid
        }))
        .into_response(),
        BidOutcome::Rejected(rejection) => {
            let floor = match rejection {
                BidRejection::TooLow { floor } => Some(floor),
                BidRejection::Tie { current } => Some(current),
                BidRejection::ListingClosed => None,
            };
            (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "level": Level::Warning,
                    "code": rejection.code(),
                    "message": rejection.message(),
                    "current_price": floor
                })),
            )
                .into_response()
        }
    };
    Ok(response)
}

/// 댓글 작성
pub async fn handle_comment(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(cmd): Json<CommentCommand>,
) -> AppResult<impl IntoResponse> {
    info!("{:<12} --> 댓글 작성 listing: {}", "Handler", cmd.list_id);
    let text = cmd.validated_text()?;
    let comment = state.store.add_comment(cmd.list_id, user.id, text).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

// endregion: --- Bid & Comment Handlers

// region:    --- Watchlist Handlers

/// 관심 목록 조회
pub async fn handle_watchlist(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<impl IntoResponse> {
    info!("{:<12} --> 관심 목록 조회 user: {}", "Handler", user.id);
    let listings = state.store.watchlist(user.id).await?;
    if listings.is_empty() {
        return Ok(Json(json!({
            "listings": listings,
            "message": "Nothing in your watchlist"
        })));
    }
    Ok(Json(json!({ "listings": listings })))
}

/// 관심 목록 추가
pub async fn handle_add_to_watchlist(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(listing_id): Path<i64>,
) -> AppResult<Json<Notice>> {
    let outcome = state.store.add_to_watchlist(user.id, listing_id).await?;
    info!(
        "{:<12} --> 관심 목록 추가 listing: {} 결과: {:?}",
        "Handler", listing_id, outcome
    );
    Ok(Json(Notice::from_outcome(
        outcome.is_success(),
        outcome.message(),
    )))
}

/// 관심 목록 제거
pub async fn handle_remove_from_watchlist(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(listing_id): Path<i64>,
) -> AppResult<Json<Notice>> {
    let outcome = state.store.remove_from_watchlist(user.id, listing_id).await?;
    info!(
        "{:<12} --> 관심 목록 제거 listing: {} 결과: {:?}",
        "Handler", listing_id, outcome
    );
    Ok(Json(Notice::from_outcome(
        outcome.is_success(),
        outcome.message(),
    )))
}

// endregion: --- Watchlist Handlers
