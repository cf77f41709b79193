//! 최소한의 사용자 식별 계층
//! bcrypt 비밀번호 해시 + HS256 Bearer 토큰
// region:    --- Imports
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use model::User;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

// endregion: --- Imports

pub mod model;

// region:    --- Token
/// 토큰 클레임
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub uid: i64,
    pub exp: usize,
}

/// 토큰 발급
pub fn issue_token(user: &User, secret: &str, ttl_hours: i64) -> AppResult<String> {
    let exp = (Utc::now() + Duration::hours(ttl_hours)).timestamp();
    let claims = Claims {
        sub: user.username.clone(),
        uid: user.id,
        exp: usize::try_from(exp).unwrap_or(0),
    };
    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?)
}

/// 토큰 검증
pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

// endregion: --- Token

// region:    --- Password
/// 비밀번호 해시 (블로킹 작업이므로 별도 스레드에서 수행)
pub async fn hash_password(password: String, cost: u32) -> AppResult<String> {
    let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
    Ok(hashed)
}

/// 비밀번호 검증
pub async fn verify_password(password: String, hash: String) -> AppResult<bool> {
    let ok = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
    Ok(ok)
}

// endregion: --- Password

// region:    --- Current User
/// 인증된 요청 사용자
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("Login required".to_string()))?
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid authorization header".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("Expected a bearer token".to_string()))?;

        let claims = verify_token(token, &state.config.jwt_secret).map_err(|e| {
            warn!("{:<12} --> 토큰 검증 실패: {}", "Auth", e);
            e
        })?;

        // 토큰의 uid 와 username 이 현재 저장소의 사용자와 일치해야 함
        let user = state
            .store
            .find_user_by_id(claims.uid)
            .await?
            .filter(|user| user.username == claims.sub)
            .ok_or_else(|| {
                warn!(
                    "{:<12} --> 토큰 사용자 없음: uid={} sub={}",
                    "Auth", claims.uid, claims.sub
                );
                AppError::Unauthorized("Unknown user, please log in again".to_string())
            })?;
        debug!("{:<12} --> 인증 사용자: {}", "Auth", user.username);

        Ok(CurrentUser {
            id: user.id,
            username: user.username,
        })
    }
}

// endregion: --- Current User

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: 42,
            username: "foo".to_string(),
            email: "foo@baz.com".to_string(),
            password_hash: String::new(),
            joined_at: Utc::now(),
        }
    }

    #[test]
    fn token_round_trip_keeps_identity() {
        let token = issue_token(&user(), "secret", 1).unwrap();
        let claims = verify_token(&token, "secret").unwrap();
        assert_eq!(claims.uid, 42);
        assert_eq!(claims.sub, "foo");
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = issue_token(&user(), "secret", 1).unwrap();
        assert!(matches!(
            verify_token(&token, "other"),
            Err(AppError::Token(_))
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = issue_token(&user(), "secret", -2).unwrap();
        assert!(verify_token(&token, "secret").is_err());
    }

    #[tokio::test]
    async fn password_hash_verifies() {
        let hash = hash_password("baz".to_string(), 4)
            .await
            .unwrap();
        assert!(verify_password("baz".to_string(), hash.clone()).await.unwrap());
        assert!(!verify_password("nope".to_string(), hash).await.unwrap());
    }
}
