// region:    --- Imports
use crate::error::{AppError, AppResult};
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::env;
use tracing::warn;

// endregion: --- Imports

/// 임의 생성 JWT 시크릿 길이
const GENERATED_SECRET_LEN: usize = 48;

// region:    --- Config
/// 환경 변수에서 읽어 들인 서비스 설정
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub bcrypt_cost: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            database_url: None,
            max_connections: 5,
            jwt_secret: generate_secret(),
            token_ttl_hours: 24,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl Config {
    /// 환경 변수로부터 설정 생성
    pub fn from_env() -> AppResult<Self> {
        let defaults = Self::default();

        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.is_empty());

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ if database_url.is_some() => {
                return Err(AppError::Config(
                    "JWT_SECRET must be set when DATABASE_URL is set".to_string(),
                ))
            }
            _ => {
                warn!(
                    "{:<12} --> JWT_SECRET 미설정: 프로세스별 임의 시크릿 사용 (재시작 시 토큰 무효)",
                    "Config"
                );
                defaults.jwt_secret
            }
        };

        Ok(Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            database_url,
            max_connections: parse_var("DATABASE_MAX_CONNECTIONS", defaults.max_connections)?,
            jwt_secret,
            token_ttl_hours: parse_var("TOKEN_TTL_HOURS", defaults.token_ttl_hours)?,
            bcrypt_cost: parse_var("BCRYPT_COST", defaults.bcrypt_cost)?,
        })
    }
}

/// 프로세스마다 새로 만드는 개발용 시크릿
fn generate_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_SECRET_LEN)
        .map(char::from)
        .collect()
}

/// 숫자형 환경 변수 파싱 (없으면 기본값)
fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> AppResult<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} is not a valid number: {}", name, raw))),
        Err(_) => Ok(default),
    }
}

// endregion: --- Config
