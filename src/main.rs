// region:    --- Imports
use auctions::config::Config;
use auctions::database::DatabaseManager;
use auctions::routes::create_router;
use auctions::state::AppState;
use auctions::store::{AuctionStore, MemoryStore};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
// endregion: --- Imports

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    let config = Config::from_env()?;

    // 저장소 선택: DATABASE_URL 이 있으면 PostgreSQL, 없으면 메모리
    let store: Arc<dyn AuctionStore> = match config.database_url.as_deref() {
        Some(url) => {
            let db_manager = DatabaseManager::new(url, &config).await?;
            if let Err(e) = db_manager.initialize_database().await {
                error!("{:<12} --> 데이터베이스 초기화 실패: {:?}", "Main", e);
                return Err(e.into());
            }
            info!("{:<12} --> 데이터베이스 초기화 성공", "Main");
            Arc::new(db_manager)
        }
        None => {
            warn!(
                "{:<12} --> DATABASE_URL 미설정: 메모리 저장소 사용 (재시작 시 데이터 소멸)",
                "Main"
            );
            Arc::new(MemoryStore::new())
        }
    };

    let bind_addr = config.bind_addr.clone();
    let routes_all = create_router(AppState::new(store, config));

    // 리스너 생성
    let listener = TcpListener::bind(&bind_addr).await?;
    info!(
        "{:<12} --> Web Server: Listening on {}",
        "Main",
        listener.local_addr()?
    );

    // 서버 실행
    if let Err(err) = axum::serve(listener, routes_all.into_make_service()).await {
        error!("{:<12} --> Server error: {}", "Main", err);
    }
    Ok(())
}
// endregion: --- Main
