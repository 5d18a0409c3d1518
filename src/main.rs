// region:    --- Imports
use auction_site::config::Config;
use auction_site::database::{DatabaseManager, PostgresStore};
use auction_site::handlers::{create_router, AppState};
use auction_site::scheduler::SessionScheduler;
use auction_site::store::{AuctionStore, MemoryStore};
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

    // 저장소 선택: DATABASE_URL 이 있으면 Postgres, 없으면 메모리
    let store: Arc<dyn AuctionStore> = if config.database_url.is_some() {
        let db_manager = Arc::new(DatabaseManager::new(&config).await?);
        if let Err(e) = db_manager.initialize_database().await {
            error!("{:<12} --> 데이터베이스 초기화 실패: {:?}", "Main", e);
            return Err(e.into());
        }
        info!("{:<12} --> 데이터베이스 초기화 성공", "Main");
        Arc::new(PostgresStore::new(db_manager))
    } else {
        warn!(
            "{:<12} --> DATABASE_URL 미설정, 메모리 저장소 사용 (재시작 시 데이터 유실)",
            "Main"
        );
        Arc::new(MemoryStore::new())
    };

    // 만료 세션 정리
    let scheduler = SessionScheduler::new(Arc::clone(&store), config.session_cleanup_interval());
    scheduler.start();

    let address = config.server_address();
    let routes_all = create_router(AppState::new(store, config));

    let listener = TcpListener::bind(&address).await?;
    info!(
        "{:<12} --> Web Server: Listening on {}",
        "Main",
        listener.local_addr()?
    );

    if let Err(err) = axum::serve(listener, routes_all.into_make_service()).await {
        error!("{:<12} --> Server error: {}", "Main", err);
    }
    Ok(())
}
// endregion: --- Main
