/// 만료 세션 정리 스케줄러
// region:    --- Imports
use crate::error::AppError;
use crate::store::AuctionStore;
use chrono::Utc;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration};
use tracing::{debug, error};

// endregion: --- Imports

// region:    --- Session Scheduler
pub struct SessionScheduler {
    store: Arc<dyn AuctionStore>,
    period: Duration,
}

impl SessionScheduler {
    pub fn new(store: Arc<dyn AuctionStore>, period: Duration) -> Self {
        Self { store, period }
    }

    /// 주기적으로 만료 세션 삭제
    pub fn start(&self) -> JoinHandle<()> {
        let store = Arc::clone(&self.store);
        let period = self.period;
        tokio::spawn(async move {
            let mut ticker = interval(period);
            loop {
                ticker.tick().await;
                if let Err(e) = Self::purge_expired_sessions(store.as_ref()).await {
                    error!(
                        "{:<12} --> 만료 세션 정리 중 오류 발생: {:?}",
                        "Scheduler", e
                    );
                }
            }
        })
    }

    /// 만료 세션 삭제
    pub async fn purge_expired_sessions(store: &dyn AuctionStore) -> Result<u64, AppError> {
        let removed = store.delete_expired_sessions(Utc::now()).await?;
        debug!("{:<12} --> 만료 세션 {}건 삭제", "Scheduler", removed);
        Ok(removed)
    }
}
// endregion: --- Session Scheduler
