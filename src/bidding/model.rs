use crate::auction::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 입찰 모델 (입찰자 이름 포함)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Bid {
    pub id: i64,
    pub listing_id: i64,
    pub bidder_id: i64,
    pub bidder: String,
    pub amount: Money,
    pub created_at: DateTime<Utc>,
}
