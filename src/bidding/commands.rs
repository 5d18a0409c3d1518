/// 입찰 관련 커맨드 처리
// region:    --- Imports
use super::model::Bid;
use crate::auction::money::Money;
use crate::error::AppError;
use crate::store::AuctionStore;
use serde::Deserialize;
use tracing::{info, warn};

// endregion: --- Imports

// region:    --- Commands
/// 입찰 폼 (금액은 문자열로 받아 검증)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BidForm {
    #[serde(default)]
    pub amount: String,
}

/// 입찰 명령
#[derive(Debug, Clone, Copy)]
pub struct PlaceBidCommand {
    pub listing_id: i64,
    pub bidder_id: i64,
    pub amount: Money,
}

impl PlaceBidCommand {
    pub fn from_form(listing_id: i64, bidder_id: i64, form: &BidForm) -> Result<Self, AppError> {
        if form.amount.trim().is_empty() {
            return Err(AppError::validation("amount", "This field is required."));
        }
        let amount = Money::parse_positive(&form.amount)
            .map_err(|e| AppError::validation("amount", e.to_string()))?;
        Ok(Self {
            listing_id,
            bidder_id,
            amount,
        })
    }
}

/// 입찰
/// 입찰 규칙 검증과 현재 가격 갱신은 저장소가 하나의 트랜잭션에서 처리한다.
pub async fn handle_place_bid(
    cmd: PlaceBidCommand,
    store: &dyn AuctionStore,
) -> Result<Bid, AppError> {
    info!("{:<12} --> 입찰 요청 처리 시작: {:?}", "Command", cmd);

    match store
        .place_bid(cmd.listing_id, cmd.bidder_id, cmd.amount)
        .await
    {
        Ok(bid) => {
            info!(
                "{:<12} --> 입찰 성공 listing: {}, 현재 가격: {}",
                "Command", bid.listing_id, bid.amount
            );
            Ok(bid)
        }
        Err(AppError::BidRejected(reason)) => {
            warn!("{:<12} --> 입찰 거절: {}", "Command", reason);
            Err(AppError::BidRejected(reason))
        }
        Err(e) => Err(e),
    }
}
// endregion: --- Commands
