/// 입찰 수락 규칙
/// 저장소 구현체가 상품 행을 잠근 상태에서 호출한다.
// region:    --- Imports
use crate::auction::model::Listing;
use crate::auction::money::Money;
use thiserror::Error;

// endregion: --- Imports

// region:    --- Bid Rules
/// 입찰 거절 사유
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BidRejection {
    #[error("This auction is closed.")]
    ListingClosed,
    #[error("Bid must be higher than the highest bid!")]
    NotAboveHighestBid { current_price: Money },
    #[error("Bid must be higher or equal to the starting price!")]
    BelowStartingPrice { starting_price: Money },
}

/// 입찰 검증
/// - 종료된 경매는 거절
/// - 기존 입찰이 있으면 현재 가격보다 높아야 함
/// - 첫 입찰은 시작 가격 이상이어야 함
pub fn evaluate_bid(listing: &Listing, has_bids: bool, amount: Money) -> Result<(), BidRejection> {
    if !listing.active {
        return Err(BidRejection::ListingClosed);
    }

    if has_bids {
        if amount <= listing.current_price {
            return Err(BidRejection::NotAboveHighestBid {
                current_price: listing.current_price,
            });
        }
    } else if amount < listing.starting_price {
        return Err(BidRejection::BelowStartingPrice {
            starting_price: listing.starting_price,
        });
    }

    Ok(())
}
// endregion: --- Bid Rules
