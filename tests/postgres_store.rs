//! 실제 Postgres 가 필요한 테스트: `DATABASE_URL=... cargo test -- --ignored`
use auction_site::auction::model::{Category, NewListing};
use auction_site::auction::money::Money;
use auction_site::bidding::rules::BidRejection;
use auction_site::config::Config;
use auction_site::database::{DatabaseManager, PostgresStore};
use auction_site::error::AppError;
use auction_site::store::AuctionStore;
use std::sync::Arc;

/// 데이터베이스 매니저 설정
async fn setup() -> PostgresStore {
    let config = Config::from_env().expect("설정 로드 실패");
    let db_manager = DatabaseManager::new(&config)
        .await
        .expect("데이터베이스 연결 실패");
    db_manager
        .initialize_database()
        .await
        .expect("스키마 생성 실패");
    PostgresStore::new(Arc::new(db_manager))
}

fn unique(name: &str) -> String {
    format!("{}-{}", name, uuid::Uuid::new_v4().simple())
}

fn new_listing(title: &str) -> NewListing {
    NewListing {
        title: title.to_string(),
        description: "통합 테스트용 상품".to_string(),
        starting_price: Money::from_cents(1000),
        image_url: String::new(),
        category: Category::Books,
    }
}

#[tokio::test]
#[ignore]
async fn test_bid_rules_against_postgres() {
    let store = setup().await;
    let seller = store
        .create_user(&unique("seller"), "", "hash")
        .await
        .unwrap();
    let buyer = store.create_user(&unique("buyer"), "", "hash").await.unwrap();
    let listing = store
        .create_listing(seller.id, new_listing("입찰 테스트 상품"))
        .await
        .unwrap();

    let err = store
        .place_bid(listing.id, buyer.id, Money::from_cents(999))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::BidRejected(BidRejection::BelowStartingPrice { .. })
    ));

    let bid = store
        .place_bid(listing.id, buyer.id, Money::from_cents(1000))
        .await
        .unwrap();
    assert_eq!(bid.bidder, buyer.username);

    let err = store
        .place_bid(listing.id, buyer.id, Money::from_cents(1000))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::BidRejected(BidRejection::NotAboveHighestBid { .. })
    ));

    let closed = store.close_listing(listing.id).await.unwrap().unwrap();
    assert!(!closed.active);
    assert_eq!(closed.winner_id, Some(buyer.id));
    assert_eq!(closed.current_price, Money::from_cents(1000));
    assert!(store.close_listing(listing.id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore]
async fn test_duplicate_username_and_watchlist_against_postgres() {
    let store = setup().await;
    let name = unique("watcher");
    let user = store.create_user(&name, "", "hash").await.unwrap();
    let err = store.create_user(&name, "", "hash").await.unwrap_err();
    assert!(matches!(err, AppError::UsernameTaken));

    let listing = store
        .create_listing(user.id, new_listing("관심 목록 테스트 상품"))
        .await
        .unwrap();
    assert!(store.add_to_watchlist(user.id, listing.id).await.unwrap());
    assert!(!store.add_to_watchlist(user.id, listing.id).await.unwrap());
    assert!(!store.toggle_watchlist(user.id, listing.id).await.unwrap());
    assert!(store.watched_listings(user.id).await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore]
async fn test_concurrent_equal_bids_against_postgres() {
    let store = Arc::new(setup().await);
    let seller = store
        .create_user(&unique("seller"), "", "hash")
        .await
        .unwrap();
    let listing = store
        .create_listing(seller.id, new_listing("동시 입찰 테스트 상품"))
        .await
        .unwrap();
    let listing_id = listing.id;

    let mut tasks = Vec::new();
    for name in ["first", "second"] {
        let bidder = store.create_user(&unique(name), "", "hash").await.unwrap();
        let store = Arc::clone(&store);
        tasks.push(tokio::spawn(async move {
            store
                .place_bid(listing_id, bidder.id, Money::from_cents(1000))
                .await
        }));
    }

    let mut accepted = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => accepted += 1,
            Err(AppError::BidRejected(BidRejection::NotAboveHighestBid { .. })) => {}
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }
    assert_eq!(accepted, 1);

    let listing = store.find_listing(listing_id).await.unwrap().unwrap();
    assert_eq!(listing.current_price, Money::from_cents(1000));
    assert_eq!(store.bids_for_listing(listing_id).await.unwrap().len(), 1);
}
