use auction_site::config::Config;
use auction_site::handlers::{create_router, AppState};
use auction_site::store::MemoryStore;
use reqwest::redirect::Policy;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use tokio::net::TcpListener;

/// 메모리 저장소로 서버를 띄우고 주소 반환
async fn spawn_app() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("리스너 생성 실패");
    let addr = listener.local_addr().expect("주소 조회 실패");
    let state = AppState::new(Arc::new(MemoryStore::new()), Config::default());
    tokio::spawn(async move {
        axum::serve(listener, create_router(state).into_make_service())
            .await
            .expect("서버 실행 실패");
    });
    format!("http://{}", addr)
}

/// 쿠키를 유지하고 리다이렉트는 따라가지 않는 클라이언트
fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(Policy::none())
        .build()
        .expect("클라이언트 생성 실패")
}

fn location(response: &reqwest::Response) -> String {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

async fn register(base: &str, client: &Client, username: &str) {
    let response = client
        .post(format!("{base}/register"))
        .form(&[
            ("username", username),
            ("email", &format!("{username}@example.com")),
            ("password", "secret"),
            ("confirmation", "secret"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

/// 상품 등록 후 상세 페이지 경로 반환
async fn create_listing(base: &str, client: &Client, title: &str, category: &str) -> String {
    let response = client
        .post(format!("{base}/create"))
        .form(&[
            ("title", title),
            ("description", "Hardly used"),
            ("starting_bid", "10.00"),
            ("image_url", ""),
            ("category", category),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let path = location(&response);
    assert!(path.starts_with("/listing/"), "unexpected redirect: {path}");
    path
}

async fn bid(base: &str, client: &Client, path: &str, amount: &str) -> reqwest::Response {
    client
        .post(format!("{base}{path}/bid"))
        .form(&[("amount", amount)])
        .send()
        .await
        .unwrap()
}

async fn page(base: &str, client: &Client, path: &str) -> (StatusCode, String) {
    let response = client.get(format!("{base}{path}")).send().await.unwrap();
    let status = response.status();
    (status, response.text().await.unwrap())
}

#[tokio::test]
async fn test_anonymous_user_is_sent_to_login() {
    let base = spawn_app().await;
    let client = client();

    let response = client.get(format!("{base}/create")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let response = client.get(format!("{base}/watchlist")).send().await.unwrap();
    assert_eq!(location(&response), "/login");

    let (status, body) = page(&base, &client, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Not signed in."));
    assert!(body.contains("No active listings."));
}

#[tokio::test]
async fn test_register_shows_welcome_and_rejects_duplicates() {
    let base = spawn_app().await;
    let client = client();
    register(&base, &client, "alice").await;

    let (_, body) = page(&base, &client, "/").await;
    assert!(body.contains("Signed in as <strong>alice</strong>."));
    assert!(body.contains("Welcome! You are now signed in."));

    // 알림은 한 번만 표시
    let (_, body) = page(&base, &client, "/").await;
    assert!(!body.contains("Welcome! You are now signed in."));

    let other = self::client();
    let response = other
        .post(format!("{base}/register"))
        .form(&[
            ("username", "alice"),
            ("email", "a@example.com"),
            ("password", "x"),
            ("confirmation", "x"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.text().await.unwrap().contains("Username already taken."));

    let response = other
        .post(format!("{base}/register"))
        .form(&[
            ("username", "bob"),
            ("email", "b@example.com"),
            ("password", "x"),
            ("confirmation", "y"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.text().await.unwrap().contains("Passwords must match."));
}

#[tokio::test]
async fn test_login_and_logout() {
    let base = spawn_app().await;
    let client = client();
    register(&base, &client, "carol").await;

    let response = client.get(format!("{base}/logout")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let (_, body) = page(&base, &client, "/").await;
    assert!(body.contains("You have been logged out."));
    assert!(body.contains("Not signed in."));

    let response = client
        .post(format!("{base}/login"))
        .form(&[("username", "carol"), ("password", "wrong")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response
        .text()
        .await
        .unwrap()
        .contains("Invalid username and/or password."));

    let response = client
        .post(format!("{base}/login"))
        .form(&[("username", "carol"), ("password", "secret")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let (_, body) = page(&base, &client, "/").await;
    assert!(body.contains("Signed in as <strong>carol</strong>."));
}

#[tokio::test]
async fn test_create_listing_validation() {
    let base = spawn_app().await;
    let client = client();
    register(&base, &client, "dave").await;

    let response = client
        .post(format!("{base}/create"))
        .form(&[
            ("title", ""),
            ("description", "No title"),
            ("starting_bid", "abc"),
            ("category", "books"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response.text().await.unwrap();
    assert!(body.contains("This field is required."));
    assert!(body.contains("Enter a number."));
    assert!(body.contains("No title"));
}

#[tokio::test]
async fn test_bidding_and_closing_an_auction() {
    let base = spawn_app().await;
    let seller = client();
    let buyer = client();
    register(&base, &seller, "seller").await;
    register(&base, &buyer, "buyer").await;

    let path = create_listing(&base, &seller, "Guitar", "music").await;
    let (_, body) = page(&base, &seller, &path).await;
    assert!(body.contains("Listing created."));
    assert!(body.contains("$10.00"));

    let response = bid(&base, &buyer, &path, "9.99").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.text().await.unwrap().contains("starting price"));

    let response = bid(&base, &buyer, &path, "10.00").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = bid(&base, &buyer, &path, "10.00").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response
        .text()
        .await
        .unwrap()
        .contains("Bid must be higher than the highest bid!"));

    let response = bid(&base, &buyer, &path, "12.50").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let (_, body) = page(&base, &buyer, &path).await;
    assert!(body.contains("Placed bid!"));
    assert!(body.contains("$12.50"));
    assert!(body.contains("2 bid(s) so far. Your bid is the current bid."));

    // 소유자가 아니면 종료 불가
    let response = buyer
        .post(format!("{base}{path}/close"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = seller
        .post(format!("{base}{path}/close"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let (_, body) = page(&base, &seller, &path).await;
    assert!(body.contains("Auction closed, winner is: buyer"));
    assert!(body.contains("Winner: <strong>buyer</strong>"));

    let (_, body) = page(&base, &buyer, &path).await;
    assert!(body.contains("You won this auction!"));

    let response = bid(&base, &buyer, &path, "20.00").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.text().await.unwrap().contains("This auction is closed."));

    let (_, body) = page(&base, &buyer, "/").await;
    assert!(!body.contains("Guitar"));

    let response = seller
        .post(format!("{base}{path}/close"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let (_, body) = page(&base, &seller, &path).await;
    assert!(body.contains("This auction is already closed."));
}

#[tokio::test]
async fn test_watchlist_and_comments() {
    let base = spawn_app().await;
    let client = client();
    register(&base, &client, "erin").await;
    let path = create_listing(&base, &client, "Lamp", "home").await;

    let response = client
        .post(format!("{base}{path}/toggle-watch"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let (_, body) = page(&base, &client, "/watchlist").await;
    assert!(body.contains("Lamp"));

    let response = client
        .post(format!("{base}{path}/watch"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let (_, body) = page(&base, &client, &path).await;
    assert!(body.contains("This is already on your watchlist."));
    assert!(body.contains("Remove from Watchlist"));

    client
        .post(format!("{base}{path}/toggle-watch"))
        .send()
        .await
        .unwrap();
    let (_, body) = page(&base, &client, "/watchlist").await;
    assert!(body.contains("Your watchlist is empty."));

    let response = client
        .post(format!("{base}{path}/comment"))
        .form(&[("content", "   ")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = client
        .post(format!("{base}{path}/comment"))
        .form(&[("content", "Does it <really> work?")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let (_, body) = page(&base, &client, &path).await;
    assert!(body.contains("Does it &lt;really&gt; work?"));
}

#[tokio::test]
async fn test_categories_and_missing_pages() {
    let base = spawn_app().await;
    let client = client();
    register(&base, &client, "frank").await;
    create_listing(&base, &client, "Novel", "books").await;
    create_listing(&base, &client, "Racket", "sport").await;

    let (status, body) = page(&base, &client, "/categories").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("/category/books"));

    let (status, body) = page(&base, &client, "/category/books").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Novel"));
    assert!(!body.contains("Racket"));

    let (status, _) = page(&base, &client, "/category/spaceships").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = page(&base, &client, "/listing/9999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = page(&base, &client, "/no-such-page").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let response = client.get(format!("{base}/health")).send().await.unwrap();
    let health: serde_json::Value = response.json().await.unwrap();
    assert_eq!(health["status"], "ok");
}
