// region:    --- Users
/// 사용자 생성
pub const INSERT_USER: &str = r#"
    INSERT INTO users (username, email, password_hash)
    VALUES ($1, $2, $3)
    RETURNING id, username, email, password_hash, created_at
"#;

/// 사용자 조회
pub const GET_USER: &str =
    "SELECT id, username, email, password_hash, created_at FROM users WHERE id = $1";

/// 사용자 이름으로 조회
pub const GET_USER_BY_USERNAME: &str =
    "SELECT id, username, email, password_hash, created_at FROM users WHERE username = $1";
// endregion: --- Users

// region:    --- Sessions
/// 세션 생성
pub const INSERT_SESSION: &str = r#"
    INSERT INTO sessions (token, user_id, expires_at)
    VALUES ($1, $2, $3)
    RETURNING token, user_id, expires_at, created_at
"#;

/// 유효한 세션 조회
pub const GET_LIVE_SESSION: &str = r#"
    SELECT token, user_id, expires_at, created_at
    FROM sessions
    WHERE token = $1 AND expires_at > $2
"#;

/// 세션 삭제
pub const DELETE_SESSION: &str = "DELETE FROM sessions WHERE token = $1";

/// 만료된 세션 삭제
pub const DELETE_EXPIRED_SESSIONS: &str = "DELETE FROM sessions WHERE expires_at <= $1";
// endregion: --- Sessions

// region:    --- Listings
/// 상품 생성 (현재 가격 = 시작 가격)
pub const INSERT_LISTING: &str = r#"
    INSERT INTO listings (owner_id, title, description, starting_price, current_price, image_url, category)
    VALUES ($1, $2, $3, $4, $4, $5, $6)
    RETURNING id, owner_id, title, description, starting_price, current_price, image_url, category, active, winner_id, created_at
"#;

/// 상품 조회
pub const GET_LISTING: &str = r#"
    SELECT id, owner_id, title, description, starting_price, current_price, image_url, category, active, winner_id, created_at
    FROM listings
    WHERE id = $1
"#;

/// 상품 조회 (입찰 처리를 위한 행 잠금)
pub const GET_LISTING_FOR_UPDATE: &str = r#"
    SELECT id, owner_id, title, description, starting_price, current_price, image_url, category, active, winner_id, created_at
    FROM listings
    WHERE id = $1
    FOR UPDATE
"#;

/// 진행 중인 상품 조회 ($1 이 NULL 이면 전체 카테고리)
pub const GET_ACTIVE_LISTINGS: &str = r#"
    SELECT id, owner_id, title, description, starting_price, current_price, image_url, category, active, winner_id, created_at
    FROM listings
    WHERE active AND ($1::TEXT IS NULL OR category = $1)
    ORDER BY created_at DESC, id DESC
"#;

/// 경매 종료
pub const CLOSE_LISTING: &str = r#"
    UPDATE listings
    SET active = FALSE, winner_id = $2
    WHERE id = $1 AND active
    RETURNING id, owner_id, title, description, starting_price, current_price, image_url, category, active, winner_id, created_at
"#;

/// 현재 가격 갱신
pub const UPDATE_CURRENT_PRICE: &str = "UPDATE listings SET current_price = $1 WHERE id = $2";
// endregion: --- Listings

// region:    --- Bids
/// 입찰 존재 여부
pub const HAS_BIDS: &str = "SELECT EXISTS (SELECT 1 FROM bids WHERE listing_id = $1)";

/// 입찰 기록 추가
pub const INSERT_BID: &str = r#"
    WITH inserted AS (
        INSERT INTO bids (listing_id, bidder_id, amount)
        VALUES ($1, $2, $3)
        RETURNING id, listing_id, bidder_id, amount, created_at
    )
    SELECT i.id, i.listing_id, i.bidder_id, u.username AS bidder, i.amount, i.created_at
    FROM inserted i
    JOIN users u ON u.id = i.bidder_id
"#;

/// 입찰 이력 조회
pub const GET_LISTING_BIDS: &str = r#"
    SELECT b.id, b.listing_id, b.bidder_id, u.username AS bidder, b.amount, b.created_at
    FROM bids b
    JOIN users u ON u.id = b.bidder_id
    WHERE b.listing_id = $1
    ORDER BY b.created_at DESC, b.id DESC
"#;

/// 최고 입찰 조회
pub const GET_HIGHEST_BID: &str = r#"
    SELECT b.id, b.listing_id, b.bidder_id, u.username AS bidder, b.amount, b.created_at
    FROM bids b
    JOIN users u ON u.id = b.bidder_id
    WHERE b.listing_id = $1
    ORDER BY b.amount DESC
    LIMIT 1
"#;
// endregion: --- Bids

// region:    --- Comments
/// 댓글 추가
pub const INSERT_COMMENT: &str = r#"
    WITH inserted AS (
        INSERT INTO comments (listing_id, author_id, content)
        VALUES ($1, $2, $3)
        RETURNING id, listing_id, author_id, content, created_at
    )
    SELECT i.id, i.listing_id, i.author_id, u.username AS author, i.content, i.created_at
    FROM inserted i
    JOIN users u ON u.id = i.author_id
"#;

/// 댓글 조회
pub const GET_LISTING_COMMENTS: &str = r#"
    SELECT c.id, c.listing_id, c.author_id, u.username AS author, c.content, c.created_at
    FROM comments c
    JOIN users u ON u.id = c.author_id
    WHERE c.listing_id = $1
    ORDER BY c.created_at ASC, c.id ASC
"#;
// endregion: --- Comments

// region:    --- Watchlist
/// 관심 목록 포함 여부
pub const IS_WATCHING: &str =
    "SELECT EXISTS (SELECT 1 FROM watchlist WHERE user_id = $1 AND listing_id = $2)";

/// 관심 목록 추가
pub const INSERT_WATCH: &str = r#"
    INSERT INTO watchlist (user_id, listing_id)
    VALUES ($1, $2)
    ON CONFLICT (user_id, listing_id) DO NOTHING
"#;

/// 관심 목록 삭제
pub const DELETE_WATCH: &str = "DELETE FROM watchlist WHERE user_id = $1 AND listing_id = $2";

/// 관심 상품 조회
pub const GET_WATCHED_LISTINGS: &str = r#"
    SELECT l.id, l.owner_id, l.title, l.description, l.starting_price, l.current_price, l.image_url, l.category, l.active, l.winner_id, l.created_at
    FROM watchlist w
    JOIN listings l ON l.id = w.listing_id
    WHERE w.user_id = $1
    ORDER BY w.created_at DESC
"#;
// endregion: --- Watchlist
