/// 일회성 알림 메시지
/// 리다이렉트하는 POST 핸들러가 쿠키에 코드를 남기고, 다음 페이지 렌더링 시 읽고 지운다.
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

pub const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Warning,
}

impl Level {
    pub fn css_class(self) -> &'static str {
        match self {
            Level::Success => "alert-success",
            Level::Warning => "alert-warning",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    Welcome,
    LoggedOut,
    ListingCreated,
    BidPlaced,
    CommentAdded,
    Watching,
    AlreadyWatching,
    Unwatched,
    NotWatching,
    ClosedWithWinner,
    ClosedWithoutBids,
    AlreadyClosed,
}

impl Flash {
    const ALL: [Flash; 12] = [
        Flash::Welcome,
        Flash::LoggedOut,
        Flash::ListingCreated,
        Flash::BidPlaced,
        Flash::CommentAdded,
        Flash::Watching,
        Flash::AlreadyWatching,
        Flash::Unwatched,
        Flash::NotWatching,
        Flash::ClosedWithWinner,
        Flash::ClosedWithoutBids,
        Flash::AlreadyClosed,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Flash::Welcome => "welcome",
            Flash::LoggedOut => "logged-out",
            Flash::ListingCreated => "listing-created",
            Flash::BidPlaced => "bid-placed",
            Flash::CommentAdded => "comment-added",
            Flash::Watching => "watching",
            Flash::AlreadyWatching => "already-watching",
            Flash::Unwatched => "unwatched",
            Flash::NotWatching => "not-watching",
            Flash::ClosedWithWinner => "closed-winner",
            Flash::ClosedWithoutBids => "closed-no-bids",
            Flash::AlreadyClosed => "already-closed",
        }
    }

    pub fn from_code(code: &str) -> Option<Flash> {
        Self::ALL.into_iter().find(|f| f.code() == code)
    }

    pub fn message(self) -> &'static str {
        match self {
            Flash::Welcome => "Welcome! You are now signed in.",
            Flash::LoggedOut => "You have been logged out.",
            Flash::ListingCreated => "Listing created.",
            Flash::BidPlaced => "Placed bid!",
            Flash::CommentAdded => "Comment added.",
            Flash::Watching => "Added to the watchlist.",
            Flash::AlreadyWatching => "This is already on your watchlist.",
            Flash::Unwatched => "Removed from watchlist.",
            Flash::NotWatching => "This listing was not on your watchlist.",
            Flash::ClosedWithWinner => "Auction closed.",
            Flash::ClosedWithoutBids => "Auction closed, there were no bids.",
            Flash::AlreadyClosed => "This auction is already closed.",
        }
    }

    pub fn level(self) -> Level {
        match self {
            Flash::AlreadyWatching
            | Flash::NotWatching
            | Flash::ClosedWithoutBids
            | Flash::AlreadyClosed => Level::Warning,
            _ => Level::Success,
        }
    }
}

/// 알림 메시지 쿠키 설정
pub fn set(jar: CookieJar, flash: Flash) -> CookieJar {
    jar.add(
        Cookie::build((FLASH_COOKIE, flash.code()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}

/// 알림 메시지를 꺼내고 쿠키 삭제
pub fn take(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    let Some(code) = jar.get(FLASH_COOKIE).map(|c| c.value().to_string()) else {
        return (jar, None);
    };
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));
    (jar, Flash::from_code(&code))
}
