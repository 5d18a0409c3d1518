/// 서버 렌더링 HTML
/// 모든 사용자 입력은 `escape` 를 거쳐 출력한다.
// region:    --- Imports
use crate::accounts::model::User;
use crate::error::ValidationErrors;
use crate::session::flash::Level;
use crate::session::Flash;
use axum::http::StatusCode;

// endregion: --- Imports

// region:    --- Modules
pub mod accounts;
pub mod listings;
// endregion: --- Modules

// region:    --- Helpers
/// HTML 이스케이프
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// 필드 에러 메시지
fn field_error(errors: Option<&ValidationErrors>, field: &str) -> String {
    match errors.and_then(|e| e.get(field)) {
        Some(msg) => format!(r#"<div class="invalid-feedback d-block">{}</div>"#, escape(msg)),
        None => String::new(),
    }
}

/// 폼 상단 에러 메시지
fn form_alert(message: Option<&str>) -> String {
    match message {
        Some(msg) => format!(r#"<div class="alert alert-danger">{}</div>"#, escape(msg)),
        None => String::new(),
    }
}
// endregion: --- Helpers

// region:    --- Layout
pub fn layout(title: &str, viewer: Option<&User>, flash: Option<Flash>, body: &str) -> String {
    let notice = flash.map(|f| (f.level(), f.message().to_string()));
    layout_with_notice(title, viewer, notice, body)
}

/// 알림 문구를 페이지에서 직접 만들 때 사용
pub(crate) fn layout_with_notice(
    title: &str,
    viewer: Option<&User>,
    notice: Option<(Level, String)>,
    body: &str,
) -> String {
    let mut nav = String::new();
    nav.push_str(r#"<li class="nav-item"><a class="nav-link" href="/">Active Listings</a></li>"#);
    nav.push_str(r#"<li class="nav-item"><a class="nav-link" href="/categories">Categories</a></li>"#);
    match viewer {
        Some(_) => {
            nav.push_str(r#"<li class="nav-item"><a class="nav-link" href="/watchlist">Watchlist</a></li>"#);
            nav.push_str(r#"<li class="nav-item"><a class="nav-link" href="/create">Create Listing</a></li>"#);
            nav.push_str(r#"<li class="nav-item"><a class="nav-link" href="/logout">Log Out</a></li>"#);
        }
        None => {
            nav.push_str(r#"<li class="nav-item"><a class="nav-link" href="/login">Log In</a></li>"#);
            nav.push_str(r#"<li class="nav-item"><a class="nav-link" href="/register">Register</a></li>"#);
        }
    }

    let greeting = match viewer {
        Some(user) => format!("Signed in as <strong>{}</strong>.", escape(&user.username)),
        None => "Not signed in.".to_string(),
    };

    let flash = match notice {
        Some((level, text)) => format!(
            r#"<div class="alert {}" role="alert">{}</div>"#,
            level.css_class(),
            escape(&text)
        ),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | Auctions</title>
<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap@4.6.2/dist/css/bootstrap.min.css">
</head>
<body>
<div class="container">
<h1>Auctions</h1>
<div>{greeting}</div>
<ul class="nav">{nav}</ul>
<hr>
{flash}
{body}
</div>
</body>
</html>"#,
        title = escape(title),
    )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let reason = status.canonical_reason().unwrap_or("Error");
    let body = format!(
        r#"<h2>{} {}</h2><p>{}</p><p><a href="/">Back to active listings</a></p>"#,
        status.as_u16(),
        escape(reason),
        escape(message)
    );
    layout(reason, None, None, &body)
}
// endregion: --- Layout

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_layout_escapes_title_and_shows_flash() {
        let page = layout("<b>", None, Some(Flash::BidPlaced), "<p>body</p>");
        assert!(page.contains("<title>&lt;b&gt; | Auctions</title>"));
        assert!(page.contains("Placed bid!"));
        assert!(page.contains(r#"href="/login""#));
    }
}
