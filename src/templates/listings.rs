// region:    --- Imports
use super::{escape, field_error, form_alert, layout, layout_with_notice};
use crate::accounts::model::User;
use crate::auction::commands::ListingForm;
use crate::auction::model::{Category, Comment, Listing};
use crate::bidding::model::Bid;
use crate::error::ValidationErrors;
use crate::session::Flash;
use chrono::{DateTime, Utc};
use std::fmt::Write;

// endregion: --- Imports

fn timestamp(at: &DateTime<Utc>) -> String {
    at.format("%b %-d, %Y, %H:%M").to_string()
}

// region:    --- Listing Lists
fn listing_card(out: &mut String, listing: &Listing) {
    let image = if listing.image_url.is_empty() {
        String::new()
    } else {
        format!(
            r#"<img class="img-thumbnail" style="max-height: 150px" src="{}" alt="{}">"#,
            escape(&listing.image_url),
            escape(&listing.title)
        )
    };
    let status = if listing.active { "" } else { r#" <span class="badge badge-secondary">Closed</span>"# };

    let _ = write!(
        out,
        r#"<div class="card mb-3"><div class="card-body">
{image}
<h4 class="card-title"><a href="/listing/{id}">{title}</a>{status}</h4>
<p class="card-text"><strong>Price:</strong> ${price}</p>
<p class="card-text">{description}</p>
<p class="card-text"><small class="text-muted">{category} &middot; Created {created}</small></p>
</div></div>"#,
        id = listing.id,
        title = escape(&listing.title),
        price = listing.current_price,
        description = escape(&listing.description),
        category = escape(listing.category.display_name()),
        created = timestamp(&listing.created_at),
    );
}

/// 상품 목록 페이지 (진행 중 상품, 카테고리, 관심 목록 공용)
pub fn listings_page(
    title: &str,
    viewer: Option<&User>,
    flash: Option<Flash>,
    listings: &[Listing],
    empty_message: &str,
) -> String {
    let mut body = format!("<h2>{}</h2>", escape(title));
    if listings.is_empty() {
        let _ = write!(body, "<p>{}</p>", escape(empty_message));
    }
    for listing in listings {
        listing_card(&mut body, listing);
    }
    layout(title, viewer, flash, &body)
}

pub fn categories_page(viewer: Option<&User>, flash: Option<Flash>) -> String {
    let mut body = String::from("<h2>Categories</h2><ul>");
    for category in Category::ALL {
        let _ = write!(
            body,
            r#"<li><a href="/category/{}">{}</a></li>"#,
            category.slug(),
            escape(category.display_name())
        );
    }
    body.push_str("</ul>");
    layout("Categories", viewer, flash, &body)
}
// endregion: --- Listing Lists

// region:    --- Create Listing
pub fn create_page(viewer: &User, form: &ListingForm, errors: Option<&ValidationErrors>) -> String {
    let selected = form.category.trim();
    let mut options = String::new();
    for category in Category::ALL {
        let is_selected = if selected.is_empty() {
            category == Category::default()
        } else {
            category.slug() == selected
        };
        let _ = write!(
            options,
            r#"<option value="{}"{}>{}</option>"#,
            category.slug(),
            if is_selected { " selected" } else { "" },
            escape(category.display_name())
        );
    }

    let body = format!(
        r#"<h2>Create Listing</h2>
<form action="/create" method="post">
  <div class="form-group">
    <label for="title">Title</label>
    <input class="form-control" id="title" type="text" name="title" maxlength="128" value="{title}">
    {title_error}
  </div>
  <div class="form-group">
    <label for="description">Description</label>
    <textarea class="form-control" id="description" name="description" rows="4">{description}</textarea>
    {description_error}
  </div>
  <div class="form-group">
    <label for="starting_bid">Starting bid</label>
    <input class="form-control" id="starting_bid" type="text" inputmode="decimal" name="starting_bid" value="{starting_bid}">
    {starting_bid_error}
  </div>
  <div class="form-group">
    <label for="image_url">Image URL</label>
    <input class="form-control" id="image_url" type="url" name="image_url" value="{image_url}">
    {image_url_error}
  </div>
  <div class="form-group">
    <label for="category">Category</label>
    <select class="form-control" id="category" name="category">{options}</select>
    {category_error}
  </div>
  <input class="btn btn-primary" type="submit" value="Create">
</form>"#,
        title = escape(&form.title),
        description = escape(&form.description),
        starting_bid = escape(&form.starting_bid),
        image_url = escape(&form.image_url),
        title_error = field_error(errors, "title"),
        description_error = field_error(errors, "description"),
        starting_bid_error = field_error(errors, "starting_bid"),
        image_url_error = field_error(errors, "image_url"),
        category_error = field_error(errors, "category"),
    );
    layout("Create Listing", Some(viewer), None, &body)
}
// endregion: --- Create Listing

// region:    --- Listing Detail
/// 상품 상세 페이지 데이터
pub struct ListingPage<'a> {
    pub viewer: Option<&'a User>,
    pub flash: Option<Flash>,
    pub listing: &'a Listing,
    pub owner: &'a str,
    pub bids: &'a [Bid],
    pub comments: &'a [Comment],
    pub watching: bool,
    pub winner: Option<&'a str>,
    pub bid_error: Option<&'a str>,
    pub bid_input: &'a str,
    pub comment_error: Option<&'a str>,
    pub comment_input: &'a str,
}

impl ListingPage<'_> {
    fn is_owner(&self) -> bool {
        self.viewer
            .is_some_and(|u| self.listing.is_owned_by(u.id))
    }

    fn is_winner(&self) -> bool {
        matches!((self.viewer, self.listing.winner_id), (Some(u), Some(w)) if u.id == w)
    }

    fn is_leading(&self) -> bool {
        matches!((self.viewer, self.bids.first()), (Some(u), Some(b)) if u.id == b.bidder_id)
    }
}

pub fn listing_page(page: &ListingPage<'_>) -> String {
    let listing = page.listing;
    let mut body = format!("<h2>Listing: {}</h2>", escape(&listing.title));

    if !listing.active {
        body.push_str(r#"<div class="alert alert-info">This auction is closed. "#);
        if page.is_winner() {
            body.push_str("<strong>You won this auction!</strong>");
        } else if let Some(winner) = page.winner {
            let _ = write!(body, "Winner: <strong>{}</strong>", escape(winner));
        } else {
            body.push_str("There were no bids.");
        }
        body.push_str("</div>");
    }

    if page.viewer.is_some() {
        let (action, label) = if page.watching {
            ("unwatch", "Remove from Watchlist")
        } else {
            ("watch", "Add to Watchlist")
        };
        let _ = write!(
            body,
            r#"<form action="/listing/{}/{}" method="post" class="mb-3"><input class="btn btn-sm btn-outline-secondary" type="submit" value="{}"></form>"#,
            listing.id, action, label
        );
    }

    if !listing.image_url.is_empty() {
        let _ = write!(
            body,
            r#"<img class="img-fluid mb-3" style="max-height: 400px" src="{}" alt="{}">"#,
            escape(&listing.image_url),
            escape(&listing.title)
        );
    }

    let _ = write!(
        body,
        r#"<p>{}</p><h3>${}</h3>"#,
        escape(&listing.description),
        listing.current_price
    );

    let bid_count = page.bids.len();
    let _ = write!(
        body,
        "<p>{} bid(s) so far.{}</p>",
        bid_count,
        if page.is_leading() { " Your bid is the current bid." } else { "" }
    );

    if page.viewer.is_some() && listing.active {
        let _ = write!(
            body,
            r#"<form action="/listing/{id}/bid" method="post" class="mb-3">
{alert}
<div class="form-group">
  <label for="amount">Your bid: </label>
  <input class="form-control" id="amount" type="text" inputmode="decimal" name="amount" value="{amount}">
</div>
<input class="btn btn-primary" type="submit" value="Place Bid">
</form>"#,
            id = listing.id,
            alert = form_alert(page.bid_error),
            amount = escape(page.bid_input),
        );
    }

    if page.is_owner() && listing.active {
        let _ = write!(
            body,
            r#"<form action="/listing/{}/close" method="post" class="mb-3"><input class="btn btn-danger" type="submit" value="Close Auction"></form>"#,
            listing.id
        );
    }

    let _ = write!(
        body,
        r#"<h4>Details</h4><ul>
<li>Listed by: {owner}</li>
<li>Category: <a href="/category/{slug}">{category}</a></li>
<li>Starting bid: ${starting}</li>
<li>Created {created}</li>
</ul>"#,
        owner = escape(page.owner),
        slug = listing.category.slug(),
        category = escape(listing.category.display_name()),
        starting = listing.starting_price,
        created = timestamp(&listing.created_at),
    );

    if !page.bids.is_empty() {
        body.push_str("<h4>Bid History</h4><ul>");
        for bid in page.bids {
            let _ = write!(
                body,
                "<li>${} by {} on {}</li>",
                bid.amount,
                escape(&bid.bidder),
                timestamp(&bid.created_at)
            );
        }
        body.push_str("</ul>");
    }

    body.push_str("<h4>Comments</h4>");
    if page.comments.is_empty() {
        body.push_str("<p>No comments yet.</p>");
    }
    for comment in page.comments {
        let _ = write!(
            body,
            r#"<div class="border-bottom mb-2"><p class="mb-1">{}</p><small class="text-muted">{} &middot; {}</small></div>"#,
            escape(&comment.content),
            escape(&comment.author),
            timestamp(&comment.created_at)
        );
    }

    if page.viewer.is_some() {
        let _ = write!(
            body,
            r#"<form action="/listing/{id}/comment" method="post" class="mt-3">
{alert}
<div class="form-group">
  <label for="content">New comment: </label>
  <textarea class="form-control" id="content" name="content" rows="3">{content}</textarea>
</div>
<input class="btn btn-secondary" type="submit" value="Comment">
</form>"#,
            id = listing.id,
            alert = form_alert(page.comment_error),
            content = escape(page.comment_input),
        );
    }

    let notice = page.flash.map(|flash| match (flash, page.winner) {
        (Flash::ClosedWithWinner, Some(winner)) => (
            flash.level(),
            format!("Auction closed, winner is: {}", winner),
        ),
        _ => (flash.level(), flash.message().to_string()),
    });
    layout_with_notice(&listing.title, page.viewer, notice, &body)
}
// endregion: --- Listing Detail

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auction::money::Money;

    fn user(id: i64, name: &str) -> User {
        User {
            id,
            username: name.to_string(),
            email: String::new(),
            password_hash: String::new(),
            created_at: Utc::now(),
        }
    }

    fn listing(active: bool, winner_id: Option<i64>) -> Listing {
        Listing {
            id: 7,
            owner_id: 1,
            title: "Vinyl <collection>".to_string(),
            description: "Jazz records".to_string(),
            starting_price: Money::from_cents(3000),
            current_price: Money::from_cents(3500),
            image_url: String::new(),
            category: Category::Music,
            active,
            winner_id,
            created_at: Utc::now(),
        }
    }

    fn page<'a>(viewer: Option<&'a User>, listing: &'a Listing) -> ListingPage<'a> {
        ListingPage {
            viewer,
            flash: None,
            listing,
            owner: "seller",
            bids: &[],
            comments: &[],
            watching: false,
            winner: None,
            bid_error: None,
            bid_input: "",
            comment_error: None,
            comment_input: "",
        }
    }

    #[test]
    fn test_anonymous_viewer_gets_no_forms() {
        let item = listing(true, None);
        let html = listing_page(&page(None, &item));
        assert!(html.contains("Listing: Vinyl &lt;collection&gt;"));
        assert!(html.contains("$35.00"));
        assert!(!html.contains("/listing/7/bid"));
        assert!(!html.contains("/listing/7/comment"));
        assert!(!html.contains("Close Auction"));
    }

    #[test]
    fn test_owner_sees_close_button() {
        let owner = user(1, "seller");
        let item = listing(true, None);
        let html = listing_page(&page(Some(&owner), &item));
        assert!(html.contains("/listing/7/close"));
        assert!(html.contains("/listing/7/bid"));
        assert!(html.contains("Add to Watchlist"));
    }

    #[test]
    fn test_winner_is_congratulated() {
        let winner = user(2, "bidder");
        let item = listing(false, Some(2));
        let mut view = page(Some(&winner), &item);
        view.winner = Some("bidder");
        let html = listing_page(&view);
        assert!(html.contains("You won this auction!"));
        assert!(!html.contains("/listing/7/bid"));
    }

    #[test]
    fn test_close_notice_names_winner() {
        let owner = user(1, "seller");
        let item = listing(false, Some(2));
        let mut view = page(Some(&owner), &item);
        view.flash = Some(Flash::ClosedWithWinner);
        view.winner = Some("bidder");
        let html = listing_page(&view);
        assert!(html.contains("Auction closed, winner is: bidder"));
        assert!(html.contains("Winner: <strong>bidder</strong>"));
    }

    #[test]
    fn test_bid_error_is_inline() {
        let viewer = user(2, "bidder");
        let item = listing(true, None);
        let mut view = page(Some(&viewer), &item);
        view.bid_error = Some("Bid must be higher than the highest bid!");
        view.bid_input = "35";
        let html = listing_page(&view);
        assert!(html.contains("Bid must be higher than the highest bid!"));
        assert!(html.contains(r#"name="amount" value="35""#));
    }

    #[test]
    fn test_create_page_selects_submitted_category() {
        let viewer = user(1, "seller");
        let form = ListingForm {
            category: "toys".to_string(),
            ..ListingForm::default()
        };
        let errors = ValidationErrors::single("title", "This field is required.");
        let html = create_page(&viewer, &form, Some(&errors));
        assert!(html.contains(r#"<option value="toys" selected>"#));
        assert!(html.contains("This field is required."));
    }
}
