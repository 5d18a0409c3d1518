use super::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// region:    --- Category
/// 상품 카테고리
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Books,
    Electronics,
    Fashion,
    Home,
    Music,
    #[default]
    Other,
    Sport,
    Toys,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Books,
        Category::Electronics,
        Category::Fashion,
        Category::Home,
        Category::Music,
        Category::Other,
        Category::Sport,
        Category::Toys,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Category::Books => "books",
            Category::Electronics => "electronics",
            Category::Fashion => "fashion",
            Category::Home => "home",
            Category::Music => "music",
            Category::Other => "other",
            Category::Sport => "sport",
            Category::Toys => "toys",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Category::Books => "Books",
            Category::Electronics => "Electronics",
            Category::Fashion => "Fashion",
            Category::Home => "Home",
            Category::Music => "Music & Instruments",
            Category::Other => "Other (undefined) category",
            Category::Sport => "Sports & Recreation",
            Category::Toys => "Toys",
        }
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.slug() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl TryFrom<String> for Category {
    type Error = UnknownCategory;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
// endregion: --- Category

// region:    --- Listing
/// 경매 상품 모델
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Listing {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub starting_price: Money,
    pub current_price: Money,
    pub image_url: String,
    #[sqlx(try_from = "String")]
    pub category: Category,
    pub active: bool,
    pub winner_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Listing {
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.owner_id == user_id
    }
}

/// 검증을 통과한 신규 상품 정보
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewListing {
    pub title: String,
    pub description: String,
    pub starting_price: Money,
    pub image_url: String,
    pub category: Category,
}
// endregion: --- Listing

// region:    --- Comment
/// 댓글 모델 (작성자 이름 포함)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub listing_id: i64,
    pub author_id: i64,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
// endregion: --- Comment

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_slugs_resolve() {
        for category in Category::ALL {
            assert_eq!(category.slug().parse::<Category>(), Ok(category));
        }
        assert_eq!(
            "garden".parse::<Category>(),
            Err(UnknownCategory("garden".to_string()))
        );
        assert_eq!(Category::default(), Category::Other);
        assert_eq!(Category::Music.to_string(), "Music & Instruments");
    }
}
