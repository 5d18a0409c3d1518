// region:    --- Imports
use crate::bidding::rules::BidRejection;
use crate::templates;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use tracing::{error, warn};

// endregion: --- Imports

// region:    --- App Error
/// 애플리케이션 공통 에러
#[derive(Debug, Error)]
pub enum AppError {
    #[error("authentication required")]
    Unauthenticated,

    #[error("permission denied: {0}")]
    Forbidden(String),

    #[error("not found")]
    NotFound,

    #[error("invalid form: {0}")]
    Validation(ValidationErrors),

    #[error(transparent)]
    BidRejected(#[from] BidRejection),

    #[error("Invalid username and/or password.")]
    InvalidCredentials,

    #[error("Username already taken.")]
    UsernameTaken,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        AppError::Validation(ValidationErrors::single(field, message))
    }
}

/// 에러를 HTML 응답으로 변환
/// 폼 관련 에러는 핸들러에서 폼을 다시 렌더링하며, 여기까지 올라온 경우 일반 에러 페이지로 처리한다.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Unauthenticated => return Redirect::to("/login").into_response(),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::NotFound => (StatusCode::NOT_FOUND, "Page not found.".to_string()),
            AppError::Validation(_)
            | AppError::BidRejected(_)
            | AppError::InvalidCredentials
            | AppError::UsernameTaken => {
                warn!("{:<12} --> 처리되지 않은 요청 에러: {}", "Error", self);
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::Database(_) | AppError::Config(_) | AppError::Internal(_) => {
                error!("{:<12} --> 내부 오류: {}", "Error", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong. Please try again later.".to_string(),
                )
            }
        };

        (status, Html(templates::error_page(status, &message))).into_response()
    }
}
// endregion: --- App Error

// region:    --- Validation Errors
/// 필드별 폼 검증 에러 모음
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// 필드당 첫 번째 메시지만 유지
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    pub fn into_result(self) -> Result<(), AppError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, msg) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {msg}")?;
            first = false;
        }
        Ok(())
    }
}
// endregion: --- Validation Errors
