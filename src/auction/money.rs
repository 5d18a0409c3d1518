use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 금액 (센트 단위)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct Money(i64);

/// 정수부 9자리 + 소수부 2자리
pub const MAX_CENTS: i64 = 99_999_999_999;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    #[error("Enter a number.")]
    Invalid,
    #[error("Ensure that there are no more than 2 decimal places.")]
    TooPrecise,
    #[error("Ensure that there are no more than 11 digits in total.")]
    TooLarge,
    #[error("Ensure this value is greater than zero.")]
    NotPositive,
}

impl Money {
    pub fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    pub fn cents(self) -> i64 {
        self.0
    }

    /// 폼 입력값 파싱 (0보다 커야 함)
    pub fn parse_positive(input: &str) -> Result<Self, MoneyError> {
        let money: Money = input.parse()?;
        if money.0 <= 0 {
            return Err(MoneyError::NotPositive);
        }
        Ok(money)
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (whole, frac) = match s.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (s, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return Err(MoneyError::Invalid);
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return Err(MoneyError::Invalid);
        }
        if frac.len() > 2 {
            return Err(MoneyError::TooPrecise);
        }

        let whole = whole.trim_start_matches('0');
        if whole.len() > 9 {
            return Err(MoneyError::TooLarge);
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| MoneyError::Invalid)?
        };
        let frac: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| MoneyError::Invalid)? * 10,
            _ => frac.parse().map_err(|_| MoneyError::Invalid)?,
        };

        Ok(Money(whole * 100 + frac))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}
