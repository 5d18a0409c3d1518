use crate::error::AppError;
use std::time::Duration;

/// 세션 유효 시간 상한 (10년)
const MAX_SESSION_EXPIRY_HOURS: i64 = 24 * 365 * 10;

/// 환경 변수 기반 서버 설정
#[derive(Clone, Debug)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    /// 없으면 메모리 저장소로 실행
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub session_expiry_hours: i64,
    pub session_cleanup_interval_secs: u64,
    pub cookie_secure: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "127.0.0.1".to_string(),
            server_port: 8000,
            database_url: None,
            db_max_connections: 5,
            session_expiry_hours: 336,
            session_cleanup_interval_secs: 3600,
            cookie_secure: false,
        }
    }
}

impl Config {
    /// 환경 변수에서 설정 로드 (.env 파일이 있으면 함께 읽는다)
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        Ok(Config {
            server_host: std::env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parse_var("SERVER_PORT", defaults.server_port)?,
            database_url: std::env::var("DATABASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", defaults.db_max_connections)?,
            session_expiry_hours: check_session_expiry(parse_var(
                "SESSION_EXPIRY_HOURS",
                defaults.session_expiry_hours,
            )?)?,
            session_cleanup_interval_secs: parse_var(
                "SESSION_CLEANUP_INTERVAL_SECS",
                defaults.session_cleanup_interval_secs,
            )?,
            cookie_secure: parse_var("COOKIE_SECURE", defaults.cookie_secure)?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.session_expiry_hours)
    }

    pub fn session_cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.session_cleanup_interval_secs.max(1))
    }
}

fn check_session_expiry(hours: i64) -> Result<i64, AppError> {
    if (1..=MAX_SESSION_EXPIRY_HOURS).contains(&hours) {
        Ok(hours)
    } else {
        Err(AppError::Config(format!(
            "SESSION_EXPIRY_HOURS must be between 1 and {}, got {}",
            MAX_SESSION_EXPIRY_HOURS, hours
        )))
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server_address(), "127.0.0.1:8000");
        assert_eq!(config.session_ttl(), chrono::Duration::days(14));
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_session_expiry_must_be_in_range() {
        assert_eq!(check_session_expiry(336).unwrap(), 336);
        assert!(matches!(check_session_expiry(0), Err(AppError::Config(_))));
        assert!(matches!(check_session_expiry(-5), Err(AppError::Config(_))));
        assert!(matches!(
            check_session_expiry(i64::MAX),
            Err(AppError::Config(_))
        ));

        let longest = Config {
            session_expiry_hours: MAX_SESSION_EXPIRY_HOURS,
            ..Config::default()
        };
        assert_eq!(longest.session_ttl(), chrono::Duration::days(3650));
    }

    #[test]
    fn test_parse_var_rejects_garbage() {
        std::env::set_var("AUCTION_TEST_BAD_PORT", "eighty");
        let result: Result<u16, _> = parse_var("AUCTION_TEST_BAD_PORT", 8000);
        assert!(matches!(result, Err(AppError::Config(_))));

        let fallback: u16 = parse_var("AUCTION_TEST_UNSET_PORT", 8000).unwrap();
        assert_eq!(fallback, 8000);
    }
}
