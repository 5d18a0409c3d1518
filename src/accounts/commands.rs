/// 계정 관련 커맨드 처리
/// 1. 회원 가입
/// 2. 로그인
/// 3. 세션 시작 / 종료
// region:    --- Imports
use super::model::{Session, User};
use super::password;
use crate::error::{AppError, ValidationErrors};
use crate::store::AuctionStore;
use chrono::{Duration, Utc};
use serde::Deserialize;
use tracing::{info, warn};

// endregion: --- Imports

// region:    --- Commands
/// 회원 가입 명령 (폼 입력 그대로)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterCommand {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirmation: String,
}

/// 로그인 명령
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginCommand {
    pub username: String,
    pub password: String,
}

const MAX_USERNAME_LEN: usize = 150;
const MAX_EMAIL_LEN: usize = 254;

/// 사용자 이름 검증: 1~150자, 문자/숫자/@.+-_
fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.is_empty() {
        return Err("This field is required.");
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err("Ensure this value has at most 150 characters.");
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
    {
        return Err("Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.");
    }
    Ok(())
}

/// 1. 회원 가입
pub async fn handle_register(
    cmd: RegisterCommand,
    store: &dyn AuctionStore,
) -> Result<User, AppError> {
    let username = cmd.username.trim();
    let email = cmd.email.trim();
    info!("{:<12} --> 회원 가입 요청: {}", "Command", username);

    let mut errors = ValidationErrors::new();
    if let Err(msg) = validate_username(username) {
        errors.add("username", msg);
    }
    if !email.is_empty() && !email.contains('@') {
        errors.add("email", "Enter a valid email address.");
    } else if email.chars().count() > MAX_EMAIL_LEN {
        errors.add("email", "Ensure this value has at most 254 characters.");
    }
    if cmd.password.is_empty() {
        errors.add("password", "This field is required.");
    } else if cmd.password != cmd.confirmation {
        errors.add("confirmation", "Passwords must match.");
    }
    errors.into_result()?;

    let password_hash = password::hash_password(&cmd.password)?;
    let user = store.create_user(username, email, &password_hash).await?;
    info!("{:<12} --> 회원 가입 완료 id: {}", "Command", user.id);
    Ok(user)
}

/// 2. 로그인
pub async fn handle_login(cmd: LoginCommand, store: &dyn AuctionStore) -> Result<User, AppError> {
    let username = cmd.username.trim();
    info!("{:<12} --> 로그인 요청: {}", "Command", username);

    let Some(user) = store.find_user_by_username(username).await? else {
        warn!("{:<12} --> 존재하지 않는 사용자: {}", "Command", username);
        return Err(AppError::InvalidCredentials);
    };

    if !password::verify_password(&cmd.password, &user.password_hash)? {
        warn!("{:<12} --> 비밀번호 불일치: {}", "Command", username);
        return Err(AppError::InvalidCredentials);
    }

    Ok(user)
}

/// 3. 세션 시작
pub async fn start_session(
    store: &dyn AuctionStore,
    user: &User,
    ttl: Duration,
) -> Result<Session, AppError> {
    let session = store.create_session(user.id, Utc::now() + ttl).await?;
    info!(
        "{:<12} --> 세션 시작 user: {}, 만료: {}",
        "Command", user.id, session.expires_at
    );
    Ok(session)
}

/// 3. 세션 종료
pub async fn end_session(store: &dyn AuctionStore, token: &str) -> Result<(), AppError> {
    store.delete_session(token).await?;
    info!("{:<12} --> 세션 종료", "Command");
    Ok(())
}
// endregion: --- Commands

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn register_cmd(username: &str, password: &str, confirmation: &str) -> RegisterCommand {
        RegisterCommand {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: password.to_string(),
            confirmation: confirmation.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let store = MemoryStore::new();
        let user = handle_register(register_cmd("harry", "hedwig", "hedwig"), &store)
            .await
            .unwrap();
        assert_eq!(user.username, "harry");

        let logged_in = handle_login(
            LoginCommand {
                username: "harry".to_string(),
                password: "hedwig".to_string(),
            },
            &store,
        )
        .await
        .unwrap();
        assert_eq!(logged_in.id, user.id);
    }

    #[tokio::test]
    async fn test_register_rejects_mismatched_passwords() {
        let store = MemoryStore::new();
        let err = handle_register(register_cmd("ron", "scabbers", "scabber"), &store)
            .await
            .unwrap_err();
        match err {
            AppError::Validation(errors) => {
                assert_eq!(errors.get("confirmation"), Some("Passwords must match."))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_register_rejects_taken_username() {
        let store = MemoryStore::new();
        handle_register(register_cmd("hermione", "books", "books"), &store)
            .await
            .unwrap();
        let err = handle_register(register_cmd("hermione", "cat", "cat"), &store)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UsernameTaken));
    }

    #[tokio::test]
    async fn test_register_rejects_bad_username() {
        let store = MemoryStore::new();
        let err = handle_register(register_cmd("no spaces", "pw", "pw"), &store)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(e) if e.get("username").is_some()));
    }

    #[tokio::test]
    async fn test_register_rejects_overlong_email() {
        let store = MemoryStore::new();
        let mut cmd = register_cmd("neville", "trevor", "trevor");
        cmd.email = format!("{}@example.com", "n".repeat(300));
        let err = handle_register(cmd, &store).await.unwrap_err();
        match err {
            AppError::Validation(errors) => assert_eq!(
                errors.get("email"),
                Some("Ensure this value has at most 254 characters.")
            ),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(store.find_user_by_username("neville").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_fails() {
        let store = MemoryStore::new();
        handle_register(register_cmd("draco", "malfoy", "malfoy"), &store)
            .await
            .unwrap();
        let err = handle_login(
            LoginCommand {
                username: "draco".to_string(),
                password: "potter".to_string(),
            },
            &store,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }
}
