//! Registration, login and logout

use uuid::Uuid;

use crate::{
    db::Repository,
    error::{AppError, AppResult},
};

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 30;
const PASSWORD_MIN: usize = 6;

/// Validate username format
pub fn validate_username(username: &str) -> Result<(), String> {
    let length = username.chars().count();

    if !(USERNAME_MIN..=USERNAME_MAX).contains(&length) {
        return Err(format!(
            "Username must be between {} and {} characters",
            USERNAME_MIN, USERNAME_MAX
        ));
    }

    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    {
        return Err(
            "Username can only contain letters, numbers, underscores, and hyphens".to_string(),
        );
    }

    if !username.chars().any(char::is_alphanumeric) {
        return Err("Username must contain at least one letter or number".to_string());
    }

    Ok(())
}

pub fn validate_password(password: &str, confirm_password: &str) -> Result<(), String> {
    if password.chars().count() < PASSWORD_MIN {
        return Err(format!(
            "Password must be at least {} characters long",
            PASSWORD_MIN
        ));
    }

    if password != confirm_password {
        return Err("Passwords do not match".to_string());
    }

    Ok(())
}

/// Creates an account and returns its id
pub async fn register(
    repo: &Repository,
    username: &str,
    password: &str,
    confirm_password: &str,
    hash_cost: u32,
) -> AppResult<i64> {
    let username = username.trim();
    validate_username(username).map_err(AppError::InvalidInput)?;
    validate_password(password, confirm_password).map_err(AppError::InvalidInput)?;

    let password = password.to_string();
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, hash_cost))
        .await
        .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))??;

    let user_id = repo.create_user(username, &hash).await?;
    tracing::info!(username = %username, user_id = user_id, "User registered");

    Ok(user_id)
}

/// Verifies credentials and opens a session, returning its token
pub async fn login(repo: &Repository, username: &str, password: &str) -> AppResult<String> {
    let invalid = || AppError::Unauthorized("Invalid username or password".to_string());
    let username = username.trim();

    if username.is_empty() || password.is_empty() {
        return Err(AppError::InvalidInput(
            "Please enter both username and password".to_string(),
        ));
    }

    let user = repo.find_user(username).await?.ok_or_else(invalid)?;

    let password = password.to_string();
    let stored = user.password.clone();
    let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &stored))
        .await
        .map_err(|e| AppError::Internal(format!("Password check task failed: {}", e)))?
        .unwrap_or(false);

    if !verified {
        tracing::info!(username = %username, "Login rejected");
        return Err(invalid());
    }

    let token = Uuid::new_v4().to_string();
    repo.create_session(&token, user.id).await?;
    tracing::info!(username = %username, user_id = user.id, "User logged in");

    Ok(token)
}

pub async fn logout(repo: &Repository, token: &str) -> AppResult<()> {
    repo.delete_session(token).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_pool;

    const TEST_COST: u32 = 4;

    async fn repo() -> Repository {
        Repository::new(create_pool("sqlite::memory:").await.unwrap())
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("film_buff-99").is_ok());
        assert!(validate_username("al").is_err());
        assert!(validate_username(&"a".repeat(31)).is_err());
        assert!(validate_username(&"a".repeat(30)).is_ok());
        assert!(validate_username("bad name").is_err());
        assert!(validate_username("semi;colon").is_err());
    }

    #[test]
    fn test_validate_username_needs_letter_or_digit() {
        assert_eq!(
            validate_username("___"),
            Err("Username must contain at least one letter or number".to_string())
        );
        assert!(validate_username("---").is_err());
        assert!(validate_username("_-_-").is_err());
        assert!(validate_username("_a_").is_ok());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("secret", "secret").is_ok());
        assert!(validate_password("short", "short").is_err());
        assert_eq!(
            validate_password("secret1", "secret2"),
            Err("Passwords do not match".to_string())
        );
    }

    #[tokio::test]
    async fn test_register_and_login() {
        let repo = repo().await;
        let user_id = register(&repo, "  alice ", "secret", "secret", TEST_COST)
            .await
            .unwrap();

        let stored = repo.find_user("alice").await.unwrap().unwrap();
        assert_eq!(stored.id, user_id);
        assert_ne!(stored.password, "secret");

        let token = login(&repo, "alice", "secret").await.unwrap();
        let current = repo.find_session(&token).await.unwrap();
        assert_eq!(current.username, "alice");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let repo = repo().await;
        register(&repo, "alice", "secret", "secret", TEST_COST)
            .await
            .unwrap();

        let result = login(&repo, "alice", "wrong!").await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));

        let result = login(&repo, "nobody", "secret").await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_input() {
        let repo = repo().await;

        let result = register(&repo, "alice", "secret", "different", TEST_COST).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
        assert!(repo.find_user("alice").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_logout_ends_session() {
        let repo = repo().await;
        register(&repo, "alice", "secret", "secret", TEST_COST)
            .await
            .unwrap();
        let token = login(&repo, "alice", "secret").await.unwrap();

        logout(&repo, &token).await.unwrap();
        assert!(repo.find_session(&token).await.is_err());
    }
}
