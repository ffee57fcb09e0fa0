use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::{
    error::{AppError, AppResult},
    models::{CurrentUser, Favorite, HistoryEntry, User},
};

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Creates a SQLite connection pool and applies the embedded migrations
///
/// An in-memory database lives only as long as its connection, so those
/// pools are pinned to a single connection that is never recycled.
pub async fn create_pool(database_url: &str) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool_options = if is_in_memory(database_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };

    let pool = pool_options.connect_with(options).await?;
    sqlx::migrate!().run(&pool).await?;

    tracing::info!(database_url = %database_url, "Database initialized");

    Ok(pool)
}

/// Which favorite to remove
#[derive(Debug, Clone, PartialEq)]
pub enum FavoriteRef {
    Id(i64),
    Movie(String),
}

/// Typed access to users, sessions, search history and favorites
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // Users

    pub async fn create_user(&self, username: &str, password_hash: &str) -> AppResult<i64> {
        let result = sqlx::query("INSERT INTO users (username, password) VALUES (?, ?)")
            .bind(username)
            .bind(password_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    AppError::Conflict("Username already exists".to_string())
                }
                other => AppError::Database(other),
            })?;

        Ok(result.last_insert_rowid())
    }

    pub async fn find_user(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password, created_at FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    // Sessions

    pub async fn create_session(&self, token: &str, user_id: i64) -> AppResult<()> {
        sqlx::query("INSERT INTO sessions (token, user_id) VALUES (?, ?)")
            .bind(token)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn find_session(&self, token: &str) -> AppResult<CurrentUser> {
        sqlx::query_as::<_, CurrentUser>(
            "SELECT s.token, s.user_id, u.username, s.save_history
             FROM sessions s JOIN users u ON u.id = s.user_id
             WHERE s.token = ?",
        )
        .bind(token)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::Unauthorized("Not logged in".to_string()),
            _ => AppError::Database(e),
        })
    }

    pub async fn delete_session(&self, token: &str) -> AppResult<()> {
        sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn set_save_history(&self, token: &str, enabled: bool) -> AppResult<()> {
        sqlx::query("UPDATE sessions SET save_history = ? WHERE token = ?")
            .bind(enabled)
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // Search history

    pub async fn add_history(&self, user_id: i64, movie_title: &str) -> AppResult<()> {
        sqlx::query("INSERT INTO search_history (user_id, movie_title) VALUES (?, ?)")
            .bind(user_id)
            .bind(movie_title)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Newest first
    pub async fn recent_history(&self, user_id: i64, limit: i64) -> AppResult<Vec<HistoryEntry>> {
        let entries = sqlx::query_as::<_, HistoryEntry>(
            "SELECT movie_title, search_date FROM search_history
             WHERE user_id = ?
             ORDER BY search_date DESC, id DESC
             LIMIT ?",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    // Favorites

    /// Newest first
    pub async fn list_favorites(&self, user_id: i64) -> AppResult<Vec<Favorite>> {
        let favorites = sqlx::query_as::<_, Favorite>(
            "SELECT id, movie_id, movie_title, added_date FROM favorites
             WHERE user_id = ?
             ORDER BY added_date DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(favorites)
    }

    pub async fn is_favorite(&self, user_id: i64, movie_id: &str) -> AppResult<bool> {
        let found: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM favorites WHERE user_id = ? AND movie_id = ?")
                .bind(user_id)
                .bind(movie_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(found.is_some())
    }

    /// Returns `false` when the movie was already a favorite
    pub async fn add_favorite(
        &self,
        user_id: i64,
        movie_id: &str,
        movie_title: &str,
    ) -> AppResult<bool> {
        if self.is_favorite(user_id, movie_id).await? {
            return Ok(false);
        }

        sqlx::query("INSERT INTO favorites (user_id, movie_id, movie_title) VALUES (?, ?, ?)")
            .bind(user_id)
            .bind(movie_id)
            .bind(movie_title)
            .execute(&self.pool)
            .await?;

        Ok(true)
    }

    /// Returns the number of rows removed
    pub async fn remove_favorite(&self, user_id: i64, favorite: &FavoriteRef) -> AppResult<u64> {
        let result = match favorite {
            FavoriteRef::Id(id) => {
                sqlx::query("DELETE FROM favorites WHERE id = ? AND user_id = ?")
                    .bind(id)
                    .bind(user_id)
                    .execute(&self.pool)
                    .await?
            }
            FavoriteRef::Movie(movie_id) => {
                sqlx::query("DELETE FROM favorites WHERE movie_id = ? AND user_id = ?")
                    .bind(movie_id)
                    .bind(user_id)
                    .execute(&self.pool)
                    .await?
            }
        };

        Ok(result.rows_affected())
    }
}
