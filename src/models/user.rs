use chrono::NaiveDateTime;
use serde::Serialize;

/// A registered account
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// bcrypt hash
    pub password: String,
    pub created_at: NaiveDateTime,
}

/// The signed-in user behind a request, resolved from its session token
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CurrentUser {
    pub token: String,
    pub user_id: i64,
    pub username: String,
    pub save_history: bool,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct HistoryEntry {
    pub movie_title: String,
    pub search_date: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Favorite {
    pub id: i64,
    pub movie_id: String,
    pub movie_title: String,
    pub added_date: NaiveDateTime,
}
