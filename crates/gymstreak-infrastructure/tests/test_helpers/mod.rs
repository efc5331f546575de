#![allow(dead_code)]

use std::sync::Arc;

use gymstreak_domain::user::{User, UserRepository};
use gymstreak_infrastructure::persistence::repositories::SqliteUserRepository;
use gymstreak_infrastructure::Database;
use sqlx::SqlitePool;

/// Fresh in-memory database with the schema applied
pub async fn setup_in_memory_db() -> Arc<SqlitePool> {
    let db = Database::new_in_memory()
        .await
        .expect("Open in-memory database");
    db.run_migrations().await.expect("Run migrations");
    db.pool()
}

/// Insert a user so foreign keys on schedules and check-ins resolve
pub async fn seed_user(pool: &Arc<SqlitePool>, username: &str) -> User {
    let user = User::new(username.to_string()).expect("Create user");
    SqliteUserRepository::new(pool.clone())
        .save(&user)
        .await
        .expect("Save user");
    user
}
