//! Initial Data Seeding

use crate::db::models::User;
use crate::db::repository::UserRepository;
use crate::db::DbService;
use crate::utils::{AppError, AppResult};

/// Ensure the admin account exists. Runs once at startup; a no-op when the
/// account is already present.
pub async fn seed_admin(db: &DbService, email: &str, password: &str) -> AppResult<()> {
    let repo = UserRepository::new(db.db.clone());

    if repo.find_by_email(email).await?.is_some() {
        tracing::debug!(email, "Admin account already present");
        return Ok(());
    }

    let hash = User::hash_password(password)
        .map_err(|e| AppError::internal(format!("Failed to hash admin password: {e}")))?;
    repo.create(User::new(email.to_string(), hash, "admin".to_string()))
        .await?;

    tracing::info!(email, "Admin account created");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeding_is_idempotent() {
        let db = DbService::connect_memory().await.expect("memory db");

        seed_admin(&db, "admin@example.com", "changeme")
            .await
            .expect("first seed");
        seed_admin(&db, "admin@example.com", "changeme")
            .await
            .expect("second seed");

        let repo = UserRepository::new(db.db.clone());
        let admins = repo.list_page(10, 0).await.expect("list");
        assert_eq!(admins.len(), 1);
        assert_eq!(admins[0].role, "admin");
    }
}
