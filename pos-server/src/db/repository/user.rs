//! User Repository

use super::{make_record_id, BaseRepository, RepoError, RepoResult};
use crate::db::models::{User, UserUpdate};
use surrealdb::engine::local::Db;
use surrealdb::Surreal;

pub const USER_TABLE: &str = "users";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let users: Vec<User> = self
            .base
            .db()
            .query("SELECT * FROM users WHERE id = $id AND is_deleted = false")
            .bind(("id", make_record_id(USER_TABLE, id)))
            .await?
            .take(0)?;
        Ok(users.into_iter().next())
    }

    /// Login lookup; email is unique among non-deleted accounts
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let users: Vec<User> = self
            .base
            .db()
            .query("SELECT * FROM users WHERE email = $email AND is_deleted = false")
            .bind(("email", email.to_string()))
            .await?
            .take(0)?;
        Ok(users.into_iter().next())
    }

    pub async fn list_page(&self, limit: i64, offset: i64) -> RepoResult<Vec<User>> {
        let users: Vec<User> = self
            .base
            .db()
            .query(
                "SELECT * FROM users WHERE is_deleted = false \
                 ORDER BY created_at DESC LIMIT $limit START $offset",
            )
            .bind(("limit", limit))
            .bind(("offset", offset))
            .await?
            .take(0)?;
        Ok(users)
    }

    /// Create a user account. `data.password` must already be hashed.
    pub async fn create(&self, data: User) -> RepoResult<User> {
        if data.email.trim().is_empty() {
            return Err(RepoError::Validation("email is required".into()));
        }
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "User with email {} already exists",
                data.email
            )));
        }

        let created: Option<User> = self.base.db().create(USER_TABLE).content(data).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    pub async fn update(&self, id: &str, data: UserUpdate) -> RepoResult<User> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))?;

        if let Some(email) = &data.email {
            if email != &existing.email && self.find_by_email(email).await?.is_some() {
                return Err(RepoError::Duplicate(format!(
                    "User with email {email} already exists"
                )));
            }
        }

        let updated: Option<User> = self
            .base
            .db()
            .query("UPDATE $id MERGE $data RETURN AFTER")
            .bind(("id", make_record_id(USER_TABLE, id)))
            .bind(("data", data))
            .await?
            .take(0)?;
        updated.ok_or_else(|| RepoError::Database("Failed to update user".to_string()))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.base
            .db()
            .query("UPDATE $id SET is_deleted = true")
            .bind(("id", make_record_id(USER_TABLE, id)))
            .await?
            .check()?;
        Ok(true)
    }
}
