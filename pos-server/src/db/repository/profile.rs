//! Profile Repository

use super::{make_record_id, BaseRepository, RepoError, RepoResult};
use crate::db::models::{Profile, ProfileUpdate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

pub const PROFILE_TABLE: &str = "profiles";

#[derive(Clone)]
pub struct ProfileRepository {
    base: BaseRepository,
}

impl ProfileRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Profile>> {
        let profiles: Vec<Profile> = self
            .base
            .db()
            .query("SELECT * FROM profiles WHERE id = $id AND is_deleted = false")
            .bind(("id", make_record_id(PROFILE_TABLE, id)))
            .await?
            .take(0)?;
        Ok(profiles.into_iter().next())
    }

    /// All profiles owned by a user, oldest first
    pub async fn list_by_user(&self, user: RecordId) -> RepoResult<Vec<Profile>> {
        let profiles: Vec<Profile> = self
            .base
            .db()
            .query(
                "SELECT * FROM profiles WHERE user = $user AND is_deleted = false \
                 ORDER BY created_at ASC",
            )
            .bind(("user", user))
            .await?
            .take(0)?;
        Ok(profiles)
    }

    pub async fn list_page(&self, limit: i64, offset: i64) -> RepoResult<Vec<Profile>> {
        let profiles: Vec<Profile> = self
            .base
            .db()
            .query(
                "SELECT * FROM profiles WHERE is_deleted = false \
                 ORDER BY created_at DESC LIMIT $limit START $offset",
            )
            .bind(("limit", limit))
            .bind(("offset", offset))
            .await?
            .take(0)?;
        Ok(profiles)
    }

    pub async fn create(&self, data: Profile) -> RepoResult<Profile> {
        if data.name.trim().is_empty() {
            return Err(RepoError::Validation("name is required".into()));
        }

        let created: Option<Profile> = self.base.db().create(PROFILE_TABLE).content(data).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create profile".to_string()))
    }

    pub async fn update(&self, id: &str, data: ProfileUpdate) -> RepoResult<Profile> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Profile {id} not found")))?;

        let updated: Option<Profile> = self
            .base
            .db()
            .query("UPDATE $id MERGE $data RETURN AFTER")
            .bind(("id", make_record_id(PROFILE_TABLE, id)))
            .bind(("data", data))
            .await?
            .take(0)?;
        updated.ok_or_else(|| RepoError::Database("Failed to update profile".to_string()))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.base
            .db()
            .query("UPDATE $id SET is_deleted = true")
            .bind(("id", make_record_id(PROFILE_TABLE, id)))
            .await?
            .check()?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use surrealdb::RecordId;

    #[tokio::test]
    async fn list_by_user_returns_only_own_profiles() {
        let svc = DbService::connect_memory().await.expect("memory db");
        let repo = ProfileRepository::new(svc.db);

        let owner = RecordId::from_table_key("users", "u1");
        let other = RecordId::from_table_key("users", "u2");
        repo.create(Profile::new(owner.clone(), "Ana".into()))
            .await
            .expect("create");
        repo.create(Profile::new(other, "Budi".into()))
            .await
            .expect("create");

        let found = repo.list_by_user(owner).await.expect("list");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Ana");
    }
}
