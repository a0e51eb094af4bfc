//! Session Repository

use super::{make_record_id, BaseRepository, RepoError, RepoResult};
use crate::db::models::Session;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

pub const SESSION_TABLE: &str = "sessions";

#[derive(Clone)]
pub struct SessionRepository {
    base: BaseRepository,
}

impl SessionRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Session>> {
        let sessions: Vec<Session> = self
            .base
            .db()
            .query("SELECT * FROM sessions WHERE id = $id AND is_deleted = false")
            .bind(("id", make_record_id(SESSION_TABLE, id)))
            .await?
            .take(0)?;
        Ok(sessions.into_iter().next())
    }

    /// Open a new session for a freshly logged-in user
    pub async fn create(&self, user: RecordId) -> RepoResult<Session> {
        let created: Option<Session> = self
            .base
            .db()
            .create(SESSION_TABLE)
            .content(Session::new(user))
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create session".to_string()))
    }

    /// Mark a session as logged out
    pub async fn close(&self, id: &str) -> RepoResult<bool> {
        self.base
            .db()
            .query("UPDATE $id SET is_logged_in = false")
            .bind(("id", make_record_id(SESSION_TABLE, id)))
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
    async fn create_then_close() {
        let svc = DbService::connect_memory().await.expect("memory db");
        let repo = SessionRepository::new(svc.db);

        let user = RecordId::from_table_key("users", "u1");
        let session = repo.create(user).await.expect("create");
        assert!(session.is_logged_in);

        let id = session.id.as_ref().expect("id").to_string();
        repo.close(&id).await.expect("close");

        let reloaded = repo.find_by_id(&id).await.expect("find").expect("some");
        assert!(!reloaded.is_logged_in);
    }
}
