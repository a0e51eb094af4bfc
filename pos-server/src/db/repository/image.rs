//! Image Repository

use super::{make_record_id, BaseRepository, RepoError, RepoResult};
use crate::db::models::Image;
use surrealdb::engine::local::Db;
use surrealdb::Surreal;

pub const IMAGE_TABLE: &str = "images";

#[derive(Clone)]
pub struct ImageRepository {
    base: BaseRepository,
}

impl ImageRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Image>> {
        let images: Vec<Image> = self
            .base
            .db()
            .query("SELECT * FROM images WHERE id = $id AND is_deleted = false")
            .bind(("id", make_record_id(IMAGE_TABLE, id)))
            .await?
            .take(0)?;
        Ok(images.into_iter().next())
    }

    /// Listing without the payload column; blobs only travel on download
    pub async fn list_page(&self, limit: i64, offset: i64) -> RepoResult<Vec<Image>> {
        let images: Vec<Image> = self
            .base
            .db()
            .query(
                "SELECT *, \"\" AS data FROM images WHERE is_deleted = false \
                 ORDER BY created_at DESC LIMIT $limit START $offset",
            )
            .bind(("limit", limit))
            .bind(("offset", offset))
            .await?
            .take(0)?;
        Ok(images)
    }

    pub async fn create(&self, data: Image) -> RepoResult<Image> {
        if data.file_name.trim().is_empty() {
            return Err(RepoError::Validation("file_name is required".into()));
        }
        if data.data.is_empty() {
            return Err(RepoError::Validation("image payload is empty".into()));
        }

        let created: Option<Image> = self.base.db().create(IMAGE_TABLE).content(data).await?;
        created.ok_or_else(|| RepoError::Database("Failed to store image".to_string()))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.base
            .db()
            .query("UPDATE $id SET is_deleted = true")
            .bind(("id", make_record_id(IMAGE_TABLE, id)))
            .await?
            .check()?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    async fn repo() -> ImageRepository {
        let svc = DbService::connect_memory().await.expect("memory db");
        ImageRepository::new(svc.db)
    }

    #[tokio::test]
    async fn store_and_fetch() {
        let repo = repo().await;
        let created = repo
            .create(Image::new(
                "logo.png".into(),
                "image/png".into(),
                4,
                "AAAA".into(),
            ))
            .await
            .expect("create");
        let id = created.id.as_ref().expect("id").to_string();

        let found = repo.find_by_id(&id).await.expect("find").expect("some");
        assert_eq!(found.content_type, "image/png");
        assert_eq!(found.data, "AAAA");
    }

    #[tokio::test]
    async fn listing_omits_payload() {
        let repo = repo().await;
        repo.create(Image::new(
            "a.png".into(),
            "image/png".into(),
            4,
            "AAAA".into(),
        ))
        .await
        .expect("create");

        let page = repo.list_page(10, 0).await.expect("list");
        assert_eq!(page.len(), 1);
        assert!(page[0].data.is_empty());
    }

    #[tokio::test]
    async fn empty_payload_rejected() {
        let repo = repo().await;
        let err = repo
            .create(Image::new(
                "empty.png".into(),
                "image/png".into(),
                0,
                String::new(),
            ))
            .await
            .expect_err("must fail");
        assert!(matches!(err, RepoError::Validation(_)));
    }
}
