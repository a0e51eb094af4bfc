//! Item Repository

use super::{make_record_id, BaseRepository, RepoError, RepoResult};
use crate::db::models::{Item, ItemUpdate};
use rust_decimal::Decimal;
use surrealdb::engine::local::Db;
use surrealdb::Surreal;

pub const ITEM_TABLE: &str = "items";

#[derive(Clone)]
pub struct ItemRepository {
    base: BaseRepository,
}

impl ItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find a non-deleted item by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Item>> {
        let items: Vec<Item> = self
            .base
            .db()
            .query("SELECT * FROM items WHERE id = $id AND is_deleted = false")
            .bind(("id", make_record_id(ITEM_TABLE, id)))
            .await?
            .take(0)?;
        Ok(items.into_iter().next())
    }

    /// Paginated catalog listing, newest first
    pub async fn list_page(&self, limit: i64, offset: i64) -> RepoResult<Vec<Item>> {
        let items: Vec<Item> = self
            .base
            .db()
            .query(
                "SELECT * FROM items WHERE is_deleted = false \
                 ORDER BY created_at DESC LIMIT $limit START $offset",
            )
            .bind(("limit", limit))
            .bind(("offset", offset))
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Paginated catalog listing filtered by type tag
    pub async fn list_page_by_type(
        &self,
        limit: i64,
        offset: i64,
        item_type: &str,
    ) -> RepoResult<Vec<Item>> {
        let items: Vec<Item> = self
            .base
            .db()
            .query(
                "SELECT * FROM items WHERE is_deleted = false AND item_type = $item_type \
                 ORDER BY created_at DESC LIMIT $limit START $offset",
            )
            .bind(("item_type", item_type.to_string()))
            .bind(("limit", limit))
            .bind(("offset", offset))
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Create a new catalog item
    pub async fn create(&self, data: Item) -> RepoResult<Item> {
        if data.price < Decimal::ZERO {
            return Err(RepoError::Validation("price must not be negative".into()));
        }
        if data.item_name.trim().is_empty() {
            return Err(RepoError::Validation("item_name is required".into()));
        }

        let created: Option<Item> = self.base.db().create(ITEM_TABLE).content(data).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create item".to_string()))
    }

    /// Merge a partial update into an existing item
    pub async fn update(&self, id: &str, data: ItemUpdate) -> RepoResult<Item> {
        if let Some(price) = data.price {
            if price < Decimal::ZERO {
                return Err(RepoError::Validation("price must not be negative".into()));
            }
        }

        // Resolve first so updates to soft-deleted records surface as NotFound
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Item {id} not found")))?;

        let updated: Option<Item> = self
            .base
            .db()
            .query("UPDATE $id MERGE $data RETURN AFTER")
            .bind(("id", make_record_id(ITEM_TABLE, id)))
            .bind(("data", data))
            .await?
            .take(0)?;
        updated.ok_or_else(|| RepoError::Database("Failed to update item".to_string()))
    }

    /// Soft-delete an item
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.base
            .db()
            .query("UPDATE $id SET is_deleted = true")
            .bind(("id", make_record_id(ITEM_TABLE, id)))
            .await?
            .check()?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    fn dec(s: &str) -> Decimal {
        s.parse().expect("decimal literal")
    }

    async fn repo() -> ItemRepository {
        let svc = DbService::connect_memory().await.expect("memory db");
        ItemRepository::new(svc.db)
    }

    #[tokio::test]
    async fn create_and_find_roundtrip() {
        let repo = repo().await;
        let created = repo
            .create(Item::new("Kopi Susu".into(), dec("2.50")))
            .await
            .expect("create");
        let id = created.id.as_ref().expect("id").to_string();

        let found = repo.find_by_id(&id).await.expect("find").expect("some");
        assert_eq!(found.item_name, "Kopi Susu");
        assert_eq!(found.price, dec("2.50"));
        assert!(found.is_available);
    }

    #[tokio::test]
    async fn negative_price_rejected() {
        let repo = repo().await;
        let err = repo
            .create(Item::new("Broken".into(), dec("-1.00")))
            .await
            .expect_err("must fail");
        assert!(matches!(err, RepoError::Validation(_)));
    }

    #[tokio::test]
    async fn soft_deleted_items_are_invisible() {
        let repo = repo().await;
        let created = repo
            .create(Item::new("Teh Manis".into(), dec("1.00")))
            .await
            .expect("create");
        let id = created.id.as_ref().expect("id").to_string();

        assert!(repo.delete(&id).await.expect("delete"));
        assert!(repo.find_by_id(&id).await.expect("find").is_none());
        assert!(repo.list_page(10, 0).await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn update_merges_partial_fields() {
        let repo = repo().await;
        let created = repo
            .create(Item::new("Nasi Goreng".into(), dec("4.00")))
            .await
            .expect("create");
        let id = created.id.as_ref().expect("id").to_string();

        let updated = repo
            .update(
                &id,
                ItemUpdate {
                    price: Some(dec("4.50")),
                    ..Default::default()
                },
            )
            .await
            .expect("update");
        assert_eq!(updated.price, dec("4.50"));
        assert_eq!(updated.item_name, "Nasi Goreng");
    }

    #[tokio::test]
    async fn list_by_type_filters() {
        let repo = repo().await;
        let mut food = Item::new("Bakso".into(), dec("3.00"));
        food.item_type = "food".into();
        let mut drink = Item::new("Es Teh".into(), dec("1.00"));
        drink.item_type = "drink".into();
        repo.create(food).await.expect("create food");
        repo.create(drink).await.expect("create drink");

        let drinks = repo.list_page_by_type(10, 0, "drink").await.expect("list");
        assert_eq!(drinks.len(), 1);
        assert_eq!(drinks[0].item_name, "Es Teh");
    }
}
