//! Menu Repository
//!
//! CRUD over the tenant document, categories and items. Reads ask the
//! [`EmptinessOracle`] first and serve the static dataset while the store is
//! empty; store failures go through the configured [`FallbackPolicy`].
//! Writes always target the live store and invalidate the snapshot cache.

use std::sync::Arc;

use futures::future::try_join_all;
use shared::models::{
    CategoryCreate, CategoryUpdate, ItemCreate, ItemUpdate, MenuCategory, MenuItem, RestaurantData,
    RestaurantInfo,
};
use tracing::{debug, info};

use super::cache::SnapshotCache;
use super::error::{MenuError, MenuResult};
use super::fallback::FallbackPolicy;
use super::oracle::EmptinessOracle;
use super::static_data::static_data;
use crate::db::store::{CategoryDocument, StoreError, StoreHandle, StoreResult, TenantDocument, WriteBatch};
use crate::utils::slugify;

#[derive(Debug, Clone)]
pub struct MenuRepository {
    store: StoreHandle,
    oracle: EmptinessOracle,
    policy: Arc<dyn FallbackPolicy>,
    cache: Arc<SnapshotCache<RestaurantData>>,
}

impl MenuRepository {
    pub fn new(
        store: StoreHandle,
        policy: Arc<dyn FallbackPolicy>,
        cache: Arc<SnapshotCache<RestaurantData>>,
    ) -> Self {
        Self {
            oracle: EmptinessOracle::new(store.clone()),
            store,
            policy,
            cache,
        }
    }

    pub fn store(&self) -> &StoreHandle {
        &self.store
    }

    pub fn oracle(&self) -> &EmptinessOracle {
        &self.oracle
    }

    // =========================================================================
    // Fallback plumbing
    // =========================================================================

    /// `true` when live data should be read, `false` to serve static data
    pub(crate) async fn use_live(&self, operation: &'static str) -> MenuResult<bool> {
        match self.oracle.probe().await {
            Ok(false) => Ok(true),
            Ok(true) => {
                debug!(operation, "Store empty, serving static data");
                self.oracle.mark_using_static_data().await;
                Ok(false)
            }
            Err(e) => {
                self.policy.on_read_error(operation, e)?;
                Ok(false)
            }
        }
    }

    /// Route a failed live read through the policy
    pub(crate) fn recover<T>(
        &self,
        operation: &'static str,
        err: StoreError,
        fallback: impl FnOnce() -> T,
    ) -> MenuResult<T> {
        self.policy.on_read_error(operation, err)?;
        Ok(fallback())
    }

    /// Commit a batch and drop the cached snapshot
    async fn commit(&self, batch: WriteBatch) -> MenuResult<()> {
        self.store
            .commit(batch)
            .await
            .map_err(MenuError::StoreWrite)?;
        self.cache.invalidate();
        Ok(())
    }

    /// Every category/item read, fetched concurrently per category
    pub(crate) async fn load_categories(&self) -> StoreResult<Vec<MenuCategory>> {
        let docs = self.store.categories().await?;
        let items = try_join_all(docs.iter().map(|doc| self.store.items(&doc.id))).await?;
        Ok(docs
            .into_iter()
            .zip(items)
            .map(|(doc, items)| doc.into_category(items))
            .collect())
    }

    async fn require_category(&self, id: &str) -> MenuResult<CategoryDocument> {
        self.store
            .category(id)
            .await
            .map_err(MenuError::StoreWrite)?
            .ok_or_else(|| MenuError::NotFound(format!("Category {id}")))
    }

    async fn require_item(&self, category_id: &str, item_id: &str) -> MenuResult<MenuItem> {
        self.store
            .item(category_id, item_id)
            .await
            .map_err(MenuError::StoreWrite)?
            .ok_or_else(|| MenuError::NotFound(format!("Item {item_id} in category {category_id}")))
    }

    // =========================================================================
    // Restaurant info & credential
    // =========================================================================

    /// Live info, or the static info while the tenant has none
    pub(crate) fn info_or_static(tenant: Option<&TenantDocument>) -> RestaurantInfo {
        match tenant.and_then(|t| t.info.as_ref()) {
            Some(info) => info.clone(),
            None => {
                debug!("Tenant has no info yet, using static info");
                static_data().info.clone()
            }
        }
    }

    /// Live credential, or the static one while the tenant has none
    pub(crate) fn credential_or_static(tenant: Option<&TenantDocument>) -> String {
        tenant
            .and_then(|t| t.admin_password.as_deref())
            .filter(|p| !p.is_empty())
            .unwrap_or(static_data().admin_password.as_str())
            .to_string()
    }

    pub async fn get_info(&self) -> MenuResult<RestaurantInfo> {
        let fallback = || static_data().info.clone();
        if !self.use_live("get_info").await? {
            return Ok(fallback());
        }
        match self.store.tenant().await {
            Ok(tenant) => Ok(Self::info_or_static(tenant.as_ref())),
            Err(e) => self.recover("get_info", e, fallback),
        }
    }

    pub async fn update_info(&self, info: RestaurantInfo) -> MenuResult<()> {
        let mut batch = WriteBatch::new();
        batch.merge_tenant(TenantDocument {
            info: Some(info),
            ..TenantDocument::touched()
        });
        self.commit(batch).await?;
        info!("Restaurant info updated");
        Ok(())
    }

    pub async fn get_credential(&self) -> MenuResult<String> {
        let fallback = || static_data().admin_password.clone();
        if !self.use_live("get_credential").await? {
            return Ok(fallback());
        }
        match self.store.tenant().await {
            Ok(tenant) => Ok(Self::credential_or_static(tenant.as_ref())),
            Err(e) => self.recover("get_credential", e, fallback),
        }
    }

    pub async fn update_credential(&self, secret: &str) -> MenuResult<()> {
        let mut batch = WriteBatch::new();
        batch.merge_tenant(TenantDocument {
            admin_password: Some(secret.to_string()),
            ..TenantDocument::touched()
        });
        self.commit(batch).await?;
        info!("Admin credential updated");
        Ok(())
    }

    // =========================================================================
    // Categories
    // =========================================================================

    pub async fn list_categories(&self) -> MenuResult<Vec<MenuCategory>> {
        let fallback = || static_data().categories.clone();
        if !self.use_live("list_categories").await? {
            return Ok(fallback());
        }
        match self.load_categories().await {
            Ok(categories) => Ok(categories),
            Err(e) => self.recover("list_categories", e, fallback),
        }
    }

    pub async fn create_category(&self, data: CategoryCreate) -> MenuResult<MenuCategory> {
        let id = slugify(&data.name);
        if id.is_empty() {
            return Err(MenuError::Validation("Category name is required".to_string()));
        }

        let existing = self.store.categories().await.map_err(MenuError::StoreWrite)?;
        if existing.iter().any(|c| c.id == id) {
            return Err(MenuError::Conflict(format!("Category {id}")));
        }
        let order = existing.iter().map(|c| c.order).fold(0, i32::max) + 1;

        let doc = CategoryDocument {
            id,
            name: data.name,
            description: data.description,
            order,
        };
        let mut batch = WriteBatch::new();
        batch
            .set_category(doc.clone())
            .merge_tenant(TenantDocument::touched());
        self.commit(batch).await?;

        info!(category_id = %doc.id, order, "Category created");
        Ok(doc.into_category(Vec::new()))
    }

    pub async fn update_category(&self, id: &str, patch: CategoryUpdate) -> MenuResult<MenuCategory> {
        let mut doc = self.require_category(id).await?;
        let items = self.store.items(id).await.map_err(MenuError::StoreWrite)?;

        let mut batch = WriteBatch::new();
        batch
            .merge_category(id, patch.clone())
            .merge_tenant(TenantDocument::touched());
        self.commit(batch).await?;

        doc.apply(patch);
        info!(category_id = %id, "Category updated");
        Ok(doc.into_category(items))
    }

    /// Delete a category together with all of its items; returns the item count
    pub async fn delete_category(&self, id: &str) -> MenuResult<usize> {
        self.require_category(id).await?;
        let items = self.store.items(id).await.map_err(MenuError::StoreWrite)?;

        let mut batch = WriteBatch::new();
        for item in &items {
            batch.delete_item(id, &item.id);
        }
        batch
            .delete_category(id)
            .merge_tenant(TenantDocument::touched());
        self.commit(batch).await?;

        info!(category_id = %id, items = items.len(), "Category deleted");
        Ok(items.len())
    }

    // =========================================================================
    // Items
    // =========================================================================

    pub async fn list_items(&self, category_id: &str) -> MenuResult<Vec<MenuItem>> {
        self.list_categories()
            .await?
            .into_iter()
            .find(|c| c.id == category_id)
            .map(|c| c.items)
            .ok_or_else(|| MenuError::NotFound(format!("Category {category_id}")))
    }

    pub async fn create_item(&self, category_id: &str, data: ItemCreate) -> MenuResult<MenuItem> {
        self.require_category(category_id).await?;

        let id = slugify(&data.name);
        if id.is_empty() {
            return Err(MenuError::Validation("Item name is required".to_string()));
        }
        let existing = self
            .store
            .item(category_id, &id)
            .await
            .map_err(MenuError::StoreWrite)?;
        if existing.is_some() {
            return Err(MenuError::Conflict(format!("Item {id} in category {category_id}")));
        }

        let item = data.into_item(id);
        let mut batch = WriteBatch::new();
        batch
            .set_item(category_id, item.clone())
            .merge_tenant(TenantDocument::touched());
        self.commit(batch).await?;

        info!(category_id, item_id = %item.id, "Item created");
        Ok(item)
    }

    pub async fn update_item(
        &self,
        category_id: &str,
        item_id: &str,
        patch: ItemUpdate,
    ) -> MenuResult<MenuItem> {
        let mut item = self.require_item(category_id, item_id).await?;

        let mut batch = WriteBatch::new();
        batch
            .merge_item(category_id, item_id, patch.clone())
            .merge_tenant(TenantDocument::touched());
        self.commit(batch).await?;

        item.apply(patch);
        info!(category_id, item_id, "Item updated");
        Ok(item)
    }

    pub async fn delete_item(&self, category_id: &str, item_id: &str) -> MenuResult<()> {
        self.require_item(category_id, item_id).await?;

        let mut batch = WriteBatch::new();
        batch
            .delete_item(category_id, item_id)
            .merge_tenant(TenantDocument::touched());
        self.commit(batch).await?;

        info!(category_id, item_id, "Item deleted");
        Ok(())
    }
}
