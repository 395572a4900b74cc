//! Menu Service
//!
//! Aggregates info, categories and credential into one [`RestaurantData`]
//! snapshot (memoized by [`SnapshotCache`]), and owns the whole-store
//! operations: JSON import, reset, login and password change.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use shared::models::{PublicRestaurantData, RestaurantData};
use tracing::{info, warn};

use super::cache::SnapshotCache;
use super::error::{MenuError, MenuResult};
use super::fallback::FallbackMode;
use super::repository::MenuRepository;
use super::static_data::static_data;
use crate::db::store::{CategoryDocument, DocumentStore, StoreHandle, TenantDocument, WriteBatch};
use crate::utils::Clock;

/// Tunables for [`MenuService`]
#[derive(Debug, Clone, Copy)]
pub struct MenuOptions {
    pub store_timeout: Duration,
    pub cache_ttl: Duration,
    pub fallback: FallbackMode,
}

impl Default for MenuOptions {
    fn default() -> Self {
        Self {
            store_timeout: Duration::from_millis(5000),
            cache_ttl: Duration::from_millis(1000),
            fallback: FallbackMode::Open,
        }
    }
}

/// Document counts touched by an import or reset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetCounts {
    pub categories: usize,
    pub items: usize,
}

#[derive(Debug, Clone)]
pub struct MenuService {
    repo: MenuRepository,
    cache: Arc<SnapshotCache<RestaurantData>>,
}

impl MenuService {
    pub fn new(store: Arc<dyn DocumentStore>, options: MenuOptions, clock: Arc<dyn Clock>) -> Self {
        let handle = StoreHandle::new(store, options.store_timeout);
        let cache = Arc::new(SnapshotCache::new(options.cache_ttl, clock));
        let repo = MenuRepository::new(handle, options.fallback.policy(), cache.clone());
        Self { repo, cache }
    }

    /// CRUD access for route handlers
    pub fn repo(&self) -> &MenuRepository {
        &self.repo
    }

    pub fn store_name(&self) -> &'static str {
        self.repo.store().name()
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    /// Full data (credential included), served from the cache when fresh
    pub async fn get_full_snapshot(&self) -> MenuResult<Arc<RestaurantData>> {
        self.cache.get_or_refresh(|| self.assemble()).await
    }

    pub async fn get_public_snapshot(&self) -> MenuResult<PublicRestaurantData> {
        let snapshot = self.get_full_snapshot().await?;
        Ok(PublicRestaurantData::from(snapshot.as_ref()))
    }

    async fn assemble(&self) -> MenuResult<RestaurantData> {
        let fallback = || static_data().clone();
        if !self.repo.use_live("get_full_snapshot").await? {
            return Ok(fallback());
        }

        let fetched = tokio::try_join!(self.repo.store().tenant(), self.repo.load_categories());
        let (tenant, categories) = match fetched {
            Ok(parts) => parts,
            Err(e) => return self.repo.recover("get_full_snapshot", e, fallback),
        };

        // Absent tenant fields take the static slice, categories stay live
        Ok(RestaurantData {
            info: MenuRepository::info_or_static(tenant.as_ref()),
            categories,
            admin_password: MenuRepository::credential_or_static(tenant.as_ref()),
        })
    }

    // =========================================================================
    // Bulk operations
    // =========================================================================

    /// Write a whole dataset in one batch
    ///
    /// The tenant document is replaced; categories and items in the payload
    /// are created or overwritten. Documents absent from the payload stay.
    pub async fn migrate_from_json(&self, data: RestaurantData) -> MenuResult<DatasetCounts> {
        let mut counts = DatasetCounts::default();
        let mut batch = WriteBatch::new();
        batch.replace_tenant(TenantDocument {
            info: Some(data.info),
            admin_password: Some(data.admin_password),
            ..TenantDocument::touched()
        });
        for category in data.categories {
            batch.set_category(CategoryDocument::from(&category));
            counts.categories += 1;
            for item in category.items {
                batch.set_item(&category.id, item);
                counts.items += 1;
            }
        }

        self.repo
            .store()
            .commit(batch)
            .await
            .map_err(MenuError::StoreWrite)?;
        self.cache.invalidate();

        info!(
            categories = counts.categories,
            items = counts.items,
            "Dataset imported"
        );
        Ok(counts)
    }

    /// Delete the tenant document, every category and every item
    pub async fn clear_database(&self) -> MenuResult<DatasetCounts> {
        let store = self.repo.store();
        let categories = store.categories().await.map_err(MenuError::StoreWrite)?;

        let mut counts = DatasetCounts {
            categories: categories.len(),
            items: 0,
        };
        let mut batch = WriteBatch::new();
        for category in &categories {
            let items = store.items(&category.id).await.map_err(MenuError::StoreWrite)?;
            for item in &items {
                batch.delete_item(&category.id, &item.id);
            }
            counts.items += items.len();
            batch.delete_category(&category.id);
        }
        batch.delete_tenant();

        store.commit(batch).await.map_err(MenuError::StoreWrite)?;
        self.cache.invalidate();

        warn!(
            categories = counts.categories,
            items = counts.items,
            "Database cleared"
        );
        Ok(counts)
    }

    // =========================================================================
    // Credential
    // =========================================================================

    /// Check the admin secret
    ///
    /// On the first successful login against an empty store the secret is
    /// persisted so the tenant is claimed. That write is best effort.
    pub async fn login(&self, password: &str) -> MenuResult<()> {
        let was_empty = self.repo.oracle().is_empty().await;
        let credential = self.repo.get_credential().await?;
        if password != credential {
            return Err(MenuError::InvalidCredential);
        }

        if was_empty {
            match self.repo.update_credential(&credential).await {
                Ok(()) => info!("First login: admin credential persisted"),
                Err(e) => warn!(error = %e, "First login: failed to persist admin credential"),
            }
        }
        Ok(())
    }

    pub async fn change_password(&self, current: &str, new: &str) -> MenuResult<()> {
        let credential = self.repo.get_credential().await?;
        if current != credential {
            return Err(MenuError::InvalidCredential);
        }
        self.repo.update_credential(new).await
    }
}
