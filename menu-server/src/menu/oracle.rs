//! Emptiness detection
//!
//! The store counts as "not yet configured" until any of these holds
//! (checked in order, first hit wins):
//! 1. the tenant document says `using_static_data == false`
//! 2. the tenant document carries a `last_updated` stamp
//! 3. the tenant info has a real (non-demo) name
//! 4. at least [`MIN_CATEGORIES_THRESHOLD`] categories exist

use tracing::{debug, warn};

use super::static_data::{MIN_CATEGORIES_THRESHOLD, static_name};
use crate::db::store::{StoreHandle, StoreResult, TenantDocument, WriteBatch};

#[derive(Debug, Clone)]
pub struct EmptinessOracle {
    store: StoreHandle,
}

impl EmptinessOracle {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    /// Whether the store holds no real tenant data, surfacing store errors
    pub async fn probe(&self) -> StoreResult<bool> {
        if let Some(tenant) = self.store.tenant().await? {
            if tenant.using_static_data == Some(false) {
                debug!("Tenant marked as live");
                return Ok(false);
            }
            if tenant.last_updated.is_some() {
                debug!("Tenant has been written before");
                return Ok(false);
            }
            let real_name = tenant
                .info
                .as_ref()
                .map(|info| info.name.as_str())
                .filter(|name| !name.is_empty() && *name != static_name());
            if let Some(name) = real_name {
                debug!(name, "Tenant has real restaurant info");
                return Ok(false);
            }
        }

        let categories = self.store.category_count().await?;
        Ok(categories < MIN_CATEGORIES_THRESHOLD)
    }

    /// Fail-open variant of [`probe`](Self::probe): errors count as empty
    pub async fn is_empty(&self) -> bool {
        match self.probe().await {
            Ok(empty) => empty,
            Err(e) => {
                warn!(error = %e, "Emptiness check failed, treating store as empty");
                true
            }
        }
    }

    /// Record that the static dataset was served. Best effort.
    pub async fn mark_using_static_data(&self) {
        let mut batch = WriteBatch::new();
        batch.merge_tenant(TenantDocument::static_usage());
        if let Err(e) = self.store.commit(batch).await {
            warn!(error = %e, "Failed to record static data usage");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use shared::models::RestaurantInfo;

    use super::*;
    use crate::db::store::{CategoryDocument, DocumentStore, MemoryStore};

    fn oracle() -> (Arc<MemoryStore>, EmptinessOracle) {
        let store = Arc::new(MemoryStore::new());
        let handle = StoreHandle::new(store.clone(), Duration::from_secs(1));
        (store, EmptinessOracle::new(handle))
    }

    fn info(name: &str) -> RestaurantInfo {
        RestaurantInfo {
            name: name.to_string(),
            logo: None,
            background_image: None,
            wifi: None,
            footer: None,
        }
    }

    async fn seed(store: &MemoryStore, tenant: TenantDocument) {
        let mut batch = WriteBatch::new();
        batch.replace_tenant(tenant);
        store.commit(batch).await.unwrap();
    }

    #[tokio::test]
    async fn fresh_store_is_empty() {
        let (_, oracle) = oracle();
        assert!(oracle.probe().await.unwrap());
        assert!(oracle.is_empty().await);
    }

    #[tokio::test]
    async fn live_flag_means_not_empty() {
        let (store, oracle) = oracle();
        seed(
            &store,
            TenantDocument {
                using_static_data: Some(false),
                ..Default::default()
            },
        )
        .await;
        assert!(!oracle.is_empty().await);
    }

    #[tokio::test]
    async fn last_updated_means_not_empty() {
        let (store, oracle) = oracle();
        seed(
            &store,
            TenantDocument {
                using_static_data: Some(true),
                last_updated: Some("2024-05-01T10:00:00.000Z".to_string()),
                ..Default::default()
            },
        )
        .await;
        assert!(!oracle.is_empty().await);
    }

    #[tokio::test]
    async fn demo_name_alone_is_still_empty() {
        let (store, oracle) = oracle();
        seed(
            &store,
            TenantDocument {
                info: Some(info(static_name())),
                ..Default::default()
            },
        )
        .await;
        assert!(oracle.is_empty().await);

        seed(
            &store,
            TenantDocument {
                info: Some(info("Köşk Kebap")),
                ..Default::default()
            },
        )
        .await;
        assert!(!oracle.is_empty().await);
    }

    #[tokio::test]
    async fn a_single_category_means_not_empty() {
        let (store, oracle) = oracle();
        let mut batch = WriteBatch::new();
        batch.set_category(CategoryDocument {
            id: "tatlilar".to_string(),
            name: "Tatlılar".to_string(),
            description: None,
            order: 1,
        });
        store.commit(batch).await.unwrap();
        assert!(!oracle.is_empty().await);
    }

    #[tokio::test]
    async fn store_failure_fails_open() {
        let (store, oracle) = oracle();
        store.set_unavailable(true);
        assert!(oracle.probe().await.is_err());
        assert!(oracle.is_empty().await);
    }

    #[tokio::test]
    async fn marking_static_usage_keeps_store_empty() {
        let (store, oracle) = oracle();
        oracle.mark_using_static_data().await;

        let tenant = store.tenant().await.unwrap().unwrap();
        assert_eq!(tenant.using_static_data, Some(true));
        assert!(tenant.last_static_data_usage.is_some());
        assert!(oracle.is_empty().await);

        // Swallowed when the store is down
        store.set_unavailable(true);
        oracle.mark_using_static_data().await;
    }
}
