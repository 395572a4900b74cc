//! Document store abstraction
//!
//! The menu layer talks to one tenant document, a collection of category
//! documents and, per category, a collection of item documents. Every
//! mutation goes through [`WriteBatch`] so multi-document changes (cascade
//! delete, bulk import, reset) are committed atomically by the backend.
//!
//! Backends:
//! - [`SurrealStore`] - embedded SurrealDB (RocksDB or in-memory engine)
//! - [`MemoryStore`] - process-local maps with fault injection, for tests

pub mod memory;
pub mod surreal;

pub use memory::MemoryStore;
pub use surreal::SurrealStore;

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::models::{CategoryUpdate, ItemUpdate, MenuCategory, MenuItem, RestaurantInfo};
use thiserror::Error;

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store call timed out after {0:?}")]
    Timeout(Duration),

    #[error("batch aborted: {0}")]
    Aborted(String),

    #[error("malformed document: {0}")]
    Malformed(String),
}

impl From<surrealdb::Error> for StoreError {
    fn from(err: surrealdb::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Malformed(err.to_string())
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Documents
// =============================================================================

/// The single tenant document
///
/// Also used as a merge patch: `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TenantDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<RestaurantInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_password: Option<String>,
    /// `false` once real data has been written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub using_static_data: Option<bool>,
    /// RFC 3339, stamped on every write
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    /// RFC 3339, stamped whenever the static dataset is served
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_static_data_usage: Option<String>,
}

impl TenantDocument {
    /// Patch marking the tenant as holding real data as of now
    pub fn touched() -> Self {
        Self {
            using_static_data: Some(false),
            last_updated: Some(shared::util::now_rfc3339()),
            ..Default::default()
        }
    }

    /// Patch recording that the static dataset was served
    pub fn static_usage() -> Self {
        Self {
            using_static_data: Some(true),
            last_static_data_usage: Some(shared::util::now_rfc3339()),
            ..Default::default()
        }
    }

    /// Merge a patch into this document (top-level fields only)
    pub fn apply(&mut self, patch: TenantDocument) {
        if patch.info.is_some() {
            self.info = patch.info;
        }
        if patch.admin_password.is_some() {
            self.admin_password = patch.admin_password;
        }
        if patch.using_static_data.is_some() {
            self.using_static_data = patch.using_static_data;
        }
        if patch.last_updated.is_some() {
            self.last_updated = patch.last_updated;
        }
        if patch.last_static_data_usage.is_some() {
            self.last_static_data_usage = patch.last_static_data_usage;
        }
    }
}

/// A category document (items live in their own collection)
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDocument {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub order: i32,
}

impl CategoryDocument {
    pub fn apply(&mut self, patch: CategoryUpdate) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(order) = patch.order {
            self.order = order;
        }
    }

    pub fn into_category(self, items: Vec<MenuItem>) -> MenuCategory {
        MenuCategory {
            id: self.id,
            name: self.name,
            description: self.description,
            order: self.order,
            items,
        }
    }
}

impl From<&MenuCategory> for CategoryDocument {
    fn from(category: &MenuCategory) -> Self {
        Self {
            id: category.id.clone(),
            name: category.name.clone(),
            description: category.description.clone(),
            order: category.order,
        }
    }
}

// =============================================================================
// Write batch
// =============================================================================

/// One document mutation inside a [`WriteBatch`]
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    /// Replace the whole tenant document
    ReplaceTenant(TenantDocument),
    /// Merge into the tenant document, creating it if missing
    MergeTenant(TenantDocument),
    DeleteTenant,
    /// Create or replace a category document
    SetCategory(CategoryDocument),
    /// Partial update; no-op when the category does not exist
    MergeCategory { id: String, patch: CategoryUpdate },
    DeleteCategory { id: String },
    /// Create or replace an item document
    SetItem { category_id: String, item: MenuItem },
    /// Partial update; no-op when the item does not exist
    MergeItem {
        category_id: String,
        item_id: String,
        patch: ItemUpdate,
    },
    DeleteItem { category_id: String, item_id: String },
}

/// Ordered set of mutations applied all together or not at all
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, op: WriteOp) -> &mut Self {
        self.ops.push(op);
        self
    }

    pub fn replace_tenant(&mut self, doc: TenantDocument) -> &mut Self {
        self.push(WriteOp::ReplaceTenant(doc))
    }

    pub fn merge_tenant(&mut self, patch: TenantDocument) -> &mut Self {
        self.push(WriteOp::MergeTenant(patch))
    }

    pub fn delete_tenant(&mut self) -> &mut Self {
        self.push(WriteOp::DeleteTenant)
    }

    pub fn set_category(&mut self, doc: CategoryDocument) -> &mut Self {
        self.push(WriteOp::SetCategory(doc))
    }

    pub fn merge_category(&mut self, id: &str, patch: CategoryUpdate) -> &mut Self {
        self.push(WriteOp::MergeCategory {
            id: id.to_string(),
            patch,
        })
    }

    pub fn delete_category(&mut self, id: &str) -> &mut Self {
        self.push(WriteOp::DeleteCategory { id: id.to_string() })
    }

    pub fn set_item(&mut self, category_id: &str, item: MenuItem) -> &mut Self {
        self.push(WriteOp::SetItem {
            category_id: category_id.to_string(),
            item,
        })
    }

    pub fn merge_item(&mut self, category_id: &str, item_id: &str, patch: ItemUpdate) -> &mut Self {
        self.push(WriteOp::MergeItem {
            category_id: category_id.to_string(),
            item_id: item_id.to_string(),
            patch,
        })
    }

    pub fn delete_item(&mut self, category_id: &str, item_id: &str) -> &mut Self {
        self.push(WriteOp::DeleteItem {
            category_id: category_id.to_string(),
            item_id: item_id.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<WriteOp> {
        self.ops
    }
}

// =============================================================================
// Store trait
// =============================================================================

/// Backing document store
///
/// Single-document reads plus one atomic write primitive ([`commit`]).
///
/// [`commit`]: DocumentStore::commit
#[async_trait]
pub trait DocumentStore: Send + Sync + fmt::Debug {
    /// Backend name for logs
    fn name(&self) -> &'static str;

    async fn tenant(&self) -> StoreResult<Option<TenantDocument>>;

    /// All categories, ascending by `order` (ties in store-defined order)
    async fn categories(&self) -> StoreResult<Vec<CategoryDocument>>;

    async fn category_count(&self) -> StoreResult<usize>;

    async fn category(&self, id: &str) -> StoreResult<Option<CategoryDocument>>;

    /// Items of one category, in no particular order
    async fn items(&self, category_id: &str) -> StoreResult<Vec<MenuItem>>;

    async fn item(&self, category_id: &str, item_id: &str) -> StoreResult<Option<MenuItem>>;

    /// Apply every op in the batch atomically
    async fn commit(&self, batch: WriteBatch) -> StoreResult<()>;
}

/// Shared store handle that bounds every call with a timeout
///
/// A call that exceeds the timeout fails with [`StoreError::Timeout`] and is
/// handled by callers exactly like any other store failure.
#[derive(Clone, Debug)]
pub struct StoreHandle {
    inner: Arc<dyn DocumentStore>,
    timeout: Duration,
}

impl StoreHandle {
    pub fn new(inner: Arc<dyn DocumentStore>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn bounded<T>(&self, fut: impl Future<Output = StoreResult<T>>) -> StoreResult<T> {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout(self.timeout)),
        }
    }

    pub async fn tenant(&self) -> StoreResult<Option<TenantDocument>> {
        self.bounded(self.inner.tenant()).await
    }

    pub async fn categories(&self) -> StoreResult<Vec<CategoryDocument>> {
        self.bounded(self.inner.categories()).await
    }

    pub async fn category_count(&self) -> StoreResult<usize> {
        self.bounded(self.inner.category_count()).await
    }

    pub async fn category(&self, id: &str) -> StoreResult<Option<CategoryDocument>> {
        self.bounded(self.inner.category(id)).await
    }

    pub async fn items(&self, category_id: &str) -> StoreResult<Vec<MenuItem>> {
        self.bounded(self.inner.items(category_id)).await
    }

    pub async fn item(&self, category_id: &str, item_id: &str) -> StoreResult<Option<MenuItem>> {
        self.bounded(self.inner.item(category_id, item_id)).await
    }

    pub async fn commit(&self, batch: WriteBatch) -> StoreResult<()> {
        self.bounded(self.inner.commit(batch)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tenant_patch_only_overwrites_supplied_fields() {
        let mut doc = TenantDocument {
            admin_password: Some("admin123".to_string()),
            using_static_data: Some(true),
            last_static_data_usage: Some("2024-01-01T00:00:00.000Z".to_string()),
            ..Default::default()
        };

        doc.apply(TenantDocument::touched());

        assert_eq!(doc.admin_password.as_deref(), Some("admin123"));
        assert_eq!(doc.using_static_data, Some(false));
        assert!(doc.last_updated.is_some());
        assert_eq!(
            doc.last_static_data_usage.as_deref(),
            Some("2024-01-01T00:00:00.000Z")
        );
    }

    #[test]
    fn batch_builder_keeps_op_order() {
        let mut batch = WriteBatch::new();
        batch
            .delete_item("tatlilar", "baklava")
            .delete_category("tatlilar")
            .merge_tenant(TenantDocument::touched());

        assert_eq!(batch.len(), 3);
        assert!(matches!(batch.ops()[0], WriteOp::DeleteItem { .. }));
        assert!(matches!(batch.ops()[1], WriteOp::DeleteCategory { .. }));
        assert!(matches!(batch.ops()[2], WriteOp::MergeTenant(_)));
    }

    #[tokio::test]
    async fn slow_calls_time_out() {
        let store = Arc::new(MemoryStore::new());
        store.set_latency(Some(Duration::from_millis(200)));
        let handle = StoreHandle::new(store, Duration::from_millis(20));

        let err = handle.tenant().await.unwrap_err();
        assert!(matches!(err, StoreError::Timeout(_)));
    }
}
