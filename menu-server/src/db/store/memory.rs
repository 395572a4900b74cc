//! In-process document store
//!
//! Keeps the tenant document, categories and items in ordered maps behind a
//! lock. Batches are applied to a copy that replaces the live state only when
//! every op succeeded. Fault switches let tests simulate an unreachable
//! backend, rejected commits, failing item listings and slow calls.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use shared::models::MenuItem;

use super::{CategoryDocument, DocumentStore, StoreError, StoreResult, TenantDocument, WriteBatch, WriteOp};

#[derive(Debug, Clone, Default)]
struct MemoryState {
    tenant: Option<TenantDocument>,
    categories: BTreeMap<String, CategoryDocument>,
    /// category id -> item id -> item
    items: BTreeMap<String, BTreeMap<String, MenuItem>>,
}

impl MemoryState {
    fn apply(&mut self, op: WriteOp) {
        match op {
            WriteOp::ReplaceTenant(doc) => self.tenant = Some(doc),
            WriteOp::MergeTenant(patch) => self.tenant.get_or_insert_default().apply(patch),
            WriteOp::DeleteTenant => self.tenant = None,
            WriteOp::SetCategory(doc) => {
                self.categories.insert(doc.id.clone(), doc);
            }
            WriteOp::MergeCategory { id, patch } => {
                if let Some(doc) = self.categories.get_mut(&id) {
                    doc.apply(patch);
                }
            }
            WriteOp::DeleteCategory { id } => {
                self.categories.remove(&id);
            }
            WriteOp::SetItem { category_id, item } => {
                self.items
                    .entry(category_id)
                    .or_default()
                    .insert(item.id.clone(), item);
            }
            WriteOp::MergeItem {
                category_id,
                item_id,
                patch,
            } => {
                if let Some(item) = self
                    .items
                    .get_mut(&category_id)
                    .and_then(|items| items.get_mut(&item_id))
                {
                    item.apply(patch);
                }
            }
            WriteOp::DeleteItem {
                category_id,
                item_id,
            } => {
                if let Some(items) = self.items.get_mut(&category_id) {
                    items.remove(&item_id);
                    if items.is_empty() {
                        self.items.remove(&category_id);
                    }
                }
            }
        }
    }
}

/// Map-backed [`DocumentStore`]
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
    unavailable: AtomicBool,
    reject_commits: AtomicBool,
    reject_item_lists: AtomicBool,
    latency: Mutex<Option<Duration>>,
    tenant_reads: AtomicUsize,
    commits: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails with [`StoreError::Unavailable`] while set
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Commits fail with [`StoreError::Aborted`] while set; reads still work
    pub fn set_reject_commits(&self, reject: bool) {
        self.reject_commits.store(reject, Ordering::SeqCst);
    }

    /// Item listings fail with [`StoreError::Unavailable`] while set
    pub fn set_reject_item_lists(&self, reject: bool) {
        self.reject_item_lists.store(reject, Ordering::SeqCst);
    }

    /// Delay applied before every call
    pub fn set_latency(&self, latency: Option<Duration>) {
        *self.latency.lock() = latency;
    }

    /// Number of tenant document reads served so far
    pub fn tenant_reads(&self) -> usize {
        self.tenant_reads.load(Ordering::SeqCst)
    }

    /// Number of successful commits so far
    pub fn commits(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    async fn enter(&self) -> StoreResult<()> {
        let latency = *self.latency.lock();
        if let Some(delay) = latency {
            tokio::time::sleep(delay).await;
        }
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store switched off".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn tenant(&self) -> StoreResult<Option<TenantDocument>> {
        self.enter().await?;
        self.tenant_reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.state.read().tenant.clone())
    }

    async fn categories(&self) -> StoreResult<Vec<CategoryDocument>> {
        self.enter().await?;
        let mut categories: Vec<CategoryDocument> =
            self.state.read().categories.values().cloned().collect();
        // Stable sort keeps id order for equal `order` values
        categories.sort_by_key(|c| c.order);
        Ok(categories)
    }

    async fn category_count(&self) -> StoreResult<usize> {
        self.enter().await?;
        Ok(self.state.read().categories.len())
    }

    async fn category(&self, id: &str) -> StoreResult<Option<CategoryDocument>> {
        self.enter().await?;
        Ok(self.state.read().categories.get(id).cloned())
    }

    async fn items(&self, category_id: &str) -> StoreResult<Vec<MenuItem>> {
        self.enter().await?;
        if self.reject_item_lists.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!(
                "item listing for {category_id} rejected"
            )));
        }
        Ok(self
            .state
            .read()
            .items
            .get(category_id)
            .map(|items| items.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn item(&self, category_id: &str, item_id: &str) -> StoreResult<Option<MenuItem>> {
        self.enter().await?;
        Ok(self
            .state
            .read()
            .items
            .get(category_id)
            .and_then(|items| items.get(item_id))
            .cloned())
    }

    async fn commit(&self, batch: WriteBatch) -> StoreResult<()> {
        self.enter().await?;
        if self.reject_commits.load(Ordering::SeqCst) {
            return Err(StoreError::Aborted(format!(
                "commit of {} ops rejected",
                batch.len()
            )));
        }

        let mut state = self.state.write();
        let mut next = state.clone();
        for op in batch.into_ops() {
            next.apply(op);
        }
        *state = next;
        self.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, price: f64) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            price,
            image: None,
            available: true,
            preparation_time: None,
            rating: None,
            review_count: None,
        }
    }

    fn category(id: &str, order: i32) -> CategoryDocument {
        CategoryDocument {
            id: id.to_string(),
            name: id.to_string(),
            description: None,
            order,
        }
    }

    #[tokio::test]
    async fn categories_come_back_sorted_by_order() {
        let store = MemoryStore::new();
        let mut batch = WriteBatch::new();
        batch
            .set_category(category("c", 2))
            .set_category(category("a", 3))
            .set_category(category("b", 1));
        store.commit(batch).await.unwrap();

        let ids: Vec<String> = store
            .categories()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, ["b", "c", "a"]);
        assert_eq!(store.category_count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn rejected_commit_leaves_state_untouched() {
        let store = MemoryStore::new();
        let mut seed = WriteBatch::new();
        seed.set_category(category("tatlilar", 1))
            .set_item("tatlilar", item("baklava", 120.0));
        store.commit(seed).await.unwrap();

        store.set_reject_commits(true);
        let mut batch = WriteBatch::new();
        batch
            .delete_item("tatlilar", "baklava")
            .delete_category("tatlilar");
        assert!(matches!(
            store.commit(batch).await,
            Err(StoreError::Aborted(_))
        ));

        assert!(store.category("tatlilar").await.unwrap().is_some());
        assert!(store.item("tatlilar", "baklava").await.unwrap().is_some());
        assert_eq!(store.commits(), 1);
    }

    #[tokio::test]
    async fn merge_on_missing_documents_is_a_no_op() {
        let store = MemoryStore::new();
        let mut batch = WriteBatch::new();
        batch
            .merge_category("ghost", Default::default())
            .merge_item("ghost", "nope", Default::default());
        store.commit(batch).await.unwrap();

        assert!(store.category("ghost").await.unwrap().is_none());
        assert!(store.items("ghost").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unavailable_store_fails_every_call() {
        let store = MemoryStore::new();
        store.set_unavailable(true);
        assert!(matches!(
            store.tenant().await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(store.commit(WriteBatch::new()).await.is_err());

        store.set_unavailable(false);
        assert!(store.tenant().await.unwrap().is_none());
    }
}
