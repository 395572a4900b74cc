//! SurrealDB-backed document store
//!
//! Layout:
//! - `restaurant:main` - tenant document
//! - `menu_category:<id>` - `{slug, name, description, sort_order}`
//! - `menu_item:[<category>, <item>]` - item fields + `category_id`, `slug`
//!
//! Batches run as one `BEGIN TRANSACTION ... COMMIT TRANSACTION` query.

use std::fmt::Write as _;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::models::{CategoryUpdate, ItemUpdate, MenuItem};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{CategoryDocument, DocumentStore, StoreResult, TenantDocument, WriteBatch, WriteOp};

const TENANT_TABLE: &str = "restaurant";
const TENANT_ID: &str = "main";

const CATEGORY_FIELDS: &str = "slug, name, description, sort_order";
const ITEM_FIELDS: &str = "category_id, slug, name, description, price, image, available, preparation_time, rating, review_count";

// =============================================================================
// Rows
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct CategoryRow {
    slug: String,
    name: String,
    #[serde(default)]
    description: Option<String>,
    sort_order: i32,
}

impl From<CategoryRow> for CategoryDocument {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.slug,
            name: row.name,
            description: row.description,
            order: row.sort_order,
        }
    }
}

impl From<CategoryDocument> for CategoryRow {
    fn from(doc: CategoryDocument) -> Self {
        Self {
            slug: doc.id,
            name: doc.name,
            description: doc.description,
            sort_order: doc.order,
        }
    }
}

#[derive(Debug, Serialize)]
struct CategoryPatchRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort_order: Option<i32>,
}

impl From<CategoryUpdate> for CategoryPatchRow {
    fn from(patch: CategoryUpdate) -> Self {
        Self {
            name: patch.name,
            description: patch.description,
            sort_order: patch.order,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ItemRow {
    category_id: String,
    slug: String,
    name: String,
    #[serde(default)]
    description: String,
    price: f64,
    #[serde(default)]
    image: Option<String>,
    available: bool,
    #[serde(default)]
    preparation_time: Option<String>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    review_count: Option<u32>,
}

impl ItemRow {
    fn new(category_id: String, item: MenuItem) -> Self {
        Self {
            category_id,
            slug: item.id,
            name: item.name,
            description: item.description,
            price: item.price,
            image: item.image,
            available: item.available,
            preparation_time: item.preparation_time,
            rating: item.rating,
            review_count: item.review_count,
        }
    }
}

impl From<ItemRow> for MenuItem {
    fn from(row: ItemRow) -> Self {
        Self {
            id: row.slug,
            name: row.name,
            description: row.description,
            price: row.price,
            image: row.image,
            available: row.available,
            preparation_time: row.preparation_time,
            rating: row.rating,
            review_count: row.review_count,
        }
    }
}

#[derive(Debug, Serialize)]
struct ItemPatchRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    preparation_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    review_count: Option<u32>,
}

impl From<ItemUpdate> for ItemPatchRow {
    fn from(patch: ItemUpdate) -> Self {
        Self {
            name: patch.name,
            description: patch.description,
            price: patch.price,
            image: patch.image,
            available: patch.available,
            preparation_time: patch.preparation_time,
            rating: patch.rating,
            review_count: patch.review_count,
        }
    }
}

// =============================================================================
// Store
// =============================================================================

/// [`DocumentStore`] over an embedded SurrealDB connection
#[derive(Clone, Debug)]
pub struct SurrealStore {
    db: Surreal<Db>,
}

impl SurrealStore {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }
}

/// Accumulates the statements and parameters of one transaction
#[derive(Default)]
struct TransactionScript {
    sql: String,
    params: Vec<(String, serde_json::Value)>,
}

impl TransactionScript {
    fn param(&mut self, value: impl Serialize) -> StoreResult<String> {
        let name = format!("p{}", self.params.len());
        self.params.push((name.clone(), serde_json::to_value(value)?));
        Ok(format!("${name}"))
    }

    fn statement(&mut self, statement: String) {
        let _ = writeln!(self.sql, "{statement};");
    }

    fn push(&mut self, op: WriteOp) -> StoreResult<()> {
        let statement = match op {
            WriteOp::ReplaceTenant(doc) => {
                let content = self.param(doc)?;
                format!("UPSERT {TENANT_TABLE}:{TENANT_ID} CONTENT {content}")
            }
            WriteOp::MergeTenant(patch) => {
                // SET per top-level field: MERGE would deep-merge a nested `info`
                let serde_json::Value::Object(fields) = serde_json::to_value(patch)? else {
                    return Ok(());
                };
                if fields.is_empty() {
                    return Ok(());
                }
                let mut assignments = Vec::with_capacity(fields.len());
                for (field, value) in fields {
                    let param = self.param(value)?;
                    assignments.push(format!("{field} = {param}"));
                }
                format!(
                    "UPSERT {TENANT_TABLE}:{TENANT_ID} SET {}",
                    assignments.join(", ")
                )
            }
            WriteOp::DeleteTenant => format!("DELETE {TENANT_TABLE}:{TENANT_ID}"),
            WriteOp::SetCategory(doc) => {
                let key = self.param(&doc.id)?;
                let content = self.param(CategoryRow::from(doc))?;
                format!("UPSERT type::thing('menu_category', {key}) CONTENT {content}")
            }
            WriteOp::MergeCategory { id, patch } => {
                let key = self.param(id)?;
                let content = self.param(CategoryPatchRow::from(patch))?;
                format!("UPDATE type::thing('menu_category', {key}) MERGE {content}")
            }
            WriteOp::DeleteCategory { id } => {
                let key = self.param(id)?;
                format!("DELETE type::thing('menu_category', {key})")
            }
            WriteOp::SetItem { category_id, item } => {
                let category = self.param(&category_id)?;
                let key = self.param(&item.id)?;
                let content = self.param(ItemRow::new(category_id, item))?;
                format!("UPSERT type::thing('menu_item', [{category}, {key}]) CONTENT {content}")
            }
            WriteOp::MergeItem {
                category_id,
                item_id,
                patch,
            } => {
                let category = self.param(category_id)?;
                let key = self.param(item_id)?;
                let content = self.param(ItemPatchRow::from(patch))?;
                format!("UPDATE type::thing('menu_item', [{category}, {key}]) MERGE {content}")
            }
            WriteOp::DeleteItem {
                category_id,
                item_id,
            } => {
                let category = self.param(category_id)?;
                let key = self.param(item_id)?;
                format!("DELETE type::thing('menu_item', [{category}, {key}])")
            }
        };
        self.statement(statement);
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for SurrealStore {
    fn name(&self) -> &'static str {
        "surrealdb"
    }

    async fn tenant(&self) -> StoreResult<Option<TenantDocument>> {
        let docs: Vec<TenantDocument> = self
            .db
            .query(format!(
                "SELECT info, admin_password, using_static_data, last_updated, last_static_data_usage FROM {TENANT_TABLE}:{TENANT_ID}"
            ))
            .await?
            .take(0)?;
        Ok(docs.into_iter().next())
    }

    async fn categories(&self) -> StoreResult<Vec<CategoryDocument>> {
        let rows: Vec<CategoryRow> = self
            .db
            .query(format!(
                "SELECT {CATEGORY_FIELDS} FROM menu_category ORDER BY sort_order ASC, slug ASC"
            ))
            .await?
            .take(0)?;
        Ok(rows.into_iter().map(CategoryDocument::from).collect())
    }

    async fn category_count(&self) -> StoreResult<usize> {
        let mut result = self
            .db
            .query("SELECT count() FROM menu_category GROUP ALL")
            .await?;
        let count: Option<i64> = result.take((0, "count"))?;
        Ok(count.unwrap_or(0).max(0) as usize)
    }

    async fn category(&self, id: &str) -> StoreResult<Option<CategoryDocument>> {
        let rows: Vec<CategoryRow> = self
            .db
            .query(format!(
                "SELECT {CATEGORY_FIELDS} FROM type::thing('menu_category', $id)"
            ))
            .bind(("id", id.to_string()))
            .await?
            .take(0)?;
        Ok(rows.into_iter().next().map(CategoryDocument::from))
    }

    async fn items(&self, category_id: &str) -> StoreResult<Vec<MenuItem>> {
        let rows: Vec<ItemRow> = self
            .db
            .query(format!(
                "SELECT {ITEM_FIELDS} FROM menu_item WHERE category_id = $category"
            ))
            .bind(("category", category_id.to_string()))
            .await?
            .take(0)?;
        Ok(rows.into_iter().map(MenuItem::from).collect())
    }

    async fn item(&self, category_id: &str, item_id: &str) -> StoreResult<Option<MenuItem>> {
        let rows: Vec<ItemRow> = self
            .db
            .query(format!(
                "SELECT {ITEM_FIELDS} FROM type::thing('menu_item', [$category, $item])"
            ))
            .bind(("category", category_id.to_string()))
            .bind(("item", item_id.to_string()))
            .await?
            .take(0)?;
        Ok(rows.into_iter().next().map(MenuItem::from))
    }

    async fn commit(&self, batch: WriteBatch) -> StoreResult<()> {
        if batch.is_empty() {
            return Ok(());
        }

        let mut script = TransactionScript::default();
        script.statement("BEGIN TRANSACTION".to_string());
        for op in batch.into_ops() {
            script.push(op)?;
        }
        script.statement("COMMIT TRANSACTION".to_string());

        let mut query = self.db.query(script.sql);
        for param in script.params {
            query = query.bind(param);
        }
        query.await?.check()?;
        Ok(())
    }
}
