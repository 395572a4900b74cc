//! Menu Item Model

use serde::{Deserialize, Serialize};

/// Menu item, owned by exactly one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Derived from the name, unique only within its category
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default = "default_true")]
    pub available: bool,
    /// Free text, e.g. "15-20 dk"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preparation_time: Option<String>,
    /// 0-5
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
}

fn default_true() -> bool {
    true
}

impl MenuItem {
    /// Apply a partial update in place (only supplied fields change)
    pub fn apply(&mut self, update: ItemUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(image) = update.image {
            self.image = Some(image);
        }
        if let Some(available) = update.available {
            self.available = available;
        }
        if let Some(preparation_time) = update.preparation_time {
            self.preparation_time = Some(preparation_time);
        }
        if let Some(rating) = update.rating {
            self.rating = Some(rating);
        }
        if let Some(review_count) = update.review_count {
            self.review_count = Some(review_count);
        }
    }
}

/// Create item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCreate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub image: Option<String>,
    /// Defaults to `true` when absent
    #[serde(default)]
    pub available: Option<bool>,
    #[serde(default)]
    pub preparation_time: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub review_count: Option<u32>,
}

impl ItemCreate {
    /// Build the stored item under the given identifier
    pub fn into_item(self, id: String) -> MenuItem {
        MenuItem {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            image: self.image,
            available: self.available.unwrap_or(true),
            preparation_time: self.preparation_time,
            rating: self.rating,
            review_count: self.review_count,
        }
    }
}

/// Update item payload (`id` is not accepted)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preparation_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
}
