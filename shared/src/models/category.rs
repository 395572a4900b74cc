//! Menu Category Model

use serde::{Deserialize, Serialize};

use super::MenuItem;

/// Menu category with its items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuCategory {
    /// Derived from the name at creation time, immutable afterwards
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Display sort key (ascending), not unique
    pub order: i32,
    /// No ordering guarantee within a category
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

/// Create category payload
///
/// `order` is assigned by the repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCreate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Update category payload
///
/// `id` and `items` are not part of the payload, so they are dropped
/// during deserialization and can never be written through an update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

impl CategoryUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.order.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn update_payload_strips_identifier_and_items() {
        let update: CategoryUpdate = serde_json::from_value(json!({
            "id": "hijacked",
            "items": [{ "id": "x" }],
            "name": "Tatlılar"
        }))
        .unwrap();

        assert_eq!(update.name.as_deref(), Some("Tatlılar"));
        assert!(update.description.is_none());
        assert!(update.order.is_none());
    }
}
