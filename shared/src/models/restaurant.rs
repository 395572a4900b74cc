//! Restaurant Model
//!
//! 餐厅信息 + 聚合快照，单租户只有一份

use serde::{Deserialize, Serialize};

use super::MenuCategory;

/// Restaurant information shown in the menu header and footer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantInfo {
    #[serde(default)]
    pub name: String,
    /// Logo URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    /// Header background image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wifi: Option<WifiInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<FooterInfo>,
}

/// Guest WiFi credentials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WifiInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub password: String,
}

/// Footer texts, each independently defaultable
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterInfo {
    #[serde(default)]
    pub welcome_text: String,
    #[serde(default)]
    pub price_note: String,
    #[serde(default)]
    pub copyright: String,
}

/// Full aggregate: info + categories (with items) + admin credential
///
/// The unit returned to admin consumers and the unit used for bulk import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantData {
    pub info: RestaurantInfo,
    #[serde(default)]
    pub categories: Vec<MenuCategory>,
    pub admin_password: String,
}

/// Public variant of [`RestaurantData`] without the admin credential
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicRestaurantData {
    pub info: RestaurantInfo,
    pub categories: Vec<MenuCategory>,
}

impl From<&RestaurantData> for PublicRestaurantData {
    fn from(data: &RestaurantData) -> Self {
        Self {
            info: data.info.clone(),
            categories: data.categories.clone(),
        }
    }
}
