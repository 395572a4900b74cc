//! Shared types for the menu service
//!
//! Domain models exchanged between the data layer and its consumers,
//! plus small time helpers.

pub mod models;
pub mod util;

// Re-exports
pub use models::{
    CategoryCreate, CategoryUpdate, FooterInfo, ItemCreate, ItemUpdate, MenuCategory, MenuItem,
    PublicRestaurantData, RestaurantData, RestaurantInfo, WifiInfo,
};
pub use serde::{Deserialize, Serialize};
