//! Data models
//!
//! Shared between the menu data layer and its consumers (via API).
//! Wire format is camelCase JSON; storage rows are mapped inside the server.

pub mod category;
pub mod item;
pub mod restaurant;

// Re-exports
pub use category::*;
pub use item::*;
pub use restaurant::*;
