//! Menu data layer
//!
//! - [`MenuService`] - aggregated snapshot, import, reset, login
//! - [`MenuRepository`] - fallback-aware CRUD
//! - [`EmptinessOracle`] - decides when the static dataset is served
//! - [`SnapshotCache`] - short-lived memo of the aggregated snapshot

pub mod cache;
pub mod error;
pub mod fallback;
pub mod oracle;
pub mod repository;
pub mod service;
pub mod static_data;

pub use cache::SnapshotCache;
pub use error::{MenuError, MenuResult};
pub use fallback::{FailClosed, FailOpen, FallbackMode, FallbackPolicy};
pub use oracle::EmptinessOracle;
pub use repository::MenuRepository;
pub use service::{DatasetCounts, MenuOptions, MenuService};
pub use static_data::{MIN_CATEGORIES_THRESHOLD, static_data};
