//! What a read does when the store fails
//!
//! [`FailOpen`] logs and lets the caller serve static data, so public menu
//! reads never error. [`FailClosed`] surfaces the failure as
//! [`MenuError::StoreRead`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::warn;

use super::error::{MenuError, MenuResult};
use crate::db::store::StoreError;

pub trait FallbackPolicy: Send + Sync + fmt::Debug {
    /// `Ok(())` means "substitute the static dataset"
    fn on_read_error(&self, operation: &'static str, err: StoreError) -> MenuResult<()>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FailOpen;

impl FallbackPolicy for FailOpen {
    fn on_read_error(&self, operation: &'static str, err: StoreError) -> MenuResult<()> {
        warn!(operation, error = %err, "Store read failed, serving static data");
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FailClosed;

impl FallbackPolicy for FailClosed {
    fn on_read_error(&self, operation: &'static str, err: StoreError) -> MenuResult<()> {
        warn!(operation, error = %err, "Store read failed");
        Err(MenuError::StoreRead(err))
    }
}

/// Configured policy (`FALLBACK_MODE`)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FallbackMode {
    #[default]
    Open,
    Closed,
}

impl FallbackMode {
    pub fn policy(self) -> Arc<dyn FallbackPolicy> {
        match self {
            FallbackMode::Open => Arc::new(FailOpen),
            FallbackMode::Closed => Arc::new(FailClosed),
        }
    }
}

impl FromStr for FallbackMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" | "fail-open" => Ok(FallbackMode::Open),
            "closed" | "fail-closed" => Ok(FallbackMode::Closed),
            other => Err(format!("unknown fallback mode: {other}")),
        }
    }
}
