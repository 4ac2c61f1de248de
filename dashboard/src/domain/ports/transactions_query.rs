//! Driving port for the recent transaction list.

use async_trait::async_trait;

use crate::domain::{Access, Error, Transaction};

/// Use-case port listing recent entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionsQuery: Send + Sync {
    /// Newest entries first, at most `limit`. Empty unless `access` is an
    /// owner.
    async fn recent(&self, access: &Access, limit: usize) -> Result<Vec<Transaction>, Error>;
}
