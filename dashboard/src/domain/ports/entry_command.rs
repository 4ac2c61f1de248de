//! Driving port for recording manual cash-flow entries.

use async_trait::async_trait;

use crate::domain::{Access, Error, Transaction, TransactionDraft};

/// Use-case port for manual entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntryCommand: Send + Sync {
    /// Validate `draft`, attribute it to the tenant owner and store it.
    async fn submit(&self, access: &Access, draft: &TransactionDraft)
    -> Result<Transaction, Error>;
}
