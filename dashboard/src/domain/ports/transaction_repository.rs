//! Port for the append-only transaction table.

use async_trait::async_trait;

use crate::domain::{NewTransaction, OrganizationId, Transaction};

use super::define_port_error;

define_port_error! {
    /// Errors raised by transaction repository adapters.
    pub enum TransactionRepositoryError {
        /// The data service could not be reached.
        Transport { message: String } =>
            "transaction request failed: {message}",
        /// The data service refused the request.
        Rejected { message: String } =>
            "transaction request rejected: {message}",
        /// A returned row could not be decoded.
        Decode { message: String } =>
            "transaction row could not be decoded: {message}",
    }
}

/// Port for inserting and listing transactions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Insert one entry and return the stored row.
    async fn insert(
        &self,
        transaction: &NewTransaction,
    ) -> Result<Transaction, TransactionRepositoryError>;

    /// Most recent entries of an organization, newest first.
    async fn list_recent(
        &self,
        organization_id: &OrganizationId,
        limit: usize,
    ) -> Result<Vec<Transaction>, TransactionRepositoryError>;
}
