//! Read-side service for the transaction list and the category catalog.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    CategoriesQuery, CategoryRepository, CategoryRepositoryError, TransactionRepository,
    TransactionRepositoryError, TransactionsQuery,
};
use crate::domain::{Access, Category, Error, Transaction};

/// Ledger service implementing [`TransactionsQuery`] and [`CategoriesQuery`].
#[derive(Clone)]
pub struct LedgerService<T, C> {
    transactions: Arc<T>,
    categories: Arc<C>,
}

impl<T, C> LedgerService<T, C> {
    /// Create a service over the two repositories.
    pub fn new(transactions: Arc<T>, categories: Arc<C>) -> Self {
        Self {
            transactions,
            categories,
        }
    }
}

fn map_transaction_error(error: TransactionRepositoryError) -> Error {
    match error {
        TransactionRepositoryError::Transport { message }
        | TransactionRepositoryError::Rejected { message } => Error::external_service(message),
        TransactionRepositoryError::Decode { message } => {
            Error::internal(format!("transaction row could not be read: {message}"))
        }
    }
}

fn map_category_error(error: CategoryRepositoryError) -> Error {
    match error {
        CategoryRepositoryError::Transport { message }
        | CategoryRepositoryError::Rejected { message } => Error::external_service(message),
        CategoryRepositoryError::Decode { message } => {
            Error::internal(format!("category row could not be read: {message}"))
        }
    }
}

#[async_trait]
impl<T, C> TransactionsQuery for LedgerService<T, C>
where
    T: TransactionRepository,
    C: CategoryRepository,
{
    async fn recent(&self, access: &Access, limit: usize) -> Result<Vec<Transaction>, Error> {
        let Access::Owner(profile) = access else {
            return Ok(Vec::new());
        };
        debug!(organization_id = %profile.organization_id, limit, "listing transactions");
        self.transactions
            .list_recent(&profile.organization_id, limit)
            .await
            .map_err(map_transaction_error)
    }
}

#[async_trait]
impl<T, C> CategoriesQuery for LedgerService<T, C>
where
    T: TransactionRepository,
    C: CategoryRepository,
{
    async fn categories(&self, access: &Access) -> Result<Vec<Category>, Error> {
        let Some(profile) = access.profile() else {
            return Err(Error::authentication_state(
                "session present but profile missing",
            ));
        };
        self.categories
            .list(&profile.organization_id)
            .await
            .map_err(map_category_error)
    }
}
