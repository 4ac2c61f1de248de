//! Port for the tenant category catalog.

use async_trait::async_trait;

use crate::domain::{Category, OrganizationId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by category repository adapters.
    pub enum CategoryRepositoryError {
        /// The data service could not be reached.
        Transport { message: String } =>
            "category lookup failed: {message}",
        /// The data service refused the query.
        Rejected { message: String } =>
            "category lookup rejected: {message}",
        /// A returned row could not be decoded.
        Decode { message: String } =>
            "category row could not be decoded: {message}",
    }
}

/// Port for listing categories.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Categories of an organization ordered by name.
    async fn list(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<Category>, CategoryRepositoryError>;
}
