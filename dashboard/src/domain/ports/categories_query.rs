//! Driving port for the category catalog.

use async_trait::async_trait;

use crate::domain::{Access, Category, Error};

/// Use-case port listing the tenant's categories.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoriesQuery: Send + Sync {
    /// Categories ordered by name. Requires a provisioned profile.
    async fn categories(&self, access: &Access) -> Result<Vec<Category>, Error>;
}
