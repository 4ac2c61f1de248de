//! Driving port resolving who the current session acts as.

use async_trait::async_trait;

use crate::domain::{Access, Error};

/// Use-case port for the session's access state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccessQuery: Send + Sync {
    /// Resolve the access state of the current session.
    async fn resolve(&self) -> Result<Access, Error>;

    /// Forget any cached resolution; the next `resolve` starts afresh.
    fn invalidate(&self);
}
