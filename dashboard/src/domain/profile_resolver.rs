//! Resolves the current session into an [`Access`] state.
//!
//! Resolutions are cached per principal and per generation. Concurrent
//! callers queue on the cache slot, so only one lookup is in flight at a
//! time; [`AccessQuery::invalidate`] bumps the generation so a lookup that
//! straddles a session change is discarded instead of cached.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::domain::ports::{AccessQuery, IdentityProvider, ProfileRepository, ProfileRepositoryError};
use crate::domain::{Access, Error, Principal, UserId};

/// Rows requested per lookup; anything beyond one is a duplicate.
const PROFILE_LOOKUP_LIMIT: usize = 2;

#[derive(Debug, Clone)]
struct CachedAccess {
    generation: u64,
    user_id: Option<UserId>,
    access: Access,
}

/// Profile resolver implementing the [`AccessQuery`] driving port.
pub struct ProfileResolver<I, P> {
    identity: Arc<I>,
    profiles: Arc<P>,
    generation: AtomicU64,
    slot: Mutex<Option<CachedAccess>>,
}

impl<I, P> ProfileResolver<I, P> {
    /// Create a resolver with an empty cache.
    pub fn new(identity: Arc<I>, profiles: Arc<P>) -> Self {
        Self {
            identity,
            profiles,
            generation: AtomicU64::new(0),
            slot: Mutex::new(None),
        }
    }
}

impl<I, P> ProfileResolver<I, P>
where
    I: IdentityProvider,
    P: ProfileRepository,
{
    fn map_profile_error(error: ProfileRepositoryError) -> Error {
        match error {
            ProfileRepositoryError::Transport { message }
            | ProfileRepositoryError::Rejected { message } => Error::external_service(message),
            ProfileRepositoryError::Decode { message } => {
                Error::internal(format!("profile row could not be read: {message}"))
            }
        }
    }

    async fn lookup(&self, principal: Principal) -> Result<Access, Error> {
        debug!(user_id = %principal.user_id(), "looking up profile");
        let mut rows = self
            .profiles
            .find_by_user_id(principal.user_id(), PROFILE_LOOKUP_LIMIT)
            .await
            .map_err(Self::map_profile_error)?;
        if rows.len() > 1 {
            warn!(user_id = %principal.user_id(), "duplicate profiles found");
            return Err(Error::data_integrity(format!(
                "more than one profile exists for user {}",
                principal.user_id()
            )));
        }
        Ok(Access::from_lookup(principal, rows.pop()))
    }
}

#[async_trait]
impl<I, P> AccessQuery for ProfileResolver<I, P>
where
    I: IdentityProvider,
    P: ProfileRepository,
{
    async fn resolve(&self) -> Result<Access, Error> {
        let mut slot = self.slot.lock().await;
        loop {
            let generation = self.generation.load(Ordering::Acquire);
            let principal = self.identity.current_principal();
            let user_id = principal.as_ref().map(|found| *found.user_id());

            if let Some(cached) = slot
                .as_ref()
                .filter(|cached| cached.generation == generation && cached.user_id == user_id)
            {
                return Ok(cached.access.clone());
            }

            let access = match principal {
                None => Access::Anonymous,
                Some(found) => self.lookup(found).await?,
            };

            if self.generation.load(Ordering::Acquire) == generation {
                *slot = Some(CachedAccess {
                    generation,
                    user_id,
                    access: access.clone(),
                });
                return Ok(access);
            }
            debug!("session changed during profile lookup; resolving again");
        }
    }

    fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }
}
