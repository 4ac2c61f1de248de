//! Local session storage shared by the platform adapters.
//!
//! Holds the tokens of the signed-in user and publishes the current
//! principal on a watch channel whenever it changes.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::watch;
use zeroize::Zeroizing;

use crate::domain::Principal;
use crate::domain::ports::SessionChanges;

/// Tokens are refreshed this long before they expire.
const REFRESH_MARGIN_SECONDS: i64 = 30;

/// Tokens and identity of one signed-in session.
#[derive(Clone)]
pub(super) struct StoredSession {
    principal: Principal,
    access_token: Zeroizing<String>,
    refresh_token: Zeroizing<String>,
    expires_at: Option<DateTime<Utc>>,
}

impl StoredSession {
    pub(super) fn new(
        principal: Principal,
        access_token: String,
        refresh_token: String,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            principal,
            access_token: Zeroizing::new(access_token),
            refresh_token: Zeroizing::new(refresh_token),
            expires_at,
        }
    }

    pub(super) fn principal(&self) -> &Principal {
        &self.principal
    }

    pub(super) fn access_token(&self) -> &str {
        self.access_token.as_str()
    }

    pub(super) fn refresh_token(&self) -> &str {
        self.refresh_token.as_str()
    }

    /// Whether the access token expires within the refresh margin.
    pub(super) fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| {
            expires_at - TimeDelta::seconds(REFRESH_MARGIN_SECONDS) <= now
        })
    }
}

/// Session held at a given epoch.
///
/// The epoch moves on every sign-in, refresh and sign-out, so a caller that
/// started work against one session can tell whether it is still current.
#[derive(Clone)]
pub(super) struct Checkout {
    pub(super) epoch: u64,
    pub(super) session: StoredSession,
}

#[derive(Default)]
struct Slot {
    epoch: u64,
    session: Option<StoredSession>,
}

/// Current session plus the channel announcing changes to it.
///
/// Changes are published while the slot is still locked, so subscribers
/// observe them in the order they were applied.
pub(super) struct SessionStore {
    slot: RwLock<Slot>,
    changes: watch::Sender<Option<Principal>>,
}

impl SessionStore {
    pub(super) fn new() -> Self {
        let (changes, _) = watch::channel(None);
        Self {
            slot: RwLock::new(Slot::default()),
            changes,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Slot> {
        self.slot
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Slot> {
        self.slot
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    pub(super) fn snapshot(&self) -> Option<StoredSession> {
        self.read().session.clone()
    }

    /// Current session together with its epoch.
    pub(super) fn checkout(&self) -> Option<Checkout> {
        let slot = self.read();
        slot.session.clone().map(|session| Checkout {
            epoch: slot.epoch,
            session,
        })
    }

    pub(super) fn principal(&self) -> Option<Principal> {
        self.read()
            .session
            .as_ref()
            .map(|session| session.principal().clone())
    }

    /// Replace the session and announce the new principal.
    pub(super) fn store(&self, session: StoredSession) {
        let mut slot = self.write();
        Self::install(&mut slot, &self.changes, Some(session));
    }

    /// Replace the session only if nothing changed since `epoch`.
    ///
    /// Returns `false`, leaving the slot alone, when a sign-in or sign-out
    /// happened in between.
    pub(super) fn store_if_current(&self, epoch: u64, session: StoredSession) -> bool {
        let mut slot = self.write();
        if slot.epoch != epoch {
            return false;
        }
        Self::install(&mut slot, &self.changes, Some(session));
        true
    }

    /// Drop the session, announce the sign-out and hand back what was held.
    pub(super) fn clear(&self) -> Option<StoredSession> {
        let mut slot = self.write();
        Self::install(&mut slot, &self.changes, None)
    }

    /// Drop the session only if nothing changed since `epoch`.
    pub(super) fn clear_if_current(&self, epoch: u64) -> bool {
        let mut slot = self.write();
        if slot.epoch != epoch {
            return false;
        }
        Self::install(&mut slot, &self.changes, None);
        true
    }

    fn install(
        slot: &mut Slot,
        changes: &watch::Sender<Option<Principal>>,
        session: Option<StoredSession>,
    ) -> Option<StoredSession> {
        slot.epoch = slot.epoch.wrapping_add(1);
        let principal = session.as_ref().map(|held| held.principal().clone());
        let previous = std::mem::replace(&mut slot.session, session);
        changes.send_replace(principal);
        previous
    }

    pub(super) fn subscribe(&self) -> SessionChanges {
        SessionChanges::new(self.changes.subscribe())
    }
}
