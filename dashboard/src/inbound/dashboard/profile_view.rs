//! Profile gate: keeps the resolved access state in step with the session.
//!
//! Mounting spawns a task that resolves the access state once, then
//! re-resolves after every published session change. Unmounting closes the
//! view scope; a resolution still in flight completes but is discarded.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::warn;

use super::scope::{LoadState, ViewScope};
use crate::domain::Access;
use crate::domain::ports::{AccessQuery, SessionChanges, SessionCommand};

/// Which screen the renderer should show for the current access state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Still resolving.
    Loading,
    /// No session: role cards and the login form.
    Login,
    /// Signed in without a provisioned profile.
    AwaitingProvisioning,
    /// Owner summary and transaction list.
    OwnerDashboard,
    /// Attendant entry form and upload cards.
    EmployeeWorkspace,
    /// Resolution failed; show the message with a sign-out action.
    Error,
}

impl Screen {
    /// Pick the screen for a load state.
    pub const fn for_state(state: &LoadState<Access>) -> Self {
        match state {
            LoadState::Loading => Self::Loading,
            LoadState::Failed(_) => Self::Error,
            LoadState::Ready(Access::Anonymous) => Self::Login,
            LoadState::Ready(Access::Unprovisioned { .. }) => Self::AwaitingProvisioning,
            LoadState::Ready(Access::Owner(_)) => Self::OwnerDashboard,
            LoadState::Ready(Access::Employee(_)) => Self::EmployeeWorkspace,
        }
    }
}

/// Mounted profile gate.
pub struct ProfileView {
    state: watch::Receiver<LoadState<Access>>,
    scope: ViewScope,
    task: JoinHandle<()>,
}

impl ProfileView {
    /// Mount the view on the current tokio runtime.
    pub fn mount(access: Arc<dyn AccessQuery>, session: &Arc<dyn SessionCommand>) -> Self {
        let (sender, state) = watch::channel(LoadState::Loading);
        let scope = ViewScope::new();
        // Subscribe before the first resolution so no change is missed.
        let changes = session.subscribe();
        let task = tokio::spawn(drive(access, changes, sender, scope.clone()));
        Self { state, scope, task }
    }

    /// Current load state.
    pub fn state(&self) -> LoadState<Access> {
        self.state.borrow().clone()
    }

    /// Screen for the current load state.
    pub fn screen(&self) -> Screen {
        Screen::for_state(&self.state.borrow())
    }

    /// Watch the load state as it changes.
    pub fn subscribe(&self) -> watch::Receiver<LoadState<Access>> {
        self.state.clone()
    }

    /// Whether the driving task has stopped.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for ProfileView {
    fn drop(&mut self) {
        self.scope.close();
    }
}

async fn drive(
    access: Arc<dyn AccessQuery>,
    mut changes: SessionChanges,
    state: watch::Sender<LoadState<Access>>,
    scope: ViewScope,
) {
    refresh(access.as_ref(), &state, &scope).await;
    loop {
        tokio::select! {
            () = scope.closed() => break,
            change = changes.changed() => {
                if change.is_none() {
                    break;
                }
                access.invalidate();
                if scope.is_active() {
                    state.send_replace(LoadState::Loading);
                }
                refresh(access.as_ref(), &state, &scope).await;
            }
        }
    }
}

async fn refresh(
    access: &dyn AccessQuery,
    state: &watch::Sender<LoadState<Access>>,
    scope: &ViewScope,
) {
    let next = match access.resolve().await {
        Ok(resolved) => LoadState::Ready(resolved),
        Err(err) => {
            warn!(error = %err, "profile resolution failed");
            LoadState::Failed(err.message().to_owned())
        }
    };
    if scope.is_active() {
        state.send_replace(next);
    }
}
